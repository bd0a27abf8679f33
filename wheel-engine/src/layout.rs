//! Fixed pocket order of a single-zero (European) wheel.

use wheel_types::Segment;

pub const SEGMENT_COUNT: usize = 37;

/// Pocket numbers clockwise from the zero.
pub const WHEEL_ORDER: [u8; SEGMENT_COUNT] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

static LAYOUT: WheelLayout = WheelLayout::european();

/// Ordered segments; index `i` covers `[i * span, (i + 1) * span)`.
#[derive(Debug, PartialEq, Eq)]
pub struct WheelLayout {
    segments: [Segment; SEGMENT_COUNT],
}

impl WheelLayout {
    const fn european() -> Self {
        let mut segments = [Segment::new(0); SEGMENT_COUNT];
        let mut i = 0;
        while i < SEGMENT_COUNT {
            segments[i] = Segment::new(WHEEL_ORDER[i]);
            i += 1;
        }
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Wheel position of a pocket number.
    pub fn index_of(&self, number: u8) -> Option<usize> {
        self.segments.iter().position(|s| s.number == number)
    }
}

/// The wheel layout. Built at compile time, so every call returns the same instance.
pub fn generate_layout() -> &'static WheelLayout {
    &LAYOUT
}
