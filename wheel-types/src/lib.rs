//! Value types shared between the spin engine, the renderers and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numbers printed red on a European wheel. Every other non-zero number is black.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Highest number on a single-zero wheel.
pub const MAX_NUMBER: u8 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentColor {
    Red,
    Black,
    Green,
}

impl SegmentColor {
    /// Color printed on the pocket for `number`.
    pub const fn of(number: u8) -> Self {
        if number == 0 {
            return SegmentColor::Green;
        }
        let mut i = 0;
        while i < RED_NUMBERS.len() {
            if RED_NUMBERS[i] == number {
                return SegmentColor::Red;
            }
            i += 1;
        }
        SegmentColor::Black
    }
}

impl fmt::Display for SegmentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentColor::Red => write!(f, "Red"),
            SegmentColor::Black => write!(f, "Black"),
            SegmentColor::Green => write!(f, "Green"),
        }
    }
}

/// One pocket of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub number: u8,
    pub color: SegmentColor,
}

impl Segment {
    pub const fn new(number: u8) -> Self {
        Self { number, color: SegmentColor::of(number) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
}

/// Published once per completed spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Position of the winning segment in wheel order.
    pub index: usize,
    pub number: u8,
    pub color: SegmentColor,
}

impl SpinOutcome {
    pub fn new(index: usize, segment: Segment) -> Self {
        Self { index, number: segment.number, color: segment.color }
    }

    pub fn segment(&self) -> Segment {
        Segment { number: self.number, color: self.color }
    }
}

impl fmt::Display for SpinOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_green() {
        assert_eq!(SegmentColor::of(0), SegmentColor::Green);
    }

    #[test]
    fn test_known_reds_and_blacks() {
        assert_eq!(SegmentColor::of(1), SegmentColor::Red);
        assert_eq!(SegmentColor::of(32), SegmentColor::Red);
        assert_eq!(SegmentColor::of(2), SegmentColor::Black);
        assert_eq!(SegmentColor::of(15), SegmentColor::Black);
        assert_eq!(SegmentColor::of(36), SegmentColor::Red);
    }

    #[test]
    fn test_eighteen_of_each_color() {
        let reds = (1..=MAX_NUMBER).filter(|&n| SegmentColor::of(n) == SegmentColor::Red).count();
        let blacks =
            (1..=MAX_NUMBER).filter(|&n| SegmentColor::of(n) == SegmentColor::Black).count();
        assert_eq!(reds, 18);
        assert_eq!(blacks, 18);
    }

    #[test]
    fn test_outcome_display() {
        let outcome = SpinOutcome::new(0, Segment::new(0));
        assert_eq!(outcome.to_string(), "0 Green");

        let outcome = SpinOutcome::new(18, Segment::new(10));
        assert_eq!(outcome.to_string(), "10 Black");
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = SpinOutcome::new(13, Segment::new(36));
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"index":13,"number":36,"color":"Red"}"#);

        let parsed: SpinOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, outcome);
        assert_eq!(parsed.segment(), Segment::new(36));
    }

    #[test]
    fn test_phase_defaults_to_idle() {
        assert_eq!(SpinPhase::default(), SpinPhase::Idle);
    }
}
