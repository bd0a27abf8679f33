//! Spin animation and outcome resolution for a single-zero roulette wheel.
//!
//! [`layout`] fixes which number sits in which segment, [`geometry`] maps
//! segments to angles and points, [`motion`] turns spin progress into a ball
//! position, and [`spin::SpinEngine`] drives all of it from host frame ticks.

pub mod config;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod motion;
pub mod random;
pub mod scheduler;
pub mod spin;

pub use config::{load_config, load_config_from, Config};
pub use layout::{generate_layout, WheelLayout, SEGMENT_COUNT};
pub use motion::{BallFrame, MotionProfile};
pub use random::{RandSource, SequenceSource, UniformSource};
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler};
pub use spin::{SpinEngine, SpinState, TickResult};
pub use wheel_types::{Segment, SegmentColor, SpinOutcome, SpinPhase};
