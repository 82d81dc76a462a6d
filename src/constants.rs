use std::time::Duration;

pub const DEGREES_PER_SECOND: f64 = 6.0;
pub const DEGREES_PER_MINUTE: f64 = 6.0;
pub const DEGREES_PER_HOUR: f64 = 30.0;
pub const FULL_TURN_DEGREES: f64 = 360.0;

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);
pub const MAX_TICK_MILLIS: u64 = 60_000;

/// Face measurements in [`crate::face::FaceStyle`] are given for a canvas of this side.
pub const REFERENCE_FACE_SIZE: f32 = 200.0;
pub const HOUR_MARKS: usize = 12;

pub const DEFAULT_TEXT_FACE_ROWS: u16 = 21;
pub const MIN_TEXT_FACE_ROWS: u16 = 7;
pub const MAX_TEXT_FACE_ROWS: u16 = 101;
