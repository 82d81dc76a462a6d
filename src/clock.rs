use time::{OffsetDateTime, Time};

use crate::constants::{
    DEGREES_PER_HOUR, DEGREES_PER_MINUTE, DEGREES_PER_SECOND, FULL_TURN_DEGREES,
};

/// Hand angles in degrees. 0° points at 3 o'clock and angles grow clockwise
/// on a y-down screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AngleState {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl AngleState {
    /// Angles for a time of day. Sub-second precision is dropped, so the
    /// second hand moves in whole 6° steps.
    pub fn from_time(time: Time) -> AngleState {
        let hour = time.hour() % 12;
        let minute = time.minute();
        let second = time.second();

        let seconds = second as f64;
        let minutes = minute as f64 + (seconds / 60.0);
        let hours = hour as f64 + (minute as f64 / 60.0);

        AngleState {
            hour: hours * DEGREES_PER_HOUR,
            minute: minutes * DEGREES_PER_MINUTE,
            second: seconds * DEGREES_PER_SECOND,
        }
        .normalize_degrees()
    }

    /// Angles for an instant, read in the instant's own UTC offset.
    pub fn at(instant: OffsetDateTime) -> AngleState {
        AngleState::from_time(instant.time())
    }

    pub fn to_radians(self) -> AngleState {
        AngleState {
            hour: self.hour.to_radians(),
            minute: self.minute.to_radians(),
            second: self.second.to_radians(),
        }
    }

    pub fn normalize_degrees(self) -> AngleState {
        AngleState {
            hour: self.hour.rem_euclid(FULL_TURN_DEGREES),
            minute: self.minute.rem_euclid(FULL_TURN_DEGREES),
            second: self.second.rem_euclid(FULL_TURN_DEGREES),
        }
    }
}

impl std::fmt::Display for AngleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hour={:.2}, minute={:.2}, second={:.2}",
            self.hour, self.minute, self.second
        )
    }
}
