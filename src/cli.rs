use std::time::Duration;

use clap::Parser;
use time::Time;
use time::macros::format_description;

use crate::constants::{
    DEFAULT_TEXT_FACE_ROWS, MAX_TEXT_FACE_ROWS, MAX_TICK_MILLIS, MIN_TEXT_FACE_ROWS,
};
use crate::prelude::*;

#[derive(Parser, Debug)]
#[command(about = "Analog clock hands, recomputed once a tick")]
pub struct Cli {
    #[clap(long, env = "CLOCK_DEBUG", default_value_t = false)]
    pub debug: bool,

    /// Milliseconds between ticks
    #[clap(long, env = "CLOCK_TICK_MS", default_value_t = 1_000)]
    pub tick_ms: u64,

    /// Show UTC rather than the local time zone
    #[clap(long, env = "CLOCK_UTC", default_value_t = false)]
    pub utc: bool,

    /// Draw the clock face instead of logging the angles
    #[clap(long, env = "CLOCK_FACE", default_value_t = false)]
    pub face: bool,

    /// Draw the face without ANSI colours
    #[clap(long, env = "CLOCK_NO_COLOR", default_value_t = false)]
    pub no_color: bool,

    /// Height of the drawn face, in rows
    #[clap(long, env = "CLOCK_FACE_SIZE", default_value_t = DEFAULT_TEXT_FACE_ROWS)]
    pub size: u16,

    /// Exit after this many frames
    #[clap(long, env = "CLOCK_TICKS")]
    pub ticks: Option<u64>,

    /// Render a single fixed time of day (HH:MM:SS) and exit
    #[clap(long, value_parser = parse_time_of_day)]
    pub at: Option<Time>,
}

impl Cli {
    pub fn tick_period(&self) -> Result<Duration, ClockError> {
        match self.tick_ms {
            0 => Err(ClockError::InvalidPeriod),
            ms if ms > MAX_TICK_MILLIS => Err(ClockError::ConfigError(format!(
                "tick period {ms}ms is longer than {MAX_TICK_MILLIS}ms"
            ))),
            ms => Ok(Duration::from_millis(ms)),
        }
    }

    pub fn face_rows(&self) -> Result<u16, ClockError> {
        if (MIN_TEXT_FACE_ROWS..=MAX_TEXT_FACE_ROWS).contains(&self.size) {
            Ok(self.size)
        } else {
            Err(ClockError::ConfigError(format!(
                "face size {} is outside {MIN_TEXT_FACE_ROWS}..={MAX_TEXT_FACE_ROWS}",
                self.size
            )))
        }
    }
}

pub fn parse_time_of_day(value: &str) -> Result<Time, String> {
    Time::parse(value, format_description!("[hour]:[minute]:[second]"))
        .map_err(|err| format!("expected HH:MM:SS: {err}"))
}
