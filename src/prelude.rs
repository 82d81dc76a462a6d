pub use crate::clock::AngleState;
pub use crate::error::ClockError;
pub use crate::scheduler::{TickScheduler, Visibility};
pub use crate::source::{FixedTime, LocalClock, TimeSource};

#[cfg(feature = "cli")]
pub use clap::Parser;

pub use log::*;
