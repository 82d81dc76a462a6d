//! Where the clock reads "now" from.

use time::error::IndeterminateOffset;
use time::{OffsetDateTime, UtcOffset};

use crate::prelude::*;

pub trait TimeSource: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

type OffsetLookup = fn() -> Result<UtcOffset, IndeterminateOffset>;

/// The system clock.
///
/// A fixed clock always uses its offset. A clock that follows the host asks
/// for the current offset on every read, so daylight-saving changes show up
/// on the next tick, and uses the stored offset when the lookup fails.
#[derive(Clone, Copy, Debug)]
pub struct LocalClock {
    offset: UtcOffset,
    lookup: Option<OffsetLookup>,
}

impl LocalClock {
    pub fn new(offset: UtcOffset) -> Self {
        Self {
            offset,
            lookup: None,
        }
    }

    pub fn utc() -> Self {
        Self::new(UtcOffset::UTC)
    }

    pub fn following(fallback: UtcOffset, lookup: OffsetLookup) -> Self {
        Self {
            offset: fallback,
            lookup: Some(lookup),
        }
    }

    /// Fixed at the host's current UTC offset.
    ///
    /// On unix the lookup fails once the process has more than one thread.
    pub fn detect() -> Result<Self, ClockError> {
        let offset = UtcOffset::current_local_offset()?;
        debug!("Detected local UTC offset: {}", offset);
        Ok(Self::new(offset))
    }

    /// Follows the host's offset, falling back to the offset found now, or UTC.
    pub fn host() -> Self {
        let fallback = Self::detect()
            .map(|clock| clock.offset)
            .unwrap_or_else(|err| {
                warn!("{err}, falling back to UTC");
                UtcOffset::UTC
            });
        Self::following(fallback, UtcOffset::current_local_offset)
    }

    pub fn offset(&self) -> UtcOffset {
        self.current_offset()
    }

    pub fn follows_host(&self) -> bool {
        self.lookup.is_some()
    }

    fn current_offset(&self) -> UtcOffset {
        match self.lookup {
            Some(lookup) => lookup().unwrap_or(self.offset),
            None => self.offset,
        }
    }
}

impl TimeSource for LocalClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.current_offset())
    }
}

/// Always returns the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedTime(pub OffsetDateTime);

impl TimeSource for FixedTime {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
