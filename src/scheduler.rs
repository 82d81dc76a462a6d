use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::clock::AngleState;
use crate::prelude::*;
use crate::source::TimeSource;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

struct Running {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Must be started inside a tokio runtime.
pub struct TickScheduler<S> {
    source: Arc<S>,
    period: Duration,
    state: Arc<watch::Sender<AngleState>>,
    running: Option<Running>,
}

impl<S> TickScheduler<S>
where
    S: TimeSource + 'static,
{
    pub fn new(source: S, period: Duration) -> Result<Self, ClockError> {
        if period.is_zero() {
            return Err(ClockError::InvalidPeriod);
        }
        let initial = AngleState::at(source.now());
        let (state, _) = watch::channel(initial);
        Ok(Self {
            source: Arc::new(source),
            period,
            state: Arc::new(state),
            running: None,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn subscribe(&self) -> watch::Receiver<AngleState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> AngleState {
        *self.state.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn start(&mut self) {
        if self.running.is_some() {
            debug!("Tick loop already running");
            return;
        }
        let now = self.source.now();
        self.state.send_replace(AngleState::at(now));

        let (shutdown, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(tick_loop(
            self.source.clone(),
            self.period,
            self.state.clone(),
            shutdown_rx,
            first_tick_delay(now, self.period),
        ));
        self.running = Some(Running { shutdown, handle });
        debug!("Tick loop started, period {:?}", self.period);
    }

    /// Stops the loop. Nothing is published after this returns.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        // the loop may already be gone, in which case there's nobody to tell
        let _ = running.shutdown.send(());
        if let Err(err) = running.handle.await {
            if !err.is_cancelled() {
                error!("Tick loop ended abnormally: {err}");
            }
        }
        debug!("Tick loop stopped");
    }

    pub async fn set_visibility(&mut self, visibility: Visibility) {
        match visibility {
            Visibility::Visible => self.start(),
            Visibility::Hidden => self.stop().await,
        }
    }
}

impl<S> Drop for TickScheduler<S> {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.shutdown.send(());
            running.handle.abort();
        }
    }
}

async fn tick_loop<S: TimeSource>(
    source: Arc<S>,
    period: Duration,
    state: Arc<watch::Sender<AngleState>>,
    mut shutdown: oneshot::Receiver<()>,
    first_delay: Duration,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + first_delay, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                let angles = AngleState::at(source.now());
                trace!("Tick: {angles}");
                state.send_replace(angles);
            }
        }
    }
}

/// Periods that divide one second evenly are aligned to the wall clock.
pub fn first_tick_delay(now: OffsetDateTime, period: Duration) -> Duration {
    let period_nanos = period.as_nanos();
    if period_nanos == 0 || NANOS_PER_SECOND % period_nanos != 0 {
        return period;
    }
    let phase = u128::from(now.nanosecond()) % period_nanos;
    Duration::from_nanos((period_nanos - phase) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FixedTime;
    use time::macros::datetime;

    /// Wall clock that follows tokio's (pausable) clock.
    struct PausedSource {
        base: OffsetDateTime,
        origin: Instant,
    }

    impl PausedSource {
        fn new(base: OffsetDateTime) -> Self {
            Self {
                base,
                origin: Instant::now(),
            }
        }
    }

    impl TimeSource for PausedSource {
        fn now(&self) -> OffsetDateTime {
            self.base + self.origin.elapsed()
        }
    }

    #[test]
    fn rejects_zero_period() {
        let source = FixedTime(datetime!(2025-01-01 00:00:00 UTC));
        assert!(matches!(
            TickScheduler::new(source, Duration::ZERO),
            Err(ClockError::InvalidPeriod)
        ));
    }

    #[test]
    fn first_tick_aligns_to_the_second() {
        let now = datetime!(2025-01-01 00:00:00.250 UTC);
        assert_eq!(
            first_tick_delay(now, Duration::from_secs(1)),
            Duration::from_millis(750)
        );
        assert_eq!(
            first_tick_delay(now, Duration::from_millis(200)),
            Duration::from_millis(150)
        );
        let whole = datetime!(2025-01-01 00:00:00 UTC);
        assert_eq!(
            first_tick_delay(whole, Duration::from_secs(1)),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn first_tick_unaligned_for_odd_periods() {
        let now = datetime!(2025-01-01 00:00:00.250 UTC);
        assert_eq!(
            first_tick_delay(now, Duration::from_millis(700)),
            Duration::from_millis(700)
        );
        assert_eq!(
            first_tick_delay(now, Duration::from_secs(5)),
            Duration::from_secs(5)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_immediately_then_every_tick() {
        let source = PausedSource::new(datetime!(2025-01-01 06:30:30 UTC));
        let mut scheduler =
            TickScheduler::new(source, Duration::from_secs(1)).expect("valid period");
        let mut updates = scheduler.subscribe();

        scheduler.start();
        assert!(scheduler.is_running());
        assert!(updates.has_changed().expect("sender alive"));
        let first = *updates.borrow_and_update();
        assert_eq!(first.second, 180.0);

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert!(updates.has_changed().expect("sender alive"));
        let latest = *updates.borrow_and_update();
        assert_eq!(latest.second, 198.0, "three ticks later, got {latest}");
        assert_eq!(scheduler.current(), latest);

        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_published_after_stop() {
        let source = PausedSource::new(datetime!(2025-01-01 03:00:00 UTC));
        let mut scheduler =
            TickScheduler::new(source, Duration::from_secs(1)).expect("valid period");
        let mut updates = scheduler.subscribe();

        scheduler.set_visibility(Visibility::Visible).await;
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        scheduler.set_visibility(Visibility::Hidden).await;
        assert!(!scheduler.is_running());
        let _ = updates.borrow_and_update();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!updates.has_changed().expect("sender alive"));
    }

    #[tokio::test(start_paused = true)]
    async fn resume_publishes_fresh_state() {
        let source = PausedSource::new(datetime!(2025-01-01 09:00:00 UTC));
        let mut scheduler =
            TickScheduler::new(source, Duration::from_secs(1)).expect("valid period");
        let mut updates = scheduler.subscribe();

        scheduler.start();
        scheduler.stop().await;
        let _ = updates.borrow_and_update();

        tokio::time::sleep(Duration::from_secs(90)).await;
        scheduler.start();
        assert!(updates.has_changed().expect("sender alive"));
        let resumed = *updates.borrow_and_update();
        // 09:01:30
        assert_eq!(resumed.second, 180.0);
        assert_eq!(resumed.minute, 9.0);
        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_scheduler_ends_publishing() {
        let source = PausedSource::new(datetime!(2025-01-01 03:00:00 UTC));
        let mut scheduler =
            TickScheduler::new(source, Duration::from_secs(1)).expect("valid period");
        let mut updates = scheduler.subscribe();
        scheduler.start();
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        let last = *updates.borrow_and_update();

        drop(scheduler);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(updates.has_changed().is_err(), "sender should be gone");
        assert_eq!(*updates.borrow(), last);
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_keeps_one_loop() {
        let source = FixedTime(datetime!(2025-01-01 00:00:00 UTC));
        let mut scheduler =
            TickScheduler::new(source, Duration::from_secs(1)).expect("valid period");
        scheduler.start();
        scheduler.start();
        assert!(scheduler.is_running());
        scheduler.stop().await;
        assert!(!scheduler.is_running());
        // a second stop is a no-op
        scheduler.stop().await;
    }
}
