use analog_clock::prelude::*;
use time::Time;
use time::macros::{datetime, time};

const EPSILON: f64 = 1e-9;

fn assert_angles(angles: AngleState, hour: f64, minute: f64, second: f64) {
    assert!(
        (angles.hour - hour).abs() < EPSILON
            && (angles.minute - minute).abs() < EPSILON
            && (angles.second - second).abs() < EPSILON,
        "expected hour={hour}, minute={minute}, second={second}, got {angles}"
    );
}

fn every_second_of_the_day() -> impl Iterator<Item = Time> {
    (0..24u32 * 3600).map(|s| {
        Time::from_hms((s / 3600) as u8, ((s / 60) % 60) as u8, (s % 60) as u8)
            .expect("in range")
    })
}

#[test]
fn midnight_is_all_zero() {
    assert_angles(AngleState::from_time(time!(00:00:00)), 0.0, 0.0, 0.0);
    assert_angles(AngleState::from_time(time!(12:00:00)), 0.0, 0.0, 0.0);
}

#[test]
fn three_oclock() {
    assert_angles(AngleState::from_time(time!(03:00:00)), 90.0, 0.0, 0.0);
}

#[test]
fn half_past_six_and_thirty_seconds() {
    assert_angles(AngleState::from_time(time!(06:30:30)), 195.0, 183.0, 180.0);
    assert_angles(
        AngleState::at(datetime!(2024-02-29 18:30:30 +10)),
        195.0,
        183.0,
        180.0,
    );
}

#[test]
fn formulas_hold_for_every_second() {
    for t in every_second_of_the_day() {
        let (h, m, s) = (t.hour() as f64, t.minute() as f64, t.second() as f64);
        let angles = AngleState::from_time(t);
        assert_angles(
            angles,
            ((h % 12.0) + m / 60.0) * 30.0,
            (m + s / 60.0) * 6.0,
            s * 6.0,
        );
        for angle in [angles.hour, angles.minute, angles.second] {
            assert!((0.0..360.0).contains(&angle), "{angle} out of range at {t}");
        }
    }
}

#[test]
fn hands_only_move_forward_over_twelve_hours() {
    let states: Vec<AngleState> = every_second_of_the_day()
        .take(12 * 3600 + 1)
        .map(AngleState::from_time)
        .collect();
    for pair in states.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let hour = (next.hour - prev.hour).rem_euclid(360.0);
        let minute = (next.minute - prev.minute).rem_euclid(360.0);
        let second = (next.second - prev.second).rem_euclid(360.0);
        assert!(hour <= 0.5 + EPSILON, "hour jumped {hour} from {prev} to {next}");
        assert!(minute <= 0.1 + EPSILON, "minute jumped {minute} from {prev} to {next}");
        assert!(
            (second - 6.0).abs() < EPSILON,
            "second moved {second} from {prev} to {next}"
        );
    }
    // the cycle closes back on midnight
    assert_eq!(states.first(), states.last());
}

#[tokio::test(start_paused = true)]
async fn scheduler_with_fixed_time_keeps_publishing_the_same_state() {
    let source = FixedTime(datetime!(2025-01-01 06:30:30 UTC));
    let mut scheduler =
        TickScheduler::new(source, std::time::Duration::from_millis(250)).expect("valid period");
    let mut updates = scheduler.subscribe();
    scheduler.start();

    let mut seen = 0;
    while seen < 4 {
        updates.changed().await.expect("scheduler alive");
        assert_angles(*updates.borrow_and_update(), 195.0, 183.0, 180.0);
        seen += 1;
    }
    scheduler.stop().await;
}
