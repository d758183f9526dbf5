//! Test utilities shared by the unit tests in `src/`.

use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;

/// Instant every clock-driven unit test starts from.
pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock pinned to `at` for any number of readings.
pub(crate) fn fixed_clock(at: DateTime<Utc>) -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(at);
    clock
}
