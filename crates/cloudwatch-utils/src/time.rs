//! Wall-clock sources and calendar helpers for log event timestamps.
use jiff::{
    Timestamp,
    civil::{Date, Time},
    tz::TimeZone,
};

/// A source of wall-clock time for log event timestamps.
///
/// The client reads the clock once per append attempt, so a publish that recovers from a sequence
/// token mismatch stamps its retry with a fresh reading.
///
/// `Clock` is automatically implemented for any `Fn() -> i64` closure, which is convenient for
/// tests that need deterministic timestamps.
pub trait Clock: Send + Sync + 'static {
    /// Milliseconds since the UNIX epoch.
    fn now_millis(&self) -> i64;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Timestamp::now().as_millisecond()
    }
}

impl<F> Clock for F
where
    F: Fn() -> i64 + Send + Sync + 'static,
{
    fn now_millis(&self) -> i64 {
        self()
    }
}

/// Milliseconds since the UNIX epoch of local midnight at the start of `date`.
///
/// Falls back to UTC when the system time zone cannot represent that instant.
pub fn start_of_day_millis(date: Date) -> i64 {
    let midnight = date.to_datetime(Time::midnight());
    let zoned = midnight
        .to_zoned(TimeZone::system())
        .or_else(|_| midnight.to_zoned(TimeZone::UTC));
    match zoned {
        Ok(zoned) => zoned.timestamp().as_millisecond(),
        Err(_) => Timestamp::UNIX_EPOCH.as_millisecond(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn test_closure_clock() {
        let clock = || 42_i64;
        assert_eq!(clock.now_millis(), 42);
    }

    #[test]
    fn test_start_of_day_is_ordered() {
        let start = start_of_day_millis(date(2022, 1, 1));
        let end = start_of_day_millis(date(2023, 1, 1));
        // one non-leap year, allowing for a DST shift either way
        let year = 365 * 24 * 60 * 60 * 1000;
        assert!((end - start - year).abs() <= 60 * 60 * 1000);
    }
}
