//! TTL Module
//!
//! Time-to-live values accepted by `set`.

use std::time::Duration as StdDuration;

use chrono::Duration;

// == Ttl ==
/// Lifetime of a cache entry, either a raw second count or an interval.
///
/// Negative values produce an entry that is already expired. Zero expires
/// at the current second, so the entry stays readable until the clock moves
/// past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Whole seconds
    Seconds(i64),
    /// A calendar-free interval; sub-second precision is dropped
    Interval(Duration),
}

impl Ttl {
    // == As Seconds ==
    /// Normalizes the TTL to whole seconds.
    pub fn as_seconds(&self) -> i64 {
        match self {
            Ttl::Seconds(seconds) => *seconds,
            Ttl::Interval(interval) => interval.num_seconds(),
        }
    }
}

impl From<i64> for Ttl {
    fn from(seconds: i64) -> Self {
        Ttl::Seconds(seconds)
    }
}

impl From<u64> for Ttl {
    fn from(seconds: u64) -> Self {
        Ttl::Seconds(i64::try_from(seconds).unwrap_or(i64::MAX))
    }
}

impl From<Duration> for Ttl {
    fn from(interval: Duration) -> Self {
        Ttl::Interval(interval)
    }
}

impl From<StdDuration> for Ttl {
    fn from(duration: StdDuration) -> Self {
        Ttl::Seconds(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_used_as_is() {
        assert_eq!(Ttl::Seconds(90).as_seconds(), 90);
        assert_eq!(Ttl::Seconds(-5).as_seconds(), -5);
    }

    #[test]
    fn test_interval_converted_to_seconds() {
        let ttl = Ttl::from(Duration::minutes(2) + Duration::milliseconds(999));
        assert_eq!(ttl.as_seconds(), 120);
    }

    #[test]
    fn test_std_duration_conversion() {
        assert_eq!(Ttl::from(StdDuration::from_millis(2500)).as_seconds(), 2);
    }

    #[test]
    fn test_u64_saturates() {
        assert_eq!(Ttl::from(u64::MAX).as_seconds(), i64::MAX);
    }
}
