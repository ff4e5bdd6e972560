//! Accumulated stay time at minute granularity.
//!
//! The store keeps stay time in an `INTERVAL` column and exchanges it as
//! text of the form `"<N> minutes"`. The two directions round differently:
//!
//! - writing ([`StayTime::to_interval`]) rounds *up* to the next whole minute,
//! - reading ([`StayTime::from_interval`]) only reads whole minutes, so any
//!   fraction is truncated.
//!
//! A 30 second stay is therefore stored as one minute and read back as one
//! minute, while the caller measured half of that. The asymmetry is kept
//! as-is; callers that need exact accounting must round before adding.

use chrono::Duration;
use std::fmt;

const NANOS_PER_MINUTE: i64 = 60 * 1_000_000_000;
const SECONDS_PER_MINUTE: i64 = 60;

/// Total time a user has spent inside, as read back from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StayTime(Duration);

impl StayTime {
    /// No time spent.
    pub const ZERO: Self = Self(Duration::zero());

    /// Wraps a measured duration without rounding.
    pub fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    /// Creates a stay time of exactly `minutes` whole minutes.
    ///
    /// Values beyond what a `Duration` can hold collapse to zero.
    pub fn from_minutes(minutes: i64) -> Self {
        Self(Duration::try_minutes(minutes).unwrap_or_else(Duration::zero))
    }

    /// Returns the inner duration.
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Whole minutes, truncated toward zero.
    pub fn whole_minutes(&self) -> i64 {
        self.0.num_minutes()
    }

    /// Sum of two stay times, or `None` if it exceeds what a `Duration` holds.
    pub fn checked_add(&self, other: &StayTime) -> Option<StayTime> {
        self.0.checked_add(&other.0).map(Self)
    }

    /// Renders the interval text written to the store, rounding up.
    pub fn to_interval(&self) -> String {
        format!("{} minutes", ceil_minutes(self.0))
    }

    /// Parses interval text read from the store.
    ///
    /// Only the first space-separated token is read, as an integer number of
    /// minutes. `NULL` and anything unparseable read as zero.
    pub fn from_interval(interval: Option<&str>) -> Self {
        let Some(text) = interval else {
            return Self::ZERO;
        };

        let first = text.split(' ').next().unwrap_or_default();
        match first.parse::<i64>() {
            Ok(minutes) => Self::from_minutes(minutes),
            Err(_) => Self::ZERO,
        }
    }
}

impl Default for StayTime {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for StayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.whole_minutes())
    }
}

fn ceil_minutes(duration: Duration) -> i64 {
    match duration.num_nanoseconds() {
        Some(nanos) => div_ceil(nanos, NANOS_PER_MINUTE),
        // Nanoseconds overflow past ~292 years.
        None => div_ceil(duration.num_seconds(), SECONDS_PER_MINUTE),
    }
}

fn div_ceil(value: i64, divisor: i64) -> i64 {
    let quotient = value.div_euclid(divisor);
    if value.rem_euclid(divisor) == 0 {
        quotient
    } else {
        quotient + 1
    }
}
