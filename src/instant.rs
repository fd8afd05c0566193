//! Absolute calendar instants with nanosecond precision.
//!
//! An [`Instant`] is a point on a single fixed timeline with no time zone and
//! no daylight-saving adjustments. Construction accepts raw calendar
//! components in any range and carry-normalizes them (minute 60 rolls into the
//! next hour, month 13 into the next year, and so on), so every instant that
//! exists exposes components in canonical range.

use std::fmt::Display;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

const OUT_OF_RANGE: &str = "normalized instant exceeds the representable date range";

/// An absolute point in time on a fixed, DST-free timeline.
///
/// Ordering and equality are defined solely by the absolute offset, never by
/// the raw constructor arguments: `Instant::new(2024, 2, 5, 19, 60, 0, 0)` and
/// `Instant::new(2024, 2, 5, 20, 0, 0, 0)` are equal.
///
/// `Instant` is immutable and `Copy`; sharing is always safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(NaiveDateTime);

impl Instant {
    /// Builds an instant from raw calendar components, carry-normalizing any
    /// out-of-range value against the fixed timeline.
    ///
    /// The month is folded into the year first; day, hour, minute, second and
    /// nanosecond are then applied as signed offsets from the first of that
    /// month, so negative components and overflows both roll correctly
    /// (`day = 0` is the last day of the previous month).
    ///
    /// # Panics
    ///
    /// Panics if the normalized instant falls outside the representable date
    /// range (roughly ±262,000 years).
    pub fn new(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        nanosecond: i32,
    ) -> Self {
        let months = i64::from(year) * 12 + i64::from(month) - 1;
        let year = i32::try_from(months.div_euclid(12)).expect(OUT_OF_RANGE);
        let month = (months.rem_euclid(12) + 1) as u32;

        let date = NaiveDate::from_ymd_opt(year, month, 1).expect(OUT_OF_RANGE);
        let mut t = NaiveDateTime::new(date, NaiveTime::MIN);
        t = shift(t, TimeDelta::try_days(i64::from(day) - 1));
        t = shift(t, TimeDelta::try_hours(i64::from(hour)));
        t = shift(t, TimeDelta::try_minutes(i64::from(minute)));
        t = shift(t, TimeDelta::try_seconds(i64::from(second)));
        t = shift(t, Some(TimeDelta::nanoseconds(i64::from(nanosecond))));
        Self(t)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, `1..=12`.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Hour of the day, `0..=23`.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.0.nanosecond()
    }

    /// Returns true if `self` is strictly earlier than `other`.
    pub fn is_before(&self, other: Instant) -> bool {
        self.0 < other.0
    }

    /// Returns true if `self` is strictly later than `other`.
    pub fn is_after(&self, other: Instant) -> bool {
        self.0 > other.0
    }

    /// Absolute magnitude of the difference between two instants.
    ///
    /// Symmetric in its arguments: `a.diff(b) == b.diff(a)`; zero if and only
    /// if the instants are equal.
    pub fn diff(&self, other: Instant) -> TimeDelta {
        (self.0 - other.0).abs()
    }

    /// Folds a sequence of instants down to the earliest one.
    ///
    /// Returns `None` on empty input.
    pub fn earliest<I>(instants: I) -> Option<Instant>
    where
        I: IntoIterator<Item = Instant>,
    {
        let mut iter = instants.into_iter();
        let mut ret = iter.next()?;
        for candidate in iter {
            if candidate.is_before(ret) {
                ret = candidate;
            }
        }
        Some(ret)
    }

    /// Folds a sequence of instants down to the latest one.
    ///
    /// Returns `None` on empty input.
    pub fn latest<I>(instants: I) -> Option<Instant>
    where
        I: IntoIterator<Item = Instant>,
    {
        let mut iter = instants.into_iter();
        let mut ret = iter.next()?;
        for candidate in iter {
            if candidate.is_after(ret) {
                ret = candidate;
            }
        }
        Some(ret)
    }
}

fn shift(t: NaiveDateTime, delta: Option<TimeDelta>) -> NaiveDateTime {
    delta
        .and_then(|d| t.checked_add_signed(d))
        .expect(OUT_OF_RANGE)
}

impl Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S%.9f"))
    }
}

// =============================================================================
// Instant Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Instant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Instant", 7)?;
        s.serialize_field("year", &self.year())?;
        s.serialize_field("month", &(self.month() as i32))?;
        s.serialize_field("day", &(self.day() as i32))?;
        s.serialize_field("hour", &(self.hour() as i32))?;
        s.serialize_field("minute", &(self.minute() as i32))?;
        s.serialize_field("second", &(self.second() as i32))?;
        s.serialize_field("nanosecond", &(self.nanosecond() as i32))?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            year: i32,
            month: i32,
            day: i32,
            hour: i32,
            minute: i32,
            second: i32,
            nanosecond: i32,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::new(
            raw.year,
            raw.month,
            raw.day,
            raw.hour,
            raw.minute,
            raw.second,
            raw.nanosecond,
        ))
    }
}
