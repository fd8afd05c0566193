//! Closed, non-negative-length time spans.
//!
//! A [`Span`] is the closed interval `[start, end]` over two [`Instant`]s.
//! It owns the relational predicates ([`has`](Span::has),
//! [`covers`](Span::covers), [`intersects`](Span::intersects),
//! [`mergeable`](Span::mergeable)) and the [`merge`](Span::merge) /
//! [`subtract`](Span::subtract) operations that [`SpanSet`] builds on.

use std::fmt::Display;

use chrono::TimeDelta;
use thiserror::Error;

use crate::instant::Instant;
use crate::span_set::SpanSet;

/// Contract violations raised by span construction and merging.
///
/// These are programmer errors surfaced at the point of violation; no
/// operation coerces its way past them (no bound swapping, no clamping).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SpanError {
    /// Span construction with `end` strictly before `start`.
    #[error("span end {end} is before start {start}")]
    InvalidRange { start: Instant, end: Instant },

    /// `merge` on a pair with no overlap and no shared boundary.
    #[error("spans {a} and {b} neither overlap nor touch")]
    NotMergeable { a: Span, b: Span },
}

/// Closed interval `[start, end]` with `start <= end`.
///
/// Zero-duration spans (`start == end`) are valid. `Span` is immutable and
/// `Copy`; sharing is always safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: Instant,
    end: Instant,
}

impl Span {
    /// Creates the span `[start, end]`.
    ///
    /// Fails with [`SpanError::InvalidRange`] when `end` is strictly before
    /// `start`.
    pub fn new(start: Instant, end: Instant) -> Result<Self, SpanError> {
        if end.is_before(start) {
            return Err(SpanError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Wraps bounds that are already known to be ordered.
    ///
    /// In debug builds this asserts `start <= end`; in release builds the
    /// check is elided.
    pub(crate) fn new_unchecked(start: Instant, end: Instant) -> Self {
        debug_assert!(
            !end.is_before(start),
            "Span::new_unchecked called with end before start"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn end(&self) -> Instant {
        self.end
    }

    /// Length of the span; non-negative by construction.
    pub fn duration(&self) -> TimeDelta {
        self.start.diff(self.end)
    }

    pub fn is_zero_duration(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `point` ∈ `[start, end]`, both endpoints included.
    pub fn has(&self, point: Instant) -> bool {
        !point.is_before(self.start) && !point.is_after(self.end)
    }

    /// Returns true if `self` fully contains `other`, equal bounds included.
    ///
    /// Every span covers itself.
    pub fn covers(&self, other: &Span) -> bool {
        !self.start.is_after(other.start) && !self.end.is_before(other.end)
    }

    /// Returns true if the overlap of `self` and `other` has strictly
    /// positive measure.
    ///
    /// Two spans that only share a boundary point do **not** intersect; see
    /// [`mergeable`](Span::mergeable) for the inclusive variant.
    pub fn intersects(&self, other: &Span) -> bool {
        self.start.is_before(other.end) && self.end.is_after(other.start)
    }

    /// Returns true if the union of `self` and `other` is one contiguous
    /// span.
    ///
    /// Strictly weaker than [`intersects`](Span::intersects): spans touching
    /// at a single boundary point are mergeable though not intersecting.
    pub fn mergeable(&self, other: &Span) -> bool {
        !(self.start.is_after(other.end) || self.end.is_before(other.start))
    }

    /// Returns `[min(starts), max(ends)]`.
    ///
    /// Fails with [`SpanError::NotMergeable`] when the spans neither overlap
    /// nor touch. Order-independent: `a.merge(b) == b.merge(a)`.
    pub fn merge(&self, other: &Span) -> Result<Span, SpanError> {
        if !self.mergeable(other) {
            return Err(SpanError::NotMergeable {
                a: *self,
                b: *other,
            });
        }
        Ok(Self::new_unchecked(
            self.start.min(other.start),
            self.end.max(other.end),
        ))
    }

    /// Removes `other` from `self`, producing zero, one, or two disjoint
    /// closed remnants.
    ///
    /// When `other` has zero duration or does not intersect `self`, the
    /// result is `{self}` unchanged — including a zero-duration cutter lying
    /// exactly at `self.start`, which removes nothing. When `other` covers
    /// `self`, the result is empty. Remnants reuse `other`'s bounds as their
    /// own: spans are closed and a single shared point carries zero measure,
    /// so no gap or double-count results.
    pub fn subtract(&self, other: &Span) -> SpanSet {
        let mut ret = SpanSet::new();

        if other.is_zero_duration() || !self.intersects(other) {
            ret.add(*self);
            return ret;
        }

        if self.start.is_before(other.start) {
            ret.add(Self::new_unchecked(self.start, other.start));
        }
        if self.end.is_after(other.end) {
            ret.add(Self::new_unchecked(other.end, self.end));
        }

        ret
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

// =============================================================================
// Span Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Span {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Span", 2)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Span {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            start: Instant,
            end: Instant,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minute-spaced points on 2024-02-05, 19:00 + `minute`.
    fn t(minute: i32) -> Instant {
        Instant::new(2024, 2, 5, 19, minute, 0, 0)
    }

    fn sp(start_minute: i32, end_minute: i32) -> Span {
        Span::new(t(start_minute), t(end_minute)).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let err = Span::new(t(1), t(0)).unwrap_err();
        assert_eq!(
            err,
            SpanError::InvalidRange {
                start: t(1),
                end: t(0)
            }
        );
    }

    #[test]
    fn test_zero_duration_is_valid() {
        let span = sp(1, 1);
        assert_eq!(span.duration(), TimeDelta::zero());
        assert!(span.is_zero_duration());

        let span = sp(1, 2);
        assert_eq!(span.duration(), TimeDelta::minutes(1));
        assert!(!span.is_zero_duration());
    }

    #[test]
    fn test_accessors() {
        let span = sp(1, 3);
        assert_eq!(span.start(), t(1));
        assert_eq!(span.end(), t(3));
    }

    #[test]
    fn test_has_includes_both_endpoints() {
        let span = sp(2, 4);
        assert!(!span.has(t(1)));
        assert!(span.has(t(2)));
        assert!(span.has(t(3)));
        assert!(span.has(t(4)));
        assert!(!span.has(t(5)));
    }

    #[test]
    fn test_covers() {
        let span = sp(1, 4);
        // Reflexive: every span covers itself.
        assert!(span.covers(&span));
        assert!(span.covers(&sp(1, 3)));
        assert!(span.covers(&sp(2, 4)));
        assert!(span.covers(&sp(2, 3)));
        assert!(span.covers(&sp(2, 2)));
        // Exceeding either bound breaks coverage.
        assert!(!span.covers(&sp(0, 4)));
        assert!(!span.covers(&sp(1, 5)));
        assert!(!sp(2, 3).covers(&span));
    }

    #[test]
    fn test_intersects_excludes_touching() {
        assert!(sp(1, 3).intersects(&sp(2, 4)));
        assert!(sp(2, 4).intersects(&sp(1, 3)));
        assert!(sp(1, 4).intersects(&sp(2, 3)));
        // Sharing exactly one boundary point is not an intersection.
        assert!(!sp(1, 2).intersects(&sp(2, 3)));
        assert!(!sp(2, 3).intersects(&sp(1, 2)));
        assert!(!sp(1, 2).intersects(&sp(3, 4)));
    }

    #[test]
    fn test_mergeable_includes_touching() {
        assert!(sp(1, 3).mergeable(&sp(2, 4)));
        assert!(sp(1, 2).mergeable(&sp(2, 3)));
        assert!(sp(2, 3).mergeable(&sp(1, 2)));
        assert!(!sp(1, 2).mergeable(&sp(3, 4)));
        assert!(!sp(3, 4).mergeable(&sp(1, 2)));
    }

    #[test]
    fn test_merge() {
        let merged = sp(1, 2).merge(&sp(2, 3)).unwrap();
        assert_eq!(merged, sp(1, 3));

        // Order-independent.
        assert_eq!(sp(2, 3).merge(&sp(1, 2)).unwrap(), sp(1, 3));
        assert_eq!(sp(1, 3).merge(&sp(2, 4)).unwrap(), sp(1, 4));
        assert_eq!(sp(1, 4).merge(&sp(2, 3)).unwrap(), sp(1, 4));
    }

    #[test]
    fn test_merge_disjoint_fails() {
        let err = sp(1, 2).merge(&sp(3, 4)).unwrap_err();
        assert_eq!(
            err,
            SpanError::NotMergeable {
                a: sp(1, 2),
                b: sp(3, 4)
            }
        );
    }

    #[test]
    fn test_subtract_disjoint_cutter_is_identity() {
        let result = sp(3, 6).subtract(&sp(1, 1));
        assert_eq!(result, vec![sp(3, 6)]);

        let result = sp(3, 6).subtract(&sp(1, 2));
        assert_eq!(result, vec![sp(3, 6)]);
    }

    #[test]
    fn test_subtract_left_trim() {
        let result = sp(3, 6).subtract(&sp(2, 4));
        assert_eq!(result, vec![sp(4, 6)]);
    }

    #[test]
    fn test_subtract_right_trim() {
        let result = sp(3, 6).subtract(&sp(5, 7));
        assert_eq!(result, vec![sp(3, 5)]);
    }

    #[test]
    fn test_subtract_interior_split() {
        let result = sp(3, 6).subtract(&sp(4, 5));
        assert_eq!(result, vec![sp(3, 4), sp(5, 6)]);
    }

    #[test]
    fn test_subtract_fully_covered_is_empty() {
        let result = sp(3, 6).subtract(&sp(2, 6));
        assert!(result.is_empty());

        let result = sp(3, 6).subtract(&sp(3, 6));
        assert!(result.is_empty());
    }

    #[test]
    fn test_subtract_zero_duration_cutter_at_own_start() {
        // A zero-duration cutter never truncates, even sitting exactly on
        // the start bound.
        let result = sp(3, 6).subtract(&sp(3, 3));
        assert_eq!(result, vec![sp(3, 6)]);

        let result = sp(3, 6).subtract(&sp(4, 4));
        assert_eq!(result, vec![sp(3, 6)]);
    }

    #[test]
    fn test_display_format() {
        let s = format!("{}", sp(0, 1));
        assert_eq!(
            s,
            "[2024-02-05 19:00:00.000000000, 2024-02-05 19:01:00.000000000]"
        );
    }
}
