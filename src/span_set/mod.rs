//! A mutable collection of spans with on-demand canonicalization.
//!
//! [`SpanSet`] wraps a `Vec<Span>` and, unlike a container that keeps itself
//! normalized, accepts duplicates, overlaps, and zero-duration spans freely;
//! [`cleanup`](SpanSet::cleanup) reduces the collection to its canonical form
//! — minimal, sorted, pairwise non-mergeable — in place.
//!
//! Read access is transparent via `Deref<Target = [Span]>`, so code that
//! consumes `&[Span]` works without changes. `SpanSet` is the only mutable
//! type in the crate; confine a set to one owner at a time, or guard mutation
//! with an external lock.

use std::fmt::Display;
use std::ops::{Deref, Index};

use chrono::TimeDelta;

use crate::span::Span;


/// An ordered collection of [`Span`]s.
///
/// Between cleanups the backing collection carries no invariant at all, and
/// [`duration`](SpanSet::duration) is a naive sum that only means "total
/// covered time" once [`cleanup`](SpanSet::cleanup) has established
/// disjointness.
///
/// # Performance
///
/// - `add` / `merge_all`: O(1) amortized per span appended.
/// - `cleanup`: O(n log n) sort + O(n) merge pass.
/// - Read access: O(1) via `Deref`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanSet(Vec<Span>);

// ─────────────────────────────────────────────────────────────────────
// Constructors
// ─────────────────────────────────────────────────────────────────────

impl SpanSet {
    /// Creates an empty span set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates an empty span set with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Mutation methods
// ─────────────────────────────────────────────────────────────────────

impl SpanSet {
    /// Appends a span without validation or deduplication.
    pub fn add(&mut self, span: Span) {
        self.0.push(span);
    }

    /// Appends all spans from a slice without canonicalization.
    pub fn extend_from_slice(&mut self, spans: &[Span]) {
        self.0.extend_from_slice(spans);
    }

    /// Concatenates every element of each given set into `self`.
    ///
    /// Performs no canonicalization; call [`cleanup`](SpanSet::cleanup) to
    /// collapse the result.
    pub fn merge_all<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a SpanSet>,
    {
        for set in others {
            self.0.extend_from_slice(&set.0);
        }
    }

    /// Reduces the collection to its canonical form, in place.
    ///
    /// Two ordered phases: if `remove_zero_duration` is set, every
    /// zero-duration span is dropped first; then all mergeable pairs —
    /// overlapping or merely touching — are collapsed until none remain, and
    /// the result is sorted ascending by `(start, end)`.
    ///
    /// The outcome is a fixpoint: a maximal disjoint, pairwise non-mergeable
    /// set that depends only on the covered extent, not on insertion order.
    /// Cleanup is idempotent.
    pub fn cleanup(&mut self, remove_zero_duration: bool) {
        if remove_zero_duration {
            self.0.retain(|span| !span.is_zero_duration());
        }
        if self.0.len() <= 1 {
            return;
        }

        self.0
            .sort_by(|a, b| a.start().cmp(&b.start()).then(a.end().cmp(&b.end())));

        // Single left-to-right pass. Once sorted, a span can only merge with
        // the run currently being built: every later span starts at or after
        // this one, so a run that ends before the next span's start is final.
        let mut merged: Vec<Span> = Vec::with_capacity(self.0.len());
        for span in self.0.drain(..) {
            if let Some(last) = merged.last_mut() {
                if last.mergeable(&span) {
                    if span.end().is_after(last.end()) {
                        *last = Span::new_unchecked(last.start(), span.end());
                    }
                    continue;
                }
            }
            merged.push(span);
        }
        self.0 = merged;
    }

    /// Removes all spans.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Consumes the set and returns the underlying `Vec`.
    pub fn into_inner(self) -> Vec<Span> {
        self.0
    }

    /// Returns a slice of the spans.
    pub fn as_slice(&self) -> &[Span] {
        &self.0
    }
}

// ─────────────────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────────────────

impl SpanSet {
    /// Naive sum of the durations of all current elements.
    ///
    /// Overlapping elements are counted as many times as they appear; run
    /// [`cleanup`](SpanSet::cleanup) first to obtain total covered time.
    pub fn duration(&self) -> TimeDelta {
        self.0
            .iter()
            .fold(TimeDelta::zero(), |acc, span| acc + span.duration())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Transparent read access
// ─────────────────────────────────────────────────────────────────────

impl Deref for SpanSet {
    type Target = [Span];

    fn deref(&self) -> &[Span] {
        &self.0
    }
}

impl AsRef<[Span]> for SpanSet {
    fn as_ref(&self) -> &[Span] {
        &self.0
    }
}

impl Index<usize> for SpanSet {
    type Output = Span;

    fn index(&self, index: usize) -> &Span {
        &self.0[index]
    }
}

// ─────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────

impl From<Vec<Span>> for SpanSet {
    /// Wraps a `Vec` as-is; no canonicalization until `cleanup`.
    fn from(vec: Vec<Span>) -> Self {
        Self(vec)
    }
}

impl From<Span> for SpanSet {
    fn from(span: Span) -> Self {
        Self(vec![span])
    }
}

impl FromIterator<Span> for SpanSet {
    fn from_iter<I: IntoIterator<Item = Span>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Span> for SpanSet {
    fn extend<I: IntoIterator<Item = Span>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

// ─────────────────────────────────────────────────────────────────────
// Iterators
// ─────────────────────────────────────────────────────────────────────

impl IntoIterator for SpanSet {
    type Item = Span;
    type IntoIter = std::vec::IntoIter<Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SpanSet {
    type Item = &'a Span;
    type IntoIter = std::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Trait impls
// ─────────────────────────────────────────────────────────────────────

impl Default for SpanSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SpanSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, span) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", span)?;
        }
        write!(f, "}}")
    }
}

/// Enables `assert_eq!(span_set, vec![...])` in tests.
impl PartialEq<Vec<Span>> for SpanSet {
    fn eq(&self, other: &Vec<Span>) -> bool {
        self.0 == *other
    }
}

/// Enables `assert_eq!(vec![...], span_set)` in tests.
impl PartialEq<SpanSet> for Vec<Span> {
    fn eq(&self, other: &SpanSet) -> bool {
        *self == other.0
    }
}

// ─────────────────────────────────────────────────────────────────────
// Serde support
// ─────────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl serde::Serialize for SpanSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SpanSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vec = Vec::<Span>::deserialize(deserializer)?;
        Ok(Self(vec))
    }
}
