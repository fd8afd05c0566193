//! timeset - closed time spans over calendar instants, with set algebra.
//!
//! A library for representing absolute calendar instants ([`Instant`]) and
//! closed, non-negative-length time spans ([`Span`]), and for performing set
//! algebra over collections of spans ([`SpanSet`]): union via merging,
//! difference, containment and intersection tests, and canonicalization into
//! a minimal, disjoint, sorted form.
//!
//! All instants live on a single fixed timeline with no time zones and no
//! daylight-saving adjustments. `Instant` and `Span` are immutable `Copy`
//! values and freely shareable; `SpanSet` is the sole mutable type and
//! expects a single writer at a time.
//!
//! # Examples
//!
//! ```
//! use timeset::{Instant, Span, SpanSet};
//!
//! let t1 = Instant::new(2024, 2, 5, 19, 0, 0, 0);
//! let t2 = Instant::new(2024, 2, 5, 19, 30, 0, 0);
//! let t3 = Instant::new(2024, 2, 5, 20, 0, 0, 0);
//!
//! let mut set = SpanSet::new();
//! set.add(Span::new(t1, t2)?);
//! set.add(Span::new(t2, t3)?);
//!
//! // Touching spans collapse into one.
//! set.cleanup(true);
//! assert_eq!(set.len(), 1);
//! assert_eq!(set[0], Span::new(t1, t3)?);
//! # Ok::<(), timeset::SpanError>(())
//! ```

pub mod instant;
pub mod span;
pub mod span_set;

pub use instant::Instant;
pub use span::{Span, SpanError};
pub use span_set::SpanSet;

// Re-export the duration type used throughout the public API.
pub use chrono::TimeDelta;
