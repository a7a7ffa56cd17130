//! Core addressing types for girder analysis: segment, girder, and span keys,
//! point-of-interest identifiers, and length-tolerance helpers.

/// Stable identifiers for stored points of interest.
pub mod ids;
/// Group, girder, segment, and span keys with wildcard sentinels.
pub mod keys;
/// Length comparisons under a tolerance.
pub mod tolerance;

pub use ids::PoiId;
pub use keys::{
	ALL_GIRDERS, ALL_GROUPS, ALL_SEGMENTS, ALL_SPANS, GirderIndex, GirderKey, GroupIndex, IntervalIndex, PierIndex,
	SegmentIndex, SegmentKey, SpanIndex, SpanKey,
};
pub use tolerance::{DEFAULT_TOLERANCE, ROUNDING_SLACK, is_equal, is_zero};
