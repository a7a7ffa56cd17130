//! Keys addressing groups, girders, segments, and spans.
//!
//! A stored point of interest always names one concrete segment. Query keys
//! may replace any level with its `ALL_*` sentinel to mean "every index at
//! this level"; [`SegmentKey::matches`] implements that expansion.

use std::fmt;

use serde::{Deserialize, Serialize};

pub type GroupIndex = u32;
pub type GirderIndex = u32;
pub type SegmentIndex = u32;
pub type SpanIndex = u32;
pub type PierIndex = u32;
/// Index of a construction-timeline interval supplied by an external scheduler.
pub type IntervalIndex = u32;

pub const ALL_GROUPS: GroupIndex = GroupIndex::MAX;
pub const ALL_GIRDERS: GirderIndex = GirderIndex::MAX;
pub const ALL_SEGMENTS: SegmentIndex = SegmentIndex::MAX;
pub const ALL_SPANS: SpanIndex = SpanIndex::MAX;

/// Identifies one girder line within one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GirderKey {
	pub group: GroupIndex,
	pub girder: GirderIndex,
}

impl GirderKey {
	pub const fn new(group: GroupIndex, girder: GirderIndex) -> Self {
		Self { group, girder }
	}

	/// Key of segment `segment` within this girder.
	pub const fn segment(self, segment: SegmentIndex) -> SegmentKey {
		SegmentKey::new(self.group, self.girder, segment)
	}

	/// Query key covering every segment of this girder.
	pub const fn all_segments(self) -> SegmentKey {
		self.segment(ALL_SEGMENTS)
	}

	pub const fn is_wildcard(self) -> bool {
		self.group == ALL_GROUPS || self.girder == ALL_GIRDERS
	}
}

impl fmt::Display for GirderKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "group {} girder {}", Level(self.group), Level(self.girder))
	}
}

/// Identifies exactly one precast segment, ordered by group, girder, then segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentKey {
	pub group: GroupIndex,
	pub girder: GirderIndex,
	pub segment: SegmentIndex,
}

impl SegmentKey {
	pub const fn new(group: GroupIndex, girder: GirderIndex, segment: SegmentIndex) -> Self {
		Self { group, girder, segment }
	}

	pub const fn girder_key(self) -> GirderKey {
		GirderKey::new(self.group, self.girder)
	}

	/// Returns true when any level holds its `ALL_*` sentinel.
	pub const fn is_wildcard(self) -> bool {
		self.group == ALL_GROUPS || self.girder == ALL_GIRDERS || self.segment == ALL_SEGMENTS
	}

	/// Returns true when the concrete key `other` is covered by this (possibly wildcard) key.
	pub const fn matches(self, other: SegmentKey) -> bool {
		(self.group == ALL_GROUPS || self.group == other.group)
			&& (self.girder == ALL_GIRDERS || self.girder == other.girder)
			&& (self.segment == ALL_SEGMENTS || self.segment == other.segment)
	}
}

impl From<GirderKey> for SegmentKey {
	fn from(key: GirderKey) -> Self {
		key.all_segments()
	}
}

impl fmt::Display for SegmentKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"group {} girder {} segment {}",
			Level(self.group),
			Level(self.girder),
			Level(self.segment)
		)
	}
}

/// Identifies the portion of one girder line that lies in one span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpanKey {
	pub span: SpanIndex,
	pub girder: GirderIndex,
}

impl SpanKey {
	pub const fn new(span: SpanIndex, girder: GirderIndex) -> Self {
		Self { span, girder }
	}

	pub const fn is_wildcard(self) -> bool {
		self.span == ALL_SPANS || self.girder == ALL_GIRDERS
	}
}

impl fmt::Display for SpanKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "span {} girder {}", Level(self.span), Level(self.girder))
	}
}

/// Renders an index level, showing the wildcard sentinel as `*`.
struct Level(u32);

impl fmt::Display for Level {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0 == u32::MAX { f.write_str("*") } else { write!(f, "{}", self.0) }
	}
}
