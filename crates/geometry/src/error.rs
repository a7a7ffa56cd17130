use girderline_primitives::{GirderKey, GroupIndex, PierIndex, SegmentKey, SpanIndex};

/// Failure to obtain a geometric quantity from the bridge description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
	/// A required offset or length is not available from the provider.
	#[error("geometry not resolved: {what} for {key}")]
	NotResolved { what: &'static str, key: String },
	#[error("group {0} is out of range")]
	GroupOutOfRange(GroupIndex),
	#[error("{0} is out of range")]
	GirderOutOfRange(GirderKey),
	#[error("{0} is out of range")]
	SegmentOutOfRange(SegmentKey),
	#[error("span {0} is out of range")]
	SpanOutOfRange(SpanIndex),
	#[error("pier {0} is out of range")]
	PierOutOfRange(PierIndex),
	/// Wildcard keys address sets of segments, never a single location.
	#[error("wildcard key {0} does not name a location")]
	WildcardKey(SegmentKey),
}

impl GeometryError {
	pub fn not_resolved(what: &'static str, key: impl ToString) -> Self {
		Self::NotResolved { what, key: key.to_string() }
	}
}

pub type Result<T> = std::result::Result<T, GeometryError>;
