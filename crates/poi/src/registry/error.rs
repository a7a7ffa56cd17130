use girderline_primitives::{PoiId, SegmentKey};

/// Errors raised when inserting into a [`PoiRegistry`](super::PoiRegistry).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
	/// Stored points must name one concrete segment.
	#[error("point of interest on wildcard key {0} cannot be stored")]
	WildcardKey(SegmentKey),
	#[error("point of interest on {segment} has a non-finite distance")]
	NonFiniteDistance { segment: SegmentKey },
	/// The supplied id is already stored at a different place.
	#[error("point of interest {id} is already stored on {segment}")]
	DuplicateId { id: PoiId, segment: SegmentKey },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
