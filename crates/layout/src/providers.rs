//! Provider contracts consulted while laying out standard points.
//!
//! Every detail defaults to "not present", so a bridge description only
//! implements what it models. A detail that cannot be resolved returns a
//! [`GeometryError`]; the layout skips that category for the girder.

use girderline_geometry::{BridgeGeometry, GeometryError, SpanPoint};
use girderline_primitives::{GirderKey, IntervalIndex, SegmentKey};

type Result<T> = std::result::Result<T, GeometryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentEnd {
	Start,
	End,
}

/// Temporary supports under a segment during handling.
///
/// `left` is measured from the start face, `right` from the end face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportPair {
	pub left: f64,
	pub right: f64,
}

/// A location where the cross section changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionChange {
	/// Segment coordinate of the change.
	pub distance: f64,
	/// Abrupt changes get a point on each face; gradual ones a single transition point.
	pub abrupt: bool,
}

/// Extent of a post-tensioning duct in girder-path coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duct {
	pub start: f64,
	pub end: f64,
}

/// Girder details that produce standard points of interest.
///
/// Segment-level lengths are in segment coordinates; girder-level lengths
/// are in girder-path coordinates.
pub trait GirderDetails {
	/// Harping points; empty when the segment has no harped strands.
	fn harp_points(&self, _segment: SegmentKey) -> Result<Vec<f64>> {
		Ok(Vec::new())
	}

	fn transfer_length(&self, _segment: SegmentKey) -> Result<Option<f64>> {
		Ok(None)
	}

	fn development_length(&self, _segment: SegmentKey) -> Result<Option<f64>> {
		Ok(None)
	}

	/// Strand debond termination points.
	fn debond_points(&self, _segment: SegmentKey) -> Result<Vec<f64>> {
		Ok(Vec::new())
	}

	fn diaphragms(&self, _segment: SegmentKey) -> Result<Vec<f64>> {
		Ok(Vec::new())
	}

	/// Boundaries between stirrup zones.
	fn stirrup_zone_boundaries(&self, _segment: SegmentKey) -> Result<Vec<f64>> {
		Ok(Vec::new())
	}

	/// Width of the permanent bearing at one end of the segment.
	fn support_width(&self, _segment: SegmentKey, _end: SegmentEnd) -> Result<f64> {
		Ok(0.0)
	}

	fn girder_height(&self, segment: SegmentKey) -> Result<f64> {
		Err(GeometryError::not_resolved("girder height", segment))
	}

	/// Whether the segment overhangs its permanent bearing at `end`.
	fn is_cantilevered(&self, _segment: SegmentKey, _end: SegmentEnd) -> Result<bool> {
		Ok(false)
	}

	fn lifting_points(&self, _segment: SegmentKey) -> Result<Option<SupportPair>> {
		Ok(None)
	}

	fn storage_supports(&self, _segment: SegmentKey) -> Result<Option<SupportPair>> {
		Ok(None)
	}

	fn hauling_supports(&self, _segment: SegmentKey) -> Result<Option<SupportPair>> {
		Ok(None)
	}

	/// Longitudinal girder bar cutoffs.
	fn bar_cutoffs(&self, _segment: SegmentKey) -> Result<Vec<f64>> {
		Ok(Vec::new())
	}

	/// Negative-moment deck bar cutoffs over the girder.
	fn deck_bar_cutoffs(&self, _girder: GirderKey) -> Result<Vec<f64>> {
		Ok(Vec::new())
	}

	/// Boundaries between deck casting regions over the girder.
	fn deck_casting_boundaries(&self, _girder: GirderKey) -> Result<Vec<f64>> {
		Ok(Vec::new())
	}

	fn ducts(&self, _girder: GirderKey) -> Result<Vec<Duct>> {
		Ok(Vec::new())
	}

	/// Concentrated loads applied to the girder.
	fn point_loads(&self, _girder: GirderKey) -> Result<Vec<SpanPoint>> {
		Ok(Vec::new())
	}
}

/// Cross-section shape of the girder.
pub trait BeamShape {
	fn section_changes(&self, _segment: SegmentKey) -> Result<Vec<SectionChange>> {
		Ok(Vec::new())
	}
}

/// Construction schedule. `None` means the event never happens.
pub trait IntervalSchedule {
	/// Interval the analysis has reached.
	fn current_interval(&self) -> IntervalIndex;

	fn prestress_release_interval(&self, segment: SegmentKey) -> Option<IntervalIndex>;

	fn lift_segment_interval(&self, segment: SegmentKey) -> Option<IntervalIndex>;

	fn storage_interval(&self, segment: SegmentKey) -> Option<IntervalIndex>;

	fn haul_segment_interval(&self, segment: SegmentKey) -> Option<IntervalIndex>;

	fn erect_segment_interval(&self, segment: SegmentKey) -> Option<IntervalIndex>;

	fn cast_deck_interval(&self) -> Option<IntervalIndex>;
}

/// Everything the agent needs from a bridge description.
pub trait LayoutSource: BridgeGeometry + GirderDetails + BeamShape + IntervalSchedule + Send + Sync {}

impl<T> LayoutSource for T where T: BridgeGeometry + GirderDetails + BeamShape + IntervalSchedule + Send + Sync {}
