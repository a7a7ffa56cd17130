use girderline_geometry::{GeometryError, Result, SpanPoint};
use girderline_layout::{BeamShape, Duct, GirderDetails, IntervalSchedule, SectionChange, SegmentEnd, SupportPair};
use girderline_primitives::{GirderKey, IntervalIndex, SegmentKey, SpanKey};

use crate::{BridgeModel, HandlingModel, SegmentEndModel, SegmentModel};

impl SegmentModel {
	fn at(&self, end: SegmentEnd) -> &SegmentEndModel {
		match end {
			SegmentEnd::Start => &self.start,
			SegmentEnd::End => &self.end,
		}
	}
}

fn support_pair(handling: Option<HandlingModel>) -> Option<SupportPair> {
	handling.map(|HandlingModel { left, right }| SupportPair { left, right })
}

impl GirderDetails for BridgeModel {
	fn harp_points(&self, segment: SegmentKey) -> Result<Vec<f64>> {
		Ok(self.segment(segment)?.harp_points.clone())
	}

	fn transfer_length(&self, segment: SegmentKey) -> Result<Option<f64>> {
		Ok(self.segment(segment)?.transfer_length)
	}

	fn development_length(&self, segment: SegmentKey) -> Result<Option<f64>> {
		Ok(self.segment(segment)?.development_length)
	}

	fn debond_points(&self, segment: SegmentKey) -> Result<Vec<f64>> {
		Ok(self.segment(segment)?.debonds.clone())
	}

	fn diaphragms(&self, segment: SegmentKey) -> Result<Vec<f64>> {
		Ok(self.segment(segment)?.diaphragms.clone())
	}

	fn stirrup_zone_boundaries(&self, segment: SegmentKey) -> Result<Vec<f64>> {
		Ok(self.segment(segment)?.stirrup_zones.clone())
	}

	fn support_width(&self, segment: SegmentKey, end: SegmentEnd) -> Result<f64> {
		Ok(self.segment(segment)?.at(end).support_width)
	}

	fn girder_height(&self, segment: SegmentKey) -> Result<f64> {
		self.segment(segment)?
			.height
			.ok_or_else(|| GeometryError::not_resolved("girder height", segment))
	}

	fn is_cantilevered(&self, segment: SegmentKey, end: SegmentEnd) -> Result<bool> {
		Ok(self.segment(segment)?.at(end).cantilevered)
	}

	fn lifting_points(&self, segment: SegmentKey) -> Result<Option<SupportPair>> {
		Ok(support_pair(self.segment(segment)?.lifting))
	}

	fn storage_supports(&self, segment: SegmentKey) -> Result<Option<SupportPair>> {
		Ok(support_pair(self.segment(segment)?.storage))
	}

	fn hauling_supports(&self, segment: SegmentKey) -> Result<Option<SupportPair>> {
		Ok(support_pair(self.segment(segment)?.hauling))
	}

	fn bar_cutoffs(&self, segment: SegmentKey) -> Result<Vec<f64>> {
		Ok(self.segment(segment)?.bar_cutoffs.clone())
	}

	fn deck_bar_cutoffs(&self, girder: GirderKey) -> Result<Vec<f64>> {
		Ok(self.girder(girder)?.deck_bar_cutoffs.clone())
	}

	fn deck_casting_boundaries(&self, girder: GirderKey) -> Result<Vec<f64>> {
		Ok(self.girder(girder)?.deck_casting_boundaries.clone())
	}

	fn ducts(&self, girder: GirderKey) -> Result<Vec<Duct>> {
		Ok(self.girder(girder)?.ducts.iter().map(|duct| Duct { start: duct.start, end: duct.end }).collect())
	}

	fn point_loads(&self, girder: GirderKey) -> Result<Vec<SpanPoint>> {
		Ok(self
			.girder(girder)?
			.point_loads
			.iter()
			.map(|load| SpanPoint::new(SpanKey::new(load.span, girder.girder), load.distance))
			.collect())
	}
}

impl BeamShape for BridgeModel {
	fn section_changes(&self, segment: SegmentKey) -> Result<Vec<SectionChange>> {
		Ok(self
			.segment(segment)?
			.section_changes
			.iter()
			.map(|change| SectionChange {
				distance: change.distance,
				abrupt: change.abrupt,
			})
			.collect())
	}
}

/// Every segment follows the same schedule.
impl IntervalSchedule for BridgeModel {
	fn current_interval(&self) -> IntervalIndex {
		self.schedule.current
	}

	fn prestress_release_interval(&self, _segment: SegmentKey) -> Option<IntervalIndex> {
		self.schedule.release
	}

	fn lift_segment_interval(&self, _segment: SegmentKey) -> Option<IntervalIndex> {
		self.schedule.lift
	}

	fn storage_interval(&self, _segment: SegmentKey) -> Option<IntervalIndex> {
		self.schedule.storage
	}

	fn haul_segment_interval(&self, _segment: SegmentKey) -> Option<IntervalIndex> {
		self.schedule.haul
	}

	fn erect_segment_interval(&self, _segment: SegmentKey) -> Option<IntervalIndex> {
		self.schedule.erect
	}

	fn cast_deck_interval(&self) -> Option<IntervalIndex> {
		self.schedule.cast_deck
	}
}
