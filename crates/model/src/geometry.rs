use girderline_geometry::{BridgeGeometry, GeometryError, Result};
use girderline_primitives::{GirderIndex, GirderKey, GroupIndex, PierIndex, SegmentIndex, SegmentKey, SpanIndex};

use crate::{BridgeModel, GirderModel, GroupModel, SegmentModel};

impl BridgeModel {
	pub(crate) fn group(&self, group: GroupIndex) -> Result<&GroupModel> {
		self.groups.get(group as usize).ok_or(GeometryError::GroupOutOfRange(group))
	}

	pub(crate) fn girder(&self, girder: GirderKey) -> Result<&GirderModel> {
		self.group(girder.group)?
			.girders
			.get(girder.girder as usize)
			.ok_or(GeometryError::GirderOutOfRange(girder))
	}

	pub(crate) fn segment(&self, segment: SegmentKey) -> Result<&SegmentModel> {
		self.girder(segment.girder_key())?
			.segments
			.get(segment.segment as usize)
			.ok_or(GeometryError::SegmentOutOfRange(segment))
	}
}

impl BridgeGeometry for BridgeModel {
	fn group_count(&self) -> GroupIndex {
		self.groups.len() as GroupIndex
	}

	fn girder_count(&self, group: GroupIndex) -> Result<GirderIndex> {
		Ok(self.group(group)?.girders.len() as GirderIndex)
	}

	fn segment_count(&self, girder: GirderKey) -> Result<SegmentIndex> {
		Ok(self.girder(girder)?.segments.len() as SegmentIndex)
	}

	fn span_count(&self) -> SpanIndex {
		self.pier_stations.len().saturating_sub(1) as SpanIndex
	}

	fn group_piers(&self, group: GroupIndex) -> Result<(PierIndex, PierIndex)> {
		let model = self.group(group)?;
		Ok((model.first_pier, model.last_pier))
	}

	fn segment_length(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.segment(segment)?.length)
	}

	fn segment_layout_length(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.segment(segment)?.layout_length())
	}

	fn segment_start_end_distance(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.segment(segment)?.start.end_distance)
	}

	fn segment_end_end_distance(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.segment(segment)?.end.end_distance)
	}

	fn segment_start_bearing_offset(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.segment(segment)?.start.bearing_offset)
	}

	fn segment_end_bearing_offset(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.segment(segment)?.end.bearing_offset)
	}

	fn pier_location(&self, girder: GirderKey, pier: PierIndex) -> Result<f64> {
		let group = self.group(girder.group)?;
		self.girder(girder)?;
		if !(group.first_pier..=group.last_pier).contains(&pier) {
			return Err(GeometryError::PierOutOfRange(pier));
		}
		Ok(self.pier_station(pier)? - self.pier_station(group.first_pier)?)
	}

	fn pier_station(&self, pier: PierIndex) -> Result<f64> {
		self.pier_stations.get(pier as usize).copied().ok_or(GeometryError::PierOutOfRange(pier))
	}

	fn temporary_supports(&self, girder: GirderKey) -> Result<Vec<f64>> {
		Ok(self.girder(girder)?.temporary_supports.clone())
	}

	fn generation(&self) -> u64 {
		self.generation
	}
}
