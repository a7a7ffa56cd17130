//! Straight-girder bridges for geometry tests.

use girderline_primitives::{GirderIndex, GirderKey, GroupIndex, PierIndex, SegmentIndex, SegmentKey, SpanIndex};

use crate::{BridgeGeometry, GeometryError, Result};

#[derive(Debug, Clone, Copy)]
pub(crate) struct SegmentSpec {
	pub length: f64,
	pub start_end_distance: f64,
	pub start_bearing_offset: f64,
	pub end_end_distance: f64,
	pub end_bearing_offset: f64,
}

impl SegmentSpec {
	pub fn new(length: f64) -> Self {
		Self {
			length,
			start_end_distance: 0.0,
			start_bearing_offset: 0.0,
			end_end_distance: 0.0,
			end_bearing_offset: 0.0,
		}
	}

	pub fn start(mut self, end_distance: f64, bearing_offset: f64) -> Self {
		self.start_end_distance = end_distance;
		self.start_bearing_offset = bearing_offset;
		self
	}

	pub fn end(mut self, end_distance: f64, bearing_offset: f64) -> Self {
		self.end_end_distance = end_distance;
		self.end_bearing_offset = bearing_offset;
		self
	}

	pub fn layout_length(&self) -> f64 {
		(self.start_bearing_offset - self.start_end_distance) + self.length + (self.end_bearing_offset - self.end_end_distance)
	}
}

#[derive(Debug, Clone)]
pub(crate) struct GroupSpec {
	pub first_pier: PierIndex,
	pub last_pier: PierIndex,
	pub girders: Vec<Vec<SegmentSpec>>,
}

/// Bridge whose girders run parallel to a straight alignment, so a pier's
/// girder-path location is its station offset from the group's first pier.
#[derive(Debug, Clone)]
pub(crate) struct FixtureBridge {
	pub pier_stations: Vec<f64>,
	pub groups: Vec<GroupSpec>,
}

impl FixtureBridge {
	fn group(&self, group: GroupIndex) -> Result<&GroupSpec> {
		self.groups.get(group as usize).ok_or(GeometryError::GroupOutOfRange(group))
	}

	fn segments(&self, girder: GirderKey) -> Result<&[SegmentSpec]> {
		self.group(girder.group)?
			.girders
			.get(girder.girder as usize)
			.map(Vec::as_slice)
			.ok_or(GeometryError::GirderOutOfRange(girder))
	}

	fn spec(&self, segment: SegmentKey) -> Result<&SegmentSpec> {
		self.segments(segment.girder_key())?
			.get(segment.segment as usize)
			.ok_or(GeometryError::SegmentOutOfRange(segment))
	}
}

impl BridgeGeometry for FixtureBridge {
	fn group_count(&self) -> GroupIndex {
		self.groups.len() as GroupIndex
	}

	fn girder_count(&self, group: GroupIndex) -> Result<GirderIndex> {
		Ok(self.group(group)?.girders.len() as GirderIndex)
	}

	fn segment_count(&self, girder: GirderKey) -> Result<SegmentIndex> {
		Ok(self.segments(girder)?.len() as SegmentIndex)
	}

	fn span_count(&self) -> SpanIndex {
		self.pier_stations.len().saturating_sub(1) as SpanIndex
	}

	fn group_piers(&self, group: GroupIndex) -> Result<(PierIndex, PierIndex)> {
		let spec = self.group(group)?;
		Ok((spec.first_pier, spec.last_pier))
	}

	fn segment_length(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.spec(segment)?.length)
	}

	fn segment_layout_length(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.spec(segment)?.layout_length())
	}

	fn segment_start_end_distance(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.spec(segment)?.start_end_distance)
	}

	fn segment_end_end_distance(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.spec(segment)?.end_end_distance)
	}

	fn segment_start_bearing_offset(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.spec(segment)?.start_bearing_offset)
	}

	fn segment_end_bearing_offset(&self, segment: SegmentKey) -> Result<f64> {
		Ok(self.spec(segment)?.end_bearing_offset)
	}

	fn pier_location(&self, girder: GirderKey, pier: PierIndex) -> Result<f64> {
		let group = self.group(girder.group)?;
		if !(group.first_pier..=group.last_pier).contains(&pier) {
			return Err(GeometryError::PierOutOfRange(pier));
		}
		Ok(self.pier_station(pier)? - self.pier_station(group.first_pier)?)
	}

	fn pier_station(&self, pier: PierIndex) -> Result<f64> {
		self.pier_stations.get(pier as usize).copied().ok_or(GeometryError::PierOutOfRange(pier))
	}
}

/// Two segments of 30 and 25 in one simple span, meeting face to face at a
/// temporary support; segment 0 has start end distance 0.5 and start bearing
/// offset 1.0.
pub(crate) fn two_segment_girder() -> FixtureBridge {
	let first = SegmentSpec::new(30.0).start(0.5, 1.0);
	let second = SegmentSpec::new(25.0).end(0.5, 1.0);
	let length = first.layout_length() + second.layout_length();
	FixtureBridge {
		pier_stations: vec![100.0, 100.0 + length],
		groups: vec![GroupSpec {
			first_pier: 0,
			last_pier: 1,
			girders: vec![vec![first, second]],
		}],
	}
}

/// One group continuous over pier 1 (station 40), spans ending at stations 0 and 90.
pub(crate) fn two_span_continuous() -> FixtureBridge {
	let first = SegmentSpec::new(39.65).start(0.3, 0.6).end(0.0, 0.05);
	let second = SegmentSpec::new(49.65).start(0.0, 0.05).end(0.3, 0.6);
	FixtureBridge {
		pier_stations: vec![0.0, 40.0, 90.0],
		groups: vec![GroupSpec {
			first_pier: 0,
			last_pier: 2,
			girders: vec![vec![first, second]],
		}],
	}
}

/// Two simple-span groups; the second group has a single girder.
pub(crate) fn two_group_bridge() -> FixtureBridge {
	let span = || vec![SegmentSpec::new(29.5).start(0.25, 0.5).end(0.25, 0.5)];
	FixtureBridge {
		pier_stations: vec![0.0, 30.0, 60.0],
		groups: vec![
			GroupSpec {
				first_pier: 0,
				last_pier: 1,
				girders: vec![span(), span()],
			},
			GroupSpec {
				first_pier: 1,
				last_pier: 2,
				girders: vec![span()],
			},
		],
	}
}
