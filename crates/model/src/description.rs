//! Serialized shape of a bridge description.

use girderline_primitives::{IntervalIndex, PierIndex, SpanIndex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupModel {
	pub first_pier: PierIndex,
	pub last_pier: PierIndex,
	pub girders: Vec<GirderModel>,
}

impl GroupModel {
	pub fn new(first_pier: PierIndex, last_pier: PierIndex, girders: Vec<GirderModel>) -> Self {
		Self {
			first_pier,
			last_pier,
			girders,
		}
	}
}

/// Girder-level details are in girder-path coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GirderModel {
	pub segments: Vec<SegmentModel>,
	pub temporary_supports: Vec<f64>,
	pub deck_bar_cutoffs: Vec<f64>,
	pub deck_casting_boundaries: Vec<f64>,
	pub ducts: Vec<DuctModel>,
	pub point_loads: Vec<PointLoadModel>,
}

impl GirderModel {
	pub fn new(segments: Vec<SegmentModel>) -> Self {
		Self {
			segments,
			..Self::default()
		}
	}
}

/// Bearing and support data at one end of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentEndModel {
	/// Bearing centerline to end face.
	pub end_distance: f64,
	/// Support line to bearing centerline.
	pub bearing_offset: f64,
	pub support_width: f64,
	pub cantilevered: bool,
}

/// Segment-level details are in segment coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentModel {
	pub length: f64,
	pub start: SegmentEndModel,
	pub end: SegmentEndModel,
	pub height: Option<f64>,
	pub harp_points: Vec<f64>,
	pub transfer_length: Option<f64>,
	pub development_length: Option<f64>,
	pub debonds: Vec<f64>,
	pub diaphragms: Vec<f64>,
	pub stirrup_zones: Vec<f64>,
	pub lifting: Option<HandlingModel>,
	pub storage: Option<HandlingModel>,
	pub hauling: Option<HandlingModel>,
	pub section_changes: Vec<SectionChangeModel>,
	pub bar_cutoffs: Vec<f64>,
}

impl SegmentModel {
	pub fn new(length: f64) -> Self {
		Self {
			length,
			..Self::default()
		}
	}

	pub fn with_start(mut self, end_distance: f64, bearing_offset: f64) -> Self {
		self.start.end_distance = end_distance;
		self.start.bearing_offset = bearing_offset;
		self
	}

	pub fn with_end(mut self, end_distance: f64, bearing_offset: f64) -> Self {
		self.end.end_distance = end_distance;
		self.end.bearing_offset = bearing_offset;
		self
	}

	pub fn with_height(mut self, height: f64) -> Self {
		self.height = Some(height);
		self
	}

	/// Support-line to support-line length.
	pub fn layout_length(&self) -> f64 {
		(self.start.bearing_offset - self.start.end_distance) + self.length + (self.end.bearing_offset - self.end.end_distance)
	}
}

/// Handling supports, `left` from the start face and `right` from the end face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlingModel {
	pub left: f64,
	pub right: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionChangeModel {
	pub distance: f64,
	#[serde(default)]
	pub abrupt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DuctModel {
	pub start: f64,
	pub end: f64,
}

/// Concentrated load position in span coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointLoadModel {
	pub span: SpanIndex,
	pub distance: f64,
}

/// Construction events by interval.
///
/// Inside a `[schedule]` table, events left out never happen. A description
/// without the table gets [`ScheduleModel::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleModel {
	#[serde(default)]
	pub current: IntervalIndex,
	#[serde(default)]
	pub release: Option<IntervalIndex>,
	#[serde(default)]
	pub lift: Option<IntervalIndex>,
	#[serde(default)]
	pub storage: Option<IntervalIndex>,
	#[serde(default)]
	pub haul: Option<IntervalIndex>,
	#[serde(default)]
	pub erect: Option<IntervalIndex>,
	#[serde(default)]
	pub cast_deck: Option<IntervalIndex>,
}

impl Default for ScheduleModel {
	/// Every event scheduled, in construction order, and all of them reached.
	fn default() -> Self {
		Self {
			current: 5,
			release: Some(0),
			lift: Some(1),
			storage: Some(2),
			haul: Some(3),
			erect: Some(4),
			cast_deck: Some(5),
		}
	}
}
