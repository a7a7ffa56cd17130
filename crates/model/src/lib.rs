//! Bridge description loaded from TOML.
//!
//! [`BridgeModel`] answers every provider contract the layout engine needs:
//! geometry, girder details, section shape, and the construction schedule.
//! Girders run parallel to a straight alignment, so a pier's girder-path
//! location is its station offset from the first pier of the group.
//!
//! ```toml
//! pier_stations = [100.0, 156.0]
//!
//! [[groups]]
//! first_pier = 0
//! last_pier = 1
//!
//! [[groups.girders]]
//! [[groups.girders.segments]]
//! length = 30.0
//! start = { end_distance = 0.5, bearing_offset = 1.0 }
//!
//! [[groups.girders.segments]]
//! length = 25.0
//! end = { end_distance = 0.5, bearing_offset = 1.0 }
//! ```

mod description;
mod details;
mod error;
mod geometry;

use std::path::Path;

pub use description::{
	DuctModel, GirderModel, GroupModel, HandlingModel, PointLoadModel, ScheduleModel, SectionChangeModel, SegmentEndModel,
	SegmentModel,
};
pub use error::{ModelError, Result};
use girderline_primitives::{DEFAULT_TOLERANCE, GirderKey, SegmentKey, is_equal};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeModel {
	/// Alignment station of every pier, abutments included.
	pub pier_stations: Vec<f64>,
	pub groups: Vec<GroupModel>,
	#[serde(default)]
	pub schedule: ScheduleModel,
	#[serde(skip)]
	generation: u64,
}

impl BridgeModel {
	pub fn new(pier_stations: Vec<f64>, groups: Vec<GroupModel>) -> Self {
		Self {
			pier_stations,
			groups,
			schedule: ScheduleModel::default(),
			generation: 0,
		}
	}

	/// Parse a TOML string into a checked [`BridgeModel`].
	pub fn parse(input: &str) -> Result<Self> {
		let model: Self = toml::from_str(input)?;
		model.validate()?;
		Ok(model)
	}

	/// Load a bridge description from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ModelError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Checks that the description is a bridge the engine can lay out.
	///
	/// A girder whose layout length differs from its pier spacing is only
	/// reported; the girder-path frame still follows the segments.
	pub fn validate(&self) -> Result<()> {
		if self.pier_stations.len() < 2 {
			return Err(ModelError::Inconsistent("a bridge needs at least two piers".to_owned()));
		}
		if self.pier_stations.windows(2).any(|pair| pair[1] <= pair[0]) {
			return Err(ModelError::Inconsistent("pier stations must increase".to_owned()));
		}

		let last_pier = (self.pier_stations.len() - 1) as u32;
		let mut expected_first = 0;
		for (index, group) in self.groups.iter().enumerate() {
			if group.first_pier != expected_first || group.last_pier <= group.first_pier || group.last_pier > last_pier {
				return Err(ModelError::Inconsistent(format!(
					"group {index} spans piers {}..={} but must start at pier {expected_first}",
					group.first_pier, group.last_pier
				)));
			}
			expected_first = group.last_pier;
			if group.girders.is_empty() {
				return Err(ModelError::Inconsistent(format!("group {index} has no girders")));
			}

			let spacing = self.pier_stations[group.last_pier as usize] - self.pier_stations[group.first_pier as usize];
			for (girder_index, girder) in group.girders.iter().enumerate() {
				let key = GirderKey::new(index as u32, girder_index as u32);
				if girder.segments.is_empty() {
					return Err(ModelError::Inconsistent(format!("{key} has no segments")));
				}
				if let Some(position) = girder.segments.iter().position(|segment| segment.length.is_nan() || segment.length <= 0.0) {
					return Err(ModelError::Inconsistent(format!("{} has no positive length", key.segment(position as u32))));
				}
				let layout_length: f64 = girder.segments.iter().map(SegmentModel::layout_length).sum();
				if !is_equal(layout_length, spacing, DEFAULT_TOLERANCE) {
					tracing::warn!(girder = %key, layout_length, spacing, "model.length_mismatch");
				}
			}
		}
		if expected_first != last_pier {
			return Err(ModelError::Inconsistent(format!("groups end at pier {expected_first}, bridge ends at pier {last_pier}")));
		}
		Ok(())
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Records a geometry change made through the public fields.
	pub fn touch(&mut self) {
		self.generation += 1;
		tracing::debug!(generation = self.generation, "model.touch");
	}

	pub fn girder_mut(&mut self, girder: GirderKey) -> Option<&mut GirderModel> {
		let model = self.groups.get_mut(girder.group as usize)?.girders.get_mut(girder.girder as usize)?;
		self.generation += 1;
		Some(model)
	}

	pub fn segment_mut(&mut self, segment: SegmentKey) -> Option<&mut SegmentModel> {
		self.girder_mut(segment.girder_key())?.segments.get_mut(segment.segment as usize)
	}

	pub fn with_schedule(mut self, schedule: ScheduleModel) -> Self {
		self.schedule = schedule;
		self
	}
}
