use girderline_geometry::GeometryError;
use girderline_poi::RegistryError;
use girderline_primitives::{GirderKey, SegmentKey};

use crate::ValidationLevel;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
	#[error(transparent)]
	Geometry(#[from] GeometryError),
	#[error(transparent)]
	Registry(#[from] RegistryError),
	/// A nested request asked for more than the validation in progress will provide.
	#[error("validation to {requested} requested while {in_progress} is in progress")]
	ReentrantValidationConflict {
		requested: ValidationLevel,
		in_progress: ValidationLevel,
	},
	#[error("harping point at {location} on {segment} lies outside the bearings ({start_bearing} to {end_bearing})")]
	HarpPointOutsideBearings {
		segment: SegmentKey,
		location: f64,
		start_bearing: f64,
		end_bearing: f64,
	},
	/// A previous layout of the girder failed; it is excluded from analysis
	/// until the bridge description changes.
	#[error("{girder} failed layout and cannot be analyzed")]
	GirderFailed { girder: GirderKey },
}

impl LayoutError {
	/// Errors that stop analysis of the girder being laid out.
	pub fn is_fatal_for_girder(&self) -> bool {
		matches!(self, Self::HarpPointOutsideBearings { .. })
	}

	/// Errors after which the girder is left out of wildcard queries.
	pub fn excludes_girder(&self) -> bool {
		self.is_fatal_for_girder() || matches!(self, Self::GirderFailed { .. })
	}

	pub fn segment(&self) -> Option<SegmentKey> {
		match self {
			Self::HarpPointOutsideBearings { segment, .. } => Some(*segment),
			_ => None,
		}
	}
}

pub type Result<T> = std::result::Result<T, LayoutError>;
