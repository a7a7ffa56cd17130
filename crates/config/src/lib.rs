//! Settings for the point-of-interest engine.
//!
//! Configuration is written in TOML. Every field is optional and falls back
//! to its default:
//!
//! ```toml
//! tolerance = 0.001
//! tenth_point_count = 10
//! harp_point_offset = 0.0015
//! deck_bar_cutoff_offset = 0.0015
//! background_invalidation = true
//!
//! [layout]
//! tendons = false
//! ```
//!
//! Values are range-checked by [`PoiConfig::validate`], which [`PoiConfig::parse`]
//! and [`PoiConfig::load`] run before returning.

pub mod error;

use std::path::Path;

pub use error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Settings for the registry and the standard point layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoiConfig {
	/// Distance within which two points on a segment are the same place.
	pub tolerance: f64,
	/// Number of equal subdivisions laid out along each segment and span.
	pub tenth_point_count: u32,
	/// Offset of the extra points placed on each side of a harping point.
	pub harp_point_offset: f64,
	/// Offset of the extra points placed on each side of a deck bar cutoff.
	pub deck_bar_cutoff_offset: f64,
	/// Release invalidated registries on a worker instead of the caller.
	pub background_invalidation: bool,
	/// Which standard layout categories are generated.
	pub layout: LayoutToggles,
}

impl Default for PoiConfig {
	fn default() -> Self {
		Self {
			tolerance: 0.001,
			tenth_point_count: 10,
			harp_point_offset: 0.0015,
			deck_bar_cutoff_offset: 0.0015,
			background_invalidation: true,
			layout: LayoutToggles::default(),
		}
	}
}

/// Per-category switches for the standard point layout. All default to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutToggles {
	pub span_points: bool,
	pub released_segment: bool,
	pub erected_segment: bool,
	pub end_faces: bool,
	pub harping_points: bool,
	pub prestress_transfer: bool,
	pub diaphragms: bool,
	pub shear_zones: bool,
	pub lifting: bool,
	pub storage: bool,
	pub hauling: bool,
	pub section_changes: bool,
	pub supports: bool,
	pub reinforcement_cutoffs: bool,
	pub casting_boundaries: bool,
	pub tendons: bool,
}

impl Default for LayoutToggles {
	fn default() -> Self {
		Self {
			span_points: true,
			released_segment: true,
			erected_segment: true,
			end_faces: true,
			harping_points: true,
			prestress_transfer: true,
			diaphragms: true,
			shear_zones: true,
			lifting: true,
			storage: true,
			hauling: true,
			section_changes: true,
			supports: true,
			reinforcement_cutoffs: true,
			casting_boundaries: true,
			tendons: true,
		}
	}
}

impl PoiConfig {
	/// Parse a TOML string into a validated [`PoiConfig`].
	pub fn parse(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Checks value ranges.
	///
	/// Offsets must exceed the tolerance, otherwise the offset points would
	/// merge back into the point they bracket.
	pub fn validate(&self) -> Result<()> {
		if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
			return Err(ConfigError::Invalid {
				field: "tolerance",
				reason: format!("must be positive, got {}", self.tolerance),
			});
		}
		if self.tenth_point_count == 0 {
			return Err(ConfigError::Invalid {
				field: "tenth_point_count",
				reason: "must be at least 1".to_owned(),
			});
		}
		for (field, offset) in [
			("harp_point_offset", self.harp_point_offset),
			("deck_bar_cutoff_offset", self.deck_bar_cutoff_offset),
		] {
			if !(offset.is_finite() && offset > self.tolerance) {
				return Err(ConfigError::Invalid {
					field,
					reason: format!("must exceed the tolerance {}, got {offset}", self.tolerance),
				});
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
