use girderline_poi::PointOfInterest;
use girderline_primitives::GirderKey;

use super::PoiAgent;
use crate::{LayoutSource, Result, ValidationLevel};

/// Adds domain-specific points to the standard layout of each girder.
///
/// Extensions run once per girder, during the phase named by
/// [`LayoutExtension::level`]. They may query the agent; queries at or below
/// the phase in progress answer from the points that already exist.
pub trait LayoutExtension<B: LayoutSource>: Send + Sync {
	fn name(&self) -> &'static str;

	fn level(&self) -> ValidationLevel {
		ValidationLevel::PointsOfInterest
	}

	fn lay_out(&self, cx: &mut LayoutContext<'_, B>) -> Result<()>;
}

/// What an extension sees while a girder is being laid out.
pub struct LayoutContext<'a, B: LayoutSource> {
	pub(super) agent: &'a PoiAgent<B>,
	pub(super) girder: GirderKey,
	pub(super) level: ValidationLevel,
	pub(super) points: Vec<PointOfInterest>,
}

impl<'a, B: LayoutSource> LayoutContext<'a, B> {
	pub fn agent(&self) -> &'a PoiAgent<B> {
		self.agent
	}

	pub fn girder(&self) -> GirderKey {
		self.girder
	}

	pub fn level(&self) -> ValidationLevel {
		self.level
	}

	/// Queues a point for the registry; it is merged with the standard points.
	pub fn push(&mut self, poi: PointOfInterest) {
		self.points.push(poi);
	}
}
