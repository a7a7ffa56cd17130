use girderline_geometry::{CoordinateSystem, SpanPoint};
use girderline_poi::PoiRegistry;
use girderline_primitives::{GirderKey, IntervalIndex, PoiId};
use rustc_hash::FxHashMap;

use crate::{CategorySet, Diagnostic, ValidationLevel};

/// Validation progress of one girder.
#[derive(Debug, Clone, Copy)]
pub(super) struct GirderStatus {
	pub(super) level: ValidationLevel,
	/// Categories that will not produce more points.
	pub(super) completed: CategorySet,
	/// Interval current at the last layout.
	pub(super) interval: Option<IntervalIndex>,
	pub(super) failed: bool,
}

impl GirderStatus {
	pub(super) fn new() -> Self {
		Self {
			level: ValidationLevel::Geometry,
			completed: CategorySet::empty(),
			interval: None,
			failed: false,
		}
	}
}

/// Everything derived from one generation of the bridge description.
pub(super) struct AgentState {
	pub(super) generation: u64,
	pub(super) registry: PoiRegistry,
	pub(super) girders: FxHashMap<GirderKey, GirderStatus>,
	pub(super) coordinates: FxHashMap<(PoiId, CoordinateSystem), f64>,
	pub(super) spans: FxHashMap<PoiId, SpanPoint>,
	pub(super) diagnostics: Vec<Diagnostic>,
}

impl AgentState {
	pub(super) fn new(generation: u64, tolerance: f64) -> Self {
		Self {
			generation,
			registry: PoiRegistry::new(tolerance),
			girders: FxHashMap::default(),
			coordinates: FxHashMap::default(),
			spans: FxHashMap::default(),
			diagnostics: Vec::new(),
		}
	}

	pub(super) fn status_mut(&mut self, girder: GirderKey) -> &mut GirderStatus {
		self.girders.entry(girder).or_insert_with(GirderStatus::new)
	}

	/// Drops memoized coordinates of a point that left the registry.
	pub(super) fn forget(&mut self, id: PoiId) {
		self.coordinates.retain(|(memo, _), _| *memo != id);
		self.spans.remove(&id);
	}
}
