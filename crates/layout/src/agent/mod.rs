//! Point-of-interest agent.
//!
//! # Purpose
//!
//! Serves point-of-interest queries for one bridge description and lays out
//! standard points lazily, the first time a query touches a girder.
//!
//! # Mental model
//!
//! Every public query validates the girders it reads, then answers from the
//! registry. Validation is phased ([`ValidationLevel`]) and serialized by a
//! [`ValidationGate`]; nested queries issued by providers or extensions while
//! a phase runs are answered from what exists so far.
//!
//! The state lock is only held to read or write the registry, never while a
//! provider or extension runs.
//!
//! # Key types
//!
//! | Type | Meaning | Constraints | Constructed / mutated in |
//! |---|---|---|---|
//! | [`PoiAgent`] | Registry owner and query surface | One per bridge description | [`PoiAgent::new`] |
//! | `AgentState` | Registry, memo tables, girder status | Replaced whole on invalidation | `PoiAgent::reset` |
//! | [`LayoutExtension`] | Extra points per girder | Runs once per girder and phase | [`PoiAgent::with_extension`] |
//!
//! # Invariants
//!
//! - A girder is laid out at most once per generation and category.
//!   - Enforced in: `PoiAgent::is_satisfied`, `PoiAgent::lay_out`
//!   - Tested by: `layout::repeated_queries_lay_out_once` (model crate)
//!   - Failure symptom: point ids change between two queries of the same girder.
//! - Readers never see a registry from two generations.
//!   - Enforced in: `PoiAgent::reset`
//!   - Tested by: `invalidation::generation_change_rebuilds_registry` (model crate)
//!   - Failure symptom: points from old geometry mixed with new ones.
//! - A failed girder keeps no points and answers every query with an error.
//!   - Enforced in: `PoiAgent::fail`
//!   - Tested by: `layout::harp_point_outside_bearings_fails_girder` (model crate)
//!   - Failure symptom: analysis continues on a girder that cannot be built.

mod extension;
mod state;

pub use extension::{LayoutContext, LayoutExtension};
use girderline_config::PoiConfig;
use girderline_geometry::{CoordinateSystem, CoordinateTransform, GeometryError, Location, SegmentPoint, SpanBoundary, SpanPoint};
use girderline_poi::{PoiQuery, PointOfInterest, Reference};
use girderline_primitives::{ALL_GIRDERS, ALL_GROUPS, GirderIndex, GirderKey, PoiId, SegmentKey, SpanKey};
use girderline_worker::{Retirement, retire};
use parking_lot::Mutex;
use state::{AgentState, GirderStatus};

use crate::standard::StandardLayout;
use crate::{CategorySet, Diagnostic, GateEntry, LayoutError, LayoutSource, Result, ValidationGate, ValidationGuard, ValidationLevel};

pub struct PoiAgent<B: LayoutSource> {
	source: B,
	config: PoiConfig,
	gate: ValidationGate,
	state: Mutex<AgentState>,
	extensions: Vec<Box<dyn LayoutExtension<B>>>,
}

impl<B: LayoutSource> PoiAgent<B> {
	pub fn new(source: B, config: PoiConfig) -> Self {
		let state = AgentState::new(source.generation(), config.tolerance);
		Self {
			source,
			config,
			gate: ValidationGate::new(),
			state: Mutex::new(state),
			extensions: Vec::new(),
		}
	}

	pub fn with_extension(mut self, extension: impl LayoutExtension<B> + 'static) -> Self {
		self.extensions.push(Box::new(extension));
		self
	}

	pub fn source(&self) -> &B {
		&self.source
	}

	/// Mutable access to the bridge description.
	///
	/// Geometry edits are picked up through [`BridgeGeometry::generation`]
	/// on the next query.
	///
	/// [`BridgeGeometry::generation`]: girderline_geometry::BridgeGeometry::generation
	pub fn source_mut(&mut self) -> &mut B {
		&mut self.source
	}

	pub fn config(&self) -> &PoiConfig {
		&self.config
	}

	pub fn transform(&self) -> CoordinateTransform<'_, B> {
		CoordinateTransform::new(&self.source, self.config.tolerance)
	}

	/// Highest level `girder` has been validated to, if any.
	pub fn validation_level(&self, girder: GirderKey) -> Option<ValidationLevel> {
		self.state.lock().girders.get(&girder).filter(|status| !status.failed).map(|status| status.level)
	}

	pub fn diagnostics(&self) -> Vec<Diagnostic> {
		self.state.lock().diagnostics.clone()
	}

	/// Number of stored points across all girders laid out so far.
	pub fn stored_len(&self) -> usize {
		self.state.lock().registry.len()
	}

	/// Brings `girder` up to `level`, laying out whatever is missing.
	pub fn validate(&self, girder: GirderKey, level: ValidationLevel) -> Result<()> {
		self.sync_generation();
		if self.is_satisfied(girder, level)? {
			return Ok(());
		}
		let mut guard = match self.gate.enter(level)? {
			GateEntry::Nested { in_progress } => {
				tracing::trace!(%girder, requested = level.as_str(), in_progress = in_progress.as_str(), "agent.validate_nested");
				return Ok(());
			}
			GateEntry::Enter(guard) => guard,
		};
		// Another thread may have validated while this one waited for the gate.
		if self.is_satisfied(girder, level)? {
			return Ok(());
		}
		self.run_validation(girder, level, &mut guard)
	}

	pub fn points_of_interest(&self, key: SegmentKey, query: &PoiQuery) -> Result<Vec<PointOfInterest>> {
		for girder in self.girders_matching(key)? {
			match self.validate(girder, ValidationLevel::PointsOfInterest) {
				Err(error) if error.excludes_girder() && key.girder_key().is_wildcard() => {
					tracing::debug!(%girder, %error, "agent.girder_excluded");
				}
				result => result?,
			}
		}
		Ok(self.state.lock().registry.points_of_interest(key, query))
	}

	/// Stored point at `distance`, or a transient one when nothing is stored there.
	pub fn point_of_interest(&self, segment: SegmentKey, distance: f64) -> Result<PointOfInterest> {
		self.validate_segment(segment)?;
		Ok(self.state.lock().registry.point_of_interest(segment, distance, self.config.tolerance))
	}

	pub fn nearest_point_of_interest(&self, segment: SegmentKey, distance: f64) -> Result<Option<PointOfInterest>> {
		self.validate_segment(segment)?;
		Ok(self.state.lock().registry.nearest(segment, distance))
	}

	pub fn point_of_interest_by_id(&self, id: PoiId) -> Option<PointOfInterest> {
		self.state.lock().registry.get(id).copied()
	}

	pub fn prev_point_of_interest(&self, id: PoiId, query: &PoiQuery) -> Option<PointOfInterest> {
		self.state.lock().registry.prev(id, query)
	}

	pub fn next_point_of_interest(&self, id: PoiId, query: &PoiQuery) -> Option<PointOfInterest> {
		self.state.lock().registry.next(id, query)
	}

	/// Stored points on the segment of `poi` within `[distance - low, distance + high]`.
	pub fn points_in_range(&self, low: f64, poi: &PointOfInterest, high: f64) -> Result<Vec<PointOfInterest>> {
		self.validate_segment(poi.segment())?;
		Ok(self.state.lock().registry.points_in_range(low, poi, high))
	}

	/// Adds a caller-defined point after the standard layout of its girder.
	pub fn add_point_of_interest(&self, poi: PointOfInterest) -> Result<PoiId> {
		self.validate_segment(poi.segment())?;
		let mut state = self.state.lock();
		let id = state.registry.add(poi)?;
		state.forget(id);
		Ok(id)
	}

	pub fn remove_point_of_interest(&self, id: PoiId) -> Option<PointOfInterest> {
		let mut state = self.state.lock();
		let removed = state.registry.remove(id);
		if removed.is_some() {
			state.forget(id);
		}
		removed
	}

	/// Value of `poi` in `system`, memoized for stored points.
	pub fn coordinate(&self, poi: &PointOfInterest, system: CoordinateSystem) -> Result<f64> {
		self.sync_generation();
		let key = poi.id().map(|id| (id, system));
		let cached = key.and_then(|key| self.state.lock().coordinates.get(&key).copied());
		if let Some(value) = cached {
			return Ok(value);
		}
		let value = self.transform().convert(segment_point(poi), system, span_boundary(poi))?;
		if let Some(key) = key {
			self.state.lock().coordinates.insert(key, value);
		}
		Ok(value)
	}

	/// Span and span coordinate of `poi`, memoized for stored points.
	pub fn span_point(&self, poi: &PointOfInterest) -> Result<SpanPoint> {
		self.sync_generation();
		let cached = poi.id().and_then(|id| self.state.lock().spans.get(&id).copied());
		if let Some(point) = cached {
			return Ok(point);
		}
		let point = self.transform().span_point(segment_point(poi), span_boundary(poi))?;
		if let Some(id) = poi.id() {
			self.state.lock().spans.insert(id, point);
		}
		Ok(point)
	}

	/// Point of interest at a location given in any coordinate system.
	pub fn poi_at(&self, location: Location) -> Result<PointOfInterest> {
		self.sync_generation();
		let at = self.transform().locate(location)?;
		self.point_of_interest(at.segment, at.distance)
	}

	pub fn poi_at_span_point(&self, span: SpanKey, distance: f64) -> Result<PointOfInterest> {
		self.poi_at(Location::Span(span, distance))
	}

	pub fn poi_at_girder_coordinate(&self, girder: GirderKey, distance: f64) -> Result<PointOfInterest> {
		self.poi_at(Location::Girder(girder, distance))
	}

	pub fn poi_at_girder_path(&self, girder: GirderKey, girder_path: f64) -> Result<PointOfInterest> {
		self.poi_at(Location::GirderPath(girder, girder_path))
	}

	pub fn poi_at_girder_line(&self, girder: GirderIndex, girder_line: f64) -> Result<PointOfInterest> {
		self.poi_at(Location::GirderLine(girder, girder_line))
	}

	pub fn poi_at_bridge_line(&self, girder: GirderIndex, bridge_line: f64) -> Result<PointOfInterest> {
		self.poi_at(Location::BridgeLine(girder, bridge_line))
	}

	/// Discards every point and memo. The next query lays girders out again.
	pub fn invalidate(&self) -> Retirement {
		self.reset(self.source.generation())
	}

	fn validate_segment(&self, segment: SegmentKey) -> Result<()> {
		if segment.is_wildcard() {
			return Err(GeometryError::WildcardKey(segment).into());
		}
		self.validate(segment.girder_key(), ValidationLevel::PointsOfInterest)
	}

	fn girders_matching(&self, key: SegmentKey) -> Result<Vec<GirderKey>> {
		let groups = if key.group == ALL_GROUPS {
			0..self.source.group_count()
		} else {
			key.group..key.group.saturating_add(1)
		};
		let mut girders = Vec::new();
		for group in groups {
			let count = self.source.girder_count(group)?;
			if key.girder == ALL_GIRDERS {
				girders.extend((0..count).map(|girder| GirderKey::new(group, girder)));
			} else if key.girder < count || key.group != ALL_GROUPS {
				girders.push(GirderKey::new(group, key.girder));
			}
		}
		Ok(girders)
	}

	fn is_satisfied(&self, girder: GirderKey, level: ValidationLevel) -> Result<bool> {
		let current = self.source.current_interval();
		let enabled = CategorySet::enabled(&self.config.layout);
		let state = self.state.lock();
		let Some(status) = state.girders.get(&girder) else {
			return Ok(false);
		};
		if status.failed {
			return Err(LayoutError::GirderFailed { girder });
		}
		if status.level < level {
			return Ok(false);
		}
		// Categories gated on a later interval are laid out once it is reached.
		let waiting = level >= ValidationLevel::PointsOfInterest
			&& !status.completed.contains(enabled)
			&& status.interval.is_none_or(|interval| interval < current);
		Ok(!waiting)
	}

	fn status(&self, girder: GirderKey) -> Option<GirderStatus> {
		self.state.lock().girders.get(&girder).copied()
	}

	fn run_validation(&self, girder: GirderKey, level: ValidationLevel, guard: &mut ValidationGuard<'_>) -> Result<()> {
		self.transform().check_girder(girder)?;
		self.source.ensure_girder_geometry(girder)?;
		self.state.lock().status_mut(girder);

		if level >= ValidationLevel::PointsOfInterest {
			guard.raise(ValidationLevel::PointsOfInterest);
			if let Err(error) = self.lay_out(girder) {
				if error.is_fatal_for_girder() {
					self.fail(girder, &error);
				}
				return Err(error);
			}
		}

		let loads_done = self.status(girder).is_some_and(|status| status.level >= ValidationLevel::Loads);
		if level >= ValidationLevel::Loads && !loads_done {
			guard.raise(ValidationLevel::Loads);
			self.lay_out_loads(girder)?;
		}
		Ok(())
	}

	fn lay_out(&self, girder: GirderKey) -> Result<()> {
		let interval = self.source.current_interval();
		let before = self.status(girder).unwrap_or_else(GirderStatus::new);
		let pending = CategorySet::enabled(&self.config.layout).difference(before.completed);

		let outcome = StandardLayout::new(&self.source, &self.config).run(girder, pending)?;
		let mut points = outcome.points;
		if before.level < ValidationLevel::PointsOfInterest {
			points.extend(self.run_extensions(girder, ValidationLevel::PointsOfInterest)?);
		}

		let count = points.len();
		let mut state = self.state.lock();
		for poi in points {
			state.registry.add(poi)?;
		}
		let status = state.status_mut(girder);
		status.level = status.level.max(ValidationLevel::PointsOfInterest);
		status.completed |= outcome.completed;
		status.interval = Some(interval);
		let stored = state.registry.len();
		drop(state);

		tracing::debug!(%girder, interval, points = count, stored, "agent.layout");
		Ok(())
	}

	fn lay_out_loads(&self, girder: GirderKey) -> Result<()> {
		let mut points = StandardLayout::new(&self.source, &self.config).loads(girder)?;
		points.extend(self.run_extensions(girder, ValidationLevel::Loads)?);

		let count = points.len();
		let mut state = self.state.lock();
		for poi in points {
			state.registry.add(poi)?;
		}
		state.status_mut(girder).level = ValidationLevel::Loads;
		drop(state);

		tracing::debug!(%girder, points = count, "agent.layout_loads");
		Ok(())
	}

	fn run_extensions(&self, girder: GirderKey, level: ValidationLevel) -> Result<Vec<PointOfInterest>> {
		let mut cx = LayoutContext {
			agent: self,
			girder,
			level,
			points: Vec::new(),
		};
		for extension in self.extensions.iter().filter(|extension| extension.level() == level) {
			tracing::trace!(extension = extension.name(), %girder, level = level.as_str(), "agent.extension");
			extension.lay_out(&mut cx)?;
		}
		Ok(cx.points)
	}

	fn fail(&self, girder: GirderKey, error: &LayoutError) {
		tracing::error!(%girder, %error, "agent.girder_failed");
		let mut state = self.state.lock();
		let removed = state.registry.remove_segments(girder.all_segments());
		state.diagnostics.push(Diagnostic {
			girder,
			segment: error.segment(),
			message: error.to_string(),
		});
		state.status_mut(girder).failed = true;
		tracing::debug!(%girder, removed, "agent.girder_cleared");
	}

	fn sync_generation(&self) {
		let generation = self.source.generation();
		let stale = self.state.lock().generation != generation;
		if stale {
			tracing::warn!(generation, "agent.geometry_changed");
			self.reset(generation);
		}
	}

	fn reset(&self, generation: u64) -> Retirement {
		let _hold = self.gate.hold();
		let fresh = AgentState::new(generation, self.config.tolerance);
		let stale = std::mem::replace(&mut *self.state.lock(), fresh);
		tracing::debug!(generation, points = stale.registry.len(), "agent.reset");
		if self.config.background_invalidation {
			retire("poi_registry", stale)
		} else {
			drop(stale);
			Retirement::Inline
		}
	}
}

fn segment_point(poi: &PointOfInterest) -> SegmentPoint {
	SegmentPoint::new(poi.segment(), poi.distance())
}

/// Span 0.0L points sit at the start of the later span; everything else
/// on a shared pier belongs to the earlier one.
fn span_boundary(poi: &PointOfInterest) -> SpanBoundary {
	if poi.tenth_point(Reference::Span) == 1 {
		SpanBoundary::Later
	} else {
		SpanBoundary::Earlier
	}
}
