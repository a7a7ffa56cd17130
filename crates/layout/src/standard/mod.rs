//! Standard point-of-interest layout for one girder.
//!
//! # Purpose
//!
//! Produces the points every analysis of a girder needs, one
//! [`LayoutCategory`] at a time, from the bridge description. The output is
//! a plain list; the agent merges it into its registry.
//!
//! # Invariants
//!
//! - Subdivisions tag exactly the points at tenths with ordinals 1..=11.
//!   - Enforced in: `StandardLayout::subdivide`
//!   - Tested by: `layout::released_segment_tenth_points_are_tagged` (model crate)
//!   - Failure symptom: tenth-point queries miss or duplicate stations.
//! - A category whose details cannot be resolved is skipped as a whole.
//!   - Enforced in: [`StandardLayout::run`]
//!   - Tested by: `layout::missing_girder_height_skips_shear_zones` (model crate)
//!   - Failure symptom: half-laid-out categories, or a whole girder lost to optional data.
//! - A harping point outside the bearings aborts the girder.
//!   - Enforced in: `StandardLayout::harping_points`
//!   - Tested by: `layout::harp_point_outside_bearings_fails_girder` (model crate)
//!   - Failure symptom: stresses reported on a strand profile that cannot be built.

mod girder;
mod segment;

use girderline_config::PoiConfig;
use girderline_geometry::CoordinateTransform;
use girderline_poi::{PoiAttributes, PointOfInterest, Reference, ReferencedAttributes, tenth_point_ordinal};
use girderline_primitives::{GirderKey, SegmentKey};

use crate::{CategorySet, LayoutCategory, LayoutError, LayoutSource, Result};

#[derive(Debug, Default)]
pub(crate) struct LayoutOutcome {
	pub(crate) points: Vec<PointOfInterest>,
	/// Categories that will not produce more points at a later interval.
	pub(crate) completed: CategorySet,
}

pub(crate) struct StandardLayout<'a, B: LayoutSource + ?Sized> {
	source: &'a B,
	config: &'a PoiConfig,
	transform: CoordinateTransform<'a, B>,
}

impl<'a, B: LayoutSource + ?Sized> StandardLayout<'a, B> {
	pub(crate) fn new(source: &'a B, config: &'a PoiConfig) -> Self {
		Self {
			source,
			config,
			transform: CoordinateTransform::new(source, config.tolerance),
		}
	}

	/// Lays out the `pending` categories that apply at the current interval.
	pub(crate) fn run(&self, girder: GirderKey, pending: CategorySet) -> Result<LayoutOutcome> {
		let current = self.source.current_interval();
		let segments = self.transform.check_girder(girder)?;
		let mut outcome = LayoutOutcome::default();

		for category in pending.categories() {
			let mut open = Vec::new();
			let mut opens_later = false;
			for index in 0..segments {
				let segment = girder.segment(index);
				let gate = category.gate(self.source, segment);
				if gate.is_open(current) {
					open.push(segment);
				} else {
					opens_later |= gate.opens_later(current);
				}
			}

			match self.category(category, girder, &open) {
				Ok(points) => {
					tracing::trace!(category = category.as_str(), %girder, points = points.len(), "layout.category");
					outcome.points.extend(points);
				}
				Err(LayoutError::Geometry(error)) => {
					tracing::debug!(category = category.as_str(), %girder, %error, "layout.category_skipped");
				}
				Err(error) => return Err(error),
			}
			if !opens_later {
				outcome.completed |= category.as_set();
			}
		}
		Ok(outcome)
	}

	/// Points where concentrated loads act on the girder.
	pub(crate) fn loads(&self, girder: GirderKey) -> Result<Vec<PointOfInterest>> {
		let mut points = Vec::new();
		let loads = match self.source.point_loads(girder) {
			Ok(loads) => loads,
			Err(error) => {
				tracing::debug!(%girder, %error, "layout.loads_skipped");
				return Ok(points);
			}
		};
		for load in loads {
			let (owner, girder_path) = self.transform.span_to_girder_path(load)?;
			if owner != girder {
				tracing::debug!(%girder, span = load.span.span, "layout.load_on_other_girder");
				continue;
			}
			let at = self.transform.locate_on_girder(girder, girder_path)?;
			points.push(PointOfInterest::new(at.segment, at.distance).with_attributes(PoiAttributes::CONC_LOAD));
		}
		Ok(points)
	}

	fn category(&self, category: LayoutCategory, girder: GirderKey, open: &[SegmentKey]) -> Result<Vec<PointOfInterest>> {
		let mut points = Vec::new();
		if open.is_empty() {
			return Ok(points);
		}
		match category {
			LayoutCategory::SpanPoints => self.span_points(girder, &mut points)?,
			LayoutCategory::Supports => self.supports(girder, &mut points)?,
			LayoutCategory::ReinforcementCutoffs => {
				self.deck_bar_cutoffs(girder, &mut points)?;
				for &segment in open {
					self.bar_cutoffs(segment, &mut points)?;
				}
			}
			LayoutCategory::CastingBoundaries => self.casting_boundaries(girder, &mut points)?,
			LayoutCategory::Tendons => self.tendons(girder, &mut points)?,
			per_segment => {
				for &segment in open {
					self.segment_category(per_segment, segment, &mut points)?;
				}
			}
		}
		Ok(points)
	}

	/// Splits `start..=end` into `tenth_point_count` equal parts in `reference`.
	///
	/// Points on a tenth get its ordinal, the others [`ReferencedAttributes::SUBDIVISION`].
	/// `ends` is added to the first and last point.
	fn subdivide(
		&self,
		segment: SegmentKey,
		reference: Reference,
		(start, end): (f64, f64),
		ends: ReferencedAttributes,
		points: &mut Vec<PointOfInterest>,
	) {
		let count = self.config.tenth_point_count;
		for index in 0..=count {
			let distance = start + (end - start) * f64::from(index) / f64::from(count);
			let mut tags = subdivision_tags(index, count);
			if index == 0 || index == count {
				tags |= ends;
			}
			points.push(PointOfInterest::new(segment, distance).with_reference(reference, tags));
		}
	}

	fn at_girder_path(&self, girder: GirderKey, girder_path: f64, attributes: PoiAttributes) -> Result<PointOfInterest> {
		let at = self.transform.locate_on_girder(girder, girder_path)?;
		Ok(PointOfInterest::new(at.segment, at.distance).with_attributes(attributes))
	}
}

/// Tag of subdivision point `index` of `count`.
fn subdivision_tags(index: u32, count: u32) -> ReferencedAttributes {
	match tenth_point_ordinal(index, count) {
		0 => ReferencedAttributes::SUBDIVISION,
		ordinal => ReferencedAttributes::tenth_point(ordinal),
	}
}
