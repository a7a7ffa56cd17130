use girderline_poi::{PoiAttributes, PointOfInterest, Reference};
use girderline_primitives::{GirderKey, SegmentKey, SpanKey};

use super::{StandardLayout, subdivision_tags};
use crate::{LayoutSource, Result};

impl<B: LayoutSource + ?Sized> StandardLayout<'_, B> {
	/// Tenth points of every span the girder crosses, between span references.
	pub(super) fn span_points(&self, girder: GirderKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		let (first_pier, last_pier) = self.source.group_piers(girder.group)?;
		for span in first_pier..last_pier {
			let key = SpanKey::new(span, girder.girder);
			let start = self.transform.span_start(key)?;
			let end = self.transform.span_end(key)?;
			let count = self.config.tenth_point_count;
			for index in 0..=count {
				let girder_path = start + (end - start) * f64::from(index) / f64::from(count);
				let at = self.transform.locate_on_girder(girder, girder_path)?;
				points.push(PointOfInterest::new(at.segment, at.distance).with_reference(Reference::Span, subdivision_tags(index, count)));
			}
		}
		Ok(())
	}

	/// Piers, temporary supports, and closure joints under the girder.
	pub(super) fn supports(&self, girder: GirderKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		let (first_pier, last_pier) = self.source.group_piers(girder.group)?;
		let span_count = self.source.span_count();
		for pier in first_pier..=last_pier {
			let kind = if pier == 0 || pier == span_count {
				PoiAttributes::ABUTMENT
			} else if pier == first_pier || pier == last_pier {
				PoiAttributes::BOUNDARY_PIER
			} else {
				PoiAttributes::INTERMEDIATE_PIER
			};
			let girder_path = self.source.pier_location(girder, pier)?;
			points.push(self.at_girder_path(girder, girder_path, kind)?);
		}

		for girder_path in self.source.temporary_supports(girder)? {
			points.push(self.at_girder_path(girder, girder_path, PoiAttributes::INTERMEDIATE_TEMP_SUPPORT)?);
		}

		let segments = self.transform.check_girder(girder)?;
		for index in 1..segments {
			let joint = self.transform.segment_start(girder.segment(index))?;
			points.push(self.at_girder_path(girder, joint, PoiAttributes::CLOSURE)?);
		}
		Ok(())
	}

	pub(super) fn deck_bar_cutoffs(&self, girder: GirderKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		let offset = self.config.deck_bar_cutoff_offset;
		for cutoff in self.source.deck_bar_cutoffs(girder)? {
			points.push(self.at_girder_path(girder, cutoff, PoiAttributes::DECK_BAR_CUTOFF)?);
			points.push(self.at_girder_path(girder, cutoff - offset, PoiAttributes::empty())?);
			points.push(self.at_girder_path(girder, cutoff + offset, PoiAttributes::empty())?);
		}
		Ok(())
	}

	pub(super) fn bar_cutoffs(&self, segment: SegmentKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		for cutoff in self.source.bar_cutoffs(segment)? {
			points.push(PointOfInterest::new(segment, cutoff).with_attributes(PoiAttributes::BAR_CUTOFF));
		}
		Ok(())
	}

	/// Each boundary ends one casting region and starts the next.
	pub(super) fn casting_boundaries(&self, girder: GirderKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		for boundary in self.source.deck_casting_boundaries(girder)? {
			points.push(self.at_girder_path(girder, boundary, PoiAttributes::CASTING_BOUNDARY_END)?);
			points.push(self.at_girder_path(girder, boundary, PoiAttributes::CASTING_BOUNDARY_START)?);
		}
		Ok(())
	}

	pub(super) fn tendons(&self, girder: GirderKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		for duct in self.source.ducts(girder)? {
			points.push(self.at_girder_path(girder, duct.start, PoiAttributes::DUCT_START)?);
			points.push(self.at_girder_path(girder, duct.end, PoiAttributes::DUCT_END)?);
		}
		Ok(())
	}
}
