use girderline_poi::{PoiAttributes, PointOfInterest, Reference, ReferencedAttributes};
use girderline_primitives::{SegmentKey, is_zero};

use super::StandardLayout;
use crate::{LayoutCategory, LayoutError, LayoutSource, Result, SegmentEnd, SupportPair};

impl<B: LayoutSource + ?Sized> StandardLayout<'_, B> {
	pub(super) fn segment_category(&self, category: LayoutCategory, segment: SegmentKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		match category {
			LayoutCategory::ReleasedSegment => self.released_segment(segment, points),
			LayoutCategory::ErectedSegment => self.erected_segment(segment, points),
			LayoutCategory::EndFaces => self.end_faces(segment, points),
			LayoutCategory::HarpingPoints => self.harping_points(segment, points),
			LayoutCategory::PrestressTransfer => self.prestress_transfer(segment, points),
			LayoutCategory::Diaphragms => {
				for distance in self.source.diaphragms(segment)? {
					points.push(PointOfInterest::new(segment, distance).with_attributes(PoiAttributes::DIAPHRAGM));
				}
				Ok(())
			}
			LayoutCategory::ShearZones => self.shear_zones(segment, points),
			LayoutCategory::Lifting => self.handling(
				segment,
				Reference::LiftSegment,
				self.source.lifting_points(segment)?,
				ReferencedAttributes::PICK_POINT,
				points,
			),
			LayoutCategory::Storage => self.handling(
				segment,
				Reference::StorageSegment,
				self.source.storage_supports(segment)?,
				ReferencedAttributes::BUNK_POINT,
				points,
			),
			LayoutCategory::Hauling => self.handling(
				segment,
				Reference::HaulSegment,
				self.source.hauling_supports(segment)?,
				ReferencedAttributes::BUNK_POINT,
				points,
			),
			LayoutCategory::SectionChanges => self.section_changes(segment, points),
			LayoutCategory::SpanPoints
			| LayoutCategory::Supports
			| LayoutCategory::ReinforcementCutoffs
			| LayoutCategory::CastingBoundaries
			| LayoutCategory::Tendons => {
				debug_assert!(false, "{} is laid out per girder", category.as_str());
				Ok(())
			}
		}
	}

	/// Bearing centerlines in segment coordinates.
	fn bearings(&self, segment: SegmentKey) -> Result<(f64, f64)> {
		let length = self.source.segment_length(segment)?;
		let start = self.source.segment_start_end_distance(segment)?;
		let end = length - self.source.segment_end_end_distance(segment)?;
		Ok((start, end))
	}

	fn released_segment(&self, segment: SegmentKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		let length = self.source.segment_length(segment)?;
		self.subdivide(segment, Reference::ReleasedSegment, (0.0, length), ReferencedAttributes::empty(), points);
		Ok(())
	}

	fn erected_segment(&self, segment: SegmentKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		let length = self.source.segment_length(segment)?;
		let (start, end) = self.bearings(segment)?;
		self.subdivide(segment, Reference::ErectedSegment, (start, end), ReferencedAttributes::empty(), points);

		let overhang = |at_end: SegmentEnd, face: f64, bearing: f64| -> Result<Option<PointOfInterest>> {
			let cantilevered = self.source.is_cantilevered(segment, at_end)? && !is_zero(face - bearing, self.config.tolerance);
			Ok(cantilevered
				.then(|| PointOfInterest::new(segment, face).with_reference(Reference::ErectedSegment, ReferencedAttributes::CANTILEVER)))
		};
		points.extend(overhang(SegmentEnd::Start, 0.0, start)?);
		points.extend(overhang(SegmentEnd::End, length, end)?);
		Ok(())
	}

	fn end_faces(&self, segment: SegmentKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		let length = self.source.segment_length(segment)?;
		points.push(PointOfInterest::new(segment, 0.0).with_attributes(PoiAttributes::START_FACE));
		points.push(PointOfInterest::new(segment, length).with_attributes(PoiAttributes::END_FACE));
		Ok(())
	}

	fn harping_points(&self, segment: SegmentKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		let harp_points = self.source.harp_points(segment)?;
		if harp_points.is_empty() {
			return Ok(());
		}
		let (start_bearing, end_bearing) = self.bearings(segment)?;
		let tolerance = self.config.tolerance;
		let offset = self.config.harp_point_offset;
		for location in harp_points {
			if location < start_bearing - tolerance || end_bearing + tolerance < location {
				return Err(LayoutError::HarpPointOutsideBearings {
					segment,
					location,
					start_bearing,
					end_bearing,
				});
			}
			points.push(PointOfInterest::new(segment, location).with_attributes(PoiAttributes::HARPING_POINT));
			points.push(PointOfInterest::new(segment, location - offset));
			points.push(PointOfInterest::new(segment, location + offset));
		}
		Ok(())
	}

	fn prestress_transfer(&self, segment: SegmentKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		let length = self.source.segment_length(segment)?;
		let transfer = self.source.transfer_length(segment)?;
		if let Some(transfer) = transfer {
			for distance in [transfer, length - transfer] {
				points.push(PointOfInterest::new(segment, distance).with_attributes(PoiAttributes::PS_TRANSFER));
			}
		}
		if let Some(development) = self.source.development_length(segment)? {
			for distance in [development, length - development] {
				points.push(PointOfInterest::new(segment, distance).with_attributes(PoiAttributes::PS_DEVELOPMENT));
			}
		}
		for debond in self.source.debond_points(segment)? {
			points.push(PointOfInterest::new(segment, debond).with_attributes(PoiAttributes::DEBOND));
			if let Some(transfer) = transfer {
				// Bond begins at the debond point and grows toward midspan.
				let bonded = if debond < length / 2.0 { debond + transfer } else { debond - transfer };
				points.push(PointOfInterest::new(segment, bonded).with_attributes(PoiAttributes::PS_TRANSFER));
			}
		}
		Ok(())
	}

	fn shear_zones(&self, segment: SegmentKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		let (start_bearing, end_bearing) = self.bearings(segment)?;
		let height = self.source.girder_height(segment)?;
		let start_face = start_bearing + self.source.support_width(segment, SegmentEnd::Start)? / 2.0;
		let end_face = end_bearing - self.source.support_width(segment, SegmentEnd::End)? / 2.0;

		for (face, toward_midspan) in [(start_face, 1.0), (end_face, -1.0)] {
			points.push(PointOfInterest::new(segment, face).with_attributes(PoiAttributes::FACE_OF_SUPPORT));
			points.push(PointOfInterest::new(segment, face + toward_midspan * height).with_attributes(PoiAttributes::H));
			points.push(PointOfInterest::new(segment, face + toward_midspan * 1.5 * height).with_attributes(PoiAttributes::H_1_5));
		}
		for boundary in self.source.stirrup_zone_boundaries(segment)? {
			points.push(PointOfInterest::new(segment, boundary).with_attributes(PoiAttributes::STIRRUP_ZONE));
		}
		Ok(())
	}

	fn handling(
		&self,
		segment: SegmentKey,
		reference: Reference,
		supports: Option<SupportPair>,
		support: ReferencedAttributes,
		points: &mut Vec<PointOfInterest>,
	) -> Result<()> {
		let Some(SupportPair { left, right }) = supports else {
			return Ok(());
		};
		let length = self.source.segment_length(segment)?;
		self.subdivide(segment, reference, (left, length - right), support, points);

		let tolerance = self.config.tolerance;
		if !is_zero(left, tolerance) {
			points.push(PointOfInterest::new(segment, 0.0).with_reference(reference, ReferencedAttributes::CANTILEVER));
		}
		if !is_zero(right, tolerance) {
			points.push(PointOfInterest::new(segment, length).with_reference(reference, ReferencedAttributes::CANTILEVER));
		}
		Ok(())
	}

	fn section_changes(&self, segment: SegmentKey, points: &mut Vec<PointOfInterest>) -> Result<()> {
		for change in self.source.section_changes(segment)? {
			if change.abrupt {
				for face in [PoiAttributes::SECTION_CHANGE_LEFT_FACE, PoiAttributes::SECTION_CHANGE_RIGHT_FACE] {
					points.push(PointOfInterest::new(segment, change.distance).with_attributes(face));
				}
			} else {
				points.push(PointOfInterest::new(segment, change.distance).with_attributes(PoiAttributes::SECTION_CHANGE_TRANSITION));
			}
		}
		Ok(())
	}
}
