//! Conversions between the coordinate systems of [`CoordinateSystem`].
//!
//! # Mental model
//!
//! Every conversion passes through girder-path coordinates. Segment `k` of a
//! girder starts at support line `S_k`, the sum of the layout lengths of the
//! segments before it, and its start face sits `f_k` past that line, where
//! `f_k = start bearing offset - start end distance`. Then:
//!
//! - segment path: `x_sp = x_s + f_k`
//! - girder path: `x_gp = S_k + x_sp`
//! - girder: `x_g = x_gp - f_0`
//! - girder line: `x_gl = x_gp + sum of girder-path lengths of earlier groups`
//! - span: `x_gp` minus the girder-path location of the span's start reference
//! - bridge line: station of `x_gp` minus the station of pier 0
//!
//! # Invariants
//!
//! - Segment, segment-path, girder, and girder-path values round-trip exactly
//!   (up to rounding) for any distance, including distances outside the
//!   segment.
//!   - Enforced in: [`CoordinateTransform::girder_path_to_segment`], [`CoordinateTransform::girder_to_segment`]
//!   - Tested by: `transform::tests::prop_segment_round_trips`
//!   - Failure symptom: a point of interest drifts when re-resolved from a cached coordinate.
//! - Segment 0 has no preceding connection geometry, so its girder coordinate is its segment coordinate.
//!   - Enforced in: [`CoordinateTransform::segment_to_girder`]
//!   - Tested by: `transform::tests::first_segment_girder_coordinate_is_segment_coordinate`
//!   - Failure symptom: girder coordinates are shifted by the start face offset.
//! - A location on an interior span boundary is attributed according to [`SpanBoundary`].
//!   - Enforced in: [`CoordinateTransform::girder_path_to_span`]
//!   - Tested by: `transform::tests::boundary_point_follows_requested_span`
//!   - Failure symptom: span 1.0L and next span 0.0L resolve to the same span.

use girderline_primitives::{GirderIndex, GirderKey, SegmentIndex, SegmentKey, SpanIndex, SpanKey, is_equal};

use crate::provider::{clamp_girder, group_of_span};
use crate::{BridgeGeometry, CoordinateSystem, GeometryError, Location, Result, SegmentPoint, SpanBoundary, SpanPoint};

/// Converts locations on a bridge between coordinate systems.
///
/// Holds only a borrowed geometry and the tolerance used to decide which span
/// owns a location sitting on a span boundary.
pub struct CoordinateTransform<'a, G: BridgeGeometry + ?Sized> {
	geometry: &'a G,
	tolerance: f64,
}

impl<'a, G> CoordinateTransform<'a, G>
where
	G: BridgeGeometry + ?Sized,
{
	pub fn new(geometry: &'a G, tolerance: f64) -> Self {
		Self { geometry, tolerance }
	}

	pub fn geometry(&self) -> &'a G {
		self.geometry
	}

	pub fn tolerance(&self) -> f64 {
		self.tolerance
	}

	/// Validates a girder key and returns its segment count.
	pub fn check_girder(&self, girder: GirderKey) -> Result<SegmentIndex> {
		if girder.is_wildcard() {
			return Err(GeometryError::WildcardKey(girder.all_segments()));
		}
		if girder.group >= self.geometry.group_count() {
			return Err(GeometryError::GroupOutOfRange(girder.group));
		}
		if girder.girder >= self.geometry.girder_count(girder.group)? {
			return Err(GeometryError::GirderOutOfRange(girder));
		}
		match self.geometry.segment_count(girder)? {
			0 => Err(GeometryError::not_resolved("segments", girder)),
			count => Ok(count),
		}
	}

	pub fn check_segment(&self, segment: SegmentKey) -> Result<()> {
		if segment.is_wildcard() {
			return Err(GeometryError::WildcardKey(segment));
		}
		if segment.segment >= self.check_girder(segment.girder_key())? {
			return Err(GeometryError::SegmentOutOfRange(segment));
		}
		Ok(())
	}

	/// Distance from the start support line to the start face of the segment.
	pub fn start_face_offset(&self, segment: SegmentKey) -> Result<f64> {
		self.check_segment(segment)?;
		let bearing_offset = self.geometry.segment_start_bearing_offset(segment)?;
		let end_distance = self.geometry.segment_start_end_distance(segment)?;
		Ok(bearing_offset - end_distance)
	}

	/// Girder-path location of the support line at the start of the segment.
	pub fn segment_start(&self, segment: SegmentKey) -> Result<f64> {
		self.check_segment(segment)?;
		let girder = segment.girder_key();
		(0..segment.segment).try_fold(0.0, |acc, index| Ok(acc + self.geometry.segment_layout_length(girder.segment(index))?))
	}

	/// Support-line to support-line length of the whole girder.
	pub fn girder_path_length(&self, girder: GirderKey) -> Result<f64> {
		let count = self.check_girder(girder)?;
		(0..count).try_fold(0.0, |acc, index| Ok(acc + self.geometry.segment_layout_length(girder.segment(index))?))
	}

	pub fn segment_to_segment_path(&self, segment: SegmentKey, distance: f64) -> Result<f64> {
		Ok(distance + self.start_face_offset(segment)?)
	}

	pub fn segment_path_to_segment(&self, segment: SegmentKey, segment_path: f64) -> Result<f64> {
		Ok(segment_path - self.start_face_offset(segment)?)
	}

	pub fn segment_to_girder_path(&self, segment: SegmentKey, distance: f64) -> Result<f64> {
		Ok(self.segment_start(segment)? + self.segment_to_segment_path(segment, distance)?)
	}

	/// Expresses a girder-path value relative to the given segment, even when
	/// the location lies outside that segment.
	pub fn girder_path_to_segment(&self, segment: SegmentKey, girder_path: f64) -> Result<f64> {
		self.segment_path_to_segment(segment, girder_path - self.segment_start(segment)?)
	}

	pub fn segment_to_girder(&self, segment: SegmentKey, distance: f64) -> Result<f64> {
		if segment.segment == 0 {
			self.check_segment(segment)?;
			return Ok(distance);
		}
		let girder_path = self.segment_to_girder_path(segment, distance)?;
		self.girder_path_to_girder(segment.girder_key(), girder_path)
	}

	pub fn girder_to_segment(&self, segment: SegmentKey, girder: f64) -> Result<f64> {
		if segment.segment == 0 {
			self.check_segment(segment)?;
			return Ok(girder);
		}
		let girder_path = self.girder_to_girder_path(segment.girder_key(), girder)?;
		self.girder_path_to_segment(segment, girder_path)
	}

	pub fn girder_path_to_girder(&self, girder: GirderKey, girder_path: f64) -> Result<f64> {
		Ok(girder_path - self.start_face_offset(girder.segment(0))?)
	}

	pub fn girder_to_girder_path(&self, girder: GirderKey, distance: f64) -> Result<f64> {
		Ok(distance + self.start_face_offset(girder.segment(0))?)
	}

	/// Resolves a girder-path location to the segment that owns it: the last
	/// segment whose start support line is at or before the location.
	pub fn locate_on_girder(&self, girder: GirderKey, girder_path: f64) -> Result<SegmentPoint> {
		let count = self.check_girder(girder)?;
		let mut owner = 0;
		let mut owner_start = 0.0;
		let mut next_start = 0.0;
		for index in 1..count {
			next_start += self.geometry.segment_layout_length(girder.segment(index - 1))?;
			if girder_path < next_start {
				break;
			}
			owner = index;
			owner_start = next_start;
		}
		let segment = girder.segment(owner);
		let distance = girder_path - owner_start - self.start_face_offset(segment)?;
		Ok(SegmentPoint::new(segment, distance))
	}

	/// Sum of the girder-path lengths of the same girder line in earlier groups.
	pub fn girder_line_offset(&self, girder: GirderKey) -> Result<f64> {
		self.check_girder(girder)?;
		(0..girder.group).try_fold(0.0, |acc, group| {
			let key = clamp_girder(self.geometry, group, girder.girder)?;
			Ok(acc + self.girder_path_length(key)?)
		})
	}

	pub fn girder_path_to_girder_line(&self, girder: GirderKey, girder_path: f64) -> Result<f64> {
		Ok(girder_path + self.girder_line_offset(girder)?)
	}

	/// Finds the group holding a girder-line location; locations past the end
	/// of the bridge belong to the last group.
	pub fn girder_line_to_girder_path(&self, girder: GirderIndex, girder_line: f64) -> Result<(GirderKey, f64)> {
		let groups = self.geometry.group_count();
		if groups == 0 {
			return Err(GeometryError::GroupOutOfRange(0));
		}
		let mut offset = 0.0;
		for group in 0..groups - 1 {
			let key = clamp_girder(self.geometry, group, girder)?;
			let length = self.girder_path_length(key)?;
			if girder_line < offset + length {
				return Ok((key, girder_line - offset));
			}
			offset += length;
		}
		let key = clamp_girder(self.geometry, groups - 1, girder)?;
		Ok((key, girder_line - offset))
	}

	fn span_girder(&self, span: SpanKey) -> Result<GirderKey> {
		if span.is_wildcard() {
			return Err(GeometryError::SpanOutOfRange(span.span));
		}
		let key = GirderKey::new(group_of_span(self.geometry, span.span)?, span.girder);
		self.check_girder(key)?;
		Ok(key)
	}

	fn span_reference(&self, girder: GirderKey, span: SpanIndex, at_end: bool) -> Result<f64> {
		let (first, last) = self.geometry.group_piers(girder.group)?;
		let pier = if at_end { span + 1 } else { span };
		let pier_line = self.geometry.pier_location(girder, pier)?;
		if !at_end && pier == first {
			return Ok(pier_line + self.geometry.segment_start_bearing_offset(girder.segment(0))?);
		}
		if at_end && pier == last {
			let last_segment = girder.segment(self.check_girder(girder)? - 1);
			return Ok(pier_line - self.geometry.segment_end_bearing_offset(last_segment)?);
		}
		Ok(pier_line)
	}

	/// Girder-path location of the start-of-span reference: CL bearing for the
	/// first span of a group, CL pier otherwise.
	pub fn span_start(&self, span: SpanKey) -> Result<f64> {
		let girder = self.span_girder(span)?;
		self.span_reference(girder, span.span, false)
	}

	/// Girder-path location of the end-of-span reference: CL bearing for the
	/// last span of a group, CL pier otherwise.
	pub fn span_end(&self, span: SpanKey) -> Result<f64> {
		let girder = self.span_girder(span)?;
		self.span_reference(girder, span.span, true)
	}

	/// Finds the span of the girder's group that holds a girder-path location.
	///
	/// Locations within tolerance of an interior span boundary go to the span
	/// selected by `boundary`. Locations before the first span or past the last
	/// one are reported relative to that span.
	pub fn girder_path_to_span(&self, girder: GirderKey, girder_path: f64, boundary: SpanBoundary) -> Result<SpanPoint> {
		self.check_girder(girder)?;
		let (first, last) = self.geometry.group_piers(girder.group)?;
		if first >= last {
			return Err(GeometryError::not_resolved("spans", girder));
		}
		let mut span = first;
		let mut start = self.span_reference(girder, first, false)?;
		for next in first + 1..last {
			let next_start = self.span_reference(girder, next, false)?;
			let on_boundary = is_equal(girder_path, next_start, self.tolerance);
			let beyond = match boundary {
				SpanBoundary::Earlier => girder_path > next_start && !on_boundary,
				SpanBoundary::Later => girder_path > next_start || on_boundary,
			};
			if !beyond {
				break;
			}
			span = next;
			start = next_start;
		}
		Ok(SpanPoint::new(SpanKey::new(span, girder.girder), girder_path - start))
	}

	pub fn span_to_girder_path(&self, point: SpanPoint) -> Result<(GirderKey, f64)> {
		let girder = self.span_girder(point.span)?;
		let start = self.span_reference(girder, point.span.span, false)?;
		Ok((girder, start + point.distance))
	}

	pub fn girder_path_to_bridge_line(&self, girder: GirderKey, girder_path: f64) -> Result<f64> {
		self.check_girder(girder)?;
		let station = self.geometry.girder_path_station(girder, girder_path)?;
		Ok(station - self.geometry.pier_station(0)?)
	}

	/// Finds the group whose pier stations bracket a bridge-line location;
	/// locations past the end of the bridge belong to the last group.
	pub fn bridge_line_to_girder_path(&self, girder: GirderIndex, bridge_line: f64) -> Result<(GirderKey, f64)> {
		let groups = self.geometry.group_count();
		if groups == 0 {
			return Err(GeometryError::GroupOutOfRange(0));
		}
		let station = bridge_line + self.geometry.pier_station(0)?;
		let mut owner = groups - 1;
		for group in 0..groups - 1 {
			let (_, last) = self.geometry.group_piers(group)?;
			if station < self.geometry.pier_station(last)? {
				owner = group;
				break;
			}
		}
		let key = clamp_girder(self.geometry, owner, girder)?;
		Ok((key, self.geometry.station_girder_path(key, station)?))
	}

	pub fn span_point(&self, point: SegmentPoint, boundary: SpanBoundary) -> Result<SpanPoint> {
		let girder_path = self.segment_to_girder_path(point.segment, point.distance)?;
		self.girder_path_to_span(point.segment.girder_key(), girder_path, boundary)
	}

	/// Expresses a segment location in `system`, anchored the way that system requires.
	pub fn express(&self, point: SegmentPoint, system: CoordinateSystem, boundary: SpanBoundary) -> Result<Location> {
		let SegmentPoint { segment, distance } = point;
		let girder = segment.girder_key();
		Ok(match system {
			CoordinateSystem::Segment => {
				self.check_segment(segment)?;
				Location::Segment(segment, distance)
			}
			CoordinateSystem::SegmentPath => Location::SegmentPath(segment, self.segment_to_segment_path(segment, distance)?),
			CoordinateSystem::Girder => Location::Girder(girder, self.segment_to_girder(segment, distance)?),
			CoordinateSystem::GirderPath => Location::GirderPath(girder, self.segment_to_girder_path(segment, distance)?),
			CoordinateSystem::GirderLine => {
				let girder_path = self.segment_to_girder_path(segment, distance)?;
				Location::GirderLine(girder.girder, self.girder_path_to_girder_line(girder, girder_path)?)
			}
			CoordinateSystem::Span => {
				let span = self.span_point(point, boundary)?;
				Location::Span(span.span, span.distance)
			}
			CoordinateSystem::BridgeLine => {
				let girder_path = self.segment_to_girder_path(segment, distance)?;
				Location::BridgeLine(girder.girder, self.girder_path_to_bridge_line(girder, girder_path)?)
			}
		})
	}

	pub fn convert(&self, point: SegmentPoint, system: CoordinateSystem, boundary: SpanBoundary) -> Result<f64> {
		Ok(self.express(point, system, boundary)?.value())
	}

	/// Resolves a location in any system to the segment that owns it.
	pub fn locate(&self, location: Location) -> Result<SegmentPoint> {
		match location {
			Location::Segment(segment, distance) => {
				self.check_segment(segment)?;
				Ok(SegmentPoint::new(segment, distance))
			}
			Location::SegmentPath(segment, value) => Ok(SegmentPoint::new(segment, self.segment_path_to_segment(segment, value)?)),
			Location::Girder(girder, value) => self.locate_on_girder(girder, self.girder_to_girder_path(girder, value)?),
			Location::GirderPath(girder, value) => self.locate_on_girder(girder, value),
			Location::GirderLine(girder, value) => {
				let (key, girder_path) = self.girder_line_to_girder_path(girder, value)?;
				self.locate_on_girder(key, girder_path)
			}
			Location::Span(span, value) => {
				let (key, girder_path) = self.span_to_girder_path(SpanPoint::new(span, value))?;
				self.locate_on_girder(key, girder_path)
			}
			Location::BridgeLine(girder, value) => {
				let (key, girder_path) = self.bridge_line_to_girder_path(girder, value)?;
				self.locate_on_girder(key, girder_path)
			}
		}
	}
}
