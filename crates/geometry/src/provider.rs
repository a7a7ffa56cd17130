use girderline_primitives::{GirderIndex, GirderKey, GroupIndex, PierIndex, SegmentIndex, SegmentKey, SpanIndex, SpanKey};

use crate::{CoordinateTransform, GeometryError, Result};

/// Geometric description of a bridge, supplied by an external model.
///
/// Spans and piers are numbered bridge-wide: span `s` lies between pier `s`
/// and pier `s + 1`. A group is a contiguous run of spans whose girders are
/// continuous; each girder of a group is made of one or more segments laid
/// end to end along the girder path.
///
/// Lengths along a girder are measured in girder-path coordinates, i.e. from
/// the pier line at the start of the girder.
pub trait BridgeGeometry {
	fn group_count(&self) -> GroupIndex;

	fn girder_count(&self, group: GroupIndex) -> Result<GirderIndex>;

	fn segment_count(&self, girder: GirderKey) -> Result<SegmentIndex>;

	fn span_count(&self) -> SpanIndex;

	/// First and last pier bounding `group`.
	fn group_piers(&self, group: GroupIndex) -> Result<(PierIndex, PierIndex)>;

	/// End-face to end-face length of the precast segment.
	fn segment_length(&self, segment: SegmentKey) -> Result<f64>;

	/// Support-line to support-line length of the segment.
	fn segment_layout_length(&self, segment: SegmentKey) -> Result<f64>;

	/// Distance from the start bearing centerline to the start face.
	fn segment_start_end_distance(&self, segment: SegmentKey) -> Result<f64>;

	/// Distance from the end bearing centerline to the end face.
	fn segment_end_end_distance(&self, segment: SegmentKey) -> Result<f64>;

	/// Distance from the start support line to the start bearing centerline.
	fn segment_start_bearing_offset(&self, segment: SegmentKey) -> Result<f64>;

	/// Distance from the end support line to the end bearing centerline.
	fn segment_end_bearing_offset(&self, segment: SegmentKey) -> Result<f64>;

	/// Girder-path coordinate where the pier line crosses the girder.
	fn pier_location(&self, girder: GirderKey, pier: PierIndex) -> Result<f64>;

	/// Alignment station of the pier.
	fn pier_station(&self, pier: PierIndex) -> Result<f64>;

	/// Girder-path coordinates of temporary supports under the girder.
	fn temporary_supports(&self, _girder: GirderKey) -> Result<Vec<f64>> {
		Ok(Vec::new())
	}

	/// Counter that changes whenever the bridge description changes.
	fn generation(&self) -> u64 {
		0
	}

	/// Brings the girder geometry up to date before points are laid out on it.
	fn ensure_girder_geometry(&self, _girder: GirderKey) -> Result<()> {
		Ok(())
	}

	/// CL bearing (or CL pier at interior continuous piers) to the same at
	/// the end of the span, measured along the girder.
	fn span_length(&self, span: SpanKey) -> Result<f64> {
		let transform = CoordinateTransform::new(self, 0.0);
		let start = transform.span_start(span)?;
		let end = transform.span_end(span)?;
		Ok(end - start)
	}

	/// Alignment station of a girder-path coordinate.
	///
	/// Defaults to interpolating linearly between the piers of the group,
	/// extrapolating past the first and last pier.
	fn girder_path_station(&self, girder: GirderKey, girder_path: f64) -> Result<f64> {
		let knots = pier_knots(self, girder)?;
		Ok(interpolate(&knots, girder_path, |k| k.0, |k| k.1))
	}

	/// Inverse of [`BridgeGeometry::girder_path_station`].
	fn station_girder_path(&self, girder: GirderKey, station: f64) -> Result<f64> {
		let knots = pier_knots(self, girder)?;
		Ok(interpolate(&knots, station, |k| k.1, |k| k.0))
	}
}

/// (girder-path location, station) of every pier bounding the girder's group.
fn pier_knots<G: BridgeGeometry + ?Sized>(geometry: &G, girder: GirderKey) -> Result<Vec<(f64, f64)>> {
	let (first, last) = geometry.group_piers(girder.group)?;
	(first..=last)
		.map(|pier| Ok((geometry.pier_location(girder, pier)?, geometry.pier_station(pier)?)))
		.collect()
}

fn interpolate<K>(knots: &[K], x: f64, from: impl Fn(&K) -> f64, to: impl Fn(&K) -> f64) -> f64 {
	match knots {
		[] => x,
		[only] => to(only) + (x - from(only)),
		_ => {
			let idx = knots[1..knots.len() - 1].partition_point(|k| from(k) <= x);
			let (a, b) = (&knots[idx], &knots[idx + 1]);
			let run = from(b) - from(a);
			if run == 0.0 {
				return to(a);
			}
			to(a) + (x - from(a)) * (to(b) - to(a)) / run
		}
	}
}

/// Group that owns `span`.
pub(crate) fn group_of_span<G: BridgeGeometry + ?Sized>(geometry: &G, span: SpanIndex) -> Result<GroupIndex> {
	for group in 0..geometry.group_count() {
		let (first, last) = geometry.group_piers(group)?;
		if (first..last).contains(&span) {
			return Ok(group);
		}
	}
	Err(GeometryError::SpanOutOfRange(span))
}

/// Girder key within `group`, clamped to the last girder when the group has fewer girders.
pub(crate) fn clamp_girder<G: BridgeGeometry + ?Sized>(geometry: &G, group: GroupIndex, girder: GirderIndex) -> Result<GirderKey> {
	let count = geometry.girder_count(group)?;
	if count == 0 {
		return Err(GeometryError::GroupOutOfRange(group));
	}
	if girder >= count {
		tracing::trace!(group, girder, clamped = count - 1, "geometry.clamp_girder");
	}
	Ok(GirderKey::new(group, girder.min(count - 1)))
}
