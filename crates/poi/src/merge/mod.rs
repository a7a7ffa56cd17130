//! Rules deciding whether two points at the same place become one.
//!
//! A refused merge is not a failure: the registry stores the incoming point as
//! a distinct entry next to the existing one.

use std::cmp::Ordering;

use crate::{PoiAttributes as A, PointOfInterest, Reference, ReferencedAttributes as R};

/// Intrinsic attributes that mark a location the analysis keeps on its own.
const DISTINCT_LOCATIONS: A = A::SUPPORTS
	.union(A::START_FACE)
	.union(A::END_FACE)
	.union(A::STIRRUP_ZONE)
	.union(A::H)
	.union(A::H_1_5)
	.union(A::CLOSURE);

/// Intrinsic attributes that only merge into load-like or tenth points.
const LOAD_LOCATIONS: A = A::CONC_LOAD.union(A::DIAPHRAGM).union(A::HARPING_POINT);

/// Returns true when `incoming` may be unioned into the stored `existing`
/// point. Both points are assumed to be at the same place.
pub fn can_merge(existing: &PointOfInterest, incoming: &PointOfInterest) -> bool {
	if !existing.can_merge() || !incoming.can_merge() {
		return false;
	}
	if existing.covers(incoming) {
		return true;
	}

	let (ea, ia) = (existing.attributes(), incoming.attributes());
	let either = ea | ia;
	let opposed = |x: A, y: A| (ea.contains(x) && ia.contains(y)) || (ea.contains(y) && ia.contains(x));

	if opposed(A::SECTION_CHANGE_LEFT_FACE, A::SECTION_CHANGE_RIGHT_FACE)
		|| opposed(A::DUCT_START, A::DUCT_END)
		|| opposed(A::CASTING_BOUNDARY_START, A::CASTING_BOUNDARY_END)
	{
		return false;
	}

	for reference in Reference::ALL {
		let (ew, iw) = (existing.referenced(reference), incoming.referenced(reference));
		let (eo, io) = (ew.tenth_point_ordinal(), iw.tenth_point_ordinal());
		if eo != 0 && io != 0 && eo != io {
			return false;
		}
		let cantilever = |a: R, b: R| a.contains(R::CANTILEVER) && !b.is_empty() && !b.contains(R::CANTILEVER);
		if cantilever(ew, iw) || cantilever(iw, ew) {
			return false;
		}
	}

	let erected_or_cantilever = |poi: &PointOfInterest| {
		!poi.referenced(Reference::ErectedSegment).is_empty()
			|| Reference::ALL.into_iter().any(|r| poi.referenced(r).contains(R::CANTILEVER))
	};
	if (ea.contains(A::FACE_OF_SUPPORT) && erected_or_cantilever(incoming))
		|| (ia.contains(A::FACE_OF_SUPPORT) && erected_or_cantilever(existing))
	{
		return false;
	}

	if ia.intersects(DISTINCT_LOCATIONS) && !existing.is_any_tenth_point() && !incoming.is_any_tenth_point() {
		return false;
	}

	if ia.intersects(LOAD_LOCATIONS) && !existing.is_any_tenth_point() && !ea.intersects(LOAD_LOCATIONS) {
		return false;
	}

	if either.intersects(A::CRITICAL_SECTION) {
		let partner_ok = |attrs: A| attrs.intersects(A::FACE_OF_SUPPORT | A::CRITICAL_SECTION);
		if (ea.intersects(A::CRITICAL_SECTION) && !partner_ok(ia)) || (ia.intersects(A::CRITICAL_SECTION) && !partner_ok(ea)) {
			return false;
		}
	}

	true
}

/// Order of two points at exactly the same distance.
///
/// Left faces precede right faces, casting-region ends precede starts, duct
/// ends precede starts, and a span's 1.0L precedes the next span's 0.0L.
pub(crate) fn coincident_order(a: &PointOfInterest, b: &PointOfInterest) -> Ordering {
	rank(a).cmp(&rank(b))
}

fn rank(poi: &PointOfInterest) -> [i8; 4] {
	let attrs = poi.attributes();
	let side = |before: A, after: A| {
		if attrs.contains(before) {
			-1
		} else if attrs.contains(after) {
			1
		} else {
			0
		}
	};
	let span = match poi.tenth_point(Reference::Span) {
		11 => -1,
		1 => 1,
		_ => 0,
	};
	[
		side(A::SECTION_CHANGE_LEFT_FACE, A::SECTION_CHANGE_RIGHT_FACE),
		side(A::CASTING_BOUNDARY_END, A::CASTING_BOUNDARY_START),
		side(A::DUCT_END, A::DUCT_START),
		span,
	]
}
