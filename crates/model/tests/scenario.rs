mod support;

use girderline_geometry::{CoordinateSystem, GeometryError, Location};
use girderline_layout::LayoutError;
use girderline_poi::{PoiAttributes, PoiQuery, PointOfInterest, Reference};
use girderline_primitives::{ALL_SEGMENTS, SegmentKey, SpanKey};
use pretty_assertions::assert_eq;
use rstest::rstest;
use support::{GIRDER, agent, assert_close, seg, two_segment_bridge, two_span_bridge};

#[rstest]
#[case(CoordinateSystem::Segment, 10.0)]
#[case(CoordinateSystem::SegmentPath, 10.0)]
#[case(CoordinateSystem::Girder, 40.0)]
#[case(CoordinateSystem::GirderPath, 40.5)]
#[case(CoordinateSystem::GirderLine, 40.5)]
#[case(CoordinateSystem::Span, 39.5)]
#[case(CoordinateSystem::BridgeLine, 40.5)]
fn second_segment_point_in_every_system(#[case] system: CoordinateSystem, #[case] expected: f64) {
	let agent = agent(two_segment_bridge());
	let poi = PointOfInterest::new(seg(1), 10.0);

	assert_close(agent.coordinate(&poi, system).expect("coordinate"), expected);
}

#[test]
fn every_system_finds_the_same_stored_point() {
	let agent = agent(two_segment_bridge());
	let stored = agent.point_of_interest(seg(1), 10.0).expect("lookup");
	assert!(stored.is_stored(), "released 0.4L of segment 1 should be stored");
	assert_eq!(stored.tenth_point(Reference::ReleasedSegment), 5);

	let found = [
		agent.poi_at_girder_path(GIRDER, 40.5),
		agent.poi_at_girder_coordinate(GIRDER, 40.0),
		agent.poi_at_girder_line(0, 40.5),
		agent.poi_at_bridge_line(0, 40.5),
		agent.poi_at_span_point(SpanKey::new(0, 0), 39.5),
		agent.poi_at(Location::SegmentPath(seg(1), 10.0)),
	];
	for poi in found {
		assert_eq!(poi.expect("lookup").id(), stored.id());
	}
}

#[test]
fn lookup_between_points_is_transient() {
	let agent = agent(two_segment_bridge());
	let poi = agent.point_of_interest(seg(1), 11.3).expect("lookup");

	assert!(!poi.is_stored());
	assert_eq!(poi.segment(), seg(1));
	assert_close(poi.distance(), 11.3);
}

#[test]
fn coordinates_of_stored_points_are_memoized() {
	let agent = agent(two_segment_bridge());
	let poi = agent.point_of_interest(seg(1), 10.0).expect("lookup");

	let first = agent.coordinate(&poi, CoordinateSystem::GirderPath).expect("coordinate");
	let second = agent.coordinate(&poi, CoordinateSystem::GirderPath).expect("coordinate");
	assert_eq!(first.to_bits(), second.to_bits());
	assert_close(first, 40.5);
}

#[test]
fn added_point_merges_within_tolerance() {
	let agent = agent(two_segment_bridge());
	let tenth = agent.point_of_interest(seg(1), 10.0).expect("lookup");

	let id = agent
		.add_point_of_interest(PointOfInterest::new(seg(1), 10.0005).with_attributes(PoiAttributes::DIAPHRAGM))
		.expect("add");

	assert_eq!(Some(id), tenth.id());
	let merged = agent.point_of_interest_by_id(id).expect("stored");
	assert!(merged.has_attributes(PoiAttributes::DIAPHRAGM));
	assert_eq!(merged.tenth_point(Reference::ReleasedSegment), 5);
}

#[test]
fn removed_point_is_gone() {
	let agent = agent(two_segment_bridge());
	let id = agent
		.add_point_of_interest(PointOfInterest::new(seg(0), 13.7).with_attributes(PoiAttributes::BAR_CUTOFF))
		.expect("add");

	assert!(agent.remove_point_of_interest(id).is_some());
	assert!(agent.point_of_interest_by_id(id).is_none());
	assert!(agent.remove_point_of_interest(id).is_none());
}

#[test]
fn traversal_crosses_segments() {
	let agent = agent(two_segment_bridge());
	let released = PoiQuery::tenth_points(Reference::ReleasedSegment);
	let points = agent.points_of_interest(GIRDER.all_segments(), &released).expect("query");
	assert_eq!(points.len(), 22);

	let last_of_first = points[10];
	let first_of_second = points[11];
	assert_eq!(last_of_first.segment(), seg(0));
	assert_eq!(first_of_second.segment(), seg(1));

	let next = last_of_first.id().and_then(|id| agent.next_point_of_interest(id, &released));
	assert_eq!(next.map(|poi| poi.id()), Some(first_of_second.id()));
	let prev = first_of_second.id().and_then(|id| agent.prev_point_of_interest(id, &released));
	assert_eq!(prev.map(|poi| poi.id()), Some(last_of_first.id()));
}

#[test]
fn range_and_nearest_queries() {
	let agent = agent(two_segment_bridge());
	let center = agent.point_of_interest(seg(1), 10.0).expect("lookup");

	let in_range = agent.points_in_range(2.5, &center, 2.5).expect("range");
	let released: Vec<u8> = in_range
		.iter()
		.map(|poi| poi.tenth_point(Reference::ReleasedSegment))
		.filter(|ordinal| *ordinal != 0)
		.collect();
	assert_eq!(released, vec![4, 5, 6]);

	let nearest = agent.nearest_point_of_interest(seg(1), 10.2).expect("nearest");
	assert_eq!(nearest.and_then(|poi| poi.id()), center.id());
}

#[test]
fn wildcard_location_is_rejected() {
	let agent = agent(two_segment_bridge());
	let wildcard = SegmentKey::new(0, 0, ALL_SEGMENTS);

	assert_eq!(
		agent.point_of_interest(wildcard, 1.0).err(),
		Some(LayoutError::Geometry(GeometryError::WildcardKey(wildcard)))
	);
}

#[test]
fn pier_between_spans_keeps_both_tenth_points() {
	let agent = agent(two_span_bridge());
	let points = agent.points_of_interest(GIRDER.all_segments(), &PoiQuery::tenth_points(Reference::Span)).expect("query");
	assert_eq!(points.len(), 22);

	let (end_of_first, start_of_second) = (points[10], points[11]);
	assert_eq!(end_of_first.tenth_point(Reference::Span), 11);
	assert_eq!(start_of_second.tenth_point(Reference::Span), 1);
	assert_close(end_of_first.distance(), 39.5);
	assert_close(start_of_second.distance(), 39.5);

	assert_close(agent.coordinate(&end_of_first, CoordinateSystem::Span).expect("span"), 39.0);
	assert_close(agent.coordinate(&start_of_second, CoordinateSystem::Span).expect("span"), 0.0);
	assert_eq!(agent.span_point(&start_of_second).expect("span point").span, SpanKey::new(1, 0));
	assert_eq!(agent.span_point(&end_of_first).expect("span point").span, SpanKey::new(0, 0));
}
