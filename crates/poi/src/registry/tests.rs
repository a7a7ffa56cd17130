use girderline_primitives::{ALL_GIRDERS, ALL_SEGMENTS, GirderKey};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::*;
use crate::{MatchMode, PoiAttributes, Reference, ReferencedAttributes};

const SEG: SegmentKey = SegmentKey::new(0, 0, 0);

fn at(distance: f64) -> PointOfInterest {
	PointOfInterest::new(SEG, distance)
}

fn distances(points: &[PointOfInterest]) -> Vec<f64> {
	points.iter().map(|p| p.distance()).collect()
}

/// Two-girder registry: girder 0 has two segments, girder 1 has one.
#[fixture]
fn populated() -> PoiRegistry {
	let mut registry = PoiRegistry::default();
	let g0 = GirderKey::new(0, 0);
	for (segment, distance, attributes) in [
		(0, 0.0, PoiAttributes::START_FACE),
		(0, 5.0, PoiAttributes::HARPING_POINT),
		(0, 10.0, PoiAttributes::END_FACE),
		(1, 0.0, PoiAttributes::START_FACE),
		(1, 4.0, PoiAttributes::DEBOND),
		(1, 8.0, PoiAttributes::END_FACE),
	] {
		registry
			.add(PointOfInterest::new(g0.segment(segment), distance).with_attributes(attributes))
			.unwrap();
	}
	registry
		.add(PointOfInterest::new(SegmentKey::new(0, 1, 0), 3.0).with_attributes(PoiAttributes::HARPING_POINT))
		.unwrap();
	registry
}

/// Distances one tolerance apart merge; a tenth of a unit apart do not.
#[test]
fn tolerance_merge_scenario() {
	let mut registry = PoiRegistry::new(0.001);
	let a = registry.add(at(5.2995)).unwrap();
	let b = registry.add(at(5.3005)).unwrap();
	assert_eq!(a, b);
	assert_eq!(registry.len(), 1);

	let mut registry = PoiRegistry::new(0.001);
	let a = registry.add(at(5.30)).unwrap();
	let b = registry.add(at(5.40)).unwrap();
	assert_ne!(a, b);
	assert_eq!(registry.len(), 2);
}

/// A merge keeps the first id and distance and unions the tags.
#[test]
fn merge_unions_tags_and_keeps_first_id() {
	let mut registry = PoiRegistry::default();
	let first = registry
		.add(at(2.0).with_attributes(PoiAttributes::DEBOND).with_tenth_point(Reference::ReleasedSegment, 3))
		.unwrap();
	let second = registry.add(at(2.0004).with_attributes(PoiAttributes::PS_TRANSFER)).unwrap();
	assert_eq!(first, second);

	let stored = registry.get(first).unwrap();
	assert_eq!(stored.distance(), 2.0);
	assert_eq!(stored.attributes(), PoiAttributes::DEBOND | PoiAttributes::PS_TRANSFER);
	assert_eq!(stored.tenth_point(Reference::ReleasedSegment), 3);
}

/// Refused merges keep both entries and order left face before right face.
#[test]
fn refused_merge_keeps_distinct_entries() {
	let mut registry = PoiRegistry::default();
	let right = registry.add(at(7.0).with_attributes(PoiAttributes::SECTION_CHANGE_RIGHT_FACE)).unwrap();
	let left = registry.add(at(7.0).with_attributes(PoiAttributes::SECTION_CHANGE_LEFT_FACE)).unwrap();
	assert_ne!(left, right);

	let ids: Vec<_> = registry.points_of_interest(SEG, &PoiQuery::all()).iter().map(|p| p.id()).collect();
	assert_eq!(ids, vec![Some(left), Some(right)]);
	assert_eq!(registry.next(left, &PoiQuery::all()).and_then(|p| p.id()), Some(right));
}

#[test]
fn unmergeable_point_is_stored_separately() {
	let mut registry = PoiRegistry::default();
	let a = registry.add(at(1.0)).unwrap();
	let b = registry.add(at(1.0).without_merging()).unwrap();
	assert_ne!(a, b);
	assert_eq!(registry.len(), 2);
}

/// Points that carry an id keep it, and re-inserting them is idempotent.
#[test]
fn provided_ids_are_preserved() {
	let mut registry = PoiRegistry::default();
	let id = registry.add(at(3.0).with_id(PoiId(40))).unwrap();
	assert_eq!(id, PoiId(40));
	assert_eq!(registry.add(at(3.0).with_id(PoiId(40))).unwrap(), PoiId(40));
	assert_eq!(registry.len(), 1);

	let fresh = registry.add(at(9.0)).unwrap();
	assert_eq!(fresh, PoiId(41));
}

#[test]
fn provided_id_stored_elsewhere_is_rejected() {
	let mut registry = PoiRegistry::default();
	let id = registry.add(at(3.0)).unwrap();
	let err = registry.add(at(8.0).with_id(id)).unwrap_err();
	assert_eq!(err, RegistryError::DuplicateId { id, segment: SEG });
}

#[rstest]
#[case(SegmentKey::new(0, 0, ALL_SEGMENTS))]
#[case(SegmentKey::new(0, ALL_GIRDERS, 0))]
fn wildcard_keys_are_rejected(#[case] key: SegmentKey) {
	let mut registry = PoiRegistry::default();
	assert_eq!(registry.add(PointOfInterest::new(key, 1.0)).unwrap_err(), RegistryError::WildcardKey(key));
	assert!(registry.is_empty());
}

#[test]
fn non_finite_distance_is_rejected() {
	let mut registry = PoiRegistry::default();
	assert_eq!(
		registry.add(at(f64::NAN)).unwrap_err(),
		RegistryError::NonFiniteDistance { segment: SEG }
	);
}

#[rstest]
fn girder_and_bridge_wide_queries(populated: PoiRegistry) {
	let girder = populated.points_of_interest(GirderKey::new(0, 0).into(), &PoiQuery::all());
	assert_eq!(distances(&girder), vec![0.0, 5.0, 10.0, 0.0, 4.0, 8.0]);

	let harping = populated.points_of_interest(
		SegmentKey::new(0, ALL_GIRDERS, ALL_SEGMENTS),
		&PoiQuery::and(PoiAttributes::HARPING_POINT),
	);
	assert_eq!(harping.len(), 2);

	let first_segments = populated.points_of_interest(SegmentKey::new(0, ALL_GIRDERS, 0), &PoiQuery::all());
	assert_eq!(first_segments.len(), 4);
}

#[rstest]
fn traversal_crosses_segments_within_girder(populated: PoiRegistry) {
	let faces = PoiQuery::or(PoiAttributes::START_FACE | PoiAttributes::END_FACE);
	let end0 = populated.points_of_interest(SegmentKey::new(0, 0, 0), &PoiQuery::and(PoiAttributes::END_FACE))[0];
	let id = end0.id().unwrap();

	let next = populated.next(id, &faces).unwrap();
	assert_eq!((next.segment().segment, next.distance()), (1, 0.0));

	let prev = populated.prev(id, &PoiQuery::all()).unwrap();
	assert_eq!(prev.distance(), 5.0);

	let last = populated.points_of_interest(SegmentKey::new(0, 0, 1), &PoiQuery::and(PoiAttributes::END_FACE))[0];
	assert_eq!(populated.next(last.id().unwrap(), &PoiQuery::all()), None);

	let harp = populated.prev(last.id().unwrap(), &PoiQuery::and(PoiAttributes::HARPING_POINT)).unwrap();
	assert_eq!(harp.segment(), SegmentKey::new(0, 0, 0));
}

#[rstest]
fn point_lookup_falls_back_to_transient(populated: PoiRegistry) {
	let seg = SegmentKey::new(0, 0, 0);
	let hit = populated.point_of_interest(seg, 5.0004, 0.001);
	assert!(hit.is_stored());
	assert!(hit.has_attributes(PoiAttributes::HARPING_POINT));

	let miss = populated.point_of_interest(seg, 5.01, 0.001);
	assert!(!miss.is_stored());
	assert_eq!((miss.segment(), miss.distance()), (seg, 5.01));
}

#[rstest]
#[case(-3.0, 0.0)]
#[case(2.4, 0.0)]
#[case(2.6, 5.0)]
#[case(7.6, 10.0)]
#[case(40.0, 10.0)]
fn nearest_always_finds_a_point(populated: PoiRegistry, #[case] distance: f64, #[case] expected: f64) {
	let nearest = populated.nearest(SegmentKey::new(0, 0, 0), distance).unwrap();
	assert_eq!(nearest.distance(), expected);
}

#[test]
fn nearest_on_empty_segment_is_none() {
	assert_eq!(PoiRegistry::default().nearest(SEG, 1.0), None);
}

#[rstest]
fn range_query_is_inclusive(populated: PoiRegistry) {
	let center = PointOfInterest::new(SegmentKey::new(0, 0, 0), 5.0);
	assert_eq!(distances(&populated.points_in_range(5.0, &center, 0.0)), vec![0.0, 5.0]);
	assert_eq!(distances(&populated.points_in_range(1.0, &center, 5.0)), vec![5.0, 10.0]);
}

#[rstest]
fn remove_by_id_and_exact_match(mut populated: PoiRegistry) {
	let before = populated.len();
	let harp = populated.points_of_interest(SegmentKey::new(0, 1, 0), &PoiQuery::all())[0];
	assert!(populated.remove(harp.id().unwrap()).is_some());
	assert_eq!(populated.len(), before - 1);
	assert!(populated.get(harp.id().unwrap()).is_none());

	let debond = PointOfInterest::new(SegmentKey::new(0, 0, 1), 4.0).with_attributes(PoiAttributes::DEBOND);
	assert!(!populated.remove_poi(&debond.with_attributes(PoiAttributes::PS_TRANSFER)));
	assert!(populated.remove_poi(&debond));
	assert_eq!(populated.len(), before - 2);
}

#[rstest]
fn remove_segments_clears_index(mut populated: PoiRegistry) {
	let doomed = populated.points_of_interest(GirderKey::new(0, 0).into(), &PoiQuery::all());
	assert_eq!(populated.remove_segments(GirderKey::new(0, 0).into()), 6);
	assert_eq!(populated.len(), 1);
	for poi in doomed {
		assert!(populated.get(poi.id().unwrap()).is_none());
	}
	populated.remove_all();
	assert!(populated.is_empty());
}

fn attribute_strategy() -> impl Strategy<Value = PoiAttributes> {
	(0u64..(1 << 12)).prop_map(PoiAttributes::from_bits_truncate)
}

proptest! {
	/// Inserting the same point twice stores one entry carrying its tags.
	#[test]
	fn prop_merge_is_idempotent(distance in -10.0f64..40.0, attributes in attribute_strategy(), ordinal in 0u8..12) {
		let mut registry = PoiRegistry::default();
		let poi = at(distance).with_attributes(attributes).with_tenth_point(Reference::Span, ordinal);
		let a = registry.add(poi).unwrap();
		let b = registry.add(poi).unwrap();
		prop_assert_eq!(a, b);
		prop_assert_eq!(registry.len(), 1);
		let stored = registry.get(a).unwrap();
		prop_assert_eq!(stored.attributes(), attributes);
		prop_assert_eq!(stored.referenced(Reference::Span), ReferencedAttributes::tenth_point(ordinal));
	}

	/// AND results are exactly the OR results that carry every queried bit.
	#[test]
	fn prop_and_is_filtered_or(
		points in prop::collection::vec((0.0f64..30.0, attribute_strategy()), 1..40),
		mask in attribute_strategy(),
	) {
		let mut registry = PoiRegistry::default();
		for (distance, attributes) in points {
			registry.add(at(distance).with_attributes(attributes).without_merging()).unwrap();
		}
		let and = registry.points_of_interest(SEG, &PoiQuery::and(mask));
		let or = registry.points_of_interest(SEG, &PoiQuery::or(mask));
		let expected: Vec<_> = or.iter().copied().filter(|p| p.attributes().contains(mask)).collect();
		if mask.is_empty() {
			prop_assert_eq!(and.len(), registry.len());
		} else {
			prop_assert_eq!(and, expected);
		}
	}

	/// Walking with `next` from the first point visits every point once in
	/// non-decreasing distance order.
	#[test]
	fn prop_next_walks_in_distance_order(points in prop::collection::vec(-5.0f64..30.0, 1..50)) {
		let mut registry = PoiRegistry::default();
		for distance in &points {
			registry.add(at(*distance).with_attributes(PoiAttributes::DEBOND)).unwrap();
		}
		let all = PoiQuery::all();
		let mut current = registry.points_of_interest(SEG, &all)[0];
		let mut visited = 1;
		while let Some(next) = registry.next(current.id().unwrap(), &all) {
			prop_assert!(next.distance() >= current.distance());
			current = next;
			visited += 1;
			prop_assert!(visited <= registry.len());
		}
		prop_assert_eq!(visited, registry.len());
	}

	/// Or-mode with an empty mask matches everything.
	#[test]
	fn prop_empty_or_matches_all(points in prop::collection::vec(0.0f64..30.0, 0..20)) {
		let mut registry = PoiRegistry::default();
		for distance in points {
			registry.add(at(distance)).unwrap();
		}
		let query = PoiQuery::all().with_mode(MatchMode::Or);
		prop_assert_eq!(registry.points_of_interest(SEG, &query).len(), registry.len());
	}
}
