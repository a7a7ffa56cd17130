mod support;

use girderline_config::PoiConfig;
use girderline_geometry::CoordinateSystem;
use girderline_layout::{PoiAgent, ValidationLevel};
use girderline_poi::{PoiQuery, Reference};
use pretty_assertions::assert_eq;
use support::{GIRDER, agent, assert_close, seg, two_segment_bridge};

#[test]
fn generation_change_rebuilds_registry() {
	let mut agent = agent(two_segment_bridge());
	let released = PoiQuery::tenth_points(Reference::ReleasedSegment);

	let before = agent.points_of_interest(seg(0), &released).expect("query");
	assert_close(before[10].distance(), 30.0);

	agent.source_mut().segment_mut(seg(0)).expect("segment").length = 29.0;
	assert_eq!(agent.validation_level(GIRDER), Some(ValidationLevel::PointsOfInterest));

	let after = agent.points_of_interest(seg(0), &released).expect("query");
	assert_eq!(after.len(), 11);
	assert_close(after[10].distance(), 29.0);
}

#[test]
fn memoized_coordinates_follow_geometry_changes() {
	let mut agent = agent(two_segment_bridge());
	let poi = agent.point_of_interest(seg(1), 10.0).expect("lookup");
	assert_close(agent.coordinate(&poi, CoordinateSystem::GirderPath).expect("coordinate"), 40.5);

	agent.source_mut().segment_mut(seg(0)).expect("segment").length = 29.0;

	assert_close(agent.coordinate(&poi, CoordinateSystem::GirderPath).expect("coordinate"), 39.5);
}

#[test]
fn fixing_the_model_clears_the_failure() {
	let mut model = two_segment_bridge();
	model.segment_mut(seg(0)).expect("segment").harp_points = vec![0.2];
	let mut agent = agent(model);

	assert!(agent.points_of_interest(GIRDER.all_segments(), &PoiQuery::all()).is_err());
	assert_eq!(agent.diagnostics().len(), 1);

	agent.source_mut().segment_mut(seg(0)).expect("segment").harp_points = vec![15.0];

	let points = agent.points_of_interest(GIRDER.all_segments(), &PoiQuery::all()).expect("query");
	assert!(!points.is_empty());
	assert!(agent.diagnostics().is_empty());
}

#[tokio::test]
async fn invalidate_retires_registry_in_background() {
	let agent = agent(two_segment_bridge());
	agent.points_of_interest(GIRDER.all_segments(), &PoiQuery::all()).expect("query");
	assert!(agent.stored_len() > 0);

	let retirement = agent.invalidate();
	assert!(retirement.is_background());
	retirement.finished().await;

	assert_eq!(agent.stored_len(), 0);
	assert_eq!(agent.validation_level(GIRDER), None);
	assert!(!agent.points_of_interest(GIRDER.all_segments(), &PoiQuery::all()).expect("query").is_empty());
}

#[test]
fn invalidate_inline_when_background_release_is_off() {
	let config = PoiConfig {
		background_invalidation: false,
		..PoiConfig::default()
	};
	let agent = PoiAgent::new(two_segment_bridge(), config);
	agent.points_of_interest(GIRDER.all_segments(), &PoiQuery::all()).expect("query");

	assert!(!agent.invalidate().is_background());
	assert_eq!(agent.stored_len(), 0);
}
