//! Bridges shared by the agent tests.
#![allow(dead_code)]

use girderline_config::PoiConfig;
use girderline_layout::PoiAgent;
use girderline_model::{BridgeModel, GirderModel, GroupModel, SegmentModel};
use girderline_primitives::{GirderKey, SegmentKey};

pub const GIRDER: GirderKey = GirderKey::new(0, 0);

pub fn seg(segment: u32) -> SegmentKey {
	GIRDER.segment(segment)
}

#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
	assert!((actual - expected).abs() < 1.0e-9, "expected {expected}, got {actual}");
}

/// One simple span of 56 between stations 100 and 156, made of segments of
/// 30 and 25 meeting at a support line at girder path 30.5.
///
/// Segment 0 starts with end distance 0.5 and bearing offset 1.0; segment 1
/// ends the same way.
pub fn two_segment_bridge() -> BridgeModel {
	let girder = GirderModel::new(vec![
		SegmentModel::new(30.0).with_start(0.5, 1.0),
		SegmentModel::new(25.0).with_end(0.5, 1.0),
	]);
	BridgeModel::new(vec![100.0, 156.0], vec![GroupModel::new(0, 1, vec![girder])])
}

/// Spans of 40 and 50 carried by one continuous 89-long segment.
pub fn two_span_bridge() -> BridgeModel {
	let girder = GirderModel::new(vec![SegmentModel::new(89.0).with_start(0.5, 1.0).with_end(0.5, 1.0)]);
	BridgeModel::new(vec![0.0, 40.0, 90.0], vec![GroupModel::new(0, 2, vec![girder])])
}

/// Two simple-span groups of 30; the first group has two girders.
pub fn two_group_bridge() -> BridgeModel {
	let girder = || GirderModel::new(vec![SegmentModel::new(30.0)]);
	BridgeModel::new(
		vec![0.0, 30.0, 60.0],
		vec![GroupModel::new(0, 1, vec![girder(), girder()]), GroupModel::new(1, 2, vec![girder()])],
	)
}

pub fn agent(model: BridgeModel) -> PoiAgent<BridgeModel> {
	PoiAgent::new(model, PoiConfig::default())
}
