//! Per-segment store of points of interest.
//!
//! # Purpose
//!
//! Owns every stored [`PointOfInterest`] of one bridge-geometry generation,
//! assigns their ids, and answers attribute-filtered and positional queries.
//!
//! # Mental model
//!
//! One sorted bucket per concrete segment. Insertion first looks for a stored
//! point at the same place (same segment, distance within tolerance) that
//! [`can_merge`] accepts; when one exists the incoming tags are unioned into it
//! and its id is returned. Otherwise the point is inserted in order and gets a
//! fresh id from this registry's own counter.
//!
//! # Invariants
//!
//! - Buckets are sorted by distance, then [`coincident_order`], then id.
//!   - Enforced in: `insert_slot`
//!   - Tested by: `registry::tests::prop_next_walks_in_distance_order`
//!   - Failure symptom: traversal skips or revisits points.
//! - Stored points never carry a wildcard segment key.
//!   - Enforced in: [`PoiRegistry::add`]
//!   - Tested by: `registry::tests::wildcard_keys_are_rejected`
//!   - Failure symptom: a point shows up under every girder.
//! - The id index and the buckets hold exactly the same ids.
//!   - Enforced in: [`PoiRegistry::add`], [`PoiRegistry::remove`], [`PoiRegistry::remove_segments`]
//!   - Tested by: `registry::tests::remove_segments_clears_index`
//!   - Failure symptom: `get` returns points that queries no longer report.
//!
//! # Key types
//!
//! | Type | Meaning |
//! | --- | --- |
//! | [`PoiRegistry`] | The store |
//! | [`PoiQuery`] | Attribute filter used by queries and traversal |
//! | [`RegistryError`] | Rejected insertions |

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Included};

use girderline_primitives::{ALL_GIRDERS, ALL_GROUPS, ALL_SEGMENTS, DEFAULT_TOLERANCE, PoiId, ROUNDING_SLACK, SegmentKey, is_equal};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::merge::coincident_order;
use crate::{PointOfInterest, PoiQuery, can_merge};

mod error;

pub use error::{RegistryError, Result};

/// A stored point together with its id.
#[derive(Debug, Clone, Copy)]
struct Slot {
	id: PoiId,
	poi: PointOfInterest,
}

fn slot_order(a: &Slot, b: &Slot) -> Ordering {
	a.poi
		.distance()
		.total_cmp(&b.poi.distance())
		.then_with(|| coincident_order(&a.poi, &b.poi))
		.then_with(|| a.id.cmp(&b.id))
}

fn insert_slot(bucket: &mut Vec<Slot>, slot: Slot) {
	let pos = bucket.partition_point(|s| slot_order(s, &slot) == Ordering::Less);
	bucket.insert(pos, slot);
}

/// Slots of a sorted bucket whose distance lies in `[low, high]`.
fn within(bucket: &[Slot], low: f64, high: f64) -> impl Iterator<Item = (usize, &Slot)> {
	let start = bucket.partition_point(|s| s.poi.distance() < low - ROUNDING_SLACK);
	bucket[start..]
		.iter()
		.enumerate()
		.map(move |(offset, slot)| (start + offset, slot))
		.take_while(move |(_, slot)| slot.poi.distance() <= high + ROUNDING_SLACK)
}

/// Slots at the same place as `distance`.
fn near(bucket: &[Slot], distance: f64, tolerance: f64) -> impl Iterator<Item = (usize, &Slot)> {
	within(bucket, distance - tolerance, distance + tolerance).filter(move |(_, slot)| is_equal(slot.poi.distance(), distance, tolerance))
}

/// Index of the stored point `incoming` should merge into: the closest
/// compatible point at the same place, oldest first on ties.
fn merge_target(bucket: &[Slot], incoming: &PointOfInterest, tolerance: f64) -> Option<usize> {
	let mut candidates: SmallVec<[(usize, f64); 4]> = near(bucket, incoming.distance(), tolerance)
		.map(|(pos, slot)| (pos, (slot.poi.distance() - incoming.distance()).abs()))
		.collect();
	candidates.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| bucket[a.0].id.cmp(&bucket[b.0].id)));
	let target = candidates.iter().map(|&(pos, _)| pos).find(|&pos| can_merge(&bucket[pos].poi, incoming));
	if target.is_none() && !candidates.is_empty() {
		tracing::trace!(
			segment = %incoming.segment(),
			distance = incoming.distance(),
			candidates = candidates.len(),
			"poi.merge_refused"
		);
	}
	target
}

/// Per-segment store of points of interest with tolerance-based merging.
#[derive(Debug, Clone)]
pub struct PoiRegistry {
	tolerance: f64,
	segments: BTreeMap<SegmentKey, Vec<Slot>>,
	index: FxHashMap<PoiId, SegmentKey>,
	next_id: PoiId,
}

impl Default for PoiRegistry {
	fn default() -> Self {
		Self::new(DEFAULT_TOLERANCE)
	}
}

impl PoiRegistry {
	/// Creates an empty registry treating points within `tolerance` as the same place.
	pub fn new(tolerance: f64) -> Self {
		Self {
			tolerance,
			segments: BTreeMap::new(),
			index: FxHashMap::default(),
			next_id: PoiId(0),
		}
	}

	pub fn tolerance(&self) -> f64 {
		self.tolerance
	}

	pub fn len(&self) -> usize {
		self.index.len()
	}

	pub fn is_empty(&self) -> bool {
		self.index.is_empty()
	}

	/// Stores a point, merging it into a compatible point at the same place.
	///
	/// Returns the id of the stored entry: the existing id on merge, the
	/// point's own id when it carries one, or a fresh id otherwise. A point
	/// whose id is already stored at the same place merges into that entry.
	pub fn add(&mut self, poi: PointOfInterest) -> Result<PoiId> {
		let segment = poi.segment();
		if segment.is_wildcard() {
			return Err(RegistryError::WildcardKey(segment));
		}
		if !poi.distance().is_finite() {
			return Err(RegistryError::NonFiniteDistance { segment });
		}

		if let Some(id) = poi.id()
			&& let Some((stored_on, pos)) = self.locate(id)
		{
			let bucket = self.segments.entry(stored_on).or_default();
			if stored_on != segment || !is_equal(bucket[pos].poi.distance(), poi.distance(), self.tolerance) {
				return Err(RegistryError::DuplicateId { id, segment: stored_on });
			}
			absorb(bucket, pos, &poi);
			tracing::trace!(poi = %id, %segment, "poi.reinsert");
			return Ok(id);
		}

		let bucket = self.segments.entry(segment).or_default();
		if let Some(pos) = merge_target(bucket, &poi, self.tolerance) {
			let id = bucket[pos].id;
			absorb(bucket, pos, &poi);
			tracing::trace!(poi = %id, %segment, distance = poi.distance(), "poi.merge");
			return Ok(id);
		}

		let id = match poi.id() {
			Some(id) => {
				self.next_id = self.next_id.max(id.next());
				id
			}
			None => {
				let id = self.next_id;
				self.next_id = id.next();
				id
			}
		};
		let mut stored = poi;
		stored.set_id(id);
		insert_slot(bucket, Slot { id, poi: stored });
		self.index.insert(id, segment);
		tracing::trace!(poi = %id, %segment, distance = poi.distance(), "poi.insert");
		Ok(id)
	}

	/// Removes the entry with `id`.
	pub fn remove(&mut self, id: PoiId) -> Option<PointOfInterest> {
		let segment = self.index.remove(&id)?;
		let bucket = self.segments.get_mut(&segment)?;
		let pos = bucket.iter().position(|slot| slot.id == id)?;
		let slot = bucket.remove(pos);
		if bucket.is_empty() {
			self.segments.remove(&segment);
		}
		Some(slot.poi)
	}

	/// Removes the stored entry exactly matching `poi`: same place and same tags.
	pub fn remove_poi(&mut self, poi: &PointOfInterest) -> bool {
		let tolerance = self.tolerance;
		let target = match poi.id() {
			Some(id) => self
				.get(id)
				.filter(|stored| stored.is_at_same_place(poi, tolerance) && stored.same_tags(poi))
				.map(|_| id),
			None => self.segments.get(&poi.segment()).and_then(|bucket| {
				near(bucket, poi.distance(), tolerance)
					.find(|(_, slot)| slot.poi.same_tags(poi))
					.map(|(_, slot)| slot.id)
			}),
		};
		target.and_then(|id| self.remove(id)).is_some()
	}

	/// Removes every stored point. Ids keep counting from where they were.
	pub fn remove_all(&mut self) {
		self.segments.clear();
		self.index.clear();
	}

	/// Removes every point on the segments covered by `key`, which may hold wildcards.
	pub fn remove_segments(&mut self, key: SegmentKey) -> usize {
		let keys: Vec<SegmentKey> = self.segments.keys().copied().filter(|k| key.matches(*k)).collect();
		let mut removed = 0;
		for segment in keys {
			if let Some(bucket) = self.segments.remove(&segment) {
				removed += bucket.len();
				for slot in bucket {
					self.index.remove(&slot.id);
				}
			}
		}
		tracing::debug!(%key, removed, "poi.remove_segments");
		removed
	}

	pub fn get(&self, id: PoiId) -> Option<&PointOfInterest> {
		let (segment, pos) = self.locate(id)?;
		self.segments.get(&segment).map(|bucket| &bucket[pos].poi)
	}

	/// Every stored point in segment then distance order.
	pub fn iter(&self) -> impl Iterator<Item = &PointOfInterest> {
		self.segments.values().flat_map(|bucket| bucket.iter().map(|slot| &slot.poi))
	}

	/// Stored points on the segments covered by `key` that satisfy `query`,
	/// in segment then distance order.
	pub fn points_of_interest(&self, key: SegmentKey, query: &PoiQuery) -> Vec<PointOfInterest> {
		self.buckets(key)
			.flat_map(|bucket| bucket.iter())
			.filter(|slot| query.matches(&slot.poi))
			.map(|slot| slot.poi)
			.collect()
	}

	/// The stored point closest to `distance` within `tolerance`, or a
	/// transient point carrying just the key and distance.
	pub fn point_of_interest(&self, segment: SegmentKey, distance: f64, tolerance: f64) -> PointOfInterest {
		self.segments
			.get(&segment)
			.and_then(|bucket| {
				near(bucket, distance, tolerance)
					.min_by(|(_, a), (_, b)| (a.poi.distance() - distance).abs().total_cmp(&(b.poi.distance() - distance).abs()))
					.map(|(_, slot)| slot.poi)
			})
			.unwrap_or_else(|| PointOfInterest::new(segment, distance))
	}

	/// The stored point closest to `distance` on `segment`, at any distance.
	pub fn nearest(&self, segment: SegmentKey, distance: f64) -> Option<PointOfInterest> {
		let bucket = self.segments.get(&segment)?;
		let pos = bucket.partition_point(|slot| slot.poi.distance() < distance);
		let before = pos.checked_sub(1).map(|p| &bucket[p]);
		let after = bucket.get(pos);
		match (before, after) {
			(Some(a), Some(b)) if (b.poi.distance() - distance).abs() < (distance - a.poi.distance()).abs() => Some(b.poi),
			(Some(a), _) => Some(a.poi),
			(None, b) => b.map(|slot| slot.poi),
		}
	}

	/// The closest preceding point matching `query`, continuing into earlier
	/// segments of the same girder.
	pub fn prev(&self, id: PoiId, query: &PoiQuery) -> Option<PointOfInterest> {
		let (segment, pos) = self.locate(id)?;
		let first = SegmentKey::new(segment.group, segment.girder, 0);
		let here = self.segments.get(&segment)?;
		here[..pos]
			.iter()
			.rev()
			.chain(self.segments.range(first..segment).rev().flat_map(|(_, bucket)| bucket.iter().rev()))
			.find(|slot| query.matches(&slot.poi))
			.map(|slot| slot.poi)
	}

	/// The closest following point matching `query`, continuing into later
	/// segments of the same girder.
	pub fn next(&self, id: PoiId, query: &PoiQuery) -> Option<PointOfInterest> {
		let (segment, pos) = self.locate(id)?;
		let last = SegmentKey::new(segment.group, segment.girder, ALL_SEGMENTS);
		let here = self.segments.get(&segment)?;
		here[pos + 1..]
			.iter()
			.chain(
				self.segments
					.range((Excluded(segment), Included(last)))
					.flat_map(|(_, bucket)| bucket.iter()),
			)
			.find(|slot| query.matches(&slot.poi))
			.map(|slot| slot.poi)
	}

	/// Stored points on `poi`'s segment within `[poi.distance - low, poi.distance + high]`.
	pub fn points_in_range(&self, low: f64, poi: &PointOfInterest, high: f64) -> Vec<PointOfInterest> {
		let Some(bucket) = self.segments.get(&poi.segment()) else {
			return Vec::new();
		};
		within(bucket, poi.distance() - low, poi.distance() + high).map(|(_, slot)| slot.poi).collect()
	}

	fn locate(&self, id: PoiId) -> Option<(SegmentKey, usize)> {
		let segment = *self.index.get(&id)?;
		let pos = self.segments.get(&segment)?.iter().position(|slot| slot.id == id)?;
		Some((segment, pos))
	}

	fn buckets(&self, key: SegmentKey) -> impl Iterator<Item = &[Slot]> {
		let low = if key.group == ALL_GROUPS {
			SegmentKey::new(0, 0, 0)
		} else if key.girder == ALL_GIRDERS {
			SegmentKey::new(key.group, 0, 0)
		} else {
			SegmentKey::new(key.group, key.girder, 0)
		};
		let high = if key.group == ALL_GROUPS {
			SegmentKey::new(ALL_GROUPS, ALL_GIRDERS, ALL_SEGMENTS)
		} else {
			SegmentKey::new(key.group, key.girder, ALL_SEGMENTS)
		};
		self.segments
			.range(low..=high)
			.filter(move |(segment, _)| key.matches(**segment))
			.map(|(_, bucket)| bucket.as_slice())
	}
}

fn absorb(bucket: &mut Vec<Slot>, pos: usize, incoming: &PointOfInterest) {
	let mut slot = bucket.remove(pos);
	slot.poi.absorb(incoming);
	insert_slot(bucket, slot);
}

#[cfg(test)]
mod tests;
