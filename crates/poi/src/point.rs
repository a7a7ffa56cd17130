use girderline_primitives::{PoiId, SegmentKey, is_equal};

use crate::{PoiAttributes, Reference, ReferencedAttributes};

/// A tagged location along one segment.
///
/// Values are plain data: attribute changes produce a new value and the
/// registry owns identity. Coordinates in systems other than the segment's
/// own are derived on demand rather than cached here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfInterest {
	id: Option<PoiId>,
	segment: SegmentKey,
	distance: f64,
	attributes: PoiAttributes,
	referenced: [ReferencedAttributes; Reference::COUNT],
	can_merge: bool,
}

impl PointOfInterest {
	/// A transient, mergeable point with no attributes.
	pub fn new(segment: SegmentKey, distance: f64) -> Self {
		Self {
			id: None,
			segment,
			distance,
			attributes: PoiAttributes::empty(),
			referenced: [ReferencedAttributes::empty(); Reference::COUNT],
			can_merge: true,
		}
	}

	pub fn with_attributes(mut self, attributes: PoiAttributes) -> Self {
		self.attributes |= attributes;
		self
	}

	pub fn with_reference(mut self, reference: Reference, attributes: ReferencedAttributes) -> Self {
		self.referenced[reference.index()] |= attributes;
		self
	}

	/// Tags the point as tenth point `ordinal` (1..=11) of `reference`.
	pub fn with_tenth_point(self, reference: Reference, ordinal: u8) -> Self {
		self.with_reference(reference, ReferencedAttributes::tenth_point(ordinal))
	}

	pub fn with_id(mut self, id: PoiId) -> Self {
		self.id = Some(id);
		self
	}

	/// Marks the point as never merging with another point at the same place.
	pub fn without_merging(mut self) -> Self {
		self.can_merge = false;
		self
	}

	pub fn id(&self) -> Option<PoiId> {
		self.id
	}

	/// Returns true when the point has been stored in a registry.
	pub fn is_stored(&self) -> bool {
		self.id.is_some()
	}

	pub fn segment(&self) -> SegmentKey {
		self.segment
	}

	/// Distance from the start face of the segment.
	pub fn distance(&self) -> f64 {
		self.distance
	}

	pub fn attributes(&self) -> PoiAttributes {
		self.attributes
	}

	pub fn referenced(&self, reference: Reference) -> ReferencedAttributes {
		self.referenced[reference.index()]
	}

	pub fn can_merge(&self) -> bool {
		self.can_merge
	}

	pub fn has_attributes(&self, attributes: PoiAttributes) -> bool {
		self.attributes.contains(attributes)
	}

	/// Tenth-point ordinal relative to `reference`, or 0 when not a tenth point.
	pub fn tenth_point(&self, reference: Reference) -> u8 {
		self.referenced(reference).tenth_point_ordinal()
	}

	pub fn is_tenth_point(&self, reference: Reference) -> bool {
		self.tenth_point(reference) != 0
	}

	/// Returns true when the point is a tenth point of any frame.
	pub fn is_any_tenth_point(&self) -> bool {
		Reference::ALL.into_iter().any(|reference| self.is_tenth_point(reference))
	}

	/// Returns true when every tag of `other` is also carried by this point.
	pub fn covers(&self, other: &Self) -> bool {
		self.attributes.contains(other.attributes)
			&& self.referenced.iter().zip(&other.referenced).all(|(mine, theirs)| mine.contains(*theirs))
	}

	pub fn same_tags(&self, other: &Self) -> bool {
		self.attributes == other.attributes && self.referenced == other.referenced
	}

	/// Returns true when both points are on the same segment within `tolerance`.
	pub fn is_at_same_place(&self, other: &Self, tolerance: f64) -> bool {
		self.segment == other.segment && is_equal(self.distance, other.distance, tolerance)
	}

	pub(crate) fn set_id(&mut self, id: PoiId) {
		self.id = Some(id);
	}

	pub(crate) fn absorb(&mut self, other: &Self) {
		self.attributes |= other.attributes;
		for (mine, theirs) in self.referenced.iter_mut().zip(&other.referenced) {
			*mine |= *theirs;
		}
	}

	/// Report label such as `0.5Ls, HP, FoS`.
	pub fn label(&self) -> String {
		let mut parts = Vec::new();
		for reference in Reference::ALL {
			let word = self.referenced(reference);
			let ordinal = word.tenth_point_ordinal();
			if ordinal != 0 {
				parts.push(format!("{:.1}L{}", f64::from(ordinal - 1) / 10.0, reference.suffix()));
			}
			if word.contains(ReferencedAttributes::PICK_POINT) {
				parts.push("Pick Point".to_owned());
			}
			if word.contains(ReferencedAttributes::BUNK_POINT) {
				parts.push("Bunk Point".to_owned());
			}
		}
		parts.extend(self.attributes.codes().map(str::to_owned));
		parts.join(", ")
	}
}

/// Tenth-point ordinal of subdivision point `index` of `count` along a layout.
///
/// Returns `round(10 * index / count) + 1` (1 for 0.0L through 11 for 1.0L)
/// when `index / count` falls on a tenth, and 0 otherwise.
pub fn tenth_point_ordinal(index: u32, count: u32) -> u8 {
	const TOLERANCE: f64 = 1.0e-6;
	if count == 0 || index > count {
		return 0;
	}
	let fraction = f64::from(index) / f64::from(count);
	let remainder = (fraction + TOLERANCE) % 0.1;
	if remainder <= 2.0 * TOLERANCE || 0.1 - remainder <= 2.0 * TOLERANCE {
		(10.0 * fraction).round() as u8 + 1
	} else {
		0
	}
}
