use crate::{PoiAttributes, PointOfInterest, Reference, ReferencedAttributes};

/// How the terms of a [`PoiQuery`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
	/// Every term must hold.
	#[default]
	And,
	/// At least one term must hold.
	Or,
}

/// Attribute filter applied to stored points of interest.
///
/// A query is a set of terms: each intrinsic bit, each non-tenth-point bit
/// of each frame, and per frame the single term "the point's tenth point is
/// one of the masked ones". A query with no terms matches every point in
/// either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PoiQuery {
	pub attributes: PoiAttributes,
	pub referenced: [ReferencedAttributes; Reference::COUNT],
	pub mode: MatchMode,
}

impl PoiQuery {
	/// Matches every point.
	pub fn all() -> Self {
		Self::default()
	}

	/// Matches points carrying every attribute in `attributes`.
	pub fn and(attributes: PoiAttributes) -> Self {
		Self {
			attributes,
			..Self::default()
		}
	}

	/// Matches points carrying at least one attribute in `attributes`.
	pub fn or(attributes: PoiAttributes) -> Self {
		Self {
			attributes,
			mode: MatchMode::Or,
			..Self::default()
		}
	}

	/// Matches tenth points of `reference`.
	pub fn tenth_points(reference: Reference) -> Self {
		Self::default().with_reference(reference, ReferencedAttributes::TENTH_POINTS)
	}

	pub fn with_reference(mut self, reference: Reference, attributes: ReferencedAttributes) -> Self {
		self.referenced[reference.index()] |= attributes;
		self
	}

	pub fn with_mode(mut self, mode: MatchMode) -> Self {
		self.mode = mode;
		self
	}

	pub fn is_empty(&self) -> bool {
		self.attributes.is_empty() && self.referenced.iter().all(|word| word.is_empty())
	}

	pub fn matches(&self, poi: &PointOfInterest) -> bool {
		let mut terms = self.attributes.bits().count_ones();
		let mut hits = (self.attributes & poi.attributes()).bits().count_ones();

		for reference in Reference::ALL {
			let mask = self.referenced[reference.index()];
			let word = poi.referenced(reference);

			let flags = mask.difference(ReferencedAttributes::TENTH_POINTS);
			terms += flags.bits().count_ones();
			hits += (flags & word).bits().count_ones();

			let tenths = mask & ReferencedAttributes::TENTH_POINTS;
			if !tenths.is_empty() {
				terms += 1;
				hits += u32::from(tenths.intersects(word));
			}
		}

		match self.mode {
			_ if terms == 0 => true,
			MatchMode::And => hits == terms,
			MatchMode::Or => hits > 0,
		}
	}
}
