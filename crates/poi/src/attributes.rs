use std::fmt;

bitflags::bitflags! {
	/// Properties intrinsic to a location, independent of any subdivision frame.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct PoiAttributes: u64 {
		/// Start of a tendon duct.
		const DUCT_START = 1 << 0;
		/// End of a tendon duct.
		const DUCT_END = 1 << 1;
		/// Start of a deck casting region.
		const CASTING_BOUNDARY_START = 1 << 2;
		/// End of a deck casting region.
		const CASTING_BOUNDARY_END = 1 << 3;
		const START_FACE = 1 << 4;
		const END_FACE = 1 << 5;
		/// Boundary between stirrup zones.
		const STIRRUP_ZONE = 1 << 6;
		/// Shear critical section for the first limit state.
		const CRITICAL_SECTION_1 = 1 << 7;
		/// Shear critical section for the second limit state.
		const CRITICAL_SECTION_2 = 1 << 8;
		const HARPING_POINT = 1 << 9;
		/// Location of a concentrated load.
		const CONC_LOAD = 1 << 10;
		const DIAPHRAGM = 1 << 11;
		/// End of the prestress transfer length.
		const PS_TRANSFER = 1 << 12;
		/// End of the prestress development length.
		const PS_DEVELOPMENT = 1 << 13;
		/// Termination of debonding.
		const DEBOND = 1 << 14;
		/// Cutoff of longitudinal deck reinforcement over a pier.
		const DECK_BAR_CUTOFF = 1 << 15;
		/// Cutoff of girder longitudinal reinforcement.
		const BAR_CUTOFF = 1 << 16;
		/// End of girder reinforcement development length.
		const BAR_DEVELOPMENT = 1 << 17;
		/// One girder height from the face of support.
		const H = 1 << 18;
		/// One and a half girder heights from the face of support.
		const H_1_5 = 1 << 19;
		const FACE_OF_SUPPORT = 1 << 20;
		/// Centerline of a closure joint.
		const CLOSURE = 1 << 21;
		/// Gradual change of section.
		const SECTION_CHANGE_TRANSITION = 1 << 22;
		/// Right face of an abrupt section change.
		const SECTION_CHANGE_RIGHT_FACE = 1 << 23;
		/// Left face of an abrupt section change.
		const SECTION_CHANGE_LEFT_FACE = 1 << 24;
		const INTERMEDIATE_TEMP_SUPPORT = 1 << 25;
		const INTERMEDIATE_PIER = 1 << 26;
		/// Pier at the boundary between two groups.
		const BOUNDARY_PIER = 1 << 27;
		const ABUTMENT = 1 << 28;

		const SUPPORTS = Self::INTERMEDIATE_TEMP_SUPPORT.bits()
			| Self::INTERMEDIATE_PIER.bits()
			| Self::BOUNDARY_PIER.bits()
			| Self::ABUTMENT.bits();
		const SECTION_CHANGE = Self::SECTION_CHANGE_TRANSITION.bits()
			| Self::SECTION_CHANGE_RIGHT_FACE.bits()
			| Self::SECTION_CHANGE_LEFT_FACE.bits();
		const DUCT_BOUNDARY = Self::DUCT_START.bits() | Self::DUCT_END.bits();
		const CASTING_BOUNDARY = Self::CASTING_BOUNDARY_START.bits() | Self::CASTING_BOUNDARY_END.bits();
		const CRITICAL_SECTION = Self::CRITICAL_SECTION_1.bits() | Self::CRITICAL_SECTION_2.bits();
	}
}

/// Report codes of intrinsic attributes, in label order.
const ATTRIBUTE_CODES: &[(PoiAttributes, &str)] = &[
	(PoiAttributes::HARPING_POINT, "HP"),
	(PoiAttributes::H, "H"),
	(PoiAttributes::H_1_5, "1.5H"),
	(PoiAttributes::CRITICAL_SECTION, "CS"),
	(PoiAttributes::DIAPHRAGM, "Diaphragm"),
	(PoiAttributes::PS_TRANSFER, "PSXFR"),
	(PoiAttributes::PS_DEVELOPMENT, "Ld"),
	(PoiAttributes::DEBOND, "Debond"),
	(PoiAttributes::DECK_BAR_CUTOFF, "Deck Bar Cutoff"),
	(PoiAttributes::BAR_CUTOFF, "Bar Cutoff"),
	(PoiAttributes::BAR_DEVELOPMENT, "Bar Develop."),
	(PoiAttributes::FACE_OF_SUPPORT, "FoS"),
	(PoiAttributes::CLOSURE, "CJ"),
	(PoiAttributes::SECTION_CHANGE_TRANSITION, "ST"),
	(PoiAttributes::SECTION_CHANGE_RIGHT_FACE, "STRF"),
	(PoiAttributes::SECTION_CHANGE_LEFT_FACE, "STLF"),
	(PoiAttributes::DUCT_START, "DS"),
	(PoiAttributes::DUCT_END, "DE"),
	(PoiAttributes::CASTING_BOUNDARY_START, "SDCR"),
	(PoiAttributes::CASTING_BOUNDARY_END, "EDCR"),
	(PoiAttributes::INTERMEDIATE_PIER, "IP"),
	(PoiAttributes::BOUNDARY_PIER, "BP"),
	(PoiAttributes::ABUTMENT, "Abut"),
	(PoiAttributes::STIRRUP_ZONE, "SZB"),
	(PoiAttributes::INTERMEDIATE_TEMP_SUPPORT, "ITS"),
	(PoiAttributes::CONC_LOAD, "Conc. Load"),
];

impl PoiAttributes {
	/// Short report codes of the attributes in this set.
	pub fn codes(self) -> impl Iterator<Item = &'static str> {
		ATTRIBUTE_CODES
			.iter()
			.filter(move |(flag, _)| self.intersects(*flag))
			.map(|(_, code)| *code)
	}
}

/// Subdivision frame that a referenced attribute word is relative to.
///
/// Variants are listed in construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reference {
	/// The segment as released from its casting bed.
	ReleasedSegment,
	/// The segment hanging from its lifting devices.
	LiftSegment,
	/// The segment resting on its storage supports.
	StorageSegment,
	/// The segment on its hauling bunks.
	HaulSegment,
	/// The segment erected on its permanent bearings.
	ErectedSegment,
	/// The span between piers.
	Span,
}

impl Reference {
	pub const COUNT: usize = 6;

	pub const ALL: [Self; Self::COUNT] = [
		Self::ReleasedSegment,
		Self::LiftSegment,
		Self::StorageSegment,
		Self::HaulSegment,
		Self::ErectedSegment,
		Self::Span,
	];

	pub const fn index(self) -> usize {
		self as usize
	}

	/// Suffix appended to tenth-point labels, e.g. the `r` of `0.5Lr`.
	pub const fn suffix(self) -> &'static str {
		match self {
			Self::ReleasedSegment => "r",
			Self::LiftSegment => "l",
			Self::StorageSegment => "st",
			Self::HaulSegment => "h",
			Self::ErectedSegment => "e",
			Self::Span => "s",
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::ReleasedSegment => "released_segment",
			Self::LiftSegment => "lift_segment",
			Self::StorageSegment => "storage_segment",
			Self::HaulSegment => "haul_segment",
			Self::ErectedSegment => "erected_segment",
			Self::Span => "span",
		}
	}
}

impl fmt::Display for Reference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

bitflags::bitflags! {
	/// Tags relative to one [`Reference`] frame.
	///
	/// The eleven `TENTH_*` bits encode the tenth-point ordinal: a stored
	/// point carries at most one of them per frame. Query masks may carry
	/// several to mean "any of these tenth points".
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct ReferencedAttributes: u32 {
		const TENTH_0L = 1 << 0;
		const TENTH_1L = 1 << 1;
		const TENTH_2L = 1 << 2;
		const TENTH_3L = 1 << 3;
		const TENTH_4L = 1 << 4;
		const TENTH_5L = 1 << 5;
		const TENTH_6L = 1 << 6;
		const TENTH_7L = 1 << 7;
		const TENTH_8L = 1 << 8;
		const TENTH_9L = 1 << 9;
		const TENTH_10L = 1 << 10;
		/// Regular subdivision point that does not fall on a tenth point.
		const SUBDIVISION = 1 << 11;
		/// Point on a cantilevered overhang beyond the frame's supports.
		const CANTILEVER = 1 << 12;
		/// Lifting device location.
		const PICK_POINT = 1 << 13;
		/// Storage or hauling support location.
		const BUNK_POINT = 1 << 14;

		const TENTH_POINTS = (1 << 11) - 1;
	}
}

impl ReferencedAttributes {
	/// Flag for tenth-point `ordinal` (1 for 0.0L through 11 for 1.0L).
	///
	/// Ordinal 0 means "not a tenth point" and yields the empty set.
	pub const fn tenth_point(ordinal: u8) -> Self {
		match ordinal {
			1..=11 => Self::from_bits_retain(1 << (ordinal - 1)),
			_ => Self::empty(),
		}
	}

	/// Tenth-point ordinal (1..=11) carried by this word, or 0 when none.
	pub const fn tenth_point_ordinal(self) -> u8 {
		let tenths = self.bits() & Self::TENTH_POINTS.bits();
		if tenths == 0 { 0 } else { tenths.trailing_zeros() as u8 + 1 }
	}
}
