use girderline_config::LayoutToggles;
use girderline_primitives::{IntervalIndex, SegmentKey};

use crate::IntervalSchedule;

/// A family of standard points laid out together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutCategory {
	SpanPoints,
	ReleasedSegment,
	ErectedSegment,
	EndFaces,
	HarpingPoints,
	PrestressTransfer,
	Diaphragms,
	ShearZones,
	Lifting,
	Storage,
	Hauling,
	SectionChanges,
	Supports,
	ReinforcementCutoffs,
	CastingBoundaries,
	Tendons,
}

bitflags::bitflags! {
	/// A set of layout categories.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct CategorySet: u32 {
		const SPAN_POINTS = 1 << 0;
		const RELEASED_SEGMENT = 1 << 1;
		const ERECTED_SEGMENT = 1 << 2;
		const END_FACES = 1 << 3;
		const HARPING_POINTS = 1 << 4;
		const PRESTRESS_TRANSFER = 1 << 5;
		const DIAPHRAGMS = 1 << 6;
		const SHEAR_ZONES = 1 << 7;
		const LIFTING = 1 << 8;
		const STORAGE = 1 << 9;
		const HAULING = 1 << 10;
		const SECTION_CHANGES = 1 << 11;
		const SUPPORTS = 1 << 12;
		const REINFORCEMENT_CUTOFFS = 1 << 13;
		const CASTING_BOUNDARIES = 1 << 14;
		const TENDONS = 1 << 15;
	}
}

/// When a category becomes applicable to a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gate {
	Always,
	/// After the interval is reached; `None` when the event is not scheduled.
	At(Option<IntervalIndex>),
}

impl Gate {
	pub(crate) fn is_open(self, current: IntervalIndex) -> bool {
		match self {
			Self::Always => true,
			Self::At(interval) => interval.is_some_and(|interval| interval <= current),
		}
	}

	/// Whether the category can still produce points later in the schedule.
	pub(crate) fn opens_later(self, current: IntervalIndex) -> bool {
		matches!(self, Self::At(Some(interval)) if interval > current)
	}
}

impl LayoutCategory {
	pub const ALL: [Self; 16] = [
		Self::SpanPoints,
		Self::ReleasedSegment,
		Self::ErectedSegment,
		Self::EndFaces,
		Self::HarpingPoints,
		Self::PrestressTransfer,
		Self::Diaphragms,
		Self::ShearZones,
		Self::Lifting,
		Self::Storage,
		Self::Hauling,
		Self::SectionChanges,
		Self::Supports,
		Self::ReinforcementCutoffs,
		Self::CastingBoundaries,
		Self::Tendons,
	];

	pub const fn as_set(self) -> CategorySet {
		match self {
			Self::SpanPoints => CategorySet::SPAN_POINTS,
			Self::ReleasedSegment => CategorySet::RELEASED_SEGMENT,
			Self::ErectedSegment => CategorySet::ERECTED_SEGMENT,
			Self::EndFaces => CategorySet::END_FACES,
			Self::HarpingPoints => CategorySet::HARPING_POINTS,
			Self::PrestressTransfer => CategorySet::PRESTRESS_TRANSFER,
			Self::Diaphragms => CategorySet::DIAPHRAGMS,
			Self::ShearZones => CategorySet::SHEAR_ZONES,
			Self::Lifting => CategorySet::LIFTING,
			Self::Storage => CategorySet::STORAGE,
			Self::Hauling => CategorySet::HAULING,
			Self::SectionChanges => CategorySet::SECTION_CHANGES,
			Self::Supports => CategorySet::SUPPORTS,
			Self::ReinforcementCutoffs => CategorySet::REINFORCEMENT_CUTOFFS,
			Self::CastingBoundaries => CategorySet::CASTING_BOUNDARIES,
			Self::Tendons => CategorySet::TENDONS,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::SpanPoints => "span-points",
			Self::ReleasedSegment => "released-segment",
			Self::ErectedSegment => "erected-segment",
			Self::EndFaces => "end-faces",
			Self::HarpingPoints => "harping-points",
			Self::PrestressTransfer => "prestress-transfer",
			Self::Diaphragms => "diaphragms",
			Self::ShearZones => "shear-zones",
			Self::Lifting => "lifting",
			Self::Storage => "storage",
			Self::Hauling => "hauling",
			Self::SectionChanges => "section-changes",
			Self::Supports => "supports",
			Self::ReinforcementCutoffs => "reinforcement-cutoffs",
			Self::CastingBoundaries => "casting-boundaries",
			Self::Tendons => "tendons",
		}
	}

	pub fn is_enabled(self, toggles: &LayoutToggles) -> bool {
		match self {
			Self::SpanPoints => toggles.span_points,
			Self::ReleasedSegment => toggles.released_segment,
			Self::ErectedSegment => toggles.erected_segment,
			Self::EndFaces => toggles.end_faces,
			Self::HarpingPoints => toggles.harping_points,
			Self::PrestressTransfer => toggles.prestress_transfer,
			Self::Diaphragms => toggles.diaphragms,
			Self::ShearZones => toggles.shear_zones,
			Self::Lifting => toggles.lifting,
			Self::Storage => toggles.storage,
			Self::Hauling => toggles.hauling,
			Self::SectionChanges => toggles.section_changes,
			Self::Supports => toggles.supports,
			Self::ReinforcementCutoffs => toggles.reinforcement_cutoffs,
			Self::CastingBoundaries => toggles.casting_boundaries,
			Self::Tendons => toggles.tendons,
		}
	}

	pub(crate) fn gate<S: IntervalSchedule + ?Sized>(self, schedule: &S, segment: SegmentKey) -> Gate {
		match self {
			Self::ReleasedSegment | Self::HarpingPoints | Self::PrestressTransfer => {
				Gate::At(schedule.prestress_release_interval(segment))
			}
			Self::ErectedSegment => Gate::At(schedule.erect_segment_interval(segment)),
			Self::Lifting => Gate::At(schedule.lift_segment_interval(segment)),
			Self::Storage => Gate::At(schedule.storage_interval(segment)),
			Self::Hauling => Gate::At(schedule.haul_segment_interval(segment)),
			Self::ReinforcementCutoffs | Self::CastingBoundaries => Gate::At(schedule.cast_deck_interval()),
			Self::SpanPoints
			| Self::EndFaces
			| Self::Diaphragms
			| Self::ShearZones
			| Self::SectionChanges
			| Self::Supports
			| Self::Tendons => Gate::Always,
		}
	}
}

impl CategorySet {
	/// Categories switched on by `toggles`.
	pub fn enabled(toggles: &LayoutToggles) -> Self {
		LayoutCategory::ALL.into_iter().filter(|category| category.is_enabled(toggles)).collect()
	}

	pub fn categories(self) -> impl Iterator<Item = LayoutCategory> {
		LayoutCategory::ALL.into_iter().filter(move |category| self.contains(category.as_set()))
	}
}

impl From<LayoutCategory> for CategorySet {
	fn from(category: LayoutCategory) -> Self {
		category.as_set()
	}
}

impl FromIterator<LayoutCategory> for CategorySet {
	fn from_iter<I: IntoIterator<Item = LayoutCategory>>(iter: I) -> Self {
		let mut set = CategorySet::empty();
		for category in iter {
			set |= category.as_set();
		}
		set
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	/// Release 0, lift 1, storage 2, haul 3, erect 4; the deck is never cast.
	struct Precast;

	impl IntervalSchedule for Precast {
		fn current_interval(&self) -> IntervalIndex {
			4
		}

		fn prestress_release_interval(&self, _: SegmentKey) -> Option<IntervalIndex> {
			Some(0)
		}

		fn lift_segment_interval(&self, _: SegmentKey) -> Option<IntervalIndex> {
			Some(1)
		}

		fn storage_interval(&self, _: SegmentKey) -> Option<IntervalIndex> {
			Some(2)
		}

		fn haul_segment_interval(&self, _: SegmentKey) -> Option<IntervalIndex> {
			Some(3)
		}

		fn erect_segment_interval(&self, _: SegmentKey) -> Option<IntervalIndex> {
			Some(4)
		}

		fn cast_deck_interval(&self) -> Option<IntervalIndex> {
			None
		}
	}

	#[rstest]
	#[case(LayoutCategory::SpanPoints, Gate::Always)]
	#[case(LayoutCategory::ReleasedSegment, Gate::At(Some(0)))]
	#[case(LayoutCategory::HarpingPoints, Gate::At(Some(0)))]
	#[case(LayoutCategory::Lifting, Gate::At(Some(1)))]
	#[case(LayoutCategory::Storage, Gate::At(Some(2)))]
	#[case(LayoutCategory::Hauling, Gate::At(Some(3)))]
	#[case(LayoutCategory::ErectedSegment, Gate::At(Some(4)))]
	#[case(LayoutCategory::CastingBoundaries, Gate::At(None))]
	#[case(LayoutCategory::Supports, Gate::Always)]
	fn categories_follow_the_construction_schedule(#[case] category: LayoutCategory, #[case] expected: Gate) {
		assert_eq!(category.gate(&Precast, SegmentKey::new(0, 0, 0)), expected);
	}

	#[test]
	fn every_category_has_a_distinct_flag() {
		let all: CategorySet = LayoutCategory::ALL.into_iter().collect();
		assert_eq!(all, CategorySet::all());
		assert_eq!(all.categories().count(), LayoutCategory::ALL.len());
	}

	#[test]
	fn toggles_select_categories() {
		let toggles = LayoutToggles {
			hauling: false,
			tendons: false,
			..LayoutToggles::default()
		};
		let enabled = CategorySet::enabled(&toggles);
		assert!(!enabled.contains(CategorySet::HAULING));
		assert!(!enabled.contains(CategorySet::TENDONS));
		assert_eq!(enabled.categories().count(), LayoutCategory::ALL.len() - 2);
	}

	#[test]
	fn gates_open_at_their_interval() {
		assert!(Gate::Always.is_open(0));
		assert!(!Gate::At(Some(3)).is_open(2));
		assert!(Gate::At(Some(3)).is_open(3));
		assert!(!Gate::At(None).is_open(u32::MAX));

		assert!(Gate::At(Some(3)).opens_later(2));
		assert!(!Gate::At(None).opens_later(0));
		assert!(!Gate::Always.opens_later(0));
	}
}
