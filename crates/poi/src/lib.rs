//! Points of interest along girder segments.
//!
//! A [`PointOfInterest`] names a segment, a distance from the segment's start
//! face, and two families of semantic tags: intrinsic [`PoiAttributes`] and
//! per-frame [`ReferencedAttributes`]. [`PoiRegistry`] stores them per segment,
//! merging points that land at the same place, and answers [`PoiQuery`]
//! lookups, nearest-neighbour searches, and ordered traversal.

mod attributes;
mod merge;
mod point;
mod query;
mod registry;

pub use attributes::{PoiAttributes, Reference, ReferencedAttributes};
pub use merge::can_merge;
pub use point::{PointOfInterest, tenth_point_ordinal};
pub use query::{MatchMode, PoiQuery};
pub use registry::{PoiRegistry, RegistryError, Result};
