//! Standard point-of-interest layout and the agent that serves queries.
//!
//! [`PoiAgent`] owns the registry for one bridge description. The first
//! request touching a girder lays out that girder's standard points (tenth
//! points, harping points, supports, and the other [`LayoutCategory`] sets)
//! exactly once, under a [`ValidationGate`] that turns re-entrant requests
//! into no-ops or, when they ask for more than is in progress, into a
//! [`LayoutError::ReentrantValidationConflict`].

mod agent;
mod category;
mod diagnostics;
mod error;
mod gate;
mod providers;
mod standard;

pub use agent::{LayoutContext, LayoutExtension, PoiAgent};
pub use category::{CategorySet, LayoutCategory};
pub use diagnostics::Diagnostic;
pub use error::{LayoutError, Result};
pub use gate::{GateEntry, ValidationGate, ValidationGuard, ValidationLevel};
pub use providers::{BeamShape, Duct, GirderDetails, IntervalSchedule, LayoutSource, SectionChange, SegmentEnd, SupportPair};
