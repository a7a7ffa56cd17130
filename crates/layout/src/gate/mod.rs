//! Re-entrancy guard for lazy validation.
//!
//! # Purpose
//!
//! Layout is triggered from inside queries, and providers consulted during
//! layout may query again. The gate records which validation phase is in
//! progress so a nested request can be answered from what already exists,
//! or rejected when it needs more than the outer request will produce.
//!
//! # Mental model
//!
//! The gate is a reentrant mutex around "level in progress". The thread that
//! enters first owns the gate for the whole validation; other threads wait.
//! Re-entry from the owning thread never blocks, it only compares levels.
//!
//! # Invariants
//!
//! - A nested request at or below the phase in progress is a no-op.
//!   - Enforced in: [`ValidationGate::enter`]
//!   - Tested by: `gate::tests::nested_request_at_lower_level_is_noop`
//!   - Failure symptom: recursion until the stack overflows.
//! - A nested request above the phase in progress is an error, never a recursion.
//!   - Enforced in: [`ValidationGate::enter`]
//!   - Tested by: `gate::tests::nested_request_above_phase_conflicts`
//!   - Failure symptom: layout reads points that have not been laid out yet.
//! - Dropping a guard restores the level recorded before it, on every exit path.
//!   - Enforced in: `<ValidationGuard as Drop>::drop`
//!   - Tested by: `gate::tests::guard_restores_previous_level`
//!   - Failure symptom: every later request is treated as nested and silently skipped.

use std::cell::Cell;
use std::fmt;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use crate::{LayoutError, Result};

/// Ordered validation phases. Each level implies the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationLevel {
	/// Girder geometry resolved by the bridge description.
	Geometry,
	/// Standard points of interest laid out.
	PointsOfInterest,
	/// Points where loads are applied laid out.
	Loads,
}

impl ValidationLevel {
	pub const ALL: [Self; 3] = [Self::Geometry, Self::PointsOfInterest, Self::Loads];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Geometry => "geometry",
			Self::PointsOfInterest => "points-of-interest",
			Self::Loads => "loads",
		}
	}
}

impl fmt::Display for ValidationLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of [`ValidationGate::enter`].
pub enum GateEntry<'a> {
	/// The caller owns the gate and must run validation while holding the guard.
	Enter(ValidationGuard<'a>),
	/// A validation at `in_progress` is already running on this thread.
	Nested { in_progress: ValidationLevel },
}

#[derive(Default)]
pub struct ValidationGate {
	in_progress: ReentrantMutex<Cell<Option<ValidationLevel>>>,
}

impl ValidationGate {
	pub fn new() -> Self {
		Self::default()
	}

	/// Phase currently in progress, if any thread is validating.
	///
	/// Blocks while another thread owns the gate.
	pub fn in_progress(&self) -> Option<ValidationLevel> {
		self.in_progress.lock().get()
	}

	/// Waits for validation on other threads to finish and keeps new
	/// validations out until the returned guard is dropped.
	pub(crate) fn hold(&self) -> ReentrantMutexGuard<'_, Cell<Option<ValidationLevel>>> {
		self.in_progress.lock()
	}

	/// Requests validation up to `requested`.
	///
	/// A fresh entry starts at [`ValidationLevel::Geometry`]; the owner
	/// raises the guard as each later phase begins.
	pub fn enter(&self, requested: ValidationLevel) -> Result<GateEntry<'_>> {
		let lock = self.in_progress.lock();
		match lock.get() {
			Some(in_progress) if requested <= in_progress => {
				tracing::trace!(requested = requested.as_str(), in_progress = in_progress.as_str(), "gate.nested");
				Ok(GateEntry::Nested { in_progress })
			}
			Some(in_progress) => {
				tracing::error!(
					requested = requested.as_str(),
					in_progress = in_progress.as_str(),
					"gate.reentrant_conflict"
				);
				Err(LayoutError::ReentrantValidationConflict { requested, in_progress })
			}
			None => {
				lock.set(Some(ValidationLevel::Geometry));
				Ok(GateEntry::Enter(ValidationGuard { lock, previous: None }))
			}
		}
	}
}

/// Ownership of the gate for one validation pass.
pub struct ValidationGuard<'a> {
	lock: ReentrantMutexGuard<'a, Cell<Option<ValidationLevel>>>,
	previous: Option<ValidationLevel>,
}

impl ValidationGuard<'_> {
	pub fn level(&self) -> ValidationLevel {
		self.lock.get().unwrap_or(ValidationLevel::Geometry)
	}

	/// Advances the phase in progress. Phases only move forward.
	pub fn raise(&mut self, level: ValidationLevel) {
		debug_assert!(level >= self.level(), "validation phase moved backwards");
		tracing::trace!(level = level.as_str(), "gate.raise");
		self.lock.set(Some(level));
	}
}

impl Drop for ValidationGuard<'_> {
	fn drop(&mut self) {
		debug_assert!(self.lock.get().is_some(), "validation gate released twice");
		self.lock.set(self.previous);
	}
}
