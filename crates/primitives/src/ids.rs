use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a point of interest when it is stored in a registry.
///
/// Points that have never been stored carry no id (`Option<PoiId>` is `None`)
/// and are called transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoiId(pub u64);

impl PoiId {
	/// Returns the next id in allocation order.
	pub const fn next(self) -> Self {
		Self(self.0 + 1)
	}
}

impl fmt::Display for PoiId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}
