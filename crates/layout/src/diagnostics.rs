use std::fmt;

use girderline_primitives::{GirderKey, SegmentKey};

/// Status-center entry raised when a girder cannot be laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
	pub girder: GirderKey,
	pub segment: Option<SegmentKey>,
	pub message: String,
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.segment {
			Some(segment) => write!(f, "{segment}: {}", self.message),
			None => write!(f, "{}: {}", self.girder, self.message),
		}
	}
}
