use std::fmt;
use std::str::FromStr;

use girderline_primitives::{GirderIndex, GirderKey, SegmentKey, SpanKey};

/// One-dimensional coordinate systems along a girder, most local first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CoordinateSystem {
	/// From the start face of the segment.
	Segment,
	/// From the support line at the start of the segment.
	SegmentPath,
	/// From the start face of the first segment of the girder.
	Girder,
	/// From the support line at the start of the girder.
	GirderPath,
	/// From the start of the girder in the first group, across groups.
	GirderLine,
	/// From the start-of-span reference (CL bearing, or CL pier at interior continuous piers).
	Span,
	/// From the station of the first pier of the bridge.
	BridgeLine,
}

impl CoordinateSystem {
	pub const ALL: [Self; 7] = [
		Self::Segment,
		Self::SegmentPath,
		Self::Girder,
		Self::GirderPath,
		Self::GirderLine,
		Self::Span,
		Self::BridgeLine,
	];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Segment => "segment",
			Self::SegmentPath => "segment-path",
			Self::Girder => "girder",
			Self::GirderPath => "girder-path",
			Self::GirderLine => "girder-line",
			Self::Span => "span",
			Self::BridgeLine => "bridge-line",
		}
	}
}

impl fmt::Display for CoordinateSystem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for CoordinateSystem {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|system| system.as_str() == s)
			.ok_or_else(|| format!("unknown coordinate system '{s}'"))
	}
}

/// A location expressed in segment coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPoint {
	pub segment: SegmentKey,
	pub distance: f64,
}

impl SegmentPoint {
	pub const fn new(segment: SegmentKey, distance: f64) -> Self {
		Self { segment, distance }
	}
}

/// A location expressed in span coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanPoint {
	pub span: SpanKey,
	pub distance: f64,
}

impl SpanPoint {
	pub const fn new(span: SpanKey, distance: f64) -> Self {
		Self { span, distance }
	}
}

/// Attribution of a location that sits on the boundary between two spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanBoundary {
	/// Report the location at the end of the earlier span.
	#[default]
	Earlier,
	/// Report the location at the start of the later span.
	Later,
}

/// A value in one coordinate system together with the key that anchors it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Location {
	Segment(SegmentKey, f64),
	SegmentPath(SegmentKey, f64),
	Girder(GirderKey, f64),
	GirderPath(GirderKey, f64),
	GirderLine(GirderIndex, f64),
	Span(SpanKey, f64),
	BridgeLine(GirderIndex, f64),
}

impl Location {
	pub const fn system(&self) -> CoordinateSystem {
		match self {
			Self::Segment(..) => CoordinateSystem::Segment,
			Self::SegmentPath(..) => CoordinateSystem::SegmentPath,
			Self::Girder(..) => CoordinateSystem::Girder,
			Self::GirderPath(..) => CoordinateSystem::GirderPath,
			Self::GirderLine(..) => CoordinateSystem::GirderLine,
			Self::Span(..) => CoordinateSystem::Span,
			Self::BridgeLine(..) => CoordinateSystem::BridgeLine,
		}
	}

	pub const fn value(&self) -> f64 {
		match *self {
			Self::Segment(_, x)
			| Self::SegmentPath(_, x)
			| Self::Girder(_, x)
			| Self::GirderPath(_, x)
			| Self::GirderLine(_, x)
			| Self::Span(_, x)
			| Self::BridgeLine(_, x) => x,
		}
	}
}
