//! Bridge geometry seen by the point-of-interest engine.
//!
//! [`BridgeGeometry`] is the contract an external bridge model fulfils: segment
//! lengths, end distances, bearing offsets, pier lines, and stations.
//! [`CoordinateTransform`] maps a location between the seven one-dimensional
//! coordinate systems of [`CoordinateSystem`] using only that contract.

mod error;
mod provider;
mod system;
mod transform;

#[cfg(test)]
mod test_fixtures;

pub use error::{GeometryError, Result};
pub use provider::BridgeGeometry;
pub use system::{CoordinateSystem, Location, SegmentPoint, SpanBoundary, SpanPoint};
pub use transform::CoordinateTransform;
