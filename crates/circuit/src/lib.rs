//! Endless circuit lanes over branching road networks.
//!
//! Unrolls a traversal of a source [`road_api::RoadGeometry`] into a single
//! virtual lane addressed by one ever-increasing coordinate, either along a
//! caller-supplied path or around an auto-detected loop. The result is an
//! [`InfiniteCircuitRoad`] answering the same queries as any physical road.

pub mod circuit_error;
pub mod config;
pub mod lane;
pub mod road;
pub mod road_path;
pub mod walk;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use circuit_error::CircuitError;
pub use config::{CircuitParams, CoordinateMode};
pub use lane::{CircuitLane, SourceProjection};
pub use road::{CircuitJunction, CircuitSegment, InfiniteCircuitRoad};
pub use road_path::{default_start, RoadPath};
pub use walk::{
    CircuitBuilder, EventLog, LogObserver, Record, Walk, WalkEvent, WalkKind, WalkObserver,
};
