//! Tunables for circuit construction and queries.
//!
//! [`CircuitParams`] defaults reproduce the classic behavior: coordinates are
//! only valid inside the single unrolled traversal, and the walk is narrated to
//! the log at debug level.

use serde::{Deserialize, Serialize};

use crate::circuit_error::CircuitError;

/// Suffixes appended to the road id to name the synthesized children.
pub const JUNCTION_ID_SUFFIX: &str = ".junction";
pub const SEGMENT_ID_SUFFIX: &str = ".segment";
pub const LANE_ID_SUFFIX: &str = ".lane";

/// How a circuit lane treats coordinates outside `[0, cycle_length)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateMode {
    /// Out-of-range coordinates are errors, even though the lane reports an
    /// unbounded length.
    #[default]
    Bounded,
    /// Coordinates are reduced modulo `cycle_length` before lookup.
    Wrapped,
}

/// Circuit tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitParams {
    pub coordinate_mode: CoordinateMode,
    /// Forward walk events to `bevy::log` when no observer is supplied.
    pub log_walk: bool,
}

impl Default for CircuitParams {
    fn default() -> Self {
        Self {
            coordinate_mode: CoordinateMode::Bounded,
            log_walk: true,
        }
    }
}

impl CircuitParams {
    pub fn from_json(json: &str) -> Result<Self, CircuitError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn wrapped() -> Self {
        Self {
            coordinate_mode: CoordinateMode::Wrapped,
            ..Self::default()
        }
    }
}
