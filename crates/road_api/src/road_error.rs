// ---------------------------------------------------------------------------
// RoadError: failures reported by road geometry queries
// ---------------------------------------------------------------------------

use std::fmt;

use crate::ids::LaneId;

/// Errors a road geometry query can report.
///
/// Physical lanes rarely fail; synthesized lanes fail for coordinates outside
/// the traversal they were built from and for queries they cannot answer.
#[derive(Debug, Clone, PartialEq)]
pub enum RoadError {
    /// A longitudinal coordinate fell outside `[min, max)`.
    OutOfRange { s: f64, min: f64, max: f64 },
    /// A child or branch point index past the end of its collection.
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    /// The implementer has no meaningful answer for this query.
    Unsupported { operation: &'static str },
    /// No lane with this id exists in the geometry.
    UnknownLane(LaneId),
    /// The position cannot be evaluated (e.g. NaN, or on a degenerate lane).
    InvalidPosition(String),
}

impl fmt::Display for RoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoadError::OutOfRange { s, min, max } => {
                write!(f, "Coordinate s={s} is outside [{min}, {max})")
            }
            RoadError::IndexOutOfRange { what, index, len } => {
                write!(f, "No {what} at index {index} (have {len})")
            }
            RoadError::Unsupported { operation } => {
                write!(f, "Unsupported operation: {operation}")
            }
            RoadError::UnknownLane(id) => write!(f, "Unknown lane: {id}"),
            RoadError::InvalidPosition(msg) => write!(f, "Invalid position: {msg}"),
        }
    }
}

impl std::error::Error for RoadError {}
