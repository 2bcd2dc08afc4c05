// ---------------------------------------------------------------------------
// CircuitError: failures while building a circuit from a source network
// ---------------------------------------------------------------------------

use std::fmt;

use road_api::{LaneId, RoadError, Which};

/// Errors that can occur while walking a source network into a circuit.
///
/// Every variant is a violated precondition on the input (disconnected graph,
/// invalid path); the builder reports them and never attempts a repair.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitError {
    /// Auto-detection reached a lane end with no ongoing branches.
    DeadEnd { lane: LaneId, end: Which },
    /// The next lane of an explicit path does not continue from `lane`'s `end`.
    BranchNotFound {
        wanted: LaneId,
        lane: LaneId,
        end: Which,
    },
    /// A lane id named by the caller does not exist in the source network.
    UnknownLane(LaneId),
    /// A road-path string could not be parsed.
    PathSyntax(String),
    /// The source network has no lane to start from.
    EmptyNetwork,
    /// `CircuitParams` could not be read.
    InvalidParams(String),
    /// A query against the source network failed.
    Road(RoadError),
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitError::DeadEnd { lane, end } => {
                write!(f, "Dead end: no ongoing branches at {end} end of lane {lane}")
            }
            CircuitError::BranchNotFound { wanted, lane, end } => write!(
                f,
                "Lane {wanted} was not found at {end} end of lane {lane}"
            ),
            CircuitError::UnknownLane(id) => write!(f, "No lane named '{id}'"),
            CircuitError::PathSyntax(msg) => write!(f, "Invalid road path: {msg}"),
            CircuitError::EmptyNetwork => write!(f, "Source network has no lanes"),
            CircuitError::InvalidParams(msg) => write!(f, "Invalid circuit params: {msg}"),
            CircuitError::Road(e) => write!(f, "Road query failed: {e}"),
        }
    }
}

impl std::error::Error for CircuitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CircuitError::Road(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RoadError> for CircuitError {
    fn from(e: RoadError) -> Self {
        match e {
            RoadError::UnknownLane(id) => CircuitError::UnknownLane(id),
            other => CircuitError::Road(other),
        }
    }
}

impl From<serde_json::Error> for CircuitError {
    fn from(e: serde_json::Error) -> Self {
        CircuitError::InvalidParams(e.to_string())
    }
}
