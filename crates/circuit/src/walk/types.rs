//! Core data structures produced by a walk.

use std::fmt;

use road_api::{Lane, LaneEnd, Which};

/// One traversal of one source lane within the circuit.
///
/// Borrows its source lane; the source network must outlive the circuit.
#[derive(Clone, Copy)]
pub struct Record<'a> {
    pub lane: &'a dyn Lane,
    pub start_circuit_s: f64,
    pub end_circuit_s: f64,
    /// Travel runs against the source lane's increasing-`s` direction.
    pub is_reversed: bool,
}

impl Record<'_> {
    pub fn length(&self) -> f64 {
        self.end_circuit_s - self.start_circuit_s
    }

    /// Whether `circuit_s` lies in `[start_circuit_s, end_circuit_s)`.
    pub fn contains(&self, circuit_s: f64) -> bool {
        circuit_s >= self.start_circuit_s && circuit_s < self.end_circuit_s
    }

    /// The lane end through which this traversal enters its source lane.
    pub fn entry_end(&self) -> LaneEnd {
        let end = if self.is_reversed {
            Which::Finish
        } else {
            Which::Start
        };
        LaneEnd::new(self.lane.id().clone(), end)
    }

    /// The lane end through which this traversal leaves its source lane.
    pub fn exit_end(&self) -> LaneEnd {
        self.entry_end().far_end()
    }
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("lane", self.lane.id())
            .field("start_circuit_s", &self.start_circuit_s)
            .field("end_circuit_s", &self.end_circuit_s)
            .field("is_reversed", &self.is_reversed)
            .finish()
    }
}

/// How the record sequence was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkKind {
    /// Auto-detected: the last record's exit leads back into the first record.
    DetectedCycle,
    /// Followed a caller-supplied path; no cycle is implied.
    ExplicitPath,
}

/// The finished product of a walk.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    pub records: Vec<Record<'a>>,
    pub cycle_length: f64,
    pub kind: WalkKind,
}
