//! Structured narration of a walk.
//!
//! The builder reports each step to an optional [`WalkObserver`]. Observers
//! only watch; nothing they do can change the walk.

use bevy::log::debug;

use road_api::LaneEnd;

#[derive(Debug, Clone, PartialEq)]
pub enum WalkEvent {
    /// A traversal was appended to the record sequence.
    LaneRecorded {
        index: usize,
        entry: LaneEnd,
        length: f64,
        start_circuit_s: f64,
    },
    /// The walk left `exit` and continued into `next`.
    BranchTaken {
        exit: LaneEnd,
        next: LaneEnd,
        branch_index: usize,
        branch_count: usize,
    },
    /// Auto-detection reached `repeat` a second time.
    CycleClosed {
        repeat: LaneEnd,
        repeat_index: usize,
        trimmed: usize,
    },
    /// Every lane of an explicit path has been recorded.
    PathExhausted { records: usize },
}

pub trait WalkObserver {
    fn on_event(&mut self, event: &WalkEvent);
}

/// Forwards walk events to `bevy::log` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl WalkObserver for LogObserver {
    fn on_event(&mut self, event: &WalkEvent) {
        match event {
            WalkEvent::LaneRecorded {
                index,
                entry,
                length,
                start_circuit_s,
            } => debug!(
                "walk record {index}: lane {} from {} end, length {length:.3}, circuit s {start_circuit_s:.3}",
                entry.lane, entry.end
            ),
            WalkEvent::BranchTaken {
                exit,
                next,
                branch_index,
                branch_count,
            } => debug!(
                "walk branch {branch_index}/{branch_count} at {exit} ---> {next}"
            ),
            WalkEvent::CycleClosed {
                repeat,
                repeat_index,
                trimmed,
            } => debug!(
                "walk closed at {repeat} (record {repeat_index}), trimmed {trimmed} lead-in records"
            ),
            WalkEvent::PathExhausted { records } => {
                debug!("walk path exhausted after {records} records")
            }
        }
    }
}

/// Keeps every event in order. Handy for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<WalkEvent>,
}

impl WalkObserver for EventLog {
    fn on_event(&mut self, event: &WalkEvent) {
        self.events.push(event.clone());
    }
}
