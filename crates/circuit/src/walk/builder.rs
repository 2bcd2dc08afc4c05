//! Circuit construction: walks a source network's lane/branch-point graph
//! from a starting lane end and unrolls it into an ordered record sequence.

use bevy::log::{info, warn};
use std::collections::BTreeMap;

use road_api::{LaneEnd, LaneId, RoadGeometry, RoadGeometryId, Which};

use crate::circuit_error::CircuitError;
use crate::config::CircuitParams;
use crate::road::InfiniteCircuitRoad;
use crate::road_path::RoadPath;

use super::{LogObserver, Record, Walk, WalkEvent, WalkKind, WalkObserver};

/// Walks a source network into a [`Walk`] (or straight into an
/// [`InfiniteCircuitRoad`]).
///
/// With an explicit path, the walk follows it lane by lane and stops after
/// recording its last lane. Without one, the walk takes the first ongoing
/// branch at every far end and stops when it reaches a lane end it has
/// already recorded.
pub struct CircuitBuilder<'a, 'o> {
    source: &'a dyn RoadGeometry,
    start: LaneEnd,
    path: Vec<LaneId>,
    params: CircuitParams,
    observer: Option<&'o mut dyn WalkObserver>,
}

impl<'a, 'o> CircuitBuilder<'a, 'o> {
    pub fn new(source: &'a dyn RoadGeometry, start: LaneEnd) -> Self {
        Self {
            source,
            start,
            path: Vec::new(),
            params: CircuitParams::default(),
            observer: None,
        }
    }

    /// Start from a parsed road-path description, falling back to the
    /// network's default start when the description names none.
    pub fn from_road_path(
        source: &'a dyn RoadGeometry,
        road_path: &RoadPath,
    ) -> Result<Self, CircuitError> {
        let (start, path) = road_path.resolve(source)?;
        Ok(Self::new(source, start).path(path))
    }

    /// Lanes to enter, in order, after the starting lane.
    pub fn path<I>(mut self, path: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<LaneId>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    pub fn params(mut self, params: CircuitParams) -> Self {
        self.params = params;
        self
    }

    pub fn observer(mut self, observer: &'o mut dyn WalkObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Walk and wrap the result in a road named `id`.
    pub fn build(self, id: RoadGeometryId) -> Result<InfiniteCircuitRoad<'a>, CircuitError> {
        let source = self.source;
        let params = self.params.clone();
        let walk = self.walk()?;
        Ok(InfiniteCircuitRoad::from_walk(id, source, walk, &params))
    }

    /// Perform the walk.
    pub fn walk(mut self) -> Result<Walk<'a>, CircuitError> {
        #[cfg(feature = "trace")]
        let _span = bevy::log::info_span!("circuit_walk").entered();

        let source = self.source;
        let path = std::mem::take(&mut self.path);
        for id in &path {
            source.lane_or_err(id)?;
        }
        let explicit = !path.is_empty();
        let mut remaining = path.iter();

        // Entry lane end of every recorded traversal -> its record index.
        let mut seen: BTreeMap<LaneEnd, usize> = BTreeMap::new();
        let mut records: Vec<Record<'a>> = Vec::new();
        let mut start_s = 0.0;
        let mut current = self.start.clone();

        let repeat = loop {
            let lane = source.lane_or_err(&current.lane)?;
            let length = lane.length();
            seen.insert(current.clone(), records.len());
            self.emit(WalkEvent::LaneRecorded {
                index: records.len(),
                entry: current.clone(),
                length,
                start_circuit_s: start_s,
            });
            records.push(Record {
                lane,
                start_circuit_s: start_s,
                end_circuit_s: start_s + length,
                is_reversed: current.end == Which::Finish,
            });
            start_s += length;

            if explicit && remaining.len() == 0 {
                self.emit(WalkEvent::PathExhausted {
                    records: records.len(),
                });
                break None;
            }

            let exit = current.far_end();
            let branches = lane.ongoing_branches(exit.end)?;
            if branches.is_empty() {
                return Err(CircuitError::DeadEnd {
                    lane: exit.lane,
                    end: exit.end,
                });
            }

            let branch_index = match remaining.next() {
                Some(wanted) => branches.position_of_lane(wanted).ok_or_else(|| {
                    CircuitError::BranchNotFound {
                        wanted: wanted.clone(),
                        lane: exit.lane.clone(),
                        end: exit.end,
                    }
                })?,
                None => {
                    if branches.len() > 1 {
                        warn!(
                            "{} ongoing branches at {exit}; taking branch 0",
                            branches.len()
                        );
                    }
                    0
                }
            };
            let Some(next) = branches.get(branch_index).cloned() else {
                return Err(CircuitError::DeadEnd {
                    lane: exit.lane,
                    end: exit.end,
                });
            };
            self.emit(WalkEvent::BranchTaken {
                exit,
                next: next.clone(),
                branch_index,
                branch_count: branches.len(),
            });
            current = next;

            if !explicit {
                if let Some(&index) = seen.get(&current) {
                    break Some(index);
                }
            }
        };

        let kind = match repeat {
            None => WalkKind::ExplicitPath,
            Some(repeat_index) => {
                // Records before the repeated lane end are a lead-in, not part
                // of the cycle.
                if repeat_index > 0 {
                    records = records.split_off(repeat_index);
                    start_s = remeasure(&mut records);
                }
                self.emit(WalkEvent::CycleClosed {
                    repeat: current,
                    repeat_index,
                    trimmed: repeat_index,
                });
                WalkKind::DetectedCycle
            }
        };

        if self.params.log_walk {
            info!(
                "Circuit walk from {} finished: {} records, cycle length {:.3}",
                self.start,
                records.len(),
                start_s
            );
        }

        Ok(Walk {
            records,
            cycle_length: start_s,
            kind,
        })
    }

    fn emit(&mut self, event: WalkEvent) {
        match self.observer.as_mut() {
            Some(observer) => observer.on_event(&event),
            None if self.params.log_walk => LogObserver.on_event(&event),
            None => {}
        }
    }
}

/// Re-lay records end to end from zero; returns the total length.
fn remeasure(records: &mut [Record<'_>]) -> f64 {
    let mut start_s = 0.0;
    for record in records.iter_mut() {
        record.start_circuit_s = start_s;
        start_s += record.lane.length();
        record.end_circuit_s = start_s;
    }
    start_s
}
