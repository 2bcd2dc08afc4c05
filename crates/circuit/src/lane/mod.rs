//! The synthesized lane: one unbounded coordinate laid over an ordered
//! sequence of source-lane traversals.
//!
//! Every query finds the record containing its circuit-s, converts the query
//! into that source lane's frame, delegates, and converts the answer back.

mod queries;


use road_api::{LaneId, LanePosition, RoadError, RoadPosition, SegmentId};

use crate::config::CoordinateMode;
use crate::walk::{Record, Walk, WalkKind};

/// Where a circuit position lands on the source network.
#[derive(Debug, Clone, Copy)]
pub struct SourceProjection<'a> {
    pub record_index: usize,
    pub position: RoadPosition<'a>,
    /// The source lane is traversed against its own increasing-`s` direction.
    pub is_reversed: bool,
}

pub struct CircuitLane<'a> {
    id: LaneId,
    segment_id: SegmentId,
    records: Vec<Record<'a>>,
    cycle_length: f64,
    kind: WalkKind,
    coordinate_mode: CoordinateMode,
}

impl<'a> CircuitLane<'a> {
    pub(crate) fn new(
        id: LaneId,
        segment_id: SegmentId,
        walk: Walk<'a>,
        coordinate_mode: CoordinateMode,
    ) -> Self {
        Self {
            id,
            segment_id,
            records: walk.records,
            cycle_length: walk.cycle_length,
            kind: walk.kind,
            coordinate_mode,
        }
    }

    pub fn records(&self) -> &[Record<'a>] {
        &self.records
    }

    /// Total circuit-s covered by the records.
    pub fn cycle_length(&self) -> f64 {
        self.cycle_length
    }

    pub fn kind(&self) -> WalkKind {
        self.kind
    }

    pub fn coordinate_mode(&self) -> CoordinateMode {
        self.coordinate_mode
    }

    /// Maps a query coordinate into `[0, end of last record)`.
    ///
    /// In `Bounded` mode coordinates outside that range are rejected even
    /// though the lane reports an infinite length; `Wrapped` mode reduces them
    /// modulo the cycle length instead.
    pub fn circuit_s(&self, s: f64) -> Result<f64, RoadError> {
        let max = self
            .records
            .last()
            .map_or(0.0, |record| record.end_circuit_s);
        let out_of_range = RoadError::OutOfRange { s, min: 0.0, max };
        let circuit_s = match self.coordinate_mode {
            CoordinateMode::Bounded => s,
            CoordinateMode::Wrapped if self.cycle_length > 0.0 => {
                let wrapped = s.rem_euclid(self.cycle_length);
                // rem_euclid may round up to the divisor for tiny negative s.
                if wrapped >= self.cycle_length {
                    0.0
                } else {
                    wrapped
                }
            }
            CoordinateMode::Wrapped => return Err(out_of_range),
        };
        if circuit_s >= 0.0 && circuit_s < max {
            Ok(circuit_s)
        } else {
            Err(out_of_range)
        }
    }

    /// Index of the record containing `s`.
    pub fn record_index(&self, s: f64) -> Result<usize, RoadError> {
        let circuit_s = self.circuit_s(s)?;
        self.records
            .iter()
            .position(|record| circuit_s < record.end_circuit_s)
            .ok_or(RoadError::OutOfRange {
                s,
                min: 0.0,
                max: self.cycle_length,
            })
    }

    /// Express a circuit position in the frame of the source lane under it.
    ///
    /// On a reversed record, source-s is measured back from the lane's far
    /// end and the lateral offset flips sign. Height is unchanged.
    pub fn project_to_source(
        &self,
        lane_pos: &LanePosition,
    ) -> Result<SourceProjection<'a>, RoadError> {
        let record_index = self.record_index(lane_pos.s)?;
        let record = &self.records[record_index];
        let s_offset = self.circuit_s(lane_pos.s)? - record.start_circuit_s;
        let source_pos = if record.is_reversed {
            LanePosition::new(record.lane.length() - s_offset, -lane_pos.r, lane_pos.h)
        } else {
            LanePosition::new(s_offset, lane_pos.r, lane_pos.h)
        };
        Ok(SourceProjection {
            record_index,
            position: RoadPosition::new(record.lane, source_pos),
            is_reversed: record.is_reversed,
        })
    }
}
