//! The circuit lane wrapped in the standard hierarchy: one road owns one
//! junction, which owns one segment, which owns the lane.

#[cfg(test)]
mod tests;

use road_api::{
    BranchPoint, GeoPosition, Junction, JunctionId, Lane, LaneId, RoadError, RoadGeometry,
    RoadGeometryId, RoadPosition, Segment, SegmentId,
};

use crate::config::{CircuitParams, JUNCTION_ID_SUFFIX, LANE_ID_SUFFIX, SEGMENT_ID_SUFFIX};
use crate::lane::CircuitLane;
use crate::walk::Walk;

pub struct CircuitSegment<'a> {
    id: SegmentId,
    junction_id: JunctionId,
    lane: CircuitLane<'a>,
}

impl Segment for CircuitSegment<'_> {
    fn id(&self) -> &SegmentId {
        &self.id
    }

    fn junction_id(&self) -> &JunctionId {
        &self.junction_id
    }

    fn num_lanes(&self) -> usize {
        1
    }

    fn lane(&self, index: usize) -> Option<&dyn Lane> {
        (index == 0).then_some(&self.lane as &dyn Lane)
    }
}

pub struct CircuitJunction<'a> {
    id: JunctionId,
    road_id: RoadGeometryId,
    segment: CircuitSegment<'a>,
}

impl Junction for CircuitJunction<'_> {
    fn id(&self) -> &JunctionId {
        &self.id
    }

    fn road_geometry_id(&self) -> &RoadGeometryId {
        &self.road_id
    }

    fn num_segments(&self) -> usize {
        1
    }

    fn segment(&self, index: usize) -> Option<&dyn Segment> {
        (index == 0).then_some(&self.segment as &dyn Segment)
    }
}

/// A road geometry with a single endless lane unrolled from `source`.
///
/// Borrows `source` for its whole lifetime; the source network is never
/// modified.
pub struct InfiniteCircuitRoad<'a> {
    id: RoadGeometryId,
    source: &'a dyn RoadGeometry,
    junction: CircuitJunction<'a>,
}

impl<'a> InfiniteCircuitRoad<'a> {
    pub(crate) fn from_walk(
        id: RoadGeometryId,
        source: &'a dyn RoadGeometry,
        walk: Walk<'a>,
        params: &CircuitParams,
    ) -> Self {
        let junction_id = JunctionId::new(format!("{id}{JUNCTION_ID_SUFFIX}"));
        let segment_id = SegmentId::new(format!("{id}{SEGMENT_ID_SUFFIX}"));
        let lane_id = LaneId::new(format!("{id}{LANE_ID_SUFFIX}"));
        let lane = CircuitLane::new(lane_id, segment_id.clone(), walk, params.coordinate_mode);
        Self {
            junction: CircuitJunction {
                id: junction_id.clone(),
                road_id: id.clone(),
                segment: CircuitSegment {
                    id: segment_id,
                    junction_id,
                    lane,
                },
            },
            id,
            source,
        }
    }

    /// The single endless lane.
    pub fn lane(&self) -> &CircuitLane<'a> {
        &self.junction.segment.lane
    }

    pub fn circuit_junction(&self) -> &CircuitJunction<'a> {
        &self.junction
    }

    pub fn circuit_segment(&self) -> &CircuitSegment<'a> {
        &self.junction.segment
    }

    /// The network the circuit was unrolled from.
    pub fn source(&self) -> &'a dyn RoadGeometry {
        self.source
    }
}

impl RoadGeometry for InfiniteCircuitRoad<'_> {
    fn id(&self) -> &RoadGeometryId {
        &self.id
    }

    fn num_junctions(&self) -> usize {
        1
    }

    fn junction(&self, index: usize) -> Option<&dyn Junction> {
        (index == 0).then_some(&self.junction as &dyn Junction)
    }

    fn num_branch_points(&self) -> usize {
        0
    }

    fn branch_point(&self, _index: usize) -> Result<&dyn BranchPoint, RoadError> {
        Err(RoadError::Unsupported {
            operation: "branch_point",
        })
    }

    fn to_road_position(
        &self,
        _geo_pos: &GeoPosition,
        _hint: Option<&RoadPosition<'_>>,
    ) -> Result<RoadPosition<'_>, RoadError> {
        Err(RoadError::Unsupported {
            operation: "to_road_position",
        })
    }

    fn linear_tolerance(&self) -> f64 {
        self.source.linear_tolerance()
    }

    fn angular_tolerance(&self) -> f64 {
        self.source.angular_tolerance()
    }
}
