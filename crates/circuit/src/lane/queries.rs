//! `Lane` implementation for the circuit lane.

use std::f64::consts::PI;

use road_api::{
    BranchPointId, GeoPosition, IsoLaneVelocity, Lane, LaneEnd, LaneEndSet, LaneId, LanePosition,
    RBounds, RoadError, Rotation, SegmentId, Which,
};

use super::CircuitLane;

/// Bounds seen from the opposite direction of travel.
fn mirrored(bounds: RBounds) -> RBounds {
    RBounds::new(-bounds.r_max, -bounds.r_min)
}

/// Rotation of the same frame turned to face backwards.
fn turned_around(rotation: Rotation) -> Rotation {
    Rotation::new(-rotation.roll, -rotation.pitch, rotation.yaw + PI)
}

impl Lane for CircuitLane<'_> {
    fn id(&self) -> &LaneId {
        &self.id
    }

    fn segment_id(&self) -> &SegmentId {
        &self.segment_id
    }

    // Only one lane per segment.
    fn index(&self) -> usize {
        0
    }

    fn to_left(&self) -> Option<&LaneId> {
        None
    }

    fn to_right(&self) -> Option<&LaneId> {
        None
    }

    fn length(&self) -> f64 {
        f64::INFINITY
    }

    fn lane_bounds(&self, s: f64) -> Result<RBounds, RoadError> {
        let projection = self.project_to_source(&LanePosition::new(s, 0.0, 0.0))?;
        let source = projection.position;
        let bounds = source.lane.lane_bounds(source.pos.s)?;
        Ok(if projection.is_reversed {
            mirrored(bounds)
        } else {
            bounds
        })
    }

    fn driveable_bounds(&self, s: f64) -> Result<RBounds, RoadError> {
        let projection = self.project_to_source(&LanePosition::new(s, 0.0, 0.0))?;
        let source = projection.position;
        let bounds = source.lane.driveable_bounds(source.pos.s)?;
        Ok(if projection.is_reversed {
            mirrored(bounds)
        } else {
            bounds
        })
    }

    fn to_geo_position(&self, lane_pos: &LanePosition) -> Result<GeoPosition, RoadError> {
        let source = self.project_to_source(lane_pos)?.position;
        source.lane.to_geo_position(&source.pos)
    }

    fn orientation(&self, lane_pos: &LanePosition) -> Result<Rotation, RoadError> {
        let projection = self.project_to_source(lane_pos)?;
        let source = projection.position;
        let rotation = source.lane.orientation(&source.pos)?;
        Ok(if projection.is_reversed {
            turned_around(rotation)
        } else {
            rotation
        })
    }

    fn eval_motion_derivatives(
        &self,
        position: &LanePosition,
        velocity: &IsoLaneVelocity,
    ) -> Result<LanePosition, RoadError> {
        let projection = self.project_to_source(position)?;
        let source = projection.position;
        if !projection.is_reversed {
            return source.lane.eval_motion_derivatives(&source.pos, velocity);
        }
        let source_velocity =
            IsoLaneVelocity::new(-velocity.sigma_v, -velocity.rho_v, velocity.eta_v);
        let source_dot = source
            .lane
            .eval_motion_derivatives(&source.pos, &source_velocity)?;
        Ok(LanePosition::new(-source_dot.s, -source_dot.r, source_dot.h))
    }

    // A circuit lane has no branch points.

    fn branch_point(&self, _which: Which) -> Result<&BranchPointId, RoadError> {
        Err(RoadError::Unsupported {
            operation: "branch_point",
        })
    }

    fn confluent_branches(&self, _which: Which) -> Result<&LaneEndSet, RoadError> {
        Err(RoadError::Unsupported {
            operation: "confluent_branches",
        })
    }

    fn ongoing_branches(&self, _which: Which) -> Result<&LaneEndSet, RoadError> {
        Err(RoadError::Unsupported {
            operation: "ongoing_branches",
        })
    }

    fn default_branch(&self, _which: Which) -> Result<Option<LaneEnd>, RoadError> {
        Err(RoadError::Unsupported {
            operation: "default_branch",
        })
    }
}
