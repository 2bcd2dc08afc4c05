//! The road geometry hierarchy: a `RoadGeometry` owns junctions, a `Junction`
//! owns segments, a `Segment` owns lanes. Lane ends meet at branch points.
//!
//! Children are reached by index and returned by reference. Parents and
//! siblings are named by id and looked up through the owning geometry, so
//! implementers can store their hierarchy as plain nested collections.

use crate::ids::{BranchPointId, JunctionId, LaneId, RoadGeometryId, SegmentId};
use crate::lane_data::{
    GeoPosition, IsoLaneVelocity, LaneEnd, LaneEndSet, LanePosition, RBounds, RoadPosition,
    Rotation, Which,
};
use crate::road_error::RoadError;

/// A complete road network.
pub trait RoadGeometry {
    fn id(&self) -> &RoadGeometryId;

    fn num_junctions(&self) -> usize;

    fn junction(&self, index: usize) -> Option<&dyn Junction>;

    fn num_branch_points(&self) -> usize;

    fn branch_point(&self, index: usize) -> Result<&dyn BranchPoint, RoadError>;

    /// Finds the road position nearest to `geo_pos`, preferring `hint`'s lane.
    fn to_road_position(
        &self,
        geo_pos: &GeoPosition,
        hint: Option<&RoadPosition<'_>>,
    ) -> Result<RoadPosition<'_>, RoadError>;

    /// Positions closer than this are considered equal.
    fn linear_tolerance(&self) -> f64;

    /// Angles closer than this are considered equal.
    fn angular_tolerance(&self) -> f64;

    /// Looks a lane up by id, walking junctions, segments, then lanes.
    ///
    /// Implementers with an index should override this.
    fn find_lane(&self, id: &LaneId) -> Option<&dyn Lane> {
        (0..self.num_junctions())
            .filter_map(|ji| self.junction(ji))
            .flat_map(|junction| {
                (0..junction.num_segments()).filter_map(move |si| junction.segment(si))
            })
            .flat_map(|segment| (0..segment.num_lanes()).filter_map(move |li| segment.lane(li)))
            .find(|lane| lane.id() == id)
    }

    /// Like [`RoadGeometry::find_lane`], but reports a missing lane as an error.
    fn lane_or_err(&self, id: &LaneId) -> Result<&dyn Lane, RoadError> {
        self.find_lane(id)
            .ok_or_else(|| RoadError::UnknownLane(id.clone()))
    }
}

/// A group of segments that may intersect one another.
pub trait Junction {
    fn id(&self) -> &JunctionId;

    fn road_geometry_id(&self) -> &RoadGeometryId;

    fn num_segments(&self) -> usize;

    fn segment(&self, index: usize) -> Option<&dyn Segment>;
}

/// A bundle of side-by-side lanes sharing one reference curve.
pub trait Segment {
    fn id(&self) -> &SegmentId;

    fn junction_id(&self) -> &JunctionId;

    fn num_lanes(&self) -> usize;

    fn lane(&self, index: usize) -> Option<&dyn Lane>;
}

/// A drivable curve parameterized by `(s, r, h)`.
pub trait Lane {
    fn id(&self) -> &LaneId;

    fn segment_id(&self) -> &SegmentId;

    /// Index of this lane within its segment.
    fn index(&self) -> usize;

    /// The adjacent lane in the `+r` direction, if any.
    fn to_left(&self) -> Option<&LaneId>;

    /// The adjacent lane in the `-r` direction, if any.
    fn to_right(&self) -> Option<&LaneId>;

    /// Length of the lane's reference curve; `f64::INFINITY` for unbounded lanes.
    fn length(&self) -> f64;

    fn lane_bounds(&self, s: f64) -> Result<RBounds, RoadError>;

    fn driveable_bounds(&self, s: f64) -> Result<RBounds, RoadError>;

    fn to_geo_position(&self, lane_pos: &LanePosition) -> Result<GeoPosition, RoadError>;

    fn orientation(&self, lane_pos: &LanePosition) -> Result<Rotation, RoadError>;

    /// Time derivative of `(s, r, h)` for a vehicle at `position` moving with
    /// `velocity`.
    fn eval_motion_derivatives(
        &self,
        position: &LanePosition,
        velocity: &IsoLaneVelocity,
    ) -> Result<LanePosition, RoadError>;

    fn branch_point(&self, which: Which) -> Result<&BranchPointId, RoadError>;

    /// Lane ends on the same side of the branch point as this lane's `which` end.
    fn confluent_branches(&self, which: Which) -> Result<&LaneEndSet, RoadError>;

    /// Lane ends a vehicle can continue into after leaving via `which`.
    fn ongoing_branches(&self, which: Which) -> Result<&LaneEndSet, RoadError>;

    fn default_branch(&self, which: Which) -> Result<Option<LaneEnd>, RoadError>;
}

/// A place where lane ends meet. Ends on the A side flow into the B side and
/// vice versa.
pub trait BranchPoint {
    fn id(&self) -> &BranchPointId;

    fn road_geometry_id(&self) -> &RoadGeometryId;

    fn a_side(&self) -> &LaneEndSet;

    fn b_side(&self) -> &LaneEndSet;
}
