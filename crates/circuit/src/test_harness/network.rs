//! The test network's hierarchy types and their road geometry trait impls.
//!
//! Every lane sits alone in its own segment and junction. Lane ends are
//! joined through branch points assembled by the builder.

use road_api::{
    BranchPoint, BranchPointId, GeoPosition, IsoLaneVelocity, Junction, JunctionId, Lane,
    LaneEnd, LaneEndSet, LaneId, LanePosition, RBounds, RoadError, RoadGeometry, RoadGeometryId,
    RoadPosition, Rotation, Segment, SegmentId, Which,
};

use super::geometry::LaneGeometry;

/// Slack allowed past either lane end before `s` is rejected.
const S_SLACK: f64 = 1e-9;

/// Branch-point links of one lane end.
#[derive(Debug, Clone)]
pub struct EndLinks {
    pub branch_point: BranchPointId,
    pub confluent: LaneEndSet,
    pub ongoing: LaneEndSet,
}

#[derive(Debug, Clone)]
pub struct TestLane {
    pub(super) id: LaneId,
    pub(super) segment_id: SegmentId,
    pub(super) geometry: LaneGeometry,
    pub(super) lane_bounds: RBounds,
    pub(super) driveable_bounds: RBounds,
    pub(super) start: EndLinks,
    pub(super) finish: EndLinks,
}

impl TestLane {
    pub fn geometry(&self) -> &LaneGeometry {
        &self.geometry
    }

    fn links(&self, which: Which) -> &EndLinks {
        match which {
            Which::Start => &self.start,
            Which::Finish => &self.finish,
        }
    }

    fn check_s(&self, s: f64) -> Result<(), RoadError> {
        let length = self.geometry.length();
        if s >= -S_SLACK && s <= length + S_SLACK {
            Ok(())
        } else {
            Err(RoadError::OutOfRange {
                s,
                min: 0.0,
                max: length,
            })
        }
    }
}

impl Lane for TestLane {
    fn id(&self) -> &LaneId {
        &self.id
    }

    fn segment_id(&self) -> &SegmentId {
        &self.segment_id
    }

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
        self.geometry.length()
    }

    fn lane_bounds(&self, s: f64) -> Result<RBounds, RoadError> {
        self.check_s(s)?;
        Ok(self.lane_bounds)
    }

    fn driveable_bounds(&self, s: f64) -> Result<RBounds, RoadError> {
        self.check_s(s)?;
        Ok(self.driveable_bounds)
    }

    fn to_geo_position(&self, lane_pos: &LanePosition) -> Result<GeoPosition, RoadError> {
        self.check_s(lane_pos.s)?;
        Ok(self.geometry.to_geo(lane_pos))
    }

    fn orientation(&self, lane_pos: &LanePosition) -> Result<Rotation, RoadError> {
        self.check_s(lane_pos.s)?;
        Ok(self.geometry.orientation(lane_pos))
    }

    fn eval_motion_derivatives(
        &self,
        position: &LanePosition,
        velocity: &IsoLaneVelocity,
    ) -> Result<LanePosition, RoadError> {
        self.check_s(position.s)?;
        Ok(self.geometry.motion_derivatives(position, velocity))
    }

    fn branch_point(&self, which: Which) -> Result<&BranchPointId, RoadError> {
        Ok(&self.links(which).branch_point)
    }

    fn confluent_branches(&self, which: Which) -> Result<&LaneEndSet, RoadError> {
        Ok(&self.links(which).confluent)
    }

    fn ongoing_branches(&self, which: Which) -> Result<&LaneEndSet, RoadError> {
        Ok(&self.links(which).ongoing)
    }

    fn default_branch(&self, which: Which) -> Result<Option<LaneEnd>, RoadError> {
        Ok(self.links(which).ongoing.get(0).cloned())
    }
}

#[derive(Debug, Clone)]
pub struct TestSegment {
    pub(super) id: SegmentId,
    pub(super) junction_id: JunctionId,
    pub(super) lanes: Vec<TestLane>,
}

impl Segment for TestSegment {
    fn id(&self) -> &SegmentId {
        &self.id
    }

    fn junction_id(&self) -> &JunctionId {
        &self.junction_id
    }

    fn num_lanes(&self) -> usize {
        self.lanes.len()
    }

    fn lane(&self, index: usize) -> Option<&dyn Lane> {
        self.lanes.get(index).map(|lane| lane as &dyn Lane)
    }
}

#[derive(Debug, Clone)]
pub struct TestJunction {
    pub(super) id: JunctionId,
    pub(super) road_id: RoadGeometryId,
    pub(super) segments: Vec<TestSegment>,
}

impl Junction for TestJunction {
    fn id(&self) -> &JunctionId {
        &self.id
    }

    fn road_geometry_id(&self) -> &RoadGeometryId {
        &self.road_id
    }

    fn num_segments(&self) -> usize {
        self.segments.len()
    }

    fn segment(&self, index: usize) -> Option<&dyn Segment> {
        self.segments.get(index).map(|segment| segment as &dyn Segment)
    }
}

#[derive(Debug, Clone)]
pub struct TestBranchPoint {
    pub(super) id: BranchPointId,
    pub(super) road_id: RoadGeometryId,
    pub(super) a_side: LaneEndSet,
    pub(super) b_side: LaneEndSet,
}

impl BranchPoint for TestBranchPoint {
    fn id(&self) -> &BranchPointId {
        &self.id
    }

    fn road_geometry_id(&self) -> &RoadGeometryId {
        &self.road_id
    }

    fn a_side(&self) -> &LaneEndSet {
        &self.a_side
    }

    fn b_side(&self) -> &LaneEndSet {
        &self.b_side
    }
}

/// An in-memory road network built with [`super::TestRoadBuilder`].
#[derive(Debug, Clone)]
pub struct TestRoad {
    pub(super) id: RoadGeometryId,
    pub(super) junctions: Vec<TestJunction>,
    pub(super) branch_points: Vec<TestBranchPoint>,
    pub(super) linear_tolerance: f64,
    pub(super) angular_tolerance: f64,
}

impl TestRoad {
    /// The concrete lane named `id`, for comparing circuit answers against.
    pub fn test_lane(&self, id: &str) -> Option<&TestLane> {
        self.junctions
            .iter()
            .flat_map(|junction| junction.segments.iter())
            .flat_map(|segment| segment.lanes.iter())
            .find(|lane| lane.id.as_str() == id)
    }
}

impl RoadGeometry for TestRoad {
    fn id(&self) -> &RoadGeometryId {
        &self.id
    }

    fn num_junctions(&self) -> usize {
        self.junctions.len()
    }

    fn junction(&self, index: usize) -> Option<&dyn Junction> {
        self.junctions.get(index).map(|junction| junction as &dyn Junction)
    }

    fn num_branch_points(&self) -> usize {
        self.branch_points.len()
    }

    fn branch_point(&self, index: usize) -> Result<&dyn BranchPoint, RoadError> {
        self.branch_points
            .get(index)
            .map(|bp| bp as &dyn BranchPoint)
            .ok_or(RoadError::IndexOutOfRange {
                what: "branch point",
                index,
                len: self.branch_points.len(),
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
        self.linear_tolerance
    }

    fn angular_tolerance(&self) -> f64 {
        self.angular_tolerance
    }
}
