//! Road geometry interface: the identifiers, lane-frame value types, and
//! traits shared by physical road networks and the lanes synthesized on top
//! of them.

pub mod ids;
pub mod lane_data;
pub mod road_error;
pub mod road_geometry;

pub use ids::{BranchPointId, JunctionId, LaneId, RoadGeometryId, SegmentId};
pub use lane_data::{
    GeoPosition, IsoLaneVelocity, LaneEnd, LaneEndSet, LanePosition, RBounds, RoadPosition,
    Rotation, Which,
};
pub use road_error::RoadError;
pub use road_geometry::{BranchPoint, Junction, Lane, RoadGeometry, Segment};
