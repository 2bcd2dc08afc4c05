//! Value types exchanged with lanes: lane-frame and world-frame positions,
//! rotations, lateral bounds, velocities, and lane-end addressing.

use bevy::math::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::LaneId;
use crate::road_geometry::Lane;

// ---------------------------------------------------------------------------
// Lane ends
// ---------------------------------------------------------------------------

/// Which extremity of a lane.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Which {
    /// The `s == 0` end.
    Start,
    /// The `s == length` end.
    Finish,
}

impl Which {
    /// The other end of the same lane.
    pub fn opposite(self) -> Self {
        match self {
            Which::Start => Which::Finish,
            Which::Finish => Which::Start,
        }
    }
}

impl fmt::Display for Which {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Which::Start => f.write_str("start"),
            Which::Finish => f.write_str("finish"),
        }
    }
}

/// One extremity of one lane.
///
/// Ordered by lane id, then `Start < Finish`, so it can key a `BTreeMap`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LaneEnd {
    pub lane: LaneId,
    pub end: Which,
}

impl LaneEnd {
    pub fn new(lane: impl Into<LaneId>, end: Which) -> Self {
        Self {
            lane: lane.into(),
            end,
        }
    }

    pub fn start(lane: impl Into<LaneId>) -> Self {
        Self::new(lane, Which::Start)
    }

    pub fn finish(lane: impl Into<LaneId>) -> Self {
        Self::new(lane, Which::Finish)
    }

    /// The lane end at the other extremity of the same lane.
    pub fn far_end(&self) -> Self {
        Self {
            lane: self.lane.clone(),
            end: self.end.opposite(),
        }
    }
}

impl fmt::Display for LaneEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.end, self.lane)
    }
}

/// Ordered set of lane ends meeting at one side of a branch point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneEndSet {
    ends: Vec<LaneEnd>,
}

impl LaneEndSet {
    pub fn new(ends: Vec<LaneEnd>) -> Self {
        Self { ends }
    }

    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LaneEnd> {
        self.ends.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LaneEnd> {
        self.ends.iter()
    }

    pub fn contains(&self, end: &LaneEnd) -> bool {
        self.ends.contains(end)
    }

    /// Index of the first entry whose lane is `lane`.
    pub fn position_of_lane(&self, lane: &LaneId) -> Option<usize> {
        self.ends.iter().position(|end| &end.lane == lane)
    }

    pub fn push(&mut self, end: LaneEnd) {
        self.ends.push(end);
    }
}

impl FromIterator<LaneEnd> for LaneEndSet {
    fn from_iter<I: IntoIterator<Item = LaneEnd>>(iter: I) -> Self {
        Self {
            ends: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Positions and frames
// ---------------------------------------------------------------------------

/// A position in a lane's own frame: longitudinal `s`, lateral `r`, height `h`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LanePosition {
    pub s: f64,
    pub r: f64,
    pub h: f64,
}

impl LanePosition {
    pub fn new(s: f64, r: f64, h: f64) -> Self {
        Self { s, r, h }
    }
}

/// A position in the world frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl GeoPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn distance(self, other: GeoPosition) -> f64 {
        self.to_dvec3().distance(other.to_dvec3())
    }
}

impl From<DVec3> for GeoPosition {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Orientation of a lane frame in the world frame, as intrinsic
/// yaw-pitch-roll angles in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Rotation {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Quaternion for the same rotation (yaw about z, then pitch about y,
    /// then roll about x).
    pub fn to_quat(self) -> DQuat {
        DQuat::from_euler(EulerRot::ZYX, self.yaw, self.pitch, self.roll)
    }
}

/// Lateral extent `[r_min, r_max]` at some `s`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RBounds {
    pub r_min: f64,
    pub r_max: f64,
}

impl RBounds {
    pub fn new(r_min: f64, r_max: f64) -> Self {
        Self { r_min, r_max }
    }

    pub fn width(&self) -> f64 {
        self.r_max - self.r_min
    }

    pub fn contains(&self, r: f64) -> bool {
        r >= self.r_min && r <= self.r_max
    }
}

/// Velocity expressed in the lane frame: `sigma_v` along `s`, `rho_v` along
/// `r`, `eta_v` along `h`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoLaneVelocity {
    pub sigma_v: f64,
    pub rho_v: f64,
    pub eta_v: f64,
}

impl IsoLaneVelocity {
    pub fn new(sigma_v: f64, rho_v: f64, eta_v: f64) -> Self {
        Self {
            sigma_v,
            rho_v,
            eta_v,
        }
    }
}

/// A lane-frame position bound to the lane it is expressed in.
#[derive(Clone, Copy)]
pub struct RoadPosition<'a> {
    pub lane: &'a dyn Lane,
    pub pos: LanePosition,
}

impl<'a> RoadPosition<'a> {
    pub fn new(lane: &'a dyn Lane, pos: LanePosition) -> Self {
        Self { lane, pos }
    }
}

impl fmt::Debug for RoadPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadPosition")
            .field("lane", self.lane.id())
            .field("pos", &self.pos)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_lane_end_order_is_lane_then_end() {
        let a_start = LaneEnd::start("a");
        let a_finish = LaneEnd::finish("a");
        let b_start = LaneEnd::start("b");
        assert!(a_start < a_finish);
        assert!(a_finish < b_start);

        let mut seen = BTreeMap::new();
        seen.insert(a_finish.clone(), 1);
        seen.insert(a_start.clone(), 0);
        assert_eq!(seen.get(&LaneEnd::finish("a")), Some(&1));
        assert!(!seen.contains_key(&b_start));
    }

    #[test]
    fn test_far_end_flips_which() {
        let end = LaneEnd::start("lane");
        assert_eq!(end.far_end(), LaneEnd::finish("lane"));
        assert_eq!(end.far_end().far_end(), end);
    }

    #[test]
    fn test_lane_end_set_position_of_lane() {
        let set: LaneEndSet = vec![LaneEnd::start("x"), LaneEnd::finish("y")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.position_of_lane(&LaneId::new("y")), Some(1));
        assert_eq!(set.position_of_lane(&LaneId::new("z")), None);
    }

    #[test]
    fn test_rotation_to_quat_pure_yaw() {
        let q = Rotation::new(0.0, 0.0, std::f64::consts::FRAC_PI_2).to_quat();
        let x = q * DVec3::X;
        assert!((x - DVec3::Y).length() < 1e-12, "got {x:?}");
    }

    #[test]
    fn test_rbounds_width_and_contains() {
        let b = RBounds::new(-2.0, 3.0);
        assert_eq!(b.width(), 5.0);
        assert!(b.contains(0.0));
        assert!(!b.contains(3.5));
    }

    #[test]
    fn test_geo_position_dvec3_conversion() {
        let p = GeoPosition::from(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(p, GeoPosition::new(1.0, 2.0, 3.0));
        assert_eq!(p.distance(GeoPosition::new(1.0, 2.0, 0.0)), 3.0);
    }
}
