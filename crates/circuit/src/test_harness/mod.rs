//! # TestRoad: in-memory road network for circuit tests and benches
//!
//! Provides a fluent builder for small networks of line and arc lanes joined
//! at branch points, so tests can construct exactly the graph shape they need
//! (loops, lead-ins, forks, dead ends, reversed lanes) without a road file.

mod geometry;
mod network;

use bevy::math::DVec3;

use road_api::{
    BranchPointId, JunctionId, LaneEnd, LaneEndSet, LaneId, RBounds, RoadGeometryId, Rotation,
    SegmentId, Which,
};

pub use geometry::LaneGeometry;
pub use network::{EndLinks, TestBranchPoint, TestJunction, TestLane, TestRoad, TestSegment};

pub const DEFAULT_LANE_BOUNDS: RBounds = RBounds {
    r_min: -2.0,
    r_max: 2.0,
};
pub const DEFAULT_DRIVEABLE_BOUNDS: RBounds = RBounds {
    r_min: -4.0,
    r_max: 4.0,
};
pub const DEFAULT_LINEAR_TOLERANCE: f64 = 0.01;
pub const DEFAULT_ANGULAR_TOLERANCE: f64 = 0.01 * std::f64::consts::PI / 180.0;

struct LaneSpec {
    id: LaneId,
    geometry: LaneGeometry,
    lane_bounds: RBounds,
    driveable_bounds: RBounds,
}

/// Fluent builder for [`TestRoad`].
pub struct TestRoadBuilder {
    id: RoadGeometryId,
    lanes: Vec<LaneSpec>,
    /// (A side, B side) of each branch point, in creation order.
    branch_points: Vec<(LaneEndSet, LaneEndSet)>,
    linear_tolerance: f64,
    angular_tolerance: f64,
}

impl TestRoad {
    pub fn builder(id: &str) -> TestRoadBuilder {
        TestRoadBuilder {
            id: RoadGeometryId::new(id),
            lanes: Vec::new(),
            branch_points: Vec::new(),
            linear_tolerance: DEFAULT_LINEAR_TOLERANCE,
            angular_tolerance: DEFAULT_ANGULAR_TOLERANCE,
        }
    }

    /// Three 10 m lanes `a -> b -> c -> a` forming an equilateral triangle.
    pub fn triangle() -> TestRoad {
        let h = 10.0 * (std::f64::consts::PI / 3.0).sin();
        TestRoad::builder("triangle")
            .line("a", DVec3::new(0.0, 0.0, 0.0), 0.0, 10.0)
            .line("b", DVec3::new(10.0, 0.0, 0.0), 120f64.to_radians(), 10.0)
            .line("c", DVec3::new(5.0, h, 0.0), 240f64.to_radians(), 10.0)
            .connect(LaneEnd::finish("a"), LaneEnd::start("b"))
            .connect(LaneEnd::finish("b"), LaneEnd::start("c"))
            .connect(LaneEnd::finish("c"), LaneEnd::start("a"))
            .build()
    }

    /// The triangle with `b` laid out backwards (from the top vertex down to
    /// `a`'s finish), banked, and with asymmetric bounds, so the loop drives
    /// it finish to start.
    pub fn reversed_triangle() -> TestRoad {
        let h = 10.0 * (std::f64::consts::PI / 3.0).sin();
        TestRoad::builder("reversed_triangle")
            .line("a", DVec3::new(0.0, 0.0, 0.0), 0.0, 10.0)
            .tilted_line(
                "b",
                DVec3::new(5.0, h, 0.0),
                Rotation::new(0.1, 0.0, -60f64.to_radians()),
                10.0,
            )
            .line("c", DVec3::new(5.0, h, 0.0), 240f64.to_radians(), 10.0)
            .bounds("b", RBounds::new(-2.0, 3.0), RBounds::new(-5.0, 6.0))
            .connect(LaneEnd::finish("a"), LaneEnd::finish("b"))
            .connect(LaneEnd::start("b"), LaneEnd::start("c"))
            .connect(LaneEnd::finish("c"), LaneEnd::start("a"))
            .build()
    }
}

impl TestRoadBuilder {
    // -----------------------------------------------------------------------
    // Lanes
    // -----------------------------------------------------------------------

    /// Flat straight lane from `origin` heading `yaw`.
    pub fn line(self, id: &str, origin: DVec3, yaw: f64, length: f64) -> Self {
        self.tilted_line(id, origin, Rotation::new(0.0, 0.0, yaw), length)
    }

    /// Straight lane with a constant, possibly banked or sloped, frame.
    pub fn tilted_line(self, id: &str, origin: DVec3, rotation: Rotation, length: f64) -> Self {
        self.lane(
            id,
            LaneGeometry::Line {
                origin,
                rotation,
                length,
            },
        )
    }

    /// Flat arc around `center`; positive `d_theta` turns left.
    pub fn arc(self, id: &str, center: DVec3, radius: f64, theta0: f64, d_theta: f64) -> Self {
        self.lane(
            id,
            LaneGeometry::Arc {
                center,
                radius,
                theta0,
                d_theta,
            },
        )
    }

    pub fn lane(mut self, id: &str, geometry: LaneGeometry) -> Self {
        self.lanes.push(LaneSpec {
            id: LaneId::new(id),
            geometry,
            lane_bounds: DEFAULT_LANE_BOUNDS,
            driveable_bounds: DEFAULT_DRIVEABLE_BOUNDS,
        });
        self
    }

    /// Override the bounds of an already-added lane.
    pub fn bounds(mut self, id: &str, lane_bounds: RBounds, driveable_bounds: RBounds) -> Self {
        if let Some(spec) = self.lanes.iter_mut().find(|spec| spec.id.as_str() == id) {
            spec.lane_bounds = lane_bounds;
            spec.driveable_bounds = driveable_bounds;
        }
        self
    }

    pub fn tolerances(mut self, linear: f64, angular: f64) -> Self {
        self.linear_tolerance = linear;
        self.angular_tolerance = angular;
        self
    }

    // -----------------------------------------------------------------------
    // Connectivity
    // -----------------------------------------------------------------------

    /// Join two lane ends so traffic leaving through either continues into the
    /// other. Ends already at a branch point join that branch point, on the
    /// side opposite their partner; the ongoing order is connection order.
    pub fn connect(mut self, a: LaneEnd, b: LaneEnd) -> Self {
        let slot = self.branch_points.iter().position(|(side_a, side_b)| {
            side_a.contains(&a) || side_b.contains(&a) || side_a.contains(&b) || side_b.contains(&b)
        });
        match slot {
            Some(index) => {
                let (side_a, side_b) = &mut self.branch_points[index];
                if side_b.contains(&a) || side_a.contains(&b) {
                    push_unique(side_b, a);
                    push_unique(side_a, b);
                } else {
                    push_unique(side_a, a);
                    push_unique(side_b, b);
                }
            }
            None => self
                .branch_points
                .push((LaneEndSet::new(vec![a]), LaneEndSet::new(vec![b]))),
        }
        self
    }

    pub fn build(self) -> TestRoad {
        let mut branch_points = self.branch_points;
        let mut junctions = Vec::with_capacity(self.lanes.len());

        for spec in self.lanes {
            let start = end_links(&mut branch_points, LaneEnd::new(spec.id.clone(), Which::Start));
            let finish =
                end_links(&mut branch_points, LaneEnd::new(spec.id.clone(), Which::Finish));
            let junction_id = JunctionId::new(format!("j:{}", spec.id));
            let segment_id = SegmentId::new(format!("s:{}", spec.id));
            let lane = TestLane {
                id: spec.id,
                segment_id: segment_id.clone(),
                geometry: spec.geometry,
                lane_bounds: spec.lane_bounds,
                driveable_bounds: spec.driveable_bounds,
                start,
                finish,
            };
            junctions.push(TestJunction {
                id: junction_id.clone(),
                road_id: self.id.clone(),
                segments: vec![TestSegment {
                    id: segment_id,
                    junction_id,
                    lanes: vec![lane],
                }],
            });
        }

        let branch_points = branch_points
            .into_iter()
            .enumerate()
            .map(|(index, (a_side, b_side))| TestBranchPoint {
                id: BranchPointId::new(format!("bp:{index}")),
                road_id: self.id.clone(),
                a_side,
                b_side,
            })
            .collect();

        TestRoad {
            id: self.id,
            junctions,
            branch_points,
            linear_tolerance: self.linear_tolerance,
            angular_tolerance: self.angular_tolerance,
        }
    }
}

fn push_unique(set: &mut LaneEndSet, end: LaneEnd) {
    if !set.contains(&end) {
        set.push(end);
    }
}

/// Links for `end`, giving unconnected ends a branch point of their own.
fn end_links(branch_points: &mut Vec<(LaneEndSet, LaneEndSet)>, end: LaneEnd) -> EndLinks {
    let found = branch_points.iter().enumerate().find_map(|(index, (a, b))| {
        if a.contains(&end) {
            Some((index, a.clone(), b.clone()))
        } else if b.contains(&end) {
            Some((index, b.clone(), a.clone()))
        } else {
            None
        }
    });
    let (index, confluent, ongoing) = match found {
        Some(links) => links,
        None => {
            branch_points.push((LaneEndSet::new(vec![end.clone()]), LaneEndSet::default()));
            (
                branch_points.len() - 1,
                LaneEndSet::new(vec![end]),
                LaneEndSet::default(),
            )
        }
    };
    EndLinks {
        branch_point: BranchPointId::new(format!("bp:{index}")),
        confluent,
        ongoing,
    }
}
