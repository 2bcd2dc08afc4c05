use road_api::LaneEnd;

use super::*;
use crate::test_harness::TestRoad;
use crate::walk::CircuitBuilder;

fn triangle_circuit(road: &TestRoad) -> InfiniteCircuitRoad<'_> {
    CircuitBuilder::new(road, LaneEnd::start("a"))
        .params(CircuitParams {
            log_walk: false,
            ..CircuitParams::default()
        })
        .build("ring".into())
        .unwrap()
}

#[test]
fn test_children_are_named_after_road() {
    let road = TestRoad::triangle();
    let circuit = triangle_circuit(&road);

    assert_eq!(circuit.id().as_str(), "ring");
    let junction = circuit.junction(0).unwrap();
    assert_eq!(junction.id().as_str(), "ring.junction");
    assert_eq!(junction.road_geometry_id(), circuit.id());
    let segment = junction.segment(0).unwrap();
    assert_eq!(segment.id().as_str(), "ring.segment");
    assert_eq!(segment.junction_id(), junction.id());
    let lane = segment.lane(0).unwrap();
    assert_eq!(lane.id().as_str(), "ring.lane");
    assert_eq!(lane.segment_id(), segment.id());
}

#[test]
fn test_single_child_at_every_level() {
    let road = TestRoad::triangle();
    let circuit = triangle_circuit(&road);

    assert_eq!(circuit.num_junctions(), 1);
    assert!(circuit.junction(1).is_none());
    let junction = circuit.circuit_junction();
    assert_eq!(junction.num_segments(), 1);
    assert!(junction.segment(1).is_none());
    let segment = circuit.circuit_segment();
    assert_eq!(segment.num_lanes(), 1);
    assert!(segment.lane(1).is_none());
}

#[test]
fn test_find_lane_reaches_circuit_lane() {
    let road = TestRoad::triangle();
    let circuit = triangle_circuit(&road);

    let lane = circuit.find_lane(&LaneId::new("ring.lane")).unwrap();
    assert_eq!(lane.length(), f64::INFINITY);
    // Source lanes are not part of the circuit's own hierarchy.
    assert!(circuit.find_lane(&LaneId::new("a")).is_none());
}

#[test]
fn test_no_branch_points() {
    let road = TestRoad::triangle();
    let circuit = triangle_circuit(&road);

    assert_eq!(circuit.num_branch_points(), 0);
    assert!(matches!(
        circuit.branch_point(0),
        Err(RoadError::Unsupported {
            operation: "branch_point"
        })
    ));
}

#[test]
fn test_to_road_position_unsupported() {
    let road = TestRoad::triangle();
    let circuit = triangle_circuit(&road);

    let err = circuit
        .to_road_position(&GeoPosition::new(1.0, 0.0, 0.0), None)
        .unwrap_err();
    assert_eq!(
        err,
        RoadError::Unsupported {
            operation: "to_road_position"
        }
    );
}

#[test]
fn test_tolerances_forwarded_from_source() {
    let road = TestRoad::builder("loose")
        .line("a", bevy::math::DVec3::ZERO, 0.0, 10.0)
        .connect(LaneEnd::finish("a"), LaneEnd::start("a"))
        .tolerances(0.5, 0.25)
        .build();
    let circuit = CircuitBuilder::new(&road, LaneEnd::start("a"))
        .params(CircuitParams {
            log_walk: false,
            ..CircuitParams::default()
        })
        .build("loose_ring".into())
        .unwrap();

    assert_eq!(circuit.linear_tolerance(), 0.5);
    assert_eq!(circuit.angular_tolerance(), 0.25);
    assert_eq!(circuit.source().id().as_str(), "loose");
    assert_eq!(circuit.lane().records().len(), 1);
}
