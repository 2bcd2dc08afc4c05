//! Unit tests for the circuit walk: auto-detection, explicit paths, trimming,
//! and failure modes.

use bevy::math::DVec3;

use road_api::{LaneEnd, LaneId, RoadGeometry, Which};

use super::*;
use crate::circuit_error::CircuitError;
use crate::config::CircuitParams;
use crate::test_harness::TestRoad;

fn quiet() -> CircuitParams {
    CircuitParams {
        log_walk: false,
        ..CircuitParams::default()
    }
}

fn lane_ids(walk: &Walk<'_>) -> Vec<String> {
    walk.records
        .iter()
        .map(|record| record.lane.id().to_string())
        .collect()
}

fn spans(walk: &Walk<'_>) -> Vec<(f64, f64)> {
    walk.records
        .iter()
        .map(|record| (record.start_circuit_s, record.end_circuit_s))
        .collect()
}

/// `lead -> a -> b -> c -> a`: a 10 m lead-in onto the triangle.
fn lollipop() -> TestRoad {
    TestRoad::builder("lollipop")
        .line("lead", DVec3::new(-10.0, 0.0, 0.0), 0.0, 10.0)
        .line("a", DVec3::new(0.0, 0.0, 0.0), 0.0, 10.0)
        .line("b", DVec3::new(10.0, 0.0, 0.0), 120f64.to_radians(), 10.0)
        .line("c", DVec3::new(5.0, 8.66, 0.0), 240f64.to_radians(), 10.0)
        .connect(LaneEnd::finish("lead"), LaneEnd::start("a"))
        .connect(LaneEnd::finish("a"), LaneEnd::start("b"))
        .connect(LaneEnd::finish("b"), LaneEnd::start("c"))
        .connect(LaneEnd::finish("c"), LaneEnd::start("a"))
        .build()
}

/// `a` forks into `b` (connected first) and `x`; both rejoin at `c`.
fn fork() -> TestRoad {
    TestRoad::builder("fork")
        .line("a", DVec3::ZERO, 0.0, 10.0)
        .line("b", DVec3::new(10.0, 0.0, 0.0), 0.0, 10.0)
        .line("x", DVec3::new(10.0, 0.0, 0.0), 0.3, 12.0)
        .line("c", DVec3::new(20.0, 0.0, 0.0), 0.0, 10.0)
        .connect(LaneEnd::finish("a"), LaneEnd::start("b"))
        .connect(LaneEnd::finish("a"), LaneEnd::start("x"))
        .connect(LaneEnd::finish("b"), LaneEnd::start("c"))
        .connect(LaneEnd::finish("x"), LaneEnd::start("c"))
        .connect(LaneEnd::finish("c"), LaneEnd::start("a"))
        .build()
}

// ====================================================================
// Auto-detection
// ====================================================================

#[test]
fn test_triangle_auto_detects_three_records() {
    let road = TestRoad::triangle();
    let walk = CircuitBuilder::new(&road, LaneEnd::start("a"))
        .params(quiet())
        .walk()
        .unwrap();

    assert_eq!(walk.kind, WalkKind::DetectedCycle);
    assert_eq!(lane_ids(&walk), vec!["a", "b", "c"]);
    assert_eq!(walk.cycle_length, 30.0);
    assert_eq!(
        spans(&walk),
        vec![(0.0, 10.0), (10.0, 20.0), (20.0, 30.0)]
    );
    assert!(walk.records.iter().all(|record| !record.is_reversed));
}

#[test]
fn test_auto_detect_starting_mid_loop_rotates_records() {
    let road = TestRoad::triangle();
    let walk = CircuitBuilder::new(&road, LaneEnd::start("b"))
        .params(quiet())
        .walk()
        .unwrap();
    assert_eq!(lane_ids(&walk), vec!["b", "c", "a"]);
    assert_eq!(walk.cycle_length, 30.0);
}

#[test]
fn test_lead_in_is_trimmed_and_remeasured() {
    let road = lollipop();
    let mut log = EventLog::default();
    let walk = CircuitBuilder::new(&road, LaneEnd::start("lead"))
        .observer(&mut log)
        .walk()
        .unwrap();

    assert_eq!(lane_ids(&walk), vec!["a", "b", "c"]);
    assert_eq!(walk.records[0].start_circuit_s, 0.0);
    assert_eq!(
        walk.records.last().map(|record| record.end_circuit_s),
        Some(walk.cycle_length)
    );
    assert!((walk.cycle_length - 30.0).abs() < 1e-12);
    assert_eq!(
        log.events.last(),
        Some(&WalkEvent::CycleClosed {
            repeat: LaneEnd::start("a"),
            repeat_index: 1,
            trimmed: 1,
        })
    );
}

#[test]
fn test_auto_detect_takes_first_branch() {
    let road = fork();
    let mut log = EventLog::default();
    let walk = CircuitBuilder::new(&road, LaneEnd::start("a"))
        .observer(&mut log)
        .walk()
        .unwrap();

    assert_eq!(lane_ids(&walk), vec!["a", "b", "c"]);
    let first_branch = log
        .events
        .iter()
        .find(|event| matches!(event, WalkEvent::BranchTaken { .. }));
    assert_eq!(
        first_branch,
        Some(&WalkEvent::BranchTaken {
            exit: LaneEnd::finish("a"),
            next: LaneEnd::start("b"),
            branch_index: 0,
            branch_count: 2,
        })
    );
}

#[test]
fn test_entering_at_finish_marks_record_reversed() {
    let road = TestRoad::reversed_triangle();
    let walk = CircuitBuilder::new(&road, LaneEnd::start("a"))
        .params(quiet())
        .walk()
        .unwrap();

    assert_eq!(lane_ids(&walk), vec!["a", "b", "c"]);
    let reversed: Vec<bool> = walk.records.iter().map(|r| r.is_reversed).collect();
    assert_eq!(reversed, vec![false, true, false]);
    assert_eq!(walk.records[1].entry_end(), LaneEnd::finish("b"));
    assert_eq!(walk.records[1].exit_end(), LaneEnd::start("b"));
}

#[test]
fn test_dead_end_fails_instead_of_looping() {
    let road = TestRoad::builder("spur")
        .line("a", DVec3::ZERO, 0.0, 10.0)
        .line("spur", DVec3::new(10.0, 0.0, 0.0), 0.0, 5.0)
        .connect(LaneEnd::finish("a"), LaneEnd::start("spur"))
        .build();

    let err = CircuitBuilder::new(&road, LaneEnd::start("a"))
        .params(quiet())
        .walk()
        .unwrap_err();
    assert_eq!(
        err,
        CircuitError::DeadEnd {
            lane: LaneId::new("spur"),
            end: Which::Finish,
        }
    );
}

#[test]
fn test_unknown_start_lane_fails() {
    let road = TestRoad::triangle();
    let err = CircuitBuilder::new(&road, LaneEnd::start("nope"))
        .params(quiet())
        .walk()
        .unwrap_err();
    assert_eq!(err, CircuitError::UnknownLane(LaneId::new("nope")));
}

// ====================================================================
// Explicit paths
// ====================================================================

#[test]
fn test_unknown_path_lane_fails_before_walking() {
    let road = TestRoad::triangle();
    let mut log = EventLog::default();
    let err = CircuitBuilder::new(&road, LaneEnd::start("a"))
        .path(["b", "ghost"])
        .observer(&mut log)
        .walk()
        .unwrap_err();
    assert_eq!(err, CircuitError::UnknownLane(LaneId::new("ghost")));
    assert!(log.events.is_empty());
}

#[test]
fn test_explicit_path_without_cycle_succeeds() {
    // c has no branch back to a.
    let road = TestRoad::builder("open")
        .line("a", DVec3::ZERO, 0.0, 10.0)
        .line("b", DVec3::new(10.0, 0.0, 0.0), 0.0, 10.0)
        .line("c", DVec3::new(20.0, 0.0, 0.0), 0.0, 10.0)
        .connect(LaneEnd::finish("a"), LaneEnd::start("b"))
        .connect(LaneEnd::finish("b"), LaneEnd::start("c"))
        .build();

    let walk = CircuitBuilder::new(&road, LaneEnd::start("a"))
        .path(["b", "c"])
        .params(quiet())
        .walk()
        .unwrap();

    assert_eq!(walk.kind, WalkKind::ExplicitPath);
    assert_eq!(walk.records.len(), 3);
    assert_eq!(walk.cycle_length, 30.0);
}

#[test]
fn test_explicit_path_record_count_is_path_len_plus_one() {
    let road = fork();
    let path = ["x", "c", "a", "b", "c"];
    let walk = CircuitBuilder::new(&road, LaneEnd::start("a"))
        .path(path)
        .params(quiet())
        .walk()
        .unwrap();

    assert_eq!(walk.records.len(), path.len() + 1);
    assert_eq!(lane_ids(&walk), vec!["a", "x", "c", "a", "b", "c"]);
    assert_eq!(walk.cycle_length, 10.0 + 12.0 + 10.0 + 10.0 + 10.0 + 10.0);
}

#[test]
fn test_explicit_path_steps_are_real_branches() {
    let road = fork();
    let walk = CircuitBuilder::new(&road, LaneEnd::start("a"))
        .path(["x", "c", "a"])
        .params(quiet())
        .walk()
        .unwrap();

    for pair in walk.records.windows(2) {
        let exit = pair[0].exit_end();
        let ongoing = pair[0].lane.ongoing_branches(exit.end).unwrap();
        assert!(
            ongoing.contains(&pair[1].entry_end()),
            "{} does not continue into {}",
            exit,
            pair[1].entry_end()
        );
    }
}

#[test]
fn test_explicit_path_missing_branch_fails() {
    let road = TestRoad::triangle();
    let err = CircuitBuilder::new(&road, LaneEnd::start("a"))
        .path(["c"])
        .params(quiet())
        .walk()
        .unwrap_err();
    assert_eq!(
        err,
        CircuitError::BranchNotFound {
            wanted: LaneId::new("c"),
            lane: LaneId::new("a"),
            end: Which::Finish,
        }
    );
}

#[test]
fn test_explicit_path_reports_exhaustion() {
    let road = TestRoad::triangle();
    let mut log = EventLog::default();
    CircuitBuilder::new(&road, LaneEnd::start("a"))
        .path(["b"])
        .observer(&mut log)
        .walk()
        .unwrap();
    assert_eq!(
        log.events.last(),
        Some(&WalkEvent::PathExhausted { records: 2 })
    );
}

// ====================================================================
// Observer
// ====================================================================

#[test]
fn test_observer_sees_every_step() {
    let road = TestRoad::triangle();
    let mut log = EventLog::default();
    CircuitBuilder::new(&road, LaneEnd::start("a"))
        .observer(&mut log)
        .walk()
        .unwrap();

    let recorded = log
        .events
        .iter()
        .filter(|event| matches!(event, WalkEvent::LaneRecorded { .. }))
        .count();
    let branches = log
        .events
        .iter()
        .filter(|event| matches!(event, WalkEvent::BranchTaken { .. }))
        .count();
    assert_eq!(recorded, 3);
    assert_eq!(branches, 3);
    assert_eq!(
        log.events[0],
        WalkEvent::LaneRecorded {
            index: 0,
            entry: LaneEnd::start("a"),
            length: 10.0,
            start_circuit_s: 0.0,
        }
    );
}

#[test]
fn test_build_wraps_walk_in_road() {
    let road = TestRoad::triangle();
    let circuit = CircuitBuilder::new(&road, LaneEnd::start("a"))
        .params(quiet())
        .build("loop".into())
        .unwrap();
    assert_eq!(circuit.id().as_str(), "loop");
    assert_eq!(circuit.lane().records().len(), 3);
}
