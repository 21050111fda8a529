//! Fail-fast behaviour for broken State implementations and rejected
//! policies, and the line between errors and ordinary "no path" outcomes.

use lock_tests::fixtures::{dead_end_map, Sloppy};
use wayfind_harness::contract::WorldV1;
use wayfind_harness::runner::{run_world, RunError};
use wayfind_harness::worlds::road_map::RoadMapBuilder;
use wayfind_search::error::SearchError;
use wayfind_search::policy::{RevisionPolicyV1, SearchPolicyV1};
use wayfind_search::search::{search, SearchDriver, SearchStatus};
use wayfind_search::trace::NoopTrace;

// ---------------------------------------------------------------------------
// Heuristic and cost contract
// ---------------------------------------------------------------------------

#[test]
fn negative_heuristic_on_start_is_rejected_up_front() {
    let map = RoadMapBuilder::new()
        .stop("S", -1)
        .stop("G", 0)
        .one_way("S", "G", 1)
        .start("S")
        .goal("G")
        .build()
        .unwrap();
    let err = SearchDriver::new(map.start_state(), SearchPolicyV1::default()).unwrap_err();
    assert_eq!(
        err,
        SearchError::NegativeHeuristic {
            state: "S".into(),
            value: -1
        }
    );
}

#[test]
fn negative_heuristic_on_successor_stops_the_search() {
    let map = RoadMapBuilder::new()
        .stop("S", 2)
        .stop("A", -3)
        .stop("G", 0)
        .one_way("S", "A", 1)
        .one_way("A", "G", 1)
        .start("S")
        .goal("G")
        .build()
        .unwrap();
    let err = search(map.start_state(), &SearchPolicyV1::default(), &mut NoopTrace).unwrap_err();
    assert_eq!(
        err,
        SearchError::NegativeHeuristic {
            state: "A".into(),
            value: -3
        }
    );
}

#[test]
fn negative_step_cost_stops_the_search() {
    let map = RoadMapBuilder::new()
        .stop("S", 0)
        .stop("G", 0)
        .one_way("S", "G", -2)
        .start("S")
        .goal("G")
        .build()
        .unwrap();
    let err = run_world(&map, &SearchPolicyV1::default()).unwrap_err();
    assert_eq!(
        err,
        RunError::Search(SearchError::NegativeStepCost {
            from: "S".into(),
            to: "G".into(),
            cost: -2
        })
    );
    assert!(err.to_string().contains("negative"));
}

// ---------------------------------------------------------------------------
// Order contract
// ---------------------------------------------------------------------------

#[test]
fn order_inconsistent_with_equality_is_detected() {
    let start = Sloppy { key: 0, tag: 0 };
    let err = search(start, &SearchPolicyV1::default(), &mut NoopTrace).unwrap_err();
    match err {
        SearchError::InconsistentStateOrder { probe, stored } => {
            assert_eq!(probe, "Sloppy { key: 1, tag: 1 }");
            assert_eq!(stored, "Sloppy { key: 1, tag: 0 }");
        }
        other => panic!("expected InconsistentStateOrder, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Policy pre-flight
// ---------------------------------------------------------------------------

#[test]
fn reserved_revision_mode_is_rejected() {
    let policy = SearchPolicyV1 {
        revision: RevisionPolicyV1::FullRelaxation,
        ..SearchPolicyV1::default()
    };
    let err = search(dead_end_map().start_state(), &policy, &mut NoopTrace).unwrap_err();
    assert!(matches!(err, SearchError::UnsupportedPolicyMode { .. }));
}

#[test]
fn zero_expansion_budget_is_rejected() {
    let policy = SearchPolicyV1 {
        max_expansions: Some(0),
        ..SearchPolicyV1::default()
    };
    assert!(matches!(
        policy.validate(),
        Err(SearchError::InvalidPolicy { .. })
    ));
}

// ---------------------------------------------------------------------------
// Not errors
// ---------------------------------------------------------------------------

#[test]
fn dead_end_is_exhausted_after_expanding_only_the_root() {
    let outcome = search(
        dead_end_map().start_state(),
        &SearchPolicyV1::default(),
        &mut NoopTrace,
    )
    .unwrap();
    assert_eq!(outcome.status(), SearchStatus::Exhausted);
    assert_eq!(outcome.stats().expansions, 1);
    assert_eq!(outcome.graph().len(), 1);
    assert_eq!(outcome.stats().nodes_generated, 1);
    assert!(outcome.goal_path().is_none());
}

#[test]
fn exhausted_driver_stays_exhausted() {
    let mut driver =
        SearchDriver::new(dead_end_map().start_state(), SearchPolicyV1::default()).unwrap();
    assert_eq!(driver.step(&mut NoopTrace).unwrap(), SearchStatus::Running);
    assert_eq!(driver.step(&mut NoopTrace).unwrap(), SearchStatus::Exhausted);
    assert_eq!(driver.step(&mut NoopTrace).unwrap(), SearchStatus::Exhausted);
    assert_eq!(driver.stats().expansions, 1);
}
