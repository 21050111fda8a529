//! End-to-end lock tests for the farmer, wolf, duck and corn puzzle:
//! the solution path, its length, and the search effort under each
//! policy variant.

use wayfind_harness::contract::Uniform;
use wayfind_harness::runner::run_world;
use wayfind_harness::worlds::river_crossing::{RiverBank, RiverCrossing};
use wayfind_search::policy::{GoalTestV1, SearchPolicyV1};
use wayfind_search::search::{search, SearchDriver, SearchStatus};
use wayfind_search::trace::NoopTrace;

const WINNING_PATH: &str = "[||FWDC] -> [FD||WC] -> [D||FWC] -> [FWD||C] -> [W||FDC] -> [FWC||D] -> [WC||FD] -> [FWDC||]";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Which actors changed bank between two states, as a crossing label.
fn crossing(from: &RiverBank, to: &RiverBank) -> String {
    let mut moved = String::new();
    for (label, a, b) in [
        ('F', from.farmer, to.farmer),
        ('W', from.wolf, to.wolf),
        ('D', from.duck, to.duck),
        ('C', from.corn, to.corn),
    ] {
        if a != b {
            moved.push(label);
        }
    }
    moved
}

// ---------------------------------------------------------------------------
// Default policy
// ---------------------------------------------------------------------------

#[test]
fn default_policy_finds_seven_step_path() {
    init_logging();
    let report = run_world(&RiverCrossing, &SearchPolicyV1::default()).unwrap();
    assert_eq!(report.status.as_str(), "goal_found");
    assert_eq!(report.path_length(), Some(7));
    assert_eq!(report.rendered_path().unwrap(), WINNING_PATH);
}

#[test]
fn path_is_the_classic_crossing_sequence() {
    let outcome = search(RiverBank::start(), &SearchPolicyV1::default(), &mut NoopTrace).unwrap();
    let path = outcome.goal_path().unwrap();
    let moves: Vec<String> = path.windows(2).map(|w| crossing(w[0], w[1])).collect();
    assert_eq!(moves, vec!["FD", "F", "FW", "FD", "FC", "F", "FD"]);
    assert_eq!(outcome.goal().unwrap().g(), 7);
}

#[test]
fn default_policy_effort_is_locked() {
    let outcome = search(RiverBank::start(), &SearchPolicyV1::default(), &mut NoopTrace).unwrap();
    let stats = outcome.stats();
    assert_eq!(stats.expansions, 9);
    assert_eq!(stats.successors_seen, 11);
    assert_eq!(stats.nodes_generated, 10);
    assert_eq!(stats.regenerations, 2);
    assert_eq!(stats.revisions, 0);
    assert_eq!(stats.frontier_high_water, 2);
    // Every reachable state was generated.
    assert_eq!(outcome.graph().len(), 10);
}

#[test]
fn goal_found_before_any_exhaustion() {
    let mut driver = SearchDriver::new(RiverBank::start(), SearchPolicyV1::default()).unwrap();
    let mut steps = 0;
    loop {
        let status = driver.step(&mut NoopTrace).unwrap();
        steps += 1;
        assert_ne!(status, SearchStatus::Exhausted, "exhausted at step {steps}");
        if status.is_terminal() {
            assert!(status.goal().is_some());
            break;
        }
        assert!(steps < 100, "search did not terminate");
    }
}

// ---------------------------------------------------------------------------
// Policy variants
// ---------------------------------------------------------------------------

#[test]
fn zero_heuristic_yields_same_path() {
    let report = run_world(&Uniform(RiverCrossing), &SearchPolicyV1::default()).unwrap();
    assert_eq!(report.path_length(), Some(7));
    assert_eq!(report.rendered_path().unwrap(), WINNING_PATH);
    assert_eq!(report.stats.expansions, 9);
}

#[test]
fn without_predecessor_skip_same_path_more_regenerations() {
    let policy = SearchPolicyV1 {
        skip_predecessor: false,
        ..SearchPolicyV1::default()
    };
    let report = run_world(&RiverCrossing, &policy).unwrap();
    assert_eq!(report.rendered_path().unwrap(), WINNING_PATH);
    assert_eq!(report.stats.successors_seen, 18);
    assert_eq!(report.stats.regenerations, 9);
    assert_eq!(report.stats.revisions, 0);
}

#[test]
fn goal_test_on_expansion_costs_one_more_expansion() {
    let policy = SearchPolicyV1 {
        goal_test: GoalTestV1::OnExpansion,
        ..SearchPolicyV1::default()
    };
    let report = run_world(&RiverCrossing, &policy).unwrap();
    assert_eq!(report.rendered_path().unwrap(), WINNING_PATH);
    assert_eq!(report.stats.expansions, 10);
}

#[test]
fn tight_budget_stops_short_of_the_goal() {
    let policy = SearchPolicyV1 {
        max_expansions: Some(3),
        ..SearchPolicyV1::default()
    };
    let report = run_world(&RiverCrossing, &policy).unwrap();
    assert_eq!(report.status, SearchStatus::BudgetExceeded { expansions: 3 });
    assert!(!report.is_goal_reached());
}

// ---------------------------------------------------------------------------
// Edge starts
// ---------------------------------------------------------------------------

#[test]
fn start_on_goal_needs_no_expansion() {
    let goal = RiverBank::new(true, true, true, true);
    let outcome = search(goal, &SearchPolicyV1::default(), &mut NoopTrace).unwrap();
    assert!(outcome.is_goal_reached());
    assert_eq!(outcome.path_length(), Some(0));
    assert_eq!(outcome.stats().expansions, 0);
}

#[test]
fn any_safe_start_reaches_the_goal() {
    for start in [
        RiverBank::new(true, false, true, false),
        RiverBank::new(false, true, false, true),
        RiverBank::new(true, true, true, false),
    ] {
        let outcome = search(start, &SearchPolicyV1::default(), &mut NoopTrace).unwrap();
        assert!(outcome.is_goal_reached(), "no path from {start}");
        assert!(outcome.path_length().unwrap() <= 7);
    }
}
