//! Graph invariants checked after every driver step: one node per state,
//! monotone non-negative `g`, fixed `h`, `f = g + h`, a parent chain that
//! always ends at the root, and frontier membership matching node phase.
//!
//! Also checks optimality on street grids against an independent
//! shortest-path computation.

use std::collections::{BTreeMap, BTreeSet};

use lock_tests::fixtures::detour_map;
use wayfind_harness::contract::WorldV1;
use wayfind_harness::worlds::river_crossing::RiverBank;
use wayfind_harness::worlds::road_map::{RoadMap, Stop};
use wayfind_search::contract::SearchState;
use wayfind_search::node::NodePhase;
use wayfind_search::policy::{GoalTestV1, SearchPolicyV1};
use wayfind_search::search::{search, SearchDriver};
use wayfind_search::trace::NoopTrace;

/// Step `start` to termination, checking every invariant after each step.
/// Returns the number of steps taken.
fn check_run<S: SearchState>(start: S, policy: SearchPolicyV1) -> usize {
    let mut driver = SearchDriver::new(start, policy).unwrap();
    let mut seen_g: BTreeMap<usize, i64> = BTreeMap::new();
    let mut seen_h: BTreeMap<usize, i64> = BTreeMap::new();
    let mut steps = 0;

    loop {
        let status = driver.step(&mut NoopTrace).unwrap();
        steps += 1;
        assert!(steps < 10_000, "search did not terminate");

        let graph = driver.graph();
        let frontier = driver.frontier();
        let root = graph.root().unwrap();

        // Uniqueness.
        let states: BTreeSet<&S> = graph.iter().map(|n| n.state()).collect();
        assert_eq!(states.len(), graph.len(), "duplicate state in graph");

        for node in graph.iter() {
            let i = node.id().index();

            // Consistency.
            assert_eq!(node.f(), node.g() + node.h());
            assert!(node.g() >= 0 && node.h() >= 0);

            // Monotonic g, fixed h.
            if let Some(&prev) = seen_g.get(&i) {
                assert!(node.g() <= prev, "g of {:?} rose {prev} -> {}", node.state(), node.g());
            }
            seen_g.insert(i, node.g());
            assert_eq!(*seen_h.entry(i).or_insert(node.h()), node.h());

            // Tree shape.
            if node.id() == root {
                assert!(node.parent().is_none());
            } else {
                assert!(node.parent().is_some(), "non-root {i} has no parent");
            }
            let path = graph.path_to(node.id());
            assert_eq!(path.first(), Some(&root), "parent chain of {i} misses the root");
            assert!(path.len() <= graph.len());

            // Frontier membership.
            assert_eq!(
                frontier.contains(node.id()),
                node.phase() == NodePhase::Frontier,
                "phase of {i} disagrees with the frontier"
            );
            if let Some(key) = frontier.key_of(node.id()) {
                assert_eq!(key.f_cost, node.f(), "stale frontier key for {i}");
            }
        }

        if status.is_terminal() {
            return steps;
        }
    }
}

fn policies() -> Vec<SearchPolicyV1> {
    vec![
        SearchPolicyV1::default(),
        SearchPolicyV1 {
            skip_predecessor: false,
            ..SearchPolicyV1::default()
        },
        SearchPolicyV1 {
            goal_test: GoalTestV1::OnExpansion,
            ..SearchPolicyV1::default()
        },
    ]
}

/// Dijkstra over `Stop::successors` and `Stop::step_cost`.
fn shortest_cost(map: &RoadMap) -> Option<i64> {
    let mut dist: BTreeMap<Stop, i64> = BTreeMap::new();
    let mut open: BTreeSet<(i64, Stop)> = BTreeSet::new();
    let start = map.start_state();
    dist.insert(start.clone(), 0);
    open.insert((0, start));
    while let Some((d, stop)) = open.pop_first() {
        if stop.is_goal() {
            return Some(d);
        }
        for next in stop.successors() {
            let nd = d + stop.step_cost(&next);
            if let Some(&old) = dist.get(&next) {
                if nd >= old {
                    continue;
                }
                open.remove(&(old, next.clone()));
            }
            dist.insert(next.clone(), nd);
            open.insert((nd, next));
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Invariants
// ---------------------------------------------------------------------------

#[test]
fn river_crossing_invariants_hold_every_step() {
    for policy in policies() {
        check_run(RiverBank::start(), policy);
    }
}

#[test]
fn detour_map_invariants_hold_through_revisions() {
    let map = detour_map();
    for policy in policies() {
        check_run(map.start_state(), policy);
    }
}

#[test]
fn grid_invariants_hold_every_step() {
    for (w, h) in [(2, 2), (4, 3), (6, 6)] {
        let map = RoadMap::grid(w, h).unwrap();
        for policy in policies() {
            check_run(map.start_state(), policy);
        }
    }
}

#[test]
fn search_terminates_on_finite_graphs() {
    // One step per expansion; the goal is generated during the ninth.
    let steps = check_run(RiverBank::start(), SearchPolicyV1::default());
    assert_eq!(steps, 9);
}

// ---------------------------------------------------------------------------
// Optimality
// ---------------------------------------------------------------------------

#[test]
fn strict_goal_test_matches_dijkstra_on_grids() {
    let policy = SearchPolicyV1 {
        goal_test: GoalTestV1::OnExpansion,
        ..SearchPolicyV1::default()
    };
    for (w, h) in [(2, 2), (3, 5), (5, 5), (8, 6)] {
        let map = RoadMap::grid(w, h).unwrap();
        let outcome = search(map.start_state(), &policy, &mut NoopTrace).unwrap();
        assert_eq!(
            Some(outcome.goal().unwrap().g()),
            shortest_cost(&map),
            "{w}x{h} grid"
        );
    }
}

#[test]
fn goal_path_cost_equals_goal_g() {
    for (w, h) in [(3, 3), (5, 4)] {
        let map = RoadMap::grid(w, h).unwrap();
        let outcome = search(map.start_state(), &SearchPolicyV1::default(), &mut NoopTrace).unwrap();
        let path = outcome.goal_path().unwrap();
        let cost: i64 = path.windows(2).map(|p| p[0].step_cost(p[1])).sum();
        assert_eq!(cost, outcome.goal().unwrap().g());
    }
}
