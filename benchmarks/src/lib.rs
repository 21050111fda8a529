//! Shared helpers for wayfind benchmark suites.

use wayfind_harness::contract::{Uniform, WorldV1};
use wayfind_harness::runner::{run_world, RunReportV1};
use wayfind_harness::worlds::river_crossing::RiverCrossing;
use wayfind_harness::worlds::road_map::{RoadMap, Stop};
use wayfind_search::graph::SearchGraph;
use wayfind_search::node::NodeId;
use wayfind_search::policy::{GoalTestV1, SearchPolicyV1};
use wayfind_search::search::{search, SearchOutcome, SearchStats, SearchStatus};
use wayfind_search::trace::NoopTrace;

/// The world a regime searches.
pub enum RegimeWorld {
    River,
    RiverUniform,
    Roads(RoadMap),
}

/// A named (world, policy) pair with a characteristic search shape.
pub struct Regime {
    pub name: &'static str,
    pub world: RegimeWorld,
    pub policy: SearchPolicyV1,
}

/// Counters from one engine-only run.
#[derive(Debug, Clone, Copy)]
pub struct EngineRun {
    pub status: SearchStatus,
    pub stats: SearchStats,
    pub node_count: usize,
}

impl<S> From<&SearchOutcome<S>> for EngineRun {
    fn from(outcome: &SearchOutcome<S>) -> Self {
        Self {
            status: outcome.status(),
            stats: outcome.stats(),
            node_count: outcome.graph().len(),
        }
    }
}

impl Regime {
    /// Run `search()` alone: no transcript, no report.
    ///
    /// # Panics
    ///
    /// Panics if the search reports a contract violation. Benchmark worlds
    /// are well formed, so this is fatal.
    #[must_use]
    pub fn run_search_only(&self) -> EngineRun {
        match &self.world {
            RegimeWorld::River => engine(&RiverCrossing, &self.policy),
            RegimeWorld::RiverUniform => engine(&Uniform(RiverCrossing), &self.policy),
            RegimeWorld::Roads(map) => engine(map, &self.policy),
        }
    }

    /// Run the harness end to end: search, transcript, digests, report.
    ///
    /// # Panics
    ///
    /// Panics if the run fails.
    #[must_use]
    pub fn run_report(&self) -> RunReportV1 {
        let report = match &self.world {
            RegimeWorld::River => run_world(&RiverCrossing, &self.policy),
            RegimeWorld::RiverUniform => run_world(&Uniform(RiverCrossing), &self.policy),
            RegimeWorld::Roads(map) => run_world(map, &self.policy),
        };
        report.expect("run_world")
    }
}

fn engine<W: WorldV1>(world: &W, policy: &SearchPolicyV1) -> EngineRun {
    let outcome = search(world.start_state(), policy, &mut NoopTrace).expect("search");
    EngineRun::from(&outcome)
}

/// The standard regime set, small to large.
///
/// # Panics
///
/// Panics if a grid cannot be built (never for non-zero sizes).
#[must_use]
pub fn regimes() -> Vec<Regime> {
    let strict = SearchPolicyV1 {
        goal_test: GoalTestV1::OnExpansion,
        ..SearchPolicyV1::default()
    };
    let grid = |w, h| RegimeWorld::Roads(RoadMap::grid(w, h).expect("grid"));
    vec![
        Regime {
            name: "river_crossing",
            world: RegimeWorld::River,
            policy: SearchPolicyV1::default(),
        },
        Regime {
            name: "river_crossing_uniform",
            world: RegimeWorld::RiverUniform,
            policy: SearchPolicyV1::default(),
        },
        Regime {
            name: "grid_16x16",
            world: grid(16, 16),
            policy: SearchPolicyV1::default(),
        },
        Regime {
            name: "grid_32x32_strict",
            world: grid(32, 32),
            policy: strict.clone(),
        },
        Regime {
            name: "grid_48x48_budget",
            world: grid(48, 48),
            policy: SearchPolicyV1 {
                max_expansions: Some(500),
                ..strict
            },
        },
    ]
}

/// A graph holding the stops of an `n` x 1 grid and their node ids, for
/// frontier benchmarks that need real ids.
///
/// # Panics
///
/// Panics if `n == 0` or the graph rejects a stop.
#[must_use]
pub fn frontier_fixture(n: usize) -> (SearchGraph<Stop>, Vec<NodeId>) {
    let map = RoadMap::grid(n, 1).expect("grid");
    let mut graph = SearchGraph::new();
    let ids = (0..n)
        .map(|col| {
            let stop = map.stop(&format!("r0c{col}")).expect("stop");
            graph.get_or_create(stop, None, 0).expect("get_or_create").0
        })
        .collect();
    (graph, ids)
}
