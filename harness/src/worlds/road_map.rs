//! `RoadMap`: an explicit weighted graph of named stops.
//!
//! Used where the river puzzle is too regular: non-unit road costs, a
//! per-stop heuristic chosen by the author, and layouts that force the
//! engine to revise nodes it has already expanded.
//!
//! ```text
//! RoadMapBuilder::new()
//!     .stop("S", 3).stop("A", 2).stop("G", 0)
//!     .road("S", "A", 1).one_way("A", "G", 2)
//!     .start("S").goal("G")
//!     .build()?
//! ```
//!
//! Roads leave a stop in the order they were declared, which is the order
//! successors are generated. Names are resolved in `build()`; costs and
//! heuristics are passed through unchecked so the engine's own contract
//! checks can be exercised.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use wayfind_search::contract::SearchState;

use crate::contract::{WorldError, WorldV1};

#[derive(Debug)]
struct Roads {
    names: Vec<String>,
    heuristics: Vec<i64>,
    /// Outgoing `(to, cost)` per stop, in declaration order.
    outgoing: Vec<Vec<(usize, i64)>>,
    goal: usize,
}

/// A built road map with a start and a goal.
#[derive(Debug, Clone)]
pub struct RoadMap {
    roads: Rc<Roads>,
    start: usize,
}

impl RoadMap {
    /// Look up a stop by name.
    #[must_use]
    pub fn stop(&self, name: &str) -> Option<Stop> {
        self.roads
            .names
            .iter()
            .position(|n| n == name)
            .map(|at| Stop {
                roads: Rc::clone(&self.roads),
                at,
            })
    }

    /// Number of declared stops.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.roads.names.len()
    }

    /// A copy of this map that starts somewhere else.
    ///
    /// # Errors
    ///
    /// [`WorldError::UnknownStop`] if `name` was never declared.
    pub fn starting_at(&self, name: &str) -> Result<Self, WorldError> {
        let start = self.stop(name).ok_or_else(|| WorldError::UnknownStop {
            name: name.to_string(),
        })?;
        Ok(Self {
            roads: Rc::clone(&self.roads),
            start: start.at,
        })
    }
}

impl RoadMap {
    /// A `width` x `height` street grid from the top-left corner to the
    /// bottom-right one.
    ///
    /// Stops are named `r<row>c<col>`. Neighbouring stops are joined by
    /// two-way roads costing between 1 and 5, fixed by position. The
    /// heuristic is the Manhattan distance to the goal, which never
    /// overestimates because no road is cheaper than 1.
    ///
    /// # Errors
    ///
    /// [`WorldError::MissingStart`] for an empty grid.
    pub fn grid(width: usize, height: usize) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::MissingStart);
        }
        let name = |row: usize, col: usize| format!("r{row}c{col}");
        let cost = |a: usize, b: usize| 1 + i64::try_from((a * 7 + b * 13) % 5).unwrap_or(0);

        let mut builder = RoadMapBuilder::new();
        for row in 0..height {
            for col in 0..width {
                let distance = (height - 1 - row) + (width - 1 - col);
                builder = builder.stop(&name(row, col), i64::try_from(distance).unwrap_or(i64::MAX));
            }
        }
        for row in 0..height {
            for col in 0..width {
                if col + 1 < width {
                    builder = builder.road(&name(row, col), &name(row, col + 1), cost(row, col));
                }
                if row + 1 < height {
                    builder = builder.road(&name(row, col), &name(row + 1, col), cost(col, row + 1));
                }
            }
        }
        builder
            .start(&name(0, 0))
            .goal(&name(height - 1, width - 1))
            .build()
    }
}

impl WorldV1 for RoadMap {
    type State = Stop;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "road_map"
    }

    fn start_state(&self) -> Stop {
        Stop {
            roads: Rc::clone(&self.roads),
            at: self.start,
        }
    }
}

/// A position on a [`RoadMap`].
///
/// Stops compare by their declaration index. Comparing stops from two
/// different maps is meaningless.
#[derive(Clone)]
pub struct Stop {
    roads: Rc<Roads>,
    at: usize,
}

impl Stop {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.roads.names[self.at]
    }

    fn to(&self, at: usize) -> Self {
        Self {
            roads: Rc::clone(&self.roads),
            at,
        }
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
    }
}

impl Eq for Stop {}

impl PartialOrd for Stop {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Stop {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.cmp(&other.at)
    }
}

impl fmt::Debug for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl SearchState for Stop {
    fn successors(&self) -> Vec<Self> {
        self.roads.outgoing[self.at]
            .iter()
            .map(|&(to, _)| self.to(to))
            .collect()
    }

    fn is_goal(&self) -> bool {
        self.at == self.roads.goal
    }

    fn heuristic(&self) -> i64 {
        self.roads.heuristics[self.at]
    }

    /// Cheapest declared road from here to `to`.
    fn step_cost(&self, to: &Self) -> i64 {
        self.roads.outgoing[self.at]
            .iter()
            .filter(|&&(dest, _)| dest == to.at)
            .map(|&(_, cost)| cost)
            .min()
            .unwrap_or(i64::MAX)
    }
}

/// Collects stops and roads by name; resolved by [`RoadMapBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct RoadMapBuilder {
    stops: Vec<(String, i64)>,
    roads: Vec<(String, String, i64)>,
    start: Option<String>,
    goal: Option<String>,
}

impl RoadMapBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a stop with its heuristic estimate to the goal.
    #[must_use]
    pub fn stop(mut self, name: &str, heuristic: i64) -> Self {
        self.stops.push((name.to_string(), heuristic));
        self
    }

    /// A road usable in both directions at the same cost.
    #[must_use]
    pub fn road(self, a: &str, b: &str, cost: i64) -> Self {
        self.one_way(a, b, cost).one_way(b, a, cost)
    }

    /// A road usable only from `from` to `to`.
    #[must_use]
    pub fn one_way(mut self, from: &str, to: &str, cost: i64) -> Self {
        self.roads.push((from.to_string(), to.to_string(), cost));
        self
    }

    #[must_use]
    pub fn start(mut self, name: &str) -> Self {
        self.start = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn goal(mut self, name: &str) -> Self {
        self.goal = Some(name.to_string());
        self
    }

    /// Resolve names and freeze the map.
    ///
    /// # Errors
    ///
    /// [`WorldError::DuplicateStop`], [`WorldError::UnknownStop`],
    /// [`WorldError::MissingStart`] or [`WorldError::MissingGoal`].
    pub fn build(self) -> Result<RoadMap, WorldError> {
        let mut names: Vec<String> = Vec::with_capacity(self.stops.len());
        let mut heuristics = Vec::with_capacity(self.stops.len());
        for (name, h) in self.stops {
            if names.contains(&name) {
                return Err(WorldError::DuplicateStop { name });
            }
            names.push(name);
            heuristics.push(h);
        }

        let resolve = |name: &str| {
            names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| WorldError::UnknownStop {
                    name: name.to_string(),
                })
        };

        let mut outgoing = vec![Vec::new(); names.len()];
        for (from, to, cost) in &self.roads {
            let from = resolve(from)?;
            let to = resolve(to)?;
            outgoing[from].push((to, *cost));
        }

        let start = resolve(self.start.as_deref().ok_or(WorldError::MissingStart)?)?;
        let goal = resolve(self.goal.as_deref().ok_or(WorldError::MissingGoal)?)?;

        Ok(RoadMap {
            roads: Rc::new(Roads {
                names,
                heuristics,
                outgoing,
                goal,
            }),
            start,
        })
    }
}
