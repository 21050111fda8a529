//! `RiverCrossing`: farmer, wolf, duck and corn on the banks of a river.
//!
//! The farmer owns a boat with room for one passenger. Left alone, the wolf
//! eats the duck and the duck eats the corn. Everyone starts on the right
//! bank; the goal is to get all four to the left bank.
//!
//! Each actor is one bit (`true` = left bank). Successors are generated only
//! by the four legal crossings below, checked in this order:
//!
//! | crossing | allowed when |
//! |---|---|
//! | farmer + wolf | farmer and wolf share a bank, duck and corn do not |
//! | farmer + duck | farmer and duck share a bank |
//! | farmer + corn | farmer and corn share a bank, wolf and duck do not |
//! | farmer alone  | duck and corn apart, wolf and duck apart |
//!
//! The heuristic counts the wolf, duck and corn still on the right bank.
//! It never overestimates, since each trip carries at most one of them.

use std::fmt;

use wayfind_search::contract::SearchState;

use crate::contract::WorldV1;

/// One of the four legal boat trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    FarmerWolf,
    FarmerDuck,
    FarmerCorn,
    FarmerAlone,
}

impl Crossing {
    /// All crossings, in successor generation order.
    pub const ALL: [Crossing; 4] = [
        Self::FarmerWolf,
        Self::FarmerDuck,
        Self::FarmerCorn,
        Self::FarmerAlone,
    ];
}

/// Which bank each actor stands on (`true` = left).
///
/// Ordering compares farmer, then wolf, duck and corn, with the right bank
/// sorting first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RiverBank {
    pub farmer: bool,
    pub wolf: bool,
    pub duck: bool,
    pub corn: bool,
}

impl RiverBank {
    /// Everyone on the right bank.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(false, false, false, false)
    }

    #[must_use]
    pub const fn new(farmer: bool, wolf: bool, duck: bool, corn: bool) -> Self {
        Self {
            farmer,
            wolf,
            duck,
            corn,
        }
    }

    /// Whether `crossing` is legal from here.
    #[must_use]
    pub fn can_cross(&self, crossing: Crossing) -> bool {
        match crossing {
            Crossing::FarmerWolf => self.farmer == self.wolf && self.duck != self.corn,
            Crossing::FarmerDuck => self.farmer == self.duck,
            Crossing::FarmerCorn => self.farmer == self.corn && self.wolf != self.duck,
            Crossing::FarmerAlone => self.duck != self.corn && self.wolf != self.duck,
        }
    }

    /// The state after `crossing`, or `None` if it is not legal.
    #[must_use]
    pub fn cross(&self, crossing: Crossing) -> Option<Self> {
        if !self.can_cross(crossing) {
            return None;
        }
        let mut next = *self;
        next.farmer = !next.farmer;
        match crossing {
            Crossing::FarmerWolf => next.wolf = !next.wolf,
            Crossing::FarmerDuck => next.duck = !next.duck,
            Crossing::FarmerCorn => next.corn = !next.corn,
            Crossing::FarmerAlone => {}
        }
        Some(next)
    }

    fn actors(&self) -> [(char, bool); 4] {
        [
            ('F', self.farmer),
            ('W', self.wolf),
            ('D', self.duck),
            ('C', self.corn),
        ]
    }
}

impl Default for RiverBank {
    fn default() -> Self {
        Self::start()
    }
}

impl SearchState for RiverBank {
    fn successors(&self) -> Vec<Self> {
        Crossing::ALL
            .iter()
            .filter_map(|&crossing| self.cross(crossing))
            .collect()
    }

    fn is_goal(&self) -> bool {
        self.farmer && self.wolf && self.duck && self.corn
    }

    fn heuristic(&self) -> i64 {
        i64::from(!self.wolf) + i64::from(!self.duck) + i64::from(!self.corn)
    }
}

/// Renders as `[<left bank>||<right bank>]`, e.g. `[FD||WC]`.
impl fmt::Display for RiverBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left: String = self.actors().iter().filter(|a| a.1).map(|a| a.0).collect();
        let right: String = self.actors().iter().filter(|a| !a.1).map(|a| a.0).collect();
        write!(f, "[{left}||{right}]")
    }
}

impl fmt::Debug for RiverBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// The puzzle as a runnable world, starting with everyone on the right bank.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiverCrossing;

impl WorldV1 for RiverCrossing {
    type State = RiverBank;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "river_crossing"
    }

    fn start_state(&self) -> RiverBank {
        RiverBank::start()
    }
}
