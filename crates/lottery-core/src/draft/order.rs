// Weighted draft-order draw.
//
// Each team is expanded into one pool entry per ballot, the pool is shuffled
// with Fisher-Yates, collapsed to each team's first occurrence, and reversed.
// The team owning the first ballot of the shuffled pool ends up last in the
// order, which is the first overall pick and the final reveal.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::roster::Team;

/// Pick order from last pick (index 0, revealed first) to first overall pick
/// (final index, revealed last).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOrder(Vec<String>);

impl DraftOrder {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.0.len().checked_sub(1)
    }

    /// Draft pick number for a reveal index: index 0 is pick `len`, the final
    /// index is pick 1.
    pub fn pick_number(&self, index: usize) -> Option<usize> {
        (index < self.0.len()).then(|| self.0.len() - index)
    }

    /// The team holding the first overall pick.
    pub fn first_overall(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for DraftOrder {
    fn from(names: Vec<String>) -> Self {
        DraftOrder(names)
    }
}

/// Expand teams into the flat ballot pool: `ballots` copies of each name, in
/// roster order. Teams with zero ballots contribute nothing.
pub fn ballot_pool(teams: &[Team]) -> Vec<&str> {
    let total: usize = teams.iter().map(|t| t.ballots as usize).sum();
    let mut pool = Vec::with_capacity(total);
    for team in teams {
        for _ in 0..team.ballots {
            pool.push(team.name.as_str());
        }
    }
    pool
}

/// In-place Fisher-Yates: for `i` from the last index down to 1, swap `i`
/// with a uniform `j` in `[0, i]`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Draw a draft order for `teams`.
///
/// The result holds every team with at least one ballot exactly once. A
/// team's chance of landing the first overall pick is `ballots / total`.
pub fn compute_draft_order<R: Rng + ?Sized>(teams: &[Team], rng: &mut R) -> DraftOrder {
    let mut pool = ballot_pool(teams);
    fisher_yates(&mut pool, rng);

    let mut seen = HashSet::with_capacity(teams.len());
    let mut order: Vec<String> = pool
        .into_iter()
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect();
    order.reverse();

    DraftOrder(order)
}
