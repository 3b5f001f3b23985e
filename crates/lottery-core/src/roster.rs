// Roster of participating teams and their ballot counts.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Smallest number of ballots a team can hold.
pub const MIN_BALLOTS: u32 = 1;

/// Largest number of ballots a team can hold. Bounds the size of the ballot
/// pool built for each draw.
pub const MAX_BALLOTS: u32 = 10_000;

/// A team entered into the lottery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Display name. Unique within a roster (case-sensitive).
    pub name: String,
    /// Lottery entries held by this team.
    #[serde(default = "default_ballots")]
    pub ballots: u32,
}

fn default_ballots() -> u32 {
    MIN_BALLOTS
}

impl Team {
    pub fn new(name: impl Into<String>, ballots: u32) -> Self {
        Team {
            name: name.into(),
            ballots,
        }
    }
}

/// Clamp a raw ballot count into `MIN_BALLOTS..=MAX_BALLOTS`.
pub fn clamp_ballots(ballots: u32) -> u32 {
    ballots.clamp(MIN_BALLOTS, MAX_BALLOTS)
}

/// Normalize a team name for entry: surrounding whitespace is not part of
/// the name.
pub fn normalize_name(name: &str) -> &str {
    name.trim()
}

/// Whether `name` could be added to `teams` (non-empty and not already
/// present). The TUI uses this to decide whether to clear its input fields.
pub fn accepts_name(teams: &[Team], name: &str) -> bool {
    let name = normalize_name(name);
    !name.is_empty() && !teams.iter().any(|t| t.name == name)
}

/// The ordered set of teams participating in the lottery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    teams: Vec<Team>,
}

impl Roster {
    pub fn new() -> Self {
        Roster::default()
    }

    /// Add a team.
    ///
    /// Returns `false` without touching the roster if the name is empty or
    /// already taken. Ballots are clamped to `MIN_BALLOTS..=MAX_BALLOTS`.
    pub fn add_team(&mut self, name: &str, ballots: u32) -> bool {
        let name = normalize_name(name);
        if name.is_empty() {
            debug!("Rejected team with empty name");
            return false;
        }
        if self.contains(name) {
            debug!("Rejected duplicate team '{}'", name);
            return false;
        }
        let ballots = clamp_ballots(ballots);
        self.teams.push(Team::new(name, ballots));
        true
    }

    /// Remove the team whose name matches exactly. Returns `false` if no such
    /// team exists.
    pub fn remove_team(&mut self, name: &str) -> bool {
        let before = self.teams.len();
        self.teams.retain(|t| t.name != name);
        self.teams.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.iter().any(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// A draft needs more than one team.
    pub fn can_draft(&self) -> bool {
        self.teams.len() > 1
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    /// Owned copy of the teams in entry order.
    pub fn to_vec(&self) -> Vec<Team> {
        self.teams().cloned().collect()
    }

    /// Immutable snapshot handed to the draw.
    ///
    /// With weighted mode off every team holds exactly one ballot; the stored
    /// counts are left alone so they come back when weighting is re-enabled.
    pub fn draw_snapshot(&self, weighted: bool) -> Vec<Team> {
        self.teams()
            .map(|t| Team {
                name: t.name.clone(),
                ballots: if weighted { t.ballots } else { MIN_BALLOTS },
            })
            .collect()
    }

    /// Total ballots in the pool for the given mode.
    pub fn total_ballots(&self, weighted: bool) -> u64 {
        if weighted {
            self.teams().map(|t| u64::from(t.ballots)).sum()
        } else {
            self.teams.len() as u64
        }
    }

    /// Probability that `name` lands the first overall pick.
    ///
    /// The first overall pick is whichever team owns the first ballot of the
    /// shuffled pool, so the odds are exactly `ballots / total_ballots`.
    pub fn first_pick_odds(&self, name: &str, weighted: bool) -> Option<f64> {
        let team = self.teams().find(|t| t.name == name)?;
        let total = self.total_ballots(weighted);
        if total == 0 {
            return None;
        }
        let ballots = if weighted { team.ballots } else { MIN_BALLOTS };
        Some(f64::from(ballots) / total as f64)
    }
}

/// Collects through `add_team`, so blank and duplicate names are dropped.
impl FromIterator<Team> for Roster {
    fn from_iter<I: IntoIterator<Item = Team>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for team in iter {
            roster.add_team(&team.name, team.ballots);
        }
        roster
    }
}
