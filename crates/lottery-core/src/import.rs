// CSV roster import (`name,ballots`, ballots optional).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::roster::{Team, MIN_BALLOTS};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

#[derive(Debug, Deserialize)]
struct RawTeamRow {
    name: String,
    #[serde(default)]
    ballots: Option<u32>,
}

/// Read teams from any CSV reader. Malformed rows are skipped with a warning;
/// clamping and duplicate handling are left to the roster.
fn load_teams_from_reader<R: Read>(rdr: R) -> Result<Vec<Team>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut teams = Vec::new();
    for result in reader.deserialize::<RawTeamRow>() {
        match result {
            Ok(raw) => {
                teams.push(Team::new(raw.name, raw.ballots.unwrap_or(MIN_BALLOTS)));
            }
            Err(e) => {
                warn!("skipping malformed team row: {}", e);
            }
        }
    }
    Ok(teams)
}

/// Load teams from a CSV file.
pub fn load_teams(path: &Path) -> Result<Vec<Team>, ImportError> {
    let file = std::fs::File::open(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_teams_from_reader(file).map_err(|e| ImportError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}
