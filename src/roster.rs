//! Loading colleges and vote logs from JSON and CSV files
//!
//! Roster entries may omit their id (assigned from the 1-based position) and
//! their rating (the configured initial rating is used). CSV rosters use the
//! `College Name`, `Logo URL` and `ELO Rating` columns.

use crate::error::{ArenaError, Result};
use crate::types::{College, CollegeDetails, CollegeId};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// One college as it appears in a roster file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    #[serde(default)]
    pub id: Option<CollegeId>,
    #[serde(alias = "College Name")]
    pub name: String,
    #[serde(default, alias = "Logo URL")]
    pub logo_url: String,
    #[serde(default, alias = "ELO Rating")]
    pub elo_rating: Option<f64>,
    #[serde(default)]
    pub details: Option<CollegeDetails>,
}

/// A vote to replay: `winner` was preferred over `loser`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteLogEntry {
    pub winner: CollegeId,
    pub loser: CollegeId,
}

/// Parse a JSON array of roster entries into colleges
pub fn parse_roster(contents: &str, initial_rating: f64) -> Result<Vec<College>> {
    let entries: Vec<RosterEntry> =
        serde_json::from_str(contents).map_err(|e| ArenaError::RosterError {
            message: format!("Invalid roster JSON: {}", e),
        })?;

    build_colleges(entries, initial_rating)
}

/// Parse a CSV roster with a header row into colleges
pub fn parse_roster_csv<R: Read>(reader: R, initial_rating: f64) -> Result<Vec<College>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (index, row) in rdr.deserialize::<RosterEntry>().enumerate() {
        let entry = row.map_err(|e| ArenaError::RosterError {
            message: format!("Invalid roster CSV row {}: {}", index + 1, e),
        })?;
        entries.push(entry);
    }

    build_colleges(entries, initial_rating)
}

fn build_colleges(entries: Vec<RosterEntry>, initial_rating: f64) -> Result<Vec<College>> {
    let mut seen = HashSet::new();
    let mut colleges = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let name = entry.name.trim().to_string();
        if name.is_empty() {
            return Err(ArenaError::RosterError {
                message: format!("Entry {} has no name", index + 1),
            }
            .into());
        }

        let id = entry
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| (index + 1).to_string());
        if !seen.insert(id.clone()) {
            return Err(ArenaError::RosterError {
                message: format!("Duplicate college id: {}", id),
            }
            .into());
        }

        let rating = match entry.elo_rating {
            Some(rating) if rating.is_finite() => rating,
            Some(rating) => {
                warn!(college = %name, rating, "Ignoring non-finite rating in roster");
                initial_rating
            }
            None => initial_rating,
        };

        colleges.push(College {
            id,
            name,
            logo_url: entry.logo_url,
            elo_rating: rating,
            details: entry.details,
        });
    }

    Ok(colleges)
}

/// Read a roster file; `.csv` files are parsed as CSV, anything else as JSON
pub fn load_roster(path: &Path, initial_rating: f64) -> Result<Vec<College>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster {}", path.display()))?;

    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let colleges = if is_csv {
        parse_roster_csv(contents.as_bytes(), initial_rating)?
    } else {
        parse_roster(&contents, initial_rating)?
    };

    info!(path = %path.display(), count = colleges.len(), "Roster loaded");
    Ok(colleges)
}

/// Read a JSON array of votes to replay
pub fn load_vote_log(path: &Path) -> Result<Vec<VoteLogEntry>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read vote log {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid vote log {}", path.display()))
}
