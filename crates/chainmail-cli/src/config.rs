//! Loading custom combat tables.
//!
//! A tables file is the JSON form of [`CombatTables`]: `attack_factors` and
//! `kill_thresholds` as 6×6 arrays in unit type order, and `morale_ratings`
//! as a 6 element array. Tables are validated before use.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chainmail_core::CombatTables;

/// Parses and validates tables from JSON text.
pub fn parse_tables(json: &str) -> Result<CombatTables> {
    let tables: CombatTables = serde_json::from_str(json).context("malformed tables JSON")?;
    tables.validate()?;
    Ok(tables)
}

/// Reads tables from `path`, or the standard tables when no path is given.
pub fn load_tables(path: Option<&Path>) -> Result<CombatTables> {
    let Some(path) = path else {
        return Ok(CombatTables::standard());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read tables from {}", path.display()))?;
    let tables =
        parse_tables(&json).with_context(|| format!("invalid tables in {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded custom combat tables");
    Ok(tables)
}
