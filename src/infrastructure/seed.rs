use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use crate::modules::movie::model::Movie;
use crate::modules::movie::schema;

/// A missing file yields an empty collection; an unreadable or malformed one
/// is an error.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Movie>> {
    let path = path.as_ref();
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "seed file not found, starting with an empty collection");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read seed file {}", path.display()));
        }
    };

    parse(&raw).with_context(|| format!("failed to parse seed file {}", path.display()))
}

/// Entries without a string `id`, with a duplicate `id`, or failing full
/// validation are skipped.
pub fn parse(raw: &str) -> Result<Vec<Movie>> {
    let entries: Vec<Value> = serde_json::from_str(raw)?;
    let mut movies: Vec<Movie> = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let Some(id) = entry.get("id").and_then(Value::as_str).filter(|id| !id.is_empty()) else {
            warn!(index, "skipping seed entry without an id");
            continue;
        };
        if movies.iter().any(|m| m.id == id) {
            warn!(index, id, "skipping seed entry with a duplicate id");
            continue;
        }

        match schema::validate_full(entry) {
            Ok(data) => movies.push(Movie::with_id(id.to_string(), data)),
            Err(e) => warn!(index, id, fields = ?e.fields(), "skipping invalid seed entry"),
        }
    }

    Ok(movies)
}
