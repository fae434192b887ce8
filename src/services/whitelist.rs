use crate::domain::models::{validate_package_id, InputError};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(String),
    AlreadyPresent(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(String),
    OutOfRange { index: usize, len: usize },
}

/// Packages exempt from bulk restriction, kept as a line-delimited file.
///
/// Every mutation loads the file, changes it and rewrites it in full.
/// Order is kept for stable display numbering; membership is what counts.
#[derive(Debug, Clone)]
pub struct WhitelistStore {
    path: PathBuf,
}

impl WhitelistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }
        let mut out: Vec<String> = Vec::new();
        for line in std::fs::read_to_string(&self.path)?.lines() {
            let id = line.trim();
            if !id.is_empty() && !out.iter().any(|e| e == id) {
                out.push(id.to_string());
            }
        }
        Ok(out)
    }

    pub fn save(&self, entries: &[String]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut body = String::new();
        for e in entries {
            body.push_str(e);
            body.push('\n');
        }
        std::fs::write(&self.path, body)?;
        Ok(())
    }

    pub fn add(&self, package: &str) -> anyhow::Result<AddOutcome> {
        let id = validate_package_id(package)?;
        let mut entries = self.load()?;
        if entries.contains(&id) {
            return Ok(AddOutcome::AlreadyPresent(id));
        }
        entries.push(id.clone());
        self.save(&entries)?;
        info!(package = %id, "whitelisted");
        Ok(AddOutcome::Added(id))
    }

    /// Remove by 1-based display index.
    pub fn remove(&self, index: usize) -> anyhow::Result<RemoveOutcome> {
        let mut entries = self.load()?;
        if index == 0 || index > entries.len() {
            return Ok(RemoveOutcome::OutOfRange {
                index,
                len: entries.len(),
            });
        }
        let removed = entries.remove(index - 1);
        self.save(&entries)?;
        info!(package = %removed, "removed from whitelist");
        Ok(RemoveOutcome::Removed(removed))
    }
}

/// Names with a `.` are taken as fully qualified; anything else is a search term.
pub fn looks_fully_qualified(input: &str) -> bool {
    input.contains('.')
}

pub fn search(packages: &[String], needle: &str) -> Vec<String> {
    let needle = needle.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return vec![];
    }
    packages
        .iter()
        .filter(|p| p.to_ascii_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Pick one of `matches` for `query`: the `pick`th (1-based) when given,
/// otherwise the only match.
pub fn resolve_search(
    query: &str,
    matches: &[String],
    pick: Option<usize>,
) -> Result<String, InputError> {
    if matches.is_empty() {
        return Err(InputError::NoMatch(query.to_string()));
    }
    match pick {
        Some(n) if n >= 1 && n <= matches.len() => Ok(matches[n - 1].clone()),
        Some(n) => Err(InputError::PickOutOfRange {
            pick: n,
            count: matches.len(),
        }),
        None if matches.len() == 1 => Ok(matches[0].clone()),
        None => Err(InputError::Ambiguous {
            query: query.to_string(),
            count: matches.len(),
        }),
    }
}

/// Parse an operator-typed 1-based index. `None` for anything non-numeric.
pub fn parse_index(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()
}
