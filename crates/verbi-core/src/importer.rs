//! Building a legacy verb database from loose word-list files.
//!
//! Each input file holds either a list of infinitives (plain strings or
//! `{"verb": "..."}` objects) or an object mapping arbitrary keys to such
//! lists. Every verb lands in exactly one group: its ending class, or the
//! marker group when it is a well-known irregular or has no recognized
//! ending.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::format::{LegacyConvention, LegacyDocument, LegacyGroup};
use crate::model::ConjugationGroup;

/// Verbs filed under the marker group regardless of their ending.
pub const KNOWN_IRREGULAR: &[&str] = &[
    "essere", "avere", "andare", "fare", "venire", "dire", "potere", "volere", "dovere", "sapere",
    "stare", "uscire", "dare", "bere",
];

/// Result of importing a directory.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub document: LegacyDocument,
    /// Files that contributed verbs.
    pub files: Vec<PathBuf>,
    /// Files that could not be read or parsed.
    pub skipped: Vec<PathBuf>,
}

/// Infinitives found in one decoded word-list file, in file order.
pub fn collect_infinitives(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    match value {
        Value::Array(items) => push_items(items, &mut out),
        Value::Object(map) => {
            for items in map.values() {
                if let Value::Array(items) = items {
                    push_items(items, &mut out);
                }
            }
        }
        _ => {}
    }
    out
}

fn push_items(items: &[Value], out: &mut Vec<String>) {
    for item in items {
        let verb = match item {
            Value::String(s) => Some(s.as_str()),
            Value::Object(obj) => obj.get("verb").and_then(Value::as_str),
            _ => None,
        };
        if let Some(verb) = verb.map(str::trim).filter(|v| !v.is_empty()) {
            out.push(verb.to_string());
        }
    }
}

/// Group name an imported verb is filed under.
pub fn import_group<'a>(infinitive: &str, convention: &'a LegacyConvention) -> &'a str {
    let lower = infinitive.to_lowercase();
    if KNOWN_IRREGULAR.contains(&lower.as_str()) {
        return &convention.irregular_marker;
    }
    match ConjugationGroup::classify(&lower) {
        ConjugationGroup::Are => ConjugationGroup::Are.as_str(),
        ConjugationGroup::Ere => ConjugationGroup::Ere.as_str(),
        ConjugationGroup::Ire => ConjugationGroup::Ire.as_str(),
        ConjugationGroup::Other => &convention.irregular_marker,
    }
}

/// De-duplicate (case-insensitively, first spelling wins) and group `verbs`.
///
/// The result always has the three ending groups followed by the marker
/// group, each sorted, even when some are empty.
pub fn build_legacy(
    verbs: impl IntoIterator<Item = String>,
    convention: &LegacyConvention,
) -> LegacyDocument {
    let mut names: Vec<&str> = vec![
        ConjugationGroup::Are.as_str(),
        ConjugationGroup::Ere.as_str(),
        ConjugationGroup::Ire.as_str(),
    ];
    names.push(&convention.irregular_marker);

    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    let mut seen = HashSet::new();
    for verb in verbs {
        if !seen.insert(verb.to_lowercase()) {
            continue;
        }
        let group = import_group(&verb, convention);
        if let Some(slot) = names.iter().position(|n| *n == group) {
            buckets[slot].push(verb);
        }
    }

    let groups = names
        .iter()
        .zip(buckets)
        .map(|(name, mut verbs)| {
            verbs.sort_by_key(|v| v.to_lowercase());
            LegacyGroup::new(*name, verbs)
        })
        .collect();
    LegacyDocument::new(groups, convention.clone())
}

/// Read every `*.json` file in `dir` (in name order) into one legacy document.
pub fn import_dir(dir: &Path, convention: &LegacyConvention) -> Result<ImportOutcome> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    if paths.is_empty() {
        bail!("no JSON files found in {}", dir.display());
    }

    let mut verbs = Vec::new();
    let mut files = Vec::new();
    let mut skipped = Vec::new();
    for path in paths {
        match read_word_list(&path) {
            Ok(found) => {
                tracing::debug!(path = %path.display(), verbs = found.len(), "read word list");
                verbs.extend(found);
                files.push(path);
            }
            Err(e) => {
                tracing::warn!("skipping {}: {e:#}", path.display());
                skipped.push(path);
            }
        }
    }
    if files.is_empty() {
        bail!("none of the JSON files in {} could be read", dir.display());
    }

    let document = build_legacy(verbs, convention);
    tracing::info!(
        verbs = document.records().len(),
        files = files.len(),
        "import complete"
    );
    Ok(ImportOutcome {
        document,
        files,
        skipped,
    })
}

fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content).context("invalid JSON")?;
    Ok(collect_infinitives(&value))
}
