//! Legacy → tense-annotated migration.
//!
//! The legacy format only knows whether a verb is irregular at all, so the
//! migration cannot tell which tenses are actually irregular. Both policies
//! therefore give every marker-group verb all eight tenses and every other
//! verb none; they differ only in how the result is laid out on disk.
//! Precision is added afterwards, verb by verb, with the editor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VerbError;
use crate::format::{Document, LegacyDocument, TenseLayout, VerbDocument};
use crate::model::{ConjugationGroup, VerbRecord};

/// How the migrated document is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationPolicy {
    /// Every tense listed with an explicit flag.
    AllTenses,
    /// Only irregular tenses listed.
    #[default]
    Simplified,
}

impl MigrationPolicy {
    pub fn layout(&self) -> TenseLayout {
        match self {
            MigrationPolicy::AllTenses => TenseLayout::Full,
            MigrationPolicy::Simplified => TenseLayout::Simplified,
        }
    }
}

impl fmt::Display for MigrationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationPolicy::AllTenses => write!(f, "all-tenses"),
            MigrationPolicy::Simplified => write!(f, "simplified"),
        }
    }
}

impl FromStr for MigrationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all-tenses" | "all_tenses" | "full" | "1" => Ok(MigrationPolicy::AllTenses),
            "simplified" | "simple" | "2" => Ok(MigrationPolicy::Simplified),
            other => Err(format!("unknown migration policy: {other}")),
        }
    }
}

/// A non-fatal problem found while translating a legacy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MigrationWarning {
    /// The verb is listed under more than one group; the first one wins.
    DuplicateVerb {
        infinitive: String,
        kept_group: String,
        dropped_group: String,
    },
    /// The verb's legacy group is not a conjugation class and was replaced
    /// by the class its ending implies.
    ReclassifiedGroup {
        infinitive: String,
        legacy_group: String,
        group: String,
    },
    /// The input was already tense-annotated; nothing was migrated.
    AlreadyNormalized,
}

impl fmt::Display for MigrationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationWarning::DuplicateVerb {
                infinitive,
                kept_group,
                dropped_group,
            } => write!(
                f,
                "'{infinitive}' appears in both {kept_group} and {dropped_group}; keeping {kept_group}"
            ),
            MigrationWarning::ReclassifiedGroup {
                infinitive,
                legacy_group,
                group,
            } => write!(
                f,
                "'{infinitive}' is in unrecognized group {legacy_group}; classified as {group}"
            ),
            MigrationWarning::AlreadyNormalized => {
                write!(f, "document is already in the normalized format")
            }
        }
    }
}

/// A migrated document plus everything worth telling the operator.
#[derive(Debug, Clone)]
pub struct MigrationOutcome {
    pub document: VerbDocument,
    pub warnings: Vec<MigrationWarning>,
}

/// Migrate any document. Already-normalized input comes back unchanged
/// with an [`MigrationWarning::AlreadyNormalized`] warning.
pub fn migrate(document: &Document, policy: MigrationPolicy) -> Result<MigrationOutcome, VerbError> {
    match document {
        Document::Legacy(legacy) => migrate_legacy(legacy, policy),
        Document::Normalized(doc) => {
            tracing::warn!("migration skipped: document is already normalized");
            Ok(MigrationOutcome {
                document: doc.clone(),
                warnings: vec![MigrationWarning::AlreadyNormalized],
            })
        }
    }
}

/// Build a new tense-annotated document from a legacy one. The input is
/// left untouched.
pub fn migrate_legacy(
    legacy: &LegacyDocument,
    policy: MigrationPolicy,
) -> Result<MigrationOutcome, VerbError> {
    let (records, warnings) = canonical_records(legacy);

    let mut document = VerbDocument::from_records(records, policy.layout())?;
    document.sort_by_infinitive();
    document.mark_dirty();

    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    tracing::info!(
        verbs = document.len(),
        irregular = document
            .records()
            .iter()
            .filter(|r| !r.is_fully_regular())
            .count(),
        %policy,
        "migration complete"
    );

    Ok(MigrationOutcome { document, warnings })
}

/// Warnings a migration of `legacy` would produce, without migrating or
/// logging anything.
pub fn preview(legacy: &LegacyDocument) -> Vec<MigrationWarning> {
    canonical_records(legacy).1
}

/// The legacy view with every group replaced by its canonical tag.
///
/// Unrecognized groups are classified by ending; recognized ones spelled
/// differently (`are` for `ARE`) are respelled. Both cases are reported.
fn canonical_records(legacy: &LegacyDocument) -> (Vec<VerbRecord>, Vec<MigrationWarning>) {
    let mut warnings = legacy.warnings().to_vec();
    let mut records = Vec::with_capacity(legacy.records().len());

    for record in legacy.records() {
        let group = record
            .conjugation_group()
            .unwrap_or_else(|| ConjugationGroup::classify(&record.infinitive));
        if group.as_str() == record.group {
            records.push(record.clone());
            continue;
        }
        warnings.push(MigrationWarning::ReclassifiedGroup {
            infinitive: record.infinitive.clone(),
            legacy_group: record.group.clone(),
            group: group.to_string(),
        });
        records.push(VerbRecord {
            infinitive: record.infinitive.clone(),
            group: group.to_string(),
            irregular_tenses: record.irregular_tenses.clone(),
        });
    }

    (records, warnings)
}
