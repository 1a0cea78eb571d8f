//! Targeted edits of a single verb's irregular tenses.
//!
//! Every operation validates its whole request before touching the
//! document, so a rejected request leaves the document exactly as it was.
//! Successful edits mark the document dirty; persisting it is up to the
//! caller (see [`crate::store::save`]).

use serde::Serialize;

use crate::error::VerbError;
use crate::format::VerbDocument;
use crate::model::{all_tenses, Tense};

/// What an edit did, tense by tense.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub infinitive: String,
    /// Tenses whose state changed.
    pub changed: Vec<Tense>,
    /// Tenses that were already in the requested state.
    pub unchanged: Vec<Tense>,
}

impl EditOutcome {
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Display data for one verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerbDescription {
    pub infinitive: String,
    pub group: String,
    /// Irregular tenses in canonical order.
    pub irregular_tenses: Vec<Tense>,
}

/// Add `tenses` to the verb's irregular set.
pub fn mark_irregular<S: AsRef<str>>(
    doc: &mut VerbDocument,
    infinitive: &str,
    tenses: &[S],
) -> Result<EditOutcome, VerbError> {
    let requested = Tense::parse_all(tenses)?;
    let record = doc
        .get_mut(infinitive)
        .ok_or_else(|| VerbError::UnknownVerb(infinitive.to_string()))?;

    let mut outcome = EditOutcome {
        infinitive: record.infinitive.clone(),
        ..Default::default()
    };
    for tense in requested {
        if record.irregular_tenses.insert(tense) {
            outcome.changed.push(tense);
        } else {
            outcome.unchanged.push(tense);
        }
    }

    if !outcome.is_noop() {
        doc.mark_dirty();
        tracing::debug!(verb = %outcome.infinitive, changed = ?outcome.changed, "marked irregular");
    }
    Ok(outcome)
}

/// Mark the verb irregular in all eight tenses.
pub fn mark_all_irregular(doc: &mut VerbDocument, infinitive: &str) -> Result<EditOutcome, VerbError> {
    let names = Tense::names();
    mark_irregular(doc, infinitive, names.as_slice())
}

/// Remove one tense from the verb's irregular set. Removing a tense that
/// is not there is a no-op.
pub fn remove_irregular(
    doc: &mut VerbDocument,
    infinitive: &str,
    tense: &str,
) -> Result<EditOutcome, VerbError> {
    remove_irregular_many(doc, infinitive, &[tense])
}

/// Remove several tenses at once, all-or-nothing.
pub fn remove_irregular_many<S: AsRef<str>>(
    doc: &mut VerbDocument,
    infinitive: &str,
    tenses: &[S],
) -> Result<EditOutcome, VerbError> {
    let requested = Tense::parse_all(tenses)?;
    let record = doc
        .get_mut(infinitive)
        .ok_or_else(|| VerbError::UnknownVerb(infinitive.to_string()))?;

    let mut outcome = EditOutcome {
        infinitive: record.infinitive.clone(),
        ..Default::default()
    };
    for tense in requested {
        if record.irregular_tenses.remove(&tense) {
            outcome.changed.push(tense);
        } else {
            outcome.unchanged.push(tense);
        }
    }

    if !outcome.is_noop() {
        doc.mark_dirty();
        tracing::debug!(verb = %outcome.infinitive, changed = ?outcome.changed, "marked regular");
    }
    Ok(outcome)
}

/// Group and sorted irregular tenses of a verb.
pub fn describe(doc: &VerbDocument, infinitive: &str) -> Result<VerbDescription, VerbError> {
    let record = doc
        .get(infinitive)
        .ok_or_else(|| VerbError::UnknownVerb(infinitive.to_string()))?;
    Ok(VerbDescription {
        infinitive: record.infinitive.clone(),
        group: record.group.clone(),
        irregular_tenses: record.irregular_tenses.iter().copied().collect(),
    })
}

/// Whether every tense is marked, i.e. `mark_all_irregular` would be a no-op.
pub fn is_fully_irregular(doc: &VerbDocument, infinitive: &str) -> Result<bool, VerbError> {
    let record = doc
        .get(infinitive)
        .ok_or_else(|| VerbError::UnknownVerb(infinitive.to_string()))?;
    Ok(record.irregular_tenses == all_tenses())
}
