//! Domain error types.
//!
//! Every variant is a local validation failure: operations check their
//! inputs before touching a document, so an error never leaves a document
//! partially modified. The offending value is carried so callers can
//! present it however they like (CLI message, HTTP status, ...).

use thiserror::Error;

/// Errors raised by the verb model, the format detector, the editor and
/// the query engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerbError {
    /// A tense name outside the eight recognized tenses.
    #[error("invalid tense: '{0}' (available: {tenses})", tenses = crate::model::Tense::names().join(", "))]
    InvalidTense(String),

    /// A conjugation group that is not one of the recognized classes.
    #[error("invalid conjugation group: '{0}'")]
    InvalidGroup(String),

    /// The document already holds a verb with this infinitive.
    #[error("duplicate infinitive: '{0}'")]
    DuplicateInfinitive(String),

    /// No verb with this infinitive exists in the document.
    #[error("verb '{0}' not found")]
    UnknownVerb(String),

    /// The input matches neither the legacy nor the normalized shape.
    #[error("unrecognized document format: {0}")]
    UnrecognizedFormat(String),

    /// A quiz draw found no verb for the chosen group and tense.
    #[error("no verbs found for group '{group}' and tense '{tense}'")]
    NoMatchingVerbs { group: String, tense: String },
}

impl VerbError {
    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            VerbError::InvalidTense(_) => "InvalidTense",
            VerbError::InvalidGroup(_) => "InvalidGroup",
            VerbError::DuplicateInfinitive(_) => "DuplicateInfinitive",
            VerbError::UnknownVerb(_) => "UnknownVerb",
            VerbError::UnrecognizedFormat(_) => "UnrecognizedFormat",
            VerbError::NoMatchingVerbs { .. } => "NoMatchingVerbs",
        }
    }
}
