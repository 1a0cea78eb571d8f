//! verbi-core — Data model, legacy migration and queries for Italian verb
//! databases.
//!
//! A verb database records, for every verb, the tenses in which it is
//! irregular. This crate reads both the legacy group-keyed files and the
//! tense-annotated format, migrates between them, edits and queries records,
//! and draws quiz questions.

pub mod analysis;
pub mod config;
pub mod editor;
pub mod error;
pub mod format;
pub mod importer;
pub mod migrate;
pub mod model;
pub mod query;
pub mod quiz;
pub mod store;
