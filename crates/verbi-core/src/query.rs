//! Quiz-style queries over the normalized view of a document.
//!
//! Queries read through [`VerbSource`], which both document formats
//! implement, so results do not depend on whether the database has been
//! migrated yet. Results keep the document's storage order.

use std::fmt;

use serde::Serialize;

use crate::error::VerbError;
use crate::format::{Document, FormatTag, LegacyConvention, LegacyDocument, VerbDocument};
use crate::model::{Tense, VerbRecord};

/// Anything that exposes verbs in normalized form.
pub trait VerbSource {
    /// Format the verbs were loaded from.
    fn format(&self) -> FormatTag;

    /// Verbs in storage order.
    fn records(&self) -> &[VerbRecord];
}

impl VerbSource for VerbDocument {
    fn format(&self) -> FormatTag {
        FormatTag::Normalized
    }

    fn records(&self) -> &[VerbRecord] {
        VerbDocument::records(self)
    }
}

impl VerbSource for LegacyDocument {
    fn format(&self) -> FormatTag {
        FormatTag::Legacy
    }

    fn records(&self) -> &[VerbRecord] {
        LegacyDocument::records(self)
    }
}

impl VerbSource for Document {
    fn format(&self) -> FormatTag {
        Document::format(self)
    }

    fn records(&self) -> &[VerbRecord] {
        match self {
            Document::Legacy(doc) => doc.records(),
            Document::Normalized(doc) => doc.records(),
        }
    }
}

/// Which verbs a quiz request draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupFilter {
    /// Every verb.
    All,
    /// Verbs regular in the tense (or in every tense when none is given).
    Regular,
    /// Verbs irregular in the tense (or in some tense when none is given).
    Irregular,
    /// Verbs of one conjugation group, regardless of irregularity.
    Group(String),
}

impl GroupFilter {
    /// Parse a filter name. The legacy marker name is accepted as an alias
    /// of `IRREGULAR`; any other unreserved name selects a group.
    pub fn parse(name: &str, convention: &LegacyConvention) -> Self {
        let trimmed = name.trim();
        if convention.is_marker(trimmed) {
            return GroupFilter::Irregular;
        }
        match trimmed.to_uppercase().as_str() {
            "ALL" => GroupFilter::All,
            "REGULAR" => GroupFilter::Regular,
            "IRREGULAR" => GroupFilter::Irregular,
            _ => GroupFilter::Group(trimmed.to_string()),
        }
    }

    /// Whether `record` passes this filter for `tense`.
    pub fn matches(&self, record: &VerbRecord, tense: Option<Tense>) -> bool {
        match (self, tense) {
            (GroupFilter::All, _) => true,
            (GroupFilter::Regular, Some(t)) => !record.is_irregular_in(t),
            (GroupFilter::Regular, None) => record.is_fully_regular(),
            (GroupFilter::Irregular, Some(t)) => record.is_irregular_in(t),
            (GroupFilter::Irregular, None) => !record.is_fully_regular(),
            (GroupFilter::Group(name), _) => record.group.eq_ignore_ascii_case(name),
        }
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupFilter::All => write!(f, "ALL"),
            GroupFilter::Regular => write!(f, "REGULAR"),
            GroupFilter::Irregular => write!(f, "IRREGULAR"),
            GroupFilter::Group(name) => write!(f, "{name}"),
        }
    }
}

/// Records matching `filter` in the optional `tense`, in storage order.
///
/// An unrecognized tense fails with [`VerbError::InvalidTense`] whatever
/// the filter.
pub fn filter_records<'a, S: VerbSource + ?Sized>(
    source: &'a S,
    filter: &GroupFilter,
    tense: Option<&str>,
) -> Result<Vec<&'a VerbRecord>, VerbError> {
    let tense = tense.map(str::parse::<Tense>).transpose()?;
    Ok(source
        .records()
        .iter()
        .filter(|r| filter.matches(r, tense))
        .collect())
}

/// Infinitives matching `filter` in the optional `tense`, in storage order.
pub fn filter_by_group_and_tense<S: VerbSource + ?Sized>(
    source: &S,
    filter: &GroupFilter,
    tense: Option<&str>,
) -> Result<Vec<String>, VerbError> {
    Ok(filter_records(source, filter, tense)?
        .into_iter()
        .map(|r| r.infinitive.clone())
        .collect())
}

/// Everything known about one verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerbInfo {
    pub infinitive: String,
    pub group: String,
    /// Irregular tenses in canonical order.
    pub irregular_tenses: Vec<Tense>,
    pub format: FormatTag,
}

/// Case-insensitive lookup of one verb.
pub fn lookup<S: VerbSource + ?Sized>(source: &S, infinitive: &str) -> Result<VerbInfo, VerbError> {
    let record = source
        .records()
        .iter()
        .find(|r| r.matches(infinitive))
        .ok_or_else(|| VerbError::UnknownVerb(infinitive.to_string()))?;
    Ok(VerbInfo {
        infinitive: record.infinitive.clone(),
        group: record.group.clone(),
        irregular_tenses: record.irregular_tenses.iter().copied().collect(),
        format: source.format(),
    })
}

/// Number of verbs per group, in first-seen order.
///
/// Legacy documents report their raw groups, marker group included;
/// normalized documents count records by group.
pub fn group_counts(document: &Document) -> Vec<(String, usize)> {
    match document {
        Document::Legacy(doc) => doc
            .groups()
            .iter()
            .map(|g| (g.name.clone(), g.verbs.len()))
            .collect(),
        Document::Normalized(doc) => {
            let mut counts: Vec<(String, usize)> = Vec::new();
            for record in doc.records() {
                match counts.iter_mut().find(|(g, _)| *g == record.group) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((record.group.clone(), 1)),
                }
            }
            counts
        }
    }
}
