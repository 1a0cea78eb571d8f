//! Document formats and the format detector.
//!
//! A verb database exists on disk in one of two shapes:
//!
//! * **legacy**: conjugation-group names mapped to lists of infinitives,
//!   with one distinguished marker group whose members count as irregular
//!   in every tense;
//! * **normalized**: a `verbs` list of objects, each carrying its own set
//!   of irregular tenses, written either in the simplified layout
//!   (`irregular_tenses: [...]`) or the full layout
//!   (`tenses: {name: {irregular: bool}}`).
//!
//! The shape is decoded once into [`Document`]. Legacy documents are
//! read-only: their normalized view is computed at construction and
//! mutation requires running the migration first.

use std::collections::{HashMap, HashSet};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::VerbError;
use crate::migrate::MigrationWarning;
use crate::model::{all_tenses, ConjugationGroup, Tense, TenseSet, ValidationMode, VerbRecord};

/// Marker group name used by the historical database.
pub const DEFAULT_IRREGULAR_MARKER: &str = "ONREGELMATIG";

/// Conventions of the legacy format that are not visible in its structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyConvention {
    /// Name of the group whose members are irregular in every tense.
    pub irregular_marker: String,
}

impl LegacyConvention {
    pub fn new(irregular_marker: impl Into<String>) -> Self {
        Self {
            irregular_marker: irregular_marker.into(),
        }
    }

    pub fn is_marker(&self, group: &str) -> bool {
        group == self.irregular_marker
    }
}

impl Default for LegacyConvention {
    fn default() -> Self {
        Self::new(DEFAULT_IRREGULAR_MARKER)
    }
}

/// Which on-disk format a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Legacy,
    Normalized,
}

impl std::fmt::Display for FormatTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatTag::Legacy => write!(f, "legacy"),
            FormatTag::Normalized => write!(f, "normalized"),
        }
    }
}

/// How a normalized document lists tenses on disk. Both layouts carry the
/// same information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TenseLayout {
    /// Only the irregular tenses, as a list.
    #[default]
    Simplified,
    /// Every tense with an explicit `irregular` flag.
    Full,
}

/// A named list of infinitives in a legacy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyGroup {
    pub name: String,
    pub verbs: Vec<String>,
}

impl LegacyGroup {
    pub fn new(name: impl Into<String>, verbs: Vec<String>) -> Self {
        Self {
            name: name.into(),
            verbs,
        }
    }
}

/// A legacy-grouped document together with its precomputed normalized view.
#[derive(Debug, Clone)]
pub struct LegacyDocument {
    groups: Vec<LegacyGroup>,
    convention: LegacyConvention,
    view: Vec<VerbRecord>,
    warnings: Vec<MigrationWarning>,
}

impl LegacyDocument {
    pub fn new(groups: Vec<LegacyGroup>, convention: LegacyConvention) -> Self {
        let (view, warnings) = build_view(&groups, &convention);
        Self {
            groups,
            convention,
            view,
            warnings,
        }
    }

    pub fn groups(&self) -> &[LegacyGroup] {
        &self.groups
    }

    pub fn convention(&self) -> &LegacyConvention {
        &self.convention
    }

    /// The normalized view: one record per distinct verb.
    pub fn records(&self) -> &[VerbRecord] {
        &self.view
    }

    /// Problems found while building the view (duplicates).
    pub fn warnings(&self) -> &[MigrationWarning] {
        &self.warnings
    }

    /// Direct marker-group membership test, bypassing the view.
    pub fn in_marker_group(&self, infinitive: &str) -> bool {
        let wanted = infinitive.to_lowercase();
        self.groups
            .iter()
            .filter(|g| self.convention.is_marker(&g.name))
            .flat_map(|g| g.verbs.iter())
            .any(|v| v.to_lowercase() == wanted)
    }

    /// Serialize back to the group-keyed shape, preserving group order.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let map: serde_json::Map<String, Value> = self
            .groups
            .iter()
            .map(|g| {
                let verbs = g.verbs.iter().cloned().map(Value::String).collect();
                (g.name.clone(), Value::Array(verbs))
            })
            .collect();
        serde_json::to_string_pretty(&map)
    }
}

/// Translate legacy groups into verb records.
///
/// Marker members are irregular in all tenses. A verb listed under several
/// non-marker groups keeps the first one. Verbs that only appear in the
/// marker group are classified by their ending.
fn build_view(
    groups: &[LegacyGroup],
    convention: &LegacyConvention,
) -> (Vec<VerbRecord>, Vec<MigrationWarning>) {
    let irregular: HashSet<String> = groups
        .iter()
        .filter(|g| convention.is_marker(&g.name))
        .flat_map(|g| g.verbs.iter().map(|v| v.to_lowercase()))
        .collect();

    let mut seen: HashMap<String, String> = HashMap::new();
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for group in groups.iter().filter(|g| !convention.is_marker(&g.name)) {
        for verb in &group.verbs {
            let key = verb.to_lowercase();
            if let Some(kept) = seen.get(&key) {
                warnings.push(MigrationWarning::DuplicateVerb {
                    infinitive: verb.clone(),
                    kept_group: kept.clone(),
                    dropped_group: group.name.clone(),
                });
                continue;
            }
            seen.insert(key.clone(), group.name.clone());
            let irregular_tenses = if irregular.contains(&key) {
                all_tenses()
            } else {
                TenseSet::new()
            };
            records.push(VerbRecord {
                infinitive: verb.clone(),
                group: group.name.clone(),
                irregular_tenses,
            });
        }
    }

    for group in groups.iter().filter(|g| convention.is_marker(&g.name)) {
        for verb in &group.verbs {
            let key = verb.to_lowercase();
            if let Some(kept) = seen.get(&key) {
                // Membership in the marker group alongside a real group is
                // the normal case; only a repeat within the marker is noise.
                if convention.is_marker(kept) {
                    warnings.push(MigrationWarning::DuplicateVerb {
                        infinitive: verb.clone(),
                        kept_group: kept.clone(),
                        dropped_group: group.name.clone(),
                    });
                }
                continue;
            }
            seen.insert(key, group.name.clone());
            records.push(VerbRecord::fully_irregular(
                verb.clone(),
                ConjugationGroup::classify(verb).as_str(),
            ));
        }
    }

    (records, warnings)
}

/// A tense-annotated document: the only kind that can be edited and saved.
#[derive(Debug, Clone, Default)]
pub struct VerbDocument {
    verbs: Vec<VerbRecord>,
    layout: TenseLayout,
    dirty: bool,
}

impl PartialEq for VerbDocument {
    fn eq(&self, other: &Self) -> bool {
        self.verbs == other.verbs && self.layout == other.layout
    }
}

impl VerbDocument {
    pub fn new(layout: TenseLayout) -> Self {
        Self {
            verbs: Vec::new(),
            layout,
            dirty: false,
        }
    }

    /// Build a document from records, validating each one as it is added.
    pub fn from_records(
        records: impl IntoIterator<Item = VerbRecord>,
        layout: TenseLayout,
    ) -> Result<Self, VerbError> {
        let mut doc = Self::new(layout);
        for record in records {
            doc.insert(record)?;
        }
        doc.dirty = false;
        Ok(doc)
    }

    /// Validate and append a record.
    pub fn insert(&mut self, record: VerbRecord) -> Result<(), VerbError> {
        record.validate(ValidationMode::Strict)?;
        if self.get(&record.infinitive).is_some() {
            return Err(VerbError::DuplicateInfinitive(record.infinitive));
        }
        self.verbs.push(record);
        self.dirty = true;
        Ok(())
    }

    pub fn records(&self) -> &[VerbRecord] {
        &self.verbs
    }

    /// Case-insensitive lookup.
    pub fn get(&self, infinitive: &str) -> Option<&VerbRecord> {
        self.verbs.iter().find(|v| v.matches(infinitive))
    }

    pub(crate) fn get_mut(&mut self, infinitive: &str) -> Option<&mut VerbRecord> {
        self.verbs.iter_mut().find(|v| v.matches(infinitive))
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn layout(&self) -> TenseLayout {
        self.layout
    }

    /// Whether the document changed since it was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn sort_by_infinitive(&mut self) {
        self.verbs.sort_by(|a, b| a.infinitive.cmp(&b.infinitive));
    }

    /// Serialize in this document's layout.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        match self.layout {
            TenseLayout::Simplified => {
                let file = SimplifiedFile {
                    verbs: self
                        .verbs
                        .iter()
                        .map(|v| SimplifiedEntry {
                            infinitive: &v.infinitive,
                            group: &v.group,
                            irregular_tenses: v.irregular_tenses.iter().copied().collect(),
                        })
                        .collect(),
                };
                serde_json::to_string_pretty(&file)
            }
            TenseLayout::Full => {
                let file = FullFile {
                    verbs: self
                        .verbs
                        .iter()
                        .map(|v| FullEntry {
                            infinitive: &v.infinitive,
                            group: &v.group,
                            tenses: TenseFlags(&v.irregular_tenses),
                        })
                        .collect(),
                };
                serde_json::to_string_pretty(&file)
            }
        }
    }
}

/// A decoded verb database in either format.
#[derive(Debug, Clone)]
pub enum Document {
    Legacy(LegacyDocument),
    Normalized(VerbDocument),
}

impl Document {
    /// Decode a JSON string, detecting its format.
    pub fn from_json_str(content: &str, convention: &LegacyConvention) -> Result<Self, VerbError> {
        let raw: RawDocument = serde_json::from_str(content)
            .map_err(|e| VerbError::UnrecognizedFormat(e.to_string()))?;
        Self::from_raw(raw, convention)
    }

    fn from_raw(raw: RawDocument, convention: &LegacyConvention) -> Result<Self, VerbError> {
        match raw {
            RawDocument::Normalized { verbs } => {
                let layout = if verbs.iter().any(|v| v.tenses.is_some()) {
                    TenseLayout::Full
                } else {
                    TenseLayout::Simplified
                };
                let records = verbs
                    .into_iter()
                    .map(RawVerbEntry::into_record)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Document::Normalized(VerbDocument::from_records(
                    records, layout,
                )?))
            }
            RawDocument::Legacy(map) => {
                let mut groups = Vec::with_capacity(map.len());
                for (name, value) in map {
                    let verbs = value
                        .as_array()
                        .and_then(|items| {
                            items
                                .iter()
                                .map(|v| v.as_str().map(str::to_string))
                                .collect::<Option<Vec<_>>>()
                        })
                        .ok_or_else(|| {
                            if name == "verbs" {
                                VerbError::UnrecognizedFormat(
                                    "malformed entry in 'verbs' list".into(),
                                )
                            } else {
                                VerbError::UnrecognizedFormat(format!(
                                    "group '{name}' is not a list of infinitives"
                                ))
                            }
                        })?;
                    groups.push(LegacyGroup { name, verbs });
                }
                Ok(Document::Legacy(LegacyDocument::new(
                    groups,
                    convention.clone(),
                )))
            }
        }
    }

    pub fn format(&self) -> FormatTag {
        match self {
            Document::Legacy(_) => FormatTag::Legacy,
            Document::Normalized(_) => FormatTag::Normalized,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        match self {
            Document::Legacy(doc) => doc.to_json_pretty(),
            Document::Normalized(doc) => doc.to_json_pretty(),
        }
    }
}

// ---------------------------------------------------------------------------
// On-disk shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Normalized { verbs: Vec<RawVerbEntry> },
    Legacy(serde_json::Map<String, Value>),
}

#[derive(Debug, Deserialize)]
struct RawVerbEntry {
    infinitive: String,
    group: String,
    #[serde(default)]
    irregular_tenses: Option<Vec<String>>,
    #[serde(default)]
    tenses: Option<HashMap<String, RawTenseFlag>>,
}

#[derive(Debug, Deserialize)]
struct RawTenseFlag {
    #[serde(default)]
    irregular: bool,
}

impl RawVerbEntry {
    fn into_record(self) -> Result<VerbRecord, VerbError> {
        let irregular_tenses = match (self.irregular_tenses, self.tenses) {
            (Some(list), _) => Tense::parse_all(list.as_slice())?,
            (None, Some(flags)) => {
                let mut set = TenseSet::new();
                for (name, flag) in flags {
                    let tense: Tense = name.parse()?;
                    if flag.irregular {
                        set.insert(tense);
                    }
                }
                set
            }
            (None, None) => TenseSet::new(),
        };
        Ok(VerbRecord {
            infinitive: self.infinitive,
            group: self.group,
            irregular_tenses,
        })
    }
}

#[derive(Serialize)]
struct SimplifiedFile<'a> {
    verbs: Vec<SimplifiedEntry<'a>>,
}

#[derive(Serialize)]
struct SimplifiedEntry<'a> {
    infinitive: &'a str,
    group: &'a str,
    irregular_tenses: Vec<Tense>,
}

#[derive(Serialize)]
struct FullFile<'a> {
    verbs: Vec<FullEntry<'a>>,
}

#[derive(Serialize)]
struct FullEntry<'a> {
    infinitive: &'a str,
    group: &'a str,
    tenses: TenseFlags<'a>,
}

/// Every tense in canonical order, each with its `irregular` flag.
struct TenseFlags<'a>(&'a TenseSet);

#[derive(Serialize)]
struct TenseFlagOut {
    irregular: bool,
}

impl Serialize for TenseFlags<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Tense::ALL.len()))?;
        for tense in Tense::ALL {
            map.serialize_entry(
                tense.as_str(),
                &TenseFlagOut {
                    irregular: self.0.contains(&tense),
                },
            )?;
        }
        map.end()
    }
}
