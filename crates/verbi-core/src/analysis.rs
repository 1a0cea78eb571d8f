//! Spotting irregular tenses by comparing a verb's conjugation table with
//! the regular paradigm of its group.
//!
//! Only the four simple tenses have a paradigm here; compound tenses are
//! never flagged. The result is a suggestion to review, not a verdict:
//! spelling adjustments such as `mangiare → mangiamo` also count as
//! mismatches.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{ConjugationGroup, Tense};

/// Number of persons compared per tense.
const FORMS_PER_TENSE: usize = 6;

/// Indicative forms of one verb, grouped by tense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConjugationTable {
    pub infinitive: String,
    pub forms: BTreeMap<Tense, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawConjugationFile {
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    conjugations: Vec<RawConjugation>,
}

#[derive(Debug, Deserialize)]
struct RawConjugation {
    #[serde(default)]
    group: String,
    #[serde(default)]
    value: String,
}

fn tense_for_section(section: &str) -> Option<Tense> {
    match section {
        "indicative/present" => Some(Tense::Presente),
        "indicative/imperfect" => Some(Tense::Imperfetto),
        "indicative/future" => Some(Tense::Futuro),
        "indicative/pasthistoric" => Some(Tense::PassatoRemoto),
        _ => None,
    }
}

impl ConjugationTable {
    /// Parse a conjugation export:
    /// `{"word": "...", "conjugations": [{"group": "indicative/present", "value": "..."}]}`.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawConjugationFile =
            serde_json::from_str(content).context("failed to parse conjugation JSON")?;
        let infinitive = raw
            .word
            .or(raw.description)
            .filter(|w| !w.trim().is_empty())
            .context("conjugation file names no verb (missing 'word')")?;

        let mut forms: BTreeMap<Tense, Vec<String>> = BTreeMap::new();
        for entry in raw.conjugations {
            if let Some(tense) = tense_for_section(&entry.group) {
                forms.entry(tense).or_default().push(entry.value);
            }
        }

        Ok(Self {
            infinitive: infinitive.trim().to_string(),
            forms,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read conjugation file: {}", path.display()))?;
        Self::from_json_str(&content).with_context(|| format!("in {}", path.display()))
    }
}

/// The six regular forms of `infinitive` in `tense`, if a paradigm exists.
pub fn regular_forms(infinitive: &str, tense: Tense) -> Option<Vec<String>> {
    let group = ConjugationGroup::classify(infinitive);
    let root = match group {
        ConjugationGroup::Are | ConjugationGroup::Ere | ConjugationGroup::Ire => {
            &infinitive[..infinitive.len() - 3]
        }
        ConjugationGroup::Other => return None,
    };

    let (stem, endings): (String, [&str; 6]) = match (tense, group) {
        (Tense::Presente, ConjugationGroup::Are) => {
            (root.into(), ["o", "i", "a", "iamo", "ate", "ano"])
        }
        (Tense::Presente, ConjugationGroup::Ere) => {
            (root.into(), ["o", "i", "e", "iamo", "ete", "ono"])
        }
        (Tense::Presente, ConjugationGroup::Ire) => {
            (root.into(), ["o", "i", "e", "iamo", "ite", "ono"])
        }
        (Tense::Imperfetto, ConjugationGroup::Are) => {
            (root.into(), ["avo", "avi", "ava", "avamo", "avate", "avano"])
        }
        (Tense::Imperfetto, ConjugationGroup::Ere) => {
            (root.into(), ["evo", "evi", "eva", "evamo", "evate", "evano"])
        }
        (Tense::Imperfetto, ConjugationGroup::Ire) => {
            (root.into(), ["ivo", "ivi", "iva", "ivamo", "ivate", "ivano"])
        }
        (Tense::Futuro, ConjugationGroup::Are) => (
            format!("{root}er"),
            ["ò", "ai", "à", "emo", "ete", "anno"],
        ),
        (Tense::Futuro, _) => (
            infinitive[..infinitive.len() - 1].to_string(),
            ["ò", "ai", "à", "emo", "ete", "anno"],
        ),
        (Tense::PassatoRemoto, ConjugationGroup::Are) => {
            (root.into(), ["ai", "asti", "ò", "ammo", "aste", "arono"])
        }
        (Tense::PassatoRemoto, ConjugationGroup::Ere) => {
            (root.into(), ["ei", "esti", "é", "emmo", "este", "erono"])
        }
        (Tense::PassatoRemoto, _) => {
            (root.into(), ["ii", "isti", "ì", "immo", "iste", "irono"])
        }
        _ => return None,
    };

    Some(endings.iter().map(|e| format!("{stem}{e}")).collect())
}

/// Lowercase, trim and strip the accents Italian conjugations use.
fn normalize_form(form: &str) -> String {
    form.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'à' => 'a',
            'è' | 'é' => 'e',
            'ì' => 'i',
            'ò' => 'o',
            'ù' => 'u',
            other => other,
        })
        .collect()
}

/// One tense whose forms depart from the regular paradigm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenseFinding {
    pub tense: Tense,
    pub mismatches: usize,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
}

/// Outcome of comparing one verb with its paradigm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub infinitive: String,
    pub group: ConjugationGroup,
    pub findings: Vec<TenseFinding>,
}

impl Analysis {
    /// Tenses to mark irregular, in canonical order.
    pub fn irregular_tenses(&self) -> Vec<Tense> {
        self.findings.iter().map(|f| f.tense).collect()
    }

    pub fn is_regular(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Compare every tense of `table` that has a paradigm.
pub fn analyze(table: &ConjugationTable) -> Analysis {
    let infinitive = table.infinitive.to_lowercase();
    let mut findings = Vec::new();

    for (&tense, actual) in &table.forms {
        let Some(expected) = regular_forms(&infinitive, tense) else {
            continue;
        };
        if actual.len() < FORMS_PER_TENSE {
            continue;
        }
        let mismatches = expected
            .iter()
            .zip(actual.iter())
            .filter(|(e, a)| normalize_form(e) != normalize_form(a))
            .count();
        if mismatches > 0 {
            findings.push(TenseFinding {
                tense,
                mismatches,
                expected,
                actual: actual.iter().take(FORMS_PER_TENSE).cloned().collect(),
            });
        }
    }

    Analysis {
        group: ConjugationGroup::classify(&infinitive),
        infinitive,
        findings,
    }
}
