//! Core data model types for verbi.
//!
//! A verb is identified by its infinitive, belongs to a conjugation group
//! and carries the set of tenses in which it is irregular.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VerbError;

/// The eight indicative tenses for which irregularity is tracked.
///
/// Declaration order is the canonical display order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tense {
    Presente,
    Imperfetto,
    Futuro,
    PassatoRemoto,
    PassatoProssimo,
    TrapassatoProssimo,
    TrapassatoRemoto,
    FuturoAnteriore,
}

impl Tense {
    /// All tenses in canonical order.
    pub const ALL: [Tense; 8] = [
        Tense::Presente,
        Tense::Imperfetto,
        Tense::Futuro,
        Tense::PassatoRemoto,
        Tense::PassatoProssimo,
        Tense::TrapassatoProssimo,
        Tense::TrapassatoRemoto,
        Tense::FuturoAnteriore,
    ];

    /// The on-disk name of this tense.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tense::Presente => "presente",
            Tense::Imperfetto => "imperfetto",
            Tense::Futuro => "futuro",
            Tense::PassatoRemoto => "passato_remoto",
            Tense::PassatoProssimo => "passato_prossimo",
            Tense::TrapassatoProssimo => "trapassato_prossimo",
            Tense::TrapassatoRemoto => "trapassato_remoto",
            Tense::FuturoAnteriore => "futuro_anteriore",
        }
    }

    /// On-disk names of all tenses in canonical order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Tense::as_str).collect()
    }

    /// Parse every name, failing on the first unknown one.
    pub fn parse_all<S: AsRef<str>>(names: &[S]) -> Result<TenseSet, VerbError> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tense {
    type Err = VerbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tense::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| VerbError::InvalidTense(s.to_string()))
    }
}

/// A set of tenses. Iteration yields canonical order.
pub type TenseSet = BTreeSet<Tense>;

/// The full set of eight tenses.
pub fn all_tenses() -> TenseSet {
    Tense::ALL.into_iter().collect()
}

/// Recognized conjugation classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConjugationGroup {
    Are,
    Ere,
    Ire,
    Other,
}

impl ConjugationGroup {
    pub const ALL: [ConjugationGroup; 4] = [
        ConjugationGroup::Are,
        ConjugationGroup::Ere,
        ConjugationGroup::Ire,
        ConjugationGroup::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConjugationGroup::Are => "ARE",
            ConjugationGroup::Ere => "ERE",
            ConjugationGroup::Ire => "IRE",
            ConjugationGroup::Other => "OTHER",
        }
    }

    /// Classify an infinitive by its ending.
    pub fn classify(infinitive: &str) -> Self {
        let lower = infinitive.to_lowercase();
        if lower.ends_with("are") {
            ConjugationGroup::Are
        } else if lower.ends_with("ere") {
            ConjugationGroup::Ere
        } else if lower.ends_with("ire") {
            ConjugationGroup::Ire
        } else {
            ConjugationGroup::Other
        }
    }
}

impl fmt::Display for ConjugationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConjugationGroup {
    type Err = VerbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConjugationGroup::ALL
            .iter()
            .copied()
            .find(|g| g.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| VerbError::InvalidGroup(s.to_string()))
    }
}

/// How strictly the `group` field is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// The group must be the exact tag of a [`ConjugationGroup`].
    Strict,
    /// Unknown groups from legacy documents pass through as opaque strings.
    LegacyPassthrough,
}

/// A single verb and the tenses in which it is irregular.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbRecord {
    pub infinitive: String,
    /// Conjugation group tag as stored on disk.
    pub group: String,
    pub irregular_tenses: TenseSet,
}

impl VerbRecord {
    /// A fully regular verb.
    pub fn regular(infinitive: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            infinitive: infinitive.into(),
            group: group.into(),
            irregular_tenses: TenseSet::new(),
        }
    }

    /// A verb irregular in every tense.
    pub fn fully_irregular(infinitive: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            infinitive: infinitive.into(),
            group: group.into(),
            irregular_tenses: all_tenses(),
        }
    }

    /// Check the record's group against the recognized classes.
    ///
    /// Tenses need no check here: a [`TenseSet`] cannot hold an unknown
    /// tense, so `InvalidTense` is raised when names are decoded.
    pub fn validate(&self, mode: ValidationMode) -> Result<(), VerbError> {
        let canonical = ConjugationGroup::ALL
            .iter()
            .any(|g| g.as_str() == self.group);
        if mode == ValidationMode::Strict && !canonical {
            return Err(VerbError::InvalidGroup(self.group.clone()));
        }
        Ok(())
    }

    /// The recognized conjugation group, if the tag is one.
    pub fn conjugation_group(&self) -> Option<ConjugationGroup> {
        self.group.parse().ok()
    }

    pub fn is_irregular_in(&self, tense: Tense) -> bool {
        self.irregular_tenses.contains(&tense)
    }

    /// Like [`is_irregular_in`](Self::is_irregular_in) but takes a tense name.
    pub fn is_irregular_in_named(&self, tense: &str) -> Result<bool, VerbError> {
        Ok(self.is_irregular_in(tense.parse()?))
    }

    pub fn is_fully_regular(&self) -> bool {
        self.irregular_tenses.is_empty()
    }

    /// Whether this record's infinitive matches `infinitive`, ignoring case.
    pub fn matches(&self, infinitive: &str) -> bool {
        self.infinitive
            .chars()
            .flat_map(char::to_lowercase)
            .eq(infinitive.chars().flat_map(char::to_lowercase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tense_display_and_parse() {
        assert_eq!(Tense::PassatoRemoto.to_string(), "passato_remoto");
        assert_eq!("futuro".parse::<Tense>().unwrap(), Tense::Futuro);
        assert_eq!(
            "futuro_anteriore".parse::<Tense>().unwrap(),
            Tense::FuturoAnteriore
        );
        assert_eq!(
            "futuro_semplice".parse::<Tense>(),
            Err(VerbError::InvalidTense("futuro_semplice".into()))
        );
        // Names are exact; no silent case correction.
        assert!("Presente".parse::<Tense>().is_err());
    }

    #[test]
    fn tense_serde_uses_disk_names() {
        let json = serde_json::to_string(&Tense::TrapassatoProssimo).unwrap();
        assert_eq!(json, "\"trapassato_prossimo\"");
        for tense in Tense::ALL {
            let back: Tense = serde_json::from_str(&format!("\"{tense}\"")).unwrap();
            assert_eq!(back, tense);
        }
    }

    #[test]
    fn tense_set_iterates_in_canonical_order() {
        let set = Tense::parse_all(&["passato_remoto", "presente", "futuro"]).unwrap();
        let ordered: Vec<_> = set.iter().map(Tense::as_str).collect();
        assert_eq!(ordered, vec!["presente", "futuro", "passato_remoto"]);
    }

    #[test]
    fn parse_all_rejects_unknown() {
        let err = Tense::parse_all(&["presente", "bogus"]).unwrap_err();
        assert_eq!(err, VerbError::InvalidTense("bogus".into()));
    }

    #[test]
    fn classify_by_ending() {
        assert_eq!(ConjugationGroup::classify("parlare"), ConjugationGroup::Are);
        assert_eq!(ConjugationGroup::classify("credere"), ConjugationGroup::Ere);
        assert_eq!(ConjugationGroup::classify("dormire"), ConjugationGroup::Ire);
        assert_eq!(ConjugationGroup::classify("porre"), ConjugationGroup::Other);
        assert_eq!(ConjugationGroup::classify("trarre"), ConjugationGroup::Other);
    }

    #[test]
    fn validate_group() {
        let ok = VerbRecord::regular("parlare", "ARE");
        assert!(ok.validate(ValidationMode::Strict).is_ok());

        let odd = VerbRecord::regular("parlare", "VERBI_MODALI");
        assert_eq!(
            odd.validate(ValidationMode::Strict),
            Err(VerbError::InvalidGroup("VERBI_MODALI".into()))
        );
        assert!(odd.validate(ValidationMode::LegacyPassthrough).is_ok());
        assert!(odd.conjugation_group().is_none());

        let lowercase = VerbRecord::regular("parlare", "are");
        assert_eq!(
            lowercase.validate(ValidationMode::Strict),
            Err(VerbError::InvalidGroup("are".into()))
        );
        assert_eq!(lowercase.conjugation_group(), Some(ConjugationGroup::Are));
    }

    #[test]
    fn infinitive_matching_ignores_case_beyond_ascii() {
        let rec = VerbRecord::regular("Èssere", "ERE");
        assert!(rec.matches("èSSERE"));
        assert!(rec.matches("ÈSSERE"));
        assert!(!rec.matches("essere"));
        assert!(!rec.matches("èsser"));
    }

    #[test]
    fn irregularity_checks() {
        let mut andare = VerbRecord::regular("andare", "ARE");
        assert!(andare.is_fully_regular());
        andare.irregular_tenses.insert(Tense::Presente);
        assert!(!andare.is_fully_regular());
        assert!(andare.is_irregular_in(Tense::Presente));
        assert!(!andare.is_irregular_in_named("imperfetto").unwrap());
        assert!(andare.is_irregular_in_named("nope").is_err());

        let essere = VerbRecord::fully_irregular("essere", "ERE");
        assert_eq!(essere.irregular_tenses.len(), 8);
    }

    #[test]
    fn infinitive_match_ignores_case() {
        let rec = VerbRecord::regular("andare", "ARE");
        assert!(rec.matches("ANDARE"));
        assert!(!rec.matches("andar"));
    }
}
