//! Random quiz questions.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::error::VerbError;
use crate::model::Tense;
use crate::query::{filter_records, GroupFilter, VerbSource};

/// Grammatical persons in the order conjugation tables list them.
pub const PERSONS: [&str; 7] = ["io", "tu", "lui", "lei", "noi", "voi", "loro"];

/// One conjugation exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub verb: String,
    pub person: String,
    pub tense: Tense,
    /// The group filter the verb was drawn from.
    pub group: String,
    /// Whether the verb is irregular in `tense`.
    pub is_irregular: bool,
}

/// Draw a question: pick a tense, then a group filter, then a verb matching
/// both, then a person.
///
/// All tense names are checked before drawing. An empty `groups` list means
/// every verb; an empty `tenses` list means every tense.
pub fn draw_question<S, T, R>(
    source: &S,
    groups: &[GroupFilter],
    tenses: &[T],
    rng: &mut R,
) -> Result<QuizQuestion, VerbError>
where
    S: VerbSource + ?Sized,
    T: AsRef<str>,
    R: Rng,
{
    let tenses: Vec<Tense> = if tenses.is_empty() {
        Tense::ALL.to_vec()
    } else {
        Tense::parse_all(tenses)?.into_iter().collect()
    };
    let all = [GroupFilter::All];
    let groups = if groups.is_empty() { &all[..] } else { groups };

    // Neither list is empty here.
    let tense = tenses[rng.gen_range(0..tenses.len())];
    let group = &groups[rng.gen_range(0..groups.len())];

    let candidates = filter_records(source, group, Some(tense.as_str()))?;
    let record = candidates
        .choose(rng)
        .ok_or_else(|| VerbError::NoMatchingVerbs {
            group: group.to_string(),
            tense: tense.to_string(),
        })?;
    let person = PERSONS[rng.gen_range(0..PERSONS.len())];

    Ok(QuizQuestion {
        verb: record.infinitive.clone(),
        person: person.to_string(),
        tense,
        group: group.to_string(),
        is_irregular: record.is_irregular_in(tense),
    })
}
