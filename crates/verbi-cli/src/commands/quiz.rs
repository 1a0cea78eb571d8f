//! The `verbi quiz` command.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use verbi_core::query::GroupFilter;
use verbi_core::quiz::draw_question;

use super::Session;

pub fn execute(
    session: &Session,
    groups: Option<Vec<String>>,
    tenses: Option<Vec<String>>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let doc = session.load()?;
    let convention = session.convention();

    let groups: Vec<GroupFilter> = groups
        .unwrap_or_else(|| session.config.quiz_groups.clone())
        .iter()
        .map(|g| GroupFilter::parse(g, &convention))
        .collect();
    let tenses = tenses.unwrap_or_else(|| session.config.quiz_tenses.clone());

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let question = draw_question(&doc, &groups, &tenses, &mut rng)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&question)?);
    } else {
        let marker = if question.is_irregular {
            " [irregular]"
        } else {
            ""
        };
        println!(
            "Conjugate '{}' for '{}' in the {}{marker}",
            question.verb, question.person, question.tense
        );
    }
    Ok(())
}
