//! The `verbi remove` command.

use anyhow::Result;

use verbi_core::editor;

use super::{join_tenses, Session};

pub fn execute(session: &Session, verb: &str, tenses: &[String]) -> Result<()> {
    let mut doc = session.load_editable()?;
    let outcome = editor::remove_irregular_many(&mut doc, verb, tenses)?;

    if outcome.is_noop() {
        println!(
            "{} was not irregular in: {}",
            outcome.infinitive,
            join_tenses(&outcome.unchanged)
        );
        return Ok(());
    }

    session.save(&mut doc)?;
    println!(
        "Cleared {} in: {}",
        outcome.infinitive,
        join_tenses(&outcome.changed)
    );

    let description = editor::describe(&doc, verb)?;
    if description.irregular_tenses.is_empty() {
        println!("{} is now regular in every tense", description.infinitive);
    } else {
        println!(
            "{} is still irregular in: {}",
            description.infinitive,
            join_tenses(&description.irregular_tenses)
        );
    }
    Ok(())
}
