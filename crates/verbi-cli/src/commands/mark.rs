//! The `verbi mark` command.

use anyhow::Result;

use verbi_core::editor;

use super::{join_tenses, Session};

pub fn execute(session: &Session, verb: &str, tenses: &[String], all_tenses: bool) -> Result<()> {
    let mut doc = session.load_editable()?;

    if all_tenses && editor::is_fully_irregular(&doc, verb)? {
        println!("{verb} is already irregular in every tense");
        return Ok(());
    }

    let outcome = if all_tenses {
        editor::mark_all_irregular(&mut doc, verb)?
    } else {
        editor::mark_irregular(&mut doc, verb, tenses)?
    };

    if outcome.is_noop() {
        println!(
            "{} is already irregular in: {}",
            outcome.infinitive,
            join_tenses(&outcome.unchanged)
        );
        return Ok(());
    }

    session.save(&mut doc)?;
    println!(
        "Marked {} irregular in: {}",
        outcome.infinitive,
        join_tenses(&outcome.changed)
    );

    let description = editor::describe(&doc, verb)?;
    println!(
        "{} ({}) is now irregular in: {}",
        description.infinitive,
        description.group,
        join_tenses(&description.irregular_tenses)
    );
    Ok(())
}
