//! The `verbi add` command.

use anyhow::{ensure, Result};

use verbi_core::model::{ConjugationGroup, VerbRecord};

use super::Session;

pub fn execute(session: &Session, verb: &str, group: Option<&str>) -> Result<()> {
    let verb = verb.trim();
    ensure!(!verb.is_empty(), "infinitive must not be empty");
    let mut doc = session.load_editable()?;

    let group = match group {
        Some(name) => name.parse::<ConjugationGroup>()?,
        None => ConjugationGroup::classify(verb),
    };
    doc.insert(VerbRecord::regular(verb, group.as_str()))?;

    session.save(&mut doc)?;
    println!("Added {verb} ({group})");
    Ok(())
}
