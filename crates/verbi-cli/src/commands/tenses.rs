//! The `verbi tenses` command.

use anyhow::Result;

use verbi_core::model::Tense;

pub fn execute() -> Result<()> {
    for tense in Tense::ALL {
        println!("{tense}");
    }
    Ok(())
}
