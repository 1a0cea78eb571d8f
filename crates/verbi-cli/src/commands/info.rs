//! The `verbi info` command.

use anyhow::Result;

use verbi_core::query::lookup;

use super::{join_tenses, Session};

pub fn execute(session: &Session, verb: &str, json: bool) -> Result<()> {
    let doc = session.load()?;
    let info = lookup(&doc, verb)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Verb:      {}", info.infinitive);
    println!("Group:     {}", info.group);
    if info.irregular_tenses.is_empty() {
        println!("Irregular: none");
    } else {
        println!("Irregular: {}", join_tenses(&info.irregular_tenses));
    }
    println!("Format:    {}", info.format);
    Ok(())
}
