//! The `verbi groups` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use verbi_core::query::group_counts;

use super::Session;

pub fn execute(session: &Session) -> Result<()> {
    let doc = session.load()?;
    let counts = group_counts(&doc);

    let mut table = Table::new();
    table.set_header(vec!["Group", "Verbs"]);
    for (group, count) in &counts {
        table.add_row(vec![Cell::new(group), Cell::new(count)]);
    }

    println!("{table}");
    println!("Format: {}", doc.format());
    Ok(())
}
