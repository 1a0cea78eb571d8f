//! The `verbi init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing("verbi.toml", SAMPLE_CONFIG)?;
    write_if_missing("verbs.json", SAMPLE_DATABASE)?;

    println!("\nNext steps:");
    println!("  1. Run: verbi validate");
    println!("  2. Run: verbi migrate --in-place");
    println!("  3. Run: verbi mark andare presente futuro");
    println!("  4. Run: verbi quiz");

    Ok(())
}

fn write_if_missing(path: &str, contents: &str) -> Result<()> {
    if Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, contents)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# verbi configuration

# Verb database (legacy grouped or tense-annotated JSON)
database = "verbs.json"

# Legacy group whose members are irregular in every tense
irregular_marker = "ONREGELMATIG"

# Layout written by `verbi migrate`: "simplified" or "all-tenses"
migration_policy = "simplified"

# Defaults for `verbi quiz`
quiz_groups = ["ARE", "ONREGELMATIG"]
quiz_tenses = ["presente"]
"#;

const SAMPLE_DATABASE: &str = r#"{
  "ARE": ["parlare", "mangiare", "andare", "fare"],
  "ERE": ["credere", "vedere", "essere", "avere"],
  "IRE": ["dormire", "partire", "venire"],
  "ONREGELMATIG": ["andare", "fare", "essere", "avere", "venire"]
}
"#;
