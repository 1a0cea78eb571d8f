//! verbi CLI — manage a database of Italian verbs and the tenses in which
//! they are irregular.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::Session;

#[derive(Parser)]
#[command(
    name = "verbi",
    version,
    about = "Italian verb irregularity database and conjugation quiz"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verb database path (overrides the configured one)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mark a verb irregular in one or more tenses
    Mark {
        /// Infinitive of the verb
        verb: String,

        /// Tenses to mark (e.g. presente futuro)
        #[arg(required_unless_present = "all_tenses")]
        tenses: Vec<String>,

        /// Mark every tense
        #[arg(long, conflicts_with = "tenses")]
        all_tenses: bool,
    },

    /// Clear the irregular flag of a verb in one or more tenses
    Remove {
        /// Infinitive of the verb
        verb: String,

        /// Tenses to clear
        #[arg(required = true)]
        tenses: Vec<String>,
    },

    /// Show a verb's group and irregular tenses
    Info {
        /// Infinitive of the verb
        verb: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the recognized tenses
    Tenses,

    /// List verbs matching a group and tense
    List {
        /// ALL, REGULAR, IRREGULAR, the legacy marker, or a group name
        #[arg(long)]
        group: Option<String>,

        /// Only verbs matching in this tense
        #[arg(long)]
        tense: Option<String>,
    },

    /// Count verbs per group
    Groups,

    /// Add a new, fully regular verb
    Add {
        /// Infinitive of the verb
        verb: String,

        /// Conjugation group (ARE, ERE, IRE, OTHER); derived from the ending if omitted
        #[arg(long)]
        group: Option<String>,
    },

    /// Convert a legacy grouped database to the tense-annotated format
    Migrate {
        /// all-tenses or simplified (default: from config)
        #[arg(long)]
        policy: Option<String>,

        /// Output path (default: <database>.migrated.json)
        #[arg(long, conflicts_with = "in_place")]
        output: Option<PathBuf>,

        /// Overwrite the database itself
        #[arg(long)]
        in_place: bool,
    },

    /// Check that the database loads and report what migration would change
    Validate,

    /// Draw a random conjugation question
    Quiz {
        /// Group filters to draw from (comma-separated)
        #[arg(long, value_delimiter = ',')]
        groups: Option<Vec<String>>,

        /// Tenses to draw from (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tenses: Option<Vec<String>>,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Suggest irregular tenses from conjugation tables
    Analyze {
        /// Conjugation JSON files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Mark the suggested tenses in the database
        #[arg(long)]
        apply: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build a legacy verb database from a directory of word-list files
    Import {
        /// Directory of JSON word lists
        dir: PathBuf,

        /// Output path (default: the configured database)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },

    /// Create a starter config and verb database
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("verbi=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let session = || Session::open(cli.config.as_deref(), cli.database.clone());

    match cli.command {
        Commands::Mark {
            verb,
            tenses,
            all_tenses,
        } => commands::mark::execute(&session()?, &verb, &tenses, all_tenses),
        Commands::Remove { verb, tenses } => commands::remove::execute(&session()?, &verb, &tenses),
        Commands::Info { verb, json } => commands::info::execute(&session()?, &verb, json),
        Commands::Tenses => commands::tenses::execute(),
        Commands::List { group, tense } => {
            commands::list::execute(&session()?, group.as_deref(), tense.as_deref())
        }
        Commands::Groups => commands::groups::execute(&session()?),
        Commands::Add { verb, group } => {
            commands::add::execute(&session()?, &verb, group.as_deref())
        }
        Commands::Migrate {
            policy,
            output,
            in_place,
        } => commands::migrate::execute(&session()?, policy.as_deref(), output, in_place),
        Commands::Validate => commands::validate::execute(&session()?),
        Commands::Quiz {
            groups,
            tenses,
            seed,
            json,
        } => commands::quiz::execute(&session()?, groups, tenses, seed, json),
        Commands::Analyze { files, apply, json } => {
            commands::analyze::execute(&session()?, &files, apply, json)
        }
        Commands::Import { dir, output, force } => {
            commands::import::execute(&session()?, &dir, output, force)
        }
        Commands::Init => commands::init::execute(),
    }
}
