//! majorchooser CLI: take the quiz and manage the question bank.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "majorchooser",
    version,
    about = "Answer yes/no questions, get a college major recommendation"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Question store file (overrides config)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Catalog TOML file (overrides config)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz
    Quiz {
        /// Answers for every question, comma-separated (e.g. "yes,no,yes").
        /// Reads answers interactively from stdin when omitted.
        #[arg(long)]
        answers: Option<String>,

        /// Print the affinity scores after every answer
        #[arg(long)]
        show_scores: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List majors, or browse one
    Majors {
        /// Major id to show in full
        #[arg(long)]
        id: Option<u32>,
    },

    /// Manage the question bank
    #[command(subcommand)]
    Questions(QuestionCommands),

    /// Check the catalog and the stored questions for data problems
    Validate,

    /// Create a starter config and catalog
    Init,
}

#[derive(Subcommand)]
pub enum QuestionCommands {
    /// List questions
    List {
        /// Show per-major weights
        #[arg(long)]
        weights: bool,
    },

    /// Add a question with all-zero weights
    Add {
        /// Text for the new question
        #[arg(long)]
        text: Option<String>,
    },

    /// Replace a question's text
    SetText {
        /// Question id
        id: u32,
        /// New text
        text: String,
    },

    /// Set one weight of a question
    #[command(allow_negative_numbers = true)]
    SetWeight {
        /// Question id
        id: u32,
        /// Major id the weight applies to
        major: u32,
        /// New weight
        value: f64,
    },

    /// Delete a question and renumber the rest
    Delete {
        /// Question id
        id: u32,
    },
}

/// `RUST_LOG` plus `majorchooser=info`, unless `RUST_LOG` sets that target itself.
fn log_filter() -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    let names_crate = std::env::var("RUST_LOG").is_ok_and(|v| v.contains("majorchooser"));
    if names_crate {
        return filter;
    }
    match "majorchooser=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            answers,
            show_scores,
            format,
        } => commands::quiz::execute(&cli.global, answers, show_scores, format),
        Commands::Majors { id } => commands::majors::execute(&cli.global, id),
        Commands::Questions(command) => commands::questions::execute(&cli.global, command),
        Commands::Validate => commands::validate::execute(&cli.global),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
