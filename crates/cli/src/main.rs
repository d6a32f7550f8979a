//! Atelier CLI - database migrations and workflow inspection.
//!
//! # Usage
//!
//! ```bash
//! # Run ticket database migrations
//! atelier migrate
//!
//! # Inspect the workflow
//! atelier statuses list --category design
//! atelier statuses next sketch-review
//! atelier statuses check quality-check polishing
//! atelier statuses action-required
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `statuses` - Query the built-in status workflow

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use atelier_core::WorkflowEngine;

mod commands;

use commands::statuses::{self, OutputFormat};

#[derive(Parser)]
#[command(name = "atelier")]
#[command(author, version, about = "Atelier CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Query the status workflow
    Statuses {
        #[command(subcommand)]
        action: StatusAction,
    },
}

#[derive(Subcommand)]
enum StatusAction {
    /// List internal statuses
    List {
        /// Only statuses in this phase (e.g. `design`, `production`)
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show the statuses a ticket can move to
    Next {
        /// Current internal status
        status: String,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Check whether a move is allowed (exit code 1 if not)
    Check {
        /// Current internal status
        from: String,
        /// Target internal status
        to: String,
    },
    /// List statuses waiting on staff action
    ActionRequired {
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let engine = WorkflowEngine::standard();

    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Statuses { action } => match action {
            StatusAction::List { category, format } => {
                let rows = statuses::list(engine, category.as_deref())?;
                print(&statuses::render(&rows, format)?);
            }
            StatusAction::Next { status, format } => {
                let rows = statuses::next(engine, &status)?;
                print(&statuses::render(&rows, format)?);
            }
            StatusAction::Check { from, to } => {
                statuses::check(engine, &from, &to)?;
                print(&format!("{from} -> {to}: allowed"));
            }
            StatusAction::ActionRequired { format } => {
                let rows = statuses::action_required(engine);
                print(&statuses::render(&rows, format)?);
            }
        },
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print(output: &str) {
    println!("{output}");
}
