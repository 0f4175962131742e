//! Terminal front end for the phased startup roadmap.
//!
//! ```bash
//! progress                      # show the roadmap
//! progress toggle 1 2           # toggle task 2 of phase 1
//! progress dismiss              # close the message (resets after a celebration)
//! progress repl                 # interactive session
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use progress_core::model::{PhaseId, TaskId};
use services::{AppServices, Clock, FactConfig, FetchTicket, HttpFactSource, ProgressService};
use storage::DEFAULT_PROGRESS_KEY;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod db;
mod render;
mod repl;

use repl::{HELP, ReplCommand};

/// Track progress through the startup roadmap, one phase at a time.
#[derive(Parser)]
#[command(name = "progress")]
#[command(version, about, long_about = None)]
struct Cli {
    /// SQLite database holding saved progress
    #[arg(long, env = "PROGRESS_DB_URL", default_value = "sqlite://progress.sqlite3")]
    db: String,

    /// Storage key the progress snapshot is kept under
    #[arg(long, env = "PROGRESS_STORAGE_KEY", default_value = DEFAULT_PROGRESS_KEY)]
    key: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the roadmap (default)
    Show,

    /// Toggle one task, if the previous phase is complete
    Toggle { phase: PhaseId, task: TaskId },

    /// Close the current message; closing the celebration resets all progress
    Dismiss,

    /// Read commands from stdin until `quit`
    Repl,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("progress=debug,services=debug,storage=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_view(progress: &ProgressService) {
    print!("{}", render::render_snapshot(progress.snapshot()));
    if let Some(modal) = render::render_modal(progress.modal()) {
        println!();
        print!("{modal}");
    }
}

async fn celebrate(progress: &mut ProgressService, ticket: Option<FetchTicket>) {
    if let Some(ticket) = ticket {
        // Show the loading state before waiting on the network.
        if let Some(modal) = render::render_modal(progress.modal()) {
            print!("{modal}");
        }
        progress.redeem(ticket).await;
    }
}

async fn toggle(progress: &mut ProgressService, phase: PhaseId, task: TaskId) {
    match progress.toggle_task(phase, task).await {
        Ok(ticket) => celebrate(progress, ticket).await,
        // The gate notice is carried by the modal.
        Err(err) if err.is_gate_rejection() => debug!(%err, "toggle rejected"),
        Err(err) => eprintln!("{err}"),
    }
}

async fn run_repl(progress: &mut ProgressService) -> Result<()> {
    print_view(progress);
    println!("\n{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let command = match ReplCommand::parse(&line) {
            Ok(command) => command,
            Err(repl::ReplError::Empty) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        match command {
            ReplCommand::Toggle { phase, task } => toggle(progress, phase, task).await,
            ReplCommand::Dismiss => {
                progress.dismiss().await;
            }
            ReplCommand::Show => {}
            ReplCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ReplCommand::Quit => break,
        }
        println!();
        print_view(progress);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    let db_url = db::normalize_sqlite_url(&cli.db);
    db::prepare_sqlite_file(&db_url)?;
    info!(db = %db_url, key = %cli.key, "opening progress store");

    let facts = Arc::new(HttpFactSource::new(FactConfig::from_env()?));
    let AppServices {
        mut progress,
        pending_celebration,
    } = AppServices::new_sqlite(&db_url, &cli.key, Clock::system(), facts).await?;

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => {
            celebrate(&mut progress, pending_celebration).await;
            print_view(&progress);
        }
        Commands::Toggle { phase, task } => {
            celebrate(&mut progress, pending_celebration).await;
            toggle(&mut progress, phase, task).await;
            print_view(&progress);
        }
        Commands::Dismiss => {
            // Closing before the fact arrives: the startup celebration is never fetched.
            drop(pending_celebration);
            progress.dismiss().await;
            print_view(&progress);
        }
        Commands::Repl => {
            celebrate(&mut progress, pending_celebration).await;
            run_repl(&mut progress).await?;
        }
    }
    Ok(())
}
