mod app;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "folio",
    about = "Studio client for the folio publishing platform",
    version
)]
struct Cli {
    /// Print verbose diagnostics
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record audio segments and stage them for upload
    Record(commands::record::RecordArgs),
    /// Upload audio files as segments of a chapter's artifact
    Upload(commands::segments::UploadArgs),
    /// Show an artifact's segments and merged state
    Show(commands::segments::ShowArgs),
    /// Move a segment one position earlier or later
    Move(commands::segments::MoveArgs),
    /// Remove a persisted segment
    Remove(commands::segments::RemoveArgs),
    /// Merge all persisted segments into one playable file
    Merge(commands::segments::MergeArgs),
    /// Create a chapter or part at the next free order
    New(commands::chapters::NewArgs),
    /// List sibling chapters or parts with their orders
    List(commands::chapters::ListArgs),
    /// List audio input devices
    Devices,
    /// View or update configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    folio_core::set_verbose(cli.verbose);

    match cli.command {
        Command::Record(args) => commands::record::run(args).await,
        Command::Upload(args) => commands::segments::upload(args).await,
        Command::Show(args) => commands::segments::show(args).await,
        Command::Move(args) => commands::segments::move_segment(args).await,
        Command::Remove(args) => commands::segments::remove(args).await,
        Command::Merge(args) => commands::segments::merge(args).await,
        Command::New(args) => commands::chapters::create(args).await,
        Command::List(args) => commands::chapters::list(args).await,
        Command::Devices => commands::devices::run(),
        Command::Config(args) => commands::config::run(args),
    }
}
