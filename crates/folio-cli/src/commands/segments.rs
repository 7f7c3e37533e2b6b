//! Commands acting on an artifact's persisted segment list.

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

use crate::app::build_api;
use folio_core::{
    AudioArtifact, ContentApi, FlashKind, MergeCoordinator, MoveDirection, SegmentStagingQueue,
    Settings, move_segment as core_move_segment, remove_segment as core_remove_segment,
    upload_staged,
};

#[derive(Args)]
pub struct UploadArgs {
    /// Artifact id to append segments to
    #[arg(long)]
    pub artifact: String,

    /// Audio files to upload, appended in the given order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Artifact id to inspect
    #[arg(long)]
    pub artifact: String,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Artifact id to reorder within
    #[arg(long)]
    pub artifact: String,

    /// Zero-based index of the segment to move
    #[arg(long)]
    pub index: usize,

    /// Where to move it: earlier or later
    #[arg(long)]
    pub direction: MoveDirectionArg,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Artifact id to remove from
    #[arg(long)]
    pub artifact: String,

    /// Public id of the segment to remove
    pub public_id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Artifact id to merge
    #[arg(long)]
    pub artifact: String,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum MoveDirectionArg {
    Earlier,
    Later,
}

impl From<MoveDirectionArg> for MoveDirection {
    fn from(arg: MoveDirectionArg) -> Self {
        match arg {
            MoveDirectionArg::Earlier => MoveDirection::Earlier,
            MoveDirectionArg::Later => MoveDirection::Later,
        }
    }
}

pub async fn upload(args: UploadArgs) -> Result<()> {
    let api = build_api(&Settings::load())?;

    let mut queue = SegmentStagingQueue::new();
    for file in &args.files {
        queue.add_file(file)?;
    }
    println!("Uploading {} segment(s)...", queue.len());

    let artifact = upload_staged(&api, &mut queue, &args.artifact).await?;
    println!("{} upload confirmed", style("✓").green());
    print_artifact(&artifact);

    Ok(())
}

pub async fn show(args: ShowArgs) -> Result<()> {
    let api = build_api(&Settings::load())?;
    let artifact = api.fetch_artifact(&args.artifact).await?;
    print_artifact(&artifact);
    Ok(())
}

pub async fn move_segment(args: MoveArgs) -> Result<()> {
    let api = build_api(&Settings::load())?;
    let artifact = api.fetch_artifact(&args.artifact).await?;

    let before = artifact.segment_public_ids.clone();
    let updated = core_move_segment(&api, &artifact, args.index, args.direction.into()).await?;

    if updated.segment_public_ids == before {
        println!("Nothing to do: the move would leave the list bounds.");
    } else {
        println!("{} order updated", style("✓").green());
    }
    print_artifact(&updated);

    Ok(())
}

pub async fn remove(args: RemoveArgs) -> Result<()> {
    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Remove segment {}?", args.public_id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let api = build_api(&Settings::load())?;
    let updated = core_remove_segment(&api, &args.artifact, &args.public_id).await?;

    println!("{} segment removed", style("✓").green());
    print_artifact(&updated);

    Ok(())
}

pub async fn merge(args: MergeArgs) -> Result<()> {
    let api = build_api(&Settings::load())?;
    let artifact = api.fetch_artifact(&args.artifact).await?;

    let mut coordinator = MergeCoordinator::new();
    let result = coordinator.merge(&api, &artifact).await;

    if let Some(flash) = coordinator.status() {
        match flash.kind() {
            FlashKind::Success => println!("{} {}", style("✓").green(), flash.message()),
            FlashKind::Error => println!("{} {}", style("✗").red(), flash.message()),
        }
    }

    let merged = result?;
    print_artifact(&merged);

    Ok(())
}

fn print_artifact(artifact: &AudioArtifact) {
    println!("\nArtifact {}", style(&artifact.id).bold());
    if artifact.segment_public_ids.is_empty() {
        println!("  no persisted segments");
    } else {
        for (index, public_id) in artifact.segment_public_ids.iter().enumerate() {
            println!("  [{index}] {public_id}");
        }
    }
    match &artifact.merged_audio_url {
        Some(url) => println!("  merged: {url}"),
        None => println!("  merged: (not yet)"),
    }
}
