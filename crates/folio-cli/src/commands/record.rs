//! Interactive recording session: capture clips, stage them, upload on
//! confirmation.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::app::{build_api, wait_for_enter};
use folio_core::{
    CpalCaptureBackend, SegmentRecorder, SegmentStagingQueue, Settings, format_elapsed,
    upload_staged,
};

#[derive(Args)]
pub struct RecordArgs {
    /// Artifact id to upload recorded segments to
    #[arg(long)]
    pub artifact: String,

    /// Input device name (default: system default, see `folio devices`)
    #[arg(long)]
    pub device: Option<String>,
}

pub async fn run(args: RecordArgs) -> Result<()> {
    let settings = Settings::load();
    let api = build_api(&settings)?;

    let device = args.device.or_else(|| settings.input_device.clone());
    let backend = match device {
        Some(name) => CpalCaptureBackend::with_device(name),
        None => CpalCaptureBackend::new(),
    };
    let mut recorder = SegmentRecorder::new(backend);
    let mut queue = SegmentStagingQueue::new();

    loop {
        print!("Press Enter to start recording (segment {})... ", queue.len() + 1);
        wait_for_enter()?;

        if let Err(err) = recorder.start() {
            // Device denial is recoverable; the session goes on
            eprintln!("{} {err:#}", style("✗").red());
            if !ask("Try again?")? {
                break;
            }
            continue;
        }

        print!("{} recording... press Enter to stop. ", style("●").red());
        wait_for_enter()?;
        recorder.stop()?;

        println!(
            "Captured {} of audio.",
            style(format_elapsed(recorder.elapsed_seconds())).bold()
        );

        if ask("Add this clip to the staging queue?")? {
            if let Some(segment) = recorder.take_segment() {
                println!("Staged {} ({} bytes)", segment.filename, segment.data.len());
                queue.add(segment);
            }
        } else {
            recorder.discard();
            println!("Clip discarded.");
        }

        if !ask("Record another segment?")? {
            break;
        }
    }

    if queue.is_empty() {
        println!("Nothing staged, nothing to upload.");
        return Ok(());
    }

    println!("\n{} segment(s) staged:", queue.len());
    for (index, segment) in queue.segments().iter().enumerate() {
        println!("  [{index}] {}", segment.filename);
    }

    if !ask(&format!("Upload to artifact {}?", args.artifact))? {
        println!("Staged clips dropped (not uploaded).");
        return Ok(());
    }

    match upload_staged(&api, &mut queue, &args.artifact).await {
        Ok(artifact) => {
            println!(
                "{} uploaded; artifact now holds {} segment(s)",
                style("✓").green(),
                artifact.segment_public_ids.len()
            );
        }
        Err(err) => {
            // Queue intact on failure; nothing was lost, but this session
            // ends here
            eprintln!("{} {err:#}", style("✗").red());
            eprintln!("{} staged segment(s) were not uploaded.", queue.len());
        }
    }

    Ok(())
}

fn ask(prompt: &str) -> Result<bool> {
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()?)
}
