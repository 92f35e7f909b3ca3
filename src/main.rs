//! Halo gesture classifier CLI.
//!
//! Reads a JSONL detection dump, classifies every frame, and prints a
//! per-frame report with optional CSV formatting and an interval summary.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use halo_gestures::{gesture_intervals, load_frames_from_jsonl, GesturePipeline};

#[derive(Parser, Debug)]
#[command(name = "halo-gestures", about = "Halo gesture classifier")]
struct Cli {
    /// Input JSONL file of detection frames
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Output CSV instead of the plain per-frame report
    #[arg(long)]
    csv: bool,

    /// Append a summary of locked gesture intervals
    #[arg(long)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; reports use stdout, logs stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halo_gestures=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let frames = load_frames_from_jsonl(&cli.input)?;
    info!("Loaded {} frames from {}", frames.len(), cli.input.display());

    let mut pipeline = GesturePipeline::new();
    let results: Vec<_> = pipeline.classify_stream(&frames).collect();

    if cli.csv {
        println!("timestamp,raw_label,locked_label,confidence");
        for result in &results {
            println!(
                "{:.3},{},{},{:.3}",
                result.timestamp,
                result.raw.as_str(),
                result.locked.as_str(),
                result.confidence
            );
        }
    } else {
        for result in &results {
            println!(
                "t={:.3} raw={} conf={:.3} locked={}",
                result.timestamp,
                result.raw.as_str(),
                result.confidence,
                result.locked.as_str()
            );
        }
    }

    if cli.summary {
        println!("\n--- Gesture Intervals ---");
        for interval in gesture_intervals(&results) {
            println!(
                "{}: {:.3}s - {:.3}s",
                interval.label.as_str(),
                interval.start,
                interval.end
            );
        }
    }

    Ok(())
}
