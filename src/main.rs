use anyhow::Result;
use clap::Parser;
use kikitori::{AudioDecoder, Config, WavDecoder};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Japanese audio transcription with click-to-seek playback
#[derive(Parser)]
#[command(name = "kikitori", version)]
struct Args {
    /// WAV file to inspect
    audio: Option<PathBuf>,

    /// Config file (TOML, extension omitted)
    #[arg(long, default_value = "config/kikitori")]
    config: String,

    /// Print the decoded audio properties as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("kikitori v0.1.0");
    info!(
        "Recognition: model={}, {} -> {}",
        cfg.recognition.model, cfg.recognition.language, cfg.recognition.translate_to
    );
    info!("Sync tick: {}ms", cfg.engine.sync_tick_ms);

    match args.audio {
        Some(path) => {
            let audio = WavDecoder.load(&path)?;

            if args.json {
                let summary = json!({
                    "path": audio.path,
                    "duration_seconds": audio.duration_seconds,
                    "sample_rate": audio.sample_rate,
                    "channels": audio.channels,
                    "bits_per_sample": audio.bits_per_sample,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                info!("Duration: {:.1} seconds", audio.duration_seconds);
                info!("Sample rate: {} Hz", audio.sample_rate);
                info!("Channels: {}", audio.channels);
            }
        }
        None => {
            info!("No audio file given; pass a .wav path to inspect it");
        }
    }

    Ok(())
}
