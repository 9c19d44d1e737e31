//! Replay a detection stream through a director session.

use std::path::PathBuf;

use anyhow::Context;
use steadycam_common::config::AppConfig;
use steadycam_director::DirectorSession;
use steadycam_frame_model::config::DirectorConfig;
use steadycam_frame_model::geometry::FrameSize;
use steadycam_frame_model::stream::{
    parse_detection_frames, parse_detection_header, serialize_crop_decisions,
};

pub fn run(
    config: &AppConfig,
    path: PathBuf,
    output: Option<PathBuf>,
    working: Option<String>,
    source: Option<String>,
) -> anyhow::Result<()> {
    println!("Directing stream: {}", path.display());

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read detections: {}", path.display()))?;

    let director = resolve_config(
        config.director,
        &content,
        working.as_deref(),
        source.as_deref(),
    )?;

    let frames = parse_detection_frames(&content)
        .with_context(|| format!("Failed to parse detections: {}", path.display()))?;
    println!("  Loaded {} frames", frames.len());
    println!(
        "  Working: {}  Source: {}  Output: {}",
        director.working, director.targeting.source, director.targeting.output
    );

    let mut session = DirectorSession::new(director)?;
    let decisions = session.run(&frames);

    if decisions.is_empty() {
        println!("  No frames to direct.");
        return Ok(());
    }

    let mean_zoom = decisions.iter().map(|d| d.zoom).sum::<f64>() / decisions.len() as f64;
    let max_delta = decisions
        .windows(2)
        .map(|pair| pair[0].crop.center().distance_to(&pair[1].crop.center()))
        .fold(0.0, f64::max);

    println!("  Mean zoom: {mean_zoom:.1}");
    println!("  Max center delta: {max_delta:.2} px/frame");

    if let Some(last) = decisions.last() {
        let px = last.crop.to_pixels(director.targeting.source);
        println!(
            "  Final crop: {}x{} at ({}, {})",
            px.width, px.height, px.x, px.y
        );
    }

    if let Some(output) = output {
        let jsonl = serialize_crop_decisions(&decisions)?;
        std::fs::write(&output, jsonl)
            .with_context(|| format!("Failed to write decisions: {}", output.display()))?;
        println!("  Decisions saved to: {}", output.display());
    }

    println!("\nDirecting complete.");
    Ok(())
}

/// Apply frame sizes from the stream header, then from the command-line flags.
fn resolve_config(
    base: DirectorConfig,
    content: &str,
    working: Option<&str>,
    source: Option<&str>,
) -> anyhow::Result<DirectorConfig> {
    let mut director = base;
    if let Some(header) = parse_detection_header(content) {
        tracing::debug!(schema = %header.schema_version, "stream header found");
        director.working = header.working();
        director.targeting.source = header.source();
    }
    if let Some(size) = working {
        director.working = parse_size("--working", size)?;
    }
    if let Some(size) = source {
        director.targeting.source = parse_size("--source", size)?;
    }
    Ok(director)
}

fn parse_size(flag: &str, value: &str) -> anyhow::Result<FrameSize> {
    FrameSize::parse(value)
        .with_context(|| format!("{flag} expects WIDTHxHEIGHT, got '{value}'"))
}
