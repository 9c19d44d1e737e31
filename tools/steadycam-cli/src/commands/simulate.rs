//! Generate a synthetic detection stream.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use steadycam_common::config::AppConfig;
use steadycam_frame_model::geometry::Point2D;
use steadycam_frame_model::stream::{
    serialize_detection_frames, DetectionFrame, DetectionStreamHeader,
};

pub fn run(
    config: &AppConfig,
    frames: u64,
    jitter: f64,
    x: Option<f64>,
    y: Option<f64>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let working = config.director.working;
    let center = working.center();
    let subject = Point2D::new(x.unwrap_or(center.x), y.unwrap_or(center.y));

    // Alternate left/right so every run is reproducible.
    let stream: Vec<DetectionFrame> = (0..frames)
        .map(|i| {
            let offset = if i % 2 == 0 { jitter } else { -jitter };
            DetectionFrame::new(i, vec![Point2D::new(subject.x + offset, subject.y)])
        })
        .collect();

    let header = DetectionStreamHeader::new(working, config.director.targeting.source, None);
    let jsonl = serialize_detection_frames(Some(&header), &stream)?;

    match output {
        Some(path) => {
            std::fs::write(&path, jsonl)
                .with_context(|| format!("Failed to write stream: {}", path.display()))?;
            println!(
                "Wrote {frames} frames around ({:.1}, {:.1}) ±{jitter} px to {}",
                subject.x,
                subject.y,
                path.display()
            );
        }
        None => {
            std::io::stdout()
                .lock()
                .write_all(jsonl.as_bytes())
                .context("Failed to write stream to stdout")?;
        }
    }

    Ok(())
}
