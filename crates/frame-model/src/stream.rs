//! Per-frame records exchanged with the detector and the cropper.
//!
//! Both directions use JSONL: one JSON object per line, in capture order.
//! Lines starting with `#` are comments; the first one may carry a
//! [`DetectionStreamHeader`].

use serde::{Deserialize, Serialize};

use crate::geometry::{CropRect, FrameSize, Point2D};

/// Sequential index of a processed video frame.
pub type FrameIndex = u64;

/// Current schema version written by this crate.
pub const SCHEMA_VERSION: &str = "1.0";

/// Optional stream metadata, written as `# {...}` on the first line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Resolution the motion detector ran at.
    pub working_width: u32,
    pub working_height: u32,

    /// Resolution of the frames that will be cropped.
    pub source_width: u32,
    pub source_height: u32,

    /// Nominal frame rate.
    #[serde(default)]
    pub fps: Option<f64>,
}

impl DetectionStreamHeader {
    pub fn new(working: FrameSize, source: FrameSize, fps: Option<f64>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            working_width: working.width,
            working_height: working.height,
            source_width: source.width,
            source_height: source.height,
            fps,
        }
    }

    pub fn working(&self) -> FrameSize {
        FrameSize::new(self.working_width, self.working_height)
    }

    pub fn source(&self) -> FrameSize {
        FrameSize::new(self.source_width, self.source_height)
    }

    /// Render as a header comment line (without trailing newline).
    pub fn to_comment_line(&self) -> Result<String, serde_json::Error> {
        Ok(format!("# {}", serde_json::to_string(self)?))
    }
}

/// Detector output for one frame, in working resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionFrame {
    /// Frame index in capture order.
    pub frame: FrameIndex,

    /// Centers of moving regions.
    #[serde(default)]
    pub points: Vec<Point2D>,
}

impl DetectionFrame {
    pub fn new(frame: FrameIndex, points: Vec<Point2D>) -> Self {
        Self { frame, points }
    }

    /// A frame without any detections.
    pub fn empty(frame: FrameIndex) -> Self {
        Self::new(frame, Vec::new())
    }
}

/// Framing decision for one frame, in source resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropDecision {
    pub frame: FrameIndex,
    pub crop: CropRect,
    /// 0 = widest window, 100 = tightest.
    pub zoom: f64,
}

/// Parse detection frames from JSONL content, skipping comments.
pub fn parse_detection_frames(jsonl: &str) -> Result<Vec<DetectionFrame>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Find the stream header among the leading comment lines, if any.
pub fn parse_detection_header(jsonl: &str) -> Option<DetectionStreamHeader> {
    jsonl
        .lines()
        .map(str::trim)
        .take_while(|line| line.is_empty() || line.starts_with('#'))
        .filter_map(|line| line.strip_prefix('#'))
        .find_map(|body| serde_json::from_str(body.trim()).ok())
}

/// Serialize detection frames to JSONL, with an optional header line.
pub fn serialize_detection_frames(
    header: Option<&DetectionStreamHeader>,
    frames: &[DetectionFrame],
) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    if let Some(header) = header {
        output.push_str(&header.to_comment_line()?);
        output.push('\n');
    }
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

/// Serialize crop decisions to JSONL.
pub fn serialize_crop_decisions(decisions: &[CropDecision]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for decision in decisions {
        output.push_str(&serde_json::to_string(decision)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frames_skips_comments_and_blank_lines() {
        let jsonl = "# some note\n\n{\"frame\":0,\"points\":[{\"x\":1.0,\"y\":2.0}]}\n{\"frame\":1}\n";
        let frames = parse_detection_frames(jsonl).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].points, vec![Point2D::new(1.0, 2.0)]);
        assert!(frames[1].points.is_empty());
    }

    #[test]
    fn test_parse_frames_reports_bad_line() {
        let jsonl = "{\"frame\":0,\"points\":[]}\n{\"frame\":\"oops\"}\n";
        assert!(parse_detection_frames(jsonl).is_err());
    }

    #[test]
    fn test_header_is_found_in_leading_comments() {
        let header =
            DetectionStreamHeader::new(FrameSize::new(640, 360), FrameSize::new(1920, 1080), None);
        let frames = vec![DetectionFrame::empty(0), DetectionFrame::empty(1)];
        let jsonl = serialize_detection_frames(Some(&header), &frames).unwrap();

        assert!(jsonl.starts_with("# {"));
        assert_eq!(parse_detection_header(&jsonl), Some(header));
        assert_eq!(parse_detection_frames(&jsonl).unwrap(), frames);
    }

    #[test]
    fn test_header_after_data_is_ignored() {
        let jsonl = "{\"frame\":0}\n# {\"schema_version\":\"1.0\",\"working_width\":1,\"working_height\":1,\"source_width\":1,\"source_height\":1}\n";
        assert_eq!(parse_detection_header(jsonl), None);
    }

    #[test]
    fn test_header_fps_defaults_to_none() {
        let raw = r#"{
            "schema_version":"1.0",
            "working_width":640,
            "working_height":360,
            "source_width":1920,
            "source_height":1080
        }"#;
        let parsed: DetectionStreamHeader = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.fps, None);
        assert_eq!(parsed.source(), FrameSize::new(1920, 1080));
    }

    #[test]
    fn test_crop_decision_json_shape() {
        let decision = CropDecision {
            frame: 7,
            crop: CropRect {
                x: 10.0,
                y: 20.0,
                width: 640.0,
                height: 360.0,
            },
            zoom: 42.5,
        };
        let jsonl = serialize_crop_decisions(&[decision]).unwrap();
        assert!(jsonl.contains("\"frame\":7"));
        assert!(jsonl.contains("\"zoom\":42.5"));
        assert!(jsonl.contains("\"width\":640.0"));
        assert!(jsonl.ends_with('\n'));
    }
}
