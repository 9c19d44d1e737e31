//! Error types shared across Steadycam crates.

use std::path::PathBuf;

use steadycam_frame_model::ConfigError;

/// Top-level error type for Steadycam operations.
#[derive(Debug, thiserror::Error)]
pub enum SteadycamError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Parse error at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SteadycamError.
pub type SteadycamResult<T> = Result<T, SteadycamError>;

impl SteadycamError {
    pub fn parse(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: SteadycamError = ConfigError::CropRangeInverted {
            min: 900.0,
            max: 600.0,
        }
        .into();
        assert!(matches!(err, SteadycamError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: min_crop_width 900 exceeds max_crop_width 600"
        );
    }

    #[test]
    fn test_parse_error_message() {
        let err = SteadycamError::parse("/tmp/in.jsonl", "line 3: expected value");
        assert_eq!(
            err.to_string(),
            "Parse error at /tmp/in.jsonl: line 3: expected value"
        );
    }
}
