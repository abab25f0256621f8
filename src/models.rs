//! Data models and configuration

use crate::image::Quality;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of one conversion, as reported by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversionSummary {
    pub file_name: String,
    pub content_type: String,
    pub quality: u8,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub quality: Quality,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quality: Quality::DEFAULT,
            timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            std::env::var("WEBP_QUALITY").ok().as_deref(),
            std::env::var("WEBP_TIMEOUT_SECS").ok().as_deref(),
        )
    }

    fn from_vars(quality: Option<&str>, timeout_secs: Option<&str>) -> crate::Result<Self> {
        let quality = match quality {
            Some(raw) => raw.parse::<Quality>().map_err(|_| {
                crate::Error::Config(format!(
                    "WEBP_QUALITY must be an integer between 1 and 100, got '{}'",
                    raw
                ))
            })?,
            None => Quality::DEFAULT,
        };

        let timeout = match timeout_secs {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(crate::Error::Config(format!(
                        "WEBP_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => None,
        };

        Ok(Self { quality, timeout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.quality, Quality::DEFAULT);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_vars(Some("90"), Some("15")).unwrap();
        assert_eq!(config.quality.get(), 90);
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_quality() {
        let err = Config::from_vars(Some("150"), None).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
        assert!(err.to_string().contains("WEBP_QUALITY"));
    }

    #[test]
    fn test_invalid_timeout() {
        for raw in ["0", "-3", "soon"] {
            let err = Config::from_vars(None, Some(raw)).unwrap_err();
            assert!(err.to_string().contains("WEBP_TIMEOUT_SECS"));
        }
    }

    #[test]
    fn test_summary_serialization() {
        let summary = ConversionSummary {
            file_name: "photo.png".to_string(),
            content_type: "image/png".to_string(),
            quality: 75,
            input_bytes: 2048,
            output_bytes: 512,
            width: Some(64),
            height: Some(32),
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"output_bytes\":512"));

        let deserialized: ConversionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, summary);
    }
}
