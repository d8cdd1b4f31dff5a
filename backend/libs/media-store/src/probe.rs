//! Video duration extraction through ffprobe

use crate::config::ProbeConfig;
use serde_json::Value;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct DurationProbe {
    config: ProbeConfig,
}

impl DurationProbe {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn disabled() -> Self {
        Self::new(ProbeConfig {
            enabled: false,
            ffprobe_path: "ffprobe".to_string(),
        })
    }

    /// Duration of the media file in seconds.
    ///
    /// `None` when probing is disabled or ffprobe cannot read the file.
    pub async fn duration(&self, path: &Path) -> Option<f64> {
        if !self.config.enabled {
            return None;
        }

        let output = match Command::new(&self.config.ffprobe_path)
            .args(["-v", "error", "-show_format", "-of", "json"])
            .arg(path)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, ffprobe = %self.config.ffprobe_path, "ffprobe spawn failed");
                return None;
            }
        };

        if !output.status.success() {
            warn!(
                status = ?output.status.code(),
                path = %path.display(),
                "ffprobe exited with failure"
            );
            return None;
        }

        let duration = parse_format_duration(&output.stdout);
        debug!(path = %path.display(), ?duration, "Probed media duration");
        duration
    }
}

/// Reads `format.duration` from ffprobe's JSON output
fn parse_format_duration(stdout: &[u8]) -> Option<f64> {
    let json: Value = serde_json::from_slice(stdout).ok()?;
    let raw = json.get("format")?.get("duration")?;
    let seconds = match raw {
        Value::String(s) => s.parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_duration() {
        let out = br#"{"format":{"filename":"a.mp4","duration":"12.480000"}}"#;
        assert_eq!(parse_format_duration(out), Some(12.48));
    }

    #[test]
    fn test_parse_missing_duration() {
        assert_eq!(parse_format_duration(br#"{"format":{}}"#), None);
        assert_eq!(parse_format_duration(b"not json"), None);
        assert_eq!(parse_format_duration(br#"{"format":{"duration":"N/A"}}"#), None);
    }

    #[tokio::test]
    async fn test_disabled_probe_skips_process() {
        let probe = DurationProbe::disabled();
        assert_eq!(probe.duration(Path::new("/nonexistent.mp4")).await, None);
    }

    #[tokio::test]
    async fn test_missing_binary_yields_none() {
        let probe = DurationProbe::new(ProbeConfig {
            enabled: true,
            ffprobe_path: "/nonexistent/ffprobe-binary".to_string(),
        });
        assert_eq!(probe.duration(Path::new("/nonexistent.mp4")).await, None);
    }
}
