use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use serde_saphyr::from_str;

use crate::errors::{Result, Error, ErrorKind};

/// Timed sequence of surface offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub steps: Vec<ReplayStep>,
}

/// Moves the surface `delay_ms` after the previous step. A missing
/// coordinate keeps its previous value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayStep {
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl ReplayStep {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl ReplayScript {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| Error::wrap(e, ErrorKind::Read)
                .with_msg("replay: Failed to read script")
                .with_ctx("path", path.display())
            )?;

        Self::parse(&contents)
            .map_err(|e| e.with_ctx("path", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let script: ReplayScript = from_str(contents)
            .map_err(|e| Error::wrap(e, ErrorKind::Parse)
                .with_msg("replay: Failed to parse script")
            )?;

        if script.steps.is_empty() {
            return Err(Error::new(ErrorKind::Invalid)
                .with_msg("replay: Script has no steps"));
        }

        for (i, step) in script.steps.iter().enumerate() {
            let finite = step.x.is_none_or(f64::is_finite)
                && step.y.is_none_or(f64::is_finite);
            if !finite {
                return Err(Error::new(ErrorKind::Invalid)
                    .with_msg("replay: Step offsets must be finite")
                    .with_ctx("step", i));
            }
        }

        Ok(script)
    }

    pub fn duration(&self) -> Duration {
        self.steps.iter().map(ReplayStep::delay).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_steps() {
        let script = ReplayScript::parse(concat!(
            "steps:\n",
            "  - x: 100\n",
            "    y: 200\n",
            "  - delay_ms: 80\n",
            "    y: 260.5\n",
        )).unwrap();

        assert_eq!(script.steps.len(), 2);
        assert_eq!(script.steps[0], ReplayStep { delay_ms: 0, x: Some(100.0), y: Some(200.0) });
        assert_eq!(script.steps[1], ReplayStep { delay_ms: 80, x: None, y: Some(260.5) });
        assert_eq!(script.duration(), Duration::from_millis(80));
    }

    #[test]
    fn empty_script_is_invalid() {
        let err = ReplayScript::parse("steps: []\n").unwrap_err();
        assert!(err.is_kind(ErrorKind::Invalid));
    }

    #[test]
    fn missing_steps_is_parse_error() {
        let err = ReplayScript::parse("delay_ms: 10\n").unwrap_err();
        assert!(err.is_kind(ErrorKind::Parse));
    }

    #[tokio::test]
    async fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.yaml");
        tokio::fs::write(&path, "steps:\n  - y: 5\n").await.unwrap();

        let script = ReplayScript::load(&path).await.unwrap();
        assert_eq!(script.steps[0].y, Some(5.0));
        assert_eq!(script.steps[0].x, None);
    }
}
