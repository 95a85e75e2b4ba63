use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use twinflip_core::{Coord, GameConfig};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Side length of the square grid.
    pub size: Coord,
    /// How long a mismatched pair stays face up, in seconds.
    pub mismatch_delay_secs: f32,
    /// Printed in place of a face-down card.
    pub hidden_marker: String,
    /// Offer another round after a win.
    pub play_again_prompt: bool,
}

impl Settings {
    pub const MAX_DELAY_SECS: f32 = 3.0;

    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = Self::from_toml(&raw)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        log::debug!("loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    pub(crate) fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(raw)?;
        Ok(settings.sanitized())
    }

    pub(crate) fn with_delay(mut self, secs: f32) -> Self {
        self.mismatch_delay_secs = secs;
        self.sanitized()
    }

    pub(crate) fn with_size(mut self, size: Coord) -> Self {
        self.size = size;
        self
    }

    pub(crate) fn game_config(&self) -> anyhow::Result<GameConfig> {
        GameConfig::new(self.size).with_context(|| format!("unusable board size {}", self.size))
    }

    pub(crate) fn mismatch_delay(&self) -> Duration {
        Duration::from_secs_f32(self.mismatch_delay_secs)
    }

    fn sanitized(mut self) -> Self {
        let delay = self.mismatch_delay_secs;
        let clamped = if delay.is_nan() {
            Self::default().mismatch_delay_secs
        } else {
            delay.clamp(0.0, Self::MAX_DELAY_SECS)
        };
        if clamped != delay {
            log::warn!("mismatch delay {delay}s out of range, using {clamped}s");
            self.mismatch_delay_secs = clamped;
        }

        if self.hidden_marker.trim().is_empty() {
            log::warn!("empty hidden marker, using default");
            self.hidden_marker = Self::default().hidden_marker;
        }
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: GameConfig::default().size,
            mismatch_delay_secs: 1.0,
            hidden_marker: "X".to_string(),
            play_again_prompt: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let settings = Settings::from_toml("size = 6").unwrap();

        assert_eq!(settings.size, 6);
        assert_eq!(settings.mismatch_delay_secs, 1.0);
        assert_eq!(settings.hidden_marker, "X");
        assert!(settings.play_again_prompt);
    }

    #[test]
    fn delay_is_clamped() {
        let settings = Settings::from_toml("mismatch_delay_secs = 12.5").unwrap();
        assert_eq!(settings.mismatch_delay_secs, Settings::MAX_DELAY_SECS);

        let settings = Settings::default().with_delay(-1.0);
        assert_eq!(settings.mismatch_delay(), Duration::ZERO);
    }

    #[test]
    fn blank_marker_falls_back() {
        let settings = Settings::from_toml("hidden_marker = \"  \"").unwrap();
        assert_eq!(settings.hidden_marker, "X");
    }

    #[test]
    fn odd_size_is_reported() {
        let settings = Settings::default().with_size(5);
        let err = settings.game_config().unwrap_err();
        assert!(err.to_string().contains("unusable board size 5"));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(Settings::from_toml("size = \"big\"").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/twinflip.toml")).unwrap_err();
        assert!(err.to_string().contains("reading settings"));
    }
}
