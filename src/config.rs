//! Game configuration: variant, playback timing, starting volume and optional seed.

use crate::error::ConfigError;
use crate::flower::Variant;

/// Delays used by the playback sequencer, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Timing {
    /// Between two consecutive cues.
    pub cue_gap_ms: u32,
    /// After the last cue before the run counts as finished.
    pub tail_ms: u32,
    /// Between halting a run and starting its replay.
    pub grace_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            cue_gap_ms: 800,
            tail_ms: 500,
            grace_ms: 50,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub variant: Variant,
    pub timing: Timing,
    /// Initial slider value, 0..=10.
    pub volume: Option<u8>,
    /// Fixed pattern seed; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(v) = self.volume {
            if v > 10 {
                return Err(ConfigError::Volume(v));
            }
        }
        if self.timing.cue_gap_ms == 0 {
            return Err(ConfigError::ZeroCueGap);
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
