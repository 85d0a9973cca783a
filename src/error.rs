use thiserror::Error;

use crate::flower::Flower;

/// Failure to start an audio cue. Logged by the sequencer, never fatal.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio cue loaded for {0:?}")]
    MissingCue(Flower),
    #[error("playback rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
#[error("timer could not be scheduled: {0}")]
pub struct ScheduleError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(String),
    #[error("volume {0} out of range 0..=10")]
    Volume(u8),
    #[error("cue gap must be positive")]
    ZeroCueGap,
}
