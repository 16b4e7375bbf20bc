use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimonError>;

#[derive(Debug, Error)]
pub enum SimonError {
    #[error("unknown tile color {0:?} (expected green, red, yellow or blue)")]
    UnknownColor(String),

    #[error("audio output unavailable: {0}")]
    AudioUnavailable(#[from] rodio::StreamError),

    #[error("settings I/O failed for {}: {source}", path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("settings could not be encoded: {0}")]
    SettingsFormat(#[from] serde_json::Error),
}
