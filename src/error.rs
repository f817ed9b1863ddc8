use std::path::PathBuf;

use thiserror::Error;

use crate::audio::PlaybackError;

/// The input could not be turned into tracks of events.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("malformed MIDI file: {0}")]
    Malformed(#[from] midly::Error),
    #[error("SMPTE timecode timing is not supported, only ticks per beat")]
    UnsupportedTiming,
    #[error("ticks per beat must be non-zero")]
    ZeroTicksPerBeat,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Settings(#[from] ron::error::SpannedError),
    #[error("failed to serialize: {0}")]
    Serialize(#[from] ron::Error),
    #[error("speed must be a positive number, got {0}")]
    InvalidSpeed(f64),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}
