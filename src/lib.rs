//! Turns multi-track MIDI performances into a monophonic list of tones that a
//! single-voice beeper can play.

pub mod audio;
pub mod config;
pub mod encoder;
mod error;
pub mod events;
pub mod source;
pub mod timing;

pub use audio::ToneRecord;
pub use config::{ConvertOptions, EncoderOptions, Settings};
pub use encoder::BeepScript;
pub use error::{Error, InputError};
pub use source::Song;

/// Merges the song's tracks and collapses them into tones and silences.
pub fn convert(song: &Song, options: &ConvertOptions) -> Vec<ToneRecord> {
    let timeline = timing::merge_tracks(&song.tracks, options.reverse);
    if timeline.is_empty() {
        tracing::warn!("song contains no events");
    }
    timing::synthesize(&timeline, song.ticks_per_beat, options)
}
