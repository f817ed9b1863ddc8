mod merge;
mod synth;
mod tempo;

pub use merge::merge_tracks;
pub use synth::{PlaybackState, Voice, run, synthesize};
pub use tempo::{DEFAULT_TEMPO, tempo_to_bpm, ticks_to_seconds};
