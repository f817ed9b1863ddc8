mod output;
mod tone;
mod voice;

pub use output::{PlaybackError, play};
pub use tone::ToneRecord;
pub use voice::ToneVoice;

/// Equal temperament, A4 (note 69) = 440 Hz.
pub fn midi_to_freq(note: u8) -> f64 {
    440.0 * 2.0_f64.powf((note as f64 - 69.0) / 12.0)
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10.0_f64.powi(places);
    (value * scale).round() / scale
}
