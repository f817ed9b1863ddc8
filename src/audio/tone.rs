use serde::{Deserialize, Serialize};

use super::{midi_to_freq, round_to};

/// One unit of the monophonic output timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ToneRecord {
    Tone {
        note: u8,
        frequency_hz: f64,
        duration_secs: f64,
    },
    Silence {
        duration_secs: f64,
    },
}

impl ToneRecord {
    /// Builds a tone with frequency rounded to 2 places and duration to 6.
    pub fn tone(note: u8, duration_secs: f64) -> Self {
        ToneRecord::Tone {
            note,
            frequency_hz: round_to(midi_to_freq(note), 2),
            duration_secs: round_to(duration_secs, 6),
        }
    }

    pub fn silence(duration_secs: f64) -> Self {
        ToneRecord::Silence {
            duration_secs: round_to(duration_secs, 6),
        }
    }

    pub fn duration_secs(&self) -> f64 {
        match self {
            ToneRecord::Tone { duration_secs, .. } | ToneRecord::Silence { duration_secs } => {
                *duration_secs
            }
        }
    }

    /// `None` for silence.
    pub fn frequency_hz(&self) -> Option<f64> {
        match self {
            ToneRecord::Tone { frequency_hz, .. } => Some(*frequency_hz),
            ToneRecord::Silence { .. } => None,
        }
    }

    /// Zero-length records have no audible effect.
    pub fn is_empty(&self) -> bool {
        self.duration_secs() == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_rounds_frequency_and_duration() {
        let record = ToneRecord::tone(60, 0.123_456_789);
        assert_eq!(
            record,
            ToneRecord::Tone {
                note: 60,
                frequency_hz: 261.63,
                duration_secs: 0.123457,
            }
        );
        assert_eq!(record.frequency_hz(), Some(261.63));
    }

    #[test]
    fn silence_has_no_frequency() {
        let record = ToneRecord::silence(0.25);
        assert_eq!(record.frequency_hz(), None);
        assert_eq!(record.duration_secs(), 0.25);
        assert!(!record.is_empty());
        assert!(ToneRecord::silence(0.000_000_1).is_empty());
    }
}
