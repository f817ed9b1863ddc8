use crate::audio::ToneRecord;
use crate::config::EncoderOptions;

/// Renders a tone timeline as arguments for the `beep` command line tool.
///
/// Durations are emitted in milliseconds, scaled by `speed`. Records with zero
/// duration are dropped.
#[derive(Debug, Clone)]
pub struct BeepScript {
    speed: f64,
}

impl BeepScript {
    pub fn new(options: &EncoderOptions) -> Self {
        Self {
            speed: options.speed,
        }
    }

    pub fn encode(&self, records: &[ToneRecord]) -> String {
        let scale = 1000.0 * self.speed;
        let mut script = String::from("beep ");

        for record in records.iter().filter(|r| !r.is_empty()) {
            let millis = record.duration_secs() * scale;
            match record {
                ToneRecord::Silence { .. } => script.push_str(&format!("-D {millis} ")),
                ToneRecord::Tone { frequency_hz, .. } => {
                    script.push_str(&format!("-n -f {frequency_hz} -l {millis} "))
                }
            }
        }

        script
    }
}
