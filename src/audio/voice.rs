use super::ToneRecord;

const AMPLITUDE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    /// `None` is a rest
    frequency_hz: Option<f64>,
    samples: u64,
}

/// Square-wave renderer that walks a tone timeline sample by sample.
#[derive(Debug, Clone)]
pub struct ToneVoice {
    segments: Vec<Segment>,
    index: usize,
    position: u64,
    phase: f64,
    sample_rate: f64,
}

impl ToneVoice {
    pub fn new(records: &[ToneRecord], speed: f64, sample_rate: u32) -> Self {
        let sample_rate = sample_rate as f64;
        let segments = records
            .iter()
            .map(|record| Segment {
                frequency_hz: record.frequency_hz(),
                samples: (record.duration_secs() * speed * sample_rate).round() as u64,
            })
            .filter(|segment| segment.samples > 0)
            .collect();

        Self {
            segments,
            index: 0,
            position: 0,
            phase: 0.0,
            sample_rate,
        }
    }

    pub fn total_samples(&self) -> u64 {
        self.segments.iter().map(|s| s.samples).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.segments.len()
    }

    pub fn next_sample(&mut self) -> f32 {
        let Some(segment) = self.segments.get(self.index).copied() else {
            return 0.0;
        };

        let sample = match segment.frequency_hz {
            Some(freq) => {
                let value = if self.phase < 0.5 { AMPLITUDE } else { -AMPLITUDE };
                self.phase += freq / self.sample_rate;
                if self.phase >= 1.0 {
                    self.phase -= self.phase.floor();
                }
                value
            }
            None => 0.0,
        };

        self.position += 1;
        if self.position >= segment.samples {
            self.index += 1;
            self.position = 0;
            self.phase = 0.0;
        }
        sample
    }

    /// Fills an interleaved buffer, writing the same sample to every channel.
    /// Returns `true` once the timeline is exhausted.
    pub fn render(&mut self, output: &mut [f32], channels: usize) -> bool {
        for frame in output.chunks_mut(channels.max(1)) {
            let sample = self.next_sample();
            frame.fill(sample);
        }
        self.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_follows_durations_and_speed() {
        let records = vec![
            ToneRecord::silence(0.5),
            ToneRecord::tone(69, 1.0),
            ToneRecord::silence(0.0),
        ];

        let voice = ToneVoice::new(&records, 1.0, 1000);
        assert_eq!(voice.total_samples(), 1500);

        let slow = ToneVoice::new(&records, 2.0, 1000);
        assert_eq!(slow.total_samples(), 3000);
    }

    #[test]
    fn rest_is_silent_and_tone_alternates() {
        let records = vec![ToneRecord::silence(0.002), ToneRecord::tone(69, 0.01)];
        let mut voice = ToneVoice::new(&records, 1.0, 1000);

        assert_eq!(voice.next_sample(), 0.0);
        assert_eq!(voice.next_sample(), 0.0);

        let tone: Vec<f32> = (0..10).map(|_| voice.next_sample()).collect();
        assert!(tone.iter().all(|s| s.abs() == AMPLITUDE));
        assert!(voice.is_finished());
        assert_eq!(voice.next_sample(), 0.0);
    }

    #[test]
    fn render_duplicates_across_channels_and_reports_end() {
        let records = vec![ToneRecord::tone(81, 0.004)];
        let mut voice = ToneVoice::new(&records, 1.0, 1000);

        let mut buffer = vec![1.0; 4];
        assert!(!voice.render(&mut buffer, 2));
        assert_eq!(buffer[0], buffer[1]);
        assert_eq!(buffer[2], buffer[3]);

        let mut buffer = vec![1.0; 6];
        assert!(voice.render(&mut buffer, 2));
        assert_eq!(buffer[4], 0.0);
        assert_eq!(buffer[5], 0.0);
    }

    #[test]
    fn empty_timeline_is_finished() {
        let voice = ToneVoice::new(&[], 1.0, 44100);
        assert!(voice.is_finished());
        assert_eq!(voice.total_samples(), 0);
    }
}
