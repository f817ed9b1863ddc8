use std::num::NonZeroU16;

use crate::audio::ToneRecord;
use crate::config::ConvertOptions;
use crate::events::{EventKind, NoteAction, TimedEvent};

use super::tempo::{DEFAULT_TEMPO, tempo_to_bpm, ticks_to_seconds};

/// The single note slot of a monophonic player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Voice {
    Idle,
    Sounding { note: u8, started_at: f64 },
}

/// Running clock and note slot for one pass over a merged timeline.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    ticks_per_beat: NonZeroU16,
    current_tick: u64,
    /// Seconds, never rounded
    current_time: f64,
    tempo: u32,
    voice: Voice,
    last_end: f64,
}

impl PlaybackState {
    pub fn new(ticks_per_beat: NonZeroU16, tempo: u32) -> Self {
        Self {
            ticks_per_beat,
            current_tick: 0,
            current_time: 0.0,
            tempo,
            voice: Voice::Idle,
            last_end: 0.0,
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.current_time
    }

    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    pub fn voice(&self) -> Voice {
        self.voice
    }

    /// Advances the clock to `event` and applies it.
    pub fn step(&mut self, event: &TimedEvent, options: &ConvertOptions, out: &mut Vec<ToneRecord>) {
        let delta_ticks = event.tick.saturating_sub(self.current_tick);
        self.current_time += ticks_to_seconds(delta_ticks, self.ticks_per_beat, self.tempo);
        self.current_tick = self.current_tick.max(event.tick);

        let kind = event.event.kind;
        if !options.merge {
            if let Some(channel) = kind.channel() {
                if channel != options.target_channel {
                    tracing::trace!(channel, tick = event.tick, "skipping filtered channel");
                    return;
                }
            }
        }

        if let EventKind::SetTempo { micros_per_beat } = kind {
            tracing::trace!(
                tick = event.tick,
                micros_per_beat,
                bpm = tempo_to_bpm(micros_per_beat),
                "tempo change"
            );
            self.tempo = micros_per_beat;
            return;
        }

        match kind.note_action() {
            Some(NoteAction::Start(note)) => {
                self.close(self.current_time, out);
                self.voice = Voice::Sounding {
                    note,
                    started_at: self.current_time,
                };
            }
            Some(NoteAction::Stop(note)) => match self.voice {
                Voice::Sounding { note: active, .. } if active == note => {
                    self.close(self.current_time, out);
                }
                _ => tracing::trace!(note, tick = event.tick, "ignoring stop for inactive note"),
            },
            None => {}
        }
    }

    /// Closes a still sounding note at the current time.
    pub fn finish(mut self, out: &mut Vec<ToneRecord>) -> Self {
        self.close(self.current_time, out);
        self
    }

    fn close(&mut self, end: f64, out: &mut Vec<ToneRecord>) {
        let Voice::Sounding { note, started_at } = self.voice else {
            return;
        };

        if started_at > self.last_end {
            out.push(ToneRecord::silence(started_at - self.last_end));
        }
        out.push(ToneRecord::tone(note, end - started_at));

        self.last_end = end;
        self.voice = Voice::Idle;
    }
}

/// Walks a merged timeline and returns the final state with the emitted records.
pub fn run(
    timeline: &[TimedEvent],
    ticks_per_beat: NonZeroU16,
    options: &ConvertOptions,
) -> (PlaybackState, Vec<ToneRecord>) {
    let (state, mut records) = timeline.iter().fold(
        (PlaybackState::new(ticks_per_beat, DEFAULT_TEMPO), Vec::new()),
        |(mut state, mut records), event| {
            state.step(event, options, &mut records);
            (state, records)
        },
    );
    let state = state.finish(&mut records);

    tracing::debug!(
        events = timeline.len(),
        records = records.len(),
        elapsed_secs = state.elapsed_secs(),
        "synthesized timeline"
    );
    (state, records)
}

pub fn synthesize(
    timeline: &[TimedEvent],
    ticks_per_beat: NonZeroU16,
    options: &ConvertOptions,
) -> Vec<ToneRecord> {
    run(timeline, ticks_per_beat, options).1
}
