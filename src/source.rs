//! Standard MIDI File loading.
//!
//! Only the events the synthesizer understands are kept with their payload:
//! note on/off and tempo changes. Everything else becomes `EventKind::Other`
//! so that its delta time still counts.

use std::collections::BTreeMap;
use std::fs;
use std::num::NonZeroU16;
use std::path::Path;

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use crate::events::{EventKind, NoteAction, RawEvent};
use crate::{Error, InputError};

#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub ticks_per_beat: NonZeroU16,
    pub tracks: Vec<Vec<RawEvent>>,
}

impl Song {
    pub fn new(ticks_per_beat: u16, tracks: Vec<Vec<RawEvent>>) -> Result<Self, InputError> {
        let ticks_per_beat = NonZeroU16::new(ticks_per_beat).ok_or(InputError::ZeroTicksPerBeat)?;
        Ok(Self {
            ticks_per_beat,
            tracks,
        })
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, InputError> {
        let smf = Smf::parse(bytes)?;

        let ticks_per_beat = match smf.header.timing {
            Timing::Metrical(ticks) => ticks.as_int(),
            Timing::Timecode(..) => return Err(InputError::UnsupportedTiming),
        };

        let tracks = smf
            .tracks
            .iter()
            .enumerate()
            .map(|(index, track)| {
                track
                    .iter()
                    .map(|event| RawEvent::new(index, event.delta.as_int(), convert_kind(event.kind)))
                    .collect()
            })
            .collect();

        let song = Self::new(ticks_per_beat, tracks)?;
        tracing::debug!(
            ticks_per_beat = song.ticks_per_beat.get(),
            tracks = song.tracks.len(),
            events = song.event_count(),
            "parsed MIDI file"
        );
        Ok(song)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&bytes)?)
    }

    pub fn event_count(&self) -> usize {
        self.tracks.iter().map(Vec::len).sum()
    }

    /// Number of note starts per channel.
    pub fn channel_usage(&self) -> BTreeMap<u8, usize> {
        let mut usage = BTreeMap::new();
        for event in self.tracks.iter().flatten() {
            if let (Some(channel), Some(NoteAction::Start(_))) =
                (event.kind.channel(), event.kind.note_action())
            {
                *usage.entry(channel).or_default() += 1;
            }
        }
        usage
    }
}

fn convert_kind(kind: TrackEventKind<'_>) -> EventKind {
    match kind {
        TrackEventKind::Midi { channel, message } => match message {
            MidiMessage::NoteOn { key, vel } => EventKind::NoteOn {
                channel: channel.as_int(),
                note: key.as_int(),
                velocity: vel.as_int(),
            },
            MidiMessage::NoteOff { key, vel } => EventKind::NoteOff {
                channel: channel.as_int(),
                note: key.as_int(),
                velocity: vel.as_int(),
            },
            _ => EventKind::Other,
        },
        TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => EventKind::SetTempo {
            micros_per_beat: tempo.as_int(),
        },
        _ => EventKind::Other,
    }
}
