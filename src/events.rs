#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    /// Microseconds per beat
    SetTempo { micros_per_beat: u32 },
    Other,
}

/// What a note event asks the synthesizer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    Start(u8),
    Stop(u8),
}

impl EventKind {
    pub fn channel(&self) -> Option<u8> {
        match self {
            EventKind::NoteOn { channel, .. } | EventKind::NoteOff { channel, .. } => {
                Some(*channel)
            }
            EventKind::SetTempo { .. } | EventKind::Other => None,
        }
    }

    /// A note-on with zero velocity is a stop, as in running-status MIDI.
    pub fn note_action(&self) -> Option<NoteAction> {
        match *self {
            EventKind::NoteOn { note, velocity, .. } if velocity > 0 => {
                Some(NoteAction::Start(note))
            }
            EventKind::NoteOn { note, .. } | EventKind::NoteOff { note, .. } => {
                Some(NoteAction::Stop(note))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub track: usize,
    /// Ticks since the previous event of the same track
    pub delta_ticks: u32,
    pub kind: EventKind,
}

impl RawEvent {
    pub fn new(track: usize, delta_ticks: u32, kind: EventKind) -> Self {
        Self {
            track,
            delta_ticks,
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent {
    /// Absolute tick within the event's own track
    pub tick: u64,
    pub event: RawEvent,
}
