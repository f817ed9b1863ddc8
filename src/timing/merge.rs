use crate::events::{RawEvent, TimedEvent};

/// Flattens per-track events into one timeline ordered by absolute tick.
///
/// Each track's deltas are accumulated on their own counter. Events sharing a
/// tick keep their collection order (track by track), unless `reverse` is set,
/// in which case the collection is reversed before the stable sort so later
/// tracks win ties.
pub fn merge_tracks(tracks: &[Vec<RawEvent>], reverse: bool) -> Vec<TimedEvent> {
    let mut events: Vec<TimedEvent> = Vec::with_capacity(tracks.iter().map(Vec::len).sum());

    for track in tracks {
        let mut tick: u64 = 0;
        for event in track {
            tick += event.delta_ticks as u64;
            events.push(TimedEvent {
                tick,
                event: *event,
            });
        }
    }

    if reverse {
        events.reverse();
    }
    events.sort_by_key(|e| e.tick);

    tracing::debug!(
        tracks = tracks.len(),
        events = events.len(),
        reverse,
        "merged tracks"
    );
    events
}
