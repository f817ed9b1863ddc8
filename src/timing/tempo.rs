use std::num::NonZeroU16;

/// 120 BPM, used until the first tempo change.
pub const DEFAULT_TEMPO: u32 = 500_000;

pub fn ticks_to_seconds(ticks: u64, ticks_per_beat: NonZeroU16, micros_per_beat: u32) -> f64 {
    (ticks as f64 * micros_per_beat as f64) / (ticks_per_beat.get() as f64 * 1_000_000.0)
}

pub fn tempo_to_bpm(micros_per_beat: u32) -> f64 {
    60_000_000.0 / micros_per_beat as f64
}
