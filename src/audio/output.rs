use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam::channel::Receiver;
use thiserror::Error;

use super::{ToneRecord, ToneVoice};

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device available")]
    NoOutputDevice,
    #[error("failed to query output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
    #[error("audio stream failed: {0}")]
    Stream(#[from] cpal::StreamError),
    #[error("unsupported sample format {0:?}, only f32 output is supported")]
    UnsupportedFormat(cpal::SampleFormat),
}

/// Sent from the audio callbacks to the thread waiting on playback.
#[derive(Debug)]
enum StreamEvent {
    /// The last samples went into a buffer of this many frames
    Drained { frames: usize },
    Failed(cpal::StreamError),
}

/// Blocks until the callbacks report the end of the timeline or a stream
/// failure. After draining, sleeps one buffer so the device can play it out.
fn wait_for_drain(events: &Receiver<StreamEvent>, sample_rate: u32) -> Result<(), PlaybackError> {
    match events.recv() {
        Ok(StreamEvent::Drained { frames }) => {
            std::thread::sleep(Duration::from_secs_f64(frames as f64 / sample_rate as f64));
            Ok(())
        }
        Ok(StreamEvent::Failed(err)) => Err(PlaybackError::Stream(err)),
        // Both callbacks are gone, nothing more will be played.
        Err(_) => Ok(()),
    }
}

/// Plays the timeline through the default output device and blocks until it
/// has been rendered.
pub fn play(records: &[ToneRecord], speed: f64) -> Result<(), PlaybackError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(PlaybackError::NoOutputDevice)?;
    let config = device.default_output_config()?;

    let sample_rate = config.sample_rate();
    let sample_format = config.sample_format();
    let stream_config: cpal::StreamConfig = config.into();
    let channels = stream_config.channels as usize;

    let mut voice = ToneVoice::new(records, speed, sample_rate);
    tracing::info!(
        channels,
        sample_rate,
        seconds = voice.total_samples() as f64 / sample_rate as f64,
        "starting preview"
    );

    let (done_tx, done_rx) = crossbeam::channel::bounded::<StreamEvent>(1);
    let error_tx = done_tx.clone();

    let stream = match sample_format {
        cpal::SampleFormat::F32 => device.build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                if voice.render(data, channels) {
                    let frames = data.len() / channels.max(1);
                    let _ = done_tx.try_send(StreamEvent::Drained { frames });
                }
            },
            move |err| {
                tracing::error!("audio stream error: {}", err);
                let _ = error_tx.try_send(StreamEvent::Failed(err));
            },
            None,
        )?,
        other => return Err(PlaybackError::UnsupportedFormat(other)),
    };

    stream.play()?;
    wait_for_drain(&done_rx, sample_rate)?;
    tracing::debug!("preview finished");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn drain_waits_one_buffer() {
        let (tx, rx) = crossbeam::channel::bounded(1);
        tx.send(StreamEvent::Drained { frames: 50 }).unwrap();

        let started = Instant::now();
        wait_for_drain(&rx, 1000).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn stream_failure_ends_the_wait_with_an_error() {
        let (tx, rx) = crossbeam::channel::bounded(1);
        tx.send(StreamEvent::Failed(cpal::StreamError::DeviceNotAvailable))
            .unwrap();

        let err = wait_for_drain(&rx, 44100).err().unwrap();
        assert!(matches!(
            err,
            PlaybackError::Stream(cpal::StreamError::DeviceNotAvailable)
        ));
    }

    #[test]
    fn closed_channel_does_not_block() {
        let (tx, rx) = crossbeam::channel::bounded::<StreamEvent>(1);
        drop(tx);
        assert!(wait_for_drain(&rx, 44100).is_ok());
    }
}
