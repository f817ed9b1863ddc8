use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use beepline::{BeepScript, Settings, Song, ToneRecord, audio, convert};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Convert a MIDI file into a monophonic `beep` script.
#[derive(Parser)]
#[command(name = "beepline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input MIDI file
    file: PathBuf,

    /// Output script path (default: stdout)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Duration multiplier, values above 1.0 play slower
    #[arg(short, long)]
    speed: Option<f64>,

    /// MIDI channel to keep when not merging
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..16))]
    channel: Option<u8>,

    /// Merge all channels into one voice
    #[arg(short, long)]
    merge: bool,

    /// Let later tracks win simultaneous notes (use with --merge)
    #[arg(short, long)]
    reverse: bool,

    /// RON settings file, overridden by the flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings to a RON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Print the tone timeline as RON instead of a script
    #[arg(long)]
    dump: bool,

    /// List note counts per channel and exit
    #[arg(long)]
    channels: bool,

    /// Preview the result on the default audio device
    #[arg(long)]
    play: bool,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(channel) = self.channel {
            settings.convert.target_channel = channel;
        }
        settings.convert.merge |= self.merge;
        settings.convert.reverse |= self.reverse;
        if let Some(speed) = self.speed {
            settings.encoder.speed = speed;
        }
        settings.encoder.validate()?;

        Ok(settings)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    if let Some(path) = &cli.save_config {
        settings.save(path)?;
        tracing::info!("saved settings to {}", path.display());
    }

    let song = Song::load(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;

    if cli.channels {
        for (channel, notes) in song.channel_usage() {
            println!("channel {channel:>2}: {notes} notes");
        }
        return Ok(());
    }

    if settings.convert.reverse && !settings.convert.merge {
        tracing::warn!("--reverse is meant to be combined with --merge");
    }

    let records = convert(&song, &settings.convert);
    log_summary(&records);

    let output = if cli.dump {
        ron::ser::to_string_pretty(&records, ron::ser::PrettyConfig::default())?
    } else {
        BeepScript::new(&settings.encoder).encode(&records)
    };

    match &cli.out {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("wrote {} to {}", output_kind(cli.dump), path.display());
        }
        None => println!("{output}"),
    }

    if cli.play {
        audio::play(&records, settings.encoder.speed).context("previewing tones")?;
    }

    Ok(())
}

fn output_kind(dump: bool) -> &'static str {
    if dump { "tone records" } else { "beep script" }
}

fn log_summary(records: &[ToneRecord]) {
    let tones = records
        .iter()
        .filter(|r| matches!(r, ToneRecord::Tone { .. }) && !r.is_empty())
        .count();
    let seconds: f64 = records.iter().map(ToneRecord::duration_secs).sum();

    tracing::info!(tones, records = records.len(), "timeline lasts {:.2}s", seconds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_kind_follows_dump_flag() {
        assert_eq!(output_kind(true), "tone records");
        assert_eq!(output_kind(false), "beep script");
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from(["beepline", "song.mid", "-c", "2", "--merge", "-s", "1.5"]);
        let settings = cli.settings().unwrap();
        assert_eq!(settings.convert.target_channel, 2);
        assert!(settings.convert.merge);
        assert!(!settings.convert.reverse);
        assert_eq!(settings.encoder.speed, 1.5);
    }

    #[test]
    fn rejects_non_positive_speed_flag() {
        let cli = Cli::parse_from(["beepline", "song.mid", "--speed", "0"]);
        assert!(cli.settings().is_err());
    }
}
