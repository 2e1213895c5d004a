//! Audio output for the background music

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink};

use super::music::MusicOutput;

const SAMPLE_RATE: u32 = 44_100;
/// Length of the built-in loop; every partial completes whole cycles in it
const TONE_SECONDS: u32 = 4;

/// Plays one looped track on the default output device
pub struct MusicPlayer {
    /// Audio output stream (kept alive for the duration of the app)
    _stream: OutputStream,
    sink: Sink,
}

impl MusicPlayer {
    /// Open the default output with `track` looped, or the built-in tone.
    /// Returns `None` when there is no usable device or the track cannot be read.
    pub fn open(track: Option<&Path>) -> Option<Self> {
        match Self::try_open(track) {
            Ok(player) => {
                tracing::info!(track = ?track, "Background music ready");
                Some(player)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Background music unavailable");
                None
            }
        }
    }

    fn try_open(track: Option<&Path>) -> Result<Self> {
        let bytes = match track {
            Some(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read music track {}", path.display()))?,
            None => ambient_tone(),
        };
        let source = Decoder::new_looped(Cursor::new(bytes)).context("Failed to decode music track")?;

        let (stream, handle) = OutputStream::try_default().context("No audio output device")?;
        let sink = Sink::try_new(&handle).context("Failed to open audio sink")?;
        sink.pause();
        sink.set_volume(0.0);
        sink.append(source);

        Ok(Self {
            _stream: stream,
            sink,
        })
    }

    /// Follow the music state for this frame
    pub fn sync(&self, output: MusicOutput) {
        self.sink.set_volume(output.volume);
        if output.running && self.sink.is_paused() {
            self.sink.play();
        } else if !output.running && !self.sink.is_paused() {
            self.sink.pause();
        }
    }
}

/// A soft A major chord with a slow swell, as WAV data that loops without a seam
fn ambient_tone() -> Vec<u8> {
    const PARTIALS: [f32; 3] = [220.0, 277.25, 330.0];
    const SWELL_HZ: f32 = 1.0 / TONE_SECONDS as f32;
    const LEVEL: f32 = 0.12;

    let num_samples = (SAMPLE_RATE * TONE_SECONDS) as usize;
    let samples: Vec<i16> = (0..num_samples)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let chord: f32 = PARTIALS
                .iter()
                .map(|f| (std::f32::consts::TAU * f * t).sin())
                .sum();
            let swell = 0.75 - 0.25 * (std::f32::consts::TAU * SWELL_HZ * t).cos();
            (chord * swell * LEVEL * i16::MAX as f32) as i16
        })
        .collect();

    wav_bytes(&samples, SAMPLE_RATE)
}

/// 16-bit mono PCM WAV container
fn wav_bytes(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let channels = 1u16;
    let bits_per_sample = 16u16;
    let block_align = channels * bits_per_sample / 8;
    let byte_rate = sample_rate * block_align as u32;
    let data_size = (samples.len() * block_align as usize) as u32;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}

#[cfg(test)]
mod tests {
    use super::*;
    use rodio::Source;

    #[test]
    fn test_ambient_tone_is_valid_wav() {
        let wav = ambient_tone();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + (SAMPLE_RATE * TONE_SECONDS * 2) as usize);

        let decoder = Decoder::new(Cursor::new(wav)).unwrap();
        assert_eq!(decoder.sample_rate(), SAMPLE_RATE);
        assert_eq!(decoder.channels(), 1);
    }

    #[test]
    fn test_ambient_tone_stays_soft() {
        let wav = ambient_tone();
        let peak = wav[44..]
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]).unsigned_abs())
            .max()
            .unwrap_or(0);
        assert!(peak > 0);
        assert!(peak < i16::MAX as u16 / 2);
    }

    #[test]
    fn test_missing_track_disables_music() {
        let missing = std::env::temp_dir().join("prayerboard-no-such-track.wav");
        assert!(MusicPlayer::open(Some(&missing)).is_none());
    }
}
