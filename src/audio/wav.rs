//! Minimal RIFF/WAVE reader for uncompressed PCM clips.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::AudioError;

const PCM_FORMAT: u16 = 1;

/// A decoded PCM clip. Samples are kept as raw little-endian bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct WavClip {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub data: Vec<u8>,
}

impl WavClip {
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        let bytes = fs::read(path)?;
        Self::parse(&bytes)
    }

    /// Parse a RIFF/WAVE byte stream. Chunks other than `fmt ` and `data` are
    /// skipped. Only 8/16-bit mono/stereo PCM is accepted.
    pub fn parse(bytes: &[u8]) -> Result<Self, AudioError> {
        if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(AudioError::InvalidWav("missing RIFF/WAVE header"));
        }

        let mut format: Option<(u16, u16, u32, u16)> = None;
        let mut data: Option<&[u8]> = None;
        let mut cursor = 12;

        while cursor + 8 <= bytes.len() {
            let id = &bytes[cursor..cursor + 4];
            let size = read_u32(bytes, cursor + 4) as usize;
            let body_start = cursor + 8;
            let body_end = body_start
                .checked_add(size)
                .filter(|&end| end <= bytes.len())
                .ok_or(AudioError::InvalidWav("chunk runs past end of file"))?;
            let body = &bytes[body_start..body_end];

            match id {
                b"fmt " => {
                    if body.len() < 16 {
                        return Err(AudioError::InvalidWav("fmt chunk too short"));
                    }
                    format = Some((
                        read_u16(body, 0),
                        read_u16(body, 2),
                        read_u32(body, 4),
                        read_u16(body, 14),
                    ));
                }
                b"data" => data = Some(body),
                _ => {}
            }

            // chunks are word aligned
            cursor = body_end + (size & 1);
        }

        let (audio_format, channels, sample_rate, bits_per_sample) =
            format.ok_or(AudioError::InvalidWav("missing fmt chunk"))?;
        let data = data.ok_or(AudioError::InvalidWav("missing data chunk"))?;

        if audio_format != PCM_FORMAT {
            return Err(AudioError::InvalidWav("not PCM"));
        }
        if !matches!(bits_per_sample, 8 | 16) || !matches!(channels, 1 | 2) {
            return Err(AudioError::UnsupportedFormat {
                bits: bits_per_sample,
                channels,
            });
        }
        if sample_rate == 0 {
            return Err(AudioError::InvalidWav("zero sample rate"));
        }

        Ok(Self {
            channels,
            sample_rate,
            bits_per_sample,
            data: data.to_vec(),
        })
    }

    pub fn frame_count(&self) -> usize {
        let block_align = usize::from(self.channels) * usize::from(self.bits_per_sample / 8);
        self.data.len() / block_align
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count() as f64 / f64::from(self.sample_rate))
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Serialise a PCM clip. Used to produce fixtures.
pub fn encode(clip: &WavClip) -> Vec<u8> {
    let block_align = clip.channels * (clip.bits_per_sample / 8);
    let byte_rate = clip.sample_rate * u32::from(block_align);
    let data_len = clip.data.len() as u32;

    let mut out = Vec::with_capacity(44 + clip.data.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    out.extend_from_slice(&clip.channels.to_le_bytes());
    out.extend_from_slice(&clip.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&clip.bits_per_sample.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(&clip.data);
    out
}
