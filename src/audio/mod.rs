//! Fire-and-forget sound commands addressed by numeric slot.
//!
//! The simulation only ever talks to an [`AudioSink`]. Real playback state
//! lives behind [`AudioWorker`] on its own thread.

mod wav;
mod worker;

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

pub use wav::{encode as encode_wav, WavClip};
pub use worker::{AudioBackend, AudioWorker, SlotBank};

use crate::error::AudioError;

/// Number of addressable source slots.
pub const NUM_SOURCES: usize = 8;

/// Slots used by the player cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SoundSlot {
    Footsteps = 0,
    Jump = 1,
    Bump = 2,
    Impact = 3,
}

impl SoundSlot {
    pub const ALL: [SoundSlot; 4] = [Self::Footsteps, Self::Jump, Self::Bump, Self::Impact];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Footsteps => "footsteps.wav",
            Self::Jump => "jump.wav",
            Self::Bump => "bump.wav",
            Self::Impact => "impact.wav",
        }
    }

    /// Looping cues keep playing until explicitly stopped.
    pub fn properties(self) -> SourceProperties {
        match self {
            Self::Footsteps | Self::Bump => SourceProperties {
                looping: true,
                ..SourceProperties::default()
            },
            Self::Jump | Self::Impact => SourceProperties::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceProperties {
    pub pitch: f32,
    pub gain: f32,
    pub looping: bool,
}

impl Default for SourceProperties {
    fn default() -> Self {
        Self {
            pitch: 1.0,
            gain: 1.0,
            looping: false,
        }
    }
}

/// Pending answer to a play request: `true` if playback started.
#[derive(Debug)]
pub struct PlayReceipt {
    rx: Receiver<bool>,
}

impl PlayReceipt {
    pub(crate) fn new(rx: Receiver<bool>) -> Self {
        Self { rx }
    }

    /// An already-answered receipt.
    pub fn ready(started: bool) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(started);
        Self { rx }
    }

    /// Block until the worker answers. A worker that went away answers `false`.
    pub fn wait(self) -> bool {
        self.rx.recv().unwrap_or(false)
    }

    /// `None` while the request is still queued.
    pub fn try_result(&self) -> Option<bool> {
        match self.rx.try_recv() {
            Ok(started) => Some(started),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(false),
        }
    }
}

/// Non-blocking command sink. Failures are handled on the receiving side and
/// never reported back, except through [`PlayReceipt`].
pub trait AudioSink {
    fn load_source(&self, slot: u8, path: &Path);
    fn play_source(&self, slot: u8) -> PlayReceipt;
    fn stop_source(&self, slot: u8);
    fn set_source_properties(&self, slot: u8, properties: SourceProperties);
}

/// Discards every command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn load_source(&self, _slot: u8, _path: &Path) {}

    fn play_source(&self, _slot: u8) -> PlayReceipt {
        PlayReceipt::ready(false)
    }

    fn stop_source(&self, _slot: u8) {}

    fn set_source_properties(&self, _slot: u8, _properties: SourceProperties) {}
}

/// Read and validate every cue file in `dir`. Any missing or malformed file
/// is an error, so a bad sound directory is caught before the game starts.
pub fn read_cues(dir: &Path) -> Result<Vec<(SoundSlot, WavClip)>, AudioError> {
    SoundSlot::ALL
        .iter()
        .map(|&cue| {
            let path: PathBuf = dir.join(cue.file_name());
            WavClip::load(&path)
                .map(|clip| (cue, clip))
                .map_err(|source| AudioError::Cue {
                    path,
                    source: Box::new(source),
                })
        })
        .collect()
}
