use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, error, warn};

use super::wav::WavClip;
use super::{AudioSink, PlayReceipt, SoundSlot, SourceProperties, NUM_SOURCES};
use crate::error::AudioError;

/// Device-facing side of the audio worker. Runs on the worker thread only.
pub trait AudioBackend: Send + 'static {
    fn load(&mut self, slot: u8, path: &Path) -> Result<(), AudioError>;
    /// Install an already decoded clip.
    fn load_clip(&mut self, slot: u8, clip: WavClip) -> Result<(), AudioError>;
    /// `Ok(false)` when the slot is empty or still playing.
    fn play(&mut self, slot: u8) -> Result<bool, AudioError>;
    fn stop(&mut self, slot: u8) -> Result<(), AudioError>;
    fn set_properties(&mut self, slot: u8, properties: SourceProperties) -> Result<(), AudioError>;
}

enum AudioCommand {
    Load { slot: u8, path: PathBuf },
    LoadClip { slot: u8, clip: WavClip },
    Play { slot: u8, reply: Sender<bool> },
    Stop { slot: u8 },
    SetProperties { slot: u8, properties: SourceProperties },
    Shutdown,
}

/// Owns the audio thread. Commands are handled in the order they were sent.
/// Dropping the worker stops the thread and joins it.
pub struct AudioWorker {
    tx: Sender<AudioCommand>,
    thread: Option<JoinHandle<()>>,
}

impl AudioWorker {
    pub fn spawn<B: AudioBackend>(backend: B) -> Result<Self, AudioError> {
        let (tx, rx) = mpsc::channel::<AudioCommand>();
        let thread = thread::Builder::new()
            .name("audio-worker".to_string())
            .spawn(move || worker_loop(backend, rx))?;

        Ok(Self {
            tx,
            thread: Some(thread),
        })
    }

    /// Hand a clip decoded on the caller's thread to the worker.
    pub fn load_clip(&self, slot: u8, clip: WavClip) {
        self.send(AudioCommand::LoadClip { slot, clip });
    }

    /// Install cues read with [`read_cues`](super::read_cues) and apply their
    /// default properties.
    pub fn install_cues(&self, cues: Vec<(SoundSlot, WavClip)>) {
        for (cue, clip) in cues {
            self.load_clip(cue.index(), clip);
            self.set_source_properties(cue.index(), cue.properties());
        }
    }

    fn send(&self, command: AudioCommand) {
        if self.tx.send(command).is_err() {
            warn!("audio worker is gone, command dropped");
        }
    }
}

impl AudioSink for AudioWorker {
    fn load_source(&self, slot: u8, path: &Path) {
        self.send(AudioCommand::Load {
            slot,
            path: path.to_path_buf(),
        });
    }

    fn play_source(&self, slot: u8) -> PlayReceipt {
        let (reply, rx) = mpsc::channel();
        self.send(AudioCommand::Play { slot, reply });
        PlayReceipt::new(rx)
    }

    fn stop_source(&self, slot: u8) {
        self.send(AudioCommand::Stop { slot });
    }

    fn set_source_properties(&self, slot: u8, properties: SourceProperties) {
        self.send(AudioCommand::SetProperties { slot, properties });
    }
}

impl Drop for AudioWorker {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn worker_loop<B: AudioBackend>(mut backend: B, rx: Receiver<AudioCommand>) {
    debug!("audio worker started");
    while let Ok(command) = rx.recv() {
        match command {
            AudioCommand::Load { slot, path } => {
                if let Err(e) = backend.load(slot, &path) {
                    error!(slot, path = %path.display(), "failed to load sound: {e}");
                }
            }
            AudioCommand::LoadClip { slot, clip } => {
                if let Err(e) = backend.load_clip(slot, clip) {
                    error!(slot, "failed to install sound: {e}");
                }
            }
            AudioCommand::Play { slot, reply } => {
                let started = backend.play(slot).unwrap_or_else(|e| {
                    error!(slot, "failed to play sound: {e}");
                    false
                });
                let _ = reply.send(started);
            }
            AudioCommand::Stop { slot } => {
                if let Err(e) = backend.stop(slot) {
                    error!(slot, "failed to stop sound: {e}");
                }
            }
            AudioCommand::SetProperties { slot, properties } => {
                if let Err(e) = backend.set_properties(slot, properties) {
                    error!(slot, "failed to set sound properties: {e}");
                }
            }
            AudioCommand::Shutdown => break,
        }
    }
    debug!("audio worker stopped");
}

#[derive(Debug, Default)]
struct Source {
    clip: Option<WavClip>,
    properties: SourceProperties,
    started: Option<Instant>,
}

impl Source {
    fn is_playing(&self) -> bool {
        let (Some(clip), Some(started)) = (&self.clip, self.started) else {
            return false;
        };
        if self.properties.looping {
            return true;
        }
        let pitch = self.properties.pitch.max(0.01);
        started.elapsed() < clip.duration().div_f32(pitch)
    }
}

/// Backend that tracks per-slot playback state for decoded clips.
#[derive(Debug, Default)]
pub struct SlotBank {
    sources: [Source; NUM_SOURCES],
}

impl SlotBank {
    pub fn new() -> Self {
        Self::default()
    }

    fn source(&mut self, slot: u8) -> Result<&mut Source, AudioError> {
        self.sources
            .get_mut(usize::from(slot))
            .ok_or(AudioError::SlotOutOfRange(slot))
    }

    pub fn is_playing(&self, slot: u8) -> bool {
        self.sources
            .get(usize::from(slot))
            .is_some_and(Source::is_playing)
    }
}

impl AudioBackend for SlotBank {
    fn load(&mut self, slot: u8, path: &Path) -> Result<(), AudioError> {
        let clip = WavClip::load(path)?;
        debug!(slot, path = %path.display(), duration = ?clip.duration(), "sound loaded");
        self.load_clip(slot, clip)
    }

    fn load_clip(&mut self, slot: u8, clip: WavClip) -> Result<(), AudioError> {
        let source = self.source(slot)?;
        source.clip = Some(clip);
        source.started = None;
        Ok(())
    }

    fn play(&mut self, slot: u8) -> Result<bool, AudioError> {
        let source = self.source(slot)?;
        if source.clip.is_none() || source.is_playing() {
            return Ok(false);
        }
        source.started = Some(Instant::now());
        Ok(true)
    }

    fn stop(&mut self, slot: u8) -> Result<(), AudioError> {
        self.source(slot)?.started = None;
        Ok(())
    }

    fn set_properties(&mut self, slot: u8, properties: SourceProperties) -> Result<(), AudioError> {
        self.source(slot)?.properties = properties;
        Ok(())
    }
}
