use thiserror::Error;

/// Failures loading or validating a [`SimulationConfig`](crate::config::SimulationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Audio failures. Cue files that cannot be read abort startup; failures on
/// the worker are logged there and never reach the simulation.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("sound {}: {source}", .path.display())]
    Cue {
        path: std::path::PathBuf,
        #[source]
        source: Box<AudioError>,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid wav: {0}")]
    InvalidWav(&'static str),
    #[error("unsupported format: {bits} bits, {channels} channels")]
    UnsupportedFormat { bits: u16, channels: u16 },
    #[error("sound slot {0} out of range")]
    SlotOutOfRange(u8),
}

/// Platform setup failures. Fatal at startup.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("sdl: {0}")]
    Sdl(String),
    #[error("window: {0}")]
    Window(String),
    #[error("shader: {0}")]
    Shader(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Invalid operations on the actor arena.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("no such actor")]
    UnknownActor,
    #[error("the player actor cannot be removed")]
    PlayerRemoval,
}
