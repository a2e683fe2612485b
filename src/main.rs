use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vantage::app::GameApp;
use vantage::audio::{read_cues, AudioSink, AudioWorker, NullAudio, SlotBank};
use vantage::config::SimulationConfig;
use vantage::engine::window::GameWindow;
use vantage::scene::load_test_scene;

#[derive(Parser)]
#[command(name = "vantage", about = "Walk around a small physics sandbox")]
struct Args {
    /// JSON file overriding the simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Directory holding footsteps.wav, jump.wav, bump.wav and impact.wav
    #[arg(long, default_value = "sounds")]
    sounds: PathBuf,

    /// Run without sound
    #[arg(long)]
    mute: bool,

    /// Log filter, e.g. `debug` or `vantage::systems=debug`. RUST_LOG wins if set.
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    config.validate().context("invalid simulation config")?;

    let sdl = sdl2::init().map_err(anyhow::Error::msg).context("initialising SDL2")?;
    let window = GameWindow::new(&sdl, "Vantage", args.width, args.height).context("creating window")?;

    let audio = start_audio(&args)?;
    let world = load_test_scene(config);
    let mut app = GameApp::new(world, audio).context("initialising renderer")?;

    info!(width = args.width, height = args.height, "starting");
    app.run(&sdl, &window)?;
    Ok(())
}

/// Unreadable or malformed cue files abort startup.
fn start_audio(args: &Args) -> Result<Box<dyn AudioSink>> {
    if args.mute {
        info!("audio muted");
        return Ok(Box::new(NullAudio));
    }
    let cues = read_cues(&args.sounds).context("loading sound cues (pass --mute to run without sound)")?;
    let worker = AudioWorker::spawn(SlotBank::new()).context("starting audio worker")?;
    worker.install_cues(cues);
    info!(dir = %args.sounds.display(), "audio ready");
    Ok(Box::new(worker))
}
