//! River Raid - native entry point
//!
//! Runs the game headless on a recording surface with the autopilot flying.
//! Usage: `river-raid [FRAMES]`

use river_raid::GameError;
use river_raid::app::App;
use river_raid::persistence::DifficultyStore;
use river_raid::platform::RecordingSurface;
use river_raid::sim::GameManager;

/// One minute of play at the simulation rate
const DEFAULT_DEMO_FRAMES: u64 = 60 * river_raid::consts::TICKS_PER_SECOND;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("River Raid (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let frames = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_DEMO_FRAMES);

    let store = DifficultyStore::default_location();
    log::info!("Difficulty file: {}", store.path().display());

    let game = GameManager::load(store)?;
    let mut app = App::new(game, RecordingSurface::with_frame_limit(frames)).with_autopilot(true);
    app.run()?;

    let stats = app.game.stats();
    log::info!(
        "Demo finished: score {}, lives {}, level {}",
        stats.score,
        stats.lives,
        app.game.levels().current().name()
    );
    Ok(())
}
