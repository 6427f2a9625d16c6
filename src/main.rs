//! Taxi Rush entry point
//!
//! Loads the data files, then plays one session headlessly with the demo
//! driver: home, name entry, gameplay until the session ends, and the end
//! screen. The score is appended to the table like any other session.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use taxi_rush::app::{App, Screen};
use taxi_rush::assets::SpriteAtlas;
use taxi_rush::config::{GameConfig, Messages};
use taxi_rush::layout::{WeatherSchedule, WorldLayout, resolve};
use taxi_rush::platform::{InputSnapshot, Key};
use taxi_rush::renderer::DrawList;
use taxi_rush::sim::autopilot;

const CONFIG_FILE: &str = "res/config.json";
const MESSAGES_FILE: &str = "res/messages_en.json";
const DEMO_PLAYER: &str = "DEMO";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Taxi Rush (headless demo) starting...");

    let config = GameConfig::load(CONFIG_FILE).context("loading game config")?;
    let messages = Messages::load(MESSAGES_FILE).context("loading messages")?;
    let base = Path::new("");
    let layout = WorldLayout::load(resolve(base, &config.gameplay.world_file))
        .context("loading world layout")?;
    anyhow::ensure!(
        layout.max_priority() <= config.trip.max_tier(),
        "world layout asks for priority {} but only {} rate tiers are configured",
        layout.max_priority(),
        config.trip.max_tier()
    );
    let schedule = WeatherSchedule::load(resolve(base, &config.gameplay.weather_file))
        .context("loading weather schedule")?;
    let scores_path = resolve(base, &config.gameplay.scores_file);

    // The draw list needs no image files, so a missing sprite only matters
    // to a windowed frontend
    match SpriteAtlas::resolve(resolve(base, &config.gameplay.asset_root), &config.assets) {
        Ok(atlas) => log::info!("{} sprites available", atlas.len()),
        Err(e) => log::warn!("{e}; drawing without sprites"),
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let mut app = App::new(config, messages, layout, schedule, scores_path, seed);
    let mut canvas = DrawList::new();

    let mut step = |app: &mut App, input: InputSnapshot| {
        canvas.clear();
        app.update(&input, &mut canvas);
    };
    step(&mut app, InputSnapshot::pressing([Key::Enter]));
    step(&mut app, InputSnapshot::typing(DEMO_PLAYER));
    step(&mut app, InputSnapshot::pressing([Key::Enter]));

    while let Some(state) = app.session() {
        let input = autopilot(state);
        step(&mut app, input);
    }

    if let Screen::GameEnd { won, scores } = app.screen() {
        log::info!("Demo {}", if *won { "won" } else { "lost" });
        for entry in scores {
            log::info!("  {} - {:.2}", entry.name, entry.score);
        }
    }
    step(&mut app, InputSnapshot::pressing([Key::Escape]));
    log::info!("Taxi Rush exiting (quit: {})", app.should_quit());
    Ok(())
}
