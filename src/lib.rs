//! Taxi Rush - A scrolling arcade taxi game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, trips, session state)
//! - `renderer`: Draw-list rendering of the session and HUD
//! - `platform`: Input snapshot and drawing capability
//! - `config`: Data-driven game tuning and localized text
//! - `layout`: World layout and weather schedule files
//! - `highscores`: Persisted score table
//! - `app`: Screen sequencing (home, name entry, gameplay, end)
//! - `assets`: Sprite file lookup

pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod highscores;
pub mod layout;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, Messages};
pub use error::LoadError;
pub use highscores::HighScores;

/// A position in world/screen space (pixels, y grows downward)
pub type Location = glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Frames of push-out animation after a contact
    pub const TOTAL_COLLISION_FRAMES: u32 = 10;
    /// Frames of post-hit invulnerability/stun
    pub const TOTAL_TIMEOUT_FRAMES: u32 = 200;

    /// Damage and health values in config are multiplied by this on load
    pub const HEALTH_SCALE: f64 = 100.0;

    /// Per-frame push-out step for cars and the taxi (vertical only)
    pub const VEHICLE_PUSH_OUT: f64 = 1.0;
    /// Per-frame push-out step for characters (both axes)
    pub const CHARACTER_PUSH_OUT: f64 = 2.0;

    /// Spawn Y above the viewport for new traffic
    pub const TRAFFIC_SPAWN_Y_ABOVE: f64 = -50.0;

    /// Fireballs start this far above the car that fires them
    pub const FIREBALL_LAUNCH_OFFSET: f64 = 50.0;

    /// Ejection offsets to the left of a wrecked taxi
    pub const DRIVER_EJECT_DISTANCE: f64 = 50.0;
    pub const PASSENGER_EJECT_DISTANCE: f64 = 100.0;

    /// Passengers outside rain cover drop to this tier
    pub const RAIN_PRIORITY: u32 = 1;

    /// Background tiles wrap once they pass this multiple of window height
    pub const BACKGROUND_WRAP_FACTOR: f64 = 1.5;

    /// Number of scores shown on the end screen
    pub const TOP_SCORES_SHOWN: usize = 5;
}
