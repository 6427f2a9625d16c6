//! Game configuration and localized text
//!
//! Both are plain JSON documents deserialized into typed structs. Damage and
//! health are stored unscaled; entities multiply by `HEALTH_SCALE` on spawn.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Window dimensions in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: f64,
    pub height: f64,
}

/// Sprite and font paths, relative to the asset root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetPaths {
    pub font: String,
    pub taxi: String,
    pub taxi_damaged: String,
    pub driver: String,
    pub passenger: String,
    /// One entry per ordinary car colour variant
    pub other_cars: Vec<String>,
    pub enemy_car: String,
    pub fireball: String,
    pub fire: String,
    pub smoke: String,
    pub blood: String,
    pub coin: String,
    pub invincible_power: String,
    pub end_flag: String,
    pub background_sunny: String,
    pub background_raining: String,
    pub background_home: String,
    pub background_player_info: String,
    pub background_game_end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxiConfig {
    /// Horizontal steering speed
    pub speed_x: f64,
    /// World scroll speed while UP is held
    pub speed_y: f64,
    pub radius: f64,
    pub damage: f64,
    pub health: f64,
    /// Vertical range for a replacement taxi
    pub next_spawn_min_y: f64,
    pub next_spawn_max_y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    pub radius: f64,
    pub walk_speed_x: f64,
    pub walk_speed_y: f64,
    pub health: f64,
    pub taxi_get_in_radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengerConfig {
    pub radius: f64,
    pub walk_speed_x: f64,
    pub walk_speed_y: f64,
    pub health: f64,
    pub taxi_detect_radius: f64,
    pub font_size: u32,
}

/// Tuning shared by ordinary and enemy cars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarConfig {
    pub radius: f64,
    pub damage: f64,
    pub health: f64,
    pub min_speed_y: f64,
    pub max_speed_y: f64,
    /// A car spawns with probability 1 / spawn_factor each frame
    pub spawn_factor: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireballConfig {
    pub radius: f64,
    pub damage: f64,
    pub shoot_speed_y: f64,
    /// Per enemy car, per frame
    pub spawn_factor: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub radius: f64,
    /// Frames the effect lasts once picked up
    pub max_frames: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EffectsConfig {
    pub fire_ttl: u32,
    pub smoke_ttl: u32,
    pub blood_ttl: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EndFlagConfig {
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadConfig {
    pub lane_centers: Vec<f64>,
}

/// Trip pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripConfig {
    /// Flat rate per priority tier; index 0 is tier 1
    pub priority_rates: Vec<f64>,
    pub rate_per_y: f64,
    pub penalty_per_y: f64,
}

impl TripConfig {
    /// Flat rate for a tier (1-based). Tiers past the table use its last rate.
    pub fn tier_rate(&self, tier: u32) -> f64 {
        let index = (tier.max(1) - 1) as usize;
        self.priority_rates
            .get(index)
            .or(self.priority_rates.last())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn max_tier(&self) -> u32 {
        self.priority_rates.len() as u32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameplayConfig {
    pub target: f64,
    pub max_frames: u32,
    pub world_file: PathBuf,
    pub weather_file: PathBuf,
    pub scores_file: PathBuf,
    /// Directory the sprite paths are relative to
    pub asset_root: PathBuf,
}

/// HUD text positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HudConfig {
    pub font_size: u32,
    pub earnings: [f64; 2],
    pub target: [f64; 2],
    pub remaining_frames: [f64; 2],
    pub coin_timer: [f64; 2],
    pub taxi_health: [f64; 2],
    pub driver_health: [f64; 2],
    pub passenger_health: [f64; 2],
    pub trip_info: [f64; 2],
    pub title_font_size: u32,
    pub title_y: f64,
    pub instruction_font_size: u32,
    pub instruction_y: f64,
    pub player_name_y: f64,
    pub player_name_input_y: f64,
    pub start_y: f64,
    pub scores_font_size: u32,
    pub scores_y: f64,
    pub status_font_size: u32,
    pub status_y: f64,
}

/// Complete game tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub assets: AssetPaths,
    pub taxi: TaxiConfig,
    pub driver: DriverConfig,
    pub passenger: PassengerConfig,
    pub other_car: CarConfig,
    pub enemy_car: CarConfig,
    pub fireball: FireballConfig,
    pub coin: TokenConfig,
    pub invincible_power: TokenConfig,
    pub effects: EffectsConfig,
    pub end_flag: EndFlagConfig,
    pub road: RoadConfig,
    pub trip: TripConfig,
    pub gameplay: GameplayConfig,
    pub hud: HudConfig,
}

impl GameConfig {
    /// Load and validate from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let config: Self = read_json(path.as_ref())?;
        config.validate()?;
        log::info!("Loaded game config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate from a JSON string
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let config: Self = serde_json::from_str(json).map_err(|source| LoadError::Json {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tuning the simulation can't run with
    pub fn validate(&self) -> Result<(), LoadError> {
        let invalid = |msg: String| Err(LoadError::InvalidConfig(msg));

        if self.road.lane_centers.is_empty() {
            return invalid("road.lane_centers must not be empty".into());
        }
        if self.trip.priority_rates.is_empty() {
            return invalid("trip.priority_rates must not be empty".into());
        }
        if self.assets.other_cars.is_empty() {
            return invalid("assets.other_cars must list at least one sprite".into());
        }
        if self.assets.other_cars.len() > usize::from(u8::MAX) + 1 {
            return invalid(format!(
                "assets.other_cars lists {} sprites, at most {} are supported",
                self.assets.other_cars.len(),
                usize::from(u8::MAX) + 1
            ));
        }
        for (name, car) in [("other_car", &self.other_car), ("enemy_car", &self.enemy_car)] {
            if car.min_speed_y > car.max_speed_y {
                return invalid(format!("{name}.min_speed_y exceeds {name}.max_speed_y"));
            }
            if car.spawn_factor == 0 {
                return invalid(format!("{name}.spawn_factor must be positive"));
            }
        }
        if self.fireball.spawn_factor == 0 {
            return invalid("fireball.spawn_factor must be positive".into());
        }
        if self.taxi.next_spawn_min_y > self.taxi.next_spawn_max_y {
            return invalid("taxi.next_spawn_min_y exceeds taxi.next_spawn_max_y".into());
        }
        let radii = [
            ("taxi.radius", self.taxi.radius),
            ("driver.radius", self.driver.radius),
            ("passenger.radius", self.passenger.radius),
            ("other_car.radius", self.other_car.radius),
            ("enemy_car.radius", self.enemy_car.radius),
            ("fireball.radius", self.fireball.radius),
            ("coin.radius", self.coin.radius),
            ("invincible_power.radius", self.invincible_power.radius),
            ("end_flag.radius", self.end_flag.radius),
        ];
        for (key, radius) in radii {
            if !(radius.is_finite() && radius > 0.0) {
                return invalid(format!("{key} must be a positive number"));
            }
        }
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return invalid("window dimensions must be positive".into());
        }
        Ok(())
    }
}

/// Localized strings shown on screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    pub home_title: String,
    pub home_instruction: String,
    pub player_name: String,
    pub start: String,
    pub earnings: String,
    pub target: String,
    pub remaining_frames: String,
    pub taxi_health: String,
    pub driver_health: String,
    pub passenger_health: String,
    pub ongoing_trip_title: String,
    pub completed_trip_title: String,
    pub expected_earning: String,
    pub priority: String,
    pub penalty: String,
    pub highest_scores: String,
    pub won: String,
    pub lost: String,
}

impl Messages {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        read_json(path.as_ref())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
