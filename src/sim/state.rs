//! Session state
//!
//! Everything one gameplay session owns lives here. All registries are built
//! fresh from the world layout when a session starts.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::characters::{Driver, Passenger};
use super::collision::EntityId;
use super::effects::Effects;
use super::fireballs::Fireballs;
use super::taxi::{Taxi, Wreck};
use super::tokens::Tokens;
use super::traffic::Traffic;
use crate::config::GameConfig;
use crate::consts::BACKGROUND_WRAP_FACTOR;
use crate::layout::{Weather, WeatherSchedule, WorldLayout};

/// Where the session is in the pickup/drop-off cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripPhase {
    /// No passenger aboard, none walking to the taxi
    Searching,
    /// A passenger (index) is walking to the stopped taxi
    Dispatching { passenger: usize },
    /// A passenger (index) is on board
    InTrip { passenger: usize },
}

/// The most recent finished trip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletedTrip {
    pub passenger: usize,
    pub earnings: f64,
    pub priority: u32,
    pub penalty: f64,
    /// Still walking to the flag
    pub walking: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub won: bool,
    pub score: f64,
}

/// Two stacked background tiles per weather, scrolled together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub sunny: [f64; 2],
    pub raining: [f64; 2],
    height: f64,
}

impl Background {
    pub fn new(window_height: f64) -> Self {
        let tiles = [window_height / 2.0, window_height / 2.0 - window_height];
        Self {
            sunny: tiles,
            raining: tiles,
            height: window_height,
        }
    }

    /// Scroll every tile and wrap any that slid too far down above its
    /// sibling
    pub fn advance(&mut self, scroll: f64) {
        let limit = self.height * BACKGROUND_WRAP_FACTOR;
        for tiles in [&mut self.sunny, &mut self.raining] {
            for y in tiles.iter_mut() {
                *y += scroll;
            }
            if tiles[0] >= limit {
                tiles[0] = tiles[1] - self.height;
            }
            if tiles[1] >= limit {
                tiles[1] = tiles[0] - self.height;
            }
        }
    }

    pub fn tiles(&self, weather: Weather) -> [f64; 2] {
        match weather {
            Weather::Sunny => self.sunny,
            Weather::Raining => self.raining,
        }
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub config: GameConfig,
    pub player_name: String,
    pub schedule: WeatherSchedule,
    pub weather: Weather,
    pub background: Background,

    pub score: f64,
    pub frames_remaining: u32,
    /// Countdown to a loss once the driver or a passenger has died
    pub lost_frames: u32,
    pub coin_frames: u32,
    pub invincible_frames: u32,

    pub taxi: Taxi,
    pub wrecks: Vec<Wreck>,
    pub driver: Driver,
    /// Layout order; indices are stable for the whole session
    pub passengers: Vec<Passenger>,
    pub tokens: Tokens,
    pub traffic: Traffic,
    pub fireballs: Fireballs,
    pub effects: Effects,

    pub trip: TripPhase,
    pub last_trip: Option<CompletedTrip>,
    pub outcome: Option<Outcome>,
    pub(crate) next_id: EntityId,
}

impl GameState {
    pub fn new(
        config: GameConfig,
        layout: &WorldLayout,
        schedule: WeatherSchedule,
        player_name: impl Into<String>,
        seed: u64,
    ) -> Self {
        let mut next_id: EntityId = 1;
        let mut alloc = || {
            let id = next_id;
            next_id += 1;
            id
        };

        let taxi = Taxi::new(alloc(), layout.taxi, true, &config.taxi);
        let driver = Driver::new(alloc(), layout.taxi, &config.driver);
        let passengers = layout
            .passengers
            .iter()
            .map(|spawn| {
                Passenger::new(
                    alloc(),
                    spawn,
                    &config.passenger,
                    &config.end_flag,
                    &config.trip,
                )
            })
            .collect();
        let tokens = Tokens::from_layout(&layout.tokens, &config);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player_name: player_name.into(),
            schedule,
            weather: Weather::Sunny,
            background: Background::new(config.window.height),
            score: 0.0,
            frames_remaining: config.gameplay.max_frames,
            lost_frames: config.effects.fire_ttl,
            coin_frames: 0,
            invincible_frames: 0,
            taxi,
            wrecks: Vec::new(),
            driver,
            passengers,
            tokens,
            traffic: Traffic::default(),
            fireballs: Fireballs::default(),
            effects: Effects::new(config.effects),
            trip: TripPhase::Searching,
            last_trip: None,
            outcome: None,
            next_id,
            config,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Frames played so far
    pub fn elapsed_frames(&self) -> u32 {
        self.config
            .gameplay
            .max_frames
            .saturating_sub(self.frames_remaining)
    }

    pub fn is_raining(&self) -> bool {
        self.weather == Weather::Raining
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Index of the passenger currently on a trip
    pub fn in_trip(&self) -> Option<usize> {
        match self.trip {
            TripPhase::InTrip { passenger } => Some(passenger),
            _ => None,
        }
    }

    pub fn last_trip_passenger(&self) -> Option<usize> {
        self.last_trip.map(|t| t.passenger)
    }

    pub fn min_passenger_health(&self) -> f64 {
        self.passengers
            .iter()
            .map(|p| p.body.health)
            .fold(f64::INFINITY, f64::min)
    }
}
