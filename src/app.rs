//! Screen sequencing
//!
//! Home -> name entry -> gameplay -> end -> home. ESCAPE quits from any
//! screen. The score table is written once, when a session produces an
//! outcome.

use std::path::PathBuf;

use crate::config::{GameConfig, Messages};
use crate::consts::TOP_SCORES_SHOWN;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::layout::{WeatherSchedule, WorldLayout};
use crate::platform::{Canvas, InputSnapshot, Key};
use crate::renderer;
use crate::sim::{GameState, tick};

/// Which screen is showing
#[derive(Debug, Clone)]
pub enum Screen {
    Home,
    NameEntry { name: String },
    Playing(Box<GameState>),
    GameEnd { won: bool, scores: Vec<HighScoreEntry> },
}

impl Screen {
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::NameEntry { .. } => "name entry",
            Screen::Playing(_) => "playing",
            Screen::GameEnd { .. } => "game end",
        }
    }
}

/// Owns the loaded data and the current screen
#[derive(Debug)]
pub struct App {
    config: GameConfig,
    messages: Messages,
    layout: WorldLayout,
    schedule: WeatherSchedule,
    scores_path: PathBuf,
    seed: u64,
    screen: Screen,
    quit: bool,
}

impl App {
    pub fn new(
        config: GameConfig,
        messages: Messages,
        layout: WorldLayout,
        schedule: WeatherSchedule,
        scores_path: impl Into<PathBuf>,
        seed: u64,
    ) -> Self {
        Self {
            config,
            messages,
            layout,
            schedule,
            scores_path: scores_path.into(),
            seed,
            screen: Screen::Home,
            quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The running session, if gameplay is showing
    pub fn session(&self) -> Option<&GameState> {
        match &self.screen {
            Screen::Playing(state) => Some(state),
            _ => None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle one frame of input and draw the resulting screen
    pub fn update(&mut self, input: &InputSnapshot, canvas: &mut dyn Canvas) {
        if self.quit {
            return;
        }
        if input.was_pressed(Key::Escape) {
            log::info!("Quit requested");
            self.quit = true;
            return;
        }

        let next = match &mut self.screen {
            Screen::Home => {
                renderer::render_home(&self.config, &self.messages, canvas);
                input.was_pressed(Key::Enter).then(|| Screen::NameEntry {
                    name: String::new(),
                })
            }
            Screen::NameEntry { name } => {
                edit_name(name, input);
                renderer::render_name_entry(&self.config, &self.messages, name, canvas);
                if input.was_pressed(Key::Enter) {
                    let name = std::mem::take(name);
                    Some(self.start_session(name))
                } else {
                    None
                }
            }
            Screen::Playing(state) => {
                tick(state, input);
                renderer::render_game(state, &self.messages, canvas);
                match state.outcome {
                    Some(outcome) => {
                        let name = state.player_name.clone();
                        Some(self.finish_session(name, outcome.won, outcome.score))
                    }
                    None => None,
                }
            }
            Screen::GameEnd { won, scores } => {
                renderer::render_game_end(&self.config, &self.messages, *won, scores, canvas);
                input.was_pressed(Key::Space).then_some(Screen::Home)
            }
        };

        if let Some(next) = next {
            log::info!("Screen: {} -> {}", self.screen.label(), next.label());
            self.screen = next;
        }
    }

    fn start_session(&mut self, name: String) -> Screen {
        log::info!("Starting session for {name} (seed {})", self.seed);
        let state = GameState::new(
            self.config.clone(),
            &self.layout,
            self.schedule.clone(),
            name,
            self.seed,
        );
        self.seed = self.seed.wrapping_add(1);
        Screen::Playing(Box::new(state))
    }

    fn finish_session(&self, name: String, won: bool, score: f64) -> Screen {
        let entry = HighScoreEntry { name, score };
        if let Err(e) = HighScores::append(&self.scores_path, &entry) {
            log::error!("Failed to save score: {e}");
        }
        let scores = match HighScores::load(&self.scores_path) {
            Ok(table) => table.top(TOP_SCORES_SHOWN).to_vec(),
            Err(e) => {
                log::error!("Failed to read scores: {e}");
                vec![entry]
            }
        };
        Screen::GameEnd { won, scores }
    }
}

/// Apply typed characters and deletions to the name being entered
fn edit_name(name: &mut String, input: &InputSnapshot) {
    if input.was_pressed(Key::Delete) || input.was_pressed(Key::Backspace) {
        name.pop();
    }
    name.extend(input.typed.iter().filter(|c| !c.is_control()));
}
