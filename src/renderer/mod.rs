//! Rendering module
//!
//! Turns session and screen state into image and text draws against a
//! `Canvas`. `DrawList` is a canvas that records the draws, used by the
//! headless runner and by tests.

use serde::{Deserialize, Serialize};

use crate::Location;
use crate::config::{GameConfig, Messages};
use crate::consts::TOP_SCORES_SHOWN;
use crate::highscores::HighScoreEntry;
use crate::layout::Weather;
use crate::platform::{Canvas, SpriteId, TextColor};
use crate::sim::{GameState, TripPhase};

/// Offsets of the trip panel lines below its title
const TRIP_EARNINGS_OFFSET: f64 = 30.0;
const TRIP_PRIORITY_OFFSET: f64 = 60.0;
const TRIP_PENALTY_OFFSET: f64 = 90.0;

/// Passenger labels sit this far left of the sprite
const PASSENGER_EARNINGS_OFFSET: f64 = 100.0;
const PASSENGER_PRIORITY_OFFSET: f64 = 30.0;

const SCORE_LINE_SPACING: f64 = 40.0;

/// Approximate advance of one glyph, as a fraction of the font size
const GLYPH_WIDTH_FACTOR: f64 = 0.6;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Image {
        sprite: SpriteId,
        at: Location,
    },
    Text {
        size: u32,
        text: String,
        at: Location,
        color: TextColor,
    },
}

/// Canvas that records draws in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn images(&self) -> impl Iterator<Item = (SpriteId, Location)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Image { sprite, at } => Some((*sprite, *at)),
            DrawCommand::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Image { .. } => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn count(&self, sprite: SpriteId) -> usize {
        self.images().filter(|(s, _)| *s == sprite).count()
    }
}

impl Canvas for DrawList {
    fn draw_image(&mut self, sprite: SpriteId, at: Location) {
        self.commands.push(DrawCommand::Image { sprite, at });
    }

    fn draw_text(&mut self, size: u32, text: &str, at: Location, color: TextColor) {
        self.commands.push(DrawCommand::Text {
            size,
            text: text.to_string(),
            at,
            color,
        });
    }

    fn text_width(&self, size: u32, text: &str) -> f64 {
        text.chars().count() as f64 * size as f64 * GLYPH_WIDTH_FACTOR
    }
}

fn centered(canvas: &mut dyn Canvas, width: f64, size: u32, text: &str, y: f64, color: TextColor) {
    let x = (width - canvas.text_width(size, text)) / 2.0;
    canvas.draw_text(size, text, Location::new(x, y), color);
}

fn at(pair: [f64; 2]) -> Location {
    Location::new(pair[0], pair[1])
}

fn screen_center(config: &GameConfig) -> Location {
    Location::new(config.window.width / 2.0, config.window.height / 2.0)
}

/// Title screen
pub fn render_home(config: &GameConfig, messages: &Messages, canvas: &mut dyn Canvas) {
    let hud = &config.hud;
    let width = config.window.width;
    canvas.draw_image(SpriteId::BackgroundHome, screen_center(config));
    centered(canvas, width, hud.title_font_size, &messages.home_title, hud.title_y, TextColor::White);
    centered(
        canvas,
        width,
        hud.instruction_font_size,
        &messages.home_instruction,
        hud.instruction_y,
        TextColor::White,
    );
}

/// Name entry screen
pub fn render_name_entry(
    config: &GameConfig,
    messages: &Messages,
    name: &str,
    canvas: &mut dyn Canvas,
) {
    let hud = &config.hud;
    let width = config.window.width;
    canvas.draw_image(SpriteId::BackgroundPlayerInfo, screen_center(config));
    centered(canvas, width, hud.instruction_font_size, &messages.player_name, hud.player_name_y, TextColor::White);
    centered(canvas, width, hud.instruction_font_size, name, hud.player_name_input_y, TextColor::Black);
    centered(canvas, width, hud.instruction_font_size, &messages.start, hud.start_y, TextColor::White);
}

/// Result screen with the best scores
pub fn render_game_end(
    config: &GameConfig,
    messages: &Messages,
    won: bool,
    scores: &[HighScoreEntry],
    canvas: &mut dyn Canvas,
) {
    let hud = &config.hud;
    let width = config.window.width;
    canvas.draw_image(SpriteId::BackgroundGameEnd, screen_center(config));

    let mut y = hud.scores_y;
    for entry in scores.iter().take(TOP_SCORES_SHOWN) {
        y += SCORE_LINE_SPACING;
        let line = format!("{} - {:.2}", entry.name, entry.score);
        centered(canvas, width, hud.scores_font_size, &line, y, TextColor::White);
    }
    centered(canvas, width, hud.scores_font_size, &messages.highest_scores, hud.scores_y, TextColor::White);

    let status = if won { &messages.won } else { &messages.lost };
    centered(canvas, width, hud.status_font_size, status, hud.status_y, TextColor::White);
}

/// One gameplay frame: world back to front, then the HUD
pub fn render_game(state: &GameState, messages: &Messages, canvas: &mut dyn Canvas) {
    let config = &state.config;
    let center_x = config.window.width / 2.0;

    let background = match state.weather {
        Weather::Sunny => SpriteId::BackgroundSunny,
        Weather::Raining => SpriteId::BackgroundRaining,
    };
    for y in state.background.tiles(state.weather) {
        canvas.draw_image(background, Location::new(center_x, y));
    }

    canvas.draw_image(SpriteId::Taxi, state.taxi.pos);
    for wreck in &state.wrecks {
        canvas.draw_image(wreck.sprite(), wreck.pos);
    }
    for token in &state.tokens.items {
        canvas.draw_image(token.kind.sprite(), token.pos);
    }
    if !state.taxi.has_driver && !state.driver.waiting_for_passenger {
        canvas.draw_image(SpriteId::Driver, state.driver.body.pos);
    }
    render_passengers(state, canvas);

    for car in &state.traffic.cars {
        canvas.draw_image(car.kind.sprite(), car.pos);
    }
    for fireball in &state.fireballs.items {
        canvas.draw_image(SpriteId::Fireball, fireball.pos);
    }
    for effect in &state.effects.items {
        canvas.draw_image(effect.kind.sprite(), effect.pos);
    }

    render_hud(state, messages, canvas);
}

fn render_passengers(state: &GameState, canvas: &mut dyn Canvas) {
    let in_trip = state.in_trip();
    let last = state.last_trip_passenger();
    let size = state.config.passenger.font_size;

    for (index, passenger) in state.passengers.iter().enumerate() {
        if Some(index) == in_trip {
            if !state.taxi.has_driver {
                canvas.draw_image(SpriteId::Passenger, passenger.body.pos);
            }
            canvas.draw_image(SpriteId::EndFlag, passenger.flag.pos);
            continue;
        }
        canvas.draw_image(SpriteId::Passenger, passenger.body.pos);
        if Some(index) == last {
            if state.last_trip.is_some_and(|t| t.walking) {
                canvas.draw_image(SpriteId::EndFlag, passenger.flag.pos);
            }
            continue;
        }
        let pos = passenger.body.pos;
        canvas.draw_text(
            size,
            &format!("{:.1}", passenger.earnings),
            Location::new(pos.x - PASSENGER_EARNINGS_OFFSET, pos.y),
            TextColor::White,
        );
        canvas.draw_text(
            size,
            &passenger.priority.to_string(),
            Location::new(pos.x - PASSENGER_PRIORITY_OFFSET, pos.y),
            TextColor::White,
        );
    }
}

fn render_hud(state: &GameState, messages: &Messages, canvas: &mut dyn Canvas) {
    let hud = &state.config.hud;
    let size = hud.font_size;
    let white = TextColor::White;

    canvas.draw_text(size, &format!("{}{:.2}", messages.earnings, state.score), at(hud.earnings), white);
    canvas.draw_text(
        size,
        &format!("{}{:.2}", messages.target, state.config.gameplay.target),
        at(hud.target),
        white,
    );
    canvas.draw_text(
        size,
        &format!("{}{}", messages.remaining_frames, state.frames_remaining),
        at(hud.remaining_frames),
        white,
    );
    if state.coin_frames > 0 {
        let used = state.config.coin.max_frames - state.coin_frames;
        canvas.draw_text(size, &used.to_string(), at(hud.coin_timer), white);
    }

    canvas.draw_text(
        size,
        &format!("{}{:.2}", messages.taxi_health, state.taxi.health),
        at(hud.taxi_health),
        white,
    );
    canvas.draw_text(
        size,
        &format!("{}{:.2}", messages.driver_health, state.driver.body.health),
        at(hud.driver_health),
        white,
    );
    let passenger_health = match state.in_trip() {
        Some(index) => state.passengers[index].body.health,
        None => state.min_passenger_health(),
    };
    canvas.draw_text(
        size,
        &format!("{}{:.1}", messages.passenger_health, passenger_health),
        at(hud.passenger_health),
        white,
    );

    let origin = at(hud.trip_info);
    let line = |offset: f64| Location::new(origin.x, origin.y + offset);
    match (state.trip, state.last_trip) {
        (TripPhase::InTrip { passenger }, _) => {
            let passenger = &state.passengers[passenger];
            canvas.draw_text(size, &messages.ongoing_trip_title, origin, white);
            canvas.draw_text(
                size,
                &format!("{}{:.1}", messages.expected_earning, passenger.earnings),
                line(TRIP_EARNINGS_OFFSET),
                white,
            );
            canvas.draw_text(
                size,
                &format!("{}{}", messages.priority, passenger.priority),
                line(TRIP_PRIORITY_OFFSET),
                white,
            );
        }
        (_, Some(trip)) => {
            canvas.draw_text(size, &messages.completed_trip_title, origin, white);
            canvas.draw_text(
                size,
                &format!("{}{:.1}", messages.expected_earning, trip.earnings),
                line(TRIP_EARNINGS_OFFSET),
                white,
            );
            canvas.draw_text(
                size,
                &format!("{}{}", messages.priority, trip.priority),
                line(TRIP_PRIORITY_OFFSET),
                white,
            );
            canvas.draw_text(
                size,
                &format!("{}{:.2}", messages.penalty, trip.penalty),
                line(TRIP_PENALTY_OFFSET),
                white,
            );
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::tests::session;

    fn messages() -> Messages {
        serde_json::from_str(include_str!("../../res/messages_en.json"))
            .unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn test_game_frame_draws_world_then_hud() {
        let state = session(5);
        let mut list = DrawList::new();
        render_game(&state, &messages(), &mut list);

        assert_eq!(list.count(SpriteId::BackgroundSunny), 2);
        assert_eq!(list.count(SpriteId::Taxi), 1);
        assert_eq!(list.count(SpriteId::Passenger), 5);
        assert_eq!(list.count(SpriteId::Driver), 0, "driver rides inside");
        assert!(list.has_text("PAY 0.00"));
        assert!(list.has_text("TARGET 500.00"));
        assert!(!list.has_text("ONGOING TRIP"));
        assert!(matches!(list.commands.first(), Some(DrawCommand::Image { .. })));
    }

    #[test]
    fn test_in_trip_passenger_hidden_and_flag_shown() {
        let mut state = session(5);
        state.trip = TripPhase::InTrip { passenger: 0 };
        let mut list = DrawList::new();
        render_game(&state, &messages(), &mut list);
        assert_eq!(list.count(SpriteId::Passenger), 4);
        assert_eq!(list.count(SpriteId::EndFlag), 1);
        assert!(list.has_text("ONGOING TRIP"));
        assert!(list.has_text("EXPECTED FEE"));
    }

    #[test]
    fn test_end_screen_lists_top_five() {
        let state = session(5);
        let scores: Vec<_> = (0..7)
            .map(|i| HighScoreEntry {
                name: format!("p{i}"),
                score: 100.0 - i as f64,
            })
            .collect();
        let mut list = DrawList::new();
        render_game_end(&state.config, &messages(), true, &scores, &mut list);
        assert!(list.has_text("p0 - 100.00"));
        assert!(list.has_text("p4 - 96.00"));
        assert!(!list.has_text("p5"));
        assert!(list.has_text("YOU WON"));
    }

    #[test]
    fn test_name_entry_is_centered() {
        let state = session(5);
        let mut list = DrawList::new();
        render_name_entry(&state.config, &messages(), "ADA", &mut list);
        let name = list
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { text, at, color, .. } if text == "ADA" => Some((*at, *color)),
                _ => None,
            })
            .unwrap_or_else(|| panic!("name not drawn"));
        let width = list.text_width(state.config.hud.instruction_font_size, "ADA");
        assert_eq!(name.0.x, (state.config.window.width - width) / 2.0);
        assert_eq!(name.1, TextColor::Black);
    }
}
