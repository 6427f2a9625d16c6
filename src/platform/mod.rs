//! Platform abstraction layer
//!
//! The game never talks to a window directly. A frontend hands the game one
//! `InputSnapshot` per frame and receives draw calls through `Canvas`.

use serde::{Deserialize, Serialize};

use crate::Location;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Space,
    Delete,
    Backspace,
}

impl Key {
    #[inline]
    fn bit(self) -> u16 {
        1 << self as u8
    }
}

/// Set of keys as a bitmask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet(u16);

impl KeySet {
    pub fn contains(self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = KeySet::default();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Input for a single frame. Sampled once and shared by every system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Keys currently held down
    pub held: KeySet,
    /// Keys that went down this frame
    pub pressed: KeySet,
    /// Printable characters typed this frame
    pub typed: Vec<char>,
}

impl InputSnapshot {
    /// Snapshot with the given keys held
    pub fn holding(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            held: keys.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Snapshot with the given keys pressed (and held) this frame
    pub fn pressing(keys: impl IntoIterator<Item = Key>) -> Self {
        let pressed: KeySet = keys.into_iter().collect();
        Self {
            held: pressed,
            pressed,
            typed: Vec::new(),
        }
    }

    /// Snapshot carrying typed characters
    pub fn typing(text: &str) -> Self {
        Self {
            typed: text.chars().collect(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(key)
    }

    #[inline]
    pub fn is_up(&self, key: Key) -> bool {
        !self.held.contains(key)
    }

    #[inline]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(key)
    }

    /// True when nothing that moves the taxi is held
    pub fn taxi_stopped(&self) -> bool {
        self.is_up(Key::Up) && self.is_up(Key::Left) && self.is_up(Key::Right)
    }

    /// Downward world displacement this frame for a given scroll speed
    pub fn scroll(&self, speed: f64) -> f64 {
        if self.is_down(Key::Up) { speed } else { 0.0 }
    }

    /// Walk step from the arrow keys (y grows downward)
    pub fn walk_step(&self, speed_x: f64, speed_y: f64) -> Location {
        let mut step = Location::ZERO;
        if self.is_down(Key::Up) {
            step.y -= speed_y;
        }
        if self.is_down(Key::Down) {
            step.y += speed_y;
        }
        if self.is_down(Key::Left) {
            step.x -= speed_x;
        }
        if self.is_down(Key::Right) {
            step.x += speed_x;
        }
        step
    }

    /// Horizontal steering from LEFT/RIGHT
    pub fn steer(&self, speed_x: f64) -> f64 {
        let mut dx = 0.0;
        if self.is_down(Key::Left) {
            dx -= speed_x;
        }
        if self.is_down(Key::Right) {
            dx += speed_x;
        }
        dx
    }
}

/// Every image the game can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Taxi,
    TaxiDamaged,
    Driver,
    Passenger,
    /// Ordinary car colour variant (index into the configured list)
    OtherCar(u8),
    EnemyCar,
    Fireball,
    Fire,
    Smoke,
    Blood,
    Coin,
    InvinciblePower,
    EndFlag,
    BackgroundSunny,
    BackgroundRaining,
    BackgroundHome,
    BackgroundPlayerInfo,
    BackgroundGameEnd,
}

/// Black text is used on the name entry screen, white everywhere else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextColor {
    #[default]
    White,
    Black,
}

/// Drawing capability supplied by the frontend. Images are drawn centered
/// on `at`; text is drawn with its baseline start at `at`.
pub trait Canvas {
    fn draw_image(&mut self, sprite: SpriteId, at: Location);

    fn draw_text(&mut self, size: u32, text: &str, at: Location, color: TextColor);

    /// Rendered width of `text`, used to center lines
    fn text_width(&self, size: u32, text: &str) -> f64;
}
