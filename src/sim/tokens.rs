//! Power-up tokens placed by the world layout

use serde::{Deserialize, Serialize};

use super::collision::circles_overlap;
use crate::Location;
use crate::config::GameConfig;
use crate::layout::TokenSpawn;
use crate::platform::SpriteId;

/// Token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Demotes the in-trip passenger's base priority
    Coin,
    /// Makes the driver and taxi immune to damage
    Invincibility,
}

impl TokenKind {
    pub fn sprite(self) -> SpriteId {
        match self {
            TokenKind::Coin => SpriteId::Coin,
            TokenKind::Invincibility => SpriteId::InvinciblePower,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Location,
    pub radius: f64,
    pub used: bool,
}

/// Tokens still in the world
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tokens {
    pub items: Vec<Token>,
}

impl Tokens {
    pub fn from_layout(spawns: &[TokenSpawn], config: &GameConfig) -> Self {
        let items = spawns
            .iter()
            .map(|spawn| Token {
                kind: spawn.kind,
                pos: spawn.position,
                radius: match spawn.kind {
                    TokenKind::Coin => config.coin.radius,
                    TokenKind::Invincibility => config.invincible_power.radius,
                },
                used: false,
            })
            .collect();
        Self { items }
    }

    pub fn scroll(&mut self, dy: f64) {
        for token in &mut self.items {
            token.pos.y += dy;
        }
    }

    /// Consume every token touching the collector circle and report what was
    /// picked up
    pub fn collect(&mut self, at: Location, radius: f64) -> Vec<TokenKind> {
        let mut picked = Vec::new();
        for token in &mut self.items {
            if circles_overlap(at, radius, token.pos, token.radius) {
                token.used = true;
                picked.push(token.kind);
            }
        }
        self.items.retain(|t| !t.used);
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Tokens {
        Tokens {
            items: vec![
                Token {
                    kind: TokenKind::Coin,
                    pos: Location::new(0.0, 0.0),
                    radius: 10.0,
                    used: false,
                },
                Token {
                    kind: TokenKind::Invincibility,
                    pos: Location::new(0.0, 200.0),
                    radius: 10.0,
                    used: false,
                },
            ],
        }
    }

    #[test]
    fn test_collect_removes_touched_tokens() {
        let mut tokens = tokens();
        let picked = tokens.collect(Location::new(15.0, 0.0), 5.0);
        assert_eq!(picked, vec![TokenKind::Coin]);
        assert_eq!(tokens.items.len(), 1);
        assert!(tokens.collect(Location::new(15.0, 0.0), 5.0).is_empty());
    }

    #[test]
    fn test_scroll_moves_tokens_down() {
        let mut tokens = tokens();
        tokens.scroll(5.0);
        assert_eq!(tokens.items[1].pos.y, 205.0);
    }
}
