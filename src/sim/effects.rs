//! Transient cosmetic effects (fire, smoke, blood)

use serde::{Deserialize, Serialize};

use crate::Location;
use crate::config::EffectsConfig;
use crate::platform::SpriteId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Fire,
    Smoke,
    Blood,
}

impl EffectKind {
    pub fn sprite(self) -> SpriteId {
        match self {
            EffectKind::Fire => SpriteId::Fire,
            EffectKind::Smoke => SpriteId::Smoke,
            EffectKind::Blood => SpriteId::Blood,
        }
    }

    pub fn ttl(self, config: &EffectsConfig) -> u32 {
        match self {
            EffectKind::Fire => config.fire_ttl,
            EffectKind::Smoke => config.smoke_ttl,
            EffectKind::Blood => config.blood_ttl,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub pos: Location,
    pub frames_left: u32,
}

/// Registry of live effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effects {
    pub items: Vec<Effect>,
    ttl: EffectsConfig,
}

impl Effects {
    pub fn new(config: EffectsConfig) -> Self {
        Self {
            items: Vec::new(),
            ttl: config,
        }
    }

    /// Spawn an effect with its configured lifetime
    pub fn spawn(&mut self, kind: EffectKind, pos: Location) {
        self.items.push(Effect {
            kind,
            pos,
            frames_left: kind.ttl(&self.ttl),
        });
    }

    /// Drop expired effects, then scroll and age the rest
    pub fn advance(&mut self, scroll: f64) {
        self.items.retain(|e| e.frames_left > 0);
        for effect in &mut self.items {
            effect.pos.y += scroll;
            effect.frames_left -= 1;
        }
    }

    pub fn count(&self, kind: EffectKind) -> usize {
        self.items.iter().filter(|e| e.kind == kind).count()
    }
}
