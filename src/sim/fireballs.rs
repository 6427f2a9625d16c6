//! Fireballs thrown by enemy cars

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Collidable, ColliderKind, CollisionCtx, Contact, EntityId};
use crate::Location;
use crate::config::FireballConfig;
use crate::consts::{FIREBALL_LAUNCH_OFFSET, HEALTH_SCALE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fireball {
    pub id: EntityId,
    pub pos: Location,
    pub radius: f64,
    pub damage: f64,
    /// Upward travel per frame
    pub speed_y: f64,
    pub has_hit_target: bool,
}

impl Fireball {
    /// Launch from a car at `origin`, offset upward so it clears the car
    pub fn launch(id: EntityId, origin: Location, config: &FireballConfig) -> Self {
        Self {
            id,
            pos: Location::new(origin.x, origin.y - FIREBALL_LAUNCH_OFFSET),
            radius: config.radius,
            damage: config.damage * HEALTH_SCALE,
            speed_y: config.shoot_speed_y,
            has_hit_target: false,
        }
    }
}

impl Collidable for Fireball {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> ColliderKind {
        ColliderKind::Fireball
    }

    fn position(&self) -> Location {
        self.pos
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn damage(&self) -> f64 {
        self.damage
    }

    /// Fireballs never enter timeout
    fn timeout_frames(&self) -> u32 {
        0
    }

    /// Fireballs take nothing from a hit; the struck side consumes them
    fn resolve_collision(&mut self, other: &Contact, _ctx: &mut CollisionCtx<'_>) -> bool {
        self.touches(other)
    }
}

/// Live fireballs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fireballs {
    pub items: Vec<Fireball>,
}

impl Fireballs {
    /// One spawn roll for a single enemy car
    pub fn try_spawn(
        &mut self,
        rng: &mut Pcg32,
        next_id: &mut EntityId,
        origin: Location,
        config: &FireballConfig,
    ) -> bool {
        if !rng.random_ratio(1, config.spawn_factor) {
            return false;
        }
        let id = *next_id;
        *next_id += 1;
        self.items.push(Fireball::launch(id, origin, config));
        true
    }

    /// Drop spent fireballs and any below the screen, then move the rest.
    /// Fireballs that climb off the top are kept.
    pub fn advance(&mut self, scroll: f64, world_bottom: f64) {
        self.items
            .retain(|f| !f.has_hit_target && f.pos.y <= world_bottom);
        for fireball in &mut self.items {
            fireball.pos.y += scroll - fireball.speed_y;
        }
    }

    /// Mark a fireball as spent; it is removed on the next advance
    pub fn mark_hit(&mut self, id: EntityId) {
        if let Some(fireball) = self.items.iter_mut().find(|f| f.id == id) {
            fireball.has_hit_target = true;
        }
    }

    /// Snapshots of every live fireball
    pub fn contacts(&self) -> Vec<Contact> {
        self.items
            .iter()
            .filter(|f| !f.has_hit_target)
            .map(Collidable::contact)
            .collect()
    }
}
