//! Traffic: ordinary and enemy cars
//!
//! Cars drift up the screen at their own speed, stop while stunned, collide
//! with each other, the taxi, characters and fireballs. Enemy cars throw
//! fireballs.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{
    Collidable, ColliderKind, CollisionCtx, CollisionState, Contact, EntityId, Exchange,
};
use super::effects::EffectKind;
use super::fireballs::Fireballs;
use crate::Location;
use crate::config::{CarConfig, GameConfig};
use crate::consts::{HEALTH_SCALE, TOTAL_TIMEOUT_FRAMES, TRAFFIC_SPAWN_Y_ABOVE, VEHICLE_PUSH_OUT};
use crate::platform::SpriteId;

/// Car types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarKind {
    /// Plain traffic with a colour variant
    Ordinary { variant: u8 },
    /// Throws fireballs
    Enemy,
}

impl CarKind {
    pub fn tuning(self, config: &GameConfig) -> &CarConfig {
        match self {
            CarKind::Ordinary { .. } => &config.other_car,
            CarKind::Enemy => &config.enemy_car,
        }
    }

    pub fn sprite(self) -> SpriteId {
        match self {
            CarKind::Ordinary { variant } => SpriteId::OtherCar(variant),
            CarKind::Enemy => SpriteId::EnemyCar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: EntityId,
    pub kind: CarKind,
    pub pos: Location,
    pub radius: f64,
    pub damage: f64,
    pub health: f64,
    /// Upward drift per frame
    pub speed_y: f64,
    pub collision: CollisionState,
    /// Grace frames after bumping something already stunned
    pub standing_frames: u32,
}

impl Car {
    pub fn new(id: EntityId, kind: CarKind, pos: Location, speed_y: f64, config: &CarConfig) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: config.radius,
            damage: config.damage * HEALTH_SCALE,
            health: config.health * HEALTH_SCALE,
            speed_y,
            collision: CollisionState::default(),
            standing_frames: 0,
        }
    }

    /// Dead and done with its push-out
    pub fn is_wrecked(&self) -> bool {
        self.health <= 0.0 && !self.collision.is_pushing()
    }

    /// Whether the car drifts this frame
    pub fn is_moving(&self) -> bool {
        self.collision.timeout_frames == 0
            && self.collision.collision_frames == 0
            && self.standing_frames == 0
    }

    fn reroll_speed(&mut self, rng: &mut Pcg32, config: &GameConfig) {
        let tuning = self.kind.tuning(config);
        self.speed_y = roll_speed(rng, tuning);
    }
}

impl Collidable for Car {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> ColliderKind {
        ColliderKind::Car
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

    fn timeout_frames(&self) -> u32 {
        self.collision.timeout_frames
    }

    fn resolve_collision(&mut self, other: &Contact, ctx: &mut CollisionCtx<'_>) -> bool {
        if !self.touches(other) {
            return false;
        }
        self.collision.begin_push_out(self.pos, other);

        match self.collision.exchange(other, true) {
            Exchange::Ignored => {}
            Exchange::Hit => {
                self.collision.start_timeout();
                self.standing_frames = 0;
                self.health -= other.damage;
                if self.health <= 0.0 {
                    ctx.effects.spawn(EffectKind::Fire, self.pos);
                } else if other.kind != ColliderKind::Character {
                    // Running into pedestrians doesn't make a car smoke
                    ctx.effects.spawn(EffectKind::Smoke, self.pos);
                }
                self.reroll_speed(ctx.rng, ctx.config);
            }
            Exchange::Glancing => {
                self.standing_frames = TOTAL_TIMEOUT_FRAMES;
                self.reroll_speed(ctx.rng, ctx.config);
            }
        }
        true
    }
}

fn roll_speed(rng: &mut Pcg32, tuning: &CarConfig) -> f64 {
    if tuning.min_speed_y >= tuning.max_speed_y {
        return tuning.min_speed_y;
    }
    rng.random_range(tuning.min_speed_y..=tuning.max_speed_y)
}

/// All cars on the road
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Traffic {
    pub cars: Vec<Car>,
}

impl Traffic {
    /// Independent spawn rolls for each car type
    pub fn spawn(&mut self, rng: &mut Pcg32, next_id: &mut EntityId, config: &GameConfig) {
        let variants = config.assets.other_cars.len().max(1);
        // `validate` caps the variant list at 256
        let variant = rng.random_range(0..variants) as u8;
        for kind in [CarKind::Ordinary { variant }, CarKind::Enemy] {
            let tuning = kind.tuning(config);
            if !rng.random_ratio(1, tuning.spawn_factor) {
                continue;
            }
            let lanes = &config.road.lane_centers;
            let x = lanes[rng.random_range(0..lanes.len())];
            let y = if rng.random_bool(0.5) {
                TRAFFIC_SPAWN_Y_ABOVE
            } else {
                config.window.height
            };
            let speed = roll_speed(rng, tuning);
            let id = *next_id;
            *next_id += 1;
            self.cars.push(Car::new(id, kind, Location::new(x, y), speed, tuning));
        }
    }

    /// Remove wrecks, drift and scroll the rest, and let enemy cars fire.
    /// Cars that leave the screen stay on the road and keep firing.
    pub fn advance(
        &mut self,
        scroll: f64,
        fireballs: &mut Fireballs,
        rng: &mut Pcg32,
        next_id: &mut EntityId,
        config: &GameConfig,
    ) {
        self.cars.retain(|car| !car.is_wrecked());
        for car in &mut self.cars {
            if car.is_moving() {
                car.pos.y -= car.speed_y;
            }
            car.pos.y += scroll;
            if car.kind == CarKind::Enemy {
                fireballs.try_spawn(rng, next_id, car.pos, &config.fireball);
            }
        }
    }

    /// `other` meets every car: it resolves first, then each car responds to
    /// its updated state
    pub fn collide_with(&mut self, other: &mut dyn Collidable, ctx: &mut CollisionCtx<'_>) {
        for car in &mut self.cars {
            let car_contact = car.contact();
            other.resolve_collision(&car_contact, ctx);
            let other_contact = other.contact();
            car.resolve_collision(&other_contact, ctx);
        }
    }

    /// Car against car and car against fireball, then push-out and timers
    pub fn resolve_collisions(&mut self, fireballs: &mut Fireballs, ctx: &mut CollisionCtx<'_>) {
        let count = self.cars.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (left, right) = self.cars.split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];
                let b_contact = b.contact();
                a.resolve_collision(&b_contact, ctx);
                let a_contact = a.contact();
                b.resolve_collision(&a_contact, ctx);
            }
            for fireball in fireballs.contacts() {
                if self.cars[i].resolve_collision(&fireball, ctx) {
                    fireballs.mark_hit(fireball.id);
                }
            }
        }

        for car in &mut self.cars {
            car.collision
                .advance(&mut car.pos, Location::new(0.0, VEHICLE_PUSH_OUT));
            car.standing_frames = car.standing_frames.saturating_sub(1);
        }
    }
}
