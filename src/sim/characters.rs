//! Characters on foot: the driver and the passengers
//!
//! Both share a `Character` core (walking, health, collision response).
//! Passengers additionally carry their trip: priority tier, fare and the
//! destination flag.

use serde::{Deserialize, Serialize};

use super::collision::{
    Collidable, ColliderKind, CollisionCtx, CollisionState, Contact, EntityId, Exchange,
};
use super::effects::EffectKind;
use crate::Location;
use crate::config::{DriverConfig, EndFlagConfig, PassengerConfig, TripConfig};
use crate::consts::{
    CHARACTER_PUSH_OUT, DRIVER_EJECT_DISTANCE, HEALTH_SCALE, PASSENGER_EJECT_DISTANCE,
    RAIN_PRIORITY,
};
use crate::layout::PassengerSpawn;
use crate::platform::InputSnapshot;

/// Shared body of anything that walks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: EntityId,
    pub pos: Location,
    pub radius: f64,
    pub walk_speed: Location,
    pub health: f64,
    pub invincible: bool,
    pub collision: CollisionState,
}

impl Character {
    pub fn new(id: EntityId, pos: Location, radius: f64, walk_speed: Location, health: f64) -> Self {
        Self {
            id,
            pos,
            radius,
            walk_speed,
            health,
            invincible: false,
            collision: CollisionState::default(),
        }
    }

    /// Walk with the arrow keys
    pub fn walk(&mut self, input: &InputSnapshot) {
        self.pos += input.walk_step(self.walk_speed.x, self.walk_speed.y);
    }

    /// One walking step toward `target`, never overshooting on either axis.
    /// Returns true once standing on `target` (before this step).
    pub fn move_toward(&mut self, target: Location) -> bool {
        if self.pos == target {
            return true;
        }
        self.pos.x = step_toward(self.pos.x, target.x, self.walk_speed.x);
        self.pos.y = step_toward(self.pos.y, target.y, self.walk_speed.y);
        false
    }

    /// Place beside a wrecked taxi
    pub fn eject(&mut self, wreck: Location, distance: f64) {
        self.pos = Location::new(wreck.x - distance, wreck.y);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Resolve against every contact in `others`. Returns the ids that touched.
    pub fn collide_all(
        &mut self,
        others: &[Contact],
        ctx: &mut CollisionCtx<'_>,
    ) -> Vec<EntityId> {
        others
            .iter()
            .filter(|other| self.resolve_collision(other, ctx))
            .map(|other| other.id)
            .collect()
    }

    pub fn finish_frame(&mut self) {
        self.collision.advance(
            &mut self.pos,
            Location::new(CHARACTER_PUSH_OUT, CHARACTER_PUSH_OUT),
        );
    }
}

fn step_toward(from: f64, to: f64, speed: f64) -> f64 {
    if from < to {
        (from + speed).min(to)
    } else if from > to {
        (from - speed).max(to)
    } else {
        from
    }
}

impl Collidable for Character {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> ColliderKind {
        ColliderKind::Character
    }

    fn position(&self) -> Location {
        self.pos
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    /// Pedestrians never hurt what they walk into
    fn damage(&self) -> f64 {
        0.0
    }

    fn timeout_frames(&self) -> u32 {
        self.collision.timeout_frames
    }

    fn resolve_collision(&mut self, other: &Contact, ctx: &mut CollisionCtx<'_>) -> bool {
        if !self.touches(other) {
            return false;
        }
        self.collision.begin_push_out(self.pos, other);

        if !self.invincible && self.collision.exchange(other, false) == Exchange::Hit {
            self.collision.start_timeout();
            self.health -= other.damage;
            if self.is_dead() {
                ctx.effects.spawn(EffectKind::Blood, self.pos);
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub body: Character,
    /// Back in a taxi, holding it until the in-trip passenger arrives
    pub waiting_for_passenger: bool,
}

impl Driver {
    pub fn new(id: EntityId, pos: Location, config: &DriverConfig) -> Self {
        Self {
            body: Character::new(
                id,
                pos,
                config.radius,
                Location::new(config.walk_speed_x, config.walk_speed_y),
                config.health * HEALTH_SCALE,
            ),
            waiting_for_passenger: false,
        }
    }

    pub fn eject(&mut self, wreck: Location) {
        self.waiting_for_passenger = false;
        self.body.eject(wreck, DRIVER_EJECT_DISTANCE);
    }
}

/// Destination marker of a trip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndFlag {
    pub pos: Location,
    pub radius: f64,
}

impl EndFlag {
    /// Inside the flag or already past it going up
    pub fn reached_by(&self, at: Location) -> bool {
        at.distance(self.pos) <= self.radius || at.y <= self.pos.y
    }

    /// Charge for overshooting the flag by more than its radius
    pub fn penalty(&self, at: Location, trip: &TripConfig) -> f64 {
        if at.y < self.pos.y && at.distance(self.pos) > self.radius {
            trip.penalty_per_y * (self.pos.y - at.y)
        } else {
            0.0
        }
    }
}

/// Fare for a trip of `travel_distance` at a priority tier
pub fn earnings_for(priority: u32, travel_distance: f64, trip: &TripConfig) -> f64 {
    trip.tier_rate(priority) + trip.rate_per_y * travel_distance
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub body: Character,
    pub has_umbrella: bool,
    /// Tier before weather; a coin lowers it once
    pub base_priority: u32,
    pub priority: u32,
    pub travel_distance: f64,
    pub earnings: f64,
    pub flag: EndFlag,
    pub used_coin: bool,
}

impl Passenger {
    pub fn new(
        id: EntityId,
        spawn: &PassengerSpawn,
        config: &PassengerConfig,
        flag: &EndFlagConfig,
        trip: &TripConfig,
    ) -> Self {
        let pos = spawn.position;
        Self {
            body: Character::new(
                id,
                pos,
                config.radius,
                Location::new(config.walk_speed_x, config.walk_speed_y),
                config.health * HEALTH_SCALE,
            ),
            has_umbrella: spawn.has_umbrella,
            base_priority: spawn.priority,
            priority: spawn.priority,
            travel_distance: spawn.travel_distance,
            earnings: earnings_for(spawn.priority, spawn.travel_distance, trip),
            flag: EndFlag {
                pos: Location::new(spawn.destination_x, pos.y - spawn.travel_distance),
                radius: flag.radius,
            },
            used_coin: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.body.id
    }

    /// Recompute the current tier and fare for this frame's weather
    pub fn refresh(&mut self, raining: bool, trip: &TripConfig) {
        self.priority = if raining && !self.has_umbrella {
            RAIN_PRIORITY
        } else {
            self.base_priority
        };
        self.earnings = earnings_for(self.priority, self.travel_distance, trip);
    }

    /// Lower the base tier by one, once per passenger
    pub fn use_coin(&mut self) {
        if !self.used_coin && self.base_priority > 1 {
            self.base_priority -= 1;
            self.used_coin = true;
        }
    }

    pub fn at_drop_off(&self) -> bool {
        self.flag.reached_by(self.body.pos)
    }

    pub fn penalty(&self, trip: &TripConfig) -> f64 {
        self.flag.penalty(self.body.pos, trip)
    }

    pub fn eject(&mut self, wreck: Location) {
        self.body.eject(wreck, PASSENGER_EJECT_DISTANCE);
    }
}
