//! The player's taxi and its wrecks

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::characters::Passenger;
use super::collision::{
    Collidable, ColliderKind, CollisionCtx, CollisionState, Contact, EntityId, Exchange,
};
use super::effects::EffectKind;
use super::traffic::Traffic;
use crate::Location;
use crate::config::{GameConfig, TaxiConfig};
use crate::consts::{HEALTH_SCALE, VEHICLE_PUSH_OUT};
use crate::platform::{InputSnapshot, SpriteId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxi {
    pub id: EntityId,
    pub pos: Location,
    pub radius: f64,
    pub damage: f64,
    pub health: f64,
    pub has_driver: bool,
    pub invincible: bool,
    pub collision: CollisionState,
}

impl Taxi {
    pub fn new(id: EntityId, pos: Location, has_driver: bool, config: &TaxiConfig) -> Self {
        Self {
            id,
            pos,
            radius: config.radius,
            damage: config.damage * HEALTH_SCALE,
            health: config.health * HEALTH_SCALE,
            has_driver,
            invincible: false,
            collision: CollisionState::default(),
        }
    }

    pub fn is_wrecked(&self) -> bool {
        self.health <= 0.0
    }

    /// Steer while driven; an empty taxi just scrolls with the road
    pub fn drive(&mut self, input: &InputSnapshot, config: &TaxiConfig) {
        if self.has_driver {
            self.pos.x += input.steer(config.speed_x);
        } else {
            self.pos.y += input.scroll(config.speed_y);
        }
    }

    /// Contacts with every car (both directions) and every fireball, then
    /// push-out and timers. Returns the fireballs it consumed.
    pub fn collide(
        &mut self,
        traffic: &mut Traffic,
        fireballs: &[Contact],
        ctx: &mut CollisionCtx<'_>,
    ) -> Vec<EntityId> {
        traffic.collide_with(self, ctx);
        let consumed = fireballs
            .iter()
            .filter(|f| self.resolve_collision(f, ctx))
            .map(|f| f.id)
            .collect();

        self.collision
            .advance(&mut self.pos, Location::new(0.0, VEHICLE_PUSH_OUT));
        consumed
    }

    /// First waiting passenger within detection range, skipping whoever
    /// just finished a trip. Only a stopped taxi finds anyone.
    pub fn find_near_passenger(
        &self,
        input: &InputSnapshot,
        passengers: &[Passenger],
        exclude: Option<EntityId>,
        detect_radius: f64,
    ) -> Option<usize> {
        if !input.taxi_stopped() {
            return None;
        }
        passengers.iter().position(|p| {
            Some(p.id()) != exclude && self.pos.distance(p.body.pos) <= detect_radius
        })
    }
}

impl Collidable for Taxi {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> ColliderKind {
        ColliderKind::Taxi
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

        if !self.invincible && self.collision.exchange(other, false) == Exchange::Hit {
            self.collision.start_timeout();
            self.health -= other.damage;
            let effect = if self.health > 0.0 {
                EffectKind::Smoke
            } else {
                EffectKind::Fire
            };
            ctx.effects.spawn(effect, self.pos);
        }
        true
    }
}

/// A destroyed taxi left on the road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wreck {
    pub pos: Location,
}

impl Wreck {
    pub fn sprite(&self) -> SpriteId {
        SpriteId::TaxiDamaged
    }
}

/// Fresh empty taxi in a random lane within the respawn band
pub fn spawn_replacement(id: EntityId, rng: &mut Pcg32, config: &GameConfig) -> Taxi {
    let lanes = &config.road.lane_centers;
    let x = lanes[rng.random_range(0..lanes.len())];
    let (min_y, max_y) = (config.taxi.next_spawn_min_y, config.taxi.next_spawn_max_y);
    let y = if min_y < max_y {
        rng.random_range(min_y..=max_y)
    } else {
        min_y
    };
    Taxi::new(id, Location::new(x, y), false, &config.taxi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::fixture;
    use crate::platform::Key;
    use crate::sim::effects::Effects;
    use crate::sim::traffic::{Car, CarKind};
    use rand::SeedableRng;

    #[test]
    fn test_enemy_hit_scenario() {
        let config = fixture();
        let mut effects = Effects::new(config.effects);
        let mut rng = Pcg32::seed_from_u64(4);
        let mut taxi = Taxi::new(1, Location::new(480.0, 400.0), true, &config.taxi);
        taxi.health = 1500.0;
        let mut enemy = Car::new(
            2,
            CarKind::Enemy,
            Location::new(480.0, 450.0),
            3.0,
            &config.enemy_car,
        );
        enemy.damage = 50.0;

        let mut ctx = CollisionCtx {
            effects: &mut effects,
            rng: &mut rng,
            config: &config,
        };
        assert!(taxi.resolve_collision(&enemy.contact(), &mut ctx));
        assert_eq!(taxi.health, 1450.0);
        assert_eq!(taxi.collision.timeout_frames, 200);
        assert_eq!(effects.count(EffectKind::Smoke), 1);
    }

    #[test]
    fn test_taxi_and_car_trade_damage_once() {
        let config = fixture();
        let mut effects = Effects::new(config.effects);
        let mut rng = Pcg32::seed_from_u64(4);
        let mut taxi = Taxi::new(1, Location::new(480.0, 400.0), true, &config.taxi);
        let mut traffic = Traffic {
            cars: vec![Car::new(
                2,
                CarKind::Ordinary { variant: 0 },
                Location::new(480.0, 430.0),
                3.0,
                &config.other_car,
            )],
        };
        let taxi_full = taxi.health;
        let car_full = traffic.cars[0].health;

        for _ in 0..20 {
            let mut ctx = CollisionCtx {
                effects: &mut effects,
                rng: &mut rng,
                config: &config,
            };
            taxi.collide(&mut traffic, &[], &mut ctx);
        }
        assert_eq!(taxi.health, taxi_full - traffic.cars[0].damage);
        // The car sees the taxi's fresh timeout and still takes the hit
        assert_eq!(traffic.cars[0].health, car_full - taxi.damage);
    }

    #[test]
    fn test_invincible_taxi_consumes_fireball_unharmed() {
        let config = fixture();
        let mut effects = Effects::new(config.effects);
        let mut rng = Pcg32::seed_from_u64(4);
        let mut taxi = Taxi::new(1, Location::new(480.0, 400.0), true, &config.taxi);
        taxi.invincible = true;
        let fireball = Contact {
            id: 77,
            kind: ColliderKind::Fireball,
            position: Location::new(480.0, 420.0),
            radius: 10.0,
            damage: 20.0,
            timeout_frames: 0,
        };
        let mut ctx = CollisionCtx {
            effects: &mut effects,
            rng: &mut rng,
            config: &config,
        };
        let consumed = taxi.collide(&mut Traffic::default(), &[fireball], &mut ctx);
        assert_eq!(consumed, vec![77]);
        assert_eq!(taxi.health, config.taxi.health * HEALTH_SCALE);
        assert!(effects.items.is_empty());
    }

    #[test]
    fn test_drive_steers_or_scrolls() {
        let config = fixture();
        let mut taxi = Taxi::new(1, Location::new(480.0, 400.0), true, &config.taxi);
        taxi.drive(&InputSnapshot::holding([Key::Left, Key::Up]), &config.taxi);
        assert_eq!(taxi.pos, Location::new(479.0, 400.0));

        taxi.has_driver = false;
        taxi.drive(&InputSnapshot::holding([Key::Left, Key::Up]), &config.taxi);
        assert_eq!(taxi.pos, Location::new(479.0, 405.0));
    }

    #[test]
    fn test_replacement_lands_in_a_lane() {
        let config = fixture();
        let mut rng = Pcg32::seed_from_u64(11);
        for id in 0..20 {
            let taxi = spawn_replacement(id, &mut rng, &config);
            assert!(config.road.lane_centers.contains(&taxi.pos.x));
            assert!(taxi.pos.y >= config.taxi.next_spawn_min_y);
            assert!(taxi.pos.y <= config.taxi.next_spawn_max_y);
            assert!(!taxi.has_driver);
        }
    }

    #[test]
    fn test_find_near_passenger_requires_stop() {
        let config = fixture();
        let taxi = Taxi::new(1, Location::new(480.0, 400.0), true, &config.taxi);
        let spawn = crate::layout::PassengerSpawn {
            position: Location::new(430.0, 400.0),
            priority: 1,
            destination_x: 480.0,
            travel_distance: 300.0,
            has_umbrella: false,
        };
        let passengers = vec![Passenger::new(
            5,
            &spawn,
            &config.passenger,
            &config.end_flag,
            &config.trip,
        )];
        let radius = config.passenger.taxi_detect_radius;

        let moving = InputSnapshot::holding([Key::Right]);
        assert_eq!(taxi.find_near_passenger(&moving, &passengers, None, radius), None);

        let stopped = InputSnapshot::holding([Key::Down]);
        assert_eq!(taxi.find_near_passenger(&stopped, &passengers, None, radius), Some(0));
        assert_eq!(taxi.find_near_passenger(&stopped, &passengers, Some(5), radius), None);
    }
}
