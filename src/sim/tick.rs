//! Fixed-step frame update
//!
//! One call advances the session by exactly one frame from one input
//! snapshot. Order matters: weather and background, then movement and
//! scrolling of every registry, then taxi replacement, tokens, collisions,
//! termination and finally the trip state machine.

use super::characters::Character;
use super::collision::CollisionCtx;
use super::fireballs::Fireballs;
use super::state::{CompletedTrip, GameState, Outcome, TripPhase};
use super::taxi::{Wreck, spawn_replacement};
use super::tokens::TokenKind;
use super::traffic::Traffic;
use crate::platform::InputSnapshot;

/// Advance the session by one frame. Does nothing once the session is over.
pub fn tick(state: &mut GameState, input: &InputSnapshot) {
    if state.is_over() {
        return;
    }
    let scroll = input.scroll(state.config.taxi.speed_y);

    update_weather(state);
    state.background.advance(scroll);
    move_taxi(state, input, scroll);
    state.tokens.scroll(scroll);
    update_driver(state, input);
    update_passengers(state, input, scroll);
    update_traffic(state, scroll);
    state
        .fireballs
        .advance(scroll, state.config.window.height);
    state.effects.advance(scroll);

    replace_wrecked_taxi(state);
    apply_tokens(state);
    resolve_collisions(state);
    check_completion(state);
    state.frames_remaining = state.frames_remaining.saturating_sub(1);

    if !state.is_over() {
        update_trip(state, input);
    }
}

/// First schedule row covering the elapsed frame wins; gaps keep the
/// current weather
fn update_weather(state: &mut GameState) {
    if let Some(weather) = state.schedule.weather_at(state.elapsed_frames()) {
        if weather != state.weather {
            log::debug!("Weather now {:?}", weather);
        }
        state.weather = weather;
    }
}

fn move_taxi(state: &mut GameState, input: &InputSnapshot, scroll: f64) {
    state.taxi.drive(input, &state.config.taxi);
    for wreck in &mut state.wrecks {
        wreck.pos.y += scroll;
    }
}

/// Inside the taxi the driver rides along; outside they walk and board once
/// close enough. With a trip underway the driver holds the taxi until the
/// passenger has walked back to it.
fn update_driver(state: &mut GameState, input: &InputSnapshot) {
    let taxi_pos = state.taxi.pos;
    if state.taxi.has_driver {
        state.driver.body.pos = taxi_pos;
        return;
    }
    if !state.driver.waiting_for_passenger {
        state.driver.body.walk(input);
    }
    if state.driver.body.pos.distance(taxi_pos) > state.config.driver.taxi_get_in_radius {
        return;
    }

    match state.in_trip() {
        Some(index) => {
            state.driver.waiting_for_passenger = true;
            state.driver.body.pos = taxi_pos;
            if state.passengers[index].body.move_toward(taxi_pos) {
                state.taxi.has_driver = true;
                state.driver.waiting_for_passenger = false;
                log::debug!("Driver and passenger back in the taxi");
            }
        }
        None => {
            state.taxi.has_driver = true;
            state.driver.waiting_for_passenger = false;
            log::debug!("Driver back in the taxi");
        }
    }
}

fn update_passengers(state: &mut GameState, input: &InputSnapshot, scroll: f64) {
    let raining = state.is_raining();
    let in_trip = state.in_trip();
    let last = state.last_trip_passenger();
    let ejected_walks = !state.taxi.has_driver && !state.driver.waiting_for_passenger;

    for (index, passenger) in state.passengers.iter_mut().enumerate() {
        // The last fare keeps the tier it was paid at
        if Some(index) != last {
            passenger.refresh(raining, &state.config.trip);
        }
        if Some(index) == in_trip && ejected_walks {
            passenger.body.walk(input);
        }
    }

    if scroll == 0.0 {
        return;
    }
    for (index, passenger) in state.passengers.iter_mut().enumerate() {
        passenger.flag.pos.y += scroll;
        if Some(index) == in_trip && !state.driver.waiting_for_passenger {
            continue;
        }
        passenger.body.pos.y += scroll;
    }
}

fn update_traffic(state: &mut GameState, scroll: f64) {
    state
        .traffic
        .spawn(&mut state.rng, &mut state.next_id, &state.config);
    state.traffic.advance(
        scroll,
        &mut state.fireballs,
        &mut state.rng,
        &mut state.next_id,
        &state.config,
    );
}

/// Leave a wreck behind, throw the occupants out beside it and drop a fresh
/// empty taxi somewhere on the road
fn replace_wrecked_taxi(state: &mut GameState) {
    if !state.taxi.is_wrecked() {
        return;
    }
    let wreck = state.taxi.pos;
    state.wrecks.push(Wreck { pos: wreck });

    if state.taxi.has_driver || state.driver.waiting_for_passenger {
        state.driver.eject(wreck);
        if let Some(index) = state.in_trip() {
            state.passengers[index].eject(wreck);
        }
    }

    let id = state.next_entity_id();
    state.taxi = spawn_replacement(id, &mut state.rng, &state.config);
    log::debug!(
        "Taxi wrecked at ({:.0}, {:.0}); replacement at ({:.0}, {:.0})",
        wreck.x,
        wreck.y,
        state.taxi.pos.x,
        state.taxi.pos.y
    );
}

/// The taxi picks up tokens while driven, the driver while on foot
fn apply_tokens(state: &mut GameState) {
    let collector = if state.taxi.has_driver {
        (state.taxi.pos, state.taxi.radius)
    } else {
        (state.driver.body.pos, state.driver.body.radius)
    };
    for kind in state.tokens.collect(collector.0, collector.1) {
        log::debug!("Picked up {:?}", kind);
        match kind {
            TokenKind::Coin => state.coin_frames = state.config.coin.max_frames,
            TokenKind::Invincibility => {
                state.invincible_frames = state.config.invincible_power.max_frames;
            }
        }
    }

    if state.coin_frames > 0 {
        if let Some(index) = state.in_trip() {
            state.passengers[index].use_coin();
        }
        state.coin_frames -= 1;
    }

    if state.invincible_frames > 0 {
        if state.taxi.has_driver {
            state.taxi.invincible = true;
        }
        state.driver.body.invincible = true;
        state.invincible_frames -= 1;
    } else {
        state.taxi.invincible = false;
        state.driver.body.invincible = false;
    }
}

/// Pair a character with traffic and fireballs when `exposed`. Push-out and
/// timers run every frame either way.
fn collide_on_foot(
    body: &mut Character,
    exposed: bool,
    traffic: &mut Traffic,
    fireballs: &mut Fireballs,
    ctx: &mut CollisionCtx<'_>,
) {
    if exposed {
        traffic.collide_with(body, ctx);
        for id in body.collide_all(&fireballs.contacts(), ctx) {
            fireballs.mark_hit(id);
        }
    }
    body.finish_frame();
}

fn resolve_collisions(state: &mut GameState) {
    let outside = !state.taxi.has_driver;
    let in_trip = state.in_trip();
    let last = state.last_trip_passenger();

    let mut ctx = CollisionCtx {
        effects: &mut state.effects,
        rng: &mut state.rng,
        config: &state.config,
    };

    collide_on_foot(
        &mut state.driver.body,
        outside,
        &mut state.traffic,
        &mut state.fireballs,
        &mut ctx,
    );
    // Every passenger's timers run; only the current and last fare meet traffic
    for (index, passenger) in state.passengers.iter_mut().enumerate() {
        let exposed = outside && (Some(index) == in_trip || Some(index) == last);
        collide_on_foot(
            &mut passenger.body,
            exposed,
            &mut state.traffic,
            &mut state.fireballs,
            &mut ctx,
        );
    }

    let contacts = state.fireballs.contacts();
    for id in state.taxi.collide(&mut state.traffic, &contacts, &mut ctx) {
        state.fireballs.mark_hit(id);
    }

    state.traffic.resolve_collisions(&mut state.fireballs, &mut ctx);
}

fn check_completion(state: &mut GameState) {
    if state.driver.body.is_dead() || state.min_passenger_health() <= 0.0 {
        state.lost_frames = state.lost_frames.saturating_sub(1);
    }

    let height = state.config.window.height;
    let target = state.config.gameplay.target;
    let taxi_y = state.taxi.pos.y;
    let done = state.score >= target
        || state.frames_remaining == 0
        || taxi_y >= height
        || taxi_y <= 0.0
        || state.lost_frames == 0;
    if !done {
        return;
    }

    let outcome = Outcome {
        won: state.score >= target,
        score: state.score,
    };
    log::info!(
        "Session over for {}: {} with {:.2}",
        state.player_name,
        if outcome.won { "won" } else { "lost" },
        outcome.score
    );
    state.outcome = Some(outcome);
}

fn update_trip(state: &mut GameState, input: &InputSnapshot) {
    walk_to_flag(state);
    match state.trip {
        TripPhase::InTrip { passenger } => continue_trip(state, input, passenger),
        TripPhase::Searching | TripPhase::Dispatching { .. } => find_trip(state, input),
    }
}

/// The last fare walks to their flag after being dropped off
fn walk_to_flag(state: &mut GameState) {
    let Some(trip) = state.last_trip.as_mut() else {
        return;
    };
    if !trip.walking {
        return;
    }
    let passenger = &mut state.passengers[trip.passenger];
    let flag = passenger.flag.pos;
    if passenger.body.move_toward(flag) {
        trip.walking = false;
    }
}

/// A stopped, driven taxi calls the nearest waiting passenger over
fn find_trip(state: &mut GameState, input: &InputSnapshot) {
    state.trip = TripPhase::Searching;
    if !state.taxi.has_driver {
        return;
    }
    let exclude = state
        .last_trip_passenger()
        .map(|index| state.passengers[index].id());
    let found = state.taxi.find_near_passenger(
        input,
        &state.passengers,
        exclude,
        state.config.passenger.taxi_detect_radius,
    );
    let Some(index) = found else {
        return;
    };

    let taxi_pos = state.taxi.pos;
    if state.passengers[index].body.move_toward(taxi_pos) {
        state.trip = TripPhase::InTrip { passenger: index };
        log::debug!(
            "Trip started: passenger {} for {:.2}",
            state.passengers[index].id(),
            state.passengers[index].earnings
        );
    } else {
        state.trip = TripPhase::Dispatching { passenger: index };
    }
}

/// Carry the passenger and settle the fare once the taxi stops at the flag
fn continue_trip(state: &mut GameState, input: &InputSnapshot, index: usize) {
    if !state.taxi.has_driver {
        return;
    }
    let speed_x = state.config.taxi.speed_x;
    let passenger = &mut state.passengers[index];
    passenger.body.pos.x += input.steer(speed_x);

    if !input.taxi_stopped() || !passenger.at_drop_off() {
        return;
    }
    let penalty = passenger.penalty(&state.config.trip);
    let paid = (passenger.earnings - penalty).max(0.0);
    state.score += paid;
    state.last_trip = Some(CompletedTrip {
        passenger: index,
        earnings: passenger.earnings,
        priority: passenger.priority,
        penalty,
        walking: true,
    });
    state.trip = TripPhase::Searching;
    log::debug!(
        "Trip complete: passenger {} paid {:.2} (penalty {:.2})",
        passenger.id(),
        paid,
        penalty
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;
    use crate::config::tests::fixture;
    use crate::consts::{HEALTH_SCALE, TOTAL_TIMEOUT_FRAMES};
    use crate::layout::Weather;
    use crate::platform::Key;
    use crate::sim::state::tests::{layout, schedule, session};
    use crate::sim::effects::EffectKind;
    use crate::sim::fireballs::Fireball;
    use crate::sim::traffic::{Car, CarKind};

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    /// Session with no random traffic so scenarios stay exact
    fn quiet_session() -> GameState {
        let mut config = fixture();
        config.other_car.spawn_factor = u32::MAX;
        config.enemy_car.spawn_factor = u32::MAX;
        config.fireball.spawn_factor = u32::MAX;
        GameState::new(config, &layout(), schedule(), "tester", 7)
    }

    fn park_passenger_beside_taxi(state: &mut GameState, index: usize) {
        state.passengers[index].body.pos = state.taxi.pos + Location::new(-3.0, 0.0);
    }

    fn board(state: &mut GameState, index: usize) {
        park_passenger_beside_taxi(state, index);
        for _ in 0..10 {
            tick(state, &idle());
            if state.in_trip() == Some(index) {
                return;
            }
        }
        panic!("passenger never boarded");
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut state = quiet_session();
        let before = state.frames_remaining;
        tick(&mut state, &idle());
        assert_eq!(state.frames_remaining, before - 1);
        assert!(!state.is_over());
    }

    #[test]
    fn test_up_scrolls_world_but_not_driven_taxi() {
        let mut state = quiet_session();
        let taxi = state.taxi.pos;
        let token = state.tokens.items[0].pos;
        let flag = state.passengers[1].flag.pos;
        tick(&mut state, &InputSnapshot::holding([Key::Up]));
        assert_eq!(state.taxi.pos, taxi);
        assert_eq!(state.tokens.items[0].pos.y, token.y + 5.0);
        assert_eq!(state.passengers[1].flag.pos.y, flag.y + 5.0);
    }

    #[test]
    fn test_pickup_needs_a_stopped_taxi() {
        let mut state = quiet_session();
        park_passenger_beside_taxi(&mut state, 1);
        tick(&mut state, &InputSnapshot::holding([Key::Right]));
        assert_eq!(state.trip, TripPhase::Searching);

        board(&mut state, 1);
        assert_eq!(state.passengers[1].body.pos, state.taxi.pos);
    }

    #[test]
    fn test_dropoff_pays_earnings_without_penalty_inside_flag() {
        let mut state = quiet_session();
        board(&mut state, 0);
        let earnings = state.passengers[0].earnings;
        let flag = state.passengers[0].flag.pos;
        state.passengers[0].body.pos = flag + Location::new(10.0, 10.0);

        tick(&mut state, &idle());
        assert_eq!(state.in_trip(), None);
        assert!((state.score - earnings).abs() < 1e-9);
        let last = state.last_trip.unwrap_or_else(|| panic!("no trip recorded"));
        assert_eq!(last.passenger, 0);
        assert_eq!(last.penalty, 0.0);
        assert!(last.walking);
    }

    #[test]
    fn test_overshoot_is_penalised() {
        let mut state = quiet_session();
        board(&mut state, 0);
        let flag = state.passengers[0].flag.pos;
        state.passengers[0].body.pos = Location::new(flag.x, flag.y - 500.0);
        let earnings = state.passengers[0].earnings;

        tick(&mut state, &idle());
        let expected = (earnings - state.config.trip.penalty_per_y * 500.0).max(0.0);
        assert!((state.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_no_dropoff_while_moving() {
        let mut state = quiet_session();
        board(&mut state, 0);
        let flag = state.passengers[0].flag.pos;
        state.passengers[0].body.pos = flag;
        tick(&mut state, &InputSnapshot::holding([Key::Left]));
        assert_eq!(state.in_trip(), Some(0));
    }

    #[test]
    fn test_last_fare_not_picked_up_again() {
        let mut state = quiet_session();
        board(&mut state, 0);
        state.passengers[0].body.pos = state.passengers[0].flag.pos;
        tick(&mut state, &idle());
        assert_eq!(state.last_trip_passenger(), Some(0));

        park_passenger_beside_taxi(&mut state, 0);
        tick(&mut state, &idle());
        assert_eq!(state.trip, TripPhase::Searching);
    }

    #[test]
    fn test_rain_demotes_waiting_passengers() {
        let mut state = quiet_session();
        state.frames_remaining = state.config.gameplay.max_frames - 1500;
        tick(&mut state, &idle());
        assert_eq!(state.weather, Weather::Raining);
        // Passenger 2 has priority 3 and no umbrella; passenger 1 carries one
        assert_eq!(state.passengers[2].priority, 1);
        assert_eq!(state.passengers[1].priority, 2);
    }

    #[test]
    fn test_wrecked_taxi_ejects_occupants() {
        let mut state = quiet_session();
        board(&mut state, 0);
        let wreck = state.taxi.pos;
        state.taxi.health = 0.0;

        tick(&mut state, &idle());
        assert_eq!(state.wrecks, vec![Wreck { pos: wreck }]);
        assert_eq!(state.driver.body.pos, Location::new(wreck.x - 50.0, wreck.y));
        assert_eq!(state.passengers[0].body.pos, Location::new(wreck.x - 100.0, wreck.y));
        assert!(state.config.road.lane_centers.contains(&state.taxi.pos.x));
        assert!(!state.taxi.has_driver);
        assert_eq!(state.taxi.health, state.config.taxi.health * HEALTH_SCALE);
    }

    #[test]
    fn test_driver_walks_back_and_waits_for_passenger() {
        let mut state = quiet_session();
        board(&mut state, 0);
        state.taxi.health = 0.0;
        tick(&mut state, &idle());

        // Put the driver next to the new taxi; the passenger is further out
        let taxi = state.taxi.pos;
        state.driver.body.pos = taxi + Location::new(-5.0, 0.0);
        state.passengers[0].body.pos = taxi + Location::new(-6.0, 0.0);
        tick(&mut state, &idle());
        assert!(state.driver.waiting_for_passenger);
        assert!(!state.taxi.has_driver);

        for _ in 0..10 {
            tick(&mut state, &idle());
        }
        assert!(state.taxi.has_driver);
        assert!(!state.driver.waiting_for_passenger);
        assert_eq!(state.in_trip(), Some(0));
    }

    #[test]
    fn test_coin_demotes_in_trip_passenger_once() {
        let mut state = quiet_session();
        board(&mut state, 2);
        let base = state.passengers[2].base_priority;
        state.tokens.items[0].pos = state.taxi.pos;
        tick(&mut state, &idle());
        assert_eq!(state.coin_frames, state.config.coin.max_frames - 1);
        assert_eq!(state.passengers[2].base_priority, base - 1);
        tick(&mut state, &idle());
        assert_eq!(state.passengers[2].base_priority, base - 1);
    }

    #[test]
    fn test_invincibility_covers_driven_taxi() {
        let mut state = quiet_session();
        let token = state
            .tokens
            .items
            .iter()
            .position(|t| t.kind == TokenKind::Invincibility)
            .unwrap_or_else(|| panic!("no invincibility token"));
        state.tokens.items[token].pos = state.taxi.pos;
        tick(&mut state, &idle());
        assert!(state.taxi.invincible);
        assert!(state.driver.body.invincible);

        state.invincible_frames = 0;
        tick(&mut state, &idle());
        assert!(!state.taxi.invincible);
        assert!(!state.driver.body.invincible);
    }

    #[test]
    fn test_enemy_car_hits_taxi_once() {
        let mut state = quiet_session();
        state.taxi.health = 1500.0;
        let id = state.next_entity_id();
        let mut enemy = Car::new(
            id,
            CarKind::Enemy,
            state.taxi.pos + Location::new(0.0, 30.0),
            0.0,
            &state.config.enemy_car,
        );
        enemy.damage = 50.0;
        state.traffic.cars.push(enemy);

        for _ in 0..30 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.taxi.health, 1450.0);
        assert_eq!(state.taxi.collision.timeout_frames, TOTAL_TIMEOUT_FRAMES - 30);
    }

    #[test]
    fn test_target_reached_wins() {
        let mut state = quiet_session();
        state.score = state.config.gameplay.target;
        tick(&mut state, &idle());
        let outcome = state.outcome.unwrap_or_else(|| panic!("session should end"));
        assert!(outcome.won);

        let frames = state.frames_remaining;
        tick(&mut state, &idle());
        assert_eq!(state.frames_remaining, frames, "finished sessions stay frozen");
    }

    #[test]
    fn test_frame_budget_exhaustion_loses() {
        let mut state = quiet_session();
        state.frames_remaining = 1;
        tick(&mut state, &idle());
        assert!(state.outcome.is_none());
        tick(&mut state, &idle());
        assert_eq!(state.outcome.map(|o| o.won), Some(false));
    }

    #[test]
    fn test_taxi_off_screen_loses() {
        let mut state = quiet_session();
        state.taxi.pos.y = state.config.window.height + 1.0;
        tick(&mut state, &idle());
        assert_eq!(state.outcome.map(|o| o.won), Some(false));
    }

    #[test]
    fn test_death_countdown() {
        let mut state = quiet_session();
        state.driver.body.health = 0.0;
        let countdown = state.lost_frames;
        for _ in 0..countdown - 1 {
            tick(&mut state, &idle());
        }
        assert!(state.outcome.is_none());
        tick(&mut state, &idle());
        assert!(state.outcome.is_some());
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            InputSnapshot::holding([Key::Up]),
            InputSnapshot::holding([Key::Up, Key::Left]),
            InputSnapshot::default(),
            InputSnapshot::holding([Key::Right]),
        ];
        let mut a = session(99);
        let mut b = session(99);
        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut a, input);
            tick(&mut b, input);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.taxi, b.taxi);
        assert_eq!(a.traffic.cars, b.traffic.cars);
        assert_eq!(a.fireballs.items, b.fireballs.items);
        assert_eq!(a.effects.items, b.effects.items);
    }

    /// Ordinary car parked on `at` and a fireball that rises onto `target`
    /// during the next advance
    fn ambush(state: &mut GameState, at: Location, target: Location) {
        let id = state.next_entity_id();
        let car = Car::new(
            id,
            CarKind::Ordinary { variant: 0 },
            at + Location::new(0.0, 30.0),
            0.0,
            &state.config.other_car,
        );
        state.traffic.cars.push(car);
        let id = state.next_entity_id();
        let speed_y = state.config.fireball.shoot_speed_y;
        state.fireballs.items.push(Fireball {
            id,
            pos: target + Location::new(0.0, speed_y),
            radius: state.config.fireball.radius,
            damage: state.config.fireball.damage * HEALTH_SCALE,
            speed_y,
            has_hit_target: false,
        });
    }

    /// Driver out on the road with passenger 0 mid-trip beside them
    fn stranded_session() -> GameState {
        let mut state = quiet_session();
        state.trip = TripPhase::InTrip { passenger: 0 };
        state.taxi.has_driver = false;
        state.driver.body.pos = Location::new(200.0, 300.0);
        state.passengers[0].body.pos = Location::new(300.0, 300.0);
        state
    }

    #[test]
    fn test_pedestrians_meet_traffic_while_taxi_empty() {
        let mut state = stranded_session();
        let driver_pos = state.driver.body.pos;
        let passenger_pos = state.passengers[0].body.pos;
        ambush(&mut state, driver_pos, passenger_pos);
        let driver_full = state.driver.body.health;
        let passenger_full = state.passengers[0].body.health;
        let car_full = state.traffic.cars[0].health;

        for _ in 0..20 {
            tick(&mut state, &idle());
        }

        let car = &state.traffic.cars[0];
        assert_eq!(state.driver.body.health, driver_full - car.damage);
        let fireball_damage = state.config.fireball.damage * HEALTH_SCALE;
        assert_eq!(state.passengers[0].body.health, passenger_full - fireball_damage);
        assert!(state.fireballs.items.is_empty(), "fireball consumed");
        // The car still starts its timeout but walking into people costs nothing
        assert_eq!(car.health, car_full);
        assert!(car.collision.timeout_frames > 0);
        assert_eq!(state.effects.count(EffectKind::Smoke), 0);
    }

    #[test]
    fn test_riders_untouched_while_taxi_driven() {
        let mut state = stranded_session();
        state.taxi.has_driver = true;
        let passenger_pos = state.passengers[0].body.pos;
        // Car and fireball both touch the passenger but not each other
        let offset = Location::new(0.0, 15.0);
        ambush(&mut state, passenger_pos + offset, passenger_pos - offset);
        let driver_full = state.driver.body.health;
        let passenger_full = state.passengers[0].body.health;

        tick(&mut state, &idle());

        assert_eq!(state.driver.body.health, driver_full);
        assert_eq!(state.passengers[0].body.health, passenger_full);
        assert_eq!(state.passengers[0].body.collision.timeout_frames, 0);
        assert!(!state.fireballs.items[0].has_hit_target);
        assert_eq!(state.traffic.cars[0].collision.timeout_frames, 0);
    }

    #[test]
    fn test_waiting_passenger_timers_keep_running() {
        let mut state = quiet_session();
        board(&mut state, 0);
        state.passengers[0].body.pos = state.passengers[0].flag.pos;
        tick(&mut state, &idle());
        assert_eq!(state.last_trip_passenger(), Some(0));

        // Passenger 2 is neither riding nor the last fare
        state.passengers[2].body.collision.timeout_frames = 150;
        state.passengers[2].body.collision.collision_frames = 5;
        for _ in 0..50 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.passengers[2].body.collision.timeout_frames, 100);
        assert!(!state.passengers[2].body.collision.is_pushing());
    }
}
