//! Demo driver
//!
//! Produces the input a simple player would give: drive toward the nearest
//! waiting passenger, stop to let them board, cruise until the flag lines up
//! and stop again to drop them off. On foot it walks the driver back to the
//! taxi.

use super::state::{GameState, TripPhase};
use crate::Location;
use crate::platform::{InputSnapshot, Key};

/// Input for the next frame of `state`
pub fn autopilot(state: &GameState) -> InputSnapshot {
    if state.is_over() {
        return InputSnapshot::default();
    }
    let mut keys = Vec::new();

    if !state.taxi.has_driver {
        if !state.driver.waiting_for_passenger {
            walk_toward(state.driver.body.pos, state.taxi.pos, &mut keys);
        }
        return InputSnapshot::holding(keys);
    }

    let taxi = state.taxi.pos;
    match state.trip {
        TripPhase::Dispatching { .. } => {}
        TripPhase::InTrip { passenger } => {
            let passenger = &state.passengers[passenger];
            if !passenger.at_drop_off() {
                steer_toward(taxi.x, passenger.flag.pos.x, &mut keys);
                keys.push(Key::Up);
            }
        }
        TripPhase::Searching => match nearest_fare(state) {
            Some(target) if target.distance(taxi) <= state.config.passenger.taxi_detect_radius => {}
            Some(target) => {
                steer_toward(taxi.x, target.x, &mut keys);
                if target.y < taxi.y {
                    keys.push(Key::Up);
                }
            }
            None => keys.push(Key::Up),
        },
    }
    InputSnapshot::holding(keys)
}

/// Closest passenger that is ahead of (or level with) the taxi, skipping the
/// fare that was just dropped off
fn nearest_fare(state: &GameState) -> Option<Location> {
    let taxi = state.taxi.pos;
    let reach = state.config.passenger.taxi_detect_radius;
    let last = state.last_trip_passenger();
    state
        .passengers
        .iter()
        .enumerate()
        .filter(|(index, p)| Some(*index) != last && p.body.pos.y <= taxi.y + reach)
        .map(|(_, p)| p.body.pos)
        .min_by(|a, b| a.distance(taxi).total_cmp(&b.distance(taxi)))
}

fn steer_toward(from: f64, to: f64, keys: &mut Vec<Key>) {
    if to < from - 1.0 {
        keys.push(Key::Left);
    } else if to > from + 1.0 {
        keys.push(Key::Right);
    }
}

fn walk_toward(from: Location, to: Location, keys: &mut Vec<Key>) {
    steer_toward(from.x, to.x, keys);
    if to.y < from.y - 1.0 {
        keys.push(Key::Up);
    } else if to.y > from.y + 1.0 {
        keys.push(Key::Down);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::fixture;
    use crate::sim::state::tests::{layout, schedule};
    use crate::sim::tick::tick;

    fn quiet_session() -> GameState {
        let mut config = fixture();
        config.other_car.spawn_factor = u32::MAX;
        config.enemy_car.spawn_factor = u32::MAX;
        config.fireball.spawn_factor = u32::MAX;
        GameState::new(config, &layout(), schedule(), "demo", 3)
    }

    #[test]
    fn test_heads_for_first_passenger() {
        let state = quiet_session();
        let input = autopilot(&state);
        // First passenger sits up and to the left of the taxi
        assert!(input.is_down(Key::Left));
        assert!(input.is_down(Key::Up));
    }

    #[test]
    fn test_stops_when_passenger_in_range() {
        let mut state = quiet_session();
        state.passengers[0].body.pos = state.taxi.pos + Location::new(-30.0, -30.0);
        assert!(autopilot(&state).taxi_stopped());
    }

    #[test]
    fn test_walks_driver_back_to_taxi() {
        let mut state = quiet_session();
        state.taxi.has_driver = false;
        state.driver.body.pos = state.taxi.pos + Location::new(-50.0, 100.0);
        let input = autopilot(&state);
        assert!(input.is_down(Key::Right));
        assert!(input.is_down(Key::Up));
    }

    #[test]
    fn test_demo_completes_a_trip() {
        let mut state = quiet_session();
        for _ in 0..2000 {
            let input = autopilot(&state);
            tick(&mut state, &input);
            if state.last_trip.is_some() {
                break;
            }
        }
        assert!(state.score > 0.0);
        assert_eq!(state.last_trip_passenger(), Some(0));
    }
}
