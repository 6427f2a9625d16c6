//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One input snapshot per frame, fixed per-frame displacements
//! - Seeded RNG only
//! - Stable iteration order (layout order, then spawn order)
//! - No rendering or file access

pub mod autopilot;
pub mod characters;
pub mod collision;
pub mod effects;
pub mod fireballs;
pub mod state;
pub mod taxi;
pub mod tick;
pub mod tokens;
pub mod traffic;

pub use autopilot::autopilot;
pub use characters::{Character, Driver, EndFlag, Passenger, earnings_for};
pub use collision::{Collidable, ColliderKind, CollisionState, Contact, EntityId};
pub use effects::{Effect, EffectKind, Effects};
pub use fireballs::{Fireball, Fireballs};
pub use state::{CompletedTrip, GameState, Outcome, TripPhase};
pub use taxi::{Taxi, Wreck};
pub use tick::tick;
pub use tokens::{Token, TokenKind, Tokens};
pub use traffic::{Car, CarKind, Traffic};
