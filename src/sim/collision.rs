//! Collision detection and response
//!
//! Every entity that can be hit carries a `CollisionState` with two
//! independent timers: a short push-out window that visually separates the
//! two bodies, and a long timeout window during which the entity takes no
//! further damage. Each side of a pair resolves the contact from its own
//! perspective against a `Contact` snapshot of the other side.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Effects;
use crate::Location;
use crate::config::GameConfig;
use crate::consts::{TOTAL_COLLISION_FRAMES, TOTAL_TIMEOUT_FRAMES};

/// Stable identity of a simulated entity
pub type EntityId = u32;

/// What sort of body a contact came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColliderKind {
    Taxi,
    Car,
    Character,
    Fireball,
}

/// Snapshot of one side of a collision, taken just before the other side
/// resolves against it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: EntityId,
    pub kind: ColliderKind,
    pub position: Location,
    pub radius: f64,
    pub damage: f64,
    pub timeout_frames: u32,
}

impl Contact {
    /// Circles touch or overlap
    #[inline]
    pub fn overlaps(&self, other: &Contact) -> bool {
        circles_overlap(self.position, self.radius, other.position, other.radius)
    }
}

#[inline]
pub fn circles_overlap(a: Location, ra: f64, b: Location, rb: f64) -> bool {
    a.distance(b) <= ra + rb
}

/// Shared mutable context a collision may touch
pub struct CollisionCtx<'a> {
    pub effects: &'a mut Effects,
    pub rng: &'a mut Pcg32,
    pub config: &'a GameConfig,
}

/// An entity that participates in the collision pass
pub trait Collidable {
    fn id(&self) -> EntityId;
    fn kind(&self) -> ColliderKind;
    fn position(&self) -> Location;
    fn radius(&self) -> f64;
    /// Damage dealt to whatever this hits
    fn damage(&self) -> f64;
    fn timeout_frames(&self) -> u32;

    /// Resolve a contact with `other` from this side. Returns true if the two
    /// bodies overlapped this frame.
    fn resolve_collision(&mut self, other: &Contact, ctx: &mut CollisionCtx<'_>) -> bool;

    fn contact(&self) -> Contact {
        Contact {
            id: self.id(),
            kind: self.kind(),
            position: self.position(),
            radius: self.radius(),
            damage: self.damage(),
            timeout_frames: self.timeout_frames(),
        }
    }

    fn touches(&self, other: &Contact) -> bool {
        circles_overlap(self.position(), self.radius(), other.position, other.radius)
    }
}

/// How a contact lands on a body that is not in timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    /// This side is mid-timeout; nothing happens
    Ignored,
    /// Damage applies and a timeout starts
    Hit,
    /// The other side is mid-timeout from an older hit
    Glancing,
}

/// Push-out and timeout bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionState {
    /// Frames of push-out animation left
    pub collision_frames: u32,
    /// Frames of damage immunity left
    pub timeout_frames: u32,
    /// Whatever started the current push-out
    pub partner: Option<EntityId>,
    /// Per-axis push direction, fixed when the push-out starts
    push_dir: Location,
}

impl CollisionState {
    /// Start a push-out away from `other` unless one is already running
    pub fn begin_push_out(&mut self, own: Location, other: &Contact) {
        if self.collision_frames > 0 {
            return;
        }
        self.collision_frames = TOTAL_COLLISION_FRAMES;
        self.partner = Some(other.id);
        self.push_dir = Location::new(
            away(own.x, other.position.x),
            away(own.y, other.position.y),
        );
    }

    /// Decide whether `other` damages this side right now. `mutual` lets a
    /// hit land when the other side started its own timeout this frame.
    pub fn exchange(&self, other: &Contact, mutual: bool) -> Exchange {
        if self.timeout_frames > 0 {
            return Exchange::Ignored;
        }
        let other_fresh = mutual && other.timeout_frames == TOTAL_TIMEOUT_FRAMES;
        if other.timeout_frames == 0 || other_fresh {
            Exchange::Hit
        } else {
            Exchange::Glancing
        }
    }

    pub fn start_timeout(&mut self) {
        self.timeout_frames = TOTAL_TIMEOUT_FRAMES;
    }

    pub fn is_pushing(&self) -> bool {
        self.collision_frames > 0
    }

    /// End-of-frame step: displace by `step` along the push direction while
    /// a push-out runs, then count both timers down by one.
    pub fn advance(&mut self, position: &mut Location, step: Location) {
        if self.collision_frames > 0 {
            *position += self.push_dir * step;
            self.collision_frames -= 1;
        }
        self.timeout_frames = self.timeout_frames.saturating_sub(1);
    }
}

#[inline]
fn away(own: f64, partner: f64) -> f64 {
    if own < partner { -1.0 } else { 1.0 }
}
