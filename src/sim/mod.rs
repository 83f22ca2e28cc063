//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per scheduler tick, no delta-time accumulation
//! - Seeded RNG only, owned by the spawner
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, rects_overlap};
pub use field::PlayingField;
pub use spawn::{RoadSpawner, Spawner, effective_cadence, obstacle_speed, pickup_speed};
pub use state::{GamePhase, GameState, Obstacle, Pickup, Player, OBSTACLE_COLORS};
pub use tick::{SteerInput, step};
