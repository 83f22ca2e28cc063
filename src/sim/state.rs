//! Game state and core simulation types

use glam::Vec2;

use super::collision::Rect;
use super::field::PlayingField;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No session yet (fresh page or after reset)
    Idle,
    /// Active gameplay, ticks flowing
    Running,
    /// Session suspended; state frozen until resume
    Paused,
    /// Run ended on a collision
    GameOver,
}

/// Body colors the spawner deals out to traffic cars (cosmetic only)
pub const OBSTACLE_COLORS: [&str; 5] = ["#ef4444", "#f43f5e", "#f97316", "#7c3aed", "#ef7bff"];

/// The player's car. Vertical position is fixed; only x changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Player {
    /// A player car centered at the bottom of the field
    pub fn spawn(field: &PlayingField) -> Self {
        Self {
            pos: Vec2::new(
                field.center_x() - PLAYER_WIDTH / 2.0,
                field.height - PLAYER_BOTTOM_OFFSET,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// An oncoming traffic car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Per-instance downward speed before the advance scale
    pub speed: f32,
    /// Body color, fixed at spawn
    pub color: &'static str,
}

impl Obstacle {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A fuel can the player can grab for points and relief
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub pos: Vec2,
    /// Side length of the square hitbox
    pub size: f32,
    pub speed: f32,
}

impl Pickup {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(self.size))
    }
}

/// Complete session state (deterministic, platform-free)
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Tick counter; increments once per simulation step
    pub frame: u64,
    /// Real-valued score accumulator; displayed and persisted floored
    pub score: f32,
    /// Difficulty knob; rises with survival, relieved by pickups
    pub speed_multiplier: f32,
    /// Spawn cadence base in frames; constant for the session
    pub spawn_cadence: f32,
    /// Player car
    pub player: Player,
    /// Oncoming traffic, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Live pickups, oldest first
    pub pickups: Vec<Pickup>,
}

impl GameState {
    /// A zeroed session on the given road, waiting in `Idle`
    pub fn new(field: &PlayingField) -> Self {
        Self {
            phase: GamePhase::Idle,
            frame: 0,
            score: 0.0,
            speed_multiplier: START_MULTIPLIER,
            spawn_cadence: BASE_SPAWN_CADENCE,
            player: Player::spawn(field),
            obstacles: Vec::new(),
            pickups: Vec::new(),
        }
    }

    /// Score as shown to the player and compared against the high score
    #[inline]
    pub fn display_score(&self) -> u32 {
        self.score.max(0.0).floor() as u32
    }
}
