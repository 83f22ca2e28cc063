//! Drive Mad - a lane-dodging arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (road geometry, spawning, collisions, game state)
//! - `controller`: Session state machine and frame scheduling
//! - `renderer`: Canvas scene drawing
//! - `highscores`: Persistent best-score storage

pub mod controller;
pub mod highscores;
pub mod renderer;
pub mod sim;

pub use controller::{Controller, SessionEvent};
pub use sim::{GameState, SteerInput};

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions; the canvas renders at this fixed resolution
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Road geometry: asphalt spans 13%..87% of the field width, split into lanes
    pub const ROAD_LEFT_FRACTION: f32 = 0.13;
    pub const ROAD_RIGHT_FRACTION: f32 = 0.87;
    pub const LANE_COUNT: u32 = 3;

    /// Player car
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 88.0;
    /// Distance from the bottom of the field to the player's roof
    pub const PLAYER_BOTTOM_OFFSET: f32 = 140.0;
    /// Horizontal pixels moved per tick while a steer input is held
    pub const STEER_SPEED: f32 = 6.0;
    /// Gap kept between the player and the road borders when clamping
    pub const EDGE_MARGIN: f32 = 6.0;

    /// Traffic cars
    pub const OBSTACLE_WIDTH: f32 = 44.0;
    pub const OBSTACLE_HEIGHT: f32 = 88.0;
    /// Extra spawn height above the field, up to this many pixels
    pub const OBSTACLE_SPAWN_DEPTH: u32 = 80;

    /// Fuel pickups (squares)
    pub const PICKUP_SIZE: f32 = 28.0;
    pub const PICKUP_SPAWN_DEPTH: u32 = 60;

    /// Spawn cadence in frames at the start of a session
    pub const BASE_SPAWN_CADENCE: f32 = 100.0;
    /// The effective cadence never drops below this many frames
    pub const MIN_SPAWN_CADENCE: u64 = 30;
    /// Frames shaved off the cadence per point of speed multiplier
    pub const CADENCE_SHRINK: f32 = 6.0;
    /// Chance of a pickup riding along with a spawned obstacle
    pub const PICKUP_CHANCE: f32 = 0.25;

    /// Downward speed terms, pixels per tick
    pub const BASE_ENTITY_SPEED: f32 = 2.0;
    /// Obstacles get a uniform [0, SPEED_JITTER) per-instance roll
    pub const SPEED_JITTER: f32 = 2.0;
    pub const SPEED_PER_MULTIPLIER: f32 = 0.6;
    /// Whole-field advance scale: speed * (1 + multiplier * this)
    pub const ADVANCE_PER_MULTIPLIER: f32 = 0.25;

    /// Difficulty stepping
    pub const START_MULTIPLIER: f32 = 1.0;
    pub const DIFFICULTY_INTERVAL: u64 = 600;
    pub const DIFFICULTY_STEP: f32 = 0.15;
    /// Pickup relief can never pull the multiplier below this
    pub const MULTIPLIER_FLOOR: f32 = 0.9;
    pub const PICKUP_RELIEF: f32 = 0.08;

    /// Scoring
    pub const BASE_SCORE_RATE: f32 = 0.1;
    pub const SCORE_RATE_PER_MULTIPLIER: f32 = 0.05;
    pub const PICKUP_SCORE: f32 = 15.0;
    /// Awarded when an obstacle scrolls past the field bottom plus PASS_MARGIN
    pub const PASS_BONUS: f32 = 2.0;
    pub const PASS_MARGIN: f32 = 100.0;
    /// Anything this far past the field bottom is silently dropped
    pub const DESPAWN_MARGIN: f32 = 200.0;
}
