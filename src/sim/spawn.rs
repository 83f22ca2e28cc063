//! Traffic and pickup spawning.
//!
//! All randomness enters the simulation through this seam: the spawner
//! owns a seeded PCG stream, so replaying a seed replays the traffic.

use glam::Vec2;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::field::PlayingField;
use super::state::{OBSTACLE_COLORS, Obstacle, Pickup};
use crate::consts::*;

/// Effective spawn interval in frames. Shrinks as the multiplier grows,
/// never below `MIN_SPAWN_CADENCE`.
#[inline]
pub fn effective_cadence(base: f32, speed_multiplier: f32) -> u64 {
    (base - speed_multiplier * CADENCE_SHRINK)
        .floor()
        .max(MIN_SPAWN_CADENCE as f32) as u64
}

/// Downward speed for an obstacle given its per-instance jitter roll
#[inline]
pub fn obstacle_speed(jitter: f32, speed_multiplier: f32) -> f32 {
    BASE_ENTITY_SPEED + jitter + speed_multiplier * SPEED_PER_MULTIPLIER
}

/// Downward speed for a pickup
#[inline]
pub fn pickup_speed(speed_multiplier: f32) -> f32 {
    BASE_ENTITY_SPEED + speed_multiplier * SPEED_PER_MULTIPLIER
}

/// Decides what enters the road. The step function consumes this through
/// a narrow contract so tests can swap in silent stubs.
pub trait Spawner {
    /// An obstacle when `frame` lands on the cadence boundary, else None
    fn maybe_spawn_obstacle(
        &mut self,
        frame: u64,
        cadence: u64,
        speed_multiplier: f32,
    ) -> Option<Obstacle>;

    /// Rolls the rider probability; only called on a tick whose obstacle
    /// roll fired
    fn maybe_spawn_pickup(&mut self, probability: f32, speed_multiplier: f32) -> Option<Pickup>;
}

/// Production spawner: seeded PCG rolls over the road's lanes
pub struct RoadSpawner {
    field: PlayingField,
    rng: Pcg32,
}

impl RoadSpawner {
    pub fn new(field: PlayingField, seed: u64) -> Self {
        Self {
            field,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Spawner for RoadSpawner {
    fn maybe_spawn_obstacle(
        &mut self,
        frame: u64,
        cadence: u64,
        speed_multiplier: f32,
    ) -> Option<Obstacle> {
        if frame % cadence != 0 {
            return None;
        }
        let lane = self.rng.random_range(0..self.field.lane_count);
        let depth = self.rng.random_range(0..OBSTACLE_SPAWN_DEPTH) as f32;
        let jitter = self.rng.random::<f32>() * SPEED_JITTER;
        let color = OBSTACLE_COLORS[self.rng.random_range(0..OBSTACLE_COLORS.len())];
        debug!("traffic spawn: lane {lane} at frame {frame}");
        Some(Obstacle {
            pos: Vec2::new(
                self.field.lane_x(lane, OBSTACLE_WIDTH),
                -OBSTACLE_HEIGHT - depth,
            ),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed: obstacle_speed(jitter, speed_multiplier),
            color,
        })
    }

    fn maybe_spawn_pickup(&mut self, probability: f32, speed_multiplier: f32) -> Option<Pickup> {
        if self.rng.random::<f32>() >= probability {
            return None;
        }
        let lane = self.rng.random_range(0..self.field.lane_count);
        let depth = self.rng.random_range(0..PICKUP_SPAWN_DEPTH) as f32;
        Some(Pickup {
            pos: Vec2::new(self.field.lane_x(lane, PICKUP_SIZE), -PICKUP_SIZE - depth),
            size: PICKUP_SIZE,
            speed: pickup_speed(speed_multiplier),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_effective_cadence_shrinks_with_difficulty() {
        assert_eq!(effective_cadence(100.0, 1.0), 94);
        assert_eq!(effective_cadence(100.0, 2.0), 88);
        assert!(effective_cadence(100.0, 1.5) > effective_cadence(100.0, 3.0));
    }

    #[test]
    fn test_effective_cadence_floors_at_minimum() {
        // 100 - 12 * 6 = 28, below the floor
        assert_eq!(effective_cadence(100.0, 12.0), 30);
        assert_eq!(effective_cadence(100.0, 1000.0), 30);
    }

    #[test]
    fn test_obstacle_only_on_cadence_boundary() {
        let mut spawner = RoadSpawner::new(PlayingField::default(), 7);
        assert!(spawner.maybe_spawn_obstacle(93, 94, 1.0).is_none());
        assert!(spawner.maybe_spawn_obstacle(94, 94, 1.0).is_some());
        assert!(spawner.maybe_spawn_obstacle(95, 94, 1.0).is_none());
    }

    #[test]
    fn test_spawned_obstacle_starts_above_field_in_a_lane() {
        let field = PlayingField::default();
        let mut spawner = RoadSpawner::new(field, 42);
        for boundary in 1..=50u64 {
            let o = spawner
                .maybe_spawn_obstacle(boundary * 94, 94, 1.0)
                .expect("boundary frame must spawn");
            assert!(o.pos.y <= -OBSTACLE_HEIGHT);
            assert!(o.pos.y >= -OBSTACLE_HEIGHT - OBSTACLE_SPAWN_DEPTH as f32);
            assert!(o.pos.x >= field.left_edge);
            assert!(o.pos.x + o.size.x <= field.right_edge);
            assert!(o.speed >= obstacle_speed(0.0, 1.0));
            assert!(o.speed < obstacle_speed(SPEED_JITTER, 1.0));
            assert!(OBSTACLE_COLORS.contains(&o.color));
        }
    }

    #[test]
    fn test_spawned_pickup_starts_above_field_in_a_lane() {
        let field = PlayingField::default();
        let mut spawner = RoadSpawner::new(field, 42);
        for _ in 0..50 {
            let p = spawner
                .maybe_spawn_pickup(1.0, 1.0)
                .expect("probability 1 must spawn");
            assert!(p.pos.y <= -PICKUP_SIZE);
            assert!(p.pos.y >= -PICKUP_SIZE - PICKUP_SPAWN_DEPTH as f32);
            assert!(p.pos.x >= field.left_edge);
            assert!(p.pos.x + p.size <= field.right_edge);
        }
    }

    #[test]
    fn test_pickup_probability_extremes() {
        let mut spawner = RoadSpawner::new(PlayingField::default(), 3);
        for _ in 0..100 {
            assert!(spawner.maybe_spawn_pickup(1.0, 1.0).is_some());
            assert!(spawner.maybe_spawn_pickup(0.0, 1.0).is_none());
        }
    }

    #[test]
    fn test_same_seed_same_traffic() {
        let field = PlayingField::default();
        let mut a = RoadSpawner::new(field, 99);
        let mut b = RoadSpawner::new(field, 99);
        for boundary in 1..=20u64 {
            let frame = boundary * 30;
            assert_eq!(
                a.maybe_spawn_obstacle(frame, 30, 2.0),
                b.maybe_spawn_obstacle(frame, 30, 2.0)
            );
            assert_eq!(a.maybe_spawn_pickup(0.25, 2.0), b.maybe_spawn_pickup(0.25, 2.0));
        }
    }

    proptest! {
        #[test]
        fn cadence_never_below_floor(base in 0f32..1000.0, sm in 0f32..500.0) {
            prop_assert!(effective_cadence(base, sm) >= MIN_SPAWN_CADENCE);
        }

        #[test]
        fn speeds_never_drop_as_difficulty_rises(
            jitter in 0f32..2.0,
            sm in 0.9f32..50.0,
            bump in 0f32..10.0,
        ) {
            prop_assert!(obstacle_speed(jitter, sm + bump) >= obstacle_speed(jitter, sm));
            prop_assert!(pickup_speed(sm + bump) >= pickup_speed(sm));
        }
    }
}
