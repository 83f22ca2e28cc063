//! Frame-stepped simulation
//!
//! One call advances the session by exactly one frame. There is no
//! delta-time accumulation; the scheduler's cadence is the clock.

use super::collision::rects_overlap;
use super::field::PlayingField;
use super::spawn::{Spawner, effective_cadence};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Steering signals sampled once per tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteerInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the session by one frame.
///
/// Sub-steps run in a fixed order:
/// 1. frame counter
/// 2. spawning (cadence boundary, plus a rider pickup roll)
/// 3. difficulty step every 600th frame
/// 4. entity advance
/// 5. despawn past the far line, no score
/// 6. steering
/// 7. clamp to the road
/// 8. obstacle collision; a hit ends the run and skips the rest
/// 9. pickup collection
/// 10. passive score accrual
/// 11. pass bonus past the near line
///
/// Outside the `Running` phase this is a no-op.
pub fn step(
    state: &mut GameState,
    field: &PlayingField,
    input: SteerInput,
    spawner: &mut dyn Spawner,
) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.frame += 1;

    // Spawning; the pickup roll only rides a spawned obstacle
    let cadence = effective_cadence(state.spawn_cadence, state.speed_multiplier);
    if let Some(obstacle) = spawner.maybe_spawn_obstacle(state.frame, cadence, state.speed_multiplier)
    {
        state.obstacles.push(obstacle);
        if let Some(pickup) = spawner.maybe_spawn_pickup(PICKUP_CHANCE, state.speed_multiplier) {
            state.pickups.push(pickup);
        }
    }

    // Difficulty steps up on exact multiples of the interval
    if state.frame % DIFFICULTY_INTERVAL == 0 {
        state.speed_multiplier += DIFFICULTY_STEP;
    }

    // Advance traffic and pickups, then drop whatever is far offscreen
    let advance = 1.0 + state.speed_multiplier * ADVANCE_PER_MULTIPLIER;
    let despawn_line = field.height + DESPAWN_MARGIN;
    for obstacle in &mut state.obstacles {
        obstacle.pos.y += obstacle.speed * advance;
    }
    state.obstacles.retain(|o| o.pos.y < despawn_line);
    for pickup in &mut state.pickups {
        pickup.pos.y += pickup.speed * advance;
    }
    state.pickups.retain(|p| p.pos.y < despawn_line);

    // Steering; holding both directions cancels out
    if input.left {
        state.player.pos.x -= STEER_SPEED;
    }
    if input.right {
        state.player.pos.x += STEER_SPEED;
    }
    let (min_x, max_x) = field.steer_bounds(state.player.size.x);
    state.player.pos.x = state.player.pos.x.clamp(min_x, max_x);

    // First hit ends the run; the score stays at its pre-collision value
    let player_rect = state.player.rect();
    for obstacle in &state.obstacles {
        if rects_overlap(&player_rect, &obstacle.rect()) {
            state.phase = GamePhase::GameOver;
            return;
        }
    }

    // Collect pickups under the player
    let mut collected = 0u32;
    state.pickups.retain(|p| {
        if rects_overlap(&player_rect, &p.rect()) {
            collected += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..collected {
        state.score += PICKUP_SCORE;
        state.speed_multiplier = (state.speed_multiplier - PICKUP_RELIEF).max(MULTIPLIER_FLOOR);
    }

    // Survival pays a trickle that grows with difficulty
    state.score += BASE_SCORE_RATE + state.speed_multiplier * SCORE_RATE_PER_MULTIPLIER;

    // Obstacles the player outlived pay a bonus on the way out
    let pass_line = field.height + PASS_MARGIN;
    let mut passed = 0u32;
    state.obstacles.retain(|o| {
        if o.pos.y > pass_line {
            passed += 1;
            false
        } else {
            true
        }
    });
    if passed > 0 {
        state.score += PASS_BONUS * passed as f32;
    }
}
