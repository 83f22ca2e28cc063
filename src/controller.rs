//! Session control: state machine, frame scheduling, high score writes.
//!
//! The controller sits between the platform loop and the pure sim. It
//! owns the phase transitions, holds at most one scheduling handle at a
//! time, and talks to the score store when a run ends.

use log::info;

use crate::highscores::HighScoreStore;
use crate::sim::{GamePhase, GameState, PlayingField, RoadSpawner, Spawner, SteerInput, step};

/// Token proving a live tick chain with the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub u64);

/// Delivers ticks; requestAnimationFrame in the browser
pub trait FrameSource {
    /// Begin a new tick chain, returning its handle
    fn schedule(&mut self) -> FrameHandle;
    /// Stop the chain behind `handle`; unknown handles are ignored
    fn cancel(&mut self, handle: FrameHandle);
}

/// Transition notifications for the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    Paused,
    Resumed,
    /// Run ended; the high score has already been written if beaten
    GameOver { final_score: u32, new_high: bool },
    Reset,
}

/// Readout values the HUD shows every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudReadout {
    pub score: u32,
    pub high_score: u32,
    pub speed_multiplier: f32,
}

/// Drives one game session at a time over a pure simulation
pub struct Controller<F: FrameSource, S: HighScoreStore> {
    field: PlayingField,
    state: GameState,
    spawner: Box<dyn Spawner>,
    frames: F,
    handle: Option<FrameHandle>,
    store: S,
    high_score: u32,
    events: Vec<SessionEvent>,
}

impl<F: FrameSource, S: HighScoreStore> Controller<F, S> {
    /// Controller with the production spawner on the given seed
    pub fn new(field: PlayingField, frames: F, store: S, seed: u64) -> Self {
        Self::with_spawner(field, frames, store, Box::new(RoadSpawner::new(field, seed)))
    }

    pub fn with_spawner(
        field: PlayingField,
        frames: F,
        store: S,
        spawner: Box<dyn Spawner>,
    ) -> Self {
        let high_score = store.read();
        Self {
            field,
            state: GameState::new(&field),
            spawner,
            frames,
            handle: None,
            store,
            high_score,
            events: Vec::new(),
        }
    }

    /// Begin a fresh run. Valid from Idle or GameOver, no-op while a
    /// run is live.
    pub fn start(&mut self) {
        match self.phase() {
            GamePhase::Idle | GamePhase::GameOver => {}
            GamePhase::Running | GamePhase::Paused => return,
        }
        self.state = GameState::new(&self.field);
        self.state.phase = GamePhase::Running;
        self.acquire_frames();
        self.events.push(SessionEvent::Started);
        info!("Session started");
    }

    /// Flip between Running and Paused; no-op in other phases
    pub fn toggle_pause(&mut self) {
        match self.phase() {
            GamePhase::Running => {
                self.state.phase = GamePhase::Paused;
                self.release_frames();
                self.events.push(SessionEvent::Paused);
                info!("Paused");
            }
            GamePhase::Paused => {
                self.state.phase = GamePhase::Running;
                self.acquire_frames();
                self.events.push(SessionEvent::Resumed);
                info!("Resumed");
            }
            GamePhase::Idle | GamePhase::GameOver => {}
        }
    }

    /// Host lost visibility; force a pause. Resuming is always manual.
    pub fn notify_hidden(&mut self) {
        if self.phase() == GamePhase::Running {
            info!("Page hidden, pausing");
            self.toggle_pause();
        }
    }

    /// Drop any run and return to Idle with a zeroed session
    pub fn reset(&mut self) {
        self.release_frames();
        self.state = GameState::new(&self.field);
        self.events.push(SessionEvent::Reset);
        info!("Session reset");
    }

    /// One scheduler tick: advance the sim, then settle any run end
    pub fn tick(&mut self, input: SteerInput) {
        if self.phase() != GamePhase::Running {
            return;
        }
        step(&mut self.state, &self.field, input, self.spawner.as_mut());
        if self.phase() == GamePhase::GameOver {
            self.finish_run();
        }
    }

    fn finish_run(&mut self) {
        self.release_frames();
        let final_score = self.state.display_score();
        let new_high = final_score > self.high_score;
        if new_high {
            self.high_score = final_score;
            self.store.write(final_score);
        }
        self.events.push(SessionEvent::GameOver {
            final_score,
            new_high,
        });
        info!("Game over at {final_score} (best {})", self.high_score);
    }

    fn acquire_frames(&mut self) {
        // Never two live chains: cancel anything outstanding first
        if let Some(handle) = self.handle.take() {
            self.frames.cancel(handle);
        }
        self.handle = Some(self.frames.schedule());
    }

    fn release_frames(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.frames.cancel(handle);
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn field(&self) -> &PlayingField {
        &self.field
    }

    #[inline]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// True while a tick chain is booked with the frame source
    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.handle.is_some()
    }

    pub fn readout(&self) -> HudReadout {
        HudReadout {
            score: self.state.display_score(),
            high_score: self.high_score,
            speed_multiplier: self.state.speed_multiplier,
        }
    }

    /// Transition events since the last call, oldest first
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{OBSTACLE_HEIGHT, OBSTACLE_WIDTH, START_MULTIPLIER};
    use crate::highscores::MemoryScore;
    use crate::sim::Obstacle;
    use glam::Vec2;

    /// Frame source that only books handles
    #[derive(Default)]
    struct ManualFrames {
        next: u64,
        active: Vec<u64>,
    }

    impl FrameSource for ManualFrames {
        fn schedule(&mut self) -> FrameHandle {
            self.next += 1;
            self.active.push(self.next);
            FrameHandle(self.next)
        }

        fn cancel(&mut self, handle: FrameHandle) {
            self.active.retain(|&g| g != handle.0);
        }
    }

    fn controller_with_best(best: u32) -> Controller<ManualFrames, MemoryScore> {
        Controller::new(
            PlayingField::default(),
            ManualFrames::default(),
            MemoryScore::with_best(best),
            1,
        )
    }

    fn controller() -> Controller<ManualFrames, MemoryScore> {
        controller_with_best(0)
    }

    /// Obstacle parked right on top of the player
    fn parked_on_player(c: &Controller<ManualFrames, MemoryScore>) -> Obstacle {
        Obstacle {
            pos: c.state.player.pos,
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed: 0.0,
            color: "#ef4444",
        }
    }

    #[test]
    fn test_start_runs_only_from_idle_or_game_over() {
        let mut c = controller();
        assert_eq!(c.phase(), GamePhase::Idle);

        c.start();
        assert_eq!(c.phase(), GamePhase::Running);
        assert!(c.is_scheduled());
        assert_eq!(c.take_events(), vec![SessionEvent::Started]);

        // Already running: nothing happens
        c.start();
        assert_eq!(c.phase(), GamePhase::Running);
        assert_eq!(c.frames.active.len(), 1);
        assert!(c.take_events().is_empty());

        // Paused is not a restart either
        c.toggle_pause();
        c.start();
        assert_eq!(c.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_pause_releases_and_resume_reacquires() {
        let mut c = controller();
        c.start();
        assert_eq!(c.frames.active.len(), 1);

        c.toggle_pause();
        assert_eq!(c.phase(), GamePhase::Paused);
        assert!(!c.is_scheduled());
        assert!(c.frames.active.is_empty());

        // Ticks while paused change nothing
        let before = c.state.clone();
        c.tick(SteerInput {
            left: true,
            right: false,
        });
        assert_eq!(c.state, before);

        c.toggle_pause();
        assert_eq!(c.phase(), GamePhase::Running);
        assert_eq!(c.frames.active.len(), 1);
    }

    #[test]
    fn test_at_most_one_handle_across_any_sequence() {
        let mut c = controller();
        c.start();
        assert!(c.frames.active.len() <= 1);
        c.toggle_pause();
        assert!(c.frames.active.len() <= 1);
        c.toggle_pause();
        assert!(c.frames.active.len() <= 1);
        c.notify_hidden();
        assert!(c.frames.active.len() <= 1);
        c.reset();
        assert!(c.frames.active.is_empty());
        c.start();
        assert_eq!(c.frames.active.len(), 1);
        c.state.obstacles.push(parked_on_player(&c));
        c.tick(SteerInput::default());
        assert!(c.frames.active.is_empty());
        c.start();
        assert_eq!(c.frames.active.len(), 1);
    }

    #[test]
    fn test_hidden_pauses_and_never_resumes_alone() {
        let mut c = controller();
        c.notify_hidden();
        assert_eq!(c.phase(), GamePhase::Idle);

        c.start();
        c.take_events();
        c.notify_hidden();
        assert_eq!(c.phase(), GamePhase::Paused);
        assert!(!c.is_scheduled());
        assert_eq!(c.take_events(), vec![SessionEvent::Paused]);

        // A second signal while hidden is a no-op
        c.notify_hidden();
        assert_eq!(c.phase(), GamePhase::Paused);
        assert!(c.take_events().is_empty());
    }

    #[test]
    fn test_crash_settles_the_run() {
        let mut c = controller();
        c.start();
        c.take_events();
        c.state.score = 33.9;
        c.state.obstacles.push(parked_on_player(&c));

        c.tick(SteerInput::default());
        assert_eq!(c.phase(), GamePhase::GameOver);
        assert!(!c.is_scheduled());
        assert_eq!(c.high_score(), 33);
        assert_eq!(c.store.read(), 33);
        assert_eq!(
            c.take_events(),
            vec![SessionEvent::GameOver {
                final_score: 33,
                new_high: true,
            }]
        );
    }

    #[test]
    fn test_high_score_written_only_when_beaten() {
        let mut c = controller_with_best(50);
        assert_eq!(c.high_score(), 50);

        c.start();
        c.state.score = 33.0;
        c.state.obstacles.push(parked_on_player(&c));
        c.tick(SteerInput::default());
        assert_eq!(c.high_score(), 50);
        assert_eq!(c.store.read(), 50);
        let events = c.take_events();
        assert!(events.contains(&SessionEvent::GameOver {
            final_score: 33,
            new_high: false,
        }));

        c.start();
        c.state.score = 80.2;
        c.state.obstacles.push(parked_on_player(&c));
        c.tick(SteerInput::default());
        assert_eq!(c.high_score(), 80);
        assert_eq!(c.store.read(), 80);
    }

    #[test]
    fn test_reset_returns_to_idle_zeroed() {
        let mut c = controller();
        c.start();
        for _ in 0..5 {
            c.tick(SteerInput {
                left: true,
                right: false,
            });
        }
        c.reset();
        assert_eq!(c.phase(), GamePhase::Idle);
        assert!(!c.is_scheduled());
        assert_eq!(c.state.frame, 0);
        assert_eq!(c.state.score, 0.0);
        assert!(c.state.obstacles.is_empty());
    }

    #[test]
    fn test_restart_after_game_over_reinitializes() {
        let mut c = controller();
        c.start();
        for _ in 0..20 {
            c.tick(SteerInput {
                left: true,
                right: false,
            });
        }
        c.state.obstacles.push(parked_on_player(&c));
        c.tick(SteerInput::default());
        assert_eq!(c.phase(), GamePhase::GameOver);

        c.start();
        assert_eq!(c.phase(), GamePhase::Running);
        assert_eq!(c.state.frame, 0);
        assert_eq!(c.state.score, 0.0);
        assert_eq!(c.state.speed_multiplier, START_MULTIPLIER);
        assert!(c.state.obstacles.is_empty());
        assert!(c.state.pickups.is_empty());
        let field = PlayingField::default();
        assert_eq!(c.state.player.pos.x, field.center_x() - c.state.player.size.x / 2.0);
    }

    #[test]
    fn test_readout_reflects_floored_score_and_best() {
        let mut c = controller_with_best(400);
        c.start();
        c.state.score = 12.9;
        let r = c.readout();
        assert_eq!(r.score, 12);
        assert_eq!(r.high_score, 400);
        assert_eq!(r.speed_multiplier, START_MULTIPLIER);
    }
}
