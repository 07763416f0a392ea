//! Session state and core simulation types
//!
//! A [`Session`] owns everything one run of the game touches: the player,
//! the obstacle and background collections, the timers and the RNG stream.
//! The play/died state machine only changes through methods here.

use super::entity::{Player, Sprite, SpriteKind};
use super::rng::{Random, clock_seed};
use crate::consts::*;
use crate::highscores::HighScore;
use crate::math::Vector2;
use crate::Viewport;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart input
    Died,
}

/// Something the host loop may want to react to (audio, logging, replays)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player flapped
    Jumped,
    /// A new obstacle pair entered on the right edge
    ObstacleSpawned { mid_y: f32 },
    /// Session ended
    Died {
        score: f32,
        seed: u32,
        new_high_score: bool,
    },
    /// Fresh session started after a death
    Restarted { seed: u32, attempt: u32 },
}

/// Background layer layout: (texture layer, height, scroll velocity).
/// `None` height means full screen. Each layer is laid out twice, side by
/// side, so one copy always covers the screen while the other wraps.
const BACKGROUND_LAYERS: [(u8, Option<f32>, f32); 3] =
    [(0, None, -5.0), (1, Some(200.0), -30.0), (1, Some(100.0), -50.0)];

/// One run of the game plus the state that outlives runs (high score, RNG)
#[derive(Debug, Clone)]
pub struct Session {
    /// Current phase
    pub phase: PlayState,
    /// Survival time of the current run (seconds)
    pub elapsed: f32,
    /// Best run so far in this process
    pub high_score: HighScore,
    /// Seconds until the next obstacle pair
    pub spawn_countdown: f32,
    /// Seconds until restart input is accepted after a death
    pub died_countdown: f32,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Sprite>,
    /// Parallax layers in draw order
    pub backgrounds: Vec<Sprite>,
    pub viewport: Viewport,
    /// Number of runs started in this session (1-based)
    pub attempt: u32,
    /// Fixed steps taken since the current run started
    pub steps: u64,
    seed: u32,
    pinned_seed: Option<u32>,
    rng: Random,
    events: Vec<GameEvent>,
}

impl Session {
    /// Start a session. `seed` pins every run to the same obstacle layout;
    /// without it the first run is seeded from the clock and later runs
    /// draw their seed from the previous run's stream.
    pub fn new(viewport: Viewport, seed: Option<u32>) -> Self {
        let initial_seed = seed.unwrap_or_else(clock_seed);
        let mut session = Self {
            phase: PlayState::Playing,
            elapsed: 0.0,
            high_score: HighScore::new(),
            spawn_countdown: 0.0,
            died_countdown: 0.0,
            player: Player::spawn(),
            obstacles: Vec::new(),
            backgrounds: Vec::new(),
            viewport,
            attempt: 0,
            steps: 0,
            seed: initial_seed,
            pinned_seed: seed,
            rng: Random::new(initial_seed),
            events: Vec::new(),
        };
        session.begin(initial_seed);
        log::info!("Session started with seed {}", initial_seed);
        session
    }

    /// Session whose every run uses `seed`
    pub fn with_seed(viewport: Viewport, seed: u32) -> Self {
        Self::new(viewport, Some(seed))
    }

    /// Seed of the current run
    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Whether runs are pinned to a caller-supplied seed
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pinned_seed.is_some()
    }

    /// Reset per-run state and reseed
    fn begin(&mut self, seed: u32) {
        self.seed = seed;
        self.rng.set_seed(seed);
        self.phase = PlayState::Playing;
        self.elapsed = 0.0;
        self.spawn_countdown = 0.0;
        self.died_countdown = 0.0;
        self.steps = 0;
        self.attempt += 1;
        self.player = Player::spawn();
        self.obstacles.clear();
        self.backgrounds = create_backgrounds(&self.viewport);
    }

    /// Throw away the current run and start a fresh one
    pub fn restart(&mut self) {
        let seed = self.pinned_seed.unwrap_or_else(|| self.rng.next_seed());
        self.begin(seed);
        log::info!("Run {} started with seed {}", self.attempt, seed);
        self.events.push(GameEvent::Restarted {
            seed,
            attempt: self.attempt,
        });
    }

    /// True when an action would restart the game
    #[inline]
    pub fn can_restart(&self) -> bool {
        self.phase == PlayState::Died && self.died_countdown < 0.0
    }

    /// Handle the single "activate" input: jump while playing, restart once
    /// the died countdown has run out. Returns whether anything happened.
    pub fn activate(&mut self) -> bool {
        match self.phase {
            PlayState::Playing => {
                self.jump();
                true
            }
            PlayState::Died if self.can_restart() => {
                self.restart();
                true
            }
            PlayState::Died => false,
        }
    }

    /// Flap upward (no-op unless playing)
    pub fn jump(&mut self) {
        if self.phase != PlayState::Playing {
            return;
        }
        self.player.jump(JUMP_POWER);
        self.events.push(GameEvent::Jumped);
    }

    /// Range the gap midpoint is drawn from: a band around the screen
    /// middle, kept far enough from the edges that both halves stay at least
    /// `WALL_BUFFER` tall.
    pub fn gap_band(&self) -> (f32, f32) {
        let mid = self.viewport.mid_y();
        let margin = WALL_BUFFER + SPACING;
        let lo = (mid - SPAWN_RANGE).max(margin);
        let hi = (mid + SPAWN_RANGE).min(self.viewport.height - margin);
        if lo > hi { (mid, mid) } else { (lo, hi) }
    }

    /// Spawn a top/bottom obstacle pair at the right edge
    pub fn spawn_obstacle_pair(&mut self) {
        let (lo, hi) = self.gap_band();
        let mid_y = self.rng.generate_range_f64(f64::from(lo), f64::from(hi)) as f32;
        self.spawn_obstacle_pair_at(mid_y);
    }

    /// Spawn a pair around a known gap midpoint
    pub fn spawn_obstacle_pair_at(&mut self, mid_y: f32) {
        let x = self.viewport.width;
        let velocity = Vector2::new(WALL_VELOCITY, 0.0);

        // Heights clamp at zero on viewports too short to fit a full pair
        let top_end = (mid_y - SPACING).max(0.0);
        self.obstacles.push(Sprite::new(
            SpriteKind::Obstacle,
            Vector2::new(x, 0.0),
            velocity,
            WALL_WIDTH,
            top_end,
        ));

        let bottom_start = mid_y + SPACING;
        self.obstacles.push(Sprite::new(
            SpriteKind::Obstacle,
            Vector2::new(x, bottom_start),
            velocity,
            WALL_WIDTH,
            (self.viewport.height - bottom_start).max(0.0),
        ));

        log::debug!("Spawned obstacle pair, gap at y={:.1}", mid_y);
        self.events.push(GameEvent::ObstacleSpawned { mid_y });
    }

    /// Playing → Died. Freezes the world in place and records the score.
    pub fn die(&mut self) {
        if self.phase != PlayState::Playing {
            return;
        }

        for obstacle in &mut self.obstacles {
            obstacle.freeze();
        }
        // Settle everything so rendering holds still while dead
        self.player.physics.update(0.0);
        for layer in &mut self.backgrounds {
            layer.physics.update(0.0);
        }

        let new_high_score = self.high_score.record(self.elapsed);
        self.phase = PlayState::Died;
        self.died_countdown = DIED_WAIT_TIME;

        log::info!(
            "Died! time={:.2} seed={} high_score={:.2}{}",
            self.elapsed,
            self.seed,
            self.high_score.best(),
            if new_high_score { " (new best)" } else { "" }
        );
        self.events.push(GameEvent::Died {
            score: self.elapsed,
            seed: self.seed,
            new_high_score,
        });
    }

    /// Events queued since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Background layers for a fresh run
fn create_backgrounds(viewport: &Viewport) -> Vec<Sprite> {
    let mut layers = Vec::with_capacity(BACKGROUND_LAYERS.len() * 2);
    for (texture, height, speed) in BACKGROUND_LAYERS {
        let height = height.unwrap_or(viewport.height);
        let y = viewport.height - height;
        for x in [0.0, viewport.width] {
            layers.push(Sprite::new(
                SpriteKind::Background(texture),
                Vector2::new(x, y),
                Vector2::new(speed, 0.0),
                viewport.width,
                height,
            ));
        }
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_state() {
        let session = Session::with_seed(Viewport::default(), 42);
        assert_eq!(session.phase, PlayState::Playing);
        assert_eq!(session.elapsed, 0.0);
        assert_eq!(session.spawn_countdown, 0.0);
        assert_eq!(session.seed(), 42);
        assert_eq!(session.attempt, 1);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.backgrounds.len(), 6);
        assert!(session.is_pinned());
    }

    #[test]
    fn test_background_layout() {
        let session = Session::with_seed(Viewport::new(800, 600), 1);
        let layers = &session.backgrounds;
        assert_eq!(layers[0].physics.position(), Vector2::new(0.0, 0.0));
        assert_eq!(layers[1].physics.position(), Vector2::new(800.0, 0.0));
        assert_eq!(layers[0].height, 600.0);
        assert_eq!(layers[2].physics.position(), Vector2::new(0.0, 400.0));
        assert_eq!(layers[3].physics.velocity(), Vector2::new(-30.0, 0.0));
        assert_eq!(layers[5].physics.position(), Vector2::new(800.0, 500.0));
        assert_eq!(layers[5].kind, SpriteKind::Background(1));
    }

    #[test]
    fn test_gap_band_default_screen() {
        let session = Session::with_seed(Viewport::new(800, 600), 1);
        assert_eq!(session.gap_band(), (155.0, 445.0));
    }

    #[test]
    fn test_gap_band_clamped_on_short_screen() {
        let session = Session::with_seed(Viewport::new(800, 400), 1);
        // band 55..345, clamped to 155..245
        assert_eq!(session.gap_band(), (155.0, 245.0));

        let session = Session::with_seed(Viewport::new(800, 200), 1);
        assert_eq!(session.gap_band(), (100.0, 100.0));
    }

    #[test]
    fn test_spawn_pair_geometry() {
        let mut session = Session::with_seed(Viewport::new(800, 600), 1);
        session.spawn_obstacle_pair_at(300.0);
        assert_eq!(session.obstacles.len(), 2);

        let top = &session.obstacles[0];
        assert_eq!(top.physics.position(), Vector2::new(800.0, 0.0));
        assert_eq!(top.height, 195.0);
        assert_eq!(top.width, WALL_WIDTH);

        let bottom = &session.obstacles[1];
        assert_eq!(bottom.physics.position(), Vector2::new(800.0, 405.0));
        assert_eq!(bottom.height, 195.0);
        assert_eq!(bottom.physics.velocity(), Vector2::new(WALL_VELOCITY, 0.0));
        assert_eq!(bottom.physics.acceleration(), Vector2::ZERO);
    }

    #[test]
    fn test_random_spawn_inside_band() {
        let mut session = Session::with_seed(Viewport::new(800, 600), 42);
        for _ in 0..200 {
            session.spawn_obstacle_pair();
        }
        for event in session.events() {
            if let GameEvent::ObstacleSpawned { mid_y } = *event {
                assert!((155.0..=445.0).contains(&mid_y));
            }
        }
    }

    #[test]
    fn test_die_records_once() {
        let mut session = Session::with_seed(Viewport::default(), 3);
        session.spawn_obstacle_pair_at(300.0);
        session.elapsed = 4.2;
        session.die();
        session.die();

        assert_eq!(session.phase, PlayState::Died);
        assert_eq!(session.high_score.best(), 4.2);
        assert_eq!(session.died_countdown, DIED_WAIT_TIME);
        assert!(session.obstacles.iter().all(|o| o.physics.velocity() == Vector2::ZERO));

        let deaths = session
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Died { .. }))
            .count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_activate_ignored_during_grace_period() {
        let mut session = Session::with_seed(Viewport::default(), 3);
        session.die();
        assert!(!session.can_restart());
        assert!(!session.activate());
        assert_eq!(session.phase, PlayState::Died);

        // Countdown must go strictly below zero
        session.died_countdown = 0.0;
        assert!(!session.activate());
        session.died_countdown = -0.001;
        assert!(session.activate());
        assert_eq!(session.phase, PlayState::Playing);
        assert_eq!(session.attempt, 2);
    }

    #[test]
    fn test_restart_resets_run_but_keeps_high_score() {
        let mut session = Session::with_seed(Viewport::default(), 9);
        session.spawn_obstacle_pair_at(250.0);
        session.elapsed = 1.5;
        session.steps = 150;
        session.die();
        session.restart();

        assert_eq!(session.phase, PlayState::Playing);
        assert_eq!(session.elapsed, 0.0);
        assert_eq!(session.spawn_countdown, 0.0);
        assert_eq!(session.steps, 0);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.player.center(), Vector2::new(PLAYER_START_X, 0.0));
        assert_eq!(session.high_score.best(), 1.5);
        assert_eq!(session.seed(), 9);
    }

    #[test]
    fn test_unpinned_restart_draws_new_seed() {
        let mut a = Session::new(Viewport::default(), None);
        let first = a.seed();
        assert!(!a.is_pinned());
        a.die();
        a.restart();
        // Next seed comes from the first run's stream, so it's reproducible
        let mut expected = Random::new(first);
        assert_eq!(a.seed(), expected.next_seed());
    }

    #[test]
    fn test_jump_only_while_playing() {
        let mut session = Session::with_seed(Viewport::default(), 3);
        session.jump();
        assert_eq!(session.player.physics.velocity(), Vector2::new(0.0, JUMP_POWER));
        session.drain_events();

        session.die();
        session.player.physics.set_velocity(Vector2::ZERO);
        session.jump();
        assert_eq!(session.player.physics.velocity(), Vector2::ZERO);
        assert!(!session.events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_short_viewport_pair_has_no_negative_heights() {
        let mut session = Session::with_seed(Viewport::new(800, 200), 3);
        assert_eq!(session.gap_band(), (100.0, 100.0));
        session.spawn_obstacle_pair();
        assert_eq!(session.obstacles.len(), 2);
        for obstacle in &session.obstacles {
            assert!(obstacle.height >= 0.0);
        }
        assert_eq!(session.obstacles[0].height, 0.0);
        assert_eq!(session.obstacles[1].height, 0.0);
    }
}
