//! Game session state machine
//!
//! A session is one stage of play: it owns the blocks, paddle and ball,
//! the life points and the stage number. Each tick runs in a fixed order:
//!
//! 1. input moves the paddle
//! 2. physics integrates the ball in substeps and reports contacts
//! 3. after each substep, contacts damage blocks (destroyed blocks are
//!    removed before the next substep)
//! 4. the ball speed-up timer advances
//! 5. transitions are evaluated: level clear, then ball lost, else playing
//!
//! Block damage always lands before the level-clear check of the same tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, SpeedUpTimer};
use super::block::{Block, BlockGrid, BlockId, HitResult};
use super::collision::{Contact, ContactEffect, resolve};
use super::paddle::{Direction, Paddle};
use super::physics::Physics;
use crate::consts::*;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Active gameplay
    Playing,
    /// Every block destroyed; the next stage takes over
    LevelClear,
    /// Ball lost with lives to spare; play continues after a reset
    LifeLost,
    /// Ball lost on the last life (terminal)
    GameOver,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer pressed at this X
    pub pointer_x: Option<f32>,
    /// Direction key pressed
    pub direction: Option<Direction>,
    /// Idle/demo mode - paddle follows the ball on its own
    pub idle_mode: bool,
}

/// Everything needed to build a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub life_points: u8,
    pub stage: u32,
    pub grid: BlockGrid,
    pub field: Vec2,
    pub pointer_move_secs: f32,
    pub step_move_secs: f32,
    pub speed_up_interval_secs: f32,
    pub speed_up_factor: f32,
    /// Keep directional steps inside the field like pointer moves
    pub clamp_paddle_steps: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            life_points: MAX_LIFE_POINTS,
            stage: FIRST_STAGE,
            grid: BlockGrid::default(),
            field: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            pointer_move_secs: PADDLE_POINTER_SECS,
            step_move_secs: PADDLE_STEP_SECS,
            speed_up_interval_secs: BALL_SPEED_UP_SECS,
            speed_up_factor: BALL_SPEED_UP_FACTOR,
            clamp_paddle_steps: false,
        }
    }
}

/// One stage of play
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    life_points: u8,
    stage: u32,
    state: SessionState,
    /// Active blocks (sorted by id)
    pub blocks: Vec<Block>,
    pub paddle: Paddle,
    pub ball: Ball,
    physics: Physics,
    speed_up: SpeedUpTimer,
    initial_blocks: usize,
    destroyed_blocks: usize,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Session {
    /// Build a fresh stage layout from `config`
    pub fn new<R: Rng + ?Sized>(config: SessionConfig, rng: &mut R) -> Self {
        let blocks = config.grid.build(config.field, 1, rng);
        Self::with_blocks(config, blocks)
    }

    /// Build a session around a prepared set of blocks
    pub fn with_blocks(config: SessionConfig, mut blocks: Vec<Block>) -> Self {
        blocks.sort_by_key(|b| b.id);
        let paddle = Paddle::new(config.field.x);
        let ball = Ball::new(&paddle);
        let initial_blocks = blocks.len();

        log::info!(
            "Stage {} start: {} blocks, {} lives",
            config.stage,
            initial_blocks,
            config.life_points
        );

        Self {
            life_points: config.life_points,
            stage: config.stage,
            state: SessionState::Playing,
            blocks,
            paddle,
            ball,
            physics: Physics::new(config.field),
            speed_up: SpeedUpTimer::new(config.speed_up_interval_secs, config.speed_up_factor),
            initial_blocks,
            destroyed_blocks: 0,
            time_ticks: 0,
            config,
        }
    }

    pub fn life_points(&self) -> u8 {
        self.life_points
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn blocks_remaining(&self) -> usize {
        self.blocks.len()
    }

    pub fn initial_blocks(&self) -> usize {
        self.initial_blocks
    }

    pub fn destroyed_blocks(&self) -> usize {
        self.destroyed_blocks
    }

    /// Config for the session that follows a level clear
    pub fn next_stage_config(&self) -> SessionConfig {
        SessionConfig {
            life_points: self.life_points,
            stage: self.stage + 1,
            ..self.config.clone()
        }
    }

    /// Build the next stage: same lives, stage + 1, fresh layout
    pub fn next_stage<R: Rng + ?Sized>(&self, rng: &mut R) -> Session {
        Session::new(self.next_stage_config(), rng)
    }

    /// Apply player input to the paddle
    pub fn apply_input(&mut self, input: &TickInput) {
        let field_width = self.config.field.x;

        let pointer_x = match (input.pointer_x, input.idle_mode) {
            (Some(x), _) => Some(x),
            (None, true) => Some(self.predict_landing_x()),
            (None, false) => None,
        };
        if let Some(x) = pointer_x {
            self.paddle
                .move_toward(x, 0.0, field_width, self.config.pointer_move_secs);
        }

        if let Some(direction) = input.direction {
            let bounds = self.config.clamp_paddle_steps.then_some((0.0, field_width));
            self.paddle
                .step(direction, self.config.step_move_secs, bounds);
        }
    }

    /// Where the ball will cross the paddle's top edge, folding wall bounces
    fn predict_landing_x(&self) -> f32 {
        let ball = &self.ball;
        if ball.vel.y >= 0.0 {
            return ball.pos.x;
        }
        let drop = ball.pos.y - (self.paddle.top() + ball.radius);
        let t = (drop / -ball.vel.y).max(0.0);
        let raw = ball.pos.x + ball.vel.x * t;

        let lo = ball.radius;
        let span = (self.config.field.x - 2.0 * ball.radius).max(1.0);
        let folded = (raw - lo).rem_euclid(2.0 * span);
        lo + if folded > span { 2.0 * span - folded } else { folded }
    }

    /// Dispatch one contact. Returns the hit result if a block was damaged.
    pub fn apply_contact(&mut self, contact: &Contact) -> Option<HitResult> {
        match resolve(contact) {
            ContactEffect::DamageBlock(id) => self.hit_block(id),
            ContactEffect::None => None,
        }
    }

    fn hit_block(&mut self, id: BlockId) -> Option<HitResult> {
        let idx = self.blocks.binary_search_by_key(&id, |b| b.id).ok()?;
        let result = self.blocks[idx].apply_hit();
        log::debug!("Block {} hit, {} life left", id, result.remaining_life);
        if result.destroyed {
            self.blocks.remove(idx);
            self.destroyed_blocks += 1;
        }
        Some(result)
    }

    /// Decide this tick's transition from the current blocks and ball
    pub fn evaluate(&mut self) -> SessionState {
        if self.state != SessionState::Playing {
            return self.state;
        }

        if self.blocks.is_empty() {
            log::info!("Stage {} cleared", self.stage);
            self.state = SessionState::LevelClear;
            return SessionState::LevelClear;
        }

        if self.ball.is_lost() {
            if self.life_points > 1 {
                self.lose_life();
                return SessionState::LifeLost;
            }
            log::info!("Game over on stage {}", self.stage);
            self.state = SessionState::GameOver;
            return SessionState::GameOver;
        }

        SessionState::Playing
    }

    fn lose_life(&mut self) {
        self.life_points -= 1;
        self.paddle.reset(self.config.field.x);
        self.ball.respawn(&self.paddle);
        self.physics.clear_contacts();
        log::info!("Ball lost, {} lives left", self.life_points);
    }

    /// Advance the session by one fixed timestep
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> SessionState {
        // LevelClear and GameOver are final for this session
        if self.state != SessionState::Playing {
            return self.state;
        }

        self.time_ticks += 1;

        self.apply_input(input);
        self.paddle.advance(dt);

        let (substeps, h) = self.physics.substeps(&self.ball, dt);
        for _ in 0..substeps {
            let contacts = self
                .physics
                .substep(&mut self.ball, &self.paddle, &self.blocks, h);
            for contact in &contacts {
                self.apply_contact(contact);
            }
        }

        self.speed_up.advance(dt, &mut self.ball.vel);

        self.evaluate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::BodyKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session(life_points: u8) -> Session {
        let config = SessionConfig {
            life_points,
            grid: BlockGrid::new(4, 8),
            ..Default::default()
        };
        Session::new(config, &mut Pcg32::seed_from_u64(12345))
    }

    fn hit(id: BlockId) -> Contact {
        Contact::new(BodyKind::Block(id), BodyKind::Ball)
    }

    /// Hit a block until it is gone
    fn destroy(session: &mut Session, id: BlockId) {
        while session.apply_contact(&hit(id)).is_some_and(|r| !r.destroyed) {}
    }

    #[test]
    fn test_new_session_is_playing() {
        let session = session(4);
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.stage(), 1);
        assert_eq!(session.life_points(), 4);
        assert_eq!(session.blocks_remaining(), 32);
    }

    #[test]
    fn test_block_count_tracks_destroyed() {
        let mut session = session(4);
        let ids: Vec<BlockId> = session.blocks.iter().map(|b| b.id).take(5).collect();
        for &id in &ids {
            destroy(&mut session, id);
        }
        // Hits on removed blocks are ignored
        assert!(session.apply_contact(&hit(ids[0])).is_none());
        assert_eq!(session.blocks_remaining(), 32 - 5);
        assert_eq!(session.destroyed_blocks(), 5);
    }

    #[test]
    fn test_non_block_contacts_do_nothing() {
        let mut session = session(4);
        let before: Vec<u8> = session.blocks.iter().map(|b| b.life()).collect();
        session.apply_contact(&Contact::new(BodyKind::Ball, BodyKind::Paddle));
        session.apply_contact(&Contact::new(BodyKind::Wall, BodyKind::Ball));
        session.apply_contact(&Contact::new(BodyKind::Block(1), BodyKind::Block(2)));
        let after: Vec<u8> = session.blocks.iter().map(|b| b.life()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_level_clear_keeps_lives() {
        let mut session = session(3);
        let ids: Vec<BlockId> = session.blocks.iter().map(|b| b.id).collect();
        for id in ids {
            destroy(&mut session, id);
        }
        assert_eq!(session.evaluate(), SessionState::LevelClear);
        assert_eq!(session.state(), SessionState::LevelClear);

        let next = session.next_stage(&mut Pcg32::seed_from_u64(1));
        assert_eq!(next.stage(), 2);
        assert_eq!(next.life_points(), 3);
        assert_eq!(next.blocks_remaining(), 32);
        assert_eq!(next.state(), SessionState::Playing);
    }

    #[test]
    fn test_level_clear_wins_over_lost_ball() {
        let mut session = session(1);
        let ids: Vec<BlockId> = session.blocks.iter().map(|b| b.id).collect();
        for id in ids {
            destroy(&mut session, id);
        }
        session.ball.pos.y = 0.0;
        assert_eq!(session.evaluate(), SessionState::LevelClear);
    }

    #[test]
    fn test_life_lost_resets_ball_and_paddle() {
        let mut session = session(4);
        session.paddle.pos.x = 100.0;
        session.ball.pos = Vec2::new(200.0, 1.0);
        session.ball.vel = Vec2::new(-70.0, -200.0);
        let speed = session.ball.speed();

        assert_eq!(session.evaluate(), SessionState::LifeLost);
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.life_points(), 3);
        assert_eq!(session.paddle.pos.x, FIELD_WIDTH / 2.0);
        assert_eq!(
            session.ball.pos,
            Ball::start_position(&session.paddle, BALL_RADIUS)
        );
        assert!((session.ball.speed() - speed).abs() < 1e-3);
        assert!(
            session
                .ball
                .vel
                .normalize()
                .abs_diff_eq(Ball::start_velocity().normalize(), 1e-5)
        );
    }

    #[test]
    fn test_speed_ups_survive_lost_life() {
        let mut session = session(4);
        // Pin the ball mid-field for 62 s so it never touches anything
        let idle = TickInput::default();
        for _ in 0..(120 * 62) {
            session.ball.pos = Vec2::new(FIELD_WIDTH / 2.0, 200.0);
            session.tick(&idle, SIM_DT);
        }
        let sped_up = session.ball.speed();
        let expected = Ball::start_velocity().length() * BALL_SPEED_UP_FACTOR.powi(12);
        assert!((sped_up - expected).abs() < expected * 1e-3);

        session.ball.pos.y = 0.0;
        assert_eq!(session.evaluate(), SessionState::LifeLost);
        assert!(session.ball.speed() >= sped_up - 1e-3);
    }

    #[test]
    fn test_destroyed_block_stops_colliding_within_tick() {
        // Fragile block above, sturdy block below, a narrow gap between them
        let mut upper = Block::with_life(1, 60.0, 16.0);
        upper.id = 1;
        upper.bounds.center = Vec2::new(100.0, 300.0);
        let mut lower = Block::with_life(3, 60.0, 16.0);
        lower.id = 2;
        lower.bounds.center = Vec2::new(100.0, 260.0);
        let mut session = Session::with_blocks(SessionConfig::default(), vec![upper, lower]);

        // Fast enough to hit upper, bounce off lower and climb back in one tick
        session.ball.pos = Vec2::new(100.0, 280.0);
        session.ball.vel = Vec2::new(0.0, 6000.0);

        assert_eq!(
            session.tick(&TickInput::default(), SIM_DT),
            SessionState::Playing
        );
        assert_eq!(session.blocks_remaining(), 1);
        assert_eq!(session.blocks[0].id, 2);
        assert_eq!(session.blocks[0].life(), 2);
        // Passed through where the upper block was instead of bouncing again
        assert!(session.ball.vel.y > 0.0);
        assert!(session.ball.pos.y > 292.0 - BALL_RADIUS);
    }

    #[test]
    fn test_last_life_is_game_over() {
        let mut session = session(1);
        session.ball.pos.y = 0.0;
        assert_eq!(session.evaluate(), SessionState::GameOver);
        assert_eq!(session.state(), SessionState::GameOver);

        // Terminal: ticking does nothing further
        let ticks = session.time_ticks;
        assert_eq!(
            session.tick(&TickInput::default(), SIM_DT),
            SessionState::GameOver
        );
        assert_eq!(session.time_ticks, ticks);
    }

    #[test]
    fn test_unattended_ball_eventually_drains_lives() {
        // Paddle parked in a corner; the ball keeps falling past it
        let mut session = session(2);
        let mut lost = 0;
        let mut outcome = SessionState::Playing;
        for _ in 0..(120 * 600) {
            session.paddle.pos.x = -1000.0;
            outcome = session.tick(&TickInput::default(), SIM_DT);
            match outcome {
                SessionState::LifeLost => lost += 1,
                SessionState::Playing => {}
                _ => break,
            }
        }
        assert!(matches!(
            outcome,
            SessionState::GameOver | SessionState::LevelClear
        ));
        if outcome == SessionState::GameOver {
            assert_eq!(lost, 1);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = session(4);
        let mut b = session(4);
        let inputs = [
            TickInput {
                pointer_x: Some(500.0),
                ..Default::default()
            },
            TickInput {
                direction: Some(Direction::Left),
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..400 {
            for input in &inputs {
                a.tick(input, SIM_DT);
                b.tick(input, SIM_DT);
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.blocks_remaining(), b.blocks_remaining());
    }

    #[test]
    fn test_idle_mode_predicts_wall_bounce() {
        let mut session = session(4);
        session.ball.pos = Vec2::new(600.0, 200.0);
        session.ball.vel = Vec2::new(100.0, -100.0);
        let x = session.predict_landing_x();
        assert!(x >= BALL_RADIUS && x <= FIELD_WIDTH - BALL_RADIUS);
        // Heading right into the wall, so it comes back left of where it started
        assert!(x < 600.0);
    }
}
