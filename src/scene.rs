//! Scene flow: Title → Playing → GameOver → Playing
//!
//! The director owns the current scene and the run's RNG. Every transition
//! throws the old scene away and builds a new one; nothing mutable is
//! shared between scenes. Rendering is left to a [`Presenter`], which is
//! told what to show and which way to slide it in.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Direction, Session, SessionState, TickInput};

/// Logical direction of a scene transition (mapped to a visual by the presenter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Up,
    Down,
}

/// A discrete key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
    Other,
}

/// Current scene
#[derive(Debug, Clone)]
pub enum Scene {
    Title,
    Playing(Box<Session>),
    /// Run ended on this stage
    GameOver { stage: u32 },
}

/// Scene without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Title,
    Playing,
    GameOver,
}

impl Scene {
    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Title => SceneKind::Title,
            Scene::Playing(_) => SceneKind::Playing,
            Scene::GameOver { .. } => SceneKind::GameOver,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Scene::Playing(session) => Some(session.as_ref()),
            _ => None,
        }
    }
}

/// Presentation collaborator
pub trait Presenter {
    /// Show `scene`, sliding it in from `direction`
    fn present(&mut self, scene: &Scene, direction: TransitionDirection);
}

/// Presenter that only logs
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&mut self, scene: &Scene, direction: TransitionDirection) {
        match scene {
            Scene::Title => log::info!("Presenting title ({:?})", direction),
            Scene::Playing(session) => log::info!(
                "Presenting stage {} with {} lives ({:?})",
                session.stage(),
                session.life_points(),
                direction
            ),
            Scene::GameOver { stage } => {
                log::info!("Presenting game over at stage {} ({:?})", stage, direction)
            }
        }
    }
}

pub struct SceneDirector<P: Presenter> {
    settings: Settings,
    rng: Pcg32,
    scene: Scene,
    presenter: P,
    accumulator: f32,
    /// One-shot input waiting for the next tick
    pending: TickInput,
    /// Demo mode - paddle plays itself
    pub idle_mode: bool,
}

impl<P: Presenter> SceneDirector<P> {
    /// Director showing the title scene
    pub fn new(settings: Settings, presenter: P) -> Self {
        log::info!("Director initialized with seed: {}", settings.seed);
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            scene: Scene::Title,
            presenter,
            accumulator: 0.0,
            pending: TickInput::default(),
            idle_mode: false,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable access to the running session (scripted play, tests)
    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.scene {
            Scene::Playing(session) => Some(session.as_mut()),
            _ => None,
        }
    }

    fn present(&mut self, scene: Scene, direction: TransitionDirection) {
        self.presenter.present(&scene, direction);
        self.scene = scene;
        self.accumulator = 0.0;
        self.pending = TickInput::default();
    }

    /// Fresh run: full lives, stage 1
    fn start_run(&mut self) {
        let session = Session::new(self.settings.first_session(), &mut self.rng);
        self.present(Scene::Playing(Box::new(session)), TransitionDirection::Up);
    }

    /// Any key leaves the title and game over scenes; arrows step the paddle
    pub fn key_pressed(&mut self, key: Key) {
        match self.scene {
            Scene::Title | Scene::GameOver { .. } => self.start_run(),
            Scene::Playing(_) => match key {
                Key::Left => self.pending.direction = Some(Direction::Left),
                Key::Right => self.pending.direction = Some(Direction::Right),
                Key::Space | Key::Other => {}
            },
        }
    }

    /// Pointer press moves the paddle during play
    pub fn pointer_pressed(&mut self, x: f32) {
        if let Scene::Playing(_) = self.scene {
            self.pending.pointer_x = Some(x);
        }
    }

    /// Run simulation ticks for a frame of `frame_dt` seconds
    pub fn update(&mut self, frame_dt: f32) {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            if !self.tick() {
                break;
            }
        }
    }

    /// Run exactly one fixed step. Returns false once the scene changed.
    pub fn tick(&mut self) -> bool {
        let Scene::Playing(session) = &mut self.scene else {
            return false;
        };

        let input = TickInput {
            idle_mode: self.idle_mode,
            ..std::mem::take(&mut self.pending)
        };

        match session.tick(&input, SIM_DT) {
            SessionState::Playing | SessionState::LifeLost => true,
            SessionState::LevelClear => {
                let next = session.next_stage(&mut self.rng);
                self.present(Scene::Playing(Box::new(next)), TransitionDirection::Down);
                false
            }
            SessionState::GameOver => {
                let stage = session.stage();
                self.present(Scene::GameOver { stage }, TransitionDirection::Down);
                false
            }
        }
    }
}
