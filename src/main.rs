//! Block Breaker entry point
//!
//! Headless native runner: loads settings, starts a run from the title
//! scene and lets the paddle play itself at a fixed frame rate, logging
//! every scene the director presents.
//!
//! Usage: `block-breaker [settings.json] [seconds]`

use block_breaker::scene::{Key, LogPresenter, SceneDirector, SceneKind};
use block_breaker::{Settings, hud};

/// Simulated frame length (60 fps)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Default demo length in simulated seconds
const DEFAULT_DEMO_SECS: f32 = 120.0;

fn main() {
    env_logger::init();
    log::info!("Block Breaker (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let demo_secs = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(DEFAULT_DEMO_SECS);

    let mut director = SceneDirector::new(settings, LogPresenter);
    director.idle_mode = true;
    log::info!("{}", hud::TITLE_TEXT);
    director.key_pressed(Key::Space);

    let frames = (demo_secs / FRAME_DT).ceil() as u64;
    let mut best_stage = 0;
    for _ in 0..frames {
        director.update(FRAME_DT);

        match director.scene().kind() {
            SceneKind::Playing => {
                if let Some(session) = director.scene().session() {
                    best_stage = best_stage.max(session.stage());
                }
            }
            SceneKind::GameOver => {
                log::info!("{}", hud::GAME_OVER_TEXT);
                // Title and game over both restart on any key
                director.key_pressed(Key::Other);
            }
            SceneKind::Title => director.key_pressed(Key::Other),
        }
    }

    if let Some(session) = director.scene().session() {
        let hud = hud::Hud::from_session(session);
        log::info!(
            "{} {} - {} of {} blocks left",
            hud.stage,
            hud.lives,
            session.blocks_remaining(),
            session.initial_blocks()
        );
    }
    println!("Demo finished after {:.0}s, best stage reached: {}", demo_secs, best_stage);
}
