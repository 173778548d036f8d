//! Heads-up display text
//!
//! The presentation layer reads these between ticks; nothing here renders.

use crate::sim::Session;

/// Title screen caption
pub const TITLE_TEXT: &str = "シューティングブロック崩し";
/// Game over caption
pub const GAME_OVER_TEXT: &str = "ゲームオーバ〜💩";
/// One heart per life point
pub const LIFE_SYMBOL: char = '♥';

/// Life label: one heart per remaining life point
pub fn life_label(life_points: u8) -> String {
    std::iter::repeat_n(LIFE_SYMBOL, life_points as usize).collect()
}

/// Snapshot of everything the HUD shows during play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub lives: String,
    pub stage: String,
}

impl Hud {
    pub fn from_session(session: &Session) -> Self {
        Self {
            lives: life_label(session.life_points()),
            stage: format!("STAGE {}", session.stage()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_life_label() {
        assert_eq!(life_label(0), "");
        assert_eq!(life_label(4), "♥♥♥♥");
        assert_eq!(life_label(1).chars().count(), 1);
    }

    #[test]
    fn test_hud_from_session() {
        use crate::sim::{BlockGrid, SessionConfig};
        use rand::SeedableRng;
        use rand_pcg::Pcg32;

        let config = SessionConfig {
            life_points: 2,
            stage: 3,
            grid: BlockGrid::new(1, 1),
            ..Default::default()
        };
        let session = Session::new(config, &mut Pcg32::seed_from_u64(0));
        let hud = Hud::from_session(&session);
        assert_eq!(hud.lives, "♥♥");
        assert_eq!(hud.stage, "STAGE 3");
    }
}
