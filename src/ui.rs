//! HUD and overlay text
//!
//! Pure mapping from the session to what the page shows; the host applies it
//! to the DOM whenever the mode or score changes.

use crate::sim::{GameMode, GameOverReason, GameState};

/// Overlay panel configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    pub subtitle: String,
    /// Empty hides the button
    pub button_label: String,
    pub visible: bool,
    /// Celebration styling on the title
    pub win: bool,
}

impl Overlay {
    fn shown(title: &str, subtitle: &str, button_label: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            button_label: button_label.to_string(),
            visible: true,
            win: false,
        }
    }

    fn hidden() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            button_label: String::new(),
            visible: false,
            win: false,
        }
    }
}

/// Live counter text
pub fn score_text(state: &GameState) -> String {
    format!("Obstacles cleared: {}/{}", state.cleared, state.total())
}

/// Controls hint for the title screen
pub fn controls_hint(state: &GameState) -> String {
    if state.config.has_deflect_action {
        "Space/↑ to jump • D to deflect crows".to_string()
    } else {
        "Space/↑ to jump".to_string()
    }
}

/// Game-over flavor text
pub fn reason_text(reason: GameOverReason) -> &'static str {
    match reason {
        GameOverReason::Caught => "Pica by a crow.",
        GameOverReason::Bonk => "Ate too much cheese.",
    }
}

/// Overlay for the current mode
pub fn overlay_for(state: &GameState) -> Overlay {
    match state.mode {
        GameMode::Start => Overlay::shown("Press Space to start", &controls_hint(state), ""),
        GameMode::Running | GameMode::Finish => Overlay::hidden(),
        GameMode::GameOver { reason } => Overlay::shown("Game over", reason_text(reason), "Try again"),
        GameMode::Win => Overlay {
            win: true,
            ..Overlay::shown("Feliz Cumpleaños Quokka. I love you", "", "Play again")
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Variant};
    use crate::sim::{Action, apply_action};

    #[test]
    fn test_score_text() {
        let mut state = GameState::new(1, GameConfig::default());
        assert_eq!(score_text(&state), "Obstacles cleared: 0/10");
        state.cleared = 3;
        assert_eq!(score_text(&state), "Obstacles cleared: 3/10");
    }

    #[test]
    fn test_title_overlay_lists_controls() {
        let state = GameState::new(1, GameConfig::default());
        let overlay = overlay_for(&state);
        assert!(overlay.visible);
        assert!(overlay.button_label.is_empty());
        assert!(overlay.subtitle.contains("deflect"));

        let state = GameState::new(1, Variant::JumpOnly.config());
        assert_eq!(overlay_for(&state).subtitle, "Space/↑ to jump");
    }

    #[test]
    fn test_running_hides_overlay() {
        let mut state = GameState::new(1, GameConfig::default());
        apply_action(&mut state, Action::Start);
        let overlay = overlay_for(&state);
        assert!(!overlay.visible);
        assert!(overlay.title.is_empty());
    }

    #[test]
    fn test_game_over_reason_text() {
        let mut state = GameState::new(1, GameConfig::default());
        state.mode = GameMode::GameOver {
            reason: GameOverReason::Caught,
        };
        let overlay = overlay_for(&state);
        assert_eq!(overlay.title, "Game over");
        assert_eq!(overlay.subtitle, "Pica by a crow.");
        assert_eq!(overlay.button_label, "Try again");
        assert!(!overlay.win);

        state.mode = GameMode::GameOver {
            reason: GameOverReason::Bonk,
        };
        assert_eq!(overlay_for(&state).subtitle, "Ate too much cheese.");
    }

    #[test]
    fn test_win_overlay() {
        let mut state = GameState::new(1, GameConfig::default());
        state.mode = GameMode::Win;
        let overlay = overlay_for(&state);
        assert!(overlay.win);
        assert!(overlay.visible);
        assert_eq!(overlay.button_label, "Play again");
    }
}
