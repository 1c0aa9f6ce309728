//! Keyboard bindings
//!
//! Maps `KeyboardEvent.code` values to simulation actions so the host only
//! has to forward them.

use crate::sim::Action;

/// What a key press does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    /// Pressed in this order
    pub actions: &'static [Action],
    /// Flip the autopilot on or off
    pub toggle_autopilot: bool,
    /// Swallow the browser's default handling (page scroll, find-as-you-type)
    pub prevent_default: bool,
}

impl KeyBinding {
    const fn game(actions: &'static [Action]) -> Self {
        Self {
            actions,
            toggle_autopilot: false,
            prevent_default: true,
        }
    }
}

/// Binding for a key code, if the game uses it
pub fn key_binding(code: &str) -> Option<KeyBinding> {
    let binding = match code {
        "Space" => KeyBinding::game(&[Action::Jump, Action::Start]),
        "ArrowUp" => KeyBinding::game(&[Action::Jump]),
        "KeyD" => KeyBinding::game(&[Action::Deflect]),
        "Enter" => KeyBinding {
            prevent_default: false,
            ..KeyBinding::game(&[Action::Start])
        },
        "KeyI" => KeyBinding {
            actions: &[],
            toggle_autopilot: true,
            prevent_default: false,
        },
        _ => return None,
    };
    Some(binding)
}
