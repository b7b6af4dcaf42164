//! Discrete button interactions reported by switch sensors.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// What happened to a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ButtonEventKind {
    Press,
    Hold,
    Release,
}

/// A debounced button interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonEvent {
    pub button: u16,
    pub kind: ButtonEventKind,
}

impl ButtonEvent {
    pub fn press(button: u16) -> Self {
        ButtonEvent {
            button,
            kind: ButtonEventKind::Press,
        }
    }

    pub fn hold(button: u16) -> Self {
        ButtonEvent {
            button,
            kind: ButtonEventKind::Hold,
        }
    }

    pub fn release(button: u16) -> Self {
        ButtonEvent {
            button,
            kind: ButtonEventKind::Release,
        }
    }
}
