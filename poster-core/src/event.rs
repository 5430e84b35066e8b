//! Input events for canvas interaction.

use serde::{Deserialize, Serialize};

use crate::scene::NudgeDirection;
use crate::ElementId;

/// All input events the editor can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
#[allow(missing_docs)] // Enum variant fields documented at variant level
pub enum InputEvent {
    /// Pointer pressed. `handle` is the operation tag of the control under the
    /// pointer (`move`, `line-*`, `pointer-*`), absent on bare canvas.
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        handle: Option<String>,
    },

    /// Pointer moved while pressed.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the canvas; ends a gesture like a release.
    PointerLeave,

    /// Click on the canvas; selects the element under the point.
    Click { x: f64, y: f64 },

    /// An entry in the layer list was chosen.
    SelectLayer { id: ElementId },

    /// A sidebar component was dropped on the canvas. `payload` names its type.
    Drop { payload: String },

    /// Key pressed.
    Key {
        /// `KeyboardEvent.key` value, e.g. `"ArrowUp"` or `"c"`.
        key: String,
        /// Active modifier keys.
        #[serde(default)]
        modifiers: KeyModifiers,
        /// A text-input control has focus; shortcuts are suppressed.
        #[serde(default)]
        text_input_focused: bool,
    },
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    pub shift: bool,
    /// Control key pressed.
    pub ctrl: bool,
    /// Alt/Option key pressed.
    pub alt: bool,
    /// Meta/Command key pressed.
    pub meta: bool,
}

impl KeyModifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub const fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Actions keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Delete the active element.
    Delete,
    /// Move the active element one pixel.
    Nudge(NudgeDirection),
    /// Commit the active element.
    Deactivate,
    /// Copy the active element to the clipboard.
    Copy,
    /// Paste the clipboard.
    Paste,
}

impl Shortcut {
    /// Resolve a key press to an action. Returns `None` if the combination has no binding.
    #[must_use]
    pub fn resolve(key: &str, modifiers: KeyModifiers) -> Option<Self> {
        if modifiers.command() {
            return match key {
                "c" | "C" => Some(Self::Copy),
                "v" | "V" => Some(Self::Paste),
                _ => None,
            };
        }

        match key {
            "Backspace" | "Delete" => Some(Self::Delete),
            "ArrowUp" => Some(Self::Nudge(NudgeDirection::Up)),
            "ArrowDown" => Some(Self::Nudge(NudgeDirection::Down)),
            "ArrowLeft" => Some(Self::Nudge(NudgeDirection::Left)),
            "ArrowRight" => Some(Self::Nudge(NudgeDirection::Right)),
            "Escape" => Some(Self::Deactivate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CMD: KeyModifiers = KeyModifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: true,
    };

    #[test]
    fn test_resolve_plain_keys() {
        let none = KeyModifiers::default();
        assert_eq!(Shortcut::resolve("Backspace", none), Some(Shortcut::Delete));
        assert_eq!(
            Shortcut::resolve("ArrowLeft", none),
            Some(Shortcut::Nudge(NudgeDirection::Left))
        );
        assert_eq!(Shortcut::resolve("Escape", none), Some(Shortcut::Deactivate));
        assert_eq!(Shortcut::resolve("c", none), None);
    }

    #[test]
    fn test_resolve_command_combos() {
        assert_eq!(Shortcut::resolve("c", CMD), Some(Shortcut::Copy));
        let ctrl = KeyModifiers {
            ctrl: true,
            ..KeyModifiers::default()
        };
        assert_eq!(Shortcut::resolve("V", ctrl), Some(Shortcut::Paste));
        assert_eq!(Shortcut::resolve("Backspace", CMD), None);
    }

    #[test]
    fn test_event_wire_format() {
        let json = r#"{"type":"pointer_down","data":{"x":1.0,"y":2.0,"handle":"pointer-top-left"}}"#;
        let event: InputEvent = serde_json::from_str(json).expect("deserialize");
        assert_eq!(
            event,
            InputEvent::PointerDown {
                x: 1.0,
                y: 2.0,
                handle: Some("pointer-top-left".to_string()),
            }
        );

        let key: InputEvent =
            serde_json::from_str(r#"{"type":"key","data":{"key":"ArrowUp"}}"#).expect("key");
        assert!(matches!(key, InputEvent::Key { text_input_focused: false, .. }));
    }
}
