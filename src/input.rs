//! Input events: a canonical string vocabulary over raw terminal events.
//!
//! Keys are lowercase names (`"k"`, `"enter"`, `"ctrl+c"`, `"page up"`,
//! `"shift+tab"`); mouse buttons are `"left mouse"`, `"right mouse"`,
//! `"middle mouse"`, `"mouse wheel up"`, `"mouse wheel down"`. Unknown
//! strings simply map to no action.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};

use crate::geometry::Coordinate;
use crate::nav::NavAction;

/// One frame's worth of decoded terminal input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputEvent {
    pub key: Option<String>,
    pub mouse_button: Option<String>,
    pub mouse_position: Option<Coordinate>,
}

impl InputEvent {
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            key: Some(name.into()),
            ..Self::default()
        }
    }

    /// The default key map: vi keys and arrows move, enter, space, and a
    /// left click select.
    pub fn default_action(&self) -> Option<NavAction> {
        if let Some(key) = self.key.as_deref() {
            let action = match key {
                "h" | "left" => Some(NavAction::Left),
                "j" | "down" => Some(NavAction::Down),
                "k" | "up" => Some(NavAction::Up),
                "l" | "right" => Some(NavAction::Right),
                "enter" | "space" => Some(NavAction::Select),
                _ => None,
            };
            if action.is_some() {
                return action;
            }
        }
        match self.mouse_button.as_deref() {
            Some("left mouse") => Some(NavAction::Select),
            _ => None,
        }
    }

    /// Normalise a raw crossterm event into the canonical vocabulary.
    pub fn from_crossterm(event: &Event) -> Self {
        match event {
            Event::Key(key) => Self {
                key: key_name(key),
                ..Self::default()
            },
            Event::Mouse(mouse) => {
                let button = match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => Some("left mouse"),
                    MouseEventKind::Down(MouseButton::Right) => Some("right mouse"),
                    MouseEventKind::Down(MouseButton::Middle) => Some("middle mouse"),
                    MouseEventKind::ScrollUp => Some("mouse wheel up"),
                    MouseEventKind::ScrollDown => Some("mouse wheel down"),
                    _ => None,
                };
                Self {
                    key: None,
                    mouse_button: button.map(str::to_string),
                    mouse_position: Some(Coordinate::new(
                        i32::from(mouse.column),
                        i32::from(mouse.row),
                    )),
                }
            }
            _ => Self::default(),
        }
    }
}

fn key_name(key: &KeyEvent) -> Option<String> {
    let base = match key.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_lowercase().to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => return Some("shift+tab".to_string()),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "page up".to_string(),
        KeyCode::PageDown => "page down".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::F(n) => format!("f{n}"),
        _ => return None,
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        Some(format!("ctrl+{base}"))
    } else if key.modifiers.contains(KeyModifiers::ALT) {
        Some(format!("alt+{base}"))
    } else {
        Some(base)
    }
}

// =============================================================================
// Tests
// =============================================================================
