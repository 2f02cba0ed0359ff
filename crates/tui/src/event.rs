//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use rangecard_protocol::Message;

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Steps moved by `PageUp` and `PageDown`.
const PAGE_STEPS: i32 = 10;

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts a terminal event to an application message.
///
/// Returns `None` if the event is not handled.
#[must_use]
pub fn event_to_message(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) => key_to_message(*key),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        Event::Resize(width, height) => Some(Message::Resized {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

/// Converts a mouse event to an application message.
///
/// Only the left button drives the slider: press, drag and release map to
/// the three pointer messages.
#[must_use]
fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::PointerDown { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Message::PointerDrag { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Message::PointerUp { column, row }),
        _ => None,
    }
}

/// Converts a terminal key event to an application message.
///
/// Key releases are ignored, so terminals reporting them do not nudge twice.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C`, `q` or `Esc` | Quit |
/// | `Tab` or `Shift+Tab` | Switch the keyboard handle |
/// | `Up` or `Right` | Move the handle one step up |
/// | `Down` or `Left` | Move the handle one step down |
/// | `PageUp` / `PageDown` | Move the handle ten steps |
/// | `r` | Reload the configuration file |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Message::Quit),

        KeyCode::Tab | KeyCode::BackTab => Some(Message::SwitchHandle),

        KeyCode::Up | KeyCode::Right => Some(Message::Nudge { steps: 1 }),
        KeyCode::Down | KeyCode::Left => Some(Message::Nudge { steps: -1 }),
        KeyCode::PageUp => Some(Message::Nudge { steps: PAGE_STEPS }),
        KeyCode::PageDown => Some(Message::Nudge { steps: -PAGE_STEPS }),

        KeyCode::Char('r') => Some(Message::ReloadConfig),

        _ => None,
    }
}
