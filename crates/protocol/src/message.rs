//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the input handler, background tasks, and the application state.

use serde::{Deserialize, Serialize};

/// Messages that drive the card application.
///
/// Some messages come from the terminal (keys, mouse, resize), others from
/// background tasks (store notifications and the debounced refresh).
///
/// # Examples
///
/// ```
/// use rangecard_protocol::Message;
///
/// let msg = Message::Nudge { steps: 1 };
/// assert!(msg.is_control_input());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Quit the application.
    Quit,
    /// The terminal was resized.
    Resized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
    /// Re-read the configuration file.
    ReloadConfig,
    /// One of the bound entities changed upstream.
    StatesChanged,
    /// Debounced re-render with fresh values.
    Refresh,
    /// Pointer pressed at coordinates (column, row).
    PointerDown {
        /// Column (x coordinate) of the press.
        column: u16,
        /// Row (y coordinate) of the press.
        row: u16,
    },
    /// Pointer moved with the button held.
    PointerDrag {
        /// Column (x coordinate) of the pointer.
        column: u16,
        /// Row (y coordinate) of the pointer.
        row: u16,
    },
    /// Pointer released.
    PointerUp {
        /// Column (x coordinate) of the release.
        column: u16,
        /// Row (y coordinate) of the release.
        row: u16,
    },
    /// Make the other handle the keyboard target.
    SwitchHandle,
    /// Move the keyboard-targeted handle by a number of steps.
    Nudge {
        /// Steps to move (positive = towards the range max).
        steps: i32,
    },
}

impl Message {
    /// Returns `true` if this message drives the range control.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_protocol::Message;
    ///
    /// assert!(Message::PointerDown { column: 0, row: 0 }.is_control_input());
    /// assert!(!Message::Refresh.is_control_input());
    /// ```
    #[must_use]
    pub fn is_control_input(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. }
                | Self::PointerDrag { .. }
                | Self::PointerUp { .. }
                | Self::SwitchHandle
                | Self::Nudge { .. }
        )
    }

    /// Returns `true` if this message should terminate the application.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_protocol::Message;
    ///
    /// assert!(Message::Quit.is_terminating());
    /// assert!(!Message::StatesChanged.is_terminating());
    /// ```
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_inputs() {
        assert!(Message::PointerDrag { column: 1, row: 2 }.is_control_input());
        assert!(Message::PointerUp { column: 1, row: 2 }.is_control_input());
        assert!(Message::SwitchHandle.is_control_input());
        assert!(Message::Nudge { steps: -1 }.is_control_input());

        assert!(!Message::Quit.is_control_input());
        assert!(!Message::StatesChanged.is_control_input());
        assert!(!Message::Resized { width: 80, height: 24 }.is_control_input());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Message::StatesChanged).unwrap();
        assert_eq!(json, r#""states_changed""#);

        let json = serde_json::to_string(&Message::Nudge { steps: 2 }).unwrap();
        assert_eq!(json, r#"{"nudge":{"steps":2}}"#);
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_message() -> impl Strategy<Value = Message> {
        prop_oneof![
            Just(Message::Quit),
            Just(Message::ReloadConfig),
            Just(Message::StatesChanged),
            Just(Message::Refresh),
            Just(Message::SwitchHandle),
            (any::<u16>(), any::<u16>())
                .prop_map(|(width, height)| Message::Resized { width, height }),
            (any::<u16>(), any::<u16>())
                .prop_map(|(column, row)| Message::PointerDown { column, row }),
            any::<i32>().prop_map(|steps| Message::Nudge { steps }),
        ]
    }

    proptest! {
        /// Messages survive a JSON roundtrip unchanged.
        #[test]
        fn message_roundtrip(msg in arb_message()) {
            let json = serde_json::to_string(&msg).expect("serialize");
            let parsed: Message = serde_json::from_str(&json).expect("deserialize");
            prop_assert_eq!(msg, parsed);
        }
    }
}
