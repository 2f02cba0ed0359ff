//! Contracts for the two external value holders and the range control.
//!
//! The card reads its two values through a [`ValueSource`] and writes user
//! changes back through a [`ValueSink`]. The drag-capable range control
//! reports user interaction as [`ControlEvent`]s.

use serde::{Deserialize, Serialize};

/// Looks up the current value of an external entity.
pub trait ValueSource {
    /// Returns the entity's current value, or `None` if it is not found.
    fn lookup(&self, id: &str) -> Option<f64>;
}

/// Requests updates of external entities.
///
/// Writes are fire-and-forget: there is no acknowledgement, the new value
/// shows up through the [`ValueSource`] whenever the holder applies it.
pub trait ValueSink {
    /// Requests that `id` be set to `value`.
    fn set_value(&self, id: &str, value: f64);
}

impl<T: ValueSource + ?Sized> ValueSource for &T {
    fn lookup(&self, id: &str) -> Option<f64> {
        (**self).lookup(id)
    }
}

impl<T: ValueSink + ?Sized> ValueSink for &T {
    fn set_value(&self, id: &str, value: f64) {
        (**self).set_value(id, value);
    }
}

/// One of the two slider handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    /// The handle bound to the lower value.
    #[default]
    Low,
    /// The handle bound to the upper value.
    High,
}

impl Handle {
    /// Returns the other handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_protocol::Handle;
    ///
    /// assert_eq!(Handle::Low.other(), Handle::High);
    /// assert_eq!(Handle::High.other(), Handle::Low);
    /// ```
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }

    /// Returns the index of this handle's value in a `[low, high]` pair.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }
}

/// Events emitted by the drag-capable range control.
///
/// A gesture is always `GestureStart`, any number of `LiveUpdate`s, then
/// `GestureEnd`. Values are `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlEvent {
    /// The user grabbed a handle.
    GestureStart,
    /// The handles moved during a gesture.
    LiveUpdate([f64; 2]),
    /// The user released the handle; these are the committed values.
    GestureEnd([f64; 2]),
}

impl ControlEvent {
    /// Returns the values carried by this event, if any.
    #[must_use]
    pub fn values(&self) -> Option<[f64; 2]> {
        match self {
            Self::GestureStart => None,
            Self::LiveUpdate(values) | Self::GestureEnd(values) => Some(*values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl ValueSource for Fixed {
        fn lookup(&self, id: &str) -> Option<f64> {
            (id == "known").then_some(self.0)
        }
    }

    #[test]
    fn reference_forwards_lookup() {
        let source = Fixed(4.5);
        let by_ref: &dyn ValueSource = &source;
        assert_eq!(by_ref.lookup("known"), Some(4.5));
        assert_eq!((&source).lookup("unknown"), None);
    }

    #[test]
    fn handle_index_matches_pair_order() {
        let pair = [1.0, 2.0];
        assert_eq!(pair[Handle::Low.index()], 1.0);
        assert_eq!(pair[Handle::High.index()], 2.0);
    }

    #[test]
    fn control_event_values() {
        assert_eq!(ControlEvent::GestureStart.values(), None);
        assert_eq!(
            ControlEvent::LiveUpdate([1.0, 2.0]).values(),
            Some([1.0, 2.0])
        );
        assert_eq!(
            ControlEvent::GestureEnd([3.0, 4.0]).values(),
            Some([3.0, 4.0])
        );
    }
}
