//! The drag-capable range control.
//!
//! [`RangeSlider`] is the interactive state behind the track: two step-snapped
//! values, the handle that keyboard input moves, and the screen area the
//! track was last drawn in. Pointer and keyboard input is translated into
//! [`ControlEvent`]s; the card controller decides what to do with them.
//!
//! A vertical track runs bottom to top, so the lower value sits below the
//! upper one.

use rangecard_config::RangeConfig;
use rangecard_protocol::{ControlEvent, Handle, Orientation};
use ratatui::layout::Rect;

/// Extra columns (vertical) or rows (horizontal) on each side of the track
/// that still grab a handle.
pub const HIT_SLOP: u16 = 2;

/// Interactive state of the two-handle range control.
///
/// # Examples
///
/// ```
/// use rangecard_config::RangeConfig;
/// use rangecard_protocol::{ControlEvent, Orientation};
/// use rangecard_tui::widgets::RangeSlider;
/// use ratatui::layout::Rect;
///
/// let mut slider = RangeSlider::new(RangeConfig::default(), Orientation::Horizontal);
/// slider.set_track_area(Rect::new(0, 0, 101, 1));
/// slider.set_values([20.0, 80.0]);
///
/// let events = slider.pointer_down(30, 0);
/// assert_eq!(events, vec![ControlEvent::GestureStart, ControlEvent::LiveUpdate([30.0, 80.0])]);
/// assert_eq!(slider.pointer_up(), Some(ControlEvent::GestureEnd([30.0, 80.0])));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSlider {
    range: RangeConfig,
    orientation: Orientation,
    values: [f64; 2],
    active: Handle,
    dragging: bool,
    track: Rect,
}

impl RangeSlider {
    /// Creates a slider spanning the whole range.
    #[must_use]
    pub fn new(range: RangeConfig, orientation: Orientation) -> Self {
        Self {
            range,
            orientation,
            values: [range.min, range.max],
            active: Handle::Low,
            dragging: false,
            track: Rect::default(),
        }
    }

    /// Returns the slider's range.
    #[must_use]
    pub fn range(&self) -> &RangeConfig {
        &self.range
    }

    /// Returns the slider's orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the `[low, high]` values.
    #[must_use]
    pub fn values(&self) -> [f64; 2] {
        self.values
    }

    /// Returns the handle moved by keyboard input.
    #[must_use]
    pub fn active_handle(&self) -> Handle {
        self.active
    }

    /// Returns `true` between a pointer press and its release.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns the area the track was last drawn in.
    #[must_use]
    pub fn track_area(&self) -> Rect {
        self.track
    }

    /// Records where the track is drawn, for hit testing.
    pub fn set_track_area(&mut self, area: Rect) {
        self.track = area;
    }

    /// Replaces both values. They are ordered, clamped and snapped.
    pub fn set_values(&mut self, values: [f64; 2]) {
        let [a, b] = values;
        self.values = [self.range.snap(a.min(b)), self.range.snap(a.max(b))];
    }

    /// Makes the other handle the keyboard target. Ignored while dragging.
    pub fn switch_handle(&mut self) {
        if !self.dragging {
            self.active = self.active.other();
        }
    }

    /// Starts a gesture if `(column, row)` hits the track.
    ///
    /// The handle nearest to the pressed position jumps there. Returns the
    /// `GestureStart` and first `LiveUpdate` events, or nothing on a miss.
    pub fn pointer_down(&mut self, column: u16, row: u16) -> Vec<ControlEvent> {
        if self.dragging || !self.hits(column, row) {
            return Vec::new();
        }
        let Some(value) = self.value_at(column, row) else {
            return Vec::new();
        };

        self.active = self.nearest_handle(value);
        self.dragging = true;
        self.move_handle(self.active, value);
        vec![
            ControlEvent::GestureStart,
            ControlEvent::LiveUpdate(self.values),
        ]
    }

    /// Moves the grabbed handle towards `(column, row)`.
    ///
    /// Positions past either end of the track pin the handle to that end.
    /// Returns a `LiveUpdate` only when the value changed.
    pub fn pointer_drag(&mut self, column: u16, row: u16) -> Option<ControlEvent> {
        if !self.dragging {
            return None;
        }
        let value = self.value_at(column, row)?;
        self.move_handle(self.active, value)
            .then_some(ControlEvent::LiveUpdate(self.values))
    }

    /// Ends the gesture, committing the current values.
    pub fn pointer_up(&mut self) -> Option<ControlEvent> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        Some(ControlEvent::GestureEnd(self.values))
    }

    /// Moves the active handle by `steps` steps as one complete gesture.
    ///
    /// Returns nothing while a pointer gesture is in progress or when the
    /// handle cannot move.
    pub fn nudge(&mut self, steps: i32) -> Vec<ControlEvent> {
        if self.dragging || steps == 0 {
            return Vec::new();
        }
        let target = self.values[self.active.index()] + f64::from(steps) * self.range.step;
        if !self.move_handle(self.active, target) {
            return Vec::new();
        }
        vec![
            ControlEvent::GestureStart,
            ControlEvent::LiveUpdate(self.values),
            ControlEvent::GestureEnd(self.values),
        ]
    }

    /// Returns the cell offset of `value` along the track, from its start
    /// (bottom for vertical, left for horizontal).
    #[must_use]
    pub fn position_of(&self, value: f64) -> u16 {
        let len = self.track_len();
        if len <= 1 {
            return 0;
        }
        let fraction = ((value - self.range.min) / self.range.span()).clamp(0.0, 1.0);
        (fraction * f64::from(len - 1)).round() as u16
    }

    /// Returns the snapped value under `(column, row)`, projected onto the
    /// track. `None` when the track has not been drawn.
    #[must_use]
    pub fn value_at(&self, column: u16, row: u16) -> Option<f64> {
        let len = self.track_len();
        if len == 0 {
            return None;
        }
        let offset = match self.orientation {
            Orientation::Vertical => {
                let bottom = self.track.bottom() - 1;
                bottom - row.clamp(self.track.y, bottom)
            }
            Orientation::Horizontal => {
                column.clamp(self.track.x, self.track.right() - 1) - self.track.x
            }
        };
        if len == 1 {
            return Some(self.range.min);
        }
        let fraction = f64::from(offset) / f64::from(len - 1);
        Some(self.range.snap(self.range.min + fraction * self.range.span()))
    }

    fn track_len(&self) -> u16 {
        match self.orientation {
            Orientation::Vertical if self.track.width > 0 => self.track.height,
            Orientation::Horizontal if self.track.height > 0 => self.track.width,
            _ => 0,
        }
    }

    fn hits(&self, column: u16, row: u16) -> bool {
        if self.track_len() == 0 {
            return false;
        }
        let t = self.track;
        match self.orientation {
            Orientation::Vertical => {
                (t.y..t.bottom()).contains(&row)
                    && (t.x.saturating_sub(HIT_SLOP)..t.right().saturating_add(HIT_SLOP))
                        .contains(&column)
            }
            Orientation::Horizontal => {
                (t.x..t.right()).contains(&column)
                    && (t.y.saturating_sub(HIT_SLOP)..t.bottom().saturating_add(HIT_SLOP))
                        .contains(&row)
            }
        }
    }

    fn nearest_handle(&self, value: f64) -> Handle {
        let [low, high] = self.values;
        if low == high {
            // Stacked handles: pick the one that can move towards the press.
            return if value > high || (value == high && high < self.range.max) {
                Handle::High
            } else {
                Handle::Low
            };
        }
        if value <= low {
            Handle::Low
        } else if value >= high || high - value < value - low {
            Handle::High
        } else {
            Handle::Low
        }
    }

    /// Moves `handle` to `value`, snapped and kept on its side of the other
    /// handle. Returns `true` if the value changed.
    fn move_handle(&mut self, handle: Handle, value: f64) -> bool {
        let [low, high] = self.values;
        let snapped = self.range.snap(value);
        let bounded = match handle {
            Handle::Low => snapped.min(high),
            Handle::High => snapped.max(low),
        };
        let slot = &mut self.values[handle.index()];
        let changed = *slot != bounded;
        *slot = bounded;
        changed
    }
}
