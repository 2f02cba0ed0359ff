//! The card controller.
//!
//! A [`SliderCard`] is one instance of the widget. It owns the normalized
//! configuration, the values on display, the range control, and the result
//! of the previous layout pass, which is what lets the next pass recognize a
//! measurement of its own pinned box.

use rangecard_config::{CardConfig, RawCardConfig, Result, normalize};
use rangecard_layout::compute_layout;
use rangecard_protocol::{
    ControlEvent, LayoutResult, LayoutTuning, MeasuredGeometry, ValueSink, ValueSource,
};
use tracing::{debug, instrument};

use crate::widgets::RangeSlider;

/// Outcome of [`SliderCard::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fresh values are on display.
    Updated,
    /// A gesture is in progress; the refresh runs when it ends.
    Deferred,
    /// At least one bound entity does not exist yet.
    EntitiesNotFound,
}

/// One card instance.
///
/// # Examples
///
/// ```
/// use rangecard_config::RawCardConfig;
/// use rangecard_protocol::MemoryStore;
/// use rangecard_tui::card::{RefreshOutcome, SliderCard};
///
/// let raw = RawCardConfig::new()
///     .with("entity_min", "input_number.low")
///     .with("entity_max", "input_number.high");
/// let mut card = SliderCard::from_raw(&raw)?;
///
/// let store = MemoryStore::with_values([("input_number.low", 20.0)]);
/// assert_eq!(card.refresh(&store), RefreshOutcome::EntitiesNotFound);
///
/// store.insert("input_number.high", 80.0);
/// assert_eq!(card.refresh(&store), RefreshOutcome::Updated);
/// assert_eq!(card.values(), Some([20.0, 80.0]));
/// # Ok::<(), rangecard_config::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SliderCard {
    config: CardConfig,
    values: Option<[f64; 2]>,
    slider: RangeSlider,
    previous: Option<LayoutResult>,
    dragging: bool,
    refresh_deferred: bool,
}

impl SliderCard {
    /// Creates a card from a normalized configuration.
    #[must_use]
    pub fn new(config: CardConfig) -> Self {
        let slider = RangeSlider::new(config.range, config.layout.orientation);
        Self {
            config,
            values: None,
            slider,
            previous: None,
            dragging: false,
            refresh_deferred: false,
        }
    }

    /// Creates a card from a raw configuration.
    ///
    /// # Errors
    ///
    /// Returns [`rangecard_config::ConfigError::MissingEntities`] if either
    /// entity is missing.
    pub fn from_raw(raw: &RawCardConfig) -> Result<Self> {
        Ok(Self::new(normalize(raw)?))
    }

    /// Replaces the configuration.
    ///
    /// The previous layout result is discarded: it belongs to the old
    /// configuration. Displayed values are kept until the next refresh.
    ///
    /// # Errors
    ///
    /// Returns [`rangecard_config::ConfigError::MissingEntities`] if either
    /// entity is missing; the card is left unchanged.
    pub fn set_config(&mut self, raw: &RawCardConfig) -> Result<()> {
        let config = normalize(raw)?;
        debug!(layout = ?config.layout, "card configuration replaced");

        let mut slider = RangeSlider::new(config.range, config.layout.orientation);
        if let Some(values) = self.values {
            slider.set_values(values);
        }
        self.slider = slider;
        self.config = config;
        self.previous = None;
        self.dragging = false;
        self.refresh_deferred = false;
        Ok(())
    }

    /// Returns the normalized configuration.
    #[must_use]
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Returns the `[low, high]` values on display, if both entities exist.
    #[must_use]
    pub fn values(&self) -> Option<[f64; 2]> {
        self.values
    }

    /// Returns the result of the last layout pass.
    #[must_use]
    pub fn layout(&self) -> Option<&LayoutResult> {
        self.previous.as_ref()
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns `true` if a refresh was skipped during the current gesture.
    #[must_use]
    pub fn has_deferred_refresh(&self) -> bool {
        self.refresh_deferred
    }

    /// Returns the range control.
    #[must_use]
    pub fn slider(&self) -> &RangeSlider {
        &self.slider
    }

    /// Returns the range control for input handling.
    pub fn slider_mut(&mut self) -> &mut RangeSlider {
        &mut self.slider
    }

    /// Reads both values from `source`.
    ///
    /// During a gesture the refresh is skipped and remembered, so the user's
    /// drag is not overwritten by stale upstream values.
    #[instrument(level = "debug", skip_all, fields(entities = ?self.config.entities()))]
    pub fn refresh(&mut self, source: &impl ValueSource) -> RefreshOutcome {
        if self.dragging {
            self.refresh_deferred = true;
            debug!("refresh deferred until the gesture ends");
            return RefreshOutcome::Deferred;
        }
        self.refresh_deferred = false;

        let [low_id, high_id] = self.config.entities();
        match (source.lookup(low_id), source.lookup(high_id)) {
            (Some(low), Some(high)) => {
                self.slider.set_values([low, high]);
                self.values = Some([low, high]);
                RefreshOutcome::Updated
            }
            _ => {
                self.values = None;
                debug!("entities not found");
                RefreshOutcome::EntitiesNotFound
            }
        }
    }

    /// Applies an event from the range control.
    ///
    /// At the end of a gesture both values are written to `sink` without
    /// waiting for confirmation. Returns `true` when a refresh was deferred
    /// during the gesture and is now due.
    pub fn handle_control_event(&mut self, event: ControlEvent, sink: &impl ValueSink) -> bool {
        match event {
            ControlEvent::GestureStart => {
                self.dragging = true;
                false
            }
            ControlEvent::LiveUpdate(values) => {
                self.values = Some(values);
                false
            }
            ControlEvent::GestureEnd(values) => {
                self.dragging = false;
                self.values = Some(values);
                let [low_id, high_id] = self.config.entities();
                sink.set_value(low_id, values[0]);
                sink.set_value(high_id, values[1]);
                debug!(?values, "values committed");
                std::mem::take(&mut self.refresh_deferred)
            }
        }
    }

    /// Runs a layout pass and remembers its result for the next one.
    pub fn relayout(
        &mut self,
        geometry: Option<&MeasuredGeometry>,
        tuning: &LayoutTuning,
    ) -> Option<LayoutResult> {
        let result = compute_layout(
            &self.config.layout,
            geometry,
            self.previous.as_ref(),
            tuning,
        );
        if result != self.previous {
            debug!(previous = ?self.previous, ?result, "layout changed");
        }
        self.previous = result;
        result
    }

    /// Forgets the pinned height of the previous pass, so the next pass
    /// judges the host box on its own.
    pub fn release_pin(&mut self) {
        if let Some(previous) = &mut self.previous {
            previous.forced_container_height_px = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangecard_config::ConfigError;
    use rangecard_protocol::{MemoryStore, Orientation};

    const LOW: &str = "input_number.low";
    const HIGH: &str = "input_number.high";

    fn raw() -> RawCardConfig {
        RawCardConfig::new()
            .with("entity_min", LOW)
            .with("entity_max", HIGH)
    }

    fn vertical_card() -> SliderCard {
        SliderCard::from_raw(&raw().with("orientation", "vertical")).unwrap()
    }

    fn store() -> MemoryStore {
        MemoryStore::with_values([(LOW, 20.0), (HIGH, 80.0)])
    }

    #[test]
    fn missing_entities_are_fatal() {
        let err = SliderCard::from_raw(&RawCardConfig::new().with("entity_min", LOW)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEntities));
    }

    #[test]
    fn refresh_reads_both_values() {
        let mut card = vertical_card();
        assert_eq!(card.refresh(&store()), RefreshOutcome::Updated);
        assert_eq!(card.values(), Some([20.0, 80.0]));
        assert_eq!(card.slider().values(), [20.0, 80.0]);
    }

    #[test]
    fn refresh_is_deferred_during_a_gesture() {
        let mut card = vertical_card();
        let store = store();
        card.refresh(&store);

        card.handle_control_event(ControlEvent::GestureStart, &store);
        card.handle_control_event(ControlEvent::LiveUpdate([30.0, 80.0]), &store);
        store.insert(LOW, 5.0);
        assert_eq!(card.refresh(&store), RefreshOutcome::Deferred);
        assert_eq!(card.values(), Some([30.0, 80.0]));
        assert!(card.has_deferred_refresh());

        let due = card.handle_control_event(ControlEvent::GestureEnd([30.0, 80.0]), &store);
        assert!(due);
        assert!(!card.has_deferred_refresh());
    }

    #[test]
    fn gesture_end_writes_both_values() {
        let mut card = vertical_card();
        let store = store();
        card.handle_control_event(ControlEvent::GestureStart, &store);
        let due = card.handle_control_event(ControlEvent::GestureEnd([25.0, 75.0]), &store);

        assert!(!due);
        assert!(!card.is_dragging());
        assert_eq!(store.lookup(LOW), Some(25.0));
        assert_eq!(store.lookup(HIGH), Some(75.0));
    }

    #[test]
    fn set_config_discards_previous_layout() {
        let mut card = vertical_card();
        let tuning = LayoutTuning::default();
        card.relayout(Some(&MeasuredGeometry::new(0.0, 50.0)), &tuning);
        assert!(card.layout().is_some());

        card.set_config(&raw().with("orientation", "vertical")).unwrap();
        assert!(card.layout().is_none());
    }

    #[test]
    fn failed_set_config_keeps_the_card() {
        let mut card = vertical_card();
        assert!(card.set_config(&RawCardConfig::new()).is_err());
        assert_eq!(card.config().layout.orientation, Orientation::Vertical);
    }

    #[test]
    fn set_config_keeps_values_inside_the_new_range() {
        let mut card = vertical_card();
        card.refresh(&store());
        card.set_config(&raw().with("max", 50)).unwrap();
        assert_eq!(card.slider().values(), [20.0, 50.0]);
        assert_eq!(card.slider().orientation(), Orientation::Horizontal);
    }

    #[test]
    fn relayout_converges_on_the_pinned_box() {
        let mut card = vertical_card();
        let tuning = LayoutTuning::default();

        let first = card
            .relayout(Some(&MeasuredGeometry::new(0.0, 50.0)), &tuning)
            .unwrap();
        assert_eq!(first.forced_container_height_px, Some(350));

        let second = card
            .relayout(Some(&MeasuredGeometry::new(350.0, 50.0)), &tuning)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn release_pin_lets_a_real_host_take_over() {
        let mut card = vertical_card();
        let tuning = LayoutTuning::default();
        card.relayout(Some(&MeasuredGeometry::new(0.0, 50.0)), &tuning);

        // Without releasing, a 350px host still reads as the card's own pin.
        card.release_pin();
        let result = card
            .relayout(Some(&MeasuredGeometry::new(350.0, 50.0)), &tuning)
            .unwrap();
        assert_eq!(result.forced_container_height_px, None);
        assert_eq!(result.track_height_px, 276);
    }

    #[test]
    fn horizontal_card_has_no_layout() {
        let mut card = SliderCard::from_raw(&raw()).unwrap();
        let result = card.relayout(
            Some(&MeasuredGeometry::new(500.0, 50.0)),
            &LayoutTuning::default(),
        );
        assert_eq!(result, None);
        assert!(card.layout().is_none());
    }
}
