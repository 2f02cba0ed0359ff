//! Main application struct and run loop.
//!
//! The [`App`] owns one card, the value store it is bound to, and the
//! channel on which background work (store notifications, the debounced
//! refresh) reports back to the loop.

use std::path::PathBuf;

use rangecard_config::{Config, persistence::find_config_file};
use rangecard_protocol::{ControlEvent, MemoryStore, Message};
use ratatui::Frame;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::{
    card::SliderCard,
    debounce::Debouncer,
    event::{event_to_message, poll_event},
    layout::{MIN_HEIGHT, MIN_WIDTH, card_area, card_rows, measure_host},
    terminal::AppTerminal,
    theme::Theme,
    widgets::{card_regions, render_card, render_error_notice, render_too_small},
};

/// The main application struct.
#[derive(Debug)]
pub struct App {
    config: Config,
    /// File re-read on `ReloadConfig`; searched for when unset.
    config_path: Option<PathBuf>,
    card: Option<SliderCard>,
    /// Shown instead of the card when it cannot be built.
    config_error: Option<String>,
    theme: Theme,
    store: MemoryStore,
    tx: UnboundedSender<Message>,
    rx: UnboundedReceiver<Message>,
    debouncer: Debouncer,
    should_quit: bool,
}

impl App {
    /// Creates an application showing the card of `config`, bound to
    /// `store`.
    ///
    /// Changes written to the store are reported back to the app and
    /// trigger a debounced refresh.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_config::{Config, RawCardConfig};
    /// use rangecard_protocol::MemoryStore;
    /// use rangecard_tui::App;
    ///
    /// let config = Config {
    ///     card: RawCardConfig::new()
    ///         .with("entity_min", "input_number.low")
    ///         .with("entity_max", "input_number.high"),
    ///     ..Default::default()
    /// };
    /// let store = MemoryStore::with_values([
    ///     ("input_number.low", 20.0),
    ///     ("input_number.high", 80.0),
    /// ]);
    ///
    /// let app = App::new(config, store);
    /// assert_eq!(app.card().and_then(|card| card.values()), Some([20.0, 80.0]));
    /// ```
    #[must_use]
    pub fn new(config: Config, store: MemoryStore) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let listener_tx = tx.clone();
        store.set_listener(move |id, value| {
            debug!(id, value, "state changed");
            let _ = listener_tx.send(Message::StatesChanged);
        });

        let mut app = Self {
            debouncer: Debouncer::new(config.debounce(), tx.clone()),
            config: Config::default(),
            config_path: None,
            card: None,
            config_error: None,
            theme: Theme::default(),
            store,
            tx,
            rx,
            should_quit: false,
        };
        app.apply_config(config);
        app
    }

    /// Sets the file re-read on `ReloadConfig`.
    #[must_use]
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Returns the application configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the card, unless its configuration is invalid.
    #[must_use]
    pub fn card(&self) -> Option<&SliderCard> {
        self.card.as_ref()
    }

    /// Returns the configuration error shown instead of the card.
    #[must_use]
    pub fn config_error(&self) -> Option<&str> {
        self.config_error.as_deref()
    }

    /// Returns the value store the card is bound to.
    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Returns a sender for injecting messages into the loop.
    #[must_use]
    pub fn sender(&self) -> UnboundedSender<Message> {
        self.tx.clone()
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Updates the application state based on a message.
    pub fn update(&mut self, msg: Message) {
        match msg {
            Message::Quit => {
                self.should_quit = true;
            }
            Message::Resized { width, height } => {
                debug!(width, height, "terminal resized");
                if let Some(card) = &mut self.card {
                    card.release_pin();
                }
            }
            Message::ReloadConfig => self.reload_config(),
            Message::StatesChanged => {
                self.debouncer.schedule(Message::Refresh);
            }
            Message::Refresh => {
                if let Some(card) = &mut self.card {
                    card.refresh(&self.store);
                }
            }
            Message::PointerDown { .. }
            | Message::PointerDrag { .. }
            | Message::PointerUp { .. }
            | Message::SwitchHandle
            | Message::Nudge { .. } => self.handle_control_input(msg),
        }
    }

    /// Handles every message queued by background work.
    pub fn process_pending(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.update(msg);
        }
    }

    /// Replaces the configuration and rebuilds the card.
    ///
    /// An invalid card replaces the card with an error notice.
    fn apply_config(&mut self, config: Config) {
        self.debouncer.set_window(config.debounce());

        let result = match self.card.as_mut() {
            Some(card) => card.set_config(&config.card),
            None => SliderCard::from_raw(&config.card).map(|card| {
                self.card = Some(card);
            }),
        };

        match result {
            Ok(()) => {
                self.config_error = None;
                if let Some(card) = &mut self.card {
                    self.theme = Theme::from_colors(&card.config().style.colors);
                    card.refresh(&self.store);
                }
            }
            Err(err) => {
                warn!(error = %err, "card configuration rejected");
                self.card = None;
                self.config_error = Some(err.to_string());
            }
        }
        self.config = config;
    }

    fn reload_config(&mut self) {
        let Some(path) = self.config_path.clone().or_else(find_config_file) else {
            debug!("no config file to reload");
            return;
        };
        match Config::load_from(&path) {
            Ok(config) => {
                info!(path = %path.display(), "configuration reloaded");
                self.apply_config(config);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to reload configuration");
            }
        }
    }

    fn handle_control_input(&mut self, msg: Message) {
        let Some(card) = &mut self.card else {
            return;
        };
        if card.values().is_none() {
            return;
        }

        let slider = card.slider_mut();
        let events: Vec<ControlEvent> = match msg {
            Message::PointerDown { column, row } => slider.pointer_down(column, row),
            Message::PointerDrag { column, row } => {
                slider.pointer_drag(column, row).into_iter().collect()
            }
            Message::PointerUp { .. } => slider.pointer_up().into_iter().collect(),
            Message::SwitchHandle => {
                slider.switch_handle();
                Vec::new()
            }
            Message::Nudge { steps } => slider.nudge(steps),
            _ => Vec::new(),
        };

        let mut refresh_due = false;
        for event in events {
            refresh_due |= card.handle_control_event(event, &self.store);
        }
        if refresh_due {
            card.refresh(&self.store);
        }
    }

    /// Renders the card.
    ///
    /// Each frame measures the card's host box, runs a layout pass, and
    /// sizes the card from the result. The track area is handed to the range
    /// control for hit testing before drawing.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            render_too_small(MIN_WIDTH, MIN_HEIGHT, area, frame.buffer_mut());
            return;
        }

        let Some(card) = &mut self.card else {
            let message = self.config_error.as_deref().unwrap_or_default();
            render_error_notice(message, area, frame.buffer_mut());
            return;
        };

        let sizing = self.config.host.sizing;
        let cell = &self.config.cell;
        let geometry = measure_host(sizing, area.height, card.layout(), cell);
        card.relayout(Some(&geometry), &self.config.tuning);

        let rows = card_rows(sizing, area.height, card.layout(), cell);
        let regions = card_regions(card, cell, card_area(area, rows));
        card.slider_mut().set_track_area(regions.track);
        render_card(card, &self.theme, cell, &regions, frame.buffer_mut());
    }

    /// Runs the main application loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rangecard_config::Config;
    /// use rangecard_protocol::MemoryStore;
    /// use rangecard_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(Config::default(), MemoryStore::new());
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| self.view(frame))?;

            if let Some(msg) = poll_event()?.as_ref().and_then(event_to_message) {
                self.update(msg);
            }
            self.process_pending();

            if self.should_quit {
                break;
            }
            tokio::task::yield_now().await;
        }

        self.debouncer.cancel();
        Ok(())
    }
}
