use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEvent, MouseEvent};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Mouse input event
    Mouse(MouseEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick event
    Tick,

    /// A dialog delivered its result
    DialogResult(bool),
}

/// Event handler for managing input events
///
/// Terminal input and internal events share one channel, so a dialog result
/// sent from a callback is observed by the loop in order with the key press
/// that caused it.
pub struct EventHandler {
    /// Event receiver channel
    receiver: mpsc::UnboundedReceiver<Event>,

    /// Event sender channel
    sender: mpsc::UnboundedSender<Event>,

    /// Tick interval for periodic events
    tick_interval: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            receiver,
            sender,
            tick_interval,
        }
    }

    /// Start forwarding terminal input.
    ///
    /// Must run after the terminal enters raw mode. The reader thread exits
    /// once the handler is dropped.
    pub fn start(&self) -> Result<()> {
        let sender = self.sender.clone();
        let tick_interval = self.tick_interval;

        thread::Builder::new()
            .name("terminal-events".to_string())
            .spawn(move || loop {
                let event = match crossterm::event::poll(tick_interval) {
                    Ok(true) => match crossterm::event::read() {
                        Ok(event) => convert_crossterm_event(event),
                        Err(err) => {
                            warn!("Failed to read terminal event: {}", err);
                            break;
                        }
                    },
                    Ok(false) => Some(Event::Tick),
                    Err(err) => {
                        warn!("Failed to poll terminal events: {}", err);
                        break;
                    }
                };

                if let Some(event) = event {
                    if sender.send(event).is_err() {
                        debug!("Event channel closed, stopping reader");
                        break;
                    }
                }
            })?;

        Ok(())
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Get a clone of the sender
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

/// Convert crossterm events to application events
fn convert_crossterm_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key_event) => Some(Event::Key(key_event)),
        CrosstermEvent::Mouse(mouse_event) => Some(Event::Mouse(mouse_event)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        CrosstermEvent::FocusGained | CrosstermEvent::FocusLost | CrosstermEvent::Paste(_) => None,
    }
}
