use crate::config::Config;
use crate::tui::{
    components::{
        dialogs::{DialogKind, DialogPresenter},
        Component,
    },
    events::Event,
    keys::KeyMap,
    styles::Theme,
    Frame,
};
use anyhow::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tokio::sync::mpsc;
use tracing::debug;

/// What the host screen is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Interactive screen that opens dialogs on request
    Demo,
    /// A single dialog; the program ends once it is answered
    Prompt,
}

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No dialog answered the session
    Pending,
    /// The last dialog was answered
    Answered(bool),
    /// The user pressed the abort key
    Aborted,
}

impl Outcome {
    /// Process exit status, shell-style: 0 for yes, 1 for no
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Pending | Self::Answered(true) => 0,
            Self::Answered(false) => 1,
            Self::Aborted => 130,
        }
    }
}

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Key mappings for the application
    pub key_map: KeyMap,

    /// Dialog layer drawn over the host screen
    pub presenter: DialogPresenter,

    /// Current theme for styling
    pub theme: Theme,

    /// Status message to display
    pub status_message: Option<String>,

    mode: AppMode,

    outcome: Outcome,

    mouse_enabled: bool,

    /// Event sender for internal communication
    event_sender: mpsc::UnboundedSender<Event>,
}

impl App {
    /// Create the interactive demo screen
    pub fn demo(config: &Config, event_sender: mpsc::UnboundedSender<Event>) -> Result<Self> {
        Self::new(config, AppMode::Demo, event_sender)
    }

    /// Create a screen showing a single dialog
    pub fn prompt(
        config: &Config,
        event_sender: mpsc::UnboundedSender<Event>,
        message: impl Into<String>,
        kind: DialogKind,
    ) -> Result<Self> {
        let mut app = Self::new(config, AppMode::Prompt, event_sender)?;
        app.present_reporting(message, kind);
        Ok(app)
    }

    fn new(config: &Config, mode: AppMode, event_sender: mpsc::UnboundedSender<Event>) -> Result<Self> {
        let theme = config.theme()?;
        let mut presenter = DialogPresenter::new();
        presenter.set_backdrop_dim(config.backdrop_dim);

        Ok(Self {
            should_quit: false,
            key_map: KeyMap::default(),
            presenter,
            theme,
            status_message: None,
            mode,
            outcome: Outcome::Pending,
            mouse_enabled: config.mouse_capture,
            event_sender,
        })
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Present a dialog whose answer comes back through the event loop
    fn present_reporting(&mut self, message: impl Into<String>, kind: DialogKind) {
        let sender = self.event_sender.clone();
        self.presenter.present(
            message,
            kind,
            Some(Box::new(move |confirmed| {
                let _ = sender.send(Event::DialogResult(confirmed));
            })),
        );
    }

    /// Handle incoming events
    pub async fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => {
                if self.key_map.should_abort(&key_event) {
                    debug!("Abort requested");
                    self.outcome = Outcome::Aborted;
                    self.should_quit = true;
                    return Ok(true);
                }

                // An open dialog takes all input
                if self.presenter.is_shown() {
                    self.presenter.handle_key_event(key_event).await?;
                } else if self.mode == AppMode::Demo {
                    self.handle_demo_key(key_event);
                }
            }

            Event::Mouse(mouse_event) => {
                if self.mouse_enabled {
                    self.presenter.handle_mouse_event(mouse_event).await?;
                }
            }

            Event::Resize(width, height) => {
                self.presenter.set_size(Rect::new(0, 0, width, height));
            }

            Event::Tick => {
                self.presenter.tick().await?;
            }

            Event::DialogResult(confirmed) => {
                self.outcome = Outcome::Answered(confirmed);
                self.status_message = Some(format!(
                    "Last answer: {}",
                    if confirmed { "yes" } else { "no" }
                ));
                if self.mode == AppMode::Prompt {
                    self.should_quit = true;
                }
            }
        }

        Ok(self.should_quit)
    }

    fn handle_demo_key(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        if self.key_map.should_quit(&key_event) {
            self.should_quit = true;
        } else if self.key_map.alert.matches(&key_event) {
            self.presenter.present_alert("This is an alert.");
            self.status_message = Some("Alerts report nothing back".to_string());
        } else if self.key_map.confirm.matches(&key_event) {
            self.present_reporting("Do you want to continue?", DialogKind::Confirm);
        }
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.size();

        match self.mode {
            AppMode::Demo => self.render_demo(frame, area),
            AppMode::Prompt => {
                frame.render_widget(Block::default().style(self.theme.base_style()), area);
            }
        }

        self.presenter.render(frame, area, &self.theme);
    }

    fn render_demo(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),      // Main content
                Constraint::Length(1),   // Status bar
            ])
            .split(area);

        let body = vec![
            Line::from(Span::styled("Modal dialog demo", self.theme.title_style())),
            Line::from(""),
            Line::from(Span::styled(self.key_map.help_text(), self.theme.help_style())),
        ];
        let main = Paragraph::new(body)
            .alignment(Alignment::Center)
            .style(self.theme.base_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(ratatui::style::Style::default().fg(self.theme.border))
                    .title("modal-dialog"),
            );
        frame.render_widget(main, chunks[0]);

        let status_text = self
            .status_message
            .clone()
            .unwrap_or_else(|| "Ready".to_string());
        frame.render_widget(
            Paragraph::new(status_text).style(self.theme.status_bar_style()),
            chunks[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    fn demo() -> (App, mpsc::UnboundedReceiver<Event>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let app = App::demo(&Config::default(), sender).unwrap();
        (app, receiver)
    }

    #[tokio::test]
    async fn test_demo_confirm_round_trip() {
        let (mut app, mut receiver) = demo();
        app.handle_event(Event::Resize(80, 24)).await.unwrap();

        app.handle_event(key(KeyCode::Char('c'))).await.unwrap();
        assert_eq!(app.presenter.kind(), Some(DialogKind::Confirm));

        app.handle_event(key(KeyCode::Tab)).await.unwrap();
        app.handle_event(key(KeyCode::Enter)).await.unwrap();
        assert!(!app.presenter.is_shown());

        let delivered = receiver.try_recv().unwrap();
        assert_eq!(delivered, Event::DialogResult(false));
        assert!(!app.handle_event(delivered).await.unwrap());
        assert_eq!(app.status_message.as_deref(), Some("Last answer: no"));
        assert_eq!(app.outcome(), Outcome::Answered(false));
    }

    #[tokio::test]
    async fn test_demo_alert_reports_nothing() {
        let (mut app, mut receiver) = demo();
        app.handle_event(key(KeyCode::Char('a'))).await.unwrap();
        assert_eq!(app.presenter.kind(), Some(DialogKind::Alert));

        app.handle_event(key(KeyCode::Enter)).await.unwrap();
        assert!(!app.presenter.is_shown());
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_open_dialog_swallows_host_keys() {
        let (mut app, _receiver) = demo();
        app.handle_event(key(KeyCode::Char('c'))).await.unwrap();

        assert!(!app.handle_event(key(KeyCode::Char('q'))).await.unwrap());
        assert!(app.presenter.is_shown());

        app.handle_event(key(KeyCode::Enter)).await.unwrap();
        assert!(app.handle_event(key(KeyCode::Char('q'))).await.unwrap());
    }

    #[tokio::test]
    async fn test_prompt_quits_on_answer() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let mut app =
            App::prompt(&Config::default(), sender, "Delete item?", DialogKind::Confirm).unwrap();
        assert_eq!(app.mode(), AppMode::Prompt);
        assert_eq!(app.presenter.message(), Some("Delete item?"));

        app.handle_event(key(KeyCode::Enter)).await.unwrap();
        let delivered = receiver.try_recv().unwrap();
        assert!(app.handle_event(delivered).await.unwrap());
        assert_eq!(app.outcome(), Outcome::Answered(true));
        assert_eq!(app.outcome().exit_code(), 0);
    }

    #[tokio::test]
    async fn test_abort_key_bypasses_dialog() {
        let (sender, _receiver) = mpsc::unbounded_channel();
        let mut app = App::prompt(&Config::default(), sender, "Saved!", DialogKind::Alert).unwrap();

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.handle_event(ctrl_c).await.unwrap());
        assert_eq!(app.outcome(), Outcome::Aborted);
        assert_eq!(app.outcome().exit_code(), 130);
    }

    #[tokio::test]
    async fn test_mouse_ignored_when_disabled() {
        let (sender, _receiver) = mpsc::unbounded_channel();
        let config = Config {
            mouse_capture: false,
            ..Config::default()
        };
        let mut app = App::prompt(&config, sender, "Saved!", DialogKind::Alert).unwrap();
        app.handle_event(Event::Resize(80, 24)).await.unwrap();

        let ok = app.presenter.layout().unwrap().buttons[0].area;
        let click = crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: ok.x + 1,
            row: ok.y + 1,
            modifiers: KeyModifiers::empty(),
        };
        app.handle_event(Event::Mouse(click)).await.unwrap();
        assert!(app.presenter.is_shown());
    }

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(Outcome::Pending.exit_code(), 0);
        assert_eq!(Outcome::Answered(false).exit_code(), 1);
    }

    #[test]
    fn test_demo_render_shows_help() {
        let (mut app, _receiver) = demo();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = (0..24)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .map(|(x, y)| buffer.get(x, y).symbol().to_string())
            .collect();
        assert!(screen.contains("Modal dialog demo"));
        assert!(screen.contains("Ready"));
    }
}
