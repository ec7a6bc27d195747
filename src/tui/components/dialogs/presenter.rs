//! Dialog presenter
//!
//! The presenter is responsible for:
//! - Keeping at most one dialog on screen
//! - Replacing the displayed dialog when a new one is presented
//! - Routing key and mouse input to the dialog's buttons
//! - Removing the dialog and delivering its result on activation

use super::{
    layer::DialogLayout,
    types::*,
};
use crate::tui::{
    components::{Component, ComponentState},
    styles::Theme,
    Frame,
};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tokio::sync::oneshot;
use tracing::{debug, info};

/// The dialog currently on screen
struct DialogInstance {
    handle: DialogHandle,
    message: String,
    kind: DialogKind,
    on_result: Option<ResultCallback>,
    focused: DialogAction,
}

impl DialogInstance {
    fn layout(&self, viewport: Rect) -> DialogLayout {
        DialogLayout::calculate(&self.message, self.kind, viewport)
    }

    fn cycle_focus(&mut self, forward: bool) {
        let actions = self.kind.actions();
        let current = actions
            .iter()
            .position(|action| *action == self.focused)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % actions.len()
        } else {
            (current + actions.len() - 1) % actions.len()
        };
        self.focused = actions[next];
    }
}

/// Presents alert and confirm dialogs, one at a time
pub struct DialogPresenter {
    /// Component state
    state: ComponentState,

    /// Dialog on screen, if any
    active: Option<DialogInstance>,

    /// Next handle to issue
    next_handle: u64,

    /// Dim whatever is drawn beneath the dialog
    backdrop_dim: bool,
}

impl DialogPresenter {
    /// Create a presenter with nothing on screen
    pub fn new() -> Self {
        Self {
            state: ComponentState::new(),
            active: None,
            next_handle: 1,
            backdrop_dim: true,
        }
    }

    /// Enable or disable dimming of the content behind the dialog
    pub fn set_backdrop_dim(&mut self, enabled: bool) {
        self.backdrop_dim = enabled;
    }

    /// Show a dialog, replacing any dialog already on screen.
    ///
    /// A replaced dialog is discarded without notifying its callback.
    pub fn present(
        &mut self,
        message: impl Into<String>,
        kind: DialogKind,
        on_result: Option<ResultCallback>,
    ) -> DialogHandle {
        self.show(DialogRequest {
            message: message.into(),
            kind,
            on_result,
        })
    }

    /// Show a dialog described by `request`
    pub fn show(&mut self, request: DialogRequest) -> DialogHandle {
        if let Some(previous) = self.active.take() {
            debug!(handle = %previous.handle, "discarding displayed dialog");
        }

        let handle = DialogHandle(self.next_handle);
        self.next_handle += 1;

        info!(%handle, kind = %request.kind, "presenting dialog");
        self.active = Some(DialogInstance {
            handle,
            message: request.message,
            kind: request.kind,
            on_result: request.on_result,
            focused: DialogAction::Affirmative,
        });
        handle
    }

    /// Show an alert nobody waits on
    pub fn present_alert(&mut self, message: impl Into<String>) -> DialogHandle {
        self.present(message, DialogKind::Alert, None)
    }

    /// Show a confirm; `on_result` receives `true` for "Yes", `false` for "Cancel"
    pub fn present_confirm<F>(&mut self, message: impl Into<String>, on_result: F) -> DialogHandle
    where
        F: FnOnce(bool) + Send + Sync + 'static,
    {
        self.present(message, DialogKind::Confirm, Some(Box::new(on_result)))
    }

    /// Show a dialog whose result is delivered through a channel.
    ///
    /// The receiver fails with `RecvError` if the dialog is replaced before
    /// the user answers it.
    pub fn present_async(
        &mut self,
        message: impl Into<String>,
        kind: DialogKind,
    ) -> (DialogHandle, oneshot::Receiver<bool>) {
        let (sender, receiver) = oneshot::channel();
        let handle = self.present(
            message,
            kind,
            Some(Box::new(move |confirmed| {
                let _ = sender.send(confirmed);
            })),
        );
        (handle, receiver)
    }

    pub fn alert_async(&mut self, message: impl Into<String>) -> (DialogHandle, oneshot::Receiver<bool>) {
        self.present_async(message, DialogKind::Alert)
    }

    pub fn confirm_async(&mut self, message: impl Into<String>) -> (DialogHandle, oneshot::Receiver<bool>) {
        self.present_async(message, DialogKind::Confirm)
    }

    /// Activate a button of the dialog identified by `handle`.
    ///
    /// The dialog is removed before its callback runs. Returns the delivered
    /// result, or `None` if `handle` is no longer on screen or the dialog has
    /// no such button.
    pub fn activate(&mut self, handle: DialogHandle, action: DialogAction) -> Option<bool> {
        match &self.active {
            Some(instance) if instance.handle == handle => {
                if !instance.kind.has_action(action) {
                    debug!(%handle, ?action, "dialog has no such button");
                    return None;
                }
            }
            _ => {
                debug!(%handle, "ignoring activation of dialog no longer on screen");
                return None;
            }
        }

        let instance = self.active.take()?;
        let confirmed = action.result();
        info!(%handle, confirmed, "dialog dismissed");

        if let Some(callback) = instance.on_result {
            callback(confirmed);
        }
        Some(confirmed)
    }

    /// Activate the focused button of the dialog on screen
    pub fn activate_focused(&mut self) -> Option<bool> {
        let (handle, action) = self
            .active
            .as_ref()
            .map(|instance| (instance.handle, instance.focused))?;
        self.activate(handle, action)
    }

    pub fn state(&self) -> DialogState {
        if self.active.is_some() {
            DialogState::Shown
        } else {
            DialogState::Hidden
        }
    }

    pub fn is_shown(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_handle(&self) -> Option<DialogHandle> {
        self.active.as_ref().map(|instance| instance.handle)
    }

    pub fn message(&self) -> Option<&str> {
        self.active.as_ref().map(|instance| instance.message.as_str())
    }

    pub fn kind(&self) -> Option<DialogKind> {
        self.active.as_ref().map(|instance| instance.kind)
    }

    /// Button labels of the dialog on screen, in row order
    pub fn buttons(&self) -> Vec<(DialogAction, &'static str)> {
        self.active
            .as_ref()
            .map(|instance| {
                instance
                    .kind
                    .actions()
                    .iter()
                    .map(|action| (*action, action.label(instance.kind)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn focused_action(&self) -> Option<DialogAction> {
        self.active.as_ref().map(|instance| instance.focused)
    }

    /// Layout of the dialog on screen within the last known viewport
    pub fn layout(&self) -> Option<DialogLayout> {
        self.active
            .as_ref()
            .map(|instance| instance.layout(self.state.size))
    }

    fn render_button(
        &self,
        frame: &mut Frame,
        area: Rect,
        action: DialogAction,
        label: &str,
        focused: bool,
        theme: &Theme,
    ) {
        let (style, border_style) = match action {
            DialogAction::Affirmative => {
                let style = theme.affirmative_button_style();
                (style, style)
            }
            DialogAction::Negative => (
                theme.negative_button_style(),
                theme.negative_border_style(),
            ),
        };
        let label_style = if focused {
            style.add_modifier(theme.focused_button_modifier())
        } else {
            style
        };

        let button = Paragraph::new(Line::from(Span::styled(label.to_string(), label_style)))
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .style(style),
            );
        frame.render_widget(button, area);
    }
}

#[async_trait]
impl Component for DialogPresenter {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        if event.kind != KeyEventKind::Press {
            return Ok(());
        }
        let Some(instance) = self.active.as_mut() else {
            return Ok(());
        };

        match event.code {
            KeyCode::Tab | KeyCode::Right => instance.cycle_focus(true),
            KeyCode::BackTab | KeyCode::Left => instance.cycle_focus(false),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.activate_focused();
            }
            // Buttons are the only way out; Esc included
            _ => {}
        }

        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(());
        }
        let Some(instance) = self.active.as_ref() else {
            return Ok(());
        };

        let handle = instance.handle;
        if let Some(action) = instance
            .layout(self.state.size)
            .button_at(event.column, event.row)
        {
            self.activate(handle, action);
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.state.size = area;
        let Some(instance) = self.active.as_ref() else {
            return;
        };
        let layout = instance.layout(area);

        if self.backdrop_dim {
            frame.buffer_mut().set_style(layout.backdrop, theme.backdrop_style());
        }

        frame.render_widget(Clear, layout.panel);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.panel_border_style())
                .style(theme.panel_style()),
            layout.panel,
        );

        let lines: Vec<Line> = layout
            .message_lines
            .iter()
            .map(|line| Line::from(line.clone()))
            .collect();
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(theme.message_style()),
            layout.message,
        );

        for button in &layout.buttons {
            self.render_button(
                frame,
                button.area,
                button.action,
                button.label,
                button.action == instance.focused,
                theme,
            );
        }
    }

    fn size(&self) -> Rect {
        self.state.size
    }

    fn set_size(&mut self, size: Rect) {
        self.state.size = size;
    }

    fn has_focus(&self) -> bool {
        self.is_shown()
    }

    fn is_visible(&self) -> bool {
        self.is_shown()
    }
}

impl Default for DialogPresenter {
    fn default() -> Self {
        Self::new()
    }
}
