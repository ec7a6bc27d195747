//! Dialog layout and hit testing
//!
//! Computes where the backdrop, panel, message and buttons of a dialog land
//! inside a viewport. The presenter uses the same layout for rendering and
//! for routing mouse presses, so what the user sees is what they click.

use super::types::{DialogAction, DialogKind};
use crate::tui::utils::layout::centered_rect;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Narrowest panel, unless the viewport itself is narrower
pub const MIN_PANEL_WIDTH: u16 = 24;
/// Widest panel; longer messages wrap
pub const MAX_PANEL_WIDTH: u16 = 60;

/// Columns between the panel border and its content, per side
const PANEL_PADDING: u16 = 2;
/// Columns between a button's border and its label, per side
const BUTTON_PADDING: u16 = 2;
const BUTTON_GAP: u16 = 2;
const BUTTON_HEIGHT: u16 = 3;

/// Placement of a single button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonLayout {
    pub action: DialogAction,
    pub label: &'static str,
    pub area: Rect,
}

impl ButtonLayout {
    pub fn contains_point(&self, x: u16, y: u16) -> bool {
        let area = &self.area;
        x >= area.x
            && x < area.x.saturating_add(area.width)
            && y >= area.y
            && y < area.y.saturating_add(area.height)
    }
}

/// Placement of every part of a dialog within a viewport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLayout {
    /// Dimmed area behind the panel; always the whole viewport
    pub backdrop: Rect,
    /// Bordered panel
    pub panel: Rect,
    /// Area holding the wrapped message
    pub message: Rect,
    /// Message after wrapping to the panel width
    pub message_lines: Vec<String>,
    /// Buttons in row order
    pub buttons: Vec<ButtonLayout>,
}

impl DialogLayout {
    pub fn calculate(message: &str, kind: DialogKind, viewport: Rect) -> Self {
        let actions = kind.actions();
        let button_widths: Vec<u16> = actions
            .iter()
            .map(|action| button_width(action.label(kind)))
            .collect();
        let row_width = button_widths.iter().sum::<u16>()
            + BUTTON_GAP * (button_widths.len().saturating_sub(1) as u16);

        let chrome_width = 2 + 2 * PANEL_PADDING;
        let max_width = viewport.width.min(MAX_PANEL_WIDTH);
        let min_width = MIN_PANEL_WIDTH.min(max_width);
        let panel_width = message_width(message)
            .max(row_width)
            .saturating_add(chrome_width)
            .clamp(min_width, max_width);

        let inner_width = panel_width.saturating_sub(chrome_width).max(1);
        let message_lines: Vec<String> = textwrap::wrap(message, inner_width as usize)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();

        // border + padding, message, gap, buttons, padding + border
        let line_count = u16::try_from(message_lines.len()).unwrap_or(u16::MAX);
        let panel_height = line_count
            .saturating_add(2)
            .saturating_add(1 + BUTTON_HEIGHT + 2)
            .min(viewport.height);

        let panel = centered_rect(panel_width, panel_height, viewport);

        let content_x = panel.x.saturating_add(1 + PANEL_PADDING);
        let content_top = panel.y.saturating_add(2);
        let row_y = panel
            .y
            .saturating_add(panel.height)
            .saturating_sub(2 + BUTTON_HEIGHT)
            .max(content_top);

        let message_area = Rect {
            x: content_x,
            y: content_top,
            width: inner_width.min(panel.width.saturating_sub(chrome_width)),
            height: row_y.saturating_sub(content_top).saturating_sub(1),
        };

        let row_space = panel.width.saturating_sub(2);
        let (gap, button_widths) = fit_row(button_widths, row_space);
        let fitted_width = button_widths.iter().sum::<u16>()
            + gap * (button_widths.len().saturating_sub(1) as u16);

        let mut x = panel.x + 1 + row_space.saturating_sub(fitted_width) / 2;
        let mut buttons = Vec::with_capacity(actions.len());
        for (action, width) in actions.iter().zip(button_widths) {
            let area = Rect {
                x,
                y: row_y,
                width,
                height: BUTTON_HEIGHT,
            };
            let area = clip(area, panel);
            buttons.push(ButtonLayout {
                action: *action,
                label: action.label(kind),
                area,
            });
            x = x.saturating_add(width + gap);
        }

        Self {
            backdrop: viewport,
            panel,
            message: clip(message_area, viewport),
            message_lines,
            buttons,
        }
    }

    /// Button under the given cell, if any
    pub fn button_at(&self, x: u16, y: u16) -> Option<DialogAction> {
        self.buttons
            .iter()
            .find(|button| button.contains_point(x, y))
            .map(|button| button.action)
    }

    pub fn button(&self, action: DialogAction) -> Option<&ButtonLayout> {
        self.buttons.iter().find(|button| button.action == action)
    }
}

/// Restricts `area` to `viewport`, collapsing to an empty rect at the
/// viewport origin when nothing is left.
fn clip(area: Rect, viewport: Rect) -> Rect {
    let clipped = area.intersection(viewport);
    if clipped.width == 0 || clipped.height == 0 {
        Rect::new(viewport.x, viewport.y, 0, 0)
    } else {
        clipped
    }
}

/// Gap and button widths that fit in `available` columns. The gap narrows
/// first, then every button is cut to an equal share.
fn fit_row(widths: Vec<u16>, available: u16) -> (u16, Vec<u16>) {
    let count = widths.len() as u16;
    let gaps = count.saturating_sub(1);
    let total: u16 = widths.iter().sum();

    if total + BUTTON_GAP * gaps <= available {
        return (BUTTON_GAP, widths);
    }
    if total + gaps <= available {
        return (1, widths);
    }

    let share = available.saturating_sub(gaps) / count.max(1);
    (1, widths.into_iter().map(|width| width.min(share)).collect())
}

fn button_width(label: &str) -> u16 {
    (label.width() as u16) + 2 * BUTTON_PADDING + 2
}

fn message_width(message: &str) -> u16 {
    let widest = message.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
    u16::try_from(widest).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    fn inside(inner: Rect, outer: Rect) -> bool {
        inner.x >= outer.x
            && inner.y >= outer.y
            && inner.x + inner.width <= outer.x + outer.width
            && inner.y + inner.height <= outer.y + outer.height
    }

    #[test]
    fn test_alert_layout_has_single_button() {
        let layout = DialogLayout::calculate("Saved!", DialogKind::Alert, viewport());
        assert_eq!(layout.backdrop, viewport());
        assert_eq!(layout.buttons.len(), 1);
        assert_eq!(layout.buttons[0].label, "OK");
        assert_eq!(layout.message_lines, vec!["Saved!".to_string()]);
        assert_eq!(layout.panel.width, MIN_PANEL_WIDTH);
    }

    #[test]
    fn test_panel_is_centered() {
        let layout = DialogLayout::calculate("Delete item?", DialogKind::Confirm, viewport());
        let left = layout.panel.x;
        let right = 80 - (layout.panel.x + layout.panel.width);
        assert!(left.abs_diff(right) <= 1);
        let top = layout.panel.y;
        let bottom = 24 - (layout.panel.y + layout.panel.height);
        assert!(top.abs_diff(bottom) <= 1);
    }

    #[test]
    fn test_confirm_buttons_inside_panel_without_overlap() {
        let layout = DialogLayout::calculate("Delete item?", DialogKind::Confirm, viewport());
        let yes = layout.button(DialogAction::Affirmative).unwrap();
        let cancel = layout.button(DialogAction::Negative).unwrap();
        assert_eq!(yes.label, "Yes");
        assert_eq!(cancel.label, "Cancel");
        assert!(inside(yes.area, layout.panel));
        assert!(inside(cancel.area, layout.panel));
        assert!(yes.area.x + yes.area.width <= cancel.area.x);
        assert!(inside(layout.message, layout.panel));
        assert!(layout.message.y + layout.message.height <= yes.area.y);
    }

    #[test]
    fn test_long_message_wraps() {
        let message = "word ".repeat(40);
        let layout = DialogLayout::calculate(message.trim(), DialogKind::Alert, viewport());
        assert_eq!(layout.panel.width, MAX_PANEL_WIDTH);
        assert!(layout.message_lines.len() > 1);
        assert!(layout.message.height as usize >= layout.message_lines.len());
    }

    #[test]
    fn test_empty_message_is_laid_out() {
        let layout = DialogLayout::calculate("", DialogKind::Alert, viewport());
        assert_eq!(layout.message_lines.len(), 1);
        assert_eq!(layout.buttons.len(), 1);
    }

    #[test]
    fn test_button_hit_testing() {
        let layout = DialogLayout::calculate("Delete item?", DialogKind::Confirm, viewport());
        let cancel = layout.button(DialogAction::Negative).unwrap().area;
        assert_eq!(
            layout.button_at(cancel.x, cancel.y),
            Some(DialogAction::Negative)
        );
        assert_eq!(
            layout.button_at(cancel.x + cancel.width - 1, cancel.y + cancel.height - 1),
            Some(DialogAction::Negative)
        );
        assert_eq!(layout.button_at(0, 0), None);
        assert_eq!(layout.button_at(layout.panel.x, layout.panel.y), None);
    }

    #[test]
    fn test_narrow_viewport_keeps_buttons_inside_border() {
        let narrow = Rect::new(0, 0, 20, 6);
        let layout = DialogLayout::calculate("Delete item?", DialogKind::Confirm, narrow);
        let panel = layout.panel;
        let yes = layout.button(DialogAction::Affirmative).unwrap().area;
        let cancel = layout.button(DialogAction::Negative).unwrap().area;

        for area in [yes, cancel] {
            assert!(area.width > 0);
            assert!(area.x > panel.x);
            assert!(area.x + area.width < panel.x + panel.width);
        }
        assert!(yes.x + yes.width <= cancel.x);
        assert_eq!(
            layout.button_at(cancel.x + cancel.width - 1, cancel.y),
            Some(DialogAction::Negative)
        );
    }

    #[test]
    fn test_tiny_viewport_stays_in_bounds() {
        let small = Rect::new(0, 0, 10, 4);
        let layout = DialogLayout::calculate("Delete item?", DialogKind::Confirm, small);
        assert!(inside(layout.panel, small));
        for button in &layout.buttons {
            assert!(inside(button.area, small));
        }
    }
}
