//! Core dialog types
//!
//! This module defines the request, handle and action types shared by the
//! presenter and the layout code.

use std::fmt;

/// Callback invoked with the user's choice once a button is activated.
///
/// `FnOnce` so that a presentation can deliver its result at most once.
pub type ResultCallback = Box<dyn FnOnce(bool) + Send + Sync + 'static>;

/// Identifies one presentation issued by a [`DialogPresenter`].
///
/// Handles are never reused, so a handle kept from a replaced dialog can
/// never address the dialog that replaced it.
///
/// [`DialogPresenter`]: super::DialogPresenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogHandle(pub(crate) u64);

impl fmt::Display for DialogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog-{}", self.0)
    }
}

/// Dialog style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Single "OK" button
    Alert,
    /// "Yes" and "Cancel" buttons
    Confirm,
}

impl DialogKind {
    /// Actions offered by this kind, in button-row order
    pub fn actions(&self) -> &'static [DialogAction] {
        match self {
            Self::Alert => &[DialogAction::Affirmative],
            Self::Confirm => &[DialogAction::Affirmative, DialogAction::Negative],
        }
    }

    pub fn has_action(&self, action: DialogAction) -> bool {
        self.actions().contains(&action)
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alert => write!(f, "alert"),
            Self::Confirm => write!(f, "confirm"),
        }
    }
}

/// A button in the dialog's button row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    /// "OK" on alerts, "Yes" on confirms
    Affirmative,
    /// "Cancel", confirms only
    Negative,
}

impl DialogAction {
    /// Button label for this action on a dialog of the given kind
    pub fn label(&self, kind: DialogKind) -> &'static str {
        match (self, kind) {
            (Self::Affirmative, DialogKind::Alert) => "OK",
            (Self::Affirmative, DialogKind::Confirm) => "Yes",
            (Self::Negative, _) => "Cancel",
        }
    }

    /// Value delivered to the result callback when this action is activated
    pub fn result(&self) -> bool {
        matches!(self, Self::Affirmative)
    }
}

/// Presenter visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Hidden,
    Shown,
}

/// One request to present a dialog
pub struct DialogRequest {
    /// Text shown in the panel. Rendered as-is.
    pub message: String,
    pub kind: DialogKind,
    /// Notified once with the user's choice; `None` means nobody listens
    pub on_result: Option<ResultCallback>,
}

impl DialogRequest {
    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: DialogKind::Alert,
            on_result: None,
        }
    }

    pub fn confirm(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: DialogKind::Confirm,
            on_result: None,
        }
    }

    pub fn on_result<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(bool) + Send + Sync + 'static,
    {
        self.on_result = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for DialogRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogRequest")
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("on_result", &self.on_result.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_kind() {
        assert_eq!(DialogAction::Affirmative.label(DialogKind::Alert), "OK");
        assert_eq!(DialogAction::Affirmative.label(DialogKind::Confirm), "Yes");
        assert_eq!(DialogAction::Negative.label(DialogKind::Confirm), "Cancel");
    }

    #[test]
    fn test_alert_has_no_negative_action() {
        assert!(DialogKind::Alert.has_action(DialogAction::Affirmative));
        assert!(!DialogKind::Alert.has_action(DialogAction::Negative));
        assert_eq!(
            DialogKind::Confirm.actions(),
            &[DialogAction::Affirmative, DialogAction::Negative]
        );
    }

    #[test]
    fn test_action_results() {
        assert!(DialogAction::Affirmative.result());
        assert!(!DialogAction::Negative.result());
    }

    #[test]
    fn test_request_builder() {
        let request = DialogRequest::confirm("Delete item?").on_result(|_| {});
        assert_eq!(request.kind, DialogKind::Confirm);
        assert_eq!(request.message, "Delete item?");
        assert!(request.on_result.is_some());

        let alert = DialogRequest::alert("Saved!");
        assert!(alert.on_result.is_none());
        assert_eq!(format!("{}", DialogHandle(3)), "dialog-3");
    }
}
