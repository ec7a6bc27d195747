use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub description: String,
}

impl KeyBinding {
    pub fn new(key: KeyCode, modifiers: KeyModifiers, description: &str) -> Self {
        Self {
            key,
            modifiers,
            description: description.to_string(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.code && self.modifiers == event.modifiers
    }

    fn key_label(&self) -> String {
        let key = match self.key {
            KeyCode::Char(c) => c.to_string(),
            other => format!("{:?}", other),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key.to_uppercase())
        } else {
            key
        }
    }
}

/// Host key mappings.
///
/// These only apply while no dialog is shown, except `abort`, which always
/// ends the program.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Leave the program, bypassing any open dialog
    pub abort: KeyBinding,

    /// Quit the demo screen
    pub quit: KeyBinding,

    /// Present an alert from the demo screen
    pub alert: KeyBinding,

    /// Present a confirm from the demo screen
    pub confirm: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            abort: KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL, "Abort"),
            quit: KeyBinding::new(KeyCode::Char('q'), KeyModifiers::NONE, "Quit"),
            alert: KeyBinding::new(KeyCode::Char('a'), KeyModifiers::NONE, "Show alert"),
            confirm: KeyBinding::new(KeyCode::Char('c'), KeyModifiers::NONE, "Show confirm"),
        }
    }
}

impl KeyMap {
    pub fn should_abort(&self, event: &KeyEvent) -> bool {
        self.abort.matches(event)
    }

    pub fn should_quit(&self, event: &KeyEvent) -> bool {
        self.quit.matches(event)
    }

    /// One-line summary of the demo bindings
    pub fn help_text(&self) -> String {
        [&self.alert, &self.confirm, &self.quit]
            .iter()
            .map(|binding| format!("{}: {}", binding.key_label(), binding.description))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abort_requires_control() {
        let key_map = KeyMap::default();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);

        assert!(key_map.should_abort(&ctrl_c));
        assert!(!key_map.should_abort(&plain_c));
        assert!(key_map.confirm.matches(&plain_c));
        assert!(!key_map.confirm.matches(&ctrl_c));
    }

    #[test]
    fn test_help_text() {
        assert_eq!(
            KeyMap::default().help_text(),
            "a: Show alert | c: Show confirm | q: Quit"
        );
    }
}
