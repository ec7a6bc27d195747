use anyhow::{anyhow, Result};
use clap::Args;
use std::io::{self, IsTerminal, Read};
use std::time::Duration;
use tracing::{debug, info};

use modal_dialog::config::Config;
use modal_dialog::tui::{self, components::dialogs::DialogKind, App, EventHandler};

/// Show a single dialog and exit with its answer
#[derive(Args, Debug)]
pub struct PromptCommand {
    /// The message to show. If not provided, will read from stdin
    pub message: Vec<String>,
}

impl PromptCommand {
    pub async fn execute(&self, kind: DialogKind, config: &Config) -> Result<i32> {
        let message = self.message()?;
        info!(%kind, "Showing dialog");

        let mut event_handler = EventHandler::new(Duration::from_millis(config.tick_rate_ms));
        let mut app = App::prompt(config, event_handler.sender(), message, kind)?;
        tui::run(&mut app, &mut event_handler, config.mouse_capture).await?;

        let outcome = app.outcome();
        debug!(?outcome, "Dialog finished");
        Ok(outcome.exit_code())
    }

    /// Message from the arguments, falling back to stdin
    pub fn message(&self) -> Result<String> {
        if !self.message.is_empty() {
            // Join all arguments into a single message
            return Ok(self.message.join(" "));
        }

        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Err(anyhow!("No message provided. Use arguments or pipe input via stdin."));
        }

        debug!("Reading message from stdin");
        let mut buffer = String::new();
        stdin
            .lock()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
        Ok(buffer.trim_end().to_string())
    }
}
