use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use super::prompt::PromptCommand;
use modal_dialog::config::Config;
use modal_dialog::tui::{self, components::dialogs::DialogKind, App, EventHandler};

/// Alert and confirm dialogs for your terminal
#[derive(Parser, Debug)]
#[command(
    name = "modal-dialog",
    version,
    about = "Alert and confirm dialogs for your terminal",
    long_about = r#"Shows a modal dialog in the terminal and reports the answer through the exit status.

Examples:
  modal-dialog alert "Saved!"              # OK button, exits 0
  modal-dialog confirm "Delete item?"      # exits 0 on Yes, 1 on Cancel
  modal-dialog                             # interactive demo"#
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Color theme (dark or light)
    #[arg(long = "theme", global = true)]
    pub theme: Option<String>,

    /// Do not capture the mouse; buttons are keyboard-only
    #[arg(long = "no-mouse", global = true)]
    pub no_mouse: bool,

    /// Write logs to this file
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show an alert with a single OK button
    Alert(PromptCommand),
    /// Ask a yes/cancel question
    Confirm(PromptCommand),
    /// Open the interactive demo screen
    Demo,
}

impl Cli {
    /// Apply command-line settings over the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if self.no_mouse {
            config.mouse_capture = false;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
    }

    /// Run the selected command and return the process exit status
    pub async fn execute(self, config: &Config) -> Result<i32> {
        config.validate()?;

        match self.command {
            Some(Commands::Alert(prompt)) => prompt.execute(DialogKind::Alert, config).await,
            Some(Commands::Confirm(prompt)) => prompt.execute(DialogKind::Confirm, config).await,
            Some(Commands::Demo) | None => Self::start_demo(config).await,
        }
    }

    async fn start_demo(config: &Config) -> Result<i32> {
        info!("Starting demo");

        let mut event_handler = EventHandler::new(Duration::from_millis(config.tick_rate_ms));
        let mut app = App::demo(config, event_handler.sender())?;
        tui::run(&mut app, &mut event_handler, config.mouse_capture).await?;

        info!("Demo finished");
        Ok(match app.outcome() {
            tui::Outcome::Aborted => tui::Outcome::Aborted.exit_code(),
            _ => 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_confirm() {
        let cli = Cli::parse_from(["modal-dialog", "confirm", "Delete", "item?", "--theme", "light"]);
        assert_eq!(cli.theme.as_deref(), Some("light"));
        match cli.command {
            Some(Commands::Confirm(prompt)) => {
                assert_eq!(prompt.message().unwrap(), "Delete item?");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_means_demo() {
        let cli = Cli::parse_from(["modal-dialog", "--no-mouse"]);
        assert!(cli.command.is_none());
        assert!(cli.no_mouse);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["modal-dialog", "--no-mouse", "--log-file", "out.log", "demo"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert!(!config.mouse_capture);
        assert_eq!(config.log_file, Some(PathBuf::from("out.log")));
        assert_eq!(config.theme, "dark");
    }
}
