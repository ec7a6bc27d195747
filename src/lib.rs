//! Alert and confirm modal dialogs for ratatui applications.
//!
//! [`DialogPresenter`](tui::components::dialogs::DialogPresenter) is the
//! entry point: present a dialog, route input to it, render it over the
//! host's frame.

pub mod config;
pub mod tui;
