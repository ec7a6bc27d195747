//! Modal alert and confirm dialogs
//!
//! A [`DialogPresenter`] owns at most one dialog at a time. Presenting a new
//! dialog replaces the one on screen; activating a button removes the dialog
//! and then delivers the user's choice to the caller.

pub mod layer;
pub mod presenter;
pub mod types;

pub use layer::{ButtonLayout, DialogLayout};
pub use presenter::DialogPresenter;
pub use types::*;
