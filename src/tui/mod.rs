//! TUI module: Terminal User Interface using Ratatui.
//!
//! Layout: category sidebar with About text, per-category form, result
//! panel and a footer disclaimer.

mod app;
mod styles;
mod ui;

pub use app::{App, Focus};
pub use styles::MedicalTheme;
pub use ui::result::ResultState;
