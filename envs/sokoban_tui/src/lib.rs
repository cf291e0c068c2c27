//! Terminal front end: maps keys onto the engine, draws the board with
//! ratatui, and walks through the configured levels.

pub mod app;
pub mod config;
pub mod render;

pub use app::{App, Command, Control, Phase};
pub use config::Config;
