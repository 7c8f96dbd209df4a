//! Terminal user interface (ratatui + crossterm, Elm architecture).

pub mod app;
pub mod events;
pub mod layout;
pub mod roster;
pub mod services;
pub mod theme;
pub mod views;
pub mod widgets;
