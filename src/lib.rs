pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod mode;
pub mod source;
pub mod table;
pub mod theme;
pub mod tui;
pub mod utils;
