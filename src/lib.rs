pub mod app;
pub mod board;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod menu;
pub mod renderer;
pub mod settings;
pub mod snake;
pub mod state;
pub mod terminal_runtime;
pub mod ui;

pub use error::{Error, Result};
