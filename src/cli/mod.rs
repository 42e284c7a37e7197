//! Módulo de la interfaz de terminal

pub mod app;
pub mod prompt;
pub mod render;

pub use app::App;
pub use prompt::Prompt;
