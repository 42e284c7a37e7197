//! Módulo de componentes de interfaz

pub mod modal;

pub use modal::*;
