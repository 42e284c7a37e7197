//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al formato JSON del servicio de coches.

pub mod car;
pub mod scope;

pub use car::*;
pub use scope::*;
