//! Services module
//!
//! Este módulo define el contrato del servicio de coches. La implementación
//! HTTP vive en `crate::client`.

pub mod car_service;

pub use car_service::*;
