//! DTOs de las respuestas del servicio

pub mod car_dto;

pub use car_dto::*;
