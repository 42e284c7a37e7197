//! Sistema de manejo de errores
//!
//! Este módulo define el único tipo de error del cliente de la API
//! y el mensaje que se muestra al usuario para cada operación.

use reqwest::StatusCode;
use thiserror::Error;

/// Operación de la API que originó un error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    ListCars,
    GetCar,
    CreateCar,
    UpdateCar,
    DeleteCar,
}

impl ApiOperation {
    /// Mensaje genérico cuando el servidor no envía uno propio
    pub fn fallback_message(self) -> &'static str {
        match self {
            ApiOperation::ListCars => "Failed to fetch cars",
            ApiOperation::GetCar => "Failed to fetch car",
            ApiOperation::CreateCar => "Failed to create car",
            ApiOperation::UpdateCar => "Failed to update car",
            ApiOperation::DeleteCar => "Failed to delete car",
        }
    }

    /// Descripción corta para los logs
    pub fn describe(self) -> &'static str {
        match self {
            ApiOperation::ListCars => "fetching cars",
            ApiOperation::GetCar => "fetching car",
            ApiOperation::CreateCar => "creating car",
            ApiOperation::UpdateCar => "updating car",
            ApiOperation::DeleteCar => "deleting car",
        }
    }
}

/// Errores del cliente de la API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Respuesta fuera del rango 2xx
    #[error("{message}")]
    Server {
        operation: ApiOperation,
        status: StatusCode,
        message: String,
    },

    /// Red no disponible, conexión rechazada, etc.
    #[error("{}: {source}", operation.fallback_message())]
    Transport {
        operation: ApiOperation,
        #[source]
        source: reqwest::Error,
    },

    /// Cuerpo de respuesta exitosa que no es JSON válido
    #[error("{}: invalid response body ({source})", operation.fallback_message())]
    Decode {
        operation: ApiOperation,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Construir un error a partir del cuerpo de error del servidor
    pub fn from_server(operation: ApiOperation, status: StatusCode, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| operation.fallback_message().to_string());

        ApiError::Server {
            operation,
            status,
            message,
        }
    }

    pub fn operation(&self) -> ApiOperation {
        match self {
            ApiError::Server { operation, .. }
            | ApiError::Transport { operation, .. }
            | ApiError::Decode { operation, .. } => *operation,
        }
    }

    /// Código HTTP, solo para errores del servidor
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Mensaje que se muestra en la vista
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Resultado tipado para operaciones de la API
pub type ApiResult<T> = Result<T, ApiError>;
