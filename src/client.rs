//! Cliente HTTP para la API de coches
//!
//! Este módulo contiene el cliente HTTP que envuelve los cinco endpoints
//! REST `/api/{neptun}/car`. Cada llamada es un viaje completo al servidor:
//! sin reintentos, sin timeout y sin cache.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::dto::car_dto::ErrorBody;
use crate::models::car::{Car, NewCar};
use crate::models::scope::ScopeKey;
use crate::services::car_service::CarService;
use crate::utils::errors::{ApiError, ApiOperation, ApiResult};

/// URL base por defecto de la API
pub const DEFAULT_API_BASE_URL: &str = "https://iit-playground.arondev.hu";

/// Cliente HTTP para la API de coches
#[derive(Debug, Clone)]
pub struct CarApiClient {
    client: Client,
    base_url: String,
}

impl CarApiClient {
    /// Crear nuevo cliente HTTP con URL base configurable
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn cars_url(&self, scope: &ScopeKey) -> String {
        format!("{}/api/{}/car", self.base_url, scope.encoded())
    }

    fn car_url(&self, scope: &ScopeKey, id: i64) -> String {
        format!("{}/{}", self.cars_url(scope), id)
    }

    /// Enviar la petición y devolver el cuerpo si el estado es 2xx
    async fn execute(&self, operation: ApiOperation, request: RequestBuilder) -> ApiResult<Vec<u8>> {
        let response = request
            .send()
            .await
            .map_err(|source| ApiError::Transport { operation, source })?;

        let status = response.status();
        debug!("📡 {} -> {}", operation.describe(), status);

        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { operation, source })?;

        if !status.is_success() {
            let error_body = ErrorBody::parse(&body);
            return Err(ApiError::from_server(operation, status, error_body.message));
        }

        Ok(body.to_vec())
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        operation: ApiOperation,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let body = self.execute(operation, request).await?;
        decode(operation, &body)
    }
}

fn decode<T: DeserializeOwned>(operation: ApiOperation, body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode { operation, source })
}

fn logged<T>(result: ApiResult<T>) -> ApiResult<T> {
    if let Err(e) = &result {
        error!("❌ Error {}: {}", e.operation().describe(), e);
    }
    result
}

#[async_trait]
impl CarService for CarApiClient {
    async fn list_all(&self, scope: &ScopeKey) -> ApiResult<Vec<Car>> {
        let request = self.client.get(self.cars_url(scope));
        logged(self.execute_json(ApiOperation::ListCars, request).await)
    }

    async fn get_by_id(&self, scope: &ScopeKey, id: i64) -> ApiResult<Option<Car>> {
        let operation = ApiOperation::GetCar;
        let request = self.client.get(self.car_url(scope, id));

        let result = match self.execute(operation, request).await {
            Ok(body) if body.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(body) => decode::<Option<Car>>(operation, &body),
            Err(e) => Err(e),
        };
        logged(result)
    }

    async fn create(&self, scope: &ScopeKey, car: &NewCar) -> ApiResult<Car> {
        let request = self.client.post(self.cars_url(scope)).json(car);
        logged(self.execute_json(ApiOperation::CreateCar, request).await)
    }

    async fn update(&self, scope: &ScopeKey, car: &Car) -> ApiResult<Car> {
        let request = self.client.put(self.cars_url(scope)).json(car);
        logged(self.execute_json(ApiOperation::UpdateCar, request).await)
    }

    async fn delete_by_id(&self, scope: &ScopeKey, id: i64) -> ApiResult<()> {
        let request = self.client.delete(self.car_url(scope, id));
        logged(self.execute(ApiOperation::DeleteCar, request).await.map(|_| ()))
    }
}
