//! Servicio de coches
//!
//! Contrato asíncrono de las cinco operaciones CRUD. Los controladores
//! dependen de este trait y no del cliente HTTP concreto.

use async_trait::async_trait;

use crate::models::car::{Car, NewCar};
use crate::models::scope::ScopeKey;
use crate::utils::errors::ApiResult;

#[async_trait]
pub trait CarService: Send + Sync {
    /// Todos los coches del código Neptun. Una lista vacía no es un error.
    async fn list_all(&self, scope: &ScopeKey) -> ApiResult<Vec<Car>>;

    /// Un coche por id. `None` cuando el servidor responde con `null`.
    async fn get_by_id(&self, scope: &ScopeKey, id: i64) -> ApiResult<Option<Car>>;

    /// Crear un coche; devuelve el registro con el id asignado
    async fn create(&self, scope: &ScopeKey, car: &NewCar) -> ApiResult<Car>;

    /// Reemplazar un coche existente (el id va en el cuerpo)
    async fn update(&self, scope: &ScopeKey, car: &Car) -> ApiResult<Car>;

    async fn delete_by_id(&self, scope: &ScopeKey, id: i64) -> ApiResult<()>;
}
