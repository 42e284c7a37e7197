//! Servicio de coches en memoria para los tests de controladores

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use car_registry::models::car::{Car, NewCar};
use car_registry::models::scope::ScopeKey;
use car_registry::services::car_service::CarService;
use car_registry::utils::errors::{ApiError, ApiOperation, ApiResult};

#[derive(Default)]
pub struct FakeCarService {
    cars: Mutex<HashMap<String, Vec<Car>>>,
    next_id: AtomicUsize,
    list_calls: AtomicUsize,
    fail_list: Mutex<Option<String>>,
    fail_get: Mutex<Option<String>>,
}

impl FakeCarService {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            ..Default::default()
        }
    }

    pub fn with_cars(scope: &str, cars: Vec<Car>) -> Self {
        let service = Self::new();
        let max_id = cars.iter().map(|c| c.id).max().unwrap_or(0);
        service.next_id.store(max_id as usize + 1, Ordering::SeqCst);
        service.cars.lock().unwrap().insert(scope.to_string(), cars);
        service
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self, scope: &str) -> Vec<Car> {
        self.cars.lock().unwrap().get(scope).cloned().unwrap_or_default()
    }

    pub fn fail_list_with(&self, message: &str) {
        *self.fail_list.lock().unwrap() = Some(message.to_string());
    }

    /// Hace que `get_by_id` falle con un cuerpo de error sin `message`
    pub fn fail_get(&self) {
        *self.fail_get.lock().unwrap() = Some(String::new());
    }

    /// Quitar un coche sin pasar por el servicio (otro usuario lo borró)
    pub fn remove(&self, scope: &str, id: i64) {
        if let Some(cars) = self.cars.lock().unwrap().get_mut(scope) {
            cars.retain(|c| c.id != id);
        }
    }

    fn not_found(operation: ApiOperation, id: i64) -> ApiError {
        ApiError::from_server(
            operation,
            StatusCode::NOT_FOUND,
            Some(format!("Car with id {} not found", id)),
        )
    }
}

#[async_trait]
impl CarService for FakeCarService {
    async fn list_all(&self, scope: &ScopeKey) -> ApiResult<Vec<Car>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_list.lock().unwrap().clone() {
            return Err(ApiError::from_server(
                ApiOperation::ListCars,
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(message),
            ));
        }
        Ok(self.stored(scope.as_str()))
    }

    async fn get_by_id(&self, scope: &ScopeKey, id: i64) -> ApiResult<Option<Car>> {
        if let Some(message) = self.fail_get.lock().unwrap().clone() {
            return Err(ApiError::from_server(
                ApiOperation::GetCar,
                StatusCode::BAD_GATEWAY,
                Some(message),
            ));
        }
        Ok(self.stored(scope.as_str()).into_iter().find(|c| c.id == id))
    }

    async fn create(&self, scope: &ScopeKey, car: &NewCar) -> ApiResult<Car> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        let created = car.clone().with_id(id);
        self.cars
            .lock()
            .unwrap()
            .entry(scope.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update(&self, scope: &ScopeKey, car: &Car) -> ApiResult<Car> {
        let mut cars = self.cars.lock().unwrap();
        let slot = cars
            .get_mut(scope.as_str())
            .and_then(|list| list.iter_mut().find(|c| c.id == car.id))
            .ok_or_else(|| Self::not_found(ApiOperation::UpdateCar, car.id))?;
        *slot = car.clone();
        Ok(car.clone())
    }

    async fn delete_by_id(&self, scope: &ScopeKey, id: i64) -> ApiResult<()> {
        let mut cars = self.cars.lock().unwrap();
        let list = cars.entry(scope.to_string()).or_default();
        let before = list.len();
        list.retain(|c| c.id != id);
        if list.len() == before {
            return Err(Self::not_found(ApiOperation::DeleteCar, id));
        }
        Ok(())
    }
}

pub fn scope(code: &str) -> ScopeKey {
    ScopeKey::new(code).unwrap()
}

pub fn car(id: i64, brand: &str, model: &str) -> Car {
    Car {
        id,
        brand: brand.to_string(),
        model: model.to_string(),
        fuel_use: 6.5,
        owner: "John Smith".to_string(),
        day_of_commission: "2023-05-10".to_string(),
        electric: false,
    }
}
