//! Modelo de Car
//!
//! Este módulo contiene el struct Car y sus variantes para las operaciones CRUD.
//! Mapea exactamente al JSON de la API (campos en camelCase).

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Marcas aceptadas por la API, en el orden en que se muestran
pub const VALID_BRANDS: [&str; 23] = [
    "Toyota",
    "Honda",
    "Ford",
    "Chevrolet",
    "Nissan",
    "BMW",
    "Mercedes-Benz",
    "Volkswagen",
    "Audi",
    "Hyundai",
    "Kia",
    "Subaru",
    "Lexus",
    "Mazda",
    "Tesla",
    "Jeep",
    "Porsche",
    "Volvo",
    "Jaguar",
    "Land Rover",
    "Mitsubishi",
    "Ferrari",
    "Lamborghini",
];

pub fn is_valid_brand(brand: &str) -> bool {
    VALID_BRANDS.contains(&brand)
}

/// Car tal como lo devuelve la API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub fuel_use: f64,
    pub owner: String,
    pub day_of_commission: String,
    pub electric: bool,
}

/// Request para crear un coche (sin id, lo asigna el servidor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub fuel_use: f64,
    pub owner: String,
    pub day_of_commission: String,
    pub electric: bool,
}

impl NewCar {
    pub fn with_id(self, id: i64) -> Car {
        Car {
            id,
            brand: self.brand,
            model: self.model,
            fuel_use: self.fuel_use,
            owner: self.owner,
            day_of_commission: self.day_of_commission,
            electric: self.electric,
        }
    }
}

/// Campos editables de un coche
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CarField {
    Brand,
    Model,
    FuelUse,
    Owner,
    DayOfCommission,
}

impl CarField {
    /// Nombre del campo en el JSON de la API
    pub fn as_str(self) -> &'static str {
        match self {
            CarField::Brand => "brand",
            CarField::Model => "model",
            CarField::FuelUse => "fuelUse",
            CarField::Owner => "owner",
            CarField::DayOfCommission => "dayOfCommission",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "brand" => Some(CarField::Brand),
            "model" => Some(CarField::Model),
            "fuelUse" => Some(CarField::FuelUse),
            "owner" => Some(CarField::Owner),
            "dayOfCommission" => Some(CarField::DayOfCommission),
            _ => None,
        }
    }

    /// Etiqueta del formulario
    pub fn label(self) -> &'static str {
        match self {
            CarField::Brand => "Brand",
            CarField::Model => "Model",
            CarField::FuelUse => "Fuel Use (L/100km)",
            CarField::Owner => "Owner",
            CarField::DayOfCommission => "Commission Date",
        }
    }
}

/// Estado editable del formulario: todos los campos salvo el id.
///
/// `fuel_use` es `None` cuando el usuario dejó el campo vacío o escribió
/// algo que no es un número.
#[derive(Debug, Clone, PartialEq)]
pub struct CarDraft {
    pub brand: String,
    pub model: String,
    pub fuel_use: Option<f64>,
    pub owner: String,
    pub electric: bool,
    pub day_of_commission: String,
}

impl Default for CarDraft {
    fn default() -> Self {
        Self {
            brand: String::new(),
            model: String::new(),
            fuel_use: Some(0.0),
            owner: String::new(),
            electric: false,
            day_of_commission: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<Car> for CarDraft {
    fn from(car: Car) -> Self {
        Self {
            brand: car.brand,
            model: car.model,
            fuel_use: Some(car.fuel_use),
            owner: car.owner,
            electric: car.electric,
            day_of_commission: car.day_of_commission,
        }
    }
}

impl CarDraft {
    /// Convertir a request de creación. Solo tiene sentido tras validar.
    pub fn to_new_car(&self) -> NewCar {
        NewCar {
            brand: self.brand.clone(),
            model: self.model.clone(),
            fuel_use: self.fuel_use.unwrap_or(0.0),
            owner: self.owner.clone(),
            day_of_commission: self.day_of_commission.clone(),
            electric: self.electric,
        }
    }

    pub fn to_car(&self, id: i64) -> Car {
        self.to_new_car().with_id(id)
    }
}
