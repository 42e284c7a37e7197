//! Utilidades de validación
//!
//! Este módulo contiene las reglas de validación del formulario de coches.
//! Todas las reglas se evalúan en una sola pasada y de forma independiente
//! por campo; nada aquí depende de la interfaz.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::car::{is_valid_brand, CarDraft, CarField};

/// Errores por campo, en el orden del formulario
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<CarField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: CarField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: CarField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: CarField) -> bool {
        self.0.contains_key(&field)
    }

    /// Válido si y solo si no hay errores
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CarField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (name, field_errors) in errors.field_errors() {
            let Some(field) = CarField::from_name(name) else {
                continue;
            };
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {}", field.as_str()));
            fields.insert(field, message);
        }
        fields
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Validar la marca contra la lista fija de marcas
pub fn validate_brand(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(invalid("required", "Brand is required"));
    }
    if !is_valid_brand(value) {
        let mut error = invalid("enum", "Invalid car brand");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// El modelo solo tiene que estar presente (sin recortar espacios)
pub fn validate_model(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(invalid("required", "Model is required"));
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Consumo: 0 exacto si es eléctrico, positivo en otro caso
pub fn validate_fuel_use(fuel_use: Option<f64>, electric: bool) -> Result<(), ValidationError> {
    if electric {
        return match fuel_use {
            Some(value) if value == 0.0 => Ok(()),
            _ => Err(invalid("electric_fuel_use", "Fuel use must be 0 for electric cars")),
        };
    }

    match fuel_use {
        Some(value) if !value.is_nan() => validate_positive(value).map_err(|_| {
            invalid(
                "positive",
                "Fuel use must be greater than 0 for non-electric cars",
            )
        }),
        _ => Err(invalid("required", "Fuel use value is required")),
    }
}

/// El propietario debe tener nombre completo: al menos un espacio interior
pub fn validate_owner(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(invalid("required", "Owner is required"));
    }
    if !value.trim().contains(' ') {
        return Err(invalid(
            "full_name",
            "Owner name must contain at least one space",
        ));
    }
    Ok(())
}

/// Validar y convertir string a fecha (YYYY-MM-DD o RFC3339)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| {
            let mut error = invalid("date", "Please enter a valid date");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD".to_string());
            error
        })
}

pub fn validate_day_of_commission(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(invalid("required", "Commission date is required"));
    }
    validate_date(value).map(|_| ())
}

impl Validate for CarDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let checks = [
            (CarField::Brand, validate_brand(&self.brand)),
            (CarField::Model, validate_model(&self.model)),
            (CarField::FuelUse, validate_fuel_use(self.fuel_use, self.electric)),
            (CarField::Owner, validate_owner(&self.owner)),
            (
                CarField::DayOfCommission,
                validate_day_of_commission(&self.day_of_commission),
            ),
        ];

        for (field, result) in checks {
            if let Err(error) = result {
                errors.add(field.as_str(), error);
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Validar un coche candidato y devolver los errores por campo
pub fn validate_car(draft: &CarDraft) -> FieldErrors {
    match draft.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => FieldErrors::from(&errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> CarDraft {
        CarDraft {
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            fuel_use: Some(5.4),
            owner: "Jane Doe".to_string(),
            electric: false,
            day_of_commission: "2024-01-15".to_string(),
        }
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        let errors = validate_car(&valid_draft());
        assert!(errors.is_valid());
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_all_errors_collected_in_one_pass() {
        let draft = CarDraft {
            brand: String::new(),
            model: String::new(),
            fuel_use: None,
            owner: String::new(),
            electric: false,
            day_of_commission: String::new(),
        };
        let errors = validate_car(&draft);
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(CarField::Brand), Some("Brand is required"));
        assert_eq!(errors.get(CarField::Model), Some("Model is required"));
        assert_eq!(errors.get(CarField::FuelUse), Some("Fuel use value is required"));
        assert_eq!(errors.get(CarField::Owner), Some("Owner is required"));
        assert_eq!(
            errors.get(CarField::DayOfCommission),
            Some("Commission date is required")
        );
    }

    #[test]
    fn test_electric_requires_zero_fuel_use() {
        for fuel_use in [Some(0.1), Some(-1.0), Some(7.0), Some(f64::NAN), None] {
            let draft = CarDraft {
                electric: true,
                fuel_use,
                ..valid_draft()
            };
            assert_eq!(
                validate_car(&draft).get(CarField::FuelUse),
                Some("Fuel use must be 0 for electric cars"),
                "fuel_use = {:?}",
                fuel_use
            );
        }

        let draft = CarDraft {
            electric: true,
            fuel_use: Some(0.0),
            ..valid_draft()
        };
        assert!(validate_car(&draft).is_valid());
    }

    #[test]
    fn test_combustion_requires_positive_fuel_use() {
        for fuel_use in [Some(0.0), Some(-0.5), Some(-100.0)] {
            let draft = CarDraft {
                fuel_use,
                ..valid_draft()
            };
            assert_eq!(
                validate_car(&draft).get(CarField::FuelUse),
                Some("Fuel use must be greater than 0 for non-electric cars")
            );
        }

        for fuel_use in [None, Some(f64::NAN)] {
            let draft = CarDraft {
                fuel_use,
                ..valid_draft()
            };
            assert_eq!(
                validate_car(&draft).get(CarField::FuelUse),
                Some("Fuel use value is required")
            );
        }

        for fuel_use in [0.01, 1.0, 12.5] {
            let draft = CarDraft {
                fuel_use: Some(fuel_use),
                ..valid_draft()
            };
            assert!(!validate_car(&draft).contains(CarField::FuelUse));
        }
    }

    #[test]
    fn test_owner_needs_interior_space() {
        for owner in ["Jane", "JaneDoe", " Jane", "Jane ", "Jane\tDoe"] {
            let draft = CarDraft {
                owner: owner.to_string(),
                ..valid_draft()
            };
            assert_eq!(
                validate_car(&draft).get(CarField::Owner),
                Some("Owner name must contain at least one space"),
                "owner = {:?}",
                owner
            );
        }

        for owner in ["Jane Doe", "Kovács Anna Mária", " Jane Doe "] {
            let draft = CarDraft {
                owner: owner.to_string(),
                ..valid_draft()
            };
            assert!(!validate_car(&draft).contains(CarField::Owner));
        }
    }

    #[test]
    fn test_brand_must_be_known() {
        for brand in ["Yugo", "toyota", "Trabant", " Toyota"] {
            let draft = CarDraft {
                brand: brand.to_string(),
                ..valid_draft()
            };
            assert_eq!(validate_car(&draft).get(CarField::Brand), Some("Invalid car brand"));
        }

        for brand in ["Toyota", "Mercedes-Benz", "Land Rover", "Lamborghini"] {
            let draft = CarDraft {
                brand: brand.to_string(),
                ..valid_draft()
            };
            assert!(!validate_car(&draft).contains(CarField::Brand));
        }
    }

    #[test]
    fn test_model_is_not_trimmed() {
        let draft = CarDraft {
            model: " ".to_string(),
            ..valid_draft()
        };
        assert!(!validate_car(&draft).contains(CarField::Model));
    }

    #[test]
    fn test_day_of_commission_must_be_a_date() {
        for day in ["not-a-date", "2024/01/15", "2024-02-30", "2024-13-01"] {
            let draft = CarDraft {
                day_of_commission: day.to_string(),
                ..valid_draft()
            };
            assert_eq!(
                validate_car(&draft).get(CarField::DayOfCommission),
                Some("Please enter a valid date"),
                "day = {:?}",
                day
            );
        }

        for day in ["2024-01-15", "2024-02-29", "2024-01-15T10:00:00Z"] {
            let draft = CarDraft {
                day_of_commission: day.to_string(),
                ..valid_draft()
            };
            assert!(!validate_car(&draft).contains(CarField::DayOfCommission));
        }
    }

    #[test]
    fn test_validation_is_idempotent() {
        let draft = CarDraft {
            brand: "Yugo".to_string(),
            owner: "Jane".to_string(),
            electric: true,
            fuel_use: Some(3.0),
            ..valid_draft()
        };
        assert_eq!(validate_car(&draft), validate_car(&draft));
        assert_eq!(validate_car(&draft).len(), 3);
    }

    #[test]
    fn test_validate_trait_reports_field_names() {
        let draft = CarDraft {
            model: String::new(),
            ..valid_draft()
        };
        let result = draft.validate();
        assert!(ValidationErrors::has_error(&result, "model"));
        assert!(!ValidationErrors::has_error(&result, "brand"));
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5.0).is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("2024/01/15").is_err());
    }
}
