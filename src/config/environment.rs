//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use thiserror::Error;
use tracing::Level;

use crate::client::DEFAULT_API_BASE_URL;
use crate::models::scope::ScopeKey;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LOG_LEVEL must be one of trace, debug, info, warn, error (got '{0}')")]
    InvalidLogLevel(String),
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    pub log_level: Level,
    /// Código Neptun inicial, si lo hay
    pub neptun_code: Option<ScopeKey>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: Level::INFO,
            neptun_code: None,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer la configuración con una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_level = match non_empty("LOG_LEVEL") {
            Some(raw) => Level::from_str(raw.trim()).map_err(|_| ConfigError::InvalidLogLevel(raw))?,
            None => defaults.log_level,
        };

        Ok(Self {
            environment: non_empty("ENVIRONMENT").unwrap_or(defaults.environment),
            api_base_url: non_empty("API_BASE_URL").unwrap_or(defaults.api_base_url),
            log_level,
            neptun_code: lookup("NEPTUN_CODE").and_then(|code| ScopeKey::new(code).ok()),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_base_url, "https://iit-playground.arondev.hu");
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.neptun_code, None);
    }

    #[test]
    fn test_values_from_lookup() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("API_BASE_URL", "http://localhost:9000"),
            ("LOG_LEVEL", "debug"),
            ("NEPTUN_CODE", "ABC123"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.neptun_code.map(String::from), Some("ABC123".to_string()));
    }

    #[test]
    fn test_invalid_log_level() {
        let result = EnvironmentConfig::from_lookup(lookup_from(&[("LOG_LEVEL", "loud")]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidLogLevel("loud".to_string())
        );
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("API_BASE_URL", "  "),
            ("NEPTUN_CODE", ""),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.neptun_code, None);
    }
}
