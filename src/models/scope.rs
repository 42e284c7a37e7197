//! Código Neptun
//!
//! Identificador opaco que particiona los coches por usuario. Aparece tal cual
//! en las rutas de la API y en las direcciones compartibles.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScopeKey(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Neptun code is required")]
pub struct EmptyScopeKey;

impl ScopeKey {
    /// Solo se rechaza el código vacío; el resto se pasa sin tocar
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyScopeKey> {
        let value = value.into();
        if value.is_empty() {
            return Err(EmptyScopeKey);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segmento de ruta codificado para URLs
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl TryFrom<String> for ScopeKey {
    type Error = EmptyScopeKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ScopeKey::new(value)
    }
}

impl From<ScopeKey> for String {
    fn from(key: ScopeKey) -> Self {
        key.0
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_code_is_rejected() {
        assert_eq!(ScopeKey::new(""), Err(EmptyScopeKey));
        assert!(ScopeKey::new("ABC123").is_ok());
    }

    #[test]
    fn test_code_is_encoded_for_paths() {
        let key = ScopeKey::new("AB C/1").unwrap();
        assert_eq!(key.as_str(), "AB C/1");
        assert_eq!(key.encoded(), "AB%20C%2F1");
    }
}
