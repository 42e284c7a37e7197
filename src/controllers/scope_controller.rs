//! Pantalla de entrada del código Neptun
//!
//! El código enviado se refleja en la dirección para poder compartirla.

use crate::models::scope::{EmptyScopeKey, ScopeKey};
use crate::navigation::{History, Route};

pub const ENTER_SCOPE_PROMPT: &str = "Please enter your Neptun code to view and manage cars.";

#[derive(Debug, Clone, Default)]
pub struct ScopeEntry {
    input: String,
    submitted: Option<ScopeKey>,
}

impl ScopeEntry {
    /// Sembrar desde el parámetro `neptun` de la dirección actual
    pub fn from_route(route: &Route) -> Self {
        let submitted = route.scope().cloned();
        Self {
            input: submitted.as_ref().map(|s| s.to_string()).unwrap_or_default(),
            submitted,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn submitted(&self) -> Option<&ScopeKey> {
        self.submitted.as_ref()
    }

    /// Enviar el código y reflejarlo en la dirección
    pub fn submit(&mut self, history: &mut History) -> Result<ScopeKey, EmptyScopeKey> {
        let scope = ScopeKey::new(self.input.clone())?;
        self.submitted = Some(scope.clone());
        history.push(Route::home(scope.clone()));
        Ok(scope)
    }
}
