//! Direcciones de la aplicación
//!
//! El código Neptun viaja en la dirección (`/?neptun=ABC123`) para que el
//! estado se pueda compartir y guardar en marcadores.

use thiserror::Error;
use url::form_urlencoded;

use crate::models::scope::ScopeKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Pantalla principal: entrada del código y lista de coches
    Home { scope: Option<ScopeKey> },
    /// Página independiente de edición
    EditCar { id: String, scope: Option<ScopeKey> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Unknown address: {0}")]
    UnknownPath(String),

    #[error("Malformed address: {0}")]
    Malformed(String),
}

impl Route {
    /// Lista de coches del código dado
    pub fn home(scope: ScopeKey) -> Self {
        Route::Home { scope: Some(scope) }
    }

    pub fn scope(&self) -> Option<&ScopeKey> {
        match self {
            Route::Home { scope } | Route::EditCar { scope, .. } => scope.as_ref(),
        }
    }

    pub fn to_path(&self) -> String {
        let (path, scope) = match self {
            Route::Home { scope } => ("/".to_string(), scope),
            Route::EditCar { id, scope } => (format!("/cars/edit/{}", urlencoding::encode(id)), scope),
        };

        match scope {
            Some(scope) => format!("{}?neptun={}", path, scope.encoded()),
            None => path,
        }
    }

    pub fn parse(address: &str) -> Result<Self, RouteError> {
        let (path, query) = match address.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (address, None),
        };

        let scope = query.and_then(neptun_param);

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Ok(Route::Home { scope }),
            ["cars", "edit", id] => {
                let id = urlencoding::decode(id)
                    .map_err(|_| RouteError::Malformed(address.to_string()))?
                    .into_owned();
                Ok(Route::EditCar { id, scope })
            }
            _ => Err(RouteError::UnknownPath(path.to_string())),
        }
    }
}

fn neptun_param(query: &str) -> Option<ScopeKey> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "neptun")
        .and_then(|(_, value)| ScopeKey::new(value.into_owned()).ok())
}

/// Historial de direcciones (la barra de direcciones)
/// Entradas anteriores que se conservan
const MAX_PAST_ROUTES: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
    current: Route,
    past: Vec<Route>,
}

impl History {
    pub fn new(initial: Route) -> Self {
        Self {
            current: initial,
            past: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Navegar a `route`. Repetir la dirección actual no crea entrada nueva.
    pub fn push(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        tracing::debug!("🧭 {}", route.to_path());
        let previous = std::mem::replace(&mut self.current, route);
        if self.past.len() == MAX_PAST_ROUTES {
            self.past.remove(0);
        }
        self.past.push(previous);
    }

    /// Volver atrás; en la primera entrada no hace nada
    pub fn back(&mut self) -> &Route {
        if let Some(previous) = self.past.pop() {
            self.current = previous;
        }
        &self.current
    }

    /// Número de entradas, incluida la actual
    pub fn depth(&self) -> usize {
        self.past.len() + 1
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Home { scope: None })
    }
}
