use serde::Deserialize;

// Cuerpo de error que envía la API: {"message": "..."}
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parsear el cuerpo de error; si no es JSON se ignora
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}
