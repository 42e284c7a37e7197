mod cli;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::{info, warn};

use car_registry::client::CarApiClient;
use car_registry::config::EnvironmentConfig;
use car_registry::navigation::Route;

use cli::{App, Prompt};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging; stdout queda para la interfaz
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();

    info!("🚗 Car Registry - cliente de gestión de coches");
    info!("🌍 Entorno: {}", config.environment);
    info!("🔗 API: {}", config.api_base_url);

    let client = CarApiClient::new(config.api_base_url.clone())?;

    // Dirección inicial: argumento, luego NEPTUN_CODE, luego "/"
    let start = match std::env::args().nth(1) {
        Some(address) => match Route::parse(&address) {
            Ok(route) => route,
            Err(e) => {
                warn!("⚠️ Dirección ignorada '{}': {}", address, e);
                Route::Home { scope: config.neptun_code.clone() }
            }
        },
        None => Route::Home { scope: config.neptun_code.clone() },
    };
    info!("🧭 Inicio en {}", start.to_path());

    let stdin = io::stdin();
    let prompt = Prompt::new(stdin.lock(), io::stdout());
    let mut app = App::new(Arc::new(client), start, prompt);
    app.run().await
}
