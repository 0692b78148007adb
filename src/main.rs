use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_inspection::config::seed::load_seed;
use fleet_inspection::config::{CatalogConfig, EnvironmentConfig};
use fleet_inspection::repositories::FleetStore;
use fleet_inspection::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚛 Fleet Inspection API");
    info!("======================");

    let config = EnvironmentConfig::from_env()?;

    let store = match &config.seed_path {
        Some(path) => load_seed(path, config.bcrypt_cost)?.into_store(),
        None => {
            warn!("⚠️ SEED_PATH not set, starting with an empty catalog");
            FleetStore::default()
        }
    };

    let catalog_config = CatalogConfig::load(
        config.submodules_path.as_deref(),
        config.simplified_name_exclusions.clone(),
    )?;
    if !catalog_config.simplified_name_exclusions.is_empty() {
        info!(
            "✂️ Simplified checklist excludes: {}",
            catalog_config.simplified_name_exclusions.join(", ")
        );
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_router(AppState::new(config, store, catalog_config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    info!("   POST /api/auth/login | /api/auth/recover");
    info!("   GET  /api/me | /api/home");
    info!("   CRUD /api/vehicles | /api/drivers | /api/check-items | /api/users");
    info!("   *    /api/inspection/...");
    info!("   GET  /api/reports | /api/reports/:id | /api/reports/stats");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
