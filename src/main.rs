use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use vehicle_booking::config::environment::EnvironmentConfig;
use vehicle_booking::middleware::cors::cors_middleware;
use vehicle_booking::state::AppState;
use vehicle_booking::{api, database};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Vehicle Booking - Backend");

    let config = EnvironmentConfig::from_env()?;

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Error connecting to the database: {}", e);
            return Err(e);
        }
    };

    let app_state = AppState::new(pool, config.clone());

    let app: Router = api::create_api_router(app_state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("Server listening on http://{}", addr);
    if config.is_development() {
        info!("Running in development mode");
    }
    info!("Endpoints:");
    info!("   GET  /                    - Public booking calendar (month?, year?)");
    info!("   POST /api/auth/login      - Login");
    info!("   GET  /api/auth/me         - Current identity");
    info!("   *    /api/bookings[/:id]  - Booking CRUD");
    info!("   *    /api/vehicles[/:id]  - Vehicle CRUD (writes: admin)");
    info!("   *    /api/drivers[/:id]   - Driver CRUD (writes: admin)");
    info!("   *    /api/users[/:id]     - User CRUD (admin)");
    info!("   GET  /api/summary         - Dashboard counters");
    info!("   GET  /api/dashboard       - Dashboard data (fan-out)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("Server stopped");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("Terminate signal received, shutting down...");
        },
    }
}
