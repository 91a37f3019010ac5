use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use hms_api::{build_router, AppState};
use hms_core::mailer::Mailer;
use hms_infrastructure::database::connection;
use hms_infrastructure::SmtpMailer;
use hms_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    hms_shared::telemetry::init_telemetry();

    info!("HMS Server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool =
        connection::create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database connection established.");

    // Optional SMTP mailer for reservation confirmations
    let mailer: Option<Arc<dyn Mailer>> = if config.smtp.enabled {
        match SmtpMailer::new(&config.smtp) {
            Ok(m) => {
                info!("SMTP mailer enabled ({})", config.smtp.host);
                Some(Arc::new(m))
            }
            Err(e) => {
                warn!("SMTP mailer disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));

    let state = AppState::new(pool, config, mailer);

    let app = build_router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ]),
    );

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
