use actix_web::{web, App, HttpServer};
use memshare_backend::infra::db::db_url_from_env;
use memshare_backend::infra::state::build_state;
use memshare_backend::middleware::{
    cors_middleware, AuthGate, RequestTrace, StructuredLogger, TraceSpan,
};
use memshare_backend::routes;
use memshare_backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let security_config = match SecurityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid security configuration");
            std::process::exit(1);
        }
    };

    let database_url = match db_url_from_env() {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, "Invalid database configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(database_url)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(%host, port, "Starting MemShare backend");

    let data = web::Data::new(app_state);

    // Last wrap runs first: RequestTrace, TraceSpan, StructuredLogger, CORS, AuthGate
    HttpServer::new(move || {
        App::new()
            .wrap(AuthGate)
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
