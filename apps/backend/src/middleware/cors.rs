use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Environment variable with comma-separated allowed origins.
pub const CORS_ALLOWED_ORIGINS_ENV: &str = "CORS_ALLOWED_ORIGINS";

/// Parse a comma-separated origin list, ignoring empty, `null` and non-http(s)
/// entries. Falls back to the local frontend when nothing valid remains.
pub fn parse_allowed_origins(raw: &str) -> Vec<String> {
    let allowed: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if allowed.is_empty() {
        vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ]
    } else {
        allowed
    }
}

/// Build CORS middleware restricted to the configured origins and the
/// methods the API serves.
pub fn cors_middleware() -> Cors {
    let raw = env::var(CORS_ALLOWED_ORIGINS_ENV).unwrap_or_default();

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    for origin in parse_allowed_origins(&raw) {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
