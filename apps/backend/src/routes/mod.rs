use actix_web::web;

pub mod auth;
pub mod groups;
pub mod health;
pub mod memories;

/// Versioned API prefix.
pub const API_PREFIX: &str = "/api/v1";

/// Register every route under `/api/v1`.
///
/// Authentication is not enforced here: `AuthGate` wraps the app and the
/// `CurrentIdentity` / `MaybeIdentity` extractors decide per handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .configure(health::configure_routes)
            .service(web::scope("/auth").configure(auth::configure_routes))
            .service(web::scope("/memories").configure(memories::configure_routes))
            .service(web::scope("/groups").configure(groups::configure_routes)),
    );
}
