use axum::routing::get;
use axum::Router;

pub mod actors;
pub mod common;
pub mod customers;
pub mod films;
pub mod system;

/// Router for the whole API surface.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::info))
        .route("/health", get(system::health))
        .nest("/films", films::router())
        .nest("/actors", actors::router())
        .nest("/customers", customers::router())
}
