use axum::{Router, routing::get};

pub mod products;
pub mod system;

/// Router for all tracker endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/role", get(system::current_role).put(system::set_role))
        .nest("/products", products::router())
}
