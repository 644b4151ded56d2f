use axum::{middleware, routing::get, Router};

use crate::handlers;
use crate::system::auth::middleware::{require_admin, require_auth};

/// Роуты журнала использования API
pub fn configure_log_routes() -> Router {
    Router::new()
        .route(
            "/api/log/",
            get(handlers::logs::list_all)
                .post(handlers::logs::create)
                .delete(handlers::logs::delete_history)
                .layer(middleware::from_fn(require_admin)),
        )
        .route(
            "/api/log/self/",
            get(handlers::logs::list_self).layer(middleware::from_fn(require_auth)),
        )
}
