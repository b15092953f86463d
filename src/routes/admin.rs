use crate::handlers::admin_wallet_handler::{list_pending_requests, update_request_status};
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_admin_routes() -> actix_web::Scope {
    web::scope("/admin")
        .route(
            "/wallet",
            web::get().to(list_pending_requests).wrap(AuthMiddleware),
        )
        .route(
            "/wallet/{request_id}/status",
            web::post().to(update_request_status).wrap(AuthMiddleware),
        )
}
