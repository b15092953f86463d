use crate::handlers::money_handler::{list_my_requests, submit_money};
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_money_routes() -> actix_web::Scope {
    web::scope("/money")
        .route("", web::post().to(submit_money).wrap(AuthMiddleware))
        .route("", web::get().to(list_my_requests).wrap(AuthMiddleware))
}
