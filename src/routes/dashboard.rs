use crate::handlers::dashboard_handler::get_dashboard;
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_dashboard_routes() -> actix_web::Scope {
    web::scope("/dashboard").route("", web::get().to(get_dashboard).wrap(AuthMiddleware))
}
