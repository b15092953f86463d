use crate::handlers::health::health_check;
use actix_web::web;

pub fn configure_routes() -> actix_web::Scope {
    web::scope("")
        .route("/health", web::get().to(health_check))
        .service(crate::routes::money::configure_money_routes())
        .service(crate::routes::admin::configure_admin_routes())
        .service(crate::routes::bank_details::configure_bank_details_routes())
        .service(crate::routes::dashboard::configure_dashboard_routes())
}
