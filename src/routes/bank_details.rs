use crate::handlers::bank_details_handler::{get_my_bank_details, save_my_bank_details};
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_bank_details_routes() -> actix_web::Scope {
    web::scope("/bank-details")
        .route("", web::get().to(get_my_bank_details).wrap(AuthMiddleware))
        .route("", web::put().to(save_my_bank_details).wrap(AuthMiddleware))
}
