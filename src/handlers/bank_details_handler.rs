use actix_multipart::Multipart;
use actix_web::{web, Error, HttpResponse, Result};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::constants::config::get_max_upload_bytes;
use crate::errors::AppError;
use crate::forms::bank_details::BankDetailsDraft;
use crate::forms::multipart::read_payload;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::bank_details_service::{get_bank_details, upsert_bank_details};
use crate::services::image_host::ImageHost;
use crate::types::bank_details::BankDetailsResponse;

pub async fn get_my_bank_details(
    db: web::Data<DatabaseConnection>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let details = get_bank_details(db.get_ref(), auth_user.id)
        .await?
        .ok_or(AppError::NotFound("Bank details"))?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Bank details retrieved successfully",
        "status": "success",
        "data": BankDetailsResponse::from(details),
    })))
}

pub async fn save_my_bank_details(
    db: web::Data<DatabaseConnection>,
    image_host: web::Data<dyn ImageHost>,
    auth_user: web::ReqData<AuthenticatedUser>,
    payload: Multipart,
) -> Result<HttpResponse, Error> {
    let payload = read_payload(payload, get_max_upload_bytes()).await?;
    let form = BankDetailsDraft::from_payload(payload).into_form()?;

    let saved = upsert_bank_details(db.get_ref(), image_host.get_ref(), auth_user.id, form).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Bank details saved",
        "status": "success",
        "data": BankDetailsResponse::from(saved),
    })))
}
