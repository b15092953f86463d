use actix_web::{web, Error, HttpResponse, Result};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::middleware::auth::AuthenticatedUser;
use crate::services::money_request_service::{list_pending_page, transition_status};
use crate::types::money_request::{MoneyRequestResponse, UpdateStatusRequest};
use crate::utils::auth::require_reviewer;
use crate::utils::pagination::PageQuery;

pub async fn list_pending_requests(
    db: web::Data<DatabaseConnection>,
    query: web::Query<PageQuery>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    require_reviewer(&auth_user)?;

    let page = list_pending_page(db.get_ref(), query.get_page()).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn update_request_status(
    db: web::Data<DatabaseConnection>,
    request_id: web::Path<i32>,
    req: web::Json<UpdateStatusRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    require_reviewer(&auth_user)?;

    let updated = transition_status(db.get_ref(), request_id.into_inner(), req.status).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Money request {} updated", updated.id),
        "status": "success",
        "data": MoneyRequestResponse::from(updated),
    })))
}
