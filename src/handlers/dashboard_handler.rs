use actix_web::{web, Error, HttpResponse, Result};
use sea_orm::DatabaseConnection;

use crate::middleware::auth::AuthenticatedUser;
use crate::services::dashboard_service::load_dashboard;

pub async fn get_dashboard(
    db: web::Data<DatabaseConnection>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let dashboard = load_dashboard(db.get_ref(), &auth_user).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}
