use actix_multipart::Multipart;
use actix_web::{web, Error, HttpResponse, ResponseError, Result};
use sea_orm::DatabaseConnection;

use crate::constants::config::get_max_upload_bytes;
use crate::errors::AppError;
use crate::forms::add_money::{AddMoneyDraft, DraftValues};
use crate::forms::multipart::read_payload;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::image_host::ImageHost;
use crate::services::money_request_service::{list_user_requests, submit_money_request};
use crate::services::submission_guard::SubmissionGuard;
use crate::types::money_request::MoneyRequestResponse;
use crate::types::response::ActionResponse;
use crate::utils::auth::require_submitter;
use crate::utils::pagination::PageQuery;

fn action_failure(err: AppError, values: Option<DraftValues>) -> HttpResponse {
    err.log();
    HttpResponse::build(err.status_code()).json(ActionResponse::<()>::failure(&err, values))
}

/// `POST /money`: the add-money form.
///
/// Always answers with an action body. Failures after the form was parsed
/// carry the entered values back so the form keeps them.
pub async fn submit_money(
    db: web::Data<DatabaseConnection>,
    image_host: web::Data<dyn ImageHost>,
    guard: web::Data<SubmissionGuard>,
    auth_user: web::ReqData<AuthenticatedUser>,
    payload: Multipart,
) -> Result<HttpResponse, Error> {
    let auth_user = auth_user.into_inner();
    if let Err(err) = require_submitter(&auth_user) {
        return Ok(action_failure(err, None));
    }

    let Some(_in_flight) = guard.try_begin(auth_user.id) else {
        return Ok(action_failure(AppError::SubmissionInFlight, None));
    };

    let payload = match read_payload(payload, get_max_upload_bytes()).await {
        Ok(payload) => payload,
        Err(err) => return Ok(action_failure(err, None)),
    };

    let draft = AddMoneyDraft::from_payload(payload);
    let values = draft.values();

    let form = match draft.into_form() {
        Ok(form) => form,
        Err(err) => return Ok(action_failure(err, Some(values))),
    };

    match submit_money_request(db.get_ref(), image_host.get_ref(), auth_user.id, form).await {
        Ok(saved) => Ok(HttpResponse::Created().json(ActionResponse::success(
            "Money request submitted",
            MoneyRequestResponse::from(saved),
        ))),
        Err(err) => Ok(action_failure(err, Some(values))),
    }
}

/// `GET /money`: the caller's own request history.
pub async fn list_my_requests(
    db: web::Data<DatabaseConnection>,
    query: web::Query<PageQuery>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let page = list_user_requests(db.get_ref(), auth_user.id, query.get_page()).await?;
    Ok(HttpResponse::Ok().json(page))
}
