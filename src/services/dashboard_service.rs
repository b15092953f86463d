use entity::users;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::errors::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::money_request_service::count_pending;
use crate::types::dashboard::DashboardResponse;
use crate::utils::currency::format_price;

pub async fn load_dashboard(
    db: &DatabaseConnection,
    principal: &AuthenticatedUser,
) -> Result<DashboardResponse, AppError> {
    let user = users::Entity::find_by_id(principal.id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let my_pending_requests = count_pending(db, Some(user.id)).await?;
    let pending_queue = if principal.can_review_requests() {
        Some(count_pending(db, None).await?)
    } else {
        None
    };

    Ok(DashboardResponse {
        wallet_balance_formatted: format_price(user.wallet_balance),
        wallet_balance: user.wallet_balance,
        name: user.name,
        role: user.role,
        my_pending_requests,
        pending_queue,
    })
}
