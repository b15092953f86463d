use entity::users::UserRole;
use sea_orm::prelude::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub name: String,
    pub role: UserRole,
    pub wallet_balance: Decimal,
    pub wallet_balance_formatted: String,
    pub my_pending_requests: u64,
    /// Size of the whole pending queue; only present for reviewers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_queue: Option<u64>,
}
