use entity::money_requests::{self, MoneyRequestStatus};
use sea_orm::prelude::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::currency::format_price;
use crate::utils::pagination::PaginationInfo;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: MoneyRequestStatus,
}

/// A request as its owner sees it.
#[derive(Debug, Serialize)]
pub struct MoneyRequestResponse {
    pub id: i32,
    pub transaction_id: String,
    pub amount: Decimal,
    pub amount_formatted: String,
    pub upiid: String,
    pub account_number: String,
    pub is_pro_recharge: bool,
    pub proof_image_url: String,
    pub status: MoneyRequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<money_requests::Model> for MoneyRequestResponse {
    fn from(request: money_requests::Model) -> Self {
        Self {
            id: request.id,
            amount_formatted: format_price(request.amount),
            transaction_id: request.transaction_id,
            amount: request.amount,
            upiid: request.upiid,
            account_number: request.account_number,
            is_pro_recharge: request.is_pro_recharge,
            proof_image_url: request.secure_url,
            status: request.status,
            created_at: request.created_at.and_utc(),
        }
    }
}

/// One row of the admin review table.
#[derive(Debug, Serialize)]
pub struct PendingRow {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub transaction_id: String,
    pub amount: Decimal,
    pub amount_formatted: String,
    pub is_pro_recharge: bool,
    pub proof_image_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<money_requests::Model> for PendingRow {
    fn from(request: money_requests::Model) -> Self {
        Self {
            id: request.id,
            user_id: request.user_id,
            name: request.name,
            transaction_id: request.transaction_id,
            amount_formatted: format_price(request.amount),
            amount: request.amount,
            is_pro_recharge: request.is_pro_recharge,
            proof_image_url: request.secure_url,
            created_at: request.created_at.and_utc(),
        }
    }
}

/// The admin wallet view: one page of the pending queue.
///
/// `page_total` sums only the rows on this page, not the whole queue.
#[derive(Debug, Serialize)]
pub struct AdminWalletPage {
    pub items: Vec<PendingRow>,
    pub pagination: PaginationInfo,
    pub page_total: Decimal,
    pub page_total_formatted: String,
    pub show_footer: bool,
    pub show_pagination: bool,
}

impl AdminWalletPage {
    pub fn new(items: Vec<PendingRow>, pagination: PaginationInfo) -> Self {
        let page_total: Decimal = items.iter().map(|row| row.amount).sum();
        Self {
            show_footer: pagination.total_items != 0,
            show_pagination: pagination.has_multiple_pages(),
            page_total_formatted: format_price(page_total),
            page_total,
            items,
            pagination,
        }
    }
}
