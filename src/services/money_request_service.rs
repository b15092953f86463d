use chrono::Utc;
use entity::money_requests::{self, MoneyRequestStatus};
use entity::users::{self, UserRole};
use entity::bank_details;
use sea_orm::sea_query::Expr;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, DbErr, EntityTrait, IsolationLevel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::constants::config::PENDING_PAGE_SIZE;
use crate::errors::AppError;
use crate::forms::add_money::AddMoneyForm;
use crate::services::image_host::ImageHost;
use crate::types::money_request::{AdminWalletPage, MoneyRequestResponse, PendingRow};
use crate::utils::pagination::{PageWindow, PaginatedResponse, PaginationInfo};

/// Image host folder for payment screenshots.
pub const PROOF_FOLDER: &str = "proofs";

/// Opens the transaction that a count and the page it describes share.
///
/// Postgres gets a read-only repeatable-read snapshot. Other backends (the
/// SQLite test database) fall back to a plain transaction.
pub async fn begin_snapshot(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    match db.get_database_backend() {
        DbBackend::Postgres => {
            db.begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await
        }
        _ => db.begin().await,
    }
}

/// Persists a validated add-money form as a `PENDING` request owned by `user_id`.
///
/// The payment fields are taken from the user's bank details on file. Values
/// the client sent for them are only compared, never stored.
pub async fn submit_money_request(
    db: &DatabaseConnection,
    image_host: &dyn ImageHost,
    user_id: i32,
    form: AddMoneyForm,
) -> Result<money_requests::Model, AppError> {
    let user = users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    if user.role == UserRole::Blocked {
        return Err(AppError::Forbidden("Your account is blocked".to_string()));
    }

    let bank = bank_details::Entity::find()
        .filter(bank_details::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    let (upiid, account_number) = bank
        .map(|b| (b.upiid, b.account_details))
        .unwrap_or_default();

    if client_payment_differs(&form.claimed_upiid, &upiid)
        || client_payment_differs(&form.claimed_account_number, &account_number)
    {
        log::warn!(
            "User {} submitted payment fields that differ from bank details on file; using stored values",
            user_id
        );
    }

    let hosted = image_host.upload(&form.image, PROOF_FOLDER).await?;

    let now = Utc::now().naive_utc();
    let request = money_requests::ActiveModel {
        user_id: Set(user_id),
        name: Set(user.name),
        transaction_id: Set(form.transaction_id),
        amount: Set(form.amount),
        upiid: Set(upiid),
        account_number: Set(account_number),
        is_pro_recharge: Set(form.is_pro_recharge),
        secure_url: Set(hosted.secure_url),
        public_id: Set(hosted.public_id.clone()),
        status: Set(MoneyRequestStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = match request.insert(db).await {
        Ok(saved) => saved,
        Err(e) => {
            log::error!("Failed to save money request for user {}: {}", user_id, e);
            if let Err(cleanup) = image_host.destroy(&hosted.public_id).await {
                log::warn!(
                    "Failed to remove orphaned proof image {}: {}",
                    hosted.public_id,
                    cleanup
                );
            }
            return Err(e.into());
        }
    };

    log::info!(
        "Money request {} submitted by user {} for {}",
        saved.id,
        user_id,
        saved.amount
    );
    Ok(saved)
}

fn client_payment_differs(claimed: &Option<String>, on_file: &str) -> bool {
    claimed
        .as_deref()
        .is_some_and(|value| !value.is_empty() && value != on_file)
}

/// One page of the pending queue, newest first.
pub async fn list_pending_page(
    db: &DatabaseConnection,
    page: u64,
) -> Result<AdminWalletPage, AppError> {
    let window = PageWindow::new(page, PENDING_PAGE_SIZE);
    let txn = begin_snapshot(db).await?;

    let pending = money_requests::Entity::find()
        .filter(money_requests::Column::Status.eq(MoneyRequestStatus::Pending));

    let total_items = pending.to_owned().count(&txn).await?;
    let rows = pending
        .order_by_desc(money_requests::Column::Id)
        .offset(window.offset())
        .limit(window.limit())
        .all(&txn)
        .await?;

    txn.commit().await?;

    let items = rows.into_iter().map(PendingRow::from).collect();
    Ok(AdminWalletPage::new(
        items,
        PaginationInfo::new(window.page, total_items, window.page_size),
    ))
}

/// The caller's own requests in every status, newest first.
pub async fn list_user_requests(
    db: &DatabaseConnection,
    user_id: i32,
    page: u64,
) -> Result<PaginatedResponse<MoneyRequestResponse>, AppError> {
    let window = PageWindow::new(page, PENDING_PAGE_SIZE);
    let txn = begin_snapshot(db).await?;

    let mine = money_requests::Entity::find()
        .filter(money_requests::Column::UserId.eq(user_id));

    let total_items = mine.to_owned().count(&txn).await?;
    let rows = mine
        .order_by_desc(money_requests::Column::Id)
        .offset(window.offset())
        .limit(window.limit())
        .all(&txn)
        .await?;

    txn.commit().await?;

    Ok(PaginatedResponse::new(
        rows.into_iter().map(MoneyRequestResponse::from).collect(),
        PaginationInfo::new(window.page, total_items, window.page_size),
    ))
}

pub async fn count_pending<C: ConnectionTrait>(
    db: &C,
    user_id: Option<i32>,
) -> Result<u64, DbErr> {
    let mut query = money_requests::Entity::find()
        .filter(money_requests::Column::Status.eq(MoneyRequestStatus::Pending));
    if let Some(user_id) = user_id {
        query = query.filter(money_requests::Column::UserId.eq(user_id));
    }
    query.count(db).await
}

/// Moves a pending request to `target`.
///
/// Only a row still `PENDING` is updated, so concurrent reviewers cannot both
/// win. Approval credits the owner's wallet in the same transaction and, for a
/// pro recharge, upgrades a plain user to `PRO`.
pub async fn transition_status(
    db: &DatabaseConnection,
    request_id: i32,
    target: MoneyRequestStatus,
) -> Result<money_requests::Model, AppError> {
    if !target.is_terminal() {
        return Err(AppError::InvalidStatus(
            "status must be APPROVED or REJECTED".to_string(),
        ));
    }

    let now = Utc::now().naive_utc();
    let txn = db.begin().await?;

    let updated = money_requests::Entity::update_many()
        .col_expr(money_requests::Column::Status, Expr::value(target))
        .col_expr(money_requests::Column::UpdatedAt, Expr::value(now))
        .filter(money_requests::Column::Id.eq(request_id))
        .filter(money_requests::Column::Status.eq(MoneyRequestStatus::Pending))
        .exec(&txn)
        .await?;

    if updated.rows_affected == 0 {
        let existing = money_requests::Entity::find_by_id(request_id)
            .one(&txn)
            .await?;
        txn.rollback().await?;
        return Err(match existing {
            Some(_) => AppError::AlreadyProcessed(request_id),
            None => AppError::NotFound("Money request"),
        });
    }

    let request = money_requests::Entity::find_by_id(request_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("Money request"))?;

    if target == MoneyRequestStatus::Approved {
        credit_owner(&txn, &request, now).await?;
    }

    txn.commit().await?;

    log::info!(
        "Money request {} for user {} moved to {:?}",
        request.id,
        request.user_id,
        target
    );
    Ok(request)
}

async fn credit_owner(
    txn: &DatabaseTransaction,
    request: &money_requests::Model,
    now: chrono::NaiveDateTime,
) -> Result<(), AppError> {
    let credited = users::Entity::update_many()
        .col_expr(
            users::Column::WalletBalance,
            Expr::col(users::Column::WalletBalance).add(request.amount),
        )
        .col_expr(users::Column::UpdatedAt, Expr::value(now))
        .filter(users::Column::Id.eq(request.user_id))
        .exec(txn)
        .await?;

    if credited.rows_affected == 0 {
        return Err(AppError::NotFound("User"));
    }

    if request.is_pro_recharge {
        let promoted = users::Entity::update_many()
            .col_expr(users::Column::Role, Expr::value(UserRole::Pro))
            .filter(users::Column::Id.eq(request.user_id))
            .filter(users::Column::Role.eq(UserRole::User))
            .exec(txn)
            .await?;
        if promoted.rows_affected > 0 {
            log::info!("User {} upgraded to PRO", request.user_id);
        }
    }

    Ok(())
}
