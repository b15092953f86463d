use chrono::Utc;
use entity::bank_details;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::errors::AppError;
use crate::forms::bank_details::BankDetailsForm;
use crate::services::image_host::{HostedImage, ImageHost};

pub const DOCUMENT_FOLDER: &str = "bank-details";

pub async fn get_bank_details(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Option<bank_details::Model>, AppError> {
    Ok(bank_details::Entity::find()
        .filter(bank_details::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

/// Creates or replaces the caller's bank details. A new document replaces the
/// hosted one, which is then removed; without one the old document stays.
pub async fn upsert_bank_details(
    db: &DatabaseConnection,
    image_host: &dyn ImageHost,
    user_id: i32,
    form: BankDetailsForm,
) -> Result<bank_details::Model, AppError> {
    let uploaded = match &form.document {
        Some(document) => Some(image_host.upload(document, DOCUMENT_FOLDER).await?),
        None => None,
    };

    let existing = get_bank_details(db, user_id).await?;
    let now = Utc::now().naive_utc();

    let result = match existing.clone() {
        Some(current) => {
            let mut active: bank_details::ActiveModel = current.into();
            active.upiid = Set(form.upiid);
            active.account_details = Set(form.account_details);
            if let Some(hosted) = &uploaded {
                active.secure_url = Set(hosted.secure_url.clone());
                active.public_id = Set(hosted.public_id.clone());
            }
            active.updated_at = Set(now);
            active.update(db).await
        }
        None => {
            let hosted = uploaded.clone().unwrap_or(HostedImage {
                secure_url: String::new(),
                public_id: String::new(),
            });
            bank_details::ActiveModel {
                user_id: Set(user_id),
                upiid: Set(form.upiid),
                account_details: Set(form.account_details),
                secure_url: Set(hosted.secure_url),
                public_id: Set(hosted.public_id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await
        }
    };

    let saved = match result {
        Ok(saved) => saved,
        Err(e) => {
            log::error!("Failed to save bank details for user {}: {}", user_id, e);
            if let Some(hosted) = &uploaded {
                discard(image_host, &hosted.public_id).await;
            }
            return Err(e.into());
        }
    };

    if uploaded.is_some() {
        if let Some(previous) = existing.filter(|p| !p.public_id.is_empty()) {
            discard(image_host, &previous.public_id).await;
        }
    }

    log::info!("Bank details saved for user {}", user_id);
    Ok(saved)
}

async fn discard(image_host: &dyn ImageHost, public_id: &str) {
    if let Err(e) = image_host.destroy(public_id).await {
        log::warn!("Failed to remove bank document {}: {}", public_id, e);
    }
}
