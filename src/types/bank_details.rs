use entity::bank_details;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BankDetailsResponse {
    pub upiid: String,
    pub account_details: String,
    pub document_url: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<bank_details::Model> for BankDetailsResponse {
    fn from(details: bank_details::Model) -> Self {
        Self {
            upiid: details.upiid,
            account_details: details.account_details,
            document_url: Some(details.secure_url).filter(|url| !url.is_empty()),
            updated_at: details.updated_at.and_utc(),
        }
    }
}
