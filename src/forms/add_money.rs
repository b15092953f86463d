use rust_decimal::Decimal;
use serde::Serialize;
use std::borrow::Cow;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use super::multipart::{MultipartPayload, UploadedFile};
use super::proof_image::ProofImage;
use crate::errors::{AppError, FieldErrors};

const MAX_TRANSACTION_ID_CHARS: usize = 100;

/// Largest amount that fits the `decimal(12, 2)` column.
const MAX_AMOUNT: &str = "9999999999.99";

/// The add-money form exactly as the user filled it in.
///
/// `upiid` and `account_number` are whatever the client echoed back from the
/// locked inputs. They are kept only to detect tampering; the stored values
/// always come from the user's bank details on file.
#[derive(Debug, Default, Validate)]
pub struct AddMoneyDraft {
    #[validate(custom(function = "validate_amount"))]
    pub amount: String,
    #[validate(custom(function = "validate_transaction_id"))]
    pub transaction_id: String,
    #[validate(required(message = "Attach the payment screenshot"))]
    pub image: Option<UploadedFile>,
    pub is_pro_recharge: bool,
    pub upiid: Option<String>,
    pub account_number: Option<String>,
    /// Parts the multipart reader already refused, e.g. an oversized screenshot.
    pub upload_errors: FieldErrors,
}

/// What the form sends back on error so the user does not retype it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftValues {
    pub amount: String,
    pub transaction_id: String,
    pub is_pro_recharge: bool,
}

/// A draft that passed validation.
#[derive(Debug, Clone)]
pub struct AddMoneyForm {
    pub amount: Decimal,
    pub transaction_id: String,
    pub image: ProofImage,
    pub is_pro_recharge: bool,
    pub claimed_upiid: Option<String>,
    pub claimed_account_number: Option<String>,
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_amount(amount: &str) -> Result<(), ValidationError> {
    let raw = amount.trim();
    if raw.is_empty() {
        return Err(field_error("required", "Amount is required"));
    }
    let value = Decimal::from_str(raw)
        .map_err(|_| field_error("not_a_number", "Amount must be a number"))?;
    if value <= Decimal::ZERO {
        return Err(field_error("not_positive", "Amount must be greater than 0"));
    }
    if value.normalize().scale() > 2 {
        return Err(field_error(
            "too_precise",
            "Amount can have at most 2 decimal places",
        ));
    }
    let max = Decimal::from_str(MAX_AMOUNT).unwrap_or(Decimal::MAX);
    if value > max {
        return Err(field_error("too_large", "Amount is too large"));
    }
    Ok(())
}

fn validate_transaction_id(transaction_id: &str) -> Result<(), ValidationError> {
    if transaction_id.trim().is_empty() {
        return Err(field_error("required", "Transaction ID is required"));
    }
    if transaction_id.chars().count() > MAX_TRANSACTION_ID_CHARS {
        return Err(field_error(
            "too_long",
            "Transaction ID must be at most 100 characters",
        ));
    }
    Ok(())
}

impl AddMoneyDraft {
    /// Assembles a draft from the multipart fields the dashboard sends:
    /// `amount`, `transactionId`, `upiid`, `accountNumber`, `image` and the
    /// optional `isProRecharge`. `userId` is ignored; the caller is the owner.
    pub fn from_payload(mut payload: MultipartPayload) -> Self {
        Self {
            amount: payload.text("amount").unwrap_or_default().trim().to_string(),
            transaction_id: payload
                .text("transactionId")
                .unwrap_or_default()
                .trim()
                .to_string(),
            is_pro_recharge: payload.flag("isProRecharge"),
            upiid: payload.text("upiid").map(|v| v.trim().to_string()),
            account_number: payload.text("accountNumber").map(|v| v.trim().to_string()),
            image: payload.take_file("image"),
            upload_errors: std::mem::take(&mut payload.errors),
        }
    }

    pub fn values(&self) -> DraftValues {
        DraftValues {
            amount: self.amount.clone(),
            transaction_id: self.transaction_id.clone(),
            is_pro_recharge: self.is_pro_recharge,
        }
    }

    /// Runs the schema and, if it holds, turns the draft into a form ready to
    /// submit. Every failing field is reported, not just the first.
    pub fn into_form(self) -> Result<AddMoneyForm, AppError> {
        let mut fields = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => match AppError::from(errors) {
                AppError::Validation(fields) => fields,
                other => return Err(other),
            },
        };

        // A refused part replaces whatever the schema said about the same field.
        fields.extend(self.upload_errors);

        let image = self.image.and_then(|file| {
            let sniffed = ProofImage::sniff(file);
            if sniffed.is_none() {
                fields
                    .entry("image".to_string())
                    .or_default()
                    .push("The screenshot must be an image".to_string());
            }
            sniffed
        });

        if !fields.is_empty() {
            return Err(AppError::Validation(fields));
        }

        let (Some(image), Ok(amount)) = (image, Decimal::from_str(&self.amount)) else {
            return Err(AppError::field("image", "Attach the payment screenshot"));
        };

        Ok(AddMoneyForm {
            amount,
            transaction_id: self.transaction_id,
            image,
            is_pro_recharge: self.is_pro_recharge,
            claimed_upiid: self.upiid,
            claimed_account_number: self.account_number,
        })
    }
}
