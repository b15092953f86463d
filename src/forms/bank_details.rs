use validator::Validate;

use super::multipart::{MultipartPayload, UploadedFile};
use super::proof_image::ProofImage;
use crate::errors::{AppError, FieldErrors};

#[derive(Debug, Default, Validate)]
pub struct BankDetailsDraft {
    #[validate(length(min = 1, max = 100, message = "UPI ID is required"))]
    pub upiid: String,
    #[validate(length(min = 1, max = 255, message = "Account details are required"))]
    pub account_details: String,
    pub document: Option<UploadedFile>,
    pub upload_errors: FieldErrors,
}

#[derive(Debug, Clone)]
pub struct BankDetailsForm {
    pub upiid: String,
    pub account_details: String,
    /// Replaces the stored document when present; otherwise the old one stays.
    pub document: Option<ProofImage>,
}

impl BankDetailsDraft {
    pub fn from_payload(mut payload: MultipartPayload) -> Self {
        Self {
            upiid: payload.text("upiid").unwrap_or_default().trim().to_string(),
            account_details: payload
                .text("accountDetails")
                .unwrap_or_default()
                .trim()
                .to_string(),
            document: payload.take_file("image"),
            upload_errors: std::mem::take(&mut payload.errors),
        }
    }

    pub fn into_form(self) -> Result<BankDetailsForm, AppError> {
        let mut fields = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => match AppError::from(errors) {
                AppError::Validation(fields) => fields,
                other => return Err(other),
            },
        };
        fields.extend(self.upload_errors);
        if !fields.is_empty() {
            return Err(AppError::Validation(fields));
        }

        let document = match self.document {
            Some(file) => Some(
                ProofImage::sniff(file)
                    .ok_or_else(|| AppError::field("image", "The document must be an image"))?,
            ),
            None => None,
        };

        Ok(BankDetailsForm {
            upiid: self.upiid,
            account_details: self.account_details,
            document,
        })
    }
}
