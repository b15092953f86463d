use crate::errors::AppError;
use crate::middleware::auth::AuthenticatedUser;

/// Only principals with the review capability may act on the pending queue.
pub fn require_reviewer(auth_user: &AuthenticatedUser) -> Result<(), AppError> {
    if !auth_user.can_review_requests() {
        return Err(AppError::Forbidden(
            "Only admin users can perform this action".to_string(),
        ));
    }
    Ok(())
}

pub fn require_submitter(auth_user: &AuthenticatedUser) -> Result<(), AppError> {
    if !auth_user.can_submit_requests() {
        return Err(AppError::Forbidden("Your account is blocked".to_string()));
    }
    Ok(())
}
