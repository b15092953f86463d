pub mod bank_details_service;
pub mod dashboard_service;
pub mod image_host;
pub mod money_request_service;
pub mod submission_guard;
