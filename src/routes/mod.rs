pub mod admin;
pub mod api;
pub mod bank_details;
pub mod dashboard;
pub mod money;
