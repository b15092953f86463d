pub mod bank_details;
pub mod money_requests;
pub mod users;
