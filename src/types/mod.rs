pub mod bank_details;
pub mod dashboard;
pub mod money_request;
pub mod response;
