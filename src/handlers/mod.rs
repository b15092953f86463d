pub mod admin_wallet_handler;
pub mod bank_details_handler;
pub mod dashboard_handler;
pub mod health;
pub mod money_handler;
