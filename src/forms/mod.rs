pub mod add_money;
pub mod bank_details;
pub mod multipart;
pub mod proof_image;
