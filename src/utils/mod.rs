pub mod auth;
pub mod currency;
pub mod jwt;
pub mod pagination;
