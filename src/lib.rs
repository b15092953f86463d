pub mod constants;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod types;
pub mod utils;
