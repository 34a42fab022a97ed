pub mod cache;
pub mod config;
pub mod errors;
pub mod utils;
