pub mod api;
pub mod config;
pub mod draft;
pub mod errors;
pub mod models;
pub mod schedule;
pub mod session;
