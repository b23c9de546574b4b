//! HTTP client for the tracker backend.

mod client;

pub use client::ApiClient;
