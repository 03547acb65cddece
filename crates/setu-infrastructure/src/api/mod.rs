//! HTTP gateway to the marketplace API.

mod client;

pub use client::ApiClient;
