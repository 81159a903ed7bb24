//! HTTP API client

mod client;

pub use client::RestClient;
