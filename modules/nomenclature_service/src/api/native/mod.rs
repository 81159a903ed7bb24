//! In-process API client

mod client;

pub use client::NativeClient;
