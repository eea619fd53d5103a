//! Typed HTTP boundary to the care backend.

mod client;

pub use client::{ApiClient, ApiConfig};
