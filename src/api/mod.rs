mod client;
mod credentials;

pub use client::{ApiClient, ApiError, ApiResponse};
pub use credentials::Credentials;
