pub mod gemini_client;
pub mod google_calendar_client;

use std::time::Duration;

use crate::error::Result;

/// Shared HTTP client; every request through it is bounded by `timeout`.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
