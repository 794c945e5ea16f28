//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlMapping;

/// Request to shorten a URL. Scheme and `www.` are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(max = 8192, message = "URL is too long"))]
    pub url: String,
}

/// A shortened URL and its counters.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub shortened_url: String,
    pub original_url: String,
    pub times_shortened: i64,
    pub times_accessed: i64,
    pub logged_in: bool,
}

impl ShortenResponse {
    pub fn new(mapping: UrlMapping, logged_in: bool) -> Self {
        Self {
            shortened_url: mapping.short_url,
            original_url: mapping.original_url,
            times_shortened: mapping.times_shortened,
            times_accessed: mapping.times_accessed,
            logged_in,
        }
    }
}
