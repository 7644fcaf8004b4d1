//! Configuration management for the BiteFinder Lambda.

use std::env;

/// Base URL of the Google Places web service.
const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Places API key
    pub api_key: String,
    /// Base URL of the places provider (tests point this at a stub server)
    pub places_base_url: String,
    /// Value of the Access-Control-Allow-Origin header; empty omits it
    pub cors_allow_origin: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A missing `API_KEY` is not fatal here; the provider rejects the
    /// first upstream call instead.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("API_KEY").unwrap_or_default(),
            places_base_url: env::var("PLACES_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PLACES_BASE_URL.to_string()),
            cors_allow_origin: env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string()),
        }
    }

    /// The cross-origin header value, if one is configured.
    pub fn cors_origin(&self) -> Option<&str> {
        if self.cors_allow_origin.is_empty() {
            None
        } else {
            Some(&self.cors_allow_origin)
        }
    }
}
