use crate::{DirectionsError, Result};
use std::env;

pub const GRAPHHOPPER_API_KEY: &str = "GRAPHHOPPER_API_KEY";
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const GOOGLE_CLOUD_API_KEY: &str = "GOOGLE_CLOUD_API_KEY";

/// Credentials read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub graphhopper_api_key: String,
    /// No key means no language model: steps and tips use their fallbacks.
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub google_cloud_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let graphhopper_api_key =
            non_empty(GRAPHHOPPER_API_KEY).ok_or(DirectionsError::MissingApiKey(GRAPHHOPPER_API_KEY))?;

        Ok(Self {
            graphhopper_api_key,
            gemini_api_key: non_empty(GEMINI_API_KEY),
            gemini_model: non_empty(GEMINI_MODEL),
            google_cloud_api_key: non_empty(GOOGLE_CLOUD_API_KEY),
        })
    }
}
