use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::draws::LookupSettings;

const DEFAULT_DRAW_SOURCE_URL: &str =
    "https://www.dhlottery.co.kr/common.do?method=getLottoNumber&drwNo=";

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a number does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    /// Point-lookup endpoint; the draw number is appended.
    pub draw_source_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub lookup: LookupSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = LookupSettings::default();

        Ok(Config {
            draw_source_url: var("DRAW_SOURCE_URL")
                .unwrap_or_else(|| DEFAULT_DRAW_SOURCE_URL.to_string()),
            anthropic_api_key: var("ANTHROPIC_API_KEY").with_context(|| {
                "Required environment variable 'ANTHROPIC_API_KEY' is not set"
            })?,
            port: parse_or(&var, "PORT", 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            lookup: LookupSettings {
                probe_buffer: parse_or(&var, "PROBE_BUFFER", defaults.probe_buffer)?,
                concurrency: parse_or(&var, "LOOKUP_CONCURRENCY", defaults.concurrency)?,
                probe_ttl: Duration::from_secs(parse_or(
                    &var,
                    "PROBE_CACHE_TTL_SECS",
                    defaults.probe_ttl.as_secs(),
                )?),
                history_ttl: Duration::from_secs(parse_or(
                    &var,
                    "HISTORY_CACHE_TTL_SECS",
                    defaults.history_ttl.as_secs(),
                )?),
            },
        })
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
