use std::time::Duration;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::{BASE_URL, LIST_URL, USER_AGENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// Pretty-printed JSON array
    Json,
}

/// Scrape the IMDb Top 250 and print one row per movie.
///
/// Every option defaults to the live IMDb chart, so running without
/// arguments scrapes the full list.
#[derive(Debug, Clone, Parser)]
#[command(name = "imdb-top-scrape", version)]
pub struct ScrapeConfig {
    /// Ranked list page holding the movie links
    #[arg(long, default_value = LIST_URL)]
    pub list_url: String,

    /// Base URL relative links are resolved against
    #[arg(long, default_value = BASE_URL)]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[arg(long, default_value = USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds (unset: wait as long as the server does)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Only visit the first N detail pages
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Longest cell printed in table mode before truncating with "..."
    #[arg(long, default_value_t = 40)]
    pub max_cell_width: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::parse_from(["imdb-top-scrape"])
    }
}

impl ScrapeConfig {
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(|source| ScrapeError::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_live_chart() {
        let config = ScrapeConfig::default();
        assert_eq!(config.list_url, LIST_URL);
        assert_eq!(config.user_agent, USER_AGENT);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.timeout().is_none());
        assert!(config.limit.is_none());
        assert_eq!(config.base_url().unwrap().host_str(), Some("www.imdb.com"));
    }

    #[test]
    fn flags_override_defaults() {
        let config = ScrapeConfig::parse_from([
            "imdb-top-scrape",
            "--limit",
            "5",
            "--timeout-secs",
            "10",
            "--format",
            "json",
        ]);
        assert_eq!(config.limit, Some(5));
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn bad_base_url_is_reported() {
        let config = ScrapeConfig::parse_from(["imdb-top-scrape", "--base-url", "not a url"]);
        assert!(matches!(
            config.base_url(),
            Err(ScrapeError::InvalidUrl { .. })
        ));
    }
}
