pub mod config;
pub mod detail;
pub mod error;
pub mod fetch;
pub mod html;
pub mod list_page;
pub mod output;
pub mod pipeline;
pub mod selectors;

pub use config::{OutputFormat, ScrapeConfig};
pub use detail::DetailExtractor;
pub use error::{FailureKind, Result, ScrapeError};
pub use fetch::{HttpSource, MemorySource, PageSource};
pub use pipeline::{Failure, ScrapeReport, scrape};

use serde::Serialize;

/// Site root every relative link is resolved against.
pub const BASE_URL: &str = "https://www.imdb.com";
/// The IMDb Top 250 chart.
pub const LIST_URL: &str = "https://www.imdb.com/chart/top/?ref_=nv_mv_250";
/// Sent with every request; IMDb serves the mobile-style markup for it.
pub const USER_AGENT: &str = "Mozilla/5.0 (iPad; CPU OS 12_2 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148";

/// Everything scraped from one movie detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    pub title: String,
    pub country: String,
    pub runtime: Option<String>,
    pub rating: Option<String>,
    pub metascore: Option<String>,
    pub award: Option<String>,
    /// Genre labels joined with ", "; empty when the page lists none.
    pub genre: String,
    /// Four-digit release year.
    pub release_date: Option<String>,
    pub presentation: String,
    pub review: Option<String>,
    pub video: Option<String>,
}

/// One row of the result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    /// 1-based, counts successfully scraped pages only
    pub index: usize,
    pub url: String,
    #[serde(flatten)]
    pub details: MovieDetails,
}
