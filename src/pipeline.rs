use std::collections::BTreeMap;

use scraper::Html;
use tracing::{debug, info, warn};

use crate::config::ScrapeConfig;
use crate::detail::DetailExtractor;
use crate::error::{FailureKind, Result, ScrapeError};
use crate::fetch::PageSource;
use crate::list_page::detail_links;
use crate::{MovieDetails, MovieRecord};

/// A detail page that produced no record.
#[derive(Debug)]
pub struct Failure {
    pub url: String,
    pub error: ScrapeError,
}

#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub records: Vec<MovieRecord>,
    pub failures: Vec<Failure>,
}

impl ScrapeReport {
    /// Number of skipped pages per failure category.
    pub fn failure_counts(&self) -> BTreeMap<FailureKind, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.error.kind()).or_insert(0) += 1;
        }
        counts
    }
}

/// Fetch and extract a single detail page.
pub async fn scrape_detail<S>(
    source: &S,
    extractor: &DetailExtractor,
    url: &str,
) -> Result<MovieDetails>
where
    S: PageSource + ?Sized,
{
    let body = source.fetch(url).await?;
    let doc = Html::parse_document(&body);
    extractor.extract(&doc)
}

/// Scrape the list page and every movie it links to, one request at a time.
///
/// Only the list page is fatal. A detail page that fails is logged, kept in
/// [`ScrapeReport::failures`] and does not consume an index.
pub async fn scrape<S>(
    source: &S,
    extractor: &DetailExtractor,
    config: &ScrapeConfig,
) -> Result<ScrapeReport>
where
    S: PageSource + ?Sized,
{
    let base = config.base_url()?;

    info!(url = %config.list_url, "fetching movie list");
    let body = source.fetch(&config.list_url).await?;

    let mut film_urls = {
        let document = Html::parse_document(&body);
        detail_links(&document, &base)?
    };
    if let Some(limit) = config.limit {
        film_urls.truncate(limit);
    }
    info!(count = film_urls.len(), "found movie links");

    let mut report = ScrapeReport::default();
    for url in film_urls {
        debug!(url = %url, "fetching movie page");
        match scrape_detail(source, extractor, &url).await {
            Ok(details) => {
                let index = report.records.len() + 1;
                report.records.push(MovieRecord {
                    index,
                    url,
                    details,
                });
            }
            Err(error) => {
                warn!(url = %url, kind = %error.kind(), "skipping movie: {error}");
                report.failures.push(Failure { url, error });
            }
        }
    }

    info!(
        scraped = report.records.len(),
        failed = report.failures.len(),
        "scrape finished"
    );
    Ok(report)
}
