use scraper::Html;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::html::resolve;
use crate::selectors::{LIST_CONTAINER, LIST_CONTAINER_FALLBACK, LIST_LINK, parse_selector};

/// Absolute detail-page URLs from the chart page, in chart order.
///
/// Duplicates are kept: one URL per matching anchor.
pub fn detail_links(doc: &Html, base: &Url) -> Result<Vec<String>> {
    let container_sel = parse_selector(LIST_CONTAINER)?;
    let fallback_sel = parse_selector(LIST_CONTAINER_FALLBACK)?;
    let link_sel = parse_selector(LIST_LINK)?;

    let container = match doc.select(&container_sel).next() {
        Some(el) => el,
        None => {
            let el = doc
                .select(&fallback_sel)
                .next()
                .ok_or(ScrapeError::MissingListContainer)?;
            debug!("list container matched by fallback selector");
            el
        }
    };

    let mut urls = Vec::new();
    for a in container.select(&link_sel) {
        let href = match a.value().attr("href") {
            Some(h) => h,
            None => continue,
        };
        match resolve(base, href) {
            Ok(url) => urls.push(url),
            Err(e) => warn!(href, error = %e, "skipping unresolvable movie link"),
        }
    }
    Ok(urls)
}
