use scraper::ElementRef;
use url::Url;

use crate::error::{Result, ScrapeError};

/// All descendant text, trimmed at both ends.
pub fn full_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Every text node trimmed on its own, then glued together with no separator.
pub fn compact_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<String>()
}

/// Resolve a (possibly relative) href against the site base.
pub fn resolve(base: &Url, href: &str) -> Result<String> {
    base.join(href.trim())
        .map(String::from)
        .map_err(|source| ScrapeError::InvalidUrl {
            url: href.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn full_text_keeps_inner_spacing() {
        let doc = Html::parse_fragment("<p>  The <b>Godfather</b> Part II \n</p>");
        assert_eq!(full_text(first(&doc, "p")), "The Godfather Part II");
    }

    #[test]
    fn compact_text_drops_whitespace_between_nodes() {
        let doc = Html::parse_fragment("<ul><li> Won 3 Oscars </li>\n<li> 31 wins </li></ul>");
        assert_eq!(compact_text(first(&doc, "ul")), "Won 3 Oscars31 wins");
    }

    #[test]
    fn resolve_relative_and_absolute() {
        let base = Url::parse("https://www.imdb.com").unwrap();
        assert_eq!(
            resolve(&base, "/title/tt0111161/?ref_=chttp_t_1").unwrap(),
            "https://www.imdb.com/title/tt0111161/?ref_=chttp_t_1"
        );
        assert_eq!(
            resolve(&base, "https://m.imdb.com/video/vi1").unwrap(),
            "https://m.imdb.com/video/vi1"
        );
    }
}
