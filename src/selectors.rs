//! Where every scraped value lives in the IMDb markup.
//!
//! The class names below come from one snapshot of the site and break
//! whenever IMDb ships a new build. Fixing a broken field should only ever
//! mean editing a row here.

use scraper::Selector;

use crate::error::{Result, ScrapeError};

/// List container on the chart page, matched on its full class attribute.
pub const LIST_CONTAINER: &str = "ul[class=\"ipc-metadata-list ipc-metadata-list--dividers-between \
     sc-9d2f6de0-0 iMNUXk compact-list-view ipc-metadata-list--base\"]";
pub const LIST_CONTAINER_FALLBACK: &str = "ul.compact-list-view";
/// Anchor wrapping each movie title inside the list container.
pub const LIST_LINK: &str = "a.ipc-title-link-wrapper";

/// A scraped column of the movie table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Country,
    Runtime,
    Rating,
    Metascore,
    Award,
    Genre,
    ReleaseDate,
    Presentation,
    Review,
    Video,
}

impl Field {
    /// Column header used in the printed table.
    pub fn header(self) -> &'static str {
        match self {
            Field::Title => "Movie",
            Field::Country => "Countries of origin",
            Field::Runtime => "Runtime",
            Field::Rating => "IMDb rating",
            Field::Metascore => "Metascore",
            Field::Award => "Award",
            Field::Genre => "Genre",
            Field::ReleaseDate => "Release date",
            Field::Presentation => "Presentation",
            Field::Review => "Featured reviews",
            Field::Video => "Video",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// How a matched element is turned into a value.
#[derive(Debug, Clone, Copy)]
pub enum Reader {
    /// All descendant text of the first match, trimmed.
    Text,
    /// Text nodes of the first match, each trimmed, concatenated.
    Compact,
    /// First capture group of the pattern over the first match's compact text.
    Capture(&'static str),
    /// Walk every match in document order; first one the pattern captures wins.
    FirstCapture(&'static str),
    /// Compact text of `label` inside every match, joined with `sep`.
    JoinAll {
        label: &'static str,
        sep: &'static str,
    },
    /// `href` of the first match, resolved against the site base URL.
    Href,
}

/// What to do when a locator finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// The page is unusable without this field.
    Fail,
    /// Leave the field unset.
    Omit,
    /// Use an empty string.
    Empty,
}

#[derive(Debug, Clone, Copy)]
pub struct Locator {
    pub field: Field,
    /// Only the first element matching this is searched for `css`.
    pub within: Option<&'static str>,
    pub css: &'static str,
    /// Tried only when `css` yields no value.
    pub fallback: Option<&'static str>,
    pub reader: Reader,
    pub missing: MissingPolicy,
}

pub const DETAIL_LOCATORS: &[Locator] = &[
    Locator {
        field: Field::Title,
        within: None,
        css: "h1[data-testid=\"hero__pageTitle\"]",
        fallback: None,
        reader: Reader::Text,
        missing: MissingPolicy::Fail,
    },
    Locator {
        field: Field::Country,
        within: Some("li[data-testid=\"title-details-origin\"]"),
        css: "a.ipc-metadata-list-item__list-content-item--link",
        fallback: None,
        reader: Reader::Text,
        missing: MissingPolicy::Fail,
    },
    Locator {
        field: Field::Runtime,
        within: Some("div[data-testid=\"title-techspecs-section\"]"),
        css: "div.ipc-metadata-list-item__content-container",
        fallback: None,
        reader: Reader::Text,
        missing: MissingPolicy::Omit,
    },
    Locator {
        field: Field::Rating,
        within: Some("div[data-testid=\"hero-rating-bar__aggregate-rating__score\"]"),
        css: "span",
        fallback: None,
        reader: Reader::Capture(r"^([\d.]+)"),
        missing: MissingPolicy::Omit,
    },
    Locator {
        field: Field::Metascore,
        within: None,
        css: "span[class=\"sc-b0901df4-0 bcQdDJ metacritic-score-box\"]",
        fallback: Some("span.metacritic-score-box"),
        reader: Reader::Text,
        missing: MissingPolicy::Omit,
    },
    Locator {
        field: Field::Award,
        within: None,
        css: "ul[class=\"ipc-metadata-list ipc-metadata-list--dividers-none \
              sc-b45a339a-2 cEeAGk ipc-metadata-list--base\"]",
        fallback: None,
        reader: Reader::Compact,
        missing: MissingPolicy::Omit,
    },
    Locator {
        field: Field::Genre,
        within: None,
        css: "a[class=\"ipc-chip ipc-chip--on-baseAlt\"][href*=\"genres=\"]",
        fallback: None,
        reader: Reader::JoinAll {
            label: "span.ipc-chip__text",
            sep: ", ",
        },
        missing: MissingPolicy::Empty,
    },
    Locator {
        field: Field::ReleaseDate,
        within: None,
        css: "a[class=\"ipc-link ipc-link--baseAlt ipc-link--inherit-color\"]",
        fallback: None,
        reader: Reader::FirstCapture(r"(\d{4})"),
        missing: MissingPolicy::Omit,
    },
    Locator {
        field: Field::Presentation,
        within: None,
        css: "span[data-testid=\"plot-l\"]",
        fallback: None,
        reader: Reader::Compact,
        missing: MissingPolicy::Fail,
    },
    Locator {
        field: Field::Review,
        within: None,
        css: "div[data-testid=\"review-overflow\"]",
        fallback: None,
        reader: Reader::Text,
        missing: MissingPolicy::Omit,
    },
    Locator {
        field: Field::Video,
        within: None,
        css: "a.ipc-title-link-wrapper",
        fallback: None,
        reader: Reader::Href,
        missing: MissingPolicy::Omit,
    },
];

/// Compile a CSS selector, keeping the offending string in the error.
pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_locator_compiles() {
        for css in [LIST_CONTAINER, LIST_CONTAINER_FALLBACK, LIST_LINK] {
            parse_selector(css).unwrap();
        }
        for loc in DETAIL_LOCATORS {
            parse_selector(loc.css).unwrap();
            if let Some(outer) = loc.within {
                parse_selector(outer).unwrap();
            }
            if let Some(fallback) = loc.fallback {
                parse_selector(fallback).unwrap();
            }
            if let Reader::JoinAll { label, .. } = loc.reader {
                parse_selector(label).unwrap();
            }
        }
    }

    #[test]
    fn each_field_has_one_locator() {
        let mut fields: Vec<Field> = DETAIL_LOCATORS.iter().map(|l| l.field).collect();
        fields.sort();
        fields.dedup();
        assert_eq!(fields.len(), DETAIL_LOCATORS.len());
        assert_eq!(fields.len(), 11);
    }

    #[test]
    fn bad_selector_reports_source() {
        let err = parse_selector("div[").unwrap_err();
        match err {
            ScrapeError::Selector { selector, .. } => assert_eq!(selector, "div["),
            other => panic!("unexpected error: {other}"),
        }
    }
}
