//! Turns a parsed detail page into [`MovieDetails`] using the rows of
//! [`DETAIL_LOCATORS`].

use std::collections::HashMap;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::MovieDetails;
use crate::error::{Result, ScrapeError};
use crate::html::{compact_text, full_text, resolve};
use crate::selectors::{DETAIL_LOCATORS, Field, Locator, MissingPolicy, Reader, parse_selector};

enum CompiledReader {
    Text,
    Compact,
    Capture(Regex),
    FirstCapture(Regex),
    JoinAll { label: Selector, sep: &'static str },
    Href,
}

struct CompiledLocator {
    field: Field,
    within: Option<Selector>,
    primary: Selector,
    fallback: Option<Selector>,
    reader: CompiledReader,
    missing: MissingPolicy,
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ScrapeError::Selector {
        selector: pattern.to_string(),
        reason: e.to_string(),
    })
}

impl CompiledLocator {
    fn compile(loc: &Locator) -> Result<Self> {
        let reader = match loc.reader {
            Reader::Text => CompiledReader::Text,
            Reader::Compact => CompiledReader::Compact,
            Reader::Capture(p) => CompiledReader::Capture(compile_pattern(p)?),
            Reader::FirstCapture(p) => CompiledReader::FirstCapture(compile_pattern(p)?),
            Reader::JoinAll { label, sep } => CompiledReader::JoinAll {
                label: parse_selector(label)?,
                sep,
            },
            Reader::Href => CompiledReader::Href,
        };
        Ok(Self {
            field: loc.field,
            within: loc.within.map(parse_selector).transpose()?,
            primary: parse_selector(loc.css)?,
            fallback: loc.fallback.map(parse_selector).transpose()?,
            reader,
            missing: loc.missing,
        })
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Compiled selector table plus the base URL for resolving links.
pub struct DetailExtractor {
    base: Url,
    locators: Vec<CompiledLocator>,
}

impl DetailExtractor {
    pub fn new(base: Url) -> Result<Self> {
        let locators = DETAIL_LOCATORS
            .iter()
            .map(CompiledLocator::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { base, locators })
    }

    /// Extract every field from a detail page.
    ///
    /// Fails only when a field marked [`MissingPolicy::Fail`] is absent; every
    /// other absence, including a link that does not resolve, becomes `None`.
    pub fn extract(&self, doc: &Html) -> Result<MovieDetails> {
        let mut values: HashMap<Field, String> = HashMap::new();
        for loc in &self.locators {
            if let Some(value) = self.apply(loc, doc)? {
                values.insert(loc.field, value);
            }
        }

        let mut required = |field: Field| {
            values
                .remove(&field)
                .ok_or(ScrapeError::MissingField { field })
        };
        let title = required(Field::Title)?;
        let country = required(Field::Country)?;
        let presentation = required(Field::Presentation)?;

        Ok(MovieDetails {
            title,
            country,
            runtime: values.remove(&Field::Runtime),
            rating: values.remove(&Field::Rating),
            metascore: values.remove(&Field::Metascore),
            award: values.remove(&Field::Award),
            genre: values.remove(&Field::Genre).unwrap_or_default(),
            release_date: values.remove(&Field::ReleaseDate),
            presentation,
            review: values.remove(&Field::Review),
            video: values.remove(&Field::Video),
        })
    }

    /// Value of a single field with its missing policy applied.
    pub fn field(&self, doc: &Html, field: Field) -> Result<Option<String>> {
        match self.locators.iter().find(|l| l.field == field) {
            Some(loc) => self.apply(loc, doc),
            None => Ok(None),
        }
    }

    fn apply(&self, loc: &CompiledLocator, doc: &Html) -> Result<Option<String>> {
        match (self.lookup(loc, doc), loc.missing) {
            (Some(v), _) => Ok(Some(v)),
            (None, MissingPolicy::Fail) => Err(ScrapeError::MissingField { field: loc.field }),
            (None, MissingPolicy::Empty) => Ok(Some(String::new())),
            (None, MissingPolicy::Omit) => Ok(None),
        }
    }

    fn lookup(&self, loc: &CompiledLocator, doc: &Html) -> Option<String> {
        let scope = match &loc.within {
            Some(outer) => doc.select(outer).next()?,
            None => doc.root_element(),
        };
        self.read(scope, &loc.primary, &loc.reader, loc.field)
            .or_else(|| {
                loc.fallback
                    .as_ref()
                    .and_then(|sel| self.read(scope, sel, &loc.reader, loc.field))
            })
    }

    fn read(
        &self,
        scope: ElementRef<'_>,
        sel: &Selector,
        reader: &CompiledReader,
        field: Field,
    ) -> Option<String> {
        match reader {
            CompiledReader::Text => scope.select(sel).next().map(full_text),
            CompiledReader::Compact => scope.select(sel).next().map(compact_text),
            CompiledReader::Capture(re) => scope
                .select(sel)
                .next()
                .and_then(|el| capture(re, &compact_text(el))),
            CompiledReader::FirstCapture(re) => {
                scope.select(sel).find_map(|el| capture(re, &compact_text(el)))
            }
            CompiledReader::JoinAll { label, sep } => {
                let labels: Vec<String> = scope
                    .select(sel)
                    .filter_map(|el| el.select(label).next())
                    .map(compact_text)
                    .collect();
                if labels.is_empty() {
                    None
                } else {
                    Some(labels.join(*sep))
                }
            }
            CompiledReader::Href => {
                let href = scope.select(sel).next()?.value().attr("href")?;
                match resolve(&self.base, href) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        warn!(%field, error = %e, "ignoring unresolvable link");
                        None
                    }
                }
            }
        }
    }
}
