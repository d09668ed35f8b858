use std::collections::HashMap;
use std::sync::Mutex;

use reqwest::{Client, StatusCode, header};

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};

/// Anything that can hand back the HTML body of a URL.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch `url`; non-2xx responses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Live HTTP source with a fixed User-Agent header.
pub struct HttpSource {
    client: Client,
    user_agent: String,
}

impl HttpSource {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ScrapeError::Client)?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait::async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .header(header::USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScrapeError::from_reqwest(url, e))?;

        resp.text()
            .await
            .map_err(|e| ScrapeError::from_reqwest(url, e))
    }
}

enum Canned {
    Body(String),
    Status(StatusCode),
}

/// Offline source serving canned pages, for replaying saved HTML.
///
/// Unknown URLs answer 404. Every requested URL is recorded in order.
#[derive(Default)]
pub struct MemorySource {
    pages: HashMap<String, Canned>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Canned::Body(body.into()));
        self
    }

    pub fn with_status(mut self, url: impl Into<String>, status: StatusCode) -> Self {
        self.pages.insert(url.into(), Canned::Status(status));
        self
    }

    /// URLs fetched so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl PageSource for MemorySource {
    async fn fetch(&self, url: &str) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        match self.pages.get(url) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(status)) => Err(ScrapeError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(ScrapeError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}
