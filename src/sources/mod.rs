pub mod fred;
pub mod yahoo;
pub mod google_news;

pub use fred::*;
pub use yahoo::*;
pub use google_news::*;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;

use crate::error::Result;
use crate::types::{DateWindow, NewsItem, Provider, Series, SeriesId};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; liquidity-terminal/0.1)";

/// A provider of daily series, FRED or Yahoo.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    fn provider(&self) -> Provider;
    async fn fetch_series(&self, id: SeriesId, window: DateWindow) -> Result<Series>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewsQuery {
    pub keywords: Vec<String>,
    pub lookback_hours: u32,
    pub limit: usize,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch_headlines(&self, query: NewsQuery, now: DateTime<Utc>) -> Result<Vec<NewsItem>>;
}

/// Shared HTTP client for all outbound providers.
pub fn http_client(timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
