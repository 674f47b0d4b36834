use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{HeadlineSource, NewsQuery};
use crate::error::Result;
use crate::types::{NewsItem, Published};

const GOOGLE_NEWS_RSS: &str = "https://news.google.com/rss/search";

/// Google News RSS search.
#[derive(Debug, Clone)]
pub struct GoogleNewsClient {
    client: Client,
    base_url: String,
}

impl GoogleNewsClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, GOOGLE_NEWS_RSS)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl HeadlineSource for GoogleNewsClient {
    async fn fetch_headlines(&self, query: NewsQuery, now: DateTime<Utc>) -> Result<Vec<NewsItem>> {
        let terms = search_terms(&query);
        let body = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", terms.as_str()),
                ("hl", "en-US"),
                ("gl", "US"),
                ("ceid", "US:en"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let items = parse_rss(&body)?;
        debug!("News feed '{}': {} raw items", terms, items.len());

        Ok(recent_headlines(items, now, query.lookback_hours, query.limit))
    }
}

/// `"a b" OR c when:24h`
pub fn search_terms(query: &NewsQuery) -> String {
    let keywords: Vec<String> = query
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| {
            if k.contains(' ') {
                format!("\"{}\"", k)
            } else {
                k.to_string()
            }
        })
        .collect();
    format!("{} when:{}h", keywords.join(" OR "), query.lookback_hours)
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(rename = "pubDate", default)]
    pub_date: Option<String>,
    #[serde(default)]
    source: Option<RssSource>,
}

#[derive(Debug, Deserialize)]
struct RssSource {
    #[serde(rename = "$text", default)]
    name: String,
}

/// Decode an RSS 2.0 document. A missing or malformed `pubDate` is kept as
/// raw text rather than rejecting the item.
pub fn parse_rss(xml: &str) -> Result<Vec<NewsItem>> {
    let rss: Rss = quick_xml::de::from_str(xml)?;
    let items = rss
        .channel
        .items
        .into_iter()
        .map(|item| NewsItem {
            title: item.title.trim().to_string(),
            link: item.link.trim().to_string(),
            published: Published::parse_rfc2822(item.pub_date.as_deref().unwrap_or_default()),
            source: item
                .source
                .map(|s| s.name.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Google News".to_string()),
        })
        .collect();
    Ok(items)
}

/// Drop items dated before the lookback cutoff, then keep the first `limit`.
/// Items with unparseable dates are kept.
pub fn recent_headlines(items: Vec<NewsItem>, now: DateTime<Utc>, lookback_hours: u32, limit: usize) -> Vec<NewsItem> {
    let cutoff = now - Duration::hours(i64::from(lookback_hours));
    items
        .into_iter()
        .filter(|item| item.published.timestamp().map_or(true, |ts| ts >= cutoff))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <generator>NFE/5.0</generator>
    <title>"Federal Reserve" OR liquidity when:24h - Google News</title>
    <link>https://news.google.com/search?q=liquidity</link>
    <language>en-US</language>
    <item>
      <title>Fed balance sheet runoff slows &amp; reserves stabilize - Reuters</title>
      <link>https://news.google.com/rss/articles/abc</link>
      <guid isPermaLink="false">abc</guid>
      <pubDate>Mon, 19 Oct 2026 13:05:00 GMT</pubDate>
      <source url="https://www.reuters.com">Reuters</source>
    </item>
    <item>
      <title>Dollar slips as credit spreads tighten</title>
      <link>https://news.google.com/rss/articles/def</link>
      <pubDate>sometime this morning</pubDate>
    </item>
    <item>
      <title>Last week's M2 print</title>
      <link>https://news.google.com/rss/articles/old</link>
      <pubDate>Mon, 12 Oct 2026 09:00:00 GMT</pubDate>
      <source url="https://www.ft.com">Financial Times</source>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_rss() {
        let items = parse_rss(FEED).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Fed balance sheet runoff slows & reserves stabilize - Reuters");
        assert_eq!(items[0].source, "Reuters");
        assert!(items[0].published.timestamp().is_some());
        assert_eq!(items[1].published, Published::Raw("sometime this morning".to_string()));
        assert_eq!(items[1].source, "Google News");
    }

    #[test]
    fn test_recent_headlines_filters_and_limits() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 18, 0, 0).unwrap();
        let items = parse_rss(FEED).unwrap();

        let recent = recent_headlines(items.clone(), now, 24, 8);
        let links: Vec<&str> = recent.iter().map(|i| i.link.as_str()).collect();
        assert_eq!(links, vec!["https://news.google.com/rss/articles/abc", "https://news.google.com/rss/articles/def"]);

        assert_eq!(recent_headlines(items, now, 24, 1).len(), 1);
    }

    #[test]
    fn test_search_terms_quotes_phrases() {
        let query = NewsQuery {
            keywords: vec!["Federal Reserve".to_string(), "liquidity".to_string(), " ".to_string()],
            lookback_hours: 24,
            limit: 8,
        };
        assert_eq!(search_terms(&query), "\"Federal Reserve\" OR liquidity when:24h");
    }
}
