use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveTime};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::SeriesProvider;
use crate::error::{DashboardError, Result};
use crate::types::{DateWindow, Observation, Provider, Series, SeriesId};

const YAHOO_CHART_API: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, YAHOO_CHART_API)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SeriesProvider for YahooClient {
    fn provider(&self) -> Provider {
        Provider::Yahoo
    }

    async fn fetch_series(&self, id: SeriesId, window: DateWindow) -> Result<Series> {
        let period1 = window.start.and_time(NaiveTime::MIN).and_utc().timestamp();
        // period2 is exclusive
        let period2 = (window.end + Duration::days(1))
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        let url = format!("{}/{}", self.base_url, encode_symbol(id.code()));
        let resp: ChartResponse = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()
            .await?
            .json()
            .await?;

        let observations = daily_closes(resp)?;
        debug!("Yahoo {}: {} observations", id.code(), observations.len());

        if observations.is_empty() {
            return Err(DashboardError::EmptySeries {
                provider: Provider::Yahoo.as_str(),
                code: id.code().to_string(),
            });
        }

        Ok(Series::new(id, observations))
    }
}

fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E")
}

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

/// Daily closes keyed by exchange-local trading date. Null closes are skipped;
/// when a date appears twice the later bar wins.
pub fn daily_closes(resp: ChartResponse) -> Result<Vec<Observation>> {
    if let Some(err) = resp.chart.error {
        return Err(DashboardError::provider(
            Provider::Yahoo.as_str(),
            format!("{} - {}", err.code, err.description),
        ));
    }

    let Some(data) = resp.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    let timestamps = data.timestamp.unwrap_or_default();
    let closes = data
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut observations: Vec<Observation> = Vec::with_capacity(timestamps.len());
    for (ts, close) in timestamps.iter().zip(closes) {
        let (Some(close), Some(at)) = (close, DateTime::from_timestamp(ts + data.meta.gmtoffset, 0)) else {
            continue;
        };
        if !close.is_finite() {
            continue;
        }
        let date = at.date_naive();
        match observations.last_mut() {
            Some(last) if last.date == date => last.value = close,
            _ => observations.push(Observation::new(date, close)),
        }
    }

    Ok(observations)
}
