use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::debug;

use super::SeriesProvider;
use crate::error::{DashboardError, Result};
use crate::types::{DateWindow, Observation, Provider, Series, SeriesId};

const FRED_GRAPH_CSV: &str = "https://fred.stlouisfed.org/graph/fredgraph.csv";

/// FRED graph CSV export. Needs no API key.
#[derive(Debug, Clone)]
pub struct FredClient {
    client: Client,
    base_url: String,
}

impl FredClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, FRED_GRAPH_CSV)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SeriesProvider for FredClient {
    fn provider(&self) -> Provider {
        Provider::Fred
    }

    async fn fetch_series(&self, id: SeriesId, window: DateWindow) -> Result<Series> {
        let start = window.start.format("%Y-%m-%d").to_string();
        let end = window.end.format("%Y-%m-%d").to_string();

        let body = self
            .client
            .get(&self.base_url)
            .query(&[("id", id.code()), ("cosd", start.as_str()), ("coed", end.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let observations = parse_fred_csv(&body)?;
        debug!("FRED {}: {} observations", id.code(), observations.len());

        if observations.is_empty() {
            return Err(DashboardError::EmptySeries {
                provider: Provider::Fred.as_str(),
                code: id.code().to_string(),
            });
        }

        Ok(Series::new(id, observations))
    }
}

/// Parse a `DATE,<CODE>` export. FRED writes `.` for missing values; those
/// rows are skipped.
pub fn parse_fred_csv(body: &str) -> Result<Vec<Observation>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut observations = Vec::new();
    for record in reader.records() {
        let record = record?;
        let (Some(date), Some(value)) = (record.get(0), record.get(1)) else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
            continue;
        };
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => observations.push(Observation::new(date, v)),
            _ => continue,
        }
    }

    observations.sort_by_key(|o| o.date);
    Ok(observations)
}
