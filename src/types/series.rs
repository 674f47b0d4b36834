use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream data providers the aggregator pulls from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// Macroeconomic statistics keyed by series code.
    Fred,
    /// Market data keyed by ticker symbol.
    Yahoo,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Fred => "FRED",
            Provider::Yahoo => "Yahoo Finance",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeriesId {
    FedAssets,
    M2Supply,
    HighYieldSpread,
    DollarIndex,
    Sp500,
    Bitcoin,
}

impl SeriesId {
    pub const ALL: [SeriesId; 6] = [
        SeriesId::FedAssets,
        SeriesId::M2Supply,
        SeriesId::HighYieldSpread,
        SeriesId::DollarIndex,
        SeriesId::Sp500,
        SeriesId::Bitcoin,
    ];

    pub fn provider(&self) -> Provider {
        match self {
            SeriesId::FedAssets | SeriesId::M2Supply | SeriesId::HighYieldSpread => Provider::Fred,
            SeriesId::DollarIndex | SeriesId::Sp500 | SeriesId::Bitcoin => Provider::Yahoo,
        }
    }

    /// Series code (FRED) or ticker symbol (Yahoo).
    pub fn code(&self) -> &'static str {
        match self {
            SeriesId::FedAssets => "WALCL",
            SeriesId::M2Supply => "M2SL",
            SeriesId::HighYieldSpread => "BAMLC0A0CM",
            SeriesId::DollarIndex => "DX-Y.NYB",
            SeriesId::Sp500 => "^GSPC",
            SeriesId::Bitcoin => "BTC-USD",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SeriesId::FedAssets => "Fed_Assets",
            SeriesId::M2Supply => "M2_Supply",
            SeriesId::HighYieldSpread => "High_Yield_Spread",
            SeriesId::DollarIndex => "DXY",
            SeriesId::Sp500 => "S&P500",
            SeriesId::Bitcoin => "Bitcoin",
        }
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// One dated value as delivered by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A single provider series over the lookback window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub observations: Vec<Observation>,
}

impl Series {
    pub fn new(id: SeriesId, observations: Vec<Observation>) -> Self {
        Self { id, observations }
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }
}

/// Inclusive date range a refresh covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// `end` minus `years` calendar years (365 days each), through `end`.
    pub fn trailing_years(end: NaiveDate, years: u32) -> Self {
        let start = end - chrono::Duration::days(365 * i64::from(years));
        Self { start, end }
    }
}
