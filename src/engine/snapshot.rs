use chrono::NaiveDate;
use serde::Serialize;

use super::metrics::{month_over_month, MetricChange};
use super::regime::{classify_latest, RegimeSignal};
use crate::error::Result;
use crate::pipeline::normalize_base_100;
use crate::types::{MacroTable, SeriesId};

/// Everything the page header and metric strip need.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub as_of: NaiveDate,
    pub regime: RegimeSignal,
    pub metrics: Vec<MetricChange>,
}

impl DashboardSnapshot {
    pub fn from_table(table: &MacroTable, trend_window: usize, comparison_offset: usize) -> Result<Self> {
        let regime = classify_latest(table, trend_window)?;
        // classify_latest already rejected an empty table
        let as_of = table.latest().map(|r| r.date).unwrap_or_default();
        Ok(Self {
            as_of,
            regime,
            metrics: month_over_month(table, comparison_offset),
        })
    }
}

/// Column-oriented series for the trend and comparison charts.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub dates: Vec<NaiveDate>,
    pub dxy: Vec<f64>,
    pub dxy_50ma: Vec<Option<f64>>,
    pub high_yield_spread: Vec<f64>,
    pub hy_spread_50ma: Vec<Option<f64>>,
    pub fed_assets: Vec<f64>,
    pub m2_supply: Vec<f64>,
    /// S&P 500 and Bitcoin rebased to 100 on the first date.
    pub sp500_normalized: Vec<f64>,
    pub bitcoin_normalized: Vec<f64>,
}

impl ChartSeries {
    pub fn from_table(table: &MacroTable) -> Self {
        Self {
            dates: table.dates(),
            dxy: table.column(SeriesId::DollarIndex),
            dxy_50ma: table.dxy_50ma(),
            high_yield_spread: table.column(SeriesId::HighYieldSpread),
            hy_spread_50ma: table.hy_spread_50ma(),
            fed_assets: table.column(SeriesId::FedAssets),
            m2_supply: table.column(SeriesId::M2Supply),
            sp500_normalized: normalize_base_100(&table.column(SeriesId::Sp500)).unwrap_or_default(),
            bitcoin_normalized: normalize_base_100(&table.column(SeriesId::Bitcoin)).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::regime::Regime;
    use crate::types::table::sample_row;
    use chrono::Duration;

    fn table(n: i64) -> MacroTable {
        let start = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        MacroTable::new(
            (0..n)
                .map(|i| {
                    let mut row = sample_row(start + Duration::days(i), 99.0, Some(100.0), 3.0, Some(4.0));
                    row.sp500 = 5_000.0 + i as f64;
                    row.bitcoin = 60_000.0 - i as f64 * 10.0;
                    row
                })
                .collect(),
        )
    }

    #[test]
    fn test_snapshot_from_table() {
        let snapshot = DashboardSnapshot::from_table(&table(30), 50, 21).unwrap();

        assert_eq!(snapshot.as_of, NaiveDate::from_ymd_opt(2026, 6, 30).unwrap());
        assert_eq!(snapshot.regime.regime, Regime::RiskOn);
        assert_eq!(snapshot.metrics.len(), 4);
    }

    #[test]
    fn test_snapshot_requires_rows() {
        assert!(DashboardSnapshot::from_table(&MacroTable::default(), 50, 21).is_err());
    }

    #[test]
    fn test_chart_series_rebases_comparison() {
        let charts = ChartSeries::from_table(&table(10));

        assert_eq!(charts.dates.len(), 10);
        assert_eq!(charts.sp500_normalized[0], 100.0);
        assert_eq!(charts.bitcoin_normalized[0], 100.0);
        assert!(charts.sp500_normalized[9] > 100.0);
        assert!(charts.bitcoin_normalized[9] < 100.0);
    }
}
