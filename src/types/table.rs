use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SeriesId;

/// One aligned calendar day: six raw observations plus the two trend means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroRow {
    pub date: NaiveDate,
    pub fed_assets: f64,
    pub m2_supply: f64,
    pub high_yield_spread: f64,
    pub dxy: f64,
    pub sp500: f64,
    pub bitcoin: f64,
    pub dxy_50ma: Option<f64>,
    pub hy_spread_50ma: Option<f64>,
}

impl MacroRow {
    pub fn value(&self, id: SeriesId) -> f64 {
        match id {
            SeriesId::FedAssets => self.fed_assets,
            SeriesId::M2Supply => self.m2_supply,
            SeriesId::HighYieldSpread => self.high_yield_spread,
            SeriesId::DollarIndex => self.dxy,
            SeriesId::Sp500 => self.sp500,
            SeriesId::Bitcoin => self.bitcoin,
        }
    }

    pub fn has_trend(&self) -> bool {
        self.dxy_50ma.is_some() && self.hy_spread_50ma.is_some()
    }
}

/// Date-ascending, one row per date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTable {
    rows: Vec<MacroRow>,
}

impl MacroTable {
    /// Rows are sorted by date and deduplicated (last write wins).
    pub fn new(mut rows: Vec<MacroRow>) -> Self {
        rows.sort_by_key(|r| r.date);
        let mut deduped: Vec<MacroRow> = Vec::with_capacity(rows.len());
        for row in rows {
            match deduped.last_mut() {
                Some(last) if last.date == row.date => *last = row,
                _ => deduped.push(row),
            }
        }
        Self { rows: deduped }
    }

    pub fn rows(&self) -> &[MacroRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&MacroRow> {
        self.rows.last()
    }

    pub fn first(&self) -> Option<&MacroRow> {
        self.rows.first()
    }

    /// The `n`-th most recent row, `nth_from_end(1)` being the latest.
    pub fn nth_from_end(&self, n: usize) -> Option<&MacroRow> {
        if n == 0 || n > self.rows.len() {
            return None;
        }
        self.rows.get(self.rows.len() - n)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    pub fn column(&self, id: SeriesId) -> Vec<f64> {
        self.rows.iter().map(|r| r.value(id)).collect()
    }

    pub fn dxy_50ma(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.dxy_50ma).collect()
    }

    pub fn hy_spread_50ma(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.hy_spread_50ma).collect()
    }
}

#[cfg(test)]
pub(crate) fn sample_row(date: NaiveDate, dxy: f64, dxy_50ma: Option<f64>, spread: f64, spread_50ma: Option<f64>) -> MacroRow {
    MacroRow {
        date,
        fed_assets: 7_000_000.0,
        m2_supply: 21_000.0,
        high_yield_spread: spread,
        dxy,
        sp500: 5_000.0,
        bitcoin: 60_000.0,
        dxy_50ma,
        hy_spread_50ma: spread_50ma,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    #[test]
    fn test_table_sorts_and_dedupes() {
        let table = MacroTable::new(vec![
            sample_row(day(3), 100.0, None, 3.0, None),
            sample_row(day(1), 101.0, None, 3.1, None),
            sample_row(day(3), 102.0, None, 3.2, None),
        ]);

        assert_eq!(table.dates(), vec![day(1), day(3)]);
        assert_eq!(table.latest().unwrap().dxy, 102.0);
    }

    #[test]
    fn test_nth_from_end() {
        let table = MacroTable::new((1..=5).map(|d| sample_row(day(d), d as f64, None, 1.0, None)).collect());
        assert_eq!(table.nth_from_end(1).unwrap().date, day(5));
        assert_eq!(table.nth_from_end(5).unwrap().date, day(1));
        assert!(table.nth_from_end(0).is_none());
        assert!(table.nth_from_end(6).is_none());
    }
}
