use crate::error::{DashboardError, Result};
use crate::types::{MacroRow, MacroTable, SeriesId};

use super::{rolling_mean, DenseTable};

/// Build named rows from a dense table and attach `window`-sample means of the
/// dollar index and credit spread. Early rows keep `None` means.
pub fn with_trend(dense: &DenseTable, window: usize) -> Result<MacroTable> {
    let idx = |id: SeriesId| {
        dense.column_index(id).ok_or_else(|| {
            DashboardError::provider(id.provider().as_str(), format!("missing column {}", id.column()))
        })
    };
    let fed = idx(SeriesId::FedAssets)?;
    let m2 = idx(SeriesId::M2Supply)?;
    let spread = idx(SeriesId::HighYieldSpread)?;
    let dxy = idx(SeriesId::DollarIndex)?;
    let sp500 = idx(SeriesId::Sp500)?;
    let btc = idx(SeriesId::Bitcoin)?;

    let dxy_values: Vec<f64> = dense.rows.iter().map(|r| r.values[dxy]).collect();
    let spread_values: Vec<f64> = dense.rows.iter().map(|r| r.values[spread]).collect();
    let dxy_ma = rolling_mean(&dxy_values, window);
    let spread_ma = rolling_mean(&spread_values, window);

    let rows = dense
        .rows
        .iter()
        .zip(dxy_ma.into_iter().zip(spread_ma))
        .map(|(row, (dxy_50ma, hy_spread_50ma))| MacroRow {
            date: row.date,
            fed_assets: row.values[fed],
            m2_supply: row.values[m2],
            high_yield_spread: row.values[spread],
            dxy: row.values[dxy],
            sp500: row.values[sp500],
            bitcoin: row.values[btc],
            dxy_50ma,
            hy_spread_50ma,
        })
        .collect();

    Ok(MacroTable::new(rows))
}

/// Drop the warm-up rows whose trend means are still undefined.
pub fn trim_warmup(table: MacroTable) -> MacroTable {
    MacroTable::new(
        table
            .rows()
            .iter()
            .filter(|r| r.has_trend())
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::DenseRow;
    use chrono::NaiveDate;

    fn dense(n: usize) -> DenseTable {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        DenseTable {
            columns: SeriesId::ALL.to_vec(),
            rows: (0..n)
                .map(|i| DenseRow {
                    date: start + chrono::Duration::days(i as i64),
                    values: vec![1.0, 2.0, 3.0 + i as f64, 100.0 + i as f64, 5.0, 6.0],
                })
                .collect(),
        }
    }

    #[test]
    fn test_with_trend_maps_columns() {
        let table = with_trend(&dense(3), 2).unwrap();
        let latest = table.latest().unwrap();

        assert_eq!(latest.fed_assets, 1.0);
        assert_eq!(latest.m2_supply, 2.0);
        assert_eq!(latest.high_yield_spread, 5.0);
        assert_eq!(latest.dxy, 102.0);
        assert_eq!(latest.sp500, 5.0);
        assert_eq!(latest.bitcoin, 6.0);
        assert_eq!(latest.dxy_50ma, Some(101.5));
        assert_eq!(latest.hy_spread_50ma, Some(4.5));
        assert_eq!(table.first().unwrap().dxy_50ma, None);
    }

    #[test]
    fn test_trim_warmup_excludes_undefined_means() {
        let table = trim_warmup(with_trend(&dense(60), 50).unwrap());

        assert_eq!(table.len(), 11);
        assert!(table.rows().iter().all(|r| r.has_trend()));
        // First surviving row averages dxy 100..=149.
        assert_eq!(table.first().unwrap().dxy_50ma, Some(124.5));
    }

    #[test]
    fn test_with_trend_requires_all_columns() {
        let mut partial = dense(3);
        partial.columns.pop();
        assert!(with_trend(&partial, 2).is_err());
    }
}
