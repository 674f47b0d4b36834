use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{DashboardError, Result};
use crate::pipeline::{drop_incomplete, forward_fill, outer_join, trim_warmup, with_trend};
use crate::sources::SeriesProvider;
use crate::types::{DateWindow, MacroTable, Provider, Series, SeriesId};

/// Pulls the six series and aligns them into one trend-annotated table.
pub struct MacroAggregator {
    macro_source: Arc<dyn SeriesProvider>,
    market_source: Arc<dyn SeriesProvider>,
    lookback_years: u32,
    trend_window: usize,
}

impl MacroAggregator {
    pub fn new(
        macro_source: Arc<dyn SeriesProvider>,
        market_source: Arc<dyn SeriesProvider>,
        lookback_years: u32,
        trend_window: usize,
    ) -> Self {
        Self {
            macro_source,
            market_source,
            lookback_years,
            trend_window,
        }
    }

    pub fn lookback_years(&self) -> u32 {
        self.lookback_years
    }

    pub fn trend_window(&self) -> usize {
        self.trend_window
    }

    fn source_for(&self, id: SeriesId) -> &dyn SeriesProvider {
        match id.provider() {
            Provider::Fred => self.macro_source.as_ref(),
            Provider::Yahoo => self.market_source.as_ref(),
        }
    }

    /// Fetch every series one after another. The first unavailable series
    /// aborts the pass.
    pub async fn fetch_all(&self, window: DateWindow) -> Result<Vec<Series>> {
        let mut all = Vec::with_capacity(SeriesId::ALL.len());
        for id in SeriesId::ALL {
            let source = self.source_for(id);
            let series = source.fetch_series(id, window).await?;
            if series.is_empty() {
                return Err(DashboardError::EmptySeries {
                    provider: source.provider().as_str(),
                    code: id.code().to_string(),
                });
            }
            debug!("{} ({}): {} observations", id.column(), id.code(), series.len());
            all.push(series);
        }
        Ok(all)
    }

    /// Join, fill, drop, then attach trend means and discard warm-up rows.
    pub fn align(series: &[Series], trend_window: usize) -> Result<MacroTable> {
        let joined = outer_join(series);
        let filled = forward_fill(&joined);
        let dense = drop_incomplete(&filled);
        if dense.is_empty() {
            return Err(DashboardError::NoAlignedRows);
        }
        debug!(
            "Aligned {} dates ({} gaps before fill) -> {} complete rows",
            joined.len(),
            joined.missing_cells(),
            dense.len()
        );

        let table = trim_warmup(with_trend(&dense, trend_window)?);
        if table.is_empty() {
            return Err(DashboardError::InsufficientHistory {
                required: trend_window,
                available: dense.len(),
            });
        }
        Ok(table)
    }

    /// One full refresh for the window ending `today`.
    pub async fn build(&self, today: NaiveDate) -> Result<MacroTable> {
        let window = DateWindow::trailing_years(today, self.lookback_years);
        info!("Refreshing macro series {} .. {}", window.start, window.end);

        let series = self.fetch_all(window).await?;
        let table = Self::align(&series, self.trend_window)?;

        info!(
            "Macro table ready: {} rows, latest {}",
            table.len(),
            table.latest().map(|r| r.date.to_string()).unwrap_or_default()
        );
        Ok(table)
    }
}
