use askama::Template;

use crate::engine::{ChartSeries, DashboardSnapshot, MetricChange};
use crate::error::Result;
use crate::types::{MacroTable, NewsItem};

pub const UNAVAILABLE_MESSAGE: &str =
    "Could not load market data. Check the status of FRED and Yahoo Finance and try again later.";

pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub change: String,
    pub color: String,
}

impl From<&MetricChange> for MetricCard {
    fn from(change: &MetricChange) -> Self {
        Self {
            title: change.title.to_string(),
            value: change.current_display(),
            change: change.change_display(),
            color: change.color().to_string(),
        }
    }
}

pub struct NewsRow {
    pub title: String,
    pub link: String,
    pub published: String,
    pub source: String,
}

impl From<&NewsItem> for NewsRow {
    fn from(item: &NewsItem) -> Self {
        Self {
            title: item.title.clone(),
            link: item.link.clone(),
            published: item.published.to_string(),
            source: item.source.clone(),
        }
    }
}

/// The single dashboard page. When data is unavailable only the error
/// message is rendered.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub has_data: bool,
    pub error_message: String,
    pub as_of: String,
    pub trend_window: usize,
    pub regime_label: String,
    pub regime_style: String,
    pub regime_description: String,
    pub trend_note: String,
    pub cards: Vec<MetricCard>,
    pub chart_json: String,
    pub news: Vec<NewsRow>,
}

impl DashboardPage {
    pub fn ready(
        table: &MacroTable,
        snapshot: &DashboardSnapshot,
        news: &[NewsItem],
        trend_window: usize,
    ) -> Result<Self> {
        let regime = &snapshot.regime;
        let trend_note = format!(
            "Dollar {} its {}-day trend, credit spread {} its {}-day trend",
            if regime.dollar_below_trend { "below" } else { "above" },
            trend_window,
            if regime.spread_below_trend { "below" } else { "above" },
            trend_window,
        );

        Ok(Self {
            has_data: true,
            error_message: String::new(),
            as_of: snapshot.as_of.format("%Y-%m-%d").to_string(),
            trend_window,
            regime_label: regime.label.to_string(),
            regime_style: regime.style.to_string(),
            regime_description: regime.description.to_string(),
            trend_note,
            cards: snapshot.metrics.iter().map(MetricCard::from).collect(),
            chart_json: serde_json::to_string(&ChartSeries::from_table(table))?,
            news: news.iter().map(NewsRow::from).collect(),
        })
    }

    pub fn unavailable() -> Self {
        Self {
            has_data: false,
            error_message: UNAVAILABLE_MESSAGE.to_string(),
            as_of: String::new(),
            trend_window: 0,
            regime_label: String::new(),
            regime_style: String::new(),
            regime_description: String::new(),
            trend_note: String::new(),
            cards: Vec::new(),
            chart_json: "null".to_string(),
            news: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::table::sample_row;
    use crate::types::Published;
    use chrono::{Duration, NaiveDate};

    fn table() -> MacroTable {
        let start = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        MacroTable::new(
            (0..25)
                .map(|i| sample_row(start + Duration::days(i), 105.0, Some(100.0), 3.0, Some(4.0)))
                .collect(),
        )
    }

    #[test]
    fn test_ready_page_renders_badge_cards_and_news() {
        let table = table();
        let snapshot = DashboardSnapshot::from_table(&table, 50, 21).unwrap();
        let news = vec![NewsItem {
            title: "Spreads <tighten> & dollar eases".to_string(),
            link: "https://example.com/a".to_string(),
            published: Published::Raw("today".to_string()),
            source: "Wire".to_string(),
        }];

        let html = DashboardPage::ready(&table, &snapshot, &news, 50).unwrap().render().unwrap();

        assert!(html.contains("class=\"status-badge neutral\""));
        assert!(html.contains("NEUTRAL"));
        assert_eq!(html.matches("class=\"metric-card\"").count(), 4);
        assert!(html.contains("Spreads &lt;tighten&gt; &amp; dollar eases"));
        assert!(html.contains("2026-09-25"));
    }

    #[test]
    fn test_unavailable_page_renders_only_the_error() {
        let html = DashboardPage::unavailable().render().unwrap();

        assert!(html.contains("Could not load market data"));
        assert!(!html.contains("class=\"metric-card\""));
        assert!(!html.contains("class=\"status-badge"));
        assert!(!html.contains("<canvas"));
    }
}
