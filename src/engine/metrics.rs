use serde::Serialize;

use crate::types::{MacroTable, SeriesId};

const FAVORABLE_COLOR: &str = "#64ffda";
const UNFAVORABLE_COLOR: &str = "#ff6b6b";

/// A tracked field on the metric strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub series: SeriesId,
    pub title: &'static str,
    pub unit: &'static str,
    /// A rise is bad news (dollar, credit spread).
    pub reverse_color: bool,
}

pub const TRACKED_METRICS: [MetricSpec; 4] = [
    MetricSpec {
        series: SeriesId::FedAssets,
        title: "Fed Total Assets",
        unit: "",
        reverse_color: false,
    },
    MetricSpec {
        series: SeriesId::M2Supply,
        title: "M2 Money Supply",
        unit: "",
        reverse_color: false,
    },
    MetricSpec {
        series: SeriesId::DollarIndex,
        title: "Dollar Index (DXY)",
        unit: "",
        reverse_color: true,
    },
    MetricSpec {
        series: SeriesId::HighYieldSpread,
        title: "Credit Spread",
        unit: "%",
        reverse_color: true,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricChange {
    pub series: SeriesId,
    pub title: &'static str,
    pub unit: &'static str,
    pub current: f64,
    pub previous: f64,
    pub diff: f64,
    /// `None` when the previous value is zero.
    pub diff_pct: Option<f64>,
    pub favorable: bool,
}

impl MetricChange {
    pub fn compute(metric: &MetricSpec, current: f64, previous: f64) -> Self {
        let diff = current - previous;
        let diff_pct = (previous != 0.0).then(|| diff / previous * 100.0);
        let rising = diff > 0.0;
        Self {
            series: metric.series,
            title: metric.title,
            unit: metric.unit,
            current,
            previous,
            diff,
            diff_pct,
            favorable: rising != metric.reverse_color,
        }
    }

    pub fn arrow(&self) -> &'static str {
        if self.diff > 0.0 {
            "▲"
        } else {
            "▼"
        }
    }

    pub fn color(&self) -> &'static str {
        if self.favorable {
            FAVORABLE_COLOR
        } else {
            UNFAVORABLE_COLOR
        }
    }

    pub fn current_display(&self) -> String {
        format!("{}{}", group_thousands(self.current), self.unit)
    }

    /// `▲ 1,234.56 (+0.42%) 1M`
    pub fn change_display(&self) -> String {
        let pct = match self.diff_pct {
            Some(p) => format!("{:+.2}%", p),
            None => "n/a".to_string(),
        };
        format!("{} {} ({}) 1M", self.arrow(), group_thousands(self.diff.abs()), pct)
    }
}

/// Latest value of each tracked field against the `offset`-th most recent
/// row. Empty when the table is shorter than `offset`.
pub fn month_over_month(table: &MacroTable, offset: usize) -> Vec<MetricChange> {
    let (Some(latest), Some(previous)) = (table.latest(), table.nth_from_end(offset)) else {
        return Vec::new();
    };
    TRACKED_METRICS
        .iter()
        .map(|metric| MetricChange::compute(metric, latest.value(metric.series), previous.value(metric.series)))
        .collect()
}

/// Two decimals with comma thousands separators.
pub fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::table::sample_row;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_rise_is_favorable_for_liquidity() {
        let metric = TRACKED_METRICS[0];
        let change = MetricChange::compute(&metric, 110.0, 100.0);

        assert_eq!(change.diff, 10.0);
        assert!((change.diff_pct.unwrap() - 10.0).abs() < 1e-12);
        assert!(change.favorable);
        assert_eq!(change.arrow(), "▲");
        assert_eq!(change.color(), FAVORABLE_COLOR);
    }

    #[test]
    fn test_reverse_color_for_dollar_and_spread() {
        let dxy = TRACKED_METRICS[2];
        assert!(!MetricChange::compute(&dxy, 105.0, 100.0).favorable);
        assert!(MetricChange::compute(&dxy, 95.0, 100.0).favorable);

        let spread = TRACKED_METRICS[3];
        let change = MetricChange::compute(&spread, 3.5, 4.0);
        assert!(change.favorable);
        assert_eq!(change.arrow(), "▼");
        assert_eq!(change.change_display(), "▼ 0.50 (-12.50%) 1M");
        assert_eq!(change.current_display(), "3.50%");
    }

    #[test]
    fn test_unchanged_value() {
        let fed = MetricChange::compute(&TRACKED_METRICS[0], 100.0, 100.0);
        assert!(!fed.favorable);
        assert_eq!(fed.arrow(), "▼");

        let dxy = MetricChange::compute(&TRACKED_METRICS[2], 100.0, 100.0);
        assert!(dxy.favorable);
    }

    #[test]
    fn test_zero_previous_has_no_percentage() {
        let change = MetricChange::compute(&TRACKED_METRICS[0], 5.0, 0.0);
        assert!(change.diff_pct.is_none());
        assert!(change.change_display().contains("n/a"));
    }

    #[test]
    fn test_month_over_month_uses_offset_row() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let rows = (0..30)
            .map(|i| sample_row(start + Duration::days(i), 100.0 + i as f64, Some(100.0), 4.0, Some(4.0)))
            .collect();
        let table = MacroTable::new(rows);

        let changes = month_over_month(&table, 21);
        assert_eq!(changes.len(), 4);
        let dxy = changes.iter().find(|c| c.series == SeriesId::DollarIndex).unwrap();
        assert_eq!(dxy.current, 129.0);
        assert_eq!(dxy.previous, 109.0);

        assert!(month_over_month(&table, 31).is_empty());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(6_587_432.126), "6,587,432.13");
        assert_eq!(group_thousands(999.0), "999.00");
        assert_eq!(group_thousands(1_000.0), "1,000.00");
        assert_eq!(group_thousands(-1_234.5), "-1,234.50");
        assert_eq!(group_thousands(0.0), "0.00");
    }
}
