use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DashboardError, Result};
use crate::types::{MacroRow, MacroTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum Regime {
    RiskOn,
    RiskOff,
    Neutral,
}

impl Regime {
    pub fn label(&self) -> &'static str {
        match self {
            Regime::RiskOn => "RISK-ON",
            Regime::RiskOff => "RISK-OFF",
            Regime::Neutral => "NEUTRAL",
        }
    }

    /// CSS class for the status badge.
    pub fn style(&self) -> &'static str {
        match self {
            Regime::RiskOn => "risk-on",
            Regime::RiskOff => "risk-off",
            Regime::Neutral => "neutral",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Regime::RiskOn => "Liquidity expanding: lean into risk assets",
            Regime::RiskOff => "Liquidity contracting: raise cash, stay defensive",
            Regime::Neutral => "No clear direction: stock-picker's market",
        }
    }

    pub fn from_trends(dollar_below_trend: bool, spread_below_trend: bool) -> Self {
        match (dollar_below_trend, spread_below_trend) {
            (true, true) => Regime::RiskOn,
            (false, false) => Regime::RiskOff,
            _ => Regime::Neutral,
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegimeSignal {
    pub regime: Regime,
    pub label: &'static str,
    pub style: &'static str,
    pub description: &'static str,
    pub dollar_below_trend: bool,
    pub spread_below_trend: bool,
}

impl RegimeSignal {
    fn new(dollar_below_trend: bool, spread_below_trend: bool) -> Self {
        let regime = Regime::from_trends(dollar_below_trend, spread_below_trend);
        Self {
            regime,
            label: regime.label(),
            style: regime.style(),
            description: regime.description(),
            dollar_below_trend,
            spread_below_trend,
        }
    }
}

/// Classify a single row. A row without both trend means is insufficient
/// history, never a comparison against a missing value.
pub fn classify(row: &MacroRow, window: usize) -> Result<RegimeSignal> {
    let (Some(dxy_ma), Some(spread_ma)) = (row.dxy_50ma, row.hy_spread_50ma) else {
        return Err(DashboardError::TrendUnavailable {
            date: row.date,
            window,
        });
    };
    Ok(RegimeSignal::new(row.dxy < dxy_ma, row.high_yield_spread < spread_ma))
}

/// Classify the latest row of `table`.
pub fn classify_latest(table: &MacroTable, window: usize) -> Result<RegimeSignal> {
    let latest = table.latest().ok_or(DashboardError::InsufficientHistory {
        required: window,
        available: table.len(),
    })?;
    classify(latest, window).map_err(|_| DashboardError::InsufficientHistory {
        required: window,
        available: table.len(),
    })
}
