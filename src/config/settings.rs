use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::sources::NewsQuery;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub news: NewsSettings,
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("server.port must be > 0".to_string());
        }

        if self.data.lookback_years == 0 {
            errors.push("data.lookback_years must be > 0".to_string());
        }
        if self.data.trend_window < 2 {
            errors.push("data.trend_window must be >= 2".to_string());
        }
        if self.data.comparison_offset < 2 {
            errors.push("data.comparison_offset must be >= 2".to_string());
        }
        if self.data.cache_ttl_hours == 0 {
            errors.push("data.cache_ttl_hours must be > 0".to_string());
        }
        if self.data.http_timeout_secs == 0 {
            errors.push("data.http_timeout_secs must be > 0".to_string());
        }

        if self.news.keywords.iter().all(|k| k.trim().is_empty()) {
            errors.push("news.keywords must contain at least one keyword".to_string());
        }
        if self.news.limit == 0 {
            errors.push("news.limit must be > 0".to_string());
        }
        if self.news.lookback_hours == 0 {
            errors.push("news.lookback_hours must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8501,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub lookback_years: u32,
    pub trend_window: usize,
    /// Rows back for the "1M" change on the metric cards.
    pub comparison_offset: usize,
    pub cache_ttl_hours: u64,
    pub http_timeout_secs: u64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            lookback_years: 3,
            trend_window: 50,
            comparison_offset: 21,
            cache_ttl_hours: 12,
            http_timeout_secs: 30,
        }
    }
}

impl DataSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours * 3600)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSettings {
    pub keywords: Vec<String>,
    pub lookback_hours: u32,
    pub limit: usize,
    pub cache_ttl_minutes: u64,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            keywords: vec![
                "Federal Reserve".to_string(),
                "liquidity".to_string(),
                "M2 money supply".to_string(),
                "dollar index".to_string(),
                "credit spreads".to_string(),
            ],
            lookback_hours: 24,
            limit: 8,
            cache_ttl_minutes: 30,
        }
    }
}

impl NewsSettings {
    pub fn query(&self) -> NewsQuery {
        NewsQuery {
            keywords: self.keywords.clone(),
            lookback_hours: self.lookback_hours,
            limit: self.limit,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_minutes * 60)
    }
}
