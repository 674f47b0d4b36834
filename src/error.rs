use thiserror::Error;

/// Errors raised anywhere between the upstream providers and the rendered page.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RSS decode error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("{provider} error: {message}")]
    Provider { provider: &'static str, message: String },

    #[error("{provider} returned no observations for {code}")]
    EmptySeries { provider: &'static str, code: String },

    #[error("no aligned rows survived the fill/drop step")]
    NoAlignedRows,

    #[error("insufficient history: need {required} aligned rows, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("no {window}-sample trend available on {date}")]
    TrendUnavailable { date: chrono::NaiveDate, window: usize },

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DashboardError {
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
