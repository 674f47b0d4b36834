use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::aggregator::MacroAggregator;
use super::cache::TtlCache;
use super::snapshot::DashboardSnapshot;
use crate::error::Result;
use crate::sources::{HeadlineSource, NewsQuery};
use crate::types::{MacroTable, NewsItem};

/// Cache-fronted access to the macro table and the news feed.
///
/// Each cache sits behind its own async mutex that is held for the whole
/// refresh, so concurrent page loads share one upstream pass.
pub struct MacroDataService {
    aggregator: MacroAggregator,
    news: Arc<dyn HeadlineSource>,
    news_query: NewsQuery,
    comparison_offset: usize,
    tables: Mutex<TtlCache<u32, Arc<MacroTable>>>,
    headlines: Mutex<TtlCache<NewsQuery, Arc<Vec<NewsItem>>>>,
}

impl MacroDataService {
    pub fn new(
        aggregator: MacroAggregator,
        news: Arc<dyn HeadlineSource>,
        news_query: NewsQuery,
        comparison_offset: usize,
        table_ttl: Duration,
        news_ttl: Duration,
    ) -> Self {
        Self {
            aggregator,
            news,
            news_query,
            comparison_offset,
            tables: Mutex::new(TtlCache::new(table_ttl)),
            headlines: Mutex::new(TtlCache::new(news_ttl)),
        }
    }

    pub fn trend_window(&self) -> usize {
        self.aggregator.trend_window()
    }

    /// The aligned table, memoized per lookback. Failures are logged, returned,
    /// and leave the cache empty so the next view retries.
    pub async fn macro_table(&self) -> Result<Arc<MacroTable>> {
        let key = self.aggregator.lookback_years();
        let mut cache = self.tables.lock().await;
        if let Some(table) = cache.get(&key) {
            debug!("Macro table cache hit ({} rows)", table.len());
            return Ok(table);
        }

        debug!("Macro table cache miss");
        match self.aggregator.build(Utc::now().date_naive()).await {
            Ok(table) => {
                let table = Arc::new(table);
                cache.insert(key, Arc::clone(&table));
                Ok(table)
            }
            Err(e) => {
                warn!("Macro data unavailable: {}", e);
                Err(e)
            }
        }
    }

    pub async fn snapshot(&self) -> Result<(Arc<MacroTable>, DashboardSnapshot)> {
        let table = self.macro_table().await?;
        let snapshot = DashboardSnapshot::from_table(&table, self.trend_window(), self.comparison_offset)?;
        info!(
            "Regime as of {}: {} (dollar below trend: {}, spread below trend: {})",
            snapshot.as_of,
            snapshot.regime.label,
            snapshot.regime.dollar_below_trend,
            snapshot.regime.spread_below_trend
        );
        Ok((table, snapshot))
    }

    /// Recent headlines. A failed fetch degrades to an empty, uncached list.
    pub async fn headlines(&self) -> Arc<Vec<NewsItem>> {
        let mut cache = self.headlines.lock().await;
        if let Some(items) = cache.get(&self.news_query) {
            return items;
        }

        match self
            .news
            .fetch_headlines(self.news_query.clone(), Utc::now())
            .await
        {
            Ok(items) => {
                debug!("Fetched {} headlines", items.len());
                let items = Arc::new(items);
                cache.insert(self.news_query.clone(), Arc::clone(&items));
                items
            }
            Err(e) => {
                warn!("News feed unavailable: {}", e);
                Arc::new(Vec::new())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::engine::aggregator::test_support::provider_mock;
    use crate::sources::{MockHeadlineSource, MockSeriesProvider};
    use crate::types::{Provider, Published};

    pub fn news_query() -> NewsQuery {
        NewsQuery {
            keywords: vec!["Federal Reserve".to_string()],
            lookback_hours: 24,
            limit: 8,
        }
    }

    pub fn headline_mock() -> MockHeadlineSource {
        let mut news = MockHeadlineSource::new();
        news.expect_fetch_headlines().returning(|_, _| {
            Ok(vec![NewsItem {
                title: "Fed holds rates <steady>".to_string(),
                link: "https://example.com/fed".to_string(),
                published: Published::Raw("n/a".to_string()),
                source: "Wire".to_string(),
            }])
        });
        news
    }

    pub fn service_with(fred: MockSeriesProvider, yahoo: MockSeriesProvider, news: MockHeadlineSource) -> MacroDataService {
        MacroDataService::new(
            MacroAggregator::new(Arc::new(fred), Arc::new(yahoo), 3, 50),
            Arc::new(news),
            news_query(),
            21,
            Duration::from_secs(12 * 3600),
            Duration::from_secs(1800),
        )
    }

    pub fn healthy_service() -> MacroDataService {
        service_with(provider_mock(Provider::Fred), provider_mock(Provider::Yahoo), headline_mock())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::engine::aggregator::test_support::{provider_mock, synthetic_series};
    use crate::error::DashboardError;
    use crate::sources::{MockHeadlineSource, MockSeriesProvider};
    use crate::types::Provider;

    #[tokio::test]
    async fn test_table_is_memoized() {
        let mut fred = MockSeriesProvider::new();
        fred.expect_provider().return_const(Provider::Fred);
        // Three FRED series, fetched once.
        fred.expect_fetch_series()
            .times(3)
            .returning(|id, window| Ok(synthetic_series(id, window)));

        let service = service_with(fred, provider_mock(Provider::Yahoo), headline_mock());
        let first = service.macro_table().await.unwrap();
        let second = service.macro_table().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let mut fred = MockSeriesProvider::new();
        fred.expect_provider().return_const(Provider::Fred);
        fred.expect_fetch_series()
            .times(2)
            .returning(|_, _| Err(DashboardError::provider("FRED", "503 Service Unavailable")));

        let service = service_with(fred, provider_mock(Provider::Yahoo), headline_mock());
        assert!(service.macro_table().await.is_err());
        assert!(service.snapshot().await.is_err());
    }

    #[tokio::test]
    async fn test_snapshot_classifies_latest_row() {
        let service = healthy_service();
        let (table, snapshot) = service.snapshot().await.unwrap();

        assert_eq!(Some(snapshot.as_of), table.latest().map(|r| r.date));
        assert_eq!(snapshot.metrics.len(), 4);
    }

    #[tokio::test]
    async fn test_news_failure_degrades_to_empty() {
        let mut news = MockHeadlineSource::new();
        news.expect_fetch_headlines()
            .times(2)
            .returning(|_, _| Err(DashboardError::provider("Google News", "timeout")));

        let service = service_with(provider_mock(Provider::Fred), provider_mock(Provider::Yahoo), news);
        assert!(service.headlines().await.is_empty());
        assert!(service.headlines().await.is_empty());
    }

    #[tokio::test]
    async fn test_news_is_memoized() {
        let mut news = MockHeadlineSource::new();
        news.expect_fetch_headlines().times(1).returning(|_, _| Ok(Vec::new()));

        let service = service_with(provider_mock(Provider::Fred), provider_mock(Provider::Yahoo), news);
        service.headlines().await;
        service.headlines().await;
    }
}
