//! Check-history lookups against a KairosDB backend.

use std::sync::Arc;

use reqwest::Client;
use tracing::debug;

use crate::auth::TokenProvider;
use crate::config::HistoryConfig;
use crate::distance::{DistanceHandle, DistanceOptions};
use crate::error::{HistoryError, Result};
use crate::gate::AccessGate;
use crate::models::{Aggregator, QueryRequest, QueryResponse, TimeWindow};
use crate::query::{build_query, DEFAULT_SAMPLING_SECONDS};

/// Issues time-series queries for one check's history.
///
/// Holds a reused [`reqwest::Client`]; each operation is a single POST round
/// trip with no retries, so a failed call surfaces immediately. Callers that
/// need a deadline wrap the returned future.
pub struct QueryService {
    url: String,
    check_id: String,
    entities: Vec<String>,
    client: Client,
    token_provider: Option<Arc<dyn TokenProvider>>,
}

/// Public handle: every [`QueryService`] operation behind the enabled flag.
pub type History = AccessGate<QueryService>;

impl std::fmt::Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService")
            .field("url", &self.url)
            .field("check_id", &self.check_id)
            .field("entities", &self.entities)
            .field("has_token_provider", &self.token_provider.is_some())
            .finish()
    }
}

impl QueryService {
    fn new(
        config: HistoryConfig,
        token_provider: Option<Arc<dyn TokenProvider>>,
    ) -> Result<Self> {
        if config.url.is_empty() {
            return Err(HistoryError::Config(
                "history backend URL is required".to_string(),
            ));
        }

        Ok(QueryService {
            url: config.url,
            check_id: config.check_id,
            entities: config.entities.normalize(),
            client: Client::new(),
            token_provider,
        })
    }

    pub fn check_id(&self) -> &str {
        &self.check_id
    }

    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    async fn post(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let mut call = self.client.post(&self.url).json(request);
        if let Some(provider) = &self.token_provider {
            if let Some(token) = provider.bearer_token() {
                call = call.bearer_auth(token);
            }
        }

        let response = call.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Runs the standard history query and returns the decoded response
    /// verbatim.
    pub async fn fetch_raw(&self, window: TimeWindow) -> Result<QueryResponse> {
        debug!(
            check_id = %self.check_id,
            from = window.from_seconds_ago,
            to = window.to_seconds_ago,
            "history query"
        );
        let request = build_query(
            &self.check_id,
            &self.entities,
            window,
            Aggregator::Avg,
            DEFAULT_SAMPLING_SECONDS,
        );
        self.post(&request).await
    }

    /// Values of the first result of the first query, i.e. the series for a
    /// check with a single grouped series.
    pub async fn fetch_series(&self, window: TimeWindow) -> Result<Vec<(i64, f64)>> {
        let response = self.fetch_raw(window).await?;
        response
            .queries
            .into_iter()
            .next()
            .and_then(|query| query.results.into_iter().next())
            .map(|result| result.values)
            .ok_or_else(|| HistoryError::Shape("response contains no query results".to_string()))
    }

    /// Reduces the whole window to one scalar per grouping key and returns
    /// the value for `key`.
    ///
    /// The sampling size is the window span (`from - to`), so the bounds must
    /// be passed largest-seconds-ago first; a reversed window sends a
    /// negative sampling size to the backend. `None` means the key is absent
    /// from an otherwise well-formed response, which is a normal outcome. A
    /// matched result whose `values` list is empty also yields `None`
    /// (the original plugin raised on that shape).
    pub async fn fetch_aggregated(
        &self,
        key: &str,
        aggregator: Aggregator,
        window: TimeWindow,
    ) -> Result<Option<f64>> {
        debug!(check_id = %self.check_id, key, "history aggregate");
        let request = build_query(
            &self.check_id,
            &self.entities,
            window,
            aggregator,
            window.span_seconds(),
        );
        let response = self.post(&request).await?;
        let query = response
            .queries
            .into_iter()
            .next()
            .ok_or_else(|| HistoryError::Shape("response contains no queries".to_string()))?;

        Ok(query
            .results
            .into_iter()
            .find(|result| result.key_tag() == Some(key))
            .and_then(|result| result.values.first().map(|&(_, value)| value)))
    }

    pub async fn get_avg(&self, key: &str, window: TimeWindow) -> Result<Option<f64>> {
        self.fetch_aggregated(key, Aggregator::Avg, window).await
    }

    pub async fn get_std_dev(&self, key: &str, window: TimeWindow) -> Result<Option<f64>> {
        self.fetch_aggregated(key, Aggregator::Dev, window).await
    }

    /// Hands this service to the distance-analysis subsystem as its data
    /// source.
    pub fn distance(&self, options: DistanceOptions) -> DistanceHandle<'_> {
        DistanceHandle::new(self, options)
    }
}

impl AccessGate<QueryService> {
    /// Builds a gated history handle from configuration. Fails when the
    /// backend URL is missing.
    pub fn new(config: HistoryConfig) -> Result<Self> {
        let enabled = config.history_enabled;
        Ok(AccessGate::wrap(QueryService::new(config, None)?, enabled))
    }

    /// Like [`History::new`], additionally attaching
    /// `Authorization: Bearer <token>` to every request.
    pub fn with_token_provider(
        config: HistoryConfig,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        let enabled = config.history_enabled;
        Ok(AccessGate::wrap(
            QueryService::new(config, Some(token_provider))?,
            enabled,
        ))
    }

    pub async fn fetch_raw(&self, window: TimeWindow) -> Result<QueryResponse> {
        self.guarded()?.fetch_raw(window).await
    }

    pub async fn fetch_series(&self, window: TimeWindow) -> Result<Vec<(i64, f64)>> {
        self.guarded()?.fetch_series(window).await
    }

    pub async fn fetch_aggregated(
        &self,
        key: &str,
        aggregator: Aggregator,
        window: TimeWindow,
    ) -> Result<Option<f64>> {
        self.guarded()?.fetch_aggregated(key, aggregator, window).await
    }

    pub async fn get_avg(&self, key: &str, window: TimeWindow) -> Result<Option<f64>> {
        self.guarded()?.get_avg(key, window).await
    }

    pub async fn get_std_dev(&self, key: &str, window: TimeWindow) -> Result<Option<f64>> {
        self.guarded()?.get_std_dev(key, window).await
    }

    pub fn distance(&self, options: DistanceOptions) -> Result<DistanceHandle<'_>> {
        Ok(self.guarded()?.distance(options))
    }
}
