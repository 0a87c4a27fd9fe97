//! NFTGo REST endpoint client
//!
//! One method per endpoint. Every call is a single GET that returns the decoded
//! response envelope; paging, filtering and tracking live in `aggregate` and
//! `tracker`.

use crate::{
    config::ClientConfig,
    error::ApiError,
    metrics::{ClientMetrics, MetricsCollector},
    types::{
        secs_to_millis, ApiEnvelope, CollectionsData, DropsData, OrderBy, TimeRank, TradeRecord,
    },
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

type Query = Vec<(&'static str, String)>;

/// HTTP client for the NFTGo API
#[derive(Clone)]
pub struct NftGoClient {
    client: Client,
    config: ClientConfig,
    metrics: Arc<MetricsCollector>,
}

impl NftGoClient {
    /// Creates a client against the production API
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ApiError::NetworkError)?;

        tracing::debug!(base_url = %config.base_url(), "Created NFTGo client");

        Ok(Self {
            client,
            config,
            metrics: Arc::new(MetricsCollector::new()),
        })
    }

    /// Returns the configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request latency and success metrics
    pub async fn metrics(&self) -> ClientMetrics {
        self.metrics.get_metrics().await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T, ApiError> {
        let start = Instant::now();
        let result = self.send_get(path, query).await;
        self.metrics
            .record_request(path, start.elapsed(), result.is_ok())
            .await;
        result
    }

    async fn send_get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(url = %url, query = ?query, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::NetworkError)?;

        if response.status().as_u16() == 429 {
            return Err(ApiError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(ApiError::Http(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let response_text = response.text().await.map_err(ApiError::NetworkError)?;

        serde_json::from_str(&response_text).map_err(|e| {
            ApiError::InvalidResponse(format!(
                "Failed to parse response from {}: {}. Response: {}",
                path, e, response_text
            ))
        })
    }

    /// Searches ETH collections by keyword
    pub async fn search_collection(
        &self,
        keyword: &str,
        offset: u32,
        limit: u32,
    ) -> Result<ApiEnvelope<CollectionsData>, ApiError> {
        let query = vec![
            ("keyword", keyword.to_lowercase()),
            ("blockchains", "ETH".to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_json("/api/v1/collections", &query).await
    }

    /// Collection details by slug
    pub async fn collection(&self, slug: &str) -> Result<ApiEnvelope<Value>, ApiError> {
        let path = format!("/api/v1/collection/slug/{}", slug.to_lowercase());
        self.get_json(&path, &Vec::new()).await
    }

    /// Collection metrics by collection id
    pub async fn collection_metrics(&self, collection_id: &str) -> Result<ApiEnvelope<Value>, ApiError> {
        let path = format!("/api/v1/collection/metrics/{}", collection_id);
        self.get_json(&path, &Vec::new()).await
    }

    /// Account statistics for a wallet address
    pub async fn address(&self, address: &str) -> Result<ApiEnvelope<Value>, ApiError> {
        let query = vec![("address", address.to_string())];
        self.get_json("/api/v1/account/statistic/", &query).await
    }

    /// Collections held by a wallet address
    pub async fn address_metrics(
        &self,
        address: &str,
        blockchain: &str,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let query = vec![(
            "addresses",
            format!("{}-{}", blockchain.to_uppercase(), address),
        )];
        self.get_json("/api/v1/collections/holding/", &query).await
    }

    /// Basic info of one token
    pub async fn nft(
        &self,
        contract_address: &str,
        token_id: &str,
        blockchain: &str,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let path = format!(
            "/api/v1/asset/{}/{}/{}",
            blockchain.to_uppercase(),
            contract_address,
            token_id
        );
        self.get_json(&path, &Vec::new()).await
    }

    /// Most recent whale activities as of `time_s`
    pub async fn whale_trades(&self, time_s: f64) -> Result<ApiEnvelope<Vec<TradeRecord>>, ApiError> {
        let query = vec![
            ("cid", "all".to_string()),
            ("action", "all".to_string()),
            ("scroll", secs_to_millis(time_s).to_string()),
        ];
        self.get_json("/api/v1/bot/whales/activities", &query).await
    }

    /// Most recent above-floor sales as of `time_s`
    pub async fn block_trades(&self, time_s: f64) -> Result<ApiEnvelope<Vec<TradeRecord>>, ApiError> {
        let query = vec![("scroll", secs_to_millis(time_s).to_string())];
        self.get_json("/api/v1/bot/up-price-sales", &query).await
    }

    /// Drops calendar starting at `start_time_s`
    pub async fn drops(
        &self,
        start_time_s: f64,
        limit: u32,
        offset: u32,
    ) -> Result<ApiEnvelope<DropsData>, ApiError> {
        let query = vec![
            ("startTime", secs_to_millis(start_time_s).to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        self.get_json("/api/v1/drop/projects", &query).await
    }

    /// Top minted collections ranking
    pub async fn top_mint(
        &self,
        time_rank: TimeRank,
        order_by: OrderBy,
        is_asc: bool,
        only_listed: bool,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let by = order_by
            .top_mint_field()
            .ok_or_else(|| unsupported("top-mint", order_by))?;

        let mut query = ranking_query(time_rank, by, is_asc, offset, limit);
        query.push(("isListed", sign(only_listed)));
        self.get_json("/api/v1/ranking/top-mint", &query).await
    }

    /// Whales ranked by minting activity
    pub async fn mint_whale(
        &self,
        time_rank: TimeRank,
        order_by: OrderBy,
        is_asc: bool,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let by = order_by
            .mint_whale_field()
            .ok_or_else(|| unsupported("mintWhale", order_by))?;

        let query = ranking_query(time_rank, by, is_asc, offset, limit);
        self.get_json("/api/v1/whales/data/list/mintWhale", &query)
            .await
    }

    /// Collections minted by whales in `time_rank`
    ///
    /// The backend may return an incomplete list; see
    /// [`crate::aggregate::all_whale_mint_coll`] for the full listing.
    pub async fn whale_mint_coll(
        &self,
        time_rank: TimeRank,
        order_by: OrderBy,
        is_asc: bool,
        only_listed: bool,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<ApiEnvelope<Vec<Value>>, ApiError> {
        let by = order_by
            .whale_mint_coll_field()
            .ok_or_else(|| unsupported("whaleMintColl", order_by))?;

        let mut query = ranking_query(time_rank, by, is_asc, offset, limit);
        query.push(("isListed", sign(only_listed)));
        self.get_json("/api/v1/whales/data/list/whaleMintColl", &query)
            .await
    }

    /// Resolves an on-chain name (e.g. an ENS domain) to an address
    pub async fn resolve_name(
        &self,
        domain: &str,
        blockchain: &str,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let query = vec![
            ("domain", domain.to_string()),
            ("bc", blockchain.to_string()),
        ];
        self.get_json("/api/v1/account/resolve-name", &query).await
    }
}

fn sign(flag: bool) -> String {
    let value = if flag { "1" } else { "-1" };
    value.to_string()
}

fn unsupported(endpoint: &'static str, order_by: OrderBy) -> ApiError {
    ApiError::UnsupportedOrdering {
        endpoint,
        order_by: order_by.to_string(),
    }
}

fn ranking_query(
    time_rank: TimeRank,
    by: &'static str,
    is_asc: bool,
    offset: u32,
    limit: Option<u32>,
) -> Query {
    let mut query = vec![
        ("timeRank", time_rank.as_str().to_string()),
        ("by", by.to_string()),
        ("asc", sign(is_asc)),
        ("offset", offset.to_string()),
    ];
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_query_signs_and_optional_limit() {
        let query = ranking_query(TimeRank::H1, "WhaleNum", false, 20, None);
        assert!(query.contains(&("asc", "-1".to_string())));
        assert!(query.contains(&("timeRank", "1h".to_string())));
        assert!(!query.iter().any(|(k, _)| *k == "limit"));

        let query = ranking_query(TimeRank::D7, "Fomo", true, 0, Some(50));
        assert!(query.contains(&("asc", "1".to_string())));
        assert!(query.contains(&("limit", "50".to_string())));
    }

    #[test]
    fn test_url_uses_config() {
        let config = ClientConfig::default().with_domain("localhost:8080").with_scheme("http");
        let client = NftGoClient::with_config(config).unwrap();
        assert_eq!(
            client.url("/api/v1/collections"),
            "http://localhost:8080/api/v1/collections"
        );
    }

    #[tokio::test]
    async fn test_unsupported_ordering_fails_before_request() {
        // Unroutable host, so reaching the network would surface a NetworkError instead
        let config = ClientConfig::default().with_domain("127.0.0.1:9");
        let client = NftGoClient::with_config(config).unwrap();

        let err = client
            .top_mint(TimeRank::H24, OrderBy::CollNum, false, true, 0, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnsupportedOrdering { endpoint: "top-mint", .. }
        ));
        assert_eq!(client.metrics().await.total_requests, 0);
    }
}
