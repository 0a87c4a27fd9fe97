//! Offset/limit listings backed by the NFTGo client

use crate::{
    client::NftGoClient,
    error::ApiError,
    provider::PagedSource,
    types::{ApiEnvelope, CollectionSummary, DropProject, OrderBy, Page, TimeRank},
};
use async_trait::async_trait;
use serde_json::Value;

/// Drops calendar, anchored at a start time
pub struct DropsSource {
    client: NftGoClient,
}

impl DropsSource {
    pub fn new(client: NftGoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PagedSource for DropsSource {
    type Item = DropProject;

    async fn fetch_page(
        &self,
        cursor_s: Option<f64>,
        limit: u32,
        offset: u32,
    ) -> Result<ApiEnvelope<Page<DropProject>>, ApiError> {
        let start_s = cursor_s.unwrap_or_else(crate::tracker::system_clock);
        let envelope = self.client.drops(start_s, limit, offset).await?;
        Ok(envelope.map(|data| Page {
            total: data.total,
            items: data.projects,
        }))
    }

    fn source_name(&self) -> &'static str {
        "drops"
    }
}

/// Collection search results for one keyword
pub struct CollectionSearchSource {
    client: NftGoClient,
    keyword: String,
}

impl CollectionSearchSource {
    pub fn new(client: NftGoClient, keyword: impl Into<String>) -> Self {
        Self {
            client,
            keyword: keyword.into(),
        }
    }
}

#[async_trait]
impl PagedSource for CollectionSearchSource {
    type Item = CollectionSummary;

    async fn fetch_page(
        &self,
        _cursor_s: Option<f64>,
        limit: u32,
        offset: u32,
    ) -> Result<ApiEnvelope<Page<CollectionSummary>>, ApiError> {
        let envelope = self
            .client
            .search_collection(&self.keyword, offset, limit)
            .await?;
        Ok(envelope.map(|data| Page {
            total: data.total,
            items: data.collections,
        }))
    }

    fn source_name(&self) -> &'static str {
        "collection_search"
    }
}

/// Collections minted by whales
///
/// The endpoint returns a bare list, so each page reports its own length as `total`.
pub struct WhaleMintCollSource {
    client: NftGoClient,
    time_rank: TimeRank,
    order_by: OrderBy,
    is_asc: bool,
    only_listed: bool,
}

impl WhaleMintCollSource {
    pub fn new(
        client: NftGoClient,
        time_rank: TimeRank,
        order_by: OrderBy,
        is_asc: bool,
        only_listed: bool,
    ) -> Self {
        Self {
            client,
            time_rank,
            order_by,
            is_asc,
            only_listed,
        }
    }
}

#[async_trait]
impl PagedSource for WhaleMintCollSource {
    type Item = Value;

    async fn fetch_page(
        &self,
        _cursor_s: Option<f64>,
        limit: u32,
        offset: u32,
    ) -> Result<ApiEnvelope<Page<Value>>, ApiError> {
        let envelope = self
            .client
            .whale_mint_coll(
                self.time_rank,
                self.order_by,
                self.is_asc,
                self.only_listed,
                offset,
                Some(limit),
            )
            .await?;
        Ok(envelope.map(|items| Page {
            total: items.len() as u64,
            items,
        }))
    }

    fn source_name(&self) -> &'static str {
        "whale_mint_coll"
    }
}
