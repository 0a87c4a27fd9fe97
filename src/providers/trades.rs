//! Trade activity feeds backed by the NFTGo client

use crate::{
    client::NftGoClient,
    error::ApiError,
    provider::TradeFeed,
    types::{ApiEnvelope, TradeRecord},
};
use async_trait::async_trait;

/// Whale buy/sell/mint activity
pub struct WhaleTradesFeed {
    client: NftGoClient,
}

impl WhaleTradesFeed {
    pub fn new(client: NftGoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TradeFeed for WhaleTradesFeed {
    async fn fetch_trades(&self, cursor_s: f64) -> Result<Vec<TradeRecord>, ApiError> {
        let envelope = self.client.whale_trades(cursor_s).await?;
        into_trades(envelope)
    }

    fn feed_name(&self) -> &'static str {
        "whale_trades"
    }
}

/// Sales priced well above the collection floor
pub struct BlockTradesFeed {
    client: NftGoClient,
}

impl BlockTradesFeed {
    pub fn new(client: NftGoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TradeFeed for BlockTradesFeed {
    async fn fetch_trades(&self, cursor_s: f64) -> Result<Vec<TradeRecord>, ApiError> {
        let envelope = self.client.block_trades(cursor_s).await?;
        into_trades(envelope)
    }

    fn feed_name(&self) -> &'static str {
        "block_trades"
    }
}

/// Unwraps a trade page; a missing or null `data` is an empty page
fn into_trades(envelope: ApiEnvelope<Vec<TradeRecord>>) -> Result<Vec<TradeRecord>, ApiError> {
    Ok(envelope.into_data()?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_data_is_empty_page() {
        let envelope: ApiEnvelope<Vec<TradeRecord>> =
            serde_json::from_str(r#"{"errorCode": 0, "data": null}"#).unwrap();
        assert!(into_trades(envelope).unwrap().is_empty());
    }

    #[test]
    fn test_error_code_is_application_error() {
        let err = into_trades(ApiEnvelope::error(3, "scroll out of range")).unwrap_err();
        assert!(matches!(err, ApiError::Application { code: 3, .. }));
    }
}
