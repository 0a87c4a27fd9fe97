//! Types for the NFTGo SDK

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Converts seconds to whole milliseconds
///
/// Rounds rather than truncates so `secs_to_millis(ms as f64 / 1000.0) == ms`.
pub fn secs_to_millis(secs: f64) -> i64 {
    (secs * 1000.0).round() as i64
}

/// A single trade event from an activity feed
///
/// Only `time` is interpreted by the SDK; every other field (action, price,
/// addresses, ...) is kept as-is and reachable through [`TradeRecord::get`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Trade time in milliseconds since the epoch
    pub time: i64,

    /// Remaining payload fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TradeRecord {
    /// Create a trade record with no payload fields
    pub fn new(time: i64) -> Self {
        Self {
            time,
            fields: Map::new(),
        }
    }

    /// Add a payload field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up a payload field by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Trade time in seconds
    pub fn time_secs(&self) -> f64 {
        self.time as f64 / 1000.0
    }

    /// Trade action, read from `action` or `event` depending on the feed
    pub fn action(&self) -> Option<&str> {
        self.get("action")
            .or_else(|| self.get("event"))
            .and_then(Value::as_str)
    }
}

/// Common response envelope of the NFTGo API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// Application error code, 0 on success
    #[serde(default)]
    pub error_code: i64,

    /// Error description when `error_code` is non-zero
    pub error_msg: Option<String>,

    /// Response payload
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope around `data`
    pub fn ok(data: T) -> Self {
        Self {
            error_code: 0,
            error_msg: None,
            data: Some(data),
        }
    }

    /// Failed envelope with an application error code
    pub fn error(code: i64, msg: impl Into<String>) -> Self {
        Self {
            error_code: code,
            error_msg: Some(msg.into()),
            data: None,
        }
    }

    /// True when the backend reported no application error
    pub fn is_ok(&self) -> bool {
        self.error_code == 0
    }

    /// Payload of a successful envelope
    ///
    /// A non-zero `error_code` becomes [`ApiError::Application`]; a successful
    /// envelope without `data` is `Ok(None)`.
    pub fn into_data(self) -> Result<Option<T>, ApiError> {
        if !self.is_ok() {
            return Err(ApiError::Application {
                code: self.error_code,
                message: self.error_msg.unwrap_or_default(),
            });
        }
        Ok(self.data)
    }

    /// Converts the payload, keeping the error fields
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiEnvelope<U> {
        ApiEnvelope {
            error_code: self.error_code,
            error_msg: self.error_msg,
            data: self.data.map(f),
        }
    }
}

/// One page of a forward-paginated listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub total: u64,
    /// Items of this page
    pub items: Vec<T>,
}

/// `data` of the collection search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionsData {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub collections: Vec<CollectionSummary>,
}

/// A collection as listed by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub slug: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// `data` of the drops calendar endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct DropsData {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub projects: Vec<DropProject>,
}

/// An upcoming or ongoing NFT drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropProject {
    /// Drop start in milliseconds since the epoch
    #[serde(rename = "startTime")]
    pub start_time: Option<i64>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DropProject {
    /// Look up a payload field by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Time window of the ranking endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRank {
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "6h")]
    H6,
    #[serde(rename = "12h")]
    H12,
    #[serde(rename = "24h")]
    H24,
    #[serde(rename = "7d")]
    D7,
    #[serde(rename = "30d")]
    D30,
}

impl TimeRank {
    /// Query value for `timeRank`
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRank::M15 => "15m",
            TimeRank::M30 => "30m",
            TimeRank::H1 => "1h",
            TimeRank::H6 => "6h",
            TimeRank::H12 => "12h",
            TimeRank::H24 => "24h",
            TimeRank::D7 => "7d",
            TimeRank::D30 => "30d",
        }
    }
}

/// Sort key of the ranking endpoints
///
/// Each endpoint names its columns differently and supports a different
/// subset; the `*_field` methods return `None` for unsupported keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderBy {
    MintNum,
    MintVolume,
    MinterNum,
    WhaleNum,
    CollNum,
    TotalGasFee,
    FirstMintTime,
    Fomo,
}

impl OrderBy {
    /// Column name for `/ranking/top-mint`
    pub fn top_mint_field(&self) -> Option<&'static str> {
        match self {
            OrderBy::MintNum => Some("MintNum"),
            OrderBy::MintVolume => Some("MintVolume"),
            OrderBy::MinterNum => Some("MinterNum"),
            OrderBy::WhaleNum => Some("WhaleNum"),
            OrderBy::TotalGasFee => Some("TotalGasFee"),
            OrderBy::FirstMintTime => Some("FirstMintTime"),
            OrderBy::Fomo => Some("Fomo"),
            OrderBy::CollNum => None,
        }
    }

    /// Column name for `/whales/data/list/mintWhale`
    pub fn mint_whale_field(&self) -> Option<&'static str> {
        match self {
            OrderBy::MintNum => Some("MintNum"),
            OrderBy::MintVolume => Some("MintVolume"),
            OrderBy::CollNum => Some("CollNum"),
            OrderBy::TotalGasFee => Some("TotalGasFee"),
            OrderBy::FirstMintTime => Some("FirstMintTime"),
            OrderBy::MinterNum | OrderBy::WhaleNum | OrderBy::Fomo => None,
        }
    }

    /// Column name for `/whales/data/list/whaleMintColl`
    pub fn whale_mint_coll_field(&self) -> Option<&'static str> {
        match self {
            OrderBy::MintNum => Some("WhaleMintNum"),
            OrderBy::WhaleNum => Some("WhaleNum"),
            OrderBy::MintVolume => Some("WhaleMintVolume"),
            OrderBy::MinterNum => Some("MinterNum"),
            OrderBy::TotalGasFee => Some("TotalGasFee"),
            OrderBy::FirstMintTime => Some("FirstMintTime"),
            OrderBy::Fomo => Some("Fomo"),
            OrderBy::CollNum => None,
        }
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Tracker lifecycle state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerState {
    /// No watermark yet; the next `consume()` bootstraps
    Uninitialized,
    /// Watermark (seconds) of the most recent emitted trade
    Ready { watermark_s: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trade_record_keeps_payload() {
        let raw = json!({
            "time": 1_700_000_000_123i64,
            "action": "buy",
            "price": 12.5,
            "buyer": "0xabc"
        });
        let trade: TradeRecord = serde_json::from_value(raw).unwrap();

        assert_eq!(trade.time, 1_700_000_000_123);
        assert_eq!(trade.action(), Some("buy"));
        assert_eq!(trade.get("buyer"), Some(&json!("0xabc")));
        assert!(trade.get("time").is_none());
        assert!((trade.time_secs() - 1_700_000_000.123).abs() < 1e-6);
    }

    #[test]
    fn test_secs_to_millis_round_trips() {
        for ms in [1_700_000_000_123i64, 1_700_000_000_999, 1_699_999_999_001] {
            assert_eq!(secs_to_millis(ms as f64 / 1000.0), ms);
        }
        assert_eq!(secs_to_millis(1_700_000_000.5), 1_700_000_000_500);
    }

    #[test]
    fn test_action_falls_back_to_event() {
        let trade = TradeRecord::new(1).with_field("event", "sale");
        assert_eq!(trade.action(), Some("sale"));
    }

    #[test]
    fn test_envelope_error_without_data() {
        let envelope: ApiEnvelope<DropsData> =
            serde_json::from_value(json!({"errorCode": 7, "errorMsg": "bad offset"})).unwrap();
        assert!(!envelope.is_ok());
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error_msg.as_deref(), Some("bad offset"));
    }

    #[test]
    fn test_into_data_rejects_error_code() {
        let envelope: ApiEnvelope<Value> =
            serde_json::from_value(json!({"errorCode": 500, "errorMsg": "internal"})).unwrap();
        match envelope.into_data() {
            Err(ApiError::Application { code, message }) => {
                assert_eq!(code, 500);
                assert_eq!(message, "internal");
            }
            other => panic!("expected application error, got {:?}", other),
        }

        let empty: ApiEnvelope<Value> = serde_json::from_value(json!({"errorCode": 0})).unwrap();
        assert!(empty.into_data().unwrap().is_none());
    }

    #[test]
    fn test_drops_data_decodes_projects() {
        let envelope: ApiEnvelope<DropsData> = serde_json::from_value(json!({
            "errorCode": 0,
            "data": {
                "total": 2,
                "projects": [
                    {"name": "a", "startTime": 1_700_000_000_000i64},
                    {"name": "b"}
                ]
            }
        }))
        .unwrap();

        let data = envelope.data.unwrap();
        assert_eq!(data.total, 2);
        assert_eq!(data.projects[0].start_time, Some(1_700_000_000_000));
        assert_eq!(data.projects[1].start_time, None);
        assert_eq!(data.projects[1].get("name"), Some(&json!("b")));
    }

    #[test]
    fn test_order_by_mappings_are_per_endpoint() {
        assert_eq!(OrderBy::MintNum.top_mint_field(), Some("MintNum"));
        assert_eq!(OrderBy::MintNum.whale_mint_coll_field(), Some("WhaleMintNum"));
        assert_eq!(OrderBy::MintVolume.whale_mint_coll_field(), Some("WhaleMintVolume"));
        assert_eq!(OrderBy::CollNum.mint_whale_field(), Some("CollNum"));

        assert_eq!(OrderBy::CollNum.top_mint_field(), None);
        assert_eq!(OrderBy::CollNum.whale_mint_coll_field(), None);
        assert_eq!(OrderBy::Fomo.mint_whale_field(), None);
        assert_eq!(OrderBy::WhaleNum.mint_whale_field(), None);
    }

    #[test]
    fn test_time_rank_query_values() {
        assert_eq!(TimeRank::M15.as_str(), "15m");
        assert_eq!(TimeRank::D30.as_str(), "30d");
        assert_eq!(serde_json::to_value(TimeRank::H24).unwrap(), json!("24h"));
    }
}
