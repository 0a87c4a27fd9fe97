//! Constants for the NFTGo SDK
//!
//! Compile-time defaults live here. The only runtime configuration is the
//! `ClientConfig` value handed to the client (see `config`).

/// Default URL scheme
pub const DEFAULT_SCHEME: &str = "https";

/// Production API host
pub const DOMAIN_PRODUCTION: &str = "api.nftgo.io";

/// HTTP request timeout (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "nftgo-sdk/0.1.0";

/// How far back the trade tracker looks when seeding its watermark (in seconds)
pub const BOOTSTRAP_LOOKBACK_SECS: u64 = 3600 * 24;

/// Interval between `consume()` calls of `TradeTracker::into_default_stream` (in seconds)
pub const TRACKER_POLL_INTERVAL_SECS: u64 = 15;

/// Page size used when walking the drops calendar
pub const DROPS_PAGE_LIMIT: u32 = 100;

/// Page size used when walking the whale-mint collection ranking
pub const WHALE_MINT_COLL_PAGE_LIMIT: u32 = 100;

/// Page size used when listing every collection slug
pub const COLLECTION_SLUG_BATCH: u32 = 200;

/// Number of results returned by `search_slug`
pub const SEARCH_SLUG_LIMIT: u32 = 100;

/// Environment variable overriding the API host
pub const ENV_API_DOMAIN: &str = "NFTGO_API_DOMAIN";

/// Environment variable overriding the URL scheme
pub const ENV_API_SCHEME: &str = "NFTGO_API_SCHEME";

/// Environment variable overriding the request timeout (in seconds)
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "NFTGO_REQUEST_TIMEOUT_SECS";
