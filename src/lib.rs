//! # NFTGo SDK
//!
//! Typed client for the NFTGo market data API: collections, assets, whale
//! activity, mint rankings and the drops calendar.
//!
//! On top of the plain endpoints it offers:
//!
//! - **Trade trackers** ([`TradeTracker`]) that turn the "latest activity"
//!   feeds into an ascending, de-duplicated stream of trades.
//! - **Listing helpers** ([`aggregate`]) that follow offset/limit pagination
//!   to the end and return the whole listing.
//!
//! ## Usage
//!
//! ```no_run
//! use nftgo_sdk::{aggregate, NftGoClient, TradeTracker};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NftGoClient::new()?;
//!
//! // Every upcoming drop, across all pages
//! let drops = aggregate::all_drops(&client).await?;
//! println!("{} drops on the calendar", drops.len());
//!
//! // New whale trades since the last call
//! let mut whales = TradeTracker::whale_trades(client.clone());
//! for trade in whales.consume().await? {
//!     println!("{} {:?}", trade.time, trade.action());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! The client takes an explicit [`ClientConfig`]. `ClientConfig::from_env()`
//! reads `NFTGO_API_DOMAIN`, `NFTGO_API_SCHEME` and
//! `NFTGO_REQUEST_TIMEOUT_SECS` on top of the defaults in [`constants`].
//!
//! ## Error Handling
//!
//! Endpoint calls return [`ApiError`]. Trackers and listing helpers return
//! [`TrackerError`], which wraps `ApiError` unchanged and adds
//! `Bootstrap` (no trade to seed the watermark from) and `Aggregation`
//! (a page reported a non-zero `errorCode`). Nothing is retried.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod providers;
pub mod service;
pub mod tracker;
pub mod types;

// Re-export commonly used types
pub use client::NftGoClient;
pub use config::ClientConfig;
pub use error::{ApiError, TrackerError};
pub use metrics::ClientMetrics;
pub use provider::{PagedSource, TradeFeed};
pub use tracker::{BlockTradesTracker, TradeTracker, WhaleTradesTracker};
pub use types::{
    ApiEnvelope, CollectionSummary, DropProject, OrderBy, Page, TimeRank, TrackerState,
    TradeRecord,
};
