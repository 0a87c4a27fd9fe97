//! Trade trackers
//!
//! A [`TradeTracker`] turns a backward-paginated activity feed into an
//! ascending stream of trades. It remembers a watermark (the time of the newest
//! trade it has handed out) and each [`TradeTracker::consume`] call returns every
//! trade newer than that watermark, oldest first.
//!
//! ```no_run
//! use nftgo_sdk::{NftGoClient, TradeTracker};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NftGoClient::new()?;
//! let mut tracker = TradeTracker::whale_trades(client);
//!
//! loop {
//!     for trade in tracker.consume().await? {
//!         println!("{} {:?}", trade.time, trade.action());
//!     }
//!     tokio::time::sleep(std::time::Duration::from_secs(15)).await;
//! }
//! # }
//! ```

use crate::{
    client::NftGoClient,
    constants::{BOOTSTRAP_LOOKBACK_SECS, TRACKER_POLL_INTERVAL_SECS},
    error::{ApiError, TrackerError},
    provider::TradeFeed,
    providers::{BlockTradesFeed, WhaleTradesFeed},
    types::{secs_to_millis, TrackerState, TradeRecord},
};
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Source of "now" in seconds since the epoch
pub type Clock = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Wall-clock time in seconds
pub fn system_clock() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Tracker over the whale activity feed
pub type WhaleTradesTracker = TradeTracker<WhaleTradesFeed>;

/// Tracker over the block trades feed
pub type BlockTradesTracker = TradeTracker<BlockTradesFeed>;

/// Cursor-driven tracker over a [`TradeFeed`]
///
/// `consume` takes `&mut self`: one tracker is drained by one caller at a time.
pub struct TradeTracker<F> {
    feed: F,
    state: TrackerState,
    lookback_secs: u64,
    clock: Clock,
}

impl TradeTracker<WhaleTradesFeed> {
    /// Tracks whale buys, sells and mints
    pub fn whale_trades(client: NftGoClient) -> Self {
        Self::new(WhaleTradesFeed::new(client))
    }
}

impl TradeTracker<BlockTradesFeed> {
    /// Tracks above-floor sales
    pub fn block_trades(client: NftGoClient) -> Self {
        Self::new(BlockTradesFeed::new(client))
    }
}

impl<F: TradeFeed> TradeTracker<F> {
    /// Creates an uninitialized tracker using the system clock
    pub fn new(feed: F) -> Self {
        Self::with_clock(feed, system_clock)
    }

    /// Creates an uninitialized tracker reading "now" from `clock`
    pub fn with_clock(feed: F, clock: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        Self {
            feed,
            state: TrackerState::Uninitialized,
            lookback_secs: BOOTSTRAP_LOOKBACK_SECS,
            clock: Arc::new(clock),
        }
    }

    /// Overrides how far back bootstrap looks for a seed trade
    pub fn with_lookback(mut self, lookback_secs: u64) -> Self {
        self.lookback_secs = lookback_secs;
        self
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Time (seconds) of the newest trade handed out, `None` before bootstrap
    pub fn watermark(&self) -> Option<f64> {
        match self.state {
            TrackerState::Uninitialized => None,
            TrackerState::Ready { watermark_s } => Some(watermark_s),
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, TrackerState::Ready { .. })
    }

    pub fn feed_name(&self) -> &'static str {
        self.feed.feed_name()
    }

    /// Returns every trade newer than the watermark, oldest first
    ///
    /// The first call seeds the watermark from the newest trade of the last
    /// 24 hours and returns only what arrived after it. A failed call leaves
    /// the watermark where it was, so the next call fetches the same range again.
    pub async fn consume(&mut self) -> Result<Vec<TradeRecord>, TrackerError> {
        let now_s = (self.clock)();
        let watermark_s = match self.state {
            TrackerState::Ready { watermark_s } => watermark_s,
            TrackerState::Uninitialized => self.bootstrap(now_s).await?,
        };

        let mut trades = fetch_since(&self.feed, watermark_s, now_s).await?;
        trades.sort_by_key(|t| t.time);

        if let Some(newest) = trades.last() {
            let advanced = watermark_s.max(newest.time_secs());
            self.state = TrackerState::Ready {
                watermark_s: advanced,
            };
            tracing::debug!(
                feed = self.feed.feed_name(),
                count = trades.len(),
                watermark_s = advanced,
                "Consumed trades"
            );
        }

        Ok(trades)
    }

    async fn bootstrap(&mut self, now_s: f64) -> Result<f64, TrackerError> {
        let since_ms = secs_to_millis(now_s - self.lookback_secs as f64);
        let page = self.feed.fetch_trades(now_s).await?;

        let latest_ms = page
            .iter()
            .map(|t| t.time)
            .filter(|&time| time > since_ms)
            .max()
            .ok_or_else(|| TrackerError::bootstrap(self.feed.feed_name(), self.lookback_secs))?;

        let watermark_s = latest_ms as f64 / 1000.0;
        self.state = TrackerState::Ready { watermark_s };
        tracing::info!(
            feed = self.feed.feed_name(),
            watermark_s,
            "Trade tracker initialized"
        );
        Ok(watermark_s)
    }

    /// [`TradeTracker::into_stream`] polling every `TRACKER_POLL_INTERVAL_SECS`
    pub fn into_default_stream(self) -> impl Stream<Item = Result<TradeRecord, TrackerError>> {
        self.into_stream(Duration::from_secs(TRACKER_POLL_INTERVAL_SECS))
    }

    /// Polls `consume` every `poll_interval`, yielding trades one at a time
    ///
    /// Errors are yielded as items; the stream keeps polling after them.
    pub fn into_stream(
        self,
        poll_interval: Duration,
    ) -> impl Stream<Item = Result<TradeRecord, TrackerError>> {
        stream::unfold(
            (self, VecDeque::new(), true),
            move |(mut tracker, mut pending, mut first)| async move {
                loop {
                    if let Some(trade) = pending.pop_front() {
                        return Some((Ok(trade), (tracker, pending, first)));
                    }
                    if !first {
                        tokio::time::sleep(poll_interval).await;
                    }
                    first = false;

                    match tracker.consume().await {
                        Ok(batch) => pending.extend(batch),
                        Err(e) => {
                            tracing::warn!(
                                feed = tracker.feed_name(),
                                error = %e,
                                "Failed to consume trades"
                            );
                            return Some((Err(e), (tracker, pending, first)));
                        }
                    }
                }
            },
        )
    }
}

/// Fetches every trade with `time > start_s` from a feed, paging backwards from `end_s`
///
/// Pages are walked newest to oldest, each sorted descending, so the result is
/// in descending time order. Paging stops on an empty page, once a page reaches
/// back to `start_s`, or when the feed stops moving the cursor backwards.
pub async fn fetch_since<F: TradeFeed + ?Sized>(
    feed: &F,
    start_s: f64,
    end_s: f64,
) -> Result<Vec<TradeRecord>, ApiError> {
    let start_ms = secs_to_millis(start_s);
    let mut cursor_ms = secs_to_millis(end_s);
    let mut collected: Vec<TradeRecord> = Vec::new();
    let mut page = feed.fetch_trades(end_s).await?;
    let mut fetches = 1usize;

    loop {
        page.sort_by(|a, b| b.time.cmp(&a.time));
        let Some(oldest_ms) = page.last().map(|t| t.time) else {
            break;
        };

        for trade in page.drain(..) {
            if trade.time <= start_ms {
                break;
            }
            // The previous page's oldest trades may be served again at the cursor
            let repeated = fetches > 1
                && trade.time == cursor_ms
                && collected
                    .iter()
                    .rev()
                    .take_while(|t| t.time == cursor_ms)
                    .any(|t| *t == trade);
            if !repeated {
                collected.push(trade);
            }
        }

        if oldest_ms <= start_ms {
            break;
        }
        if oldest_ms >= cursor_ms {
            tracing::warn!(
                feed = feed.feed_name(),
                cursor_ms,
                oldest_ms,
                "Feed did not page backwards, stopping"
            );
            break;
        }

        cursor_ms = oldest_ms;
        page = feed.fetch_trades(cursor_ms as f64 / 1000.0).await?;
        fetches += 1;
    }

    tracing::debug!(
        feed = feed.feed_name(),
        fetches,
        count = collected.len(),
        start_ms,
        "Fetched trade range"
    );

    Ok(collected)
}
