//! Feed abstractions consumed by the trackers and aggregation helpers

use crate::{
    error::ApiError,
    types::{ApiEnvelope, Page, TradeRecord},
};
use async_trait::async_trait;
use std::sync::Arc;

/// A backward-paginated activity feed
///
/// `fetch_trades(cursor_s)` returns the most recent trades as of `cursor_s`
/// (seconds), in no guaranteed order. An empty result marks the end of the range.
#[async_trait]
pub trait TradeFeed: Send + Sync {
    /// Fetches the page of trades ending at `cursor_s`
    ///
    /// # Arguments
    /// * `cursor_s` - Upper bound of the page (Unix seconds)
    ///
    /// # Returns
    /// Trades at or before the cursor, empty past the end of the feed, or an
    /// error if the request or the endpoint fails
    async fn fetch_trades(&self, cursor_s: f64) -> Result<Vec<TradeRecord>, ApiError>;

    /// Returns the name of this feed
    fn feed_name(&self) -> &'static str;
}

#[async_trait]
impl<F: TradeFeed + ?Sized> TradeFeed for Arc<F> {
    async fn fetch_trades(&self, cursor_s: f64) -> Result<Vec<TradeRecord>, ApiError> {
        (**self).fetch_trades(cursor_s).await
    }

    fn feed_name(&self) -> &'static str {
        (**self).feed_name()
    }
}

/// A forward-paginated (offset/limit) listing
#[async_trait]
pub trait PagedSource: Send + Sync {
    type Item: Send;

    /// Fetches `limit` items starting at `offset`
    ///
    /// # Arguments
    /// * `cursor_s` - Time the listing is anchored at, for listings that take one
    /// * `limit` - Page size
    /// * `offset` - Index of the first item
    ///
    /// # Returns
    /// The raw envelope, so callers can inspect `errorCode`, or an error if the
    /// request fails
    async fn fetch_page(
        &self,
        cursor_s: Option<f64>,
        limit: u32,
        offset: u32,
    ) -> Result<ApiEnvelope<Page<Self::Item>>, ApiError>;

    /// Returns the name of this listing
    fn source_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    /// In-memory activity feed
    ///
    /// A fetch at `cursor_s` returns up to `page_size` of the newest records
    /// with `time <= cursor` that are already visible at the feed's current
    /// `now`, in ascending order so callers must sort.
    pub struct MockTradeFeed {
        records: Mutex<Vec<TradeRecord>>,
        now_ms: Arc<AtomicI64>,
        page_size: usize,
        cursors: Mutex<Vec<i64>>,
        fail_on_call: Mutex<Option<usize>>,
    }

    impl MockTradeFeed {
        pub fn new(page_size: usize, now_ms: i64) -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                now_ms: Arc::new(AtomicI64::new(now_ms)),
                page_size,
                cursors: Mutex::new(Vec::new()),
                fail_on_call: Mutex::new(None),
            }
        }

        pub fn push(&self, record: TradeRecord) {
            self.records.lock().unwrap().push(record);
        }

        pub fn push_times(&self, times: impl IntoIterator<Item = i64>) {
            for time in times {
                self.push(TradeRecord::new(time).with_field("id", time));
            }
        }

        pub fn set_now_ms(&self, now_ms: i64) {
            self.now_ms.store(now_ms, Ordering::SeqCst);
        }

        /// Clock reading the feed's `now`, in seconds
        pub fn clock(&self) -> impl Fn() -> f64 + Send + Sync + 'static {
            let now_ms = self.now_ms.clone();
            move || now_ms.load(Ordering::SeqCst) as f64 / 1000.0
        }

        /// Makes the `n`-th fetch (0-based, counted from now on) fail
        pub fn fail_on_call(&self, n: usize) {
            let made = self.cursors.lock().unwrap().len();
            *self.fail_on_call.lock().unwrap() = Some(made + n);
        }

        /// Cursors (ms) of every fetch so far
        pub fn cursors(&self) -> Vec<i64> {
            self.cursors.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.cursors.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TradeFeed for MockTradeFeed {
        async fn fetch_trades(&self, cursor_s: f64) -> Result<Vec<TradeRecord>, ApiError> {
            let cursor_ms = crate::types::secs_to_millis(cursor_s);
            let call = {
                let mut cursors = self.cursors.lock().unwrap();
                cursors.push(cursor_ms);
                cursors.len() - 1
            };
            if *self.fail_on_call.lock().unwrap() == Some(call) {
                return Err(ApiError::Http("HTTP 502 Bad Gateway: ".to_string()));
            }

            let horizon = cursor_ms.min(self.now_ms.load(Ordering::SeqCst));
            let mut visible: Vec<TradeRecord> = self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.time <= horizon)
                .cloned()
                .collect();
            visible.sort_by(|a, b| b.time.cmp(&a.time));
            visible.truncate(self.page_size);
            visible.reverse();
            Ok(visible)
        }

        fn feed_name(&self) -> &'static str {
            "mock"
        }
    }

    /// In-memory offset/limit listing of `total` numbered items
    pub struct MockPagedSource {
        total: u64,
        report_total: bool,
        error_at_offset: Option<(u32, i64)>,
        calls: Mutex<Vec<(Option<f64>, u32, u32)>>,
    }

    impl MockPagedSource {
        pub fn new(total: u64) -> Self {
            Self {
                total,
                report_total: true,
                error_at_offset: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Reports each page's own length as `total`, like listings without a count
        pub fn without_total(mut self) -> Self {
            self.report_total = false;
            self
        }

        pub fn with_error_at(mut self, offset: u32, code: i64) -> Self {
            self.error_at_offset = Some((offset, code));
            self
        }

        /// Offsets of every fetch so far
        pub fn offsets(&self) -> Vec<u32> {
            self.calls.lock().unwrap().iter().map(|c| c.2).collect()
        }

        pub fn cursors(&self) -> Vec<Option<f64>> {
            self.calls.lock().unwrap().iter().map(|c| c.0).collect()
        }
    }

    #[async_trait]
    impl PagedSource for MockPagedSource {
        type Item = u64;

        async fn fetch_page(
            &self,
            cursor_s: Option<f64>,
            limit: u32,
            offset: u32,
        ) -> Result<ApiEnvelope<Page<u64>>, ApiError> {
            self.calls.lock().unwrap().push((cursor_s, limit, offset));

            if let Some((at, code)) = self.error_at_offset {
                if at == offset {
                    return Ok(ApiEnvelope::error(code, "mock failure"));
                }
            }

            let start = u64::from(offset).min(self.total);
            let end = (start + u64::from(limit)).min(self.total);
            let items: Vec<u64> = (start..end).collect();
            let total = if self.report_total {
                self.total
            } else {
                items.len() as u64
            };
            Ok(ApiEnvelope::ok(Page { total, items }))
        }

        fn source_name(&self) -> &'static str {
            "mock"
        }
    }
}
