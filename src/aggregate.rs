//! Auto-paginating listing helpers
//!
//! Two drivers walk a [`PagedSource`] by offset:
//!
//! - [`collect_by_total`] reads `total` from the first page and fetches exactly
//!   `ceil(total / limit)` pages.
//! - [`collect_while_full`] is for listings without a count and keeps fetching
//!   while pages come back full.
//!
//! A page with a non-zero `errorCode` aborts the walk with
//! [`TrackerError::Aggregation`]; items gathered so far are discarded.

use crate::{
    client::NftGoClient,
    constants::{COLLECTION_SLUG_BATCH, DROPS_PAGE_LIMIT, WHALE_MINT_COLL_PAGE_LIMIT},
    error::{ApiError, TrackerError},
    provider::PagedSource,
    providers::{CollectionSearchSource, DropsSource, WhaleMintCollSource},
    tracker::system_clock,
    types::{DropProject, OrderBy, Page, TimeRank},
};
use serde_json::Value;

/// Fetches every item of a listing that reports its `total`
///
/// Items are returned in page order. When `total <= limit` only the first
/// page is fetched.
pub async fn collect_by_total<S: PagedSource + ?Sized>(
    source: &S,
    cursor_s: Option<f64>,
    limit: u32,
) -> Result<Vec<S::Item>, TrackerError> {
    let limit = limit.max(1);
    let first = fetch_checked(source, cursor_s, limit, 0).await?;
    let total = first.total;
    let mut items = first.items;

    let mut offset = limit;
    while u64::from(offset) < total {
        let page = fetch_checked(source, cursor_s, limit, offset).await?;
        items.extend(page.items);
        offset = match offset.checked_add(limit) {
            Some(next) => next,
            None => break,
        };
    }

    tracing::debug!(
        source = source.source_name(),
        total,
        collected = items.len(),
        "Collected listing"
    );
    Ok(items)
}

/// True when a page of `page_len` items may be followed by another
pub fn has_more_pages(page_len: usize, limit: u32) -> bool {
    page_len > 0 && page_len >= limit as usize
}

/// Fetches pages until one comes back short, for listings without a `total`
pub async fn collect_while_full<S: PagedSource + ?Sized>(
    source: &S,
    cursor_s: Option<f64>,
    limit: u32,
) -> Result<Vec<S::Item>, TrackerError> {
    let limit = limit.max(1);
    let mut items = Vec::new();
    let mut offset = 0u32;

    loop {
        let page = fetch_checked(source, cursor_s, limit, offset).await?;
        let page_len = page.items.len();
        items.extend(page.items);

        if !has_more_pages(page_len, limit) {
            break;
        }
        offset = match offset.checked_add(limit) {
            Some(next) => next,
            None => break,
        };
    }

    tracing::debug!(
        source = source.source_name(),
        collected = items.len(),
        "Collected listing"
    );
    Ok(items)
}

async fn fetch_checked<S: PagedSource + ?Sized>(
    source: &S,
    cursor_s: Option<f64>,
    limit: u32,
    offset: u32,
) -> Result<Page<S::Item>, TrackerError> {
    let envelope = source.fetch_page(cursor_s, limit, offset).await?;

    if !envelope.is_ok() {
        let message = envelope
            .error_msg
            .unwrap_or_else(|| "no error message".to_string());
        tracing::warn!(
            source = source.source_name(),
            offset,
            code = envelope.error_code,
            message = %message,
            "Listing page failed"
        );
        return Err(TrackerError::aggregation(envelope.error_code, offset, message));
    }

    envelope.data.ok_or_else(|| {
        TrackerError::Api(ApiError::InvalidResponse(format!(
            "{} page at offset {} has no data",
            source.source_name(),
            offset
        )))
    })
}

/// Every drop on the calendar from now on
pub async fn all_drops(client: &NftGoClient) -> Result<Vec<DropProject>, TrackerError> {
    let source = DropsSource::new(client.clone());
    collect_by_total(&source, Some(system_clock()), DROPS_PAGE_LIMIT).await
}

/// Slug of every ETH collection known to the search endpoint
pub async fn all_collection_slugs(client: &NftGoClient) -> Result<Vec<String>, TrackerError> {
    let source = CollectionSearchSource::new(client.clone(), "");
    let collections = collect_by_total(&source, None, COLLECTION_SLUG_BATCH).await?;
    Ok(collections.into_iter().map(|c| c.slug).collect())
}

/// Every collection minted by whales in `time_rank`
///
/// Same as [`NftGoClient::whale_mint_coll`], but follows the listing past the
/// first page.
pub async fn all_whale_mint_coll(
    client: &NftGoClient,
    time_rank: TimeRank,
    order_by: OrderBy,
    is_asc: bool,
    only_listed: bool,
) -> Result<Vec<Value>, TrackerError> {
    let source = WhaleMintCollSource::new(client.clone(), time_rank, order_by, is_asc, only_listed);
    collect_while_full(&source, None, WHALE_MINT_COLL_PAGE_LIMIT).await
}
