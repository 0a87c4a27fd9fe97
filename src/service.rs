//! Convenience lookups built on the endpoint client

use crate::{
    aggregate::all_drops,
    client::NftGoClient,
    constants::SEARCH_SLUG_LIMIT,
    error::{ApiError, TrackerError},
    types::DropProject,
};
use chrono::{Local, NaiveDate, TimeZone};
use serde_json::Value;

/// Drops whose `startTime` falls on `date` in the local timezone
pub fn drops_starting_on(drops: Vec<DropProject>, date: NaiveDate) -> Vec<DropProject> {
    drops
        .into_iter()
        .filter(|project| {
            project.start_time
                .and_then(|ms| Local.timestamp_millis_opt(ms).single())
                .map(|start| start.date_naive() == date)
                .unwrap_or(false)
        })
        .collect()
}

/// Drops starting today
pub async fn today_drops(client: &NftGoClient) -> Result<Vec<DropProject>, TrackerError> {
    let today = Local::now().date_naive();
    Ok(drops_starting_on(all_drops(client).await?, today))
}

/// Drops starting tomorrow
pub async fn tomorrow_drops(client: &NftGoClient) -> Result<Vec<DropProject>, TrackerError> {
    let today = Local::now().date_naive();
    let Some(tomorrow) = today.succ_opt() else {
        return Ok(Vec::new());
    };
    Ok(drops_starting_on(all_drops(client).await?, tomorrow))
}

/// Slugs of the first collections matching `keyword`
pub async fn search_slug(client: &NftGoClient, keyword: &str) -> Result<Vec<String>, ApiError> {
    let envelope = client
        .search_collection(keyword, 0, SEARCH_SLUG_LIMIT)
        .await?;
    Ok(envelope
        .into_data()?
        .map(|data| data.collections.into_iter().map(|c| c.slug).collect())
        .unwrap_or_default())
}

/// Rarity of a token, `None` when the API has none
pub async fn rarity(
    client: &NftGoClient,
    contract_address: &str,
    token_id: &str,
    blockchain: &str,
) -> Result<Option<Value>, ApiError> {
    let envelope = client.nft(contract_address, token_id, blockchain).await?;
    Ok(envelope
        .into_data()?
        .and_then(|data| data.get("rarity").cloned())
        .filter(|rarity| !rarity.is_null()))
}

/// Address an on-chain name (e.g. `vitalik.eth`) resolves to, `None` if unknown
pub async fn resolve_blockchain_domain(
    client: &NftGoClient,
    domain: &str,
    blockchain: &str,
) -> Result<Option<String>, ApiError> {
    let envelope = client.resolve_name(domain, blockchain).await?;
    Ok(envelope
        .into_data()?
        .as_ref()
        .and_then(|data| data.get("address"))
        .and_then(Value::as_str)
        .map(str::to_string))
}
