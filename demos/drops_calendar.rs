use nftgo_sdk::{aggregate, service, NftGoClient, OrderBy, TimeRank};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let client = NftGoClient::new()?;

    let drops = aggregate::all_drops(&client).await?;
    println!("{} drops on the calendar", drops.len());

    for project in service::today_drops(&client).await? {
        println!(
            "today: {}",
            project.get("name").and_then(|n| n.as_str()).unwrap_or("<unnamed>")
        );
    }

    let collections = aggregate::all_whale_mint_coll(
        &client,
        TimeRank::H24,
        OrderBy::MintNum,
        false,
        true,
    )
    .await?;
    println!("{} collections minted by whales in the last 24h", collections.len());

    Ok(())
}
