use futures::StreamExt;
use nftgo_sdk::{ClientConfig, NftGoClient, TradeTracker};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("NFTGo Whale Trades Stream");
    println!("=========================");

    let client = NftGoClient::with_config(ClientConfig::from_env())?;
    let tracker = TradeTracker::whale_trades(client.clone());

    let stream = tracker.into_default_stream();
    futures::pin_mut!(stream);

    let mut received = 0;
    while let Some(item) = stream.next().await {
        match item {
            Ok(trade) => {
                received += 1;
                println!(
                    "{:<15} {:<8} {}",
                    trade.time,
                    trade.action().unwrap_or("?"),
                    trade.get("price").map(|p| p.to_string()).unwrap_or_default()
                );
            }
            Err(e) => eprintln!("Tracker error: {}", e),
        }

        if received >= 50 {
            break;
        }
    }

    let metrics = client.metrics().await;
    println!(
        "\n{} requests, p50={:.0}ms, success_rate={:.1}%",
        metrics.total_requests,
        metrics.latency_p50_ms,
        metrics.success_rate * 100.0
    );

    Ok(())
}
