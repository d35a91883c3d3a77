// demos/basic_usage.rs
use asset_loadgen::{LoadGenerator, UserConfig};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url =
        std::env::var("TARGET_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

    // Variant A: fixed three-account pool with rich headers.
    // Swap in UserConfig::random_ids() for the random-id variant.
    let generator = LoadGenerator::new(&base_url, UserConfig::fixed_pool())?;

    println!("🚀 Spawning 10 virtual users against {base_url}...");
    generator.spawn_users(10).await?;

    println!("⏱️  Running for 30 seconds...");
    let stats = generator.run_for(Duration::from_secs(30)).await?;

    println!("📊 Total requests: {}", stats.total_requests());
    println!("❌ Total failures: {}", stats.total_failures());
    for (kind, action) in &stats.per_action {
        println!(
            "   {}: {} requests, {} failures, avg latency {:?}",
            kind.as_str(),
            action.requests,
            action.failures,
            action.avg_latency()
        );
    }

    Ok(())
}
