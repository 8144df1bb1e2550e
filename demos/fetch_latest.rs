use lottery_scraper::{ChromeRenderer, DrawExtractor, DrawOutcome, ScraperConfig};

#[tokio::main]
async fn main() {
    // ログ設定
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = ScraperConfig::from_env()
        .expect("invalid LOTTERY_* environment")
        .with_headless(false); // デバッグ用に表示モード

    let extractor = DrawExtractor::new(ChromeRenderer::new(config.clone()), &config)
        .expect("invalid selectors");

    println!("=== Power Lottery Fetch ===");

    match extractor.extract_outcome().await {
        DrawOutcome::Live(result) => {
            println!("第一區: {}", result.regular_numbers().join(" "));
            println!("第二區: {}", result.special_number());
        }
        DrawOutcome::Fallback { result, reason } => {
            eprintln!("取得失敗: {}", reason);
            println!("サンプル: {:?}", result);
        }
    }
}
