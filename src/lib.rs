//! 威力彩 開獎番号スクレイパー
//!
//! - 台湾彩券トップページをヘッドレスChromeで描画し、威力彩の開獎番号を抽出
//! - 取得失敗時はサンプルデータにフォールバック（エラーは表示層に伝播しない）
//! - axum による表示ページ（初回表示 / 再取得）
//!
//! # 使用例
//!
//! ```rust,ignore
//! use lottery_scraper::{ChromeRenderer, DrawExtractor, ScraperConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScraperConfig::new().with_headless(true);
//!     let extractor = DrawExtractor::new(ChromeRenderer::new(config.clone()), &config).unwrap();
//!
//!     let result = extractor.extract().await;
//!     println!("{:?} + {}", result.regular_numbers(), result.special_number());
//! }
//! ```
//!
//! # サーバー
//!
//! ```rust,ignore
//! use lottery_scraper::{server::build_app, LotteryService};
//!
//! let app = build_app(LotteryService::new(extractor));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod lottery;
pub mod server;
pub mod service;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// 主要な型をリエクスポート
pub use browser::{ChromeRenderer, ChromeSession};
pub use config::{ScraperConfig, ServerConfig};
pub use error::ScraperError;
pub use lottery::{DataSource, DrawExtractor, DrawOutcome, LotteryResult};
pub use service::{DrawRequest, LotteryService};
pub use traits::{RenderSession, Renderer};
