use async_trait::async_trait;

use crate::error::ScraperError;

/// レンダリング済みHTMLを提供するゲートウェイ
///
/// `open` でセッション（ブラウザなど）を確保し、利用側は必ず `close` する。
/// 呼び出しがキャンセルされた場合、セッションはバックグラウンドタスクで `close` される。
#[async_trait]
pub trait Renderer: Send + Sync {
    type Session: RenderSession + 'static;

    /// セッション確保
    async fn open(&self) -> Result<Self::Session, ScraperError>;
}

#[async_trait]
pub trait RenderSession: Send {
    /// URLを開き、スクリプト実行後のHTMLを返す
    async fn render(&mut self, url: &str) -> Result<String, ScraperError>;

    /// リソース解放
    async fn close(&mut self) -> Result<(), ScraperError>;
}
