//! 威力彩 開獎番号エクストラクタ
//!
//! レンダラーでトップページを描画し、開獎番号を取り出す。
//! 取得に失敗した場合はエラーを返さず、サンプルデータにフォールバックする。

use tracing::{info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::{RenderSession, Renderer};

use super::parser::DrawSelectors;
use super::types::LotteryResult;

/// 1回の抽出結果
#[derive(Debug)]
pub enum DrawOutcome {
    Live(LotteryResult),
    Fallback {
        result: LotteryResult,
        reason: ScraperError,
    },
}

impl DrawOutcome {
    pub fn result(&self) -> &LotteryResult {
        match self {
            DrawOutcome::Live(result) => result,
            DrawOutcome::Fallback { result, .. } => result,
        }
    }

    pub fn into_result(self) -> LotteryResult {
        match self {
            DrawOutcome::Live(result) => result,
            DrawOutcome::Fallback { result, .. } => result,
        }
    }
}

pub struct DrawExtractor<R> {
    renderer: R,
    source_url: String,
    selectors: DrawSelectors,
}

impl<R: Renderer> DrawExtractor<R> {
    /// セレクタが不正な場合のみエラー
    pub fn new(renderer: R, config: &ScraperConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            renderer,
            source_url: config.source_url.clone(),
            selectors: DrawSelectors::from_config(config)?,
        })
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// 最新の開獎番号を取得（失敗時はサンプルデータ）
    pub async fn extract(&self) -> LotteryResult {
        self.extract_outcome().await.into_result()
    }

    pub async fn extract_outcome(&self) -> DrawOutcome {
        match self.try_extract().await {
            Ok(result) => {
                info!(
                    "Draw extracted: regular={:?}, special={}",
                    result.regular_numbers(),
                    result.special_number()
                );
                DrawOutcome::Live(result)
            }
            Err(e) => {
                warn!("Live extraction failed, using sample data: {}", e);
                DrawOutcome::Fallback {
                    result: LotteryResult::sample(),
                    reason: e,
                }
            }
        }
    }

    /// フォールバックなしで抽出
    pub async fn try_extract(&self) -> Result<LotteryResult, ScraperError> {
        let html = self.fetch_html().await?;
        let draw = self.selectors.parse_draw(&html)?;
        Ok(LotteryResult::live(draw))
    }

    /// セッションを確保して描画し、結果に関わらず必ず解放する
    async fn fetch_html(&self) -> Result<String, ScraperError> {
        let mut guard = SessionGuard::new(self.renderer.open().await?);

        let rendered = guard.render(&self.source_url).await;
        guard.close().await;

        rendered
    }
}

/// close されずに破棄されたセッションをバックグラウンドで close する
struct SessionGuard<S: RenderSession + 'static> {
    session: Option<S>,
}

impl<S: RenderSession + 'static> SessionGuard<S> {
    fn new(session: S) -> Self {
        Self {
            session: Some(session),
        }
    }

    async fn render(&mut self, url: &str) -> Result<String, ScraperError> {
        match self.session.as_mut() {
            Some(session) => session.render(url).await,
            None => Err(ScraperError::Render("セッションは既に閉じられています".into())),
        }
    }

    async fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.close().await {
                warn!("Failed to close render session: {}", e);
            }
        }
    }
}

impl<S: RenderSession + 'static> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        warn!("Extraction cancelled, closing render session in background");

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = session.close().await {
                        warn!("Failed to close render session: {}", e);
                    }
                });
            }
            Err(_) => warn!("No runtime available, render session dropped without close"),
        }
    }
}
