//! chromiumoxide によるレンダラー実装
//!
//! セッションごとに独立したChromeプロセス（一時プロフィール付き）を起動する。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::page::ScreenshotParams;
use futures::StreamExt;
use tokio::sync::{OnceCell, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::{RenderSession, Renderer};

pub struct ChromeRenderer {
    config: ScraperConfig,
    permits: Arc<Semaphore>,
    fetched_executable: OnceCell<PathBuf>,
}

impl ChromeRenderer {
    pub fn new(config: ScraperConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_sessions.max(1)));
        Self {
            config,
            permits,
            fetched_executable: OnceCell::new(),
        }
    }

    /// 使用するChrome実行ファイル（未指定ならchromiumoxideの自動検出）
    async fn executable(&self) -> Result<Option<PathBuf>, ScraperError> {
        if let Some(path) = &self.config.chrome_executable {
            return Ok(Some(path.clone()));
        }
        if !self.config.fetch_browser {
            return Ok(None);
        }

        let path = self
            .fetched_executable
            .get_or_try_init(|| fetch_chromium(self.config.browser_cache_dir.clone()))
            .await?;
        Ok(Some(path.clone()))
    }

    fn browser_config(
        &self,
        executable: Option<PathBuf>,
        user_data_dir: &Path,
    ) -> Result<BrowserConfig, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .user_data_dir(user_data_dir)
            .window_size(1280, 800);

        if let Some(path) = executable {
            builder = builder.chrome_executable(path);
        }

        if !self.config.headless {
            builder = builder.with_head();
        }

        builder = builder
            .no_sandbox()
            .request_timeout(self.config.timeout)
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");

        if self.config.debug {
            builder = builder.arg("--enable-logging=stderr").arg("--v=1");
        }

        builder
            .build()
            .map_err(|e| ScraperError::BrowserInit(format!("ブラウザ設定エラー: {}", e)))
    }
}

/// Chromiumをキャッシュディレクトリへダウンロード
async fn fetch_chromium(cache_dir: PathBuf) -> Result<PathBuf, ScraperError> {
    info!("Fetching Chromium into {:?}...", cache_dir);
    tokio::fs::create_dir_all(&cache_dir).await?;

    let options = BrowserFetcherOptions::builder()
        .with_path(&cache_dir)
        .build()
        .map_err(|e| ScraperError::BrowserInit(format!("フェッチャー設定エラー: {}", e)))?;

    let installation = BrowserFetcher::new(options)
        .fetch()
        .await
        .map_err(|e| ScraperError::BrowserInit(format!("Chromiumダウンロード失敗: {}", e)))?;

    info!("Chromium ready: {:?}", installation.executable_path);
    Ok(installation.executable_path)
}

/// プロセス内で一意な一時プロフィールディレクトリ
fn unique_user_data_dir() -> PathBuf {
    let unique_id = format!(
        "{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    );
    std::env::temp_dir().join(format!("lottery-scraper-{}", unique_id))
}

#[async_trait]
impl Renderer for ChromeRenderer {
    type Session = ChromeSession;

    async fn open(&self) -> Result<ChromeSession, ScraperError> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        info!("Launching browser...");

        let executable = self.executable().await?;
        let user_data_dir = unique_user_data_dir();
        let browser_config = self.browser_config(executable, &user_data_dir)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ハンドラータスクを起動
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        info!("Browser launched");

        Ok(ChromeSession {
            browser,
            handler_task,
            user_data_dir,
            config: self.config.clone(),
            closed: false,
            _permit: permit,
        })
    }
}

pub struct ChromeSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    user_data_dir: PathBuf,
    config: ScraperConfig,
    closed: bool,
    _permit: OwnedSemaphorePermit,
}

impl ChromeSession {
    async fn load_page(&self, url: &str) -> Result<String, ScraperError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        page.goto(url)
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;
        debug!("Navigated to {}", url);

        // JavaScript描画待ち
        sleep(self.config.settle_delay).await;

        let html = page
            .content()
            .await
            .map_err(|e| ScraperError::Render(e.to_string()));

        if self.config.debug {
            if let Ok(screenshot) = page
                .screenshot(ScreenshotParams::builder().full_page(true).build())
                .await
            {
                use base64::Engine;
                let encoded = base64::engine::general_purpose::STANDARD.encode(&screenshot);
                debug!("Page screenshot: data:image/png;base64,{}", encoded);
            }
        }

        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }

        let html = html?;
        debug!("Rendered {} bytes of HTML", html.len());
        Ok(html)
    }
}

#[async_trait]
impl RenderSession for ChromeSession {
    async fn render(&mut self, url: &str) -> Result<String, ScraperError> {
        info!("Rendering {}", url);

        match timeout(self.config.timeout, self.load_page(url)).await {
            Ok(result) => result,
            Err(_) => Err(ScraperError::Timeout(format!(
                "{}秒以内にページを取得できませんでした",
                self.config.timeout.as_secs()
            ))),
        }
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        info!("Closing browser...");

        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| ScraperError::BrowserInit(format!("ブラウザ終了エラー: {}", e)));

        if let Err(e) = self.browser.wait().await {
            debug!("Failed to wait for browser process: {}", e);
        }
        self.handler_task.abort();

        if let Err(e) = tokio::fs::remove_dir_all(&self.user_data_dir).await {
            debug!("Failed to remove {:?}: {}", self.user_data_dir, e);
        }

        if result.is_err() {
            warn!("Browser did not shut down cleanly");
        } else {
            info!("Browser closed");
        }
        result
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        if !self.closed {
            warn!("Render session dropped without close");
            self.handler_task.abort();
            // Browser 側のDropでプロセスは終了する。一時プロフィールだけ削除
            if let Err(e) = std::fs::remove_dir_all(&self.user_data_dir) {
                debug!("Failed to remove {:?}: {}", self.user_data_dir, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lottery::DrawExtractor;
    use std::time::Duration;

    #[test]
    fn test_unique_user_data_dir() {
        let a = unique_user_data_dir();
        std::thread::sleep(Duration::from_millis(1));
        let b = unique_user_data_dir();

        assert_ne!(a, b);
        assert!(a.starts_with(std::env::temp_dir()));
    }

    #[test]
    fn test_renderer_session_limit() {
        let renderer = ChromeRenderer::new(ScraperConfig::default().with_max_sessions(3));
        assert_eq!(renderer.permits.available_permits(), 3);
    }

    #[tokio::test]
    async fn test_configured_executable_wins() {
        let config = ScraperConfig::default().with_chrome_executable("/opt/chrome/chrome");
        let renderer = ChromeRenderer::new(config);

        let path = renderer.executable().await.unwrap();
        assert_eq!(path, Some(PathBuf::from("/opt/chrome/chrome")));
    }

    #[tokio::test]
    async fn test_autodetect_without_fetch() {
        let renderer = ChromeRenderer::new(ScraperConfig::default());
        assert_eq!(renderer.executable().await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore] // 実環境テスト用: cargo test test_live_extraction -- --ignored --nocapture
    async fn test_live_extraction() {
        let config = ScraperConfig::from_env().expect("invalid environment");
        let extractor = DrawExtractor::new(ChromeRenderer::new(config.clone()), &config)
            .expect("invalid selectors");

        let result = extractor.try_extract().await.expect("live extraction failed");
        println!("{:?}", result);

        assert_eq!(result.regular_numbers().len(), 6);
        assert_eq!(extractor.renderer().permits.available_permits(), config.max_sessions);
    }
}
