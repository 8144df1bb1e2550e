//! テスト用のレンダラーとHTML生成ヘルパー

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::traits::{RenderSession, Renderer};

/// `result-balls` ブロックを並べたトップページ風のHTML
pub(crate) fn lottery_page(groups: &[&[&str]]) -> String {
    let mut html = String::from("<html><head><title>台灣彩券</title></head><body>\n");
    for balls in groups {
        html.push_str("<div class=\"result-balls\">\n");
        for ball in *balls {
            html.push_str(&format!("  <div class=\"ball\">{}</div>\n", ball));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</body></html>");
    html
}

#[derive(Debug, Clone)]
pub(crate) enum FakeBehavior {
    Html(String),
    RenderError,
    OpenError,
    /// render が完了しない
    Hang,
}

/// open/close 回数を記録するレンダラー
#[derive(Debug, Clone)]
pub(crate) struct FakeRenderer {
    behavior: FakeBehavior,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    pub rendered_urls: Arc<std::sync::Mutex<Vec<String>>>,
}

impl FakeRenderer {
    pub fn new(behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
            rendered_urls: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn html(html: impl Into<String>) -> Self {
        Self::new(FakeBehavior::Html(html.into()))
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

pub(crate) struct FakeSession {
    behavior: FakeBehavior,
    closed: Arc<AtomicUsize>,
    rendered_urls: Arc<std::sync::Mutex<Vec<String>>>,
}

#[async_trait]
impl Renderer for FakeRenderer {
    type Session = FakeSession;

    async fn open(&self) -> Result<FakeSession, ScraperError> {
        if let FakeBehavior::OpenError = self.behavior {
            return Err(ScraperError::BrowserInit("chrome not found".into()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession {
            behavior: self.behavior.clone(),
            closed: self.closed.clone(),
            rendered_urls: self.rendered_urls.clone(),
        })
    }
}

#[async_trait]
impl RenderSession for FakeSession {
    async fn render(&mut self, url: &str) -> Result<String, ScraperError> {
        if let Ok(mut urls) = self.rendered_urls.lock() {
            urls.push(url.to_string());
        }
        match &self.behavior {
            FakeBehavior::Html(html) => Ok(html.clone()),
            FakeBehavior::Hang => std::future::pending().await,
            _ => Err(ScraperError::Navigation("net::ERR_CONNECTION_RESET".into())),
        }
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
