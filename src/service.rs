use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::lottery::{DrawExtractor, LotteryResult};
use crate::traits::Renderer;

/// 表示トリガー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawRequest {
    /// 初回表示
    Initial,
    /// 再取得
    Refresh,
}

/// tower::Serviceを実装した開獎番号サービス
///
/// どちらのトリガーも毎回新しく抽出する（キャッシュなし）。
pub struct LotteryService<R> {
    extractor: Arc<DrawExtractor<R>>,
}

impl<R> Clone for LotteryService<R> {
    fn clone(&self) -> Self {
        Self {
            extractor: self.extractor.clone(),
        }
    }
}

impl<R: Renderer + 'static> LotteryService<R> {
    pub fn new(extractor: DrawExtractor<R>) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }

    /// エラーにならない呼び出し
    pub async fn fetch(&self, req: DrawRequest) -> LotteryResult {
        let mut service = self.clone();
        match service.call(req).await {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }
}

impl<R: Renderer + 'static> Service<DrawRequest> for LotteryService<R> {
    type Response = LotteryResult;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: DrawRequest) -> Self::Future {
        info!("Draw request received: {:?}", req);

        let extractor = self.extractor.clone();
        Box::pin(async move {
            let result = extractor.extract().await;
            info!("Draw request completed: {:?}, source={:?}", req, result.source());
            Ok(result)
        })
    }
}
