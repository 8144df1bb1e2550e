//! 開獎番号表示用のHTTPサーバー

mod routes;
pub mod view;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::service::LotteryService;
use crate::traits::Renderer;

pub use routes::{health_handler, index_handler, latest_json_handler, refresh_handler};

/// 共有状態（リクエスト間で可変状態は持たない）
pub struct AppState<R> {
    pub service: LotteryService<R>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

pub fn build_app<R: Renderer + 'static>(service: LotteryService<R>) -> Router {
    Router::new()
        .route("/", get(index_handler::<R>))
        .route("/refresh", get(refresh_handler::<R>))
        .route("/api/latest", get(latest_json_handler::<R>))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}
