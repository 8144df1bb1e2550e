use axum::extract::State;
use axum::response::{Html, Json};
use chrono::Utc;

use crate::lottery::LotteryResult;
use crate::service::DrawRequest;
use crate::traits::Renderer;

use super::view::{render_page, taipei_now};
use super::AppState;

/// 首頁：最新の開獎番号を表示
pub async fn index_handler<R: Renderer + 'static>(State(state): State<AppState<R>>) -> Html<String> {
    let result = state.service.fetch(DrawRequest::Initial).await;
    Html(render_page(&result, taipei_now(Utc::now())))
}

/// 再取得して表示
pub async fn refresh_handler<R: Renderer + 'static>(
    State(state): State<AppState<R>>,
) -> Html<String> {
    let result = state.service.fetch(DrawRequest::Refresh).await;
    Html(render_page(&result, taipei_now(Utc::now())))
}

pub async fn latest_json_handler<R: Renderer + 'static>(
    State(state): State<AppState<R>>,
) -> Json<LotteryResult> {
    Json(state.service.fetch(DrawRequest::Refresh).await)
}

pub async fn health_handler() -> &'static str {
    "ok"
}
