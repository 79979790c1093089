//! # Origin 検証ミドルウェア
//!
//! ブラウザからのクロスオリジンリクエストを許可リストで制限する。
//!
//! - `Origin` ヘッダーなし → 常に通過（curl 等の非ブラウザクライアント）
//! - `Origin` ヘッダーあり・許可リストに一致 → 通過
//! - それ以外 → ハンドラに到達する前に 403 で拒否
//!
//! プリフライトのレスポンスヘッダーは `CorsLayer` が担当し、
//! このミドルウェアは実際の拒否のみを行う。

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header::ORIGIN},
    middleware::Next,
    response::{IntoResponse, Response},
};
use notifygate_shared::ErrorResponse;

/// Origin 検証の状態
#[derive(Clone)]
pub struct OriginState {
    pub allowed_origins: Arc<Vec<String>>,
}

/// Origin 検証ミドルウェア
pub async fn enforce_origin(
    State(state): State<OriginState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match origin {
        None => next.run(request).await,
        Some(origin) if is_allowed(&state.allowed_origins, &origin) => next.run(request).await,
        Some(origin) => {
            tracing::warn!(origin = %origin, "許可されていない Origin を拒否");
            (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::origin_not_allowed()),
            )
                .into_response()
        }
    }
}

/// Origin が許可リストに含まれるか（完全一致）
fn is_allowed(allowed: &[String], origin: &str) -> bool {
    allowed.iter().any(|a| a == origin)
}
