//! # Gateway アプリケーション構築
//!
//! DI（クライアント・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware::from_fn_with_state,
    routing::{get, post},
};
use notifygate_gateway::{
    handler::{NotificationState, health_check, send_notification_email},
    middleware::{OriginState, enforce_origin},
};
use notifygate_infra::{IdentityVerifier, MailDispatcher};
use notifygate_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;

/// State の組み立てとルーター定義を行う
///
/// コラボレータは trait オブジェクトとして受け取る。
/// テストではモック実装を注入できる。
pub(crate) fn build_app(
    config: &GatewayConfig,
    identity_verifier: Arc<dyn IdentityVerifier>,
    mail_dispatcher: Arc<dyn MailDispatcher>,
) -> Router {
    let notification_state = Arc::new(NotificationState {
        identity_verifier,
        mail_dispatcher,
        from_address: config.mail_from_email.clone(),
    });

    let origin_state = OriginState {
        allowed_origins: Arc::new(config.allowed_origins.clone()),
    };

    // ルーター構築
    // Request ID + TraceLayer により、すべての HTTP リクエストに request_id が
    // 付与されログに自動注入される（レイヤー順序: 下に書いたものが外側）
    Router::new()
        .route("/health", get(health_check))
        .route("/send-notification-email", post(send_notification_email))
        .with_state(notification_state)
        .layer(from_fn_with_state(origin_state, enforce_origin))
        .layer(build_cors_layer(&config.allowed_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// 許可 Origin リストから CORS レイヤーを構築する
///
/// 実際の拒否は `enforce_origin` が行う。ここではブラウザ向けの
/// プリフライト応答ヘッダーのみを担当する。
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_origin(parse_cors_origins(origins))
}

/// 設定済み Origin をヘッダー値にパースする
///
/// パースできない値は警告ログを出して除外する
/// （`ALLOWED_ORIGIN` の設定ミスを起動ログで気付けるようにする）。
fn parse_cors_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(
                    origin = %origin,
                    "Origin をヘッダー値として解釈できないため CORS 許可リストから除外します"
                );
                None
            }
        })
        .collect()
}
