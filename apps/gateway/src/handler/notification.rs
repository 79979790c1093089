//! # 通知メール送信ハンドラ
//!
//! `POST /send-notification-email` の本体。1 リクエストにつき
//! 以下の 3 つの外部呼び出しを厳密に直列で行う:
//!
//! 1. トークン検証（Identity Verifier）
//! 2. 宛先ユーザーのメールアドレス解決（Identity Verifier）
//! 3. メール送信（Mail Dispatcher）
//!
//! 各ステップは前段の結果に依存するため並行化の余地はなく、
//! どのステップの失敗もそのリクエストを即座に終了させる（リトライなし）。
//! リクエスト間で共有する可変状態は持たない。

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use notifygate_infra::{IdentityError, IdentityVerifier, MailDispatcher, OutgoingEmail};
use notifygate_shared::AckResponse;
use serde::Deserialize;

use crate::error::GatewayError;

/// 通知ハンドラの State
pub struct NotificationState {
    pub identity_verifier: Arc<dyn IdentityVerifier>,
    pub mail_dispatcher:   Arc<dyn MailDispatcher>,
    /// 設定で固定された送信元メールアドレス
    pub from_address:      String,
}

/// 通知メール送信リクエスト
///
/// 3 フィールドすべて必須だが、serde レベルでは Option で受ける。
/// 不足フィールドをデシリアライズエラーではなく 400 `Missing fields` として
/// 返すため（検証は [`validate_request`] で行う）。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    #[serde(default)]
    pub notification_user_id: Option<String>,
    #[serde(default)]
    pub subject:              Option<String>,
    #[serde(default)]
    pub text:                 Option<String>,
}

/// POST /send-notification-email
///
/// ## ヘッダー
///
/// - `Authorization: Bearer <token>`（必須）
///
/// ## リクエストボディ
///
/// ```json
/// {
///   "notificationUserId": "u123",
///   "subject": "件名",
///   "text": "本文"
/// }
/// ```
///
/// ## レスポンス
///
/// - 200 `{ "ok": true }` 送信成功
/// - 401 `{ "error": "Missing token" }` トークンなし
/// - 400 `{ "error": "Missing fields" }` / `{ "error": "Recipient has no email" }`
/// - 500 `{ "error": "Failed to send email" }` その他すべての失敗
#[tracing::instrument(skip_all)]
pub async fn send_notification_email(
    State(state): State<Arc<NotificationState>>,
    headers: HeaderMap,
    Json(req): Json<SendNotificationRequest>,
) -> Response {
    let token = extract_bearer_token(&headers);
    match process(&state, token.as_deref(), &req).await {
        Ok(()) => Json(AckResponse::ok()).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 通知パイプライン本体
///
/// 認証 → ボディ検証 → 宛先解決 → 送信の順で短絡する。
/// ボディ検証よりも先にトークンを検証するため、未認証かつ不正な形の
/// リクエストは認証エラー側で拒否される。
async fn process(
    state: &NotificationState,
    token: Option<&str>,
    req: &SendNotificationRequest,
) -> Result<(), GatewayError> {
    // Step 1: トークンの存在チェック
    let token = token.ok_or(GatewayError::MissingToken)?;

    // Step 2: トークン検証
    // 呼び出し元と宛先ユーザーの一致は検証しない。
    // 認証済みであれば任意の宛先に送信できる（観測済みの契約を維持）。
    let caller = state
        .identity_verifier
        .verify_token(token)
        .await
        .map_err(|e| match e {
            IdentityError::TokenRejected => GatewayError::TokenRejected(e.to_string()),
            other => GatewayError::Internal(other.to_string()),
        })?;
    tracing::debug!(caller_id = %caller.user_id, "トークン検証に成功");

    // Step 3: ボディ検証
    let (user_id, subject, text) = validate_request(req).ok_or(GatewayError::MissingFields)?;

    // Step 4: 宛先ユーザーのメールアドレス解決
    let record = state
        .identity_verifier
        .get_user(user_id)
        .await
        .map_err(|e| match e {
            IdentityError::UserNotFound(id) => GatewayError::RecipientNotFound(id),
            other => GatewayError::Internal(other.to_string()),
        })?;

    // Step 5: メールアドレス未登録ユーザーの拒否
    let to = record.email.ok_or(GatewayError::RecipientHasNoEmail)?;

    // Step 6: 送信（成功パスにつき送信は必ず 1 回、重複排除はしない）
    let email = OutgoingEmail {
        to,
        from: state.from_address.clone(),
        subject: subject.to_string(),
        text_body: text.to_string(),
    };
    state
        .mail_dispatcher
        .send(&email)
        .await
        .map_err(|e| GatewayError::DispatchFailed(e.to_string()))?;

    tracing::info!(recipient_id = %record.user_id, "通知メールを送信しました");
    Ok(())
}

/// Authorization ヘッダーから Bearer トークンを取り出す
///
/// `Bearer ` プレフィックスを除去した後に空であれば None。
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// 3 フィールドすべてが存在し非空であることを検証する
fn validate_request(req: &SendNotificationRequest) -> Option<(&str, &str, &str)> {
    let user_id = req.notification_user_id.as_deref().filter(|s| !s.is_empty())?;
    let subject = req.subject.as_deref().filter(|s| !s.is_empty())?;
    let text = req.text.as_deref().filter(|s| !s.is_empty())?;
    Some((user_id, subject, text))
}
