//! # Gateway エラーハンドリング
//!
//! パイプライン内部のエラー種別と、axum レスポンスへの変換。
//!
//! ## 設計方針
//!
//! 内部では失敗要因を判別可能な enum として保持し、テストで具体的な原因を
//! 検証できるようにする。一方ワイヤ上では、トークン検証失敗・宛先不明・
//! 配送失敗はすべて同一の 500 `Failed to send email` に集約する
//! （既存クライアントが依存している観測済みのマッピングを維持する）。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notifygate_shared::ErrorResponse;
use thiserror::Error;

/// 通知パイプラインのエラー
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Authorization ヘッダーがない、または Bearer トークンが空
    #[error("Authorization ヘッダーにトークンがありません")]
    MissingToken,

    /// トークンが ID プロバイダに拒否された
    #[error("トークン検証に失敗: {0}")]
    TokenRejected(String),

    /// リクエストボディの必須フィールドが不足・空
    #[error("必須フィールドが不足しています")]
    MissingFields,

    /// 宛先ユーザー ID が解決できない
    #[error("宛先ユーザーが見つかりません: {0}")]
    RecipientNotFound(String),

    /// 宛先ユーザーにメールアドレスが登録されていない
    #[error("宛先ユーザーにメールアドレスがありません")]
    RecipientHasNoEmail,

    /// 配送プロバイダへの送信が失敗した
    #[error("メール送信に失敗: {0}")]
    DispatchFailed(String),

    /// その他の内部エラー（外部呼び出しのネットワーク障害等）
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::MissingToken => {
                (StatusCode::UNAUTHORIZED, Json(ErrorResponse::missing_token())).into_response()
            }
            GatewayError::MissingFields => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::missing_fields())).into_response()
            }
            GatewayError::RecipientHasNoEmail => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::recipient_has_no_email()),
            )
                .into_response(),
            // 以降はワイヤ上では区別しない（観測済みマッピングの維持）
            GatewayError::TokenRejected(_) => {
                log_collapsed("token_verification", &self);
                internal_error_response()
            }
            GatewayError::RecipientNotFound(_) => {
                log_collapsed("recipient_lookup", &self);
                internal_error_response()
            }
            GatewayError::DispatchFailed(_) => {
                log_collapsed("mail_dispatch", &self);
                internal_error_response()
            }
            GatewayError::Internal(_) => {
                log_collapsed("internal", &self);
                internal_error_response()
            }
        }
    }
}

/// 500 に集約されるエラーをコンテキスト付きでログ出力する
///
/// レスポンスボディは汎用メッセージのまま、診断情報はログ側にのみ残す。
fn log_collapsed(kind: &str, err: &GatewayError) {
    tracing::error!(
        error.category = "external_service",
        error.kind = kind,
        "通知メール送信で失敗: {}",
        err
    );
}

/// 汎用 500 レスポンス
fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::send_failed()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn response_status_and_body(response: Response) -> (StatusCode, ErrorResponse) {
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        (status, error)
    }

    #[tokio::test]
    async fn missing_tokenで401とmissing_token() {
        let (status, body) = response_status_and_body(GatewayError::MissingToken.into_response()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, ErrorResponse::missing_token());
    }

    #[tokio::test]
    async fn missing_fieldsで400とmissing_fields() {
        let (status, body) =
            response_status_and_body(GatewayError::MissingFields.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, ErrorResponse::missing_fields());
    }

    #[tokio::test]
    async fn recipient_has_no_emailで400と専用メッセージ() {
        let (status, body) =
            response_status_and_body(GatewayError::RecipientHasNoEmail.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, ErrorResponse::recipient_has_no_email());
    }

    #[tokio::test]
    async fn token_rejectedは500の汎用メッセージに集約される() {
        let (status, body) = response_status_and_body(
            GatewayError::TokenRejected("expired".to_string()).into_response(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, ErrorResponse::send_failed());
    }

    #[tokio::test]
    async fn recipient_not_foundは500の汎用メッセージに集約される() {
        let (status, body) = response_status_and_body(
            GatewayError::RecipientNotFound("u999".to_string()).into_response(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, ErrorResponse::send_failed());
    }

    #[tokio::test]
    async fn dispatch_failedは500の汎用メッセージに集約される() {
        let (status, body) = response_status_and_body(
            GatewayError::DispatchFailed("quota exceeded".to_string()).into_response(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, ErrorResponse::send_failed());
    }

    #[tokio::test]
    async fn internalは500の汎用メッセージに集約される() {
        let (status, body) = response_status_and_body(
            GatewayError::Internal("connection reset".to_string()).into_response(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, ErrorResponse::send_failed());
    }
}
