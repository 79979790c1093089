//! # エラーレスポンス
//!
//! Gateway 全体で共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は gateway 側の責務（shared に axum 依存を入れない）
//! - ワイヤ上のメッセージはクライアント互換のため固定文字列で提供する
//!   （便利コンストラクタでハードコードの分散を排除）

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// すべてのエラー応答は `{ "error": "<メッセージ>" }` 形式で返す。
/// メッセージはクライアントが文字列比較する前提の準機械可読な固定値。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    ///
    /// 固定メッセージにないエラーを返す場合に使用する。
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// 401: Authorization ヘッダーにトークンがない
    pub fn missing_token() -> Self {
        Self::new("Missing token")
    }

    /// 400: リクエストボディの必須フィールド不足
    pub fn missing_fields() -> Self {
        Self::new("Missing fields")
    }

    /// 400: 宛先ユーザーにメールアドレスが登録されていない
    pub fn recipient_has_no_email() -> Self {
        Self::new("Recipient has no email")
    }

    /// 500: 送信失敗（内部要因は区別せずこの一種に集約する）
    pub fn send_failed() -> Self {
        Self::new("Failed to send email")
    }

    /// 403: 許可されていない Origin からのリクエスト
    pub fn origin_not_allowed() -> Self {
        Self::new("Origin not allowed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsonシリアライズでフィールド名が正しい() {
        let error = ErrorResponse::missing_token();
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json, serde_json::json!({ "error": "Missing token" }));
    }

    #[test]
    fn test_全便利コンストラクタのメッセージが固定値と一致する() {
        assert_eq!(ErrorResponse::missing_token().error, "Missing token");
        assert_eq!(ErrorResponse::missing_fields().error, "Missing fields");
        assert_eq!(
            ErrorResponse::recipient_has_no_email().error,
            "Recipient has no email"
        );
        assert_eq!(ErrorResponse::send_failed().error, "Failed to send email");
        assert_eq!(
            ErrorResponse::origin_not_allowed().error,
            "Origin not allowed"
        );
    }

    #[test]
    fn test_jsonデシリアライズが正しく動作する() {
        let json = r#"{"error": "Failed to send email"}"#;
        let error: ErrorResponse = serde_json::from_str(json).unwrap();

        assert_eq!(error, ErrorResponse::send_failed());
    }
}
