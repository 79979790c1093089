//! # 成功応答エンベロープ
//!
//! 送信成功時の統一レスポンス形式 `{ "ok": true }` を提供する。

use serde::{Deserialize, Serialize};

/// 送信成功レスポンス
///
/// Gateway の成功応答は常に `{ "ok": true }` 形式で返す。
/// ペイロードは持たない（送信受付の確認のみ）。
///
/// ## 使用例
///
/// ```
/// use notifygate_shared::AckResponse;
///
/// let response = AckResponse::ok();
/// assert!(response.ok);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
}

impl AckResponse {
    /// 成功を表す `AckResponse` を作成する
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializeを正しいjson形状にする() {
        let response = AckResponse::ok();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "ok": true }));
    }

    #[test]
    fn test_deserializeでjsonからオブジェクトに変換する() {
        let json = r#"{"ok": true}"#;
        let response: AckResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response, AckResponse::ok());
    }
}
