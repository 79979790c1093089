//! # メール送信
//!
//! トランザクショナルメールの配送を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailDispatcher` trait でメール送信を抽象化
//! - **2 つの実装**: HTTP（配送プロバイダ API、本番用）、Noop（開発・テスト用）
//! - **環境変数切替**: `MAIL_BACKEND` でランタイム選択

mod http;
mod noop;

use async_trait::async_trait;
pub use http::HttpMailDispatcher;
pub use noop::NoopMailDispatcher;
use thiserror::Error;

/// メール送信エラー
#[derive(Debug, Error)]
pub enum MailerError {
    /// 配送プロバイダがリクエストを拒否した
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl MailerError {
    /// トランスポート層の失敗をエラー種別に分類する
    ///
    /// 接続失敗・タイムアウトは `Network`、それ以外は `Unexpected`。
    fn from_transport(is_network: bool, message: String) -> Self {
        if is_network {
            MailerError::Network(message)
        } else {
            MailerError::Unexpected(message)
        }
    }
}

impl From<reqwest::Error> for MailerError {
    fn from(err: reqwest::Error) -> Self {
        MailerError::from_transport(err.is_connect() || err.is_timeout(), err.to_string())
    }
}

/// 送信メール
///
/// Gateway が組み立てて `MailDispatcher` に渡す値。永続化しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// 送信先メールアドレス
    pub to:        String,
    /// 送信元メールアドレス（設定で固定）
    pub from:      String,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// メール送信トレイト
///
/// 配送の具体的な方法を抽象化する。HTTP / Noop の実装を環境変数で切り替える。
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    /// メールを 1 通送信する
    ///
    /// リトライは行わない。失敗はそのまま呼び出し元へ返す。
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トランスポート失敗はnetworkとunexpectedに分類される() {
        let err = MailerError::from_transport(true, "connection refused".to_string());
        assert!(matches!(err, MailerError::Network(_)));

        let err = MailerError::from_transport(false, "invalid body".to_string());
        assert!(matches!(err, MailerError::Unexpected(_)));
    }
}
