//! Noop 配送実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! ローカル開発や配送無効化時に使用する。

use async_trait::async_trait;

use super::{MailDispatcher, MailerError, OutgoingEmail};

/// Noop 配送（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopMailDispatcher;

#[async_trait]
impl MailDispatcher for NoopMailDispatcher {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailerError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}
