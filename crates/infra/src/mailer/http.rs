//! HTTP 配送プロバイダ実装
//!
//! SendGrid 互換の `POST /v3/mail/send` API でメールを送信する。
//! API キーは Bearer トークンとしてリクエストに付与する。

use async_trait::async_trait;
use serde::Serialize;

use super::{MailDispatcher, MailerError, OutgoingEmail};

/// HTTP 配送プロバイダ
///
/// reqwest ベースの実装。本番環境で使用する。
pub struct HttpMailDispatcher {
    base_url: String,
    api_key:  String,
    client:   reqwest::Client,
}

impl HttpMailDispatcher {
    /// 新しい HttpMailDispatcher を作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: 配送プロバイダのベース URL（例: `https://api.sendgrid.com`）
    /// - `api_key`: 配送プロバイダの API キー
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key:  api_key.to_string(),
            client:   reqwest::Client::new(),
        }
    }
}

// --- ワイヤ形式 ---

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from:             EmailAddress<'a>,
    subject:          &'a str,
    content:          Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<EmailAddress<'a>>,
}

#[derive(Debug, Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value:        &'a str,
}

impl<'a> MailSendRequest<'a> {
    fn from_email(email: &'a OutgoingEmail) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![EmailAddress { email: &email.to }],
            }],
            from:             EmailAddress { email: &email.from },
            subject:          &email.subject,
            content:          vec![Content {
                content_type: "text/plain",
                value:        &email.text_body,
            }],
        }
    }
}

#[async_trait]
impl MailDispatcher for HttpMailDispatcher {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailerError> {
        let url = format!("{}/v3/mail/send", self.base_url);
        let request = MailSendRequest::from_email(email);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(to = %email.to, subject = %email.subject, "メールを送信しました");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_send_failure(status, &body))
    }
}

/// 配送プロバイダの失敗ステータスをエラー種別に分類する
///
/// 4xx はリクエスト起因の `SendFailed`、それ以外は `Unexpected`。
fn classify_send_failure(status: reqwest::StatusCode, body: &str) -> MailerError {
    if status.is_client_error() {
        MailerError::SendFailed(format!("{status}: {body}"))
    } else {
        MailerError::Unexpected(format!("予期しないステータス {status}: {body}"))
    }
}
