//! # Identity Verifier クライアント
//!
//! 外部 ID プロバイダへの通信を担当する。
//!
//! ## エンドポイント
//!
//! - `POST /v1/tokens:verify` - Bearer トークンの検証
//! - `GET /v1/users/{id}` - ユーザーレコードの取得（メールアドレス解決）

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity Verifier クライアントエラー
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// トークンが無効・期限切れ（401/403）
    #[error("トークンの検証に失敗しました")]
    TokenRejected,

    /// ユーザー ID が存在しない（404）
    #[error("ユーザーが見つかりません: {0}")]
    UserNotFound(String),

    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl IdentityError {
    /// トランスポート層の失敗をエラー種別に分類する
    ///
    /// 接続失敗・タイムアウトは `Network`、それ以外は `Unexpected`。
    fn from_transport(is_network: bool, message: String) -> Self {
        if is_network {
            IdentityError::Network(message)
        } else {
            IdentityError::Unexpected(message)
        }
    }
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        IdentityError::from_transport(err.is_connect() || err.is_timeout(), err.to_string())
    }
}

// --- リクエスト/レスポンス型 ---

/// トークン検証リクエスト
#[derive(Debug, Serialize)]
struct VerifyTokenRequest<'a> {
    token: &'a str,
}

/// トークン検証結果
///
/// 検証に成功したトークンが指す呼び出し元のユーザー ID。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedCaller {
    pub user_id: String,
}

/// ユーザーレコード
///
/// ディレクトリ上のユーザー。メールアドレスは登録されていない場合がある。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    pub email:   Option<String>,
}

/// Identity Verifier クライアントトレイト
///
/// テスト時にモックを使用できるようトレイトで定義。
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Bearer トークンを検証し、呼び出し元のユーザー ID を解決する
    ///
    /// ID プロバイダの `POST /v1/tokens:verify` を呼び出す。
    async fn verify_token(&self, token: &str) -> Result<VerifiedCaller, IdentityError>;

    /// ユーザー ID からユーザーレコード（メールアドレス含む）を取得する
    ///
    /// ID プロバイダの `GET /v1/users/{id}` を呼び出す。
    async fn get_user(&self, user_id: &str) -> Result<UserRecord, IdentityError>;
}

/// Identity Verifier クライアント実装
pub struct HttpIdentityVerifier {
    base_url: String,
    api_key:  String,
    client:   reqwest::Client,
}

impl HttpIdentityVerifier {
    /// 新しい HttpIdentityVerifier を作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: ID プロバイダのベース URL（例: `https://identity.example.com`）
    /// - `api_key`: サービス認証用の API キー
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key:  api_key.to_string(),
            client:   reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify_token(&self, token: &str) -> Result<VerifiedCaller, IdentityError> {
        let url = format!("{}/v1/tokens:verify", self.base_url);
        let request = VerifyTokenRequest { token };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json::<VerifiedCaller>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(classify_verify_failure(status, &body))
        }
    }

    async fn get_user(&self, user_id: &str) -> Result<UserRecord, IdentityError> {
        let url = format!(
            "{}/v1/users/{}",
            self.base_url,
            urlencoding::encode(user_id)
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json::<UserRecord>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(classify_user_failure(status, user_id, &body))
        }
    }
}

/// トークン検証の失敗ステータスをエラー種別に分類する
///
/// 401/403 は `TokenRejected`、それ以外は `Unexpected`。
fn classify_verify_failure(status: reqwest::StatusCode, body: &str) -> IdentityError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            IdentityError::TokenRejected
        }
        status => IdentityError::Unexpected(format!("予期しないステータス {status}: {body}")),
    }
}

/// ユーザー取得の失敗ステータスをエラー種別に分類する
///
/// 404 は `UserNotFound`、それ以外は `Unexpected`。
fn classify_user_failure(status: reqwest::StatusCode, user_id: &str, body: &str) -> IdentityError {
    match status {
        reqwest::StatusCode::NOT_FOUND => IdentityError::UserNotFound(user_id.to_string()),
        status => IdentityError::Unexpected(format!("予期しないステータス {status}: {body}")),
    }
}
