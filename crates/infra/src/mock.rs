//! # テスト用モック
//!
//! ハンドラテストで使用するインメモリのコラボレータ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! notifygate-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 各モックは呼び出し回数を記録する。「この失敗パスでは後続の外部呼び出しが
//! 発生しない」というパイプラインの短絡性をテストで検証するために使う。

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::{
    identity::{IdentityError, IdentityVerifier, UserRecord, VerifiedCaller},
    mailer::{MailDispatcher, MailerError, OutgoingEmail},
};

// ===== MockIdentityVerifier =====

/// インメモリの Identity Verifier
///
/// 登録済みトークン・ユーザーのみ解決に成功する。
#[derive(Clone, Default)]
pub struct MockIdentityVerifier {
    tokens:         Arc<Mutex<HashMap<String, String>>>,
    users:          Arc<Mutex<HashMap<String, Option<String>>>>,
    verify_calls:   Arc<AtomicUsize>,
    get_user_calls: Arc<AtomicUsize>,
}

impl MockIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 有効なトークンとその呼び出し元ユーザー ID を登録する
    pub fn with_token(self, token: &str, user_id: &str) -> Self {
        self.tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), user_id.to_string());
        self
    }

    /// ユーザーレコードを登録する（`email: None` でメールなしユーザー）
    pub fn with_user(self, user_id: &str, email: Option<&str>) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(user_id.to_string(), email.map(str::to_string));
        self
    }

    /// `verify_token` の呼び出し回数
    pub fn verify_call_count(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    /// `get_user` の呼び出し回数
    pub fn get_user_call_count(&self) -> usize {
        self.get_user_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
    async fn verify_token(&self, token: &str) -> Result<VerifiedCaller, IdentityError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        match self.tokens.lock().unwrap().get(token) {
            Some(user_id) => Ok(VerifiedCaller {
                user_id: user_id.clone(),
            }),
            None => Err(IdentityError::TokenRejected),
        }
    }

    async fn get_user(&self, user_id: &str) -> Result<UserRecord, IdentityError> {
        self.get_user_calls.fetch_add(1, Ordering::SeqCst);
        match self.users.lock().unwrap().get(user_id) {
            Some(email) => Ok(UserRecord {
                user_id: user_id.to_string(),
                email:   email.clone(),
            }),
            None => Err(IdentityError::UserNotFound(user_id.to_string())),
        }
    }
}

// ===== RecordingMailDispatcher =====

/// 送信内容を記録する Mail Dispatcher
///
/// `failing` で構築すると、呼び出しを記録した上で常に失敗する。
#[derive(Clone, Default)]
pub struct RecordingMailDispatcher {
    sent:      Arc<Mutex<Vec<OutgoingEmail>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl RecordingMailDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に `SendFailed` を返すモックを作成する
    pub fn failing(message: &str) -> Self {
        let mock = Self::default();
        *mock.fail_with.lock().unwrap() = Some(message.to_string());
        mock
    }

    /// `send` の呼び出し回数（失敗した呼び出しも含む）
    pub fn send_call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// これまでに `send` に渡されたメール
    pub fn sent_emails(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailDispatcher for RecordingMailDispatcher {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailerError> {
        self.sent.lock().unwrap().push(email.clone());
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(MailerError::SendFailed(message.clone())),
            None => Ok(()),
        }
    }
}
