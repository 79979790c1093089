//! # Notifygate インフラストラクチャ
//!
//! 外部コラボレータ（Identity Verifier / Mail Dispatcher）への
//! クライアント実装を提供する。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: 各コラボレータは `async_trait` の trait で抽象化し、
//!   gateway には `Arc<dyn …>` として注入する（プロセスグローバルは持たない）
//! - **HTTP 実装 + Noop**: 本番は reqwest ベースの HTTP 実装、
//!   開発・テストでは Noop / モック実装に差し替える
//! - **リトライなし**: 外部呼び出しの失敗はすべて呼び出し元へそのまま返す

pub mod identity;
pub mod mailer;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use identity::{HttpIdentityVerifier, IdentityError, IdentityVerifier, UserRecord, VerifiedCaller};
pub use mailer::{HttpMailDispatcher, MailDispatcher, MailerError, NoopMailDispatcher, OutgoingEmail};
