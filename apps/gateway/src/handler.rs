//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、外部呼び出しはコラボレータの trait に委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `notification`: 通知メール送信

pub mod health;
pub mod notification;

pub use health::health_check;
pub use notification::{NotificationState, SendNotificationRequest, send_notification_email};
