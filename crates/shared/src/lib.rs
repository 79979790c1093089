//! # Notifygate 共有ユーティリティ
//!
//! このクレートは、Notifygate
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のクレートから依存される側（このクレートは内部クレートに依存しない）
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える

pub mod ack_response;
pub mod error_response;
pub mod observability;

pub use ack_response::AckResponse;
pub use error_response::ErrorResponse;
