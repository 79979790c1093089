//! # Notification Gateway ライブラリ
//!
//! 通知メール中継サーバーのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `error`: ハンドラ共通のエラー型とレスポンス変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（Origin 検証）

pub mod error;
pub mod handler;
pub mod middleware;
