//! # ヘルスチェックハンドラ
//!
//! Gateway の稼働状態を確認するためのエンドポイント。
//! 依存サービスには触れず、プロセスの生存のみを返す。

/// GET /health
///
/// 監視・ロードバランサ向けの Liveness Check。
/// レスポンスはプレーンテキストの `OK`（既存クライアント互換）。
pub async fn health_check() -> &'static str {
    "OK"
}
