//! # Notification Gateway サーバー
//!
//! 通知メール中継の API サーバー。
//!
//! ## 役割
//!
//! Gateway はフロントエンドと 2 つの外部サービスの間に位置し、
//! 以下の責務を担う:
//!
//! - **認証**: Bearer トークンを Identity Verifier で検証
//! - **宛先解決**: 通知対象ユーザーのメールアドレスを Identity Verifier で取得
//! - **配送**: Mail Dispatcher 経由でトランザクショナルメールを送信
//!
//! 内部状態・永続化は持たない。各リクエストは独立した直列パイプラインで処理される。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌───────────────────┐
//! │   Frontend   │────▶│   Gateway    │────▶│ Identity Verifier │
//! └──────────────┘     └──────┬───────┘     └───────────────────┘
//!                             │
//!                             ▼
//!                      ┌──────────────┐
//!                      │Mail Provider │
//!                      └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `GATEWAY_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `GATEWAY_PORT` | **Yes** | ポート番号 |
//! | `IDENTITY_URL` | **Yes** | Identity Verifier のベース URL |
//! | `IDENTITY_API_KEY` | **Yes** | Identity Verifier のサービス認証キー |
//! | `MAIL_API_URL` | No | 配送プロバイダのベース URL（デフォルト: SendGrid） |
//! | `MAIL_API_KEY` | **Yes** | 配送プロバイダの API キー |
//! | `MAIL_FROM_EMAIL` | **Yes** | 送信元メールアドレス |
//! | `MAIL_BACKEND` | No | `http`（デフォルト）または `noop` |
//! | `ALLOWED_ORIGIN` | No | 追加で許可する Origin |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p notifygate-gateway
//!
//! # 本番環境（環境変数を直接指定）
//! GATEWAY_PORT=3000 MAIL_API_KEY=... cargo run -p notifygate-gateway --release
//! ```

mod app_builder;
mod config;

use std::{net::SocketAddr, sync::Arc};

use app_builder::build_app;
use config::GatewayConfig;
use notifygate_infra::{
    HttpIdentityVerifier, HttpMailDispatcher, IdentityVerifier, MailDispatcher, NoopMailDispatcher,
};
use notifygate_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// Gateway サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. コラボレータクライアントの構築
/// 5. ルーターの構築と HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("gateway");
    notifygate_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "gateway").entered();

    // 設定読み込み
    let config = GatewayConfig::from_env();

    tracing::info!(
        "Gateway サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // コラボレータクライアントの初期化
    // 具象型で構築し、State 注入時にトレイトオブジェクトへ coerce する
    let identity_verifier: Arc<dyn IdentityVerifier> = Arc::new(HttpIdentityVerifier::new(
        &config.identity_url,
        &config.identity_api_key,
    ));

    let mail_dispatcher: Arc<dyn MailDispatcher> = match config.mail_backend.as_str() {
        "noop" => {
            tracing::warn!("MAIL_BACKEND=noop: メールは実際には送信されません");
            Arc::new(NoopMailDispatcher)
        }
        _ => Arc::new(HttpMailDispatcher::new(
            &config.mail_api_url,
            &config.mail_api_key,
        )),
    };

    // ルーター構築
    let app = build_app(&config, identity_verifier, mail_dispatcher);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Gateway サーバーが起動しました: {}", addr);

    // Graceful shutdown は axum::serve が自動的に処理する
    axum::serve(listener, app).await?;

    Ok(())
}
