//! # Gateway 設定
//!
//! 環境変数から Gateway サーバーの設定を読み込む。

use std::env;

/// 開発用フロントエンドの既定オリジン
///
/// 環境変数 `ALLOWED_ORIGIN` で本番フロントエンドのオリジンを追加する。
const DEV_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost:3000"];

/// Gateway サーバーの設定
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// Identity Verifier のベース URL
    pub identity_url: String,
    /// Identity Verifier のサービス認証キー
    pub identity_api_key: String,
    /// 配送プロバイダのベース URL
    pub mail_api_url: String,
    /// 配送プロバイダの API キー
    pub mail_api_key: String,
    /// 送信元メールアドレス（全メールで固定）
    pub mail_from_email: String,
    /// 配送バックエンド（`http` または `noop`）
    pub mail_backend: String,
    /// 許可する Origin の一覧
    pub allowed_origins: Vec<String>,
}

impl GatewayConfig {
    /// 環境変数から設定を読み込む
    ///
    /// 必須の環境変数が欠けている場合は起動時に panic する
    /// （設定不備は即座に失敗させる）。
    pub fn from_env() -> Self {
        Self {
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("GATEWAY_PORT")
                .expect("GATEWAY_PORT が設定されていません")
                .parse()
                .expect("GATEWAY_PORT は有効なポート番号である必要があります"),
            identity_url: env::var("IDENTITY_URL").expect("IDENTITY_URL が設定されていません"),
            identity_api_key: env::var("IDENTITY_API_KEY")
                .expect("IDENTITY_API_KEY が設定されていません"),
            mail_api_url: env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.sendgrid.com".to_string()),
            mail_api_key: env::var("MAIL_API_KEY").expect("MAIL_API_KEY が設定されていません"),
            mail_from_email: env::var("MAIL_FROM_EMAIL")
                .expect("MAIL_FROM_EMAIL が設定されていません"),
            mail_backend: env::var("MAIL_BACKEND").unwrap_or_else(|_| "http".to_string()),
            allowed_origins: build_allowed_origins(env::var("ALLOWED_ORIGIN").ok().as_deref()),
        }
    }
}

/// 許可 Origin リストを構築する
///
/// 開発用の既定オリジンに、設定されていれば `ALLOWED_ORIGIN` を追加する。
fn build_allowed_origins(extra: Option<&str>) -> Vec<String> {
    let mut origins: Vec<String> = DEV_ORIGINS.iter().map(|s| (*s).to_string()).collect();
    if let Some(extra) = extra.filter(|s| !s.is_empty()) {
        origins.push(extra.to_string());
    }
    origins
}

#[cfg(test)]
mod tests {
    // テスト間で環境変数の競合を避けるため、
    // 純粋なヘルパー関数のみ検証する

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_allowed_origin未設定で既定オリジンのみ() {
        let origins = build_allowed_origins(None);

        assert_eq!(
            origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_allowed_origin設定で末尾に追加される() {
        let origins = build_allowed_origins(Some("https://app.example.com"));

        assert_eq!(
            origins,
            vec![
                "http://localhost:5173",
                "http://localhost:3000",
                "https://app.example.com"
            ]
        );
    }

    #[test]
    fn test_allowed_originが空文字なら追加されない() {
        let origins = build_allowed_origins(Some(""));

        assert_eq!(origins.len(), 2);
    }
}
