//! VarHub Server
//!
//! プロジェクト単位のリモート変数ストア（HTTP/JSON）

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// 認証機能（プロジェクトキー）
pub mod auth;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
    /// 管理者キー（未設定の場合、クリーンアップAPIは常に401を返す）
    pub admin_key: Option<String>,
}
