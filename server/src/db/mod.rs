//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// データベースマイグレーション
pub mod migrations;

/// プロジェクト管理
pub mod projects;

/// 変数管理
pub mod variables;
