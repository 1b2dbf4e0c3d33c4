//! 通信プロトコル定義
//!
//! クライアント↔サーバー間のHTTPリクエスト/レスポンス型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// プロジェクト登録レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterResponse {
    /// 発行されたプロジェクトID
    pub project_id: Uuid,
    /// 発行されたプロジェクトキー（平文はこのレスポンスでのみ返却される）
    pub project_key: String,
}

/// 変数設定リクエスト
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetVariableRequest {
    /// 変数名
    #[serde(default)]
    pub var_name: Option<String>,
    /// 変数値（任意のJSON値）
    #[serde(default)]
    pub var_value: Option<serde_json::Value>,
}

/// 変数取得レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GetVariableResponse {
    /// 変数値
    pub var_value: serde_json::Value,
    /// 最終更新日時
    pub last_updated: DateTime<Utc>,
}

/// 全変数取得レスポンスの1エントリ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableEntry {
    /// 変数値
    pub value: serde_json::Value,
    /// 最終更新日時
    pub last_updated: DateTime<Utc>,
}

/// 一括更新リクエスト
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchUpdateRequest {
    /// 更新エントリ一覧（空の場合はリクエスト全体を拒否する）
    #[serde(default)]
    pub updates: Vec<BatchUpdateEntry>,
}

/// 一括更新の1エントリ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchUpdateEntry {
    /// 変数名
    #[serde(default)]
    pub var_name: Option<String>,
    /// 変数値
    #[serde(default)]
    pub var_value: Option<serde_json::Value>,
}

/// 一括更新レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchUpdateResponse {
    /// ステータス ("success")
    pub status: String,
    /// 適用された更新件数
    pub updated: usize,
}

/// 操作成功レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    /// ステータス ("success")
    pub status: String,
}

impl StatusResponse {
    /// 成功レスポンスを作成
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// クリーンアップレスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanupResponse {
    /// ステータス ("success")
    pub status: String,
    /// 削除されたプロジェクト数
    pub projects_deleted: u64,
}

/// ヘルスチェックレスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    /// ステータス ("ok")
    pub status: String,
}
