//! 共通型定義
//!
//! Project, Variable等のコアデータ型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// プロジェクト（テナント名前空間）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    /// 一意識別子
    pub id: Uuid,
    /// 登録日時
    pub created_at: DateTime<Utc>,
    /// 最終アクセス日時（認証済み操作のたびに更新）
    pub last_accessed: DateTime<Utc>,
}

/// 変数（プロジェクトスコープの名前付きJSON値）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variable {
    /// 変数名
    pub name: String,
    /// 値（任意のJSON値）
    pub value: serde_json::Value,
    /// 最終更新日時
    pub last_updated: DateTime<Utc>,
}
