// プロジェクトCRUD操作とキー発行

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;
use varhub_common::error::{HubError, HubResult};
use varhub_common::types::Project;

use crate::auth;

/// 非アクティブプロジェクトの保持期間（日数）
pub const RETENTION_DAYS: i64 = 90;

/// 新規登録されたプロジェクト（平文キー含む）
#[derive(Debug, Clone)]
pub struct RegisteredProject {
    /// プロジェクト情報
    pub project: Project,
    /// 平文のプロジェクトキー（登録時のみ取得可能）
    pub key: String,
}

/// 認証用に取得したプロジェクト行（キーハッシュ含む）
#[derive(Debug, Clone)]
pub struct StoredProject {
    /// プロジェクト情報
    pub project: Project,
    /// プロジェクトキーのSHA-256ハッシュ
    pub key_hash: String,
}

/// プロジェクトを登録
///
/// 新しいプロジェクトIDとプロジェクトキーを発行し、
/// `created_at = last_accessed = now` で永続化する。
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(RegisteredProject)` - 登録されたプロジェクト（平文キー含む）
/// * `Err(HubError)` - 登録失敗
pub async fn create(pool: &SqlitePool) -> HubResult<RegisteredProject> {
    let id = Uuid::new_v4();
    let key = auth::generate_project_key();
    let key_hash = auth::hash_with_sha256(&key);
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO projects (project_id, key_hash, created_at, last_accessed)
         VALUES (?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(&key_hash)
    .bind(created_at.to_rfc3339())
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| HubError::Database(format!("Failed to create project: {}", e)))?;

    Ok(RegisteredProject {
        project: Project {
            id,
            created_at,
            last_accessed: created_at,
        },
        key,
    })
}

/// プロジェクトIDで検索
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `project_id` - プロジェクトID
///
/// # Returns
/// * `Ok(Some(StoredProject))` - プロジェクトが見つかった
/// * `Ok(None)` - プロジェクトが見つからなかった
/// * `Err(HubError)` - 検索失敗
pub async fn find(pool: &SqlitePool, project_id: &str) -> HubResult<Option<StoredProject>> {
    let row = sqlx::query_as::<_, ProjectRow>(
        "SELECT project_id, key_hash, created_at, last_accessed FROM projects WHERE project_id = ?",
    )
    .bind(project_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| HubError::Database(format!("Failed to find project: {}", e)))?;

    Ok(row.map(|r| r.into_stored()))
}

/// 期限切れプロジェクトを削除
///
/// `last_accessed` が保持期間より古いプロジェクトと、その変数を
/// 単一トランザクションで削除する。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `max_age` - 保持期間（通常は `Duration::days(RETENTION_DAYS)`）
///
/// # Returns
/// * `Ok(u64)` - 削除されたプロジェクト数
/// * `Err(HubError)` - 削除失敗
pub async fn delete_expired(pool: &SqlitePool, max_age: Duration) -> HubResult<u64> {
    let cutoff = (Utc::now() - max_age).to_rfc3339();

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| HubError::Database(format!("Failed to begin transaction: {}", e)))?;

    sqlx::query(
        "DELETE FROM variables WHERE project_id IN (
             SELECT project_id FROM projects WHERE last_accessed < ?
         )",
    )
    .bind(&cutoff)
    .execute(&mut *tx)
    .await
    .map_err(|e| HubError::Database(format!("Failed to delete expired variables: {}", e)))?;

    let result = sqlx::query("DELETE FROM projects WHERE last_accessed < ?")
        .bind(&cutoff)
        .execute(&mut *tx)
        .await
        .map_err(|e| HubError::Database(format!("Failed to delete expired projects: {}", e)))?;

    tx.commit()
        .await
        .map_err(|e| HubError::Database(format!("Failed to commit cleanup: {}", e)))?;

    Ok(result.rows_affected())
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct ProjectRow {
    project_id: String,
    key_hash: String,
    created_at: String,
    last_accessed: String,
}

impl ProjectRow {
    fn into_stored(self) -> StoredProject {
        let id = Uuid::parse_str(&self.project_id).unwrap();
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .unwrap()
            .with_timezone(&Utc);
        let last_accessed = DateTime::parse_from_rfc3339(&self.last_accessed)
            .unwrap()
            .with_timezone(&Utc);

        StoredProject {
            project: Project {
                id,
                created_at,
                last_accessed,
            },
            key_hash: self.key_hash,
        }
    }
}
