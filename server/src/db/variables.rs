// 変数CRUD操作（アップサート・一括更新）

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use varhub_common::error::{CommonError, HubError, HubResult};
use varhub_common::types::Variable;

/// 変数を設定（アップサート）
///
/// 値をJSONテキストにシリアライズして `(project_id, var_name)` 行を
/// 置き換える。プロジェクトの `last_accessed` 更新と同一トランザクションで
/// 実行するため、途中失敗時に部分状態は残らない。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `project_id` - プロジェクトID
/// * `name` - 変数名
/// * `value` - 変数値
///
/// # Returns
/// * `Ok(())` - 設定成功
/// * `Err(HubError)` - シリアライズ失敗、または設定失敗
pub async fn set(
    pool: &SqlitePool,
    project_id: &str,
    name: &str,
    value: &serde_json::Value,
) -> HubResult<()> {
    let serialized = serde_json::to_string(value).map_err(CommonError::from)?;
    let now = Utc::now().to_rfc3339();

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| HubError::Database(format!("Failed to begin transaction: {}", e)))?;

    sqlx::query("UPDATE projects SET last_accessed = ? WHERE project_id = ?")
        .bind(&now)
        .bind(project_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| HubError::Database(format!("Failed to update last_accessed: {}", e)))?;

    sqlx::query(
        "INSERT INTO variables (project_id, var_name, var_value, last_updated)
         VALUES (?, ?, ?, ?)
         ON CONFLICT(project_id, var_name) DO UPDATE SET
             var_value = excluded.var_value,
             last_updated = excluded.last_updated",
    )
    .bind(project_id)
    .bind(name)
    .bind(&serialized)
    .bind(&now)
    .execute(&mut *tx)
    .await
    .map_err(|e| HubError::Database(format!("Failed to set variable: {}", e)))?;

    tx.commit()
        .await
        .map_err(|e| HubError::Database(format!("Failed to commit variable set: {}", e)))?;

    Ok(())
}

/// 変数を取得
///
/// 保存テキストをJSONとしてデシリアライズし、解釈できない場合は
/// 生テキストを文字列値として返す。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `project_id` - プロジェクトID
/// * `name` - 変数名
///
/// # Returns
/// * `Ok(Variable)` - 変数が見つかった
/// * `Err(HubError::VariableNotFound)` - 変数が見つからなかった
/// * `Err(HubError)` - 取得失敗
pub async fn get(pool: &SqlitePool, project_id: &str, name: &str) -> HubResult<Variable> {
    touch(pool, project_id).await?;

    let row = sqlx::query_as::<_, VariableRow>(
        "SELECT var_name, var_value, last_updated FROM variables
         WHERE project_id = ? AND var_name = ?",
    )
    .bind(project_id)
    .bind(name)
    .fetch_optional(pool)
    .await
    .map_err(|e| HubError::Database(format!("Failed to get variable: {}", e)))?
    .ok_or_else(|| HubError::VariableNotFound(name.to_string()))?;

    Ok(row.into_variable())
}

/// プロジェクトの全変数を取得
///
/// 変数が存在しない場合は空のVecを返す。
pub async fn get_all(pool: &SqlitePool, project_id: &str) -> HubResult<Vec<Variable>> {
    touch(pool, project_id).await?;

    let rows = sqlx::query_as::<_, VariableRow>(
        "SELECT var_name, var_value, last_updated FROM variables WHERE project_id = ?",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
    .map_err(|e| HubError::Database(format!("Failed to list variables: {}", e)))?;

    Ok(rows.into_iter().map(|r| r.into_variable()).collect())
}

/// 変数を一括設定
///
/// 全エントリのアップサートと `last_accessed` 更新を単一トランザクションで
/// コミットする。いずれかのエントリで失敗した場合は何も適用されない。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `project_id` - プロジェクトID
/// * `updates` - (変数名, 変数値) のリスト
///
/// # Returns
/// * `Ok(usize)` - 適用された更新件数
/// * `Err(HubError)` - シリアライズ失敗、または更新失敗
pub async fn batch_set(
    pool: &SqlitePool,
    project_id: &str,
    updates: &[(String, serde_json::Value)],
) -> HubResult<usize> {
    let now = Utc::now().to_rfc3339();

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| HubError::Database(format!("Failed to begin transaction: {}", e)))?;

    sqlx::query("UPDATE projects SET last_accessed = ? WHERE project_id = ?")
        .bind(&now)
        .bind(project_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| HubError::Database(format!("Failed to update last_accessed: {}", e)))?;

    for (name, value) in updates {
        let serialized = serde_json::to_string(value).map_err(CommonError::from)?;

        sqlx::query(
            "INSERT INTO variables (project_id, var_name, var_value, last_updated)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(project_id, var_name) DO UPDATE SET
                 var_value = excluded.var_value,
                 last_updated = excluded.last_updated",
        )
        .bind(project_id)
        .bind(name)
        .bind(&serialized)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| HubError::Database(format!("Failed to batch set variable: {}", e)))?;
    }

    tx.commit()
        .await
        .map_err(|e| HubError::Database(format!("Failed to commit batch update: {}", e)))?;

    Ok(updates.len())
}

/// プロジェクトの最終アクセス日時を更新
async fn touch(pool: &SqlitePool, project_id: &str) -> HubResult<()> {
    sqlx::query("UPDATE projects SET last_accessed = ? WHERE project_id = ?")
        .bind(Utc::now().to_rfc3339())
        .bind(project_id)
        .execute(pool)
        .await
        .map_err(|e| HubError::Database(format!("Failed to update last_accessed: {}", e)))?;

    Ok(())
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct VariableRow {
    var_name: String,
    var_value: String,
    last_updated: String,
}

impl VariableRow {
    fn into_variable(self) -> Variable {
        let last_updated = DateTime::parse_from_rfc3339(&self.last_updated)
            .unwrap()
            .with_timezone(&Utc);

        // 旧データ等でJSONとして解釈できない場合は生テキストを値として扱う
        let value = match serde_json::from_str(&self.var_value) {
            Ok(value) => value,
            Err(_) => serde_json::Value::String(self.var_value),
        };

        Variable {
            name: self.var_name,
            value,
            last_updated,
        }
    }
}
