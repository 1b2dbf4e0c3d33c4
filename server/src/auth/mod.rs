// 認証モジュール（プロジェクトキー）

use axum::http::{header, HeaderMap};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use varhub_common::error::{HubError, HubResult};
use varhub_common::types::Project;

/// プロジェクトキーを生成（`pk_` + 32文字のランダム英数字）
///
/// # Returns
/// * `String` - 生成されたプロジェクトキー
pub fn generate_project_key() -> String {
    use rand::Rng;

    let charset: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();

    let random_part: String = (0..32)
        .map(|_| {
            let idx = rng.gen_range(0..charset.len());
            charset[idx] as char
        })
        .collect();

    format!("pk_{}", random_part)
}

/// SHA-256ハッシュ化ヘルパー関数
///
/// # Arguments
/// * `input` - ハッシュ化する文字列
///
/// # Returns
/// * `String` - 16進数表現のSHA-256ハッシュ（64文字）
pub fn hash_with_sha256(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

/// リクエストヘッダーからプロジェクトキーを抽出
///
/// `X-Project-Key` ヘッダーまたは `Authorization: Bearer` 形式を受け付ける。
///
/// # Returns
/// * `Ok(String)` - 抽出されたキー
/// * `Err(HubError::Authentication)` - ヘッダーが無い、または形式不正
pub fn extract_project_key(headers: &HeaderMap) -> HubResult<String> {
    if let Some(key) = headers.get("X-Project-Key").and_then(|h| h.to_str().ok()) {
        return Ok(key.to_string());
    }

    if let Some(auth_header) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        return match auth_header.strip_prefix("Bearer ") {
            Some(token) => Ok(token.to_string()),
            None => Err(HubError::Authentication(
                "Invalid Authorization header format. Expected 'Bearer <key>'".to_string(),
            )),
        };
    }

    Err(HubError::Authentication(
        "Missing X-Project-Key header or Authorization header".to_string(),
    ))
}

/// プロジェクトを解決してキーを検証
///
/// 未知のプロジェクトIDはキーの有無にかかわらず `ProjectNotFound` を返す。
/// プロジェクトが存在する場合のみキーを抽出し、SHA-256ハッシュを照合する。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `project_id` - パスで指定されたプロジェクトID
/// * `headers` - リクエストヘッダー
///
/// # Returns
/// * `Ok(Project)` - 認証成功
/// * `Err(HubError)` - 未知のプロジェクト、またはキー不一致
pub async fn require_project(
    pool: &SqlitePool,
    project_id: &str,
    headers: &HeaderMap,
) -> HubResult<Project> {
    let stored = crate::db::projects::find(pool, project_id)
        .await?
        .ok_or_else(|| HubError::ProjectNotFound(project_id.to_string()))?;

    let key = extract_project_key(headers)?;

    if hash_with_sha256(&key) != stored.key_hash {
        tracing::warn!("Project key verification failed for {}", project_id);
        return Err(HubError::Authentication(
            "Invalid project key".to_string(),
        ));
    }

    Ok(stored.project)
}
