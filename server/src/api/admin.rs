//! 管理APIハンドラー
//!
//! 期限切れプロジェクトのクリーンアップ

use super::error::AppError;
use crate::{db, AppState};
use axum::{extract::State, http::HeaderMap, Json};
use chrono::Duration;
use varhub_common::error::HubError;
use varhub_common::protocol::CleanupResponse;

/// POST /api/cleanup - 期限切れプロジェクト削除
///
/// `X-Admin-Key` ヘッダーが設定済みの管理者キーと一致する場合のみ実行する。
/// 最終アクセスから保持期間（90日）を超えたプロジェクトと、その変数を
/// すべて削除する。
pub async fn cleanup_expired_projects(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CleanupResponse>, AppError> {
    let supplied = headers.get("X-Admin-Key").and_then(|h| h.to_str().ok());

    let authorized = match (state.admin_key.as_deref(), supplied) {
        (Some(expected), Some(key)) => key == expected,
        _ => false,
    };
    if !authorized {
        tracing::warn!("Cleanup rejected: invalid or missing admin key");
        return Err(HubError::Authentication("Invalid admin key".to_string()).into());
    }

    let deleted = db::projects::delete_expired(
        &state.db_pool,
        Duration::days(db::projects::RETENTION_DAYS),
    )
    .await?;

    tracing::info!("Cleanup removed {} expired projects", deleted);

    Ok(Json(CleanupResponse {
        status: "success".to_string(),
        projects_deleted: deleted,
    }))
}
