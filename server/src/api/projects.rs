//! プロジェクト登録APIハンドラー

use super::error::AppError;
use crate::{db, AppState};
use axum::{extract::State, http::StatusCode, Json};
use varhub_common::protocol::RegisterResponse;

/// POST /api/register - プロジェクト登録
///
/// プロジェクトIDとプロジェクトキーを発行する。
/// キーの平文はこのレスポンスでのみ取得できる。
pub async fn register_project(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let registered = db::projects::create(&state.db_pool).await?;

    tracing::info!("Registered project {}", registered.project.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            project_id: registered.project.id,
            project_key: registered.key,
        }),
    ))
}
