//! 変数CRUD APIハンドラー

use super::error::AppError;
use crate::{auth, db, AppState};
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use varhub_common::error::{CommonError, HubError};
use varhub_common::protocol::{
    BatchUpdateRequest, BatchUpdateResponse, GetVariableResponse, SetVariableRequest,
    StatusResponse, VariableEntry,
};

/// 変数取得クエリパラメーター
#[derive(Debug, Deserialize)]
pub struct GetVariableQuery {
    /// 変数名
    #[serde(default)]
    pub var_name: Option<String>,
}

/// POST /api/:project_id/set - 変数設定
pub async fn set_variable(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<SetVariableRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    auth::require_project(&state.db_pool, &project_id, &headers).await?;

    let (var_name, var_value) = validate_entry(payload.var_name, payload.var_value)?;

    db::variables::set(&state.db_pool, &project_id, &var_name, &var_value).await?;

    Ok(Json(StatusResponse::success()))
}

/// GET /api/:project_id/get - 変数取得
pub async fn get_variable(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(query): Query<GetVariableQuery>,
    headers: HeaderMap,
) -> Result<Json<GetVariableResponse>, AppError> {
    auth::require_project(&state.db_pool, &project_id, &headers).await?;

    let var_name = query
        .var_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            HubError::from(CommonError::Validation("Missing var_name".to_string()))
        })?;

    let variable = db::variables::get(&state.db_pool, &project_id, &var_name).await?;

    Ok(Json(GetVariableResponse {
        var_value: variable.value,
        last_updated: variable.last_updated,
    }))
}

/// GET /api/:project_id/all - 全変数取得
///
/// 変数が存在しない場合は空のマッピングを返す。
pub async fn get_all_variables(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<HashMap<String, VariableEntry>>, AppError> {
    auth::require_project(&state.db_pool, &project_id, &headers).await?;

    let variables = db::variables::get_all(&state.db_pool, &project_id).await?;

    let mapping = variables
        .into_iter()
        .map(|variable| {
            (
                variable.name,
                VariableEntry {
                    value: variable.value,
                    last_updated: variable.last_updated,
                },
            )
        })
        .collect();

    Ok(Json(mapping))
}

/// POST /api/:project_id/batch_update - 変数一括更新
///
/// 空の更新リストは拒否する。全エントリが単一トランザクションで
/// コミットされるため、部分適用は発生しない。
pub async fn batch_update(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<BatchUpdateRequest>,
) -> Result<Json<BatchUpdateResponse>, AppError> {
    auth::require_project(&state.db_pool, &project_id, &headers).await?;

    if payload.updates.is_empty() {
        return Err(
            HubError::from(CommonError::Validation("No updates provided".to_string())).into(),
        );
    }

    let mut updates = Vec::with_capacity(payload.updates.len());
    for entry in payload.updates {
        updates.push(validate_entry(entry.var_name, entry.var_value)?);
    }

    let updated = db::variables::batch_set(&state.db_pool, &project_id, &updates).await?;

    Ok(Json(BatchUpdateResponse {
        status: "success".to_string(),
        updated,
    }))
}

/// 変数名・変数値の組を検証
///
/// 名前の欠落・空文字、および値の欠落（明示的なnull含む）を拒否する。
fn validate_entry(
    var_name: Option<String>,
    var_value: Option<serde_json::Value>,
) -> Result<(String, serde_json::Value), HubError> {
    let name = var_name.filter(|name| !name.is_empty());
    let value = var_value.filter(|value| !value.is_null());

    match (name, value) {
        (Some(name), Some(value)) => Ok((name, value)),
        _ => Err(CommonError::Validation("Missing var_name or var_value".to_string()).into()),
    }
}
