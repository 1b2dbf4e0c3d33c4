//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use varhub_common::error::HubError;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub HubError);

impl From<HubError> for AppError {
    fn from(err: HubError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self.0 {
            // バリデーションエラーは呼び出し側の入力なので詳細をそのまま返す
            HubError::Common(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HubError::ProjectNotFound(_) => {
                (StatusCode::NOT_FOUND, self.0.external_message().to_string())
            }
            HubError::VariableNotFound(_) => {
                (StatusCode::NOT_FOUND, self.0.external_message().to_string())
            }
            HubError::Authentication(_) => (
                StatusCode::UNAUTHORIZED,
                self.0.external_message().to_string(),
            ),
            HubError::Database(_) | HubError::Internal(_) => {
                // 内部詳細はログのみに残す
                tracing::error!("{}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    self.0.external_message().to_string(),
                )
            }
        };

        let payload = json!({
            "error": message
        });

        (status, Json(payload)).into_response()
    }
}
