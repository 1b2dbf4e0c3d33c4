//! システムAPIハンドラー

use axum::Json;
use varhub_common::protocol::HealthResponse;

/// GET /api/health - ヘルスチェック
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
