//! REST APIハンドラー
//!
//! プロジェクト登録、変数CRUD、クリーンアップAPI

/// 管理API（期限切れプロジェクトの削除）
pub mod admin;

/// APIエラーレスポンス型
pub mod error;

/// プロジェクト登録API
pub mod projects;

/// システムAPI（ヘルスチェック）
pub mod system;

/// 変数CRUD API
pub mod variables;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/register", post(projects::register_project))
        .route("/api/cleanup", post(admin::cleanup_expired_projects))
        .route("/api/health", get(system::health_check))
        .route("/api/:project_id/set", post(variables::set_variable))
        .route("/api/:project_id/get", get(variables::get_variable))
        .route("/api/:project_id/all", get(variables::get_all_variables))
        .route(
            "/api/:project_id/batch_update",
            post(variables::batch_update),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
