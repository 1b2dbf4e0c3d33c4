//! 変数CRUDエンドポイントの契約テスト

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::support::router::create_test_router;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// プロジェクトを登録して (project_id, project_key) を返す
async fn register(router: &Router) -> (String, String) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    (
        body["project_id"].as_str().unwrap().to_string(),
        body["project_key"].as_str().unwrap().to_string(),
    )
}

fn set_request(project_id: &str, key: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/{}/set", project_id))
        .header("content-type", "application/json")
        .header("X-Project-Key", key)
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn get_request(project_id: &str, key: &str, var_name: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/api/{}/get?var_name={}", project_id, var_name))
        .header("X-Project-Key", key)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn set_then_get_round_trips_value() {
    let (router, _pool) = create_test_router().await;
    let (project_id, key) = register(&router).await;

    let response = router
        .clone()
        .oneshot(set_request(
            &project_id,
            &key,
            json!({"var_name": "score", "var_value": 42}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");

    let response = router
        .oneshot(get_request(&project_id, &key, "score"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["var_value"], json!(42));
    assert!(body["last_updated"].as_str().is_some());
}

#[tokio::test]
async fn set_overwrites_instead_of_merging() {
    let (router, _pool) = create_test_router().await;
    let (project_id, key) = register(&router).await;

    for payload in [
        json!({"var_name": "score", "var_value": 42}),
        json!({"var_name": "score", "var_value": {"a": 1}}),
    ] {
        let response = router
            .clone()
            .oneshot(set_request(&project_id, &key, payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = router
        .oneshot(get_request(&project_id, &key, "score"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["var_value"], json!({"a": 1}));
}

#[tokio::test]
async fn set_with_missing_fields_returns_400() {
    let (router, _pool) = create_test_router().await;
    let (project_id, key) = register(&router).await;

    for payload in [
        json!({}),
        json!({"var_name": "only_name"}),
        json!({"var_value": 1}),
        json!({"var_name": "", "var_value": 1}),
        json!({"var_name": "x", "var_value": null}),
    ] {
        let response = router
            .clone()
            .oneshot(set_request(&project_id, &key, payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"].as_str().is_some());
    }
}

#[tokio::test]
async fn operations_on_unknown_project_return_404_regardless_of_key() {
    let (router, _pool) = create_test_router().await;

    let unknown = uuid::Uuid::new_v4().to_string();

    // キー無し
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/{}/all", unknown))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // 不正なキー付きでも404
    let response = router
        .oneshot(set_request(
            &unknown,
            "pk_wrong",
            json!({"var_name": "a", "var_value": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Project not found");
}

#[tokio::test]
async fn wrong_key_on_existing_project_returns_401() {
    let (router, _pool) = create_test_router().await;
    let (project_id, _key) = register(&router).await;

    let response = router
        .clone()
        .oneshot(set_request(
            &project_id,
            "pk_wrong",
            json!({"var_name": "a", "var_value": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // キー欠落も401
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/{}/all", project_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bearer_header_is_accepted() {
    let (router, _pool) = create_test_router().await;
    let (project_id, key) = register(&router).await;

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/{}/all", project_id))
                .header("authorization", format!("Bearer {}", key))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_without_var_name_returns_400() {
    let (router, _pool) = create_test_router().await;
    let (project_id, key) = register(&router).await;

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/{}/get", project_id))
                .header("X-Project-Key", &key)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_variable_returns_404() {
    let (router, _pool) = create_test_router().await;
    let (project_id, key) = register(&router).await;

    let response = router
        .oneshot(get_request(&project_id, &key, "never_set"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Variable not found");
}

#[tokio::test]
async fn get_all_returns_exact_mapping() {
    let (router, _pool) = create_test_router().await;
    let (project_id, key) = register(&router).await;

    for (name, value) in [("a", json!(1)), ("b", json!({"x": true}))] {
        let response = router
            .clone()
            .oneshot(set_request(
                &project_id,
                &key,
                json!({"var_name": name, "var_value": value}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/{}/all", project_id))
                .header("X-Project-Key", &key)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let mapping = body.as_object().expect("response should be a mapping");
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping["a"]["value"], json!(1));
    assert_eq!(mapping["b"]["value"], json!({"x": true}));
    assert!(mapping["a"]["last_updated"].as_str().is_some());
}

#[tokio::test]
async fn get_all_on_empty_project_returns_empty_mapping() {
    let (router, _pool) = create_test_router().await;
    let (project_id, key) = register(&router).await;

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/{}/all", project_id))
                .header("X-Project-Key", &key)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body, json!({}));
}
