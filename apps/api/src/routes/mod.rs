pub mod health;
pub mod layout;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(layout::handle_list_templates))
        // Layout engine
        .route("/api/v1/layout/render", post(layout::handle_render))
        .route("/api/v1/layout/extract", post(layout::handle_extract))
        .route("/api/v1/layout/switch", post(layout::handle_switch))
        .route("/api/v1/layout/infer", post(layout::handle_infer))
        .route("/api/v1/layout/style", post(layout::handle_style))
        .route("/api/v1/layout/reorder", post(layout::handle_reorder))
        .route("/api/v1/layout/paginate", post(layout::handle_paginate))
        .route("/api/v1/layout/flatten", post(layout::handle_flatten))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::templates::defaults::default_record;

    fn app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    fn app_with_limit(max_elements: usize) -> Router {
        build_router(AppState::new(Config {
            max_elements,
            ..Config::default()
        }))
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn rendered_objects(template: Value) -> Value {
        let (status, body) = post_json(
            app(),
            "/api/v1/layout/render",
            json!({"record": default_record(), "template": template}),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "render failed: {body}");
        body["objects"].clone()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "canvas-api");
    }

    #[tokio::test]
    async fn test_templates_listing() {
        let (status, body) = get_json(app(), "/api/v1/templates").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["layouts"]
            .as_array()
            .is_some_and(|l| l.iter().any(|v| v == "sidebar-left")));
    }

    #[tokio::test]
    async fn test_render_returns_objects_and_page_fill() {
        let (status, body) = post_json(
            app(),
            "/api/v1/layout/render",
            json!({"record": default_record(), "template": {"layout": "sidebar-left", "palette": "forest"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["objects"].as_array().unwrap().is_empty());
        assert!(body["pageFill"]["pagesUsed"].as_u64().unwrap() >= 1);
        assert!(body["objects"]
            .as_array()
            .unwrap()
            .iter()
            .any(|o| o["semanticType"] == "sidebar_background"));
    }

    #[tokio::test]
    async fn test_render_unknown_template_is_404() {
        let (status, body) = post_json(
            app(),
            "/api/v1/layout/render",
            json!({"record": default_record(), "template": {"palette": "neon"}}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_style_and_template_together_is_400() {
        let (status, body) = post_json(
            app(),
            "/api/v1/layout/render",
            json!({"record": default_record(), "style": {}, "template": {}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extract_round_trip_over_http() {
        let objects = rendered_objects(json!({})).await;
        let (status, record) =
            post_json(app(), "/api/v1/layout/extract", json!({"objects": objects})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            record["personalInfo"]["fullName"],
            default_record().personal_info.full_name
        );
    }

    #[tokio::test]
    async fn test_switch_keeps_text() {
        let objects = rendered_objects(json!({"layout": "single-column"})).await;
        let (status, body) = post_json(
            app(),
            "/api/v1/layout/switch",
            json!({"objects": objects, "template": {"layout": "modern-split"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let texts: Vec<&str> = body["objects"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|o| o["text"].as_str())
            .collect();
        assert!(texts.iter().any(|t| t.contains(&default_record().personal_info.full_name)));
    }

    #[tokio::test]
    async fn test_infer_tags_untagged_canvas() {
        let objects = json!([
            {"type": "textbox", "left": 40, "top": 40, "width": 400, "height": 34,
             "text": "JOHN SMITH", "fontSize": 28, "fontWeight": "bold"},
            {"type": "textbox", "left": 40, "top": 90, "width": 300, "height": 16,
             "text": "john@example.com", "fontSize": 11}
        ]);
        let (status, body) =
            post_json(app(), "/api/v1/layout/infer", json!({"objects": objects})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], 2);
        assert_eq!(body["objects"][0]["semanticType"], "name");
        assert_eq!(body["objects"][1]["semanticType"], "email");
    }

    #[tokio::test]
    async fn test_style_delta_over_http() {
        let objects = rendered_objects(json!({})).await;
        let (status, body) = post_json(
            app(),
            "/api/v1/layout/style",
            json!({"objects": objects, "delta": {"categories": ["skills"], "color": "#ff0000"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["changed"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_reorder_requires_an_order() {
        let (status, _) = post_json(
            app(),
            "/api/v1/layout/reorder",
            json!({"objects": [], "order": []}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_paginate_returns_pages() {
        let objects = rendered_objects(json!({})).await;
        let (status, body) =
            post_json(app(), "/api/v1/layout/paginate", json!({"objects": objects})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["pages"].as_array().unwrap().is_empty());
        assert_eq!(body["pages"][0]["background"], "#ffffff");
    }

    #[tokio::test]
    async fn test_flatten_inverts_paginate() {
        let objects = rendered_objects(json!({"layout": "sidebar-left"})).await;
        let count = objects.as_array().unwrap().len();
        let (_, document) =
            post_json(app(), "/api/v1/layout/paginate", json!({"objects": objects})).await;
        let (status, body) = post_json(app(), "/api/v1/layout/flatten", document).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["objects"].as_array().unwrap().len(),
            count,
            "sliced shapes rejoin into one element each"
        );
    }

    #[tokio::test]
    async fn test_too_many_objects_is_400() {
        let objects = rendered_objects(json!({})).await;
        let (status, body) = post_json(
            app_with_limit(3),
            "/api/v1/layout/extract",
            json!({"objects": objects}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
