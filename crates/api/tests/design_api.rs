//! HTTP-level integration tests for the `/designs` endpoints.
//!
//! Templates are uploaded through the API; everything else goes through the
//! router with `tower::ServiceExt::oneshot`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_user, delete_auth, get, get_auth, png_bytes,
    png_data_uri, post_json_auth, post_multipart_auth, post_raw_auth, token_for, Part,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn upload_template(app: axum::Router, token: &str) -> i64 {
    let png = png_bytes();
    let response = post_multipart_auth(
        app,
        "/api/v1/templates",
        &[Part::Text("name", "Card"), Part::File("image", "card.png", &png)],
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Save and load
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_and_load_design(pool: PgPool) {
    let user = create_user(&pool, "alice", false).await;
    let token = token_for(&user);
    let app = build_test_app(pool);
    let template_id = upload_template(app.clone(), &token).await;

    let canvas = json!({"objects": [{"type": "i-text", "text": "Hi"}], "background": "#fff"});
    let response = post_json_auth(
        app.clone(),
        "/api/v1/designs",
        json!({
            "design_name": "Greeting",
            "canvas_data": canvas,
            "template_id": template_id,
            "preview_image": png_data_uri(),
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Design saved successfully!");
    let design_id = json["design_id"].as_i64().unwrap();

    let response = get_auth(app, &format!("/api/v1/designs/{design_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["canvas_data"], canvas);
    assert_eq!(json["design_name"], "Greeting");
    assert_eq!(json["template_id"], template_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_keeps_design_id(pool: PgPool) {
    let user = create_user(&pool, "alice", false).await;
    let token = token_for(&user);
    let app = build_test_app(pool);
    let template_id = upload_template(app.clone(), &token).await;

    let first = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/designs",
            json!({"design_name": "A", "canvas_data": {}, "template_id": template_id}),
            &token,
        )
        .await,
    )
    .await;
    let design_id = first["design_id"].as_i64().unwrap();

    let second = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/designs",
            json!({
                "design_id": design_id,
                "design_name": "B",
                "canvas_data": {"x": 1},
                "template_id": template_id,
            }),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(second["design_id"], design_id);

    let list = body_json(get_auth(app, "/api/v1/designs", &token).await).await;
    let rows = list["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["design_name"], "B");
}

// ---------------------------------------------------------------------------
// Failure envelope
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_fields_fail_with_validation_error(pool: PgPool) {
    let user = create_user(&pool, "alice", false).await;
    let token = token_for(&user);
    let app = build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/designs",
        json!({"design_name": "A", "template_id": 1}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("canvas_data"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_json_uses_error_envelope(pool: PgPool) {
    let user = create_user(&pool, "alice", false).await;
    let token = token_for(&user);
    let app = build_test_app(pool);

    let response = post_raw_auth(
        app,
        "/api/v1/designs",
        "application/json",
        "{not json",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_template_returns_404(pool: PgPool) {
    let user = create_user(&pool, "alice", false).await;
    let token = token_for(&user);
    let app = build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/designs",
        json!({"design_name": "A", "canvas_data": {}, "template_id": 4242}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");

    let list = body_json(
        get_auth(app, "/api/v1/designs?include_orphaned=true", &token).await,
    )
    .await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_preview_is_a_validation_error(pool: PgPool) {
    let user = create_user(&pool, "alice", false).await;
    let token = token_for(&user);
    let app = build_test_app(pool);
    let template_id = upload_template(app.clone(), &token).await;

    let response = post_json_auth(
        app,
        "/api/v1/designs",
        json!({
            "design_name": "A",
            "canvas_data": {},
            "template_id": template_id,
            "preview_image": "image/png,no-delimiter",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_requires_authentication(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app.clone(), "/api/v1/designs").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let response = get_auth(app, "/api/v1/designs", "not-a-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_design_is_forbidden(pool: PgPool) {
    let alice = create_user(&pool, "alice", false).await;
    let bob = create_user(&pool, "bob", false).await;
    let alice_token = token_for(&alice);
    let bob_token = token_for(&bob);
    let app = build_test_app(pool);
    let template_id = upload_template(app.clone(), &alice_token).await;

    let saved = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/designs",
            json!({"design_name": "A", "canvas_data": {}, "template_id": template_id}),
            &alice_token,
        )
        .await,
    )
    .await;
    let design_id = saved["design_id"].as_i64().unwrap();
    let uri = format!("/api/v1/designs/{design_id}");

    let response = get_auth(app.clone(), &uri, &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "PERMISSION_DENIED");

    let response = delete_auth(app.clone(), &uri, &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, &uri, &alice_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_id_uses_error_envelope(pool: PgPool) {
    let user = create_user(&pool, "alice", false).await;
    let token = token_for(&user);
    let app = build_test_app(pool);

    let response = get_auth(app, "/api/v1/designs/abc", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Delete and listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_design(pool: PgPool) {
    let user = create_user(&pool, "alice", false).await;
    let token = token_for(&user);
    let app = build_test_app(pool);
    let template_id = upload_template(app.clone(), &token).await;

    let saved = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/designs",
            json!({"design_name": "A", "canvas_data": {}, "template_id": template_id}),
            &token,
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/designs/{}", saved["design_id"]);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Design deleted successfully!");

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_hides_orphans_unless_asked(pool: PgPool) {
    let user = create_user(&pool, "alice", false).await;
    let token = token_for(&user);
    let app = build_test_app(pool);
    let template_id = upload_template(app.clone(), &token).await;

    post_json_auth(
        app.clone(),
        "/api/v1/designs",
        json!({
            "design_name": "A",
            "canvas_data": {},
            "template_id": template_id,
            "preview_image": png_data_uri(),
        }),
        &token,
    )
    .await;

    let listed = body_json(get_auth(app.clone(), "/api/v1/designs", &token).await).await;
    let rows = listed["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["preview_url"]
        .as_str()
        .unwrap()
        .starts_with("/media/saved_designs/A_"));
    assert!(rows[0].get("canvas_data").is_none());

    let response = delete_auth(app.clone(), &format!("/api/v1/templates/{template_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = body_json(get_auth(app.clone(), "/api/v1/designs", &token).await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());

    let listed = body_json(
        get_auth(app, "/api/v1/designs?include_orphaned=true", &token).await,
    )
    .await;
    let rows = listed["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["template_id"].is_null());
}
