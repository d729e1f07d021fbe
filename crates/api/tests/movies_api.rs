//! Integration tests for the `/v1/movies` endpoints.

mod common;

use std::sync::Arc;

use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, build_test_app, delete, get, movie_body, patch_json, post_json, send, send_raw,
};
use marquee_api::mailer::LogMailer;
use marquee_api::router::build_app_router;
use serde_json::json;
use sqlx::PgPool;

/// Create a movie through the API and return its JSON representation.
async fn create(pool: &PgPool, title: &str, year: i32, genres: &[&str]) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/v1/movies", movie_body(title, year, genres)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_movie_returns_201_with_location(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/v1/movies",
        movie_body("Moana", 2016, &["animation", "adventure"]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()["location"].to_str().unwrap().to_string();

    let json = body_json(response).await;
    let movie = &json["data"];
    assert_eq!(location, format!("/v1/movies/{}", movie["id"]));
    assert_eq!(movie["title"], "Moana");
    assert_eq!(movie["year"], 2016);
    assert_eq!(movie["runtime"], "102 min");
    assert_eq!(movie["genres"], json!(["animation", "adventure"]));
    assert_eq!(movie["version"], 1);
    assert!(movie.get("created_at").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_movie_with_empty_object_reports_every_field(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/v1/movies", json!({})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["title"], "must be provided");
    assert_eq!(json["fields"]["year"], "must be provided");
    assert_eq!(json["fields"]["runtime"], "must be provided");
    assert_eq!(json["fields"]["genres"], "must contain at least 1 genre");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_movie_rejects_duplicate_genres(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/v1/movies",
        movie_body("Moana", 2016, &["animation", "animation"]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["genres"], "must not contain duplicate values");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_movie_rejects_unknown_keys(pool: PgPool) {
    let app = build_test_app(pool);
    let response = send_raw(
        app,
        Method::POST,
        "/v1/movies",
        r#"{"title":"X","extra":1}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "body contains unknown key \"extra\"");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_movie_rejects_multiple_json_values(pool: PgPool) {
    let app = build_test_app(pool);
    let response = send_raw(
        app,
        Method::POST,
        "/v1/movies",
        r#"{"title":"A"}{"title":"B"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "body must only contain a single JSON value");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_movie_rejects_badly_formatted_runtime(pool: PgPool) {
    let app = build_test_app(pool);
    let response = send_raw(
        app,
        Method::POST,
        "/v1/movies",
        r#"{"title":"Moana","year":2016,"runtime":"107 minutes","genres":["animation"]}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid runtime format");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_movie_rejects_oversized_body(pool: PgPool) {
    let mut config = common::test_config();
    config.max_body_bytes = 64;
    let state = common::test_state(pool, config, Arc::new(LogMailer));
    let app = build_app_router(state);

    let title = "x".repeat(200);
    let response = post_json(app, "/v1/movies", movie_body(&title, 2016, &["drama"])).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = body_json(response).await;
    assert_eq!(json["error"], "body must not be larger than 64 bytes");
}

// ---------------------------------------------------------------------------
// Show / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn show_movie_returns_the_stored_movie(pool: PgPool) {
    let created = create(&pool, "Black Panther", 2018, &["action"]).await;

    let app = build_test_app(pool);
    let response = get(app, &format!("/v1/movies/{}", created["id"])).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn show_movie_with_bad_ids_returns_404(pool: PgPool) {
    for uri in ["/v1/movies/0", "/v1/movies/-1", "/v1/movies/abc", "/v1/movies/999999"] {
        let app = build_test_app(pool.clone());
        let response = get(app, uri).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_movie_removes_it(pool: PgPool) {
    let created = create(&pool, "Deadpool", 2016, &["action", "comedy"]).await;
    let uri = format!("/v1/movies/{}", created["id"]);

    let response = delete(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "movie successfully deleted"
    );

    let response = get(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_updates_only_supplied_fields(pool: PgPool) {
    let created = create(&pool, "The Breakfast Club", 1986, &["drama"]).await;
    let uri = format!("/v1/movies/{}", created["id"]);

    let response = patch_json(build_test_app(pool), &uri, json!({"year": 1985})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let movie = body_json(response).await["data"].clone();
    assert_eq!(movie["year"], 1985);
    assert_eq!(movie["title"], "The Breakfast Club");
    assert_eq!(movie["runtime"], "102 min");
    assert_eq!(movie["version"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_validates_the_merged_movie(pool: PgPool) {
    let created = create(&pool, "Moana", 2016, &["animation"]).await;
    let uri = format!("/v1/movies/{}", created["id"]);

    let response = patch_json(build_test_app(pool), &uri, json!({"title": ""})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["title"], "must be provided");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_with_stale_expected_version_conflicts(pool: PgPool) {
    let created = create(&pool, "Moana", 2016, &["animation"]).await;
    let uri = format!("/v1/movies/{}", created["id"]);

    let request = Request::builder()
        .method(Method::PATCH)
        .uri(&uri)
        .header("content-type", "application/json")
        .header("x-expected-version", "7")
        .body(json!({"year": 2017}).to_string().into())
        .unwrap();
    let response = send(build_test_app(pool.clone()), request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "EDIT_CONFLICT");

    let response = get(build_test_app(pool), &uri).await;
    assert_eq!(body_json(response).await["data"]["year"], 2016);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_with_matching_expected_version_succeeds(pool: PgPool) {
    let created = create(&pool, "Moana", 2016, &["animation"]).await;
    let uri = format!("/v1/movies/{}", created["id"]);

    let request = Request::builder()
        .method(Method::PATCH)
        .uri(&uri)
        .header("content-type", "application/json")
        .header("x-expected-version", "1")
        .body(json!({"runtime": "107 min"}).to_string().into())
        .unwrap();
    let response = send(build_test_app(pool), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let movie = body_json(response).await["data"].clone();
    assert_eq!(movie["runtime"], "107 min");
    assert_eq!(movie["version"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_missing_movie_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = patch_json(app, "/v1/movies/4242", json!({"year": 2000})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_movies_filters_sorts_and_paginates(pool: PgPool) {
    create(&pool, "Moana", 2016, &["animation", "adventure"]).await;
    create(&pool, "Black Panther", 2018, &["action", "adventure"]).await;
    create(&pool, "Deadpool", 2016, &["action", "comedy"]).await;
    create(&pool, "The Breakfast Club", 1985, &["drama"]).await;

    let app = build_test_app(pool);
    let response = get(app, "/v1/movies?genres=adventure&sort=-year&page_size=1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "Black Panther");
    assert_eq!(
        json["metadata"],
        json!({
            "current_page": 1,
            "page_size": 1,
            "first_page": 1,
            "last_page": 2,
            "total_records": 2,
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_movies_matches_title_words(pool: PgPool) {
    create(&pool, "The Breakfast Club", 1985, &["drama"]).await;
    create(&pool, "Fight Club", 1999, &["drama"]).await;
    create(&pool, "Moana", 2016, &["animation"]).await;

    let app = build_test_app(pool);
    let response = get(app, "/v1/movies?title=club&sort=title").await;

    let json = body_json(response).await;
    let titles: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Fight Club", "The Breakfast Club"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_movies_with_no_matches_has_empty_metadata(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/v1/movies?title=nothing").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
    assert_eq!(json["metadata"], json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_movies_rejects_bad_query_parameters(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/v1/movies?page=abc&page_size=1000&sort=budget").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["page"], "must be an integer value");
    assert_eq!(json["fields"]["page_size"], "must be a maximum of 100");
    assert_eq!(json["fields"]["sort"], "invalid sort value");
}
