#![allow(dead_code)]

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Preview list as the public API serves it: string and numeric ids, season
/// counts, genre ids.
pub fn preview_list() -> Value {
    json!([
        {
            "id": "10716",
            "title": "Something Was Wrong",
            "description": "An award-winning docuseries",
            "seasons": 2,
            "image": "https://img.test/10716.jpg",
            "genres": [2],
            "updated": "2022-11-03T07:00:00.000Z"
        },
        {
            "id": 5675,
            "title": "All Killa No Filla",
            "seasons": 1,
            "genres": [4, 5],
            "updated": "2023-01-02"
        }
    ])
}

pub fn detail_10716() -> Value {
    json!({
        "id": "10716",
        "title": "Something Was Wrong",
        "description": "An award-winning docuseries",
        "image": "https://img.test/10716.jpg",
        "genres": ["Investigative Journalism"],
        "updated": "2022-11-03T07:00:00.000Z",
        "seasons": [
            {
                "season": 1,
                "title": "Season 1",
                "image": "https://img.test/10716-s1.jpg",
                "episodes": [
                    { "title": "Ep 1: Meet Lily", "episode": 1, "file": "https://cdn.test/s1e1.mp3" },
                    { "title": "Ep 2: The Letter", "episode": 2, "file": "https://cdn.test/s1e2.mp3" }
                ]
            },
            {
                "season": 2,
                "title": "Season 2",
                "episodes": [
                    { "title": "Ep 1: Back Again", "episode": 1, "file": "https://cdn.test/s2e1.mp3" }
                ]
            }
        ]
    })
}

async fn list() -> Json<Value> {
    Json(preview_list())
}

async fn detail(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "10716" => Json(detail_10716()).into_response(),
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "garbage" => (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// Serve the fixture API on an ephemeral port; returns its base URL.
pub async fn spawn_fixture_api() -> String {
    let app = Router::new()
        .route("/", get(list))
        .route("/id/:id", get(detail));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
