use circlet_client::CircleStore;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use warp::http::StatusCode;
use warp::Filter;

type RequestLog = Arc<Mutex<Vec<(String, Value)>>>;

/// Starts a loopback server recording every request to `/api/circles` and
/// answering with the given status.
fn spawn_circles_server(status: StatusCode) -> (SocketAddr, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));

    let post_log = log.clone();
    let post = warp::post()
        .and(warp::path!("api" / "circles"))
        .and(warp::body::json())
        .map(move |body: Value| {
            post_log
                .lock()
                .expect("request log lock")
                .push(("POST".to_string(), body));
            warp::reply::with_status("", status)
        });

    let patch_log = log.clone();
    let patch = warp::patch()
        .and(warp::path!("api" / "circles"))
        .and(warp::body::json())
        .map(move |body: Value| {
            patch_log
                .lock()
                .expect("request log lock")
                .push(("PATCH".to_string(), body));
            warp::reply::with_status("", status)
        });

    let (addr, server) = warp::serve(post.or(patch)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, log)
}

#[tokio::test]
async fn add_to_circle_issues_one_post_with_exact_body() {
    let (addr, log) = spawn_circles_server(StatusCode::OK);
    let store = CircleStore::new(format!("http://{addr}"));

    store.add_to_circle("family", "alice").await.unwrap();

    let recorded = log.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, "POST");
    assert_eq!(recorded[0].1, json!({"name": "family", "friend": "alice"}));
}

#[tokio::test]
async fn remove_from_circle_issues_one_patch_with_exact_body() {
    let (addr, log) = spawn_circles_server(StatusCode::OK);
    let store = CircleStore::new(format!("http://{addr}"));

    store.remove_from_circle("bob").await.unwrap();

    let recorded = log.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, "PATCH");
    assert_eq!(recorded[0].1, json!({"friend": "bob"}));
}

#[tokio::test]
async fn server_error_propagates_with_status() {
    let (addr, _log) = spawn_circles_server(StatusCode::INTERNAL_SERVER_ERROR);
    let store = CircleStore::new(format!("http://{addr}"));

    let err = store.add_to_circle("family", "alice").await.unwrap_err();
    assert_eq!(
        err.status().map(|status| status.as_u16()),
        Some(StatusCode::INTERNAL_SERVER_ERROR.as_u16())
    );
}

#[tokio::test]
async fn base_url_trailing_slash_is_tolerated() {
    let (addr, log) = spawn_circles_server(StatusCode::OK);
    let store = CircleStore::new(format!("http://{addr}/"));

    store.add_to_circle("climbing", "carol").await.unwrap();

    let recorded = log.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].1, json!({"name": "climbing", "friend": "carol"}));
}
