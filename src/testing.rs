//! In-process stand-ins for the prediction service.

use axum::{http::StatusCode, routing::post, Router};
use tokio::net::TcpListener;
use url::Url;

pub const HAZARDOUS_BODY: &str =
    r#"{"Predicted_MOID_AU":0.0234,"Risk_Label":1,"Risk":"Hazardous","Risk_Probability":0.87}"#;

/// Serves `router` on an ephemeral local port and returns its `/predict` URL.
pub async fn spawn_backend(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/predict")).unwrap()
}

/// A backend answering every prediction with a fixed status and body.
pub async fn spawn_fixed_backend(status: StatusCode, body: &'static str) -> Url {
    spawn_backend(Router::new().route(
        "/predict",
        post(move || async move {
            (
                status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                body,
            )
        }),
    ))
    .await
}

/// A URL on a local port with nothing listening.
pub async fn unreachable_endpoint() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/predict")).unwrap()
}
