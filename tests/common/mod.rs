//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{header::VARY, HeaderValue, Request, Response};
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tower::ServiceExt;

/// Send `GET path` through `router` and return the response.
#[allow(dead_code)]
pub async fn get(router: Router, path: &str) -> Response<Body> {
    router
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Every `Vary` field line of `response`.
#[allow(dead_code)]
pub fn vary_lines(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(VARY)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Stand-in for a stage that sets `Vary` before the rewrite.
#[allow(dead_code)]
pub fn set_vary(value: &'static str) -> impl Fn(Response<Body>) -> Response<Body> + Clone {
    move |mut response: Response<Body>| {
        response
            .headers_mut()
            .insert(VARY, HeaderValue::from_static(value));
        response
    }
}

/// Issue a raw HTTP/1.1 GET and return the response head, lower-cased.
#[allow(dead_code)]
pub async fn raw_get(addr: SocketAddr, path: &str) -> String {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, addr
    );
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    socket.read_to_end(&mut raw).await.unwrap();
    let text = String::from_utf8_lossy(&raw).to_string();
    let head = text.split("\r\n\r\n").next().unwrap_or_default();
    head.to_lowercase()
}
