//! Fake iTunes feed server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1, serving the real feed path shape:
//!
//! `GET /api/v1/{country}/movies/top-movies/all/{limit}/explicit.json`
//!
//! The response body and status are swappable mid-test so a harness can
//! simulate a recovery between refreshes.
//!
//! # Example
//!
//! ```rust,no_run
//! # tokio_test::block_on(async {
//! use common::fake_feed_api::FakeFeedApi;
//!
//! let api = FakeFeedApi::start().await.unwrap();
//! api.set_body(common::fixtures::envelope_json(25)).await;
//! let url = api.feed_url("us", 25);
//! # });
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Default)]
struct ApiState {
    status: Option<u16>,
    body: String,
    /// `(country, limit)` of every request served, in arrival order.
    requests: Vec<(String, String)>,
}

/// Handle to the running fake feed server.
pub struct FakeFeedApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeFeedApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route(
                "/api/v1/{country}/movies/top-movies/all/{limit}/explicit.json",
                get(serve_feed),
            )
            .with_state(state.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, state })
    }

    /// Feed URL on this server for a country and entry cap, mirroring the
    /// production URL shape.
    pub fn feed_url(&self, country: &str, limit: u8) -> String {
        format!(
            "http://{}/api/v1/{country}/movies/top-movies/all/{limit}/explicit.json",
            self.addr
        )
    }

    /// Serve `body` with a 200 status from now on.
    pub async fn set_body(&self, body: impl Into<String>) {
        let mut s = self.state.lock().await;
        s.body = body.into();
        s.status = None;
    }

    /// Serve `status` with an empty body from now on.
    pub async fn set_status(&self, status: u16) {
        let mut s = self.state.lock().await;
        s.status = Some(status);
    }

    /// `(country, limit)` path parameters of every request served so far.
    pub async fn requests(&self) -> Vec<(String, String)> {
        self.state.lock().await.requests.clone()
    }
}

async fn serve_feed(
    Path((country, limit)): Path<(String, String)>,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> (StatusCode, String) {
    let mut s = state.lock().await;
    s.requests.push((country, limit));
    match s.status {
        Some(code) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            String::new(),
        ),
        None => (StatusCode::OK, s.body.clone()),
    }
}
