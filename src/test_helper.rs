use std::{
    net::{SocketAddr, TcpListener as StdTcpListener},
    sync::{Arc, Mutex},
};

use anyhow::Result;
use api::RegisterForm;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use rstest::fixture;
use serde_json::Value;
use tokio::{net::TcpListener, task::JoinHandle};
use url::Url;

/// Scenario A.
#[fixture]
pub fn ana() -> RegisterForm {
    RegisterForm {
        handle: "ana".into(),
        name: "Ana".into(),
        email: "ana@test.com".into(),
        password: "password1".into(),
        password_confirmation: "password1".into(),
    }
}

/// A URL nothing listens on.
#[fixture]
pub fn unreachable_url() -> Url {
    let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/api")).unwrap()
}

/// How the fake authentication endpoint answers.
#[derive(Debug, Clone)]
pub enum Reply {
    Registered(&'static str),
    Rejected(StatusCode, &'static str),
    /// A body that is not JSON.
    Garbled(StatusCode),
}

#[derive(Debug)]
struct ServerState {
    reply: Reply,
    requests: Mutex<Vec<Value>>,
}

/// Serves `POST /api/auth/register` on an ephemeral port and records every body it receives.
pub struct FakeAuthServer {
    pub base_url: Url,
    state: Arc<ServerState>,
    server: JoinHandle<()>,
}

impl FakeAuthServer {
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeAuthServer {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub async fn spawn_auth_server(reply: Reply) -> Result<FakeAuthServer> {
    let state = Arc::new(ServerState {
        reply,
        requests: Mutex::default(),
    });

    let app = Router::new()
        .route("/api/auth/register", post(register))
        .with_state(state.clone());

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(FakeAuthServer {
        base_url: Url::parse(&format!("http://{addr}/api"))?,
        state,
        server,
    })
}

async fn register(State(state): State<Arc<ServerState>>, Json(body): Json<Value>) -> Response {
    state.requests.lock().unwrap().push(body);
    match state.reply {
        Reply::Registered(message) => response::success(StatusCode::CREATED, message),
        Reply::Rejected(code, error) => response::error(code, error),
        Reply::Garbled(code) => (code, "<html>Bad Gateway</html>").into_response(),
    }
}

mod response {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use serde_json::json;

    pub fn success(code: StatusCode, message: &str) -> Response {
        (
            code,
            Json(json! { {
                "message": message
            } }),
        )
            .into_response()
    }

    pub fn error(code: StatusCode, error: &str) -> Response {
        (
            code,
            Json(json! { {
                "error": error,
            } }),
        )
            .into_response()
    }
}
