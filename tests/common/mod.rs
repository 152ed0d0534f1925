//! A canned HTTP responder standing in for the GitHub API in tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, USER_AGENT};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;

/// A response served for one request target (path plus query).
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Canned {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: body.into(),
        }
    }

    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: vec![("Content-Type".into(), "text/plain".into())],
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// What the responder saw.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub target: String,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
struct ServerState {
    routes: Arc<HashMap<String, Canned>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct CannedServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl CannedServer {
    /// Serve `routes` on an ephemeral local port. Unknown targets get a 404.
    pub fn start(routes: Vec<(&str, Canned)>) -> Self {
        // Keep test traffic away from any proxy configured in the environment
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        std::env::set_var("no_proxy", "127.0.0.1,localhost");

        let state = ServerState {
            routes: Arc::new(
                routes
                    .into_iter()
                    .map(|(target, canned)| (target.to_string(), canned))
                    .collect(),
            ),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let requests = Arc::clone(&state.requests);
        let app = Router::new().fallback(respond).with_state(state);

        // The server gets its own runtime so blocking tests can use it too
        let (addr_tx, addr_rx) = mpsc::channel();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                addr_tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });
        let addr = addr_rx.recv().unwrap();

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// A config file body pointing both API hosts at this server.
    pub fn config_toml(&self) -> String {
        format!(
            "[github]\napi_url = \"{url}\"\nraw_url = \"{url}/raw\"\ntimeout_secs = 5\n\n[export]\nprogress = false\n",
            url = self.base_url
        )
    }
}

async fn respond(State(state): State<ServerState>, uri: Uri, headers: HeaderMap) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(Recorded {
        target: target.clone(),
        authorization: header(AUTHORIZATION),
        user_agent: header(USER_AGENT),
    });

    let canned = state
        .routes
        .get(&target)
        .cloned()
        .unwrap_or_else(|| Canned::json(404, r#"{"message": "Not Found"}"#));

    let status = StatusCode::from_u16(canned.status).unwrap();
    let mut response = (status, canned.body).into_response();
    for (name, value) in &canned.headers {
        response.headers_mut().insert(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
    }
    response
}

/// Tree listing body for `paths`; entries ending in `/` are folders.
pub fn tree_body(paths: &[&str], truncated: bool) -> String {
    let items: Vec<String> = paths
        .iter()
        .map(|p| match p.strip_suffix('/') {
            Some(folder) => format!(
                r#"{{"path": "{}", "mode": "040000", "type": "tree", "sha": "t", "url": "u"}}"#,
                folder
            ),
            None => format!(
                r#"{{"path": "{}", "mode": "100644", "type": "blob", "sha": "b", "size": 10, "url": "u"}}"#,
                p
            ),
        })
        .collect();

    format!(
        r#"{{"sha": "root", "url": "u", "tree": [{}], "truncated": {}}}"#,
        items.join(", "),
        truncated
    )
}
