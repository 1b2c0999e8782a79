//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests with
//! a session cookie, and stubbing the AI upstream.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{Json, Router};
use guild_api::{create_app, create_app_state};
use guild_common::{AppConfig, RateLimitConfig};
use reqwest::{header, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Name of the session cookie issued by the server
pub const SESSION_COOKIE: &str = "sessionId";

/// Guide text returned by [`UpstreamStub`]
pub const STUB_GUIDE: &str = "**Estrategia general**: mantente cerca del grupo.";

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with in-memory backends
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request carrying a session
    pub async fn get_session(&self, path: &str, session: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header(header::COOKIE, cookie_header(session))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request carrying a session
    pub async fn post_session<T: Serialize>(
        &self,
        path: &str,
        session: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header(header::COOKIE, cookie_header(session))
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request carrying a session
    pub async fn patch_session<T: Serialize>(
        &self,
        path: &str,
        session: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .header(header::COOKIE, cookie_header(session))
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request carrying a session
    pub async fn delete_session(&self, path: &str, session: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .header(header::COOKIE, cookie_header(session))
            .send()
            .await?)
    }

    /// Sign in through the admin test shortcut and return the session id
    pub async fn admin_session(&self) -> Result<String> {
        let response = self
            .client
            .post(self.url("/api/auth/login-admin-test"))
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            anyhow::bail!("admin test login failed with {status}");
        }
        session_from(&response).ok_or_else(|| anyhow::anyhow!("no session cookie issued"))
    }
}

fn cookie_header(session: &str) -> String {
    format!("{SESSION_COOKIE}={session}")
}

/// Session id from a response's `Set-Cookie` headers, if one was issued
pub fn session_from(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// In-memory configuration with a rate limit tests never reach
pub fn test_config() -> Result<AppConfig> {
    let mut config = AppConfig::in_memory().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    config.rate_limit = RateLimitConfig {
        requests_per_second: 1000,
        burst: 1000,
    };
    Ok(config)
}

/// Local stand-in for the text generation API
///
/// Answers every request with [`STUB_GUIDE`] and counts the calls.
/// A delayed stub sleeps before answering, to exercise client timeouts.
pub struct UpstreamStub {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    _handle: JoinHandle<()>,
}

impl UpstreamStub {
    pub async fn start() -> Result<Self> {
        Self::start_delayed(Duration::ZERO).await
    }

    pub async fn start_delayed(delay: Duration) -> Result<Self> {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let app = Router::new().fallback(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                Json(json!({
                    "candidates": [{ "content": { "parts": [{ "text": STUB_GUIDE }] } }]
                }))
            }
        });

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], get_test_port()))).await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            calls,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
