//! Request dispatch: path selection, credential attachment, classification.

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::token::TokenSource;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Versioned prefix every canonical API path starts with.
pub const API_PREFIX: &str = "/v1";
/// Prefix of the isolated demo data partition.
pub const DEMO_API_PREFIX: &str = "/demo";
/// Header the demo backend trusts as the effective role.
pub const DEMO_ROLE_HEADER: &str = "x-demo-role";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Demo mode sends `/v1/...` paths to the demo partition by replacing the
/// exact `/v1` prefix with `/demo`; everything else passes through
/// unchanged. Call sites never know which partition they hit.
pub fn rewrite_path<'a>(path: &'a str, ctx: &RequestContext) -> Cow<'a, str> {
    if ctx.is_demo() {
        if let Some(rest) = path.strip_prefix(API_PREFIX) {
            return Cow::Owned(format!("{DEMO_API_PREFIX}{rest}"));
        }
    }
    Cow::Borrowed(path)
}

/// Request body variants. JSON bodies get a content-type default; multipart
/// bodies must leave content-type to the transport so the boundary is set
/// correctly.
#[derive(Default)]
pub enum Body {
    #[default]
    Empty,
    Json(String),
    Multipart(reqwest::multipart::Form),
}

/// Options bag for one call.
#[derive(Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    /// Header overrides, applied last.
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl RequestOptions {
    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn json<T: serde::Serialize>(payload: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(payload).map_err(ApiError::Encode)?;
        Ok(Self {
            body: Body::Json(body),
            ..Self::default()
        })
    }

    pub fn multipart(form: reqwest::multipart::Form) -> Self {
        Self {
            body: Body::Multipart(form),
            ..Self::default()
        }
    }
}

/// The mode-aware API client. One instance per console; cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Option<Arc<dyn TokenSource>>,
}

impl ApiClient {
    /// Build a client for the given API origin (scheme + authority, no
    /// trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        // Validate the origin up front so per-call URL errors can only
        // come from the path.
        Url::parse(&base_url)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            http,
            base_url,
            tokens: None,
        })
    }

    /// Attach the live-mode token source.
    pub fn with_token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Dispatch a call and parse the JSON response.
    pub async fn request<T>(
        &self,
        ctx: &RequestContext,
        method: Method,
        path: &str,
        opts: RequestOptions,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        self.request_with_status(ctx, method, path, opts)
            .await
            .map(|(_, value)| value)
    }

    /// Like [`request`](Self::request) but also returns the numeric status,
    /// for callers that must tell e.g. "created" from "already existed".
    pub async fn request_with_status<T>(
        &self,
        ctx: &RequestContext,
        method: Method,
        path: &str,
        opts: RequestOptions,
    ) -> Result<(u16, T), ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let dispatch_path = rewrite_path(path, ctx);
        let url = Url::parse(&format!("{}{}", self.base_url, dispatch_path))?;
        debug!(method = %method, path = %dispatch_path, mode = ?ctx.mode(), "dispatching api request");

        let mut req = self.http.request(method, url);
        if !opts.query.is_empty() {
            req = req.query(&opts.query);
        }

        // Credential strategy follows the session mode.
        match ctx {
            RequestContext::Demo { role } => {
                req = req.header(DEMO_ROLE_HEADER, role.as_str());
            }
            RequestContext::Live => {
                if let Some(tokens) = &self.tokens {
                    let token = tokens.bearer_token().await.map_err(ApiError::Token)?;
                    req = req.header(AUTHORIZATION, format!("Bearer {token}"));
                }
            }
        }

        let has_content_type = opts
            .headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
        match opts.body {
            Body::Empty => {}
            Body::Json(body) => {
                if !has_content_type {
                    req = req.header(CONTENT_TYPE, "application/json");
                }
                req = req.body(body);
            }
            Body::Multipart(form) => {
                req = req.multipart(form);
            }
        }
        for (name, value) in &opts.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        let response = req.send().await.map_err(ApiError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok((status.as_u16(), T::default()));
        }
        let text = response.text().await.map_err(ApiError::Transport)?;
        if text.is_empty() {
            return Ok((status.as_u16(), T::default()));
        }
        let value = serde_json::from_str(&text).map_err(ApiError::Decode)?;
        Ok((status.as_u16(), value))
    }
}
