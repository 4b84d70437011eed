// Admin API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token injection
// and `{ success, data }` envelope unwrapping. Endpoint groups (shops,
// users, subscriptions, ...) are inherent methods in separate files so
// this module stays focused on transport mechanics.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::{Envelope, ErrorBody};
use crate::session::SessionStore;
use crate::transport::TransportConfig;

const FALLBACK_MESSAGE: &str = "Request failed";

/// Per-call options for [`AdminClient::request`].
///
/// Headers set here win over the defaults (`Content-Type`,
/// `Authorization`).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Add or replace a header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client for the YeboMart admin REST API.
///
/// Cheap to clone: the connection pool and session are shared. Every
/// method returns the unwrapped `data` payload; a success response without
/// `data` comes back as `Ok(None)`.
#[derive(Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl AdminClient {
    /// Create a client whose HTTP stack is built from `transport`.
    pub fn new(
        base_url: Url,
        session: Arc<SessionStore>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, session))
    }

    /// Create a client from a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, session: Arc<SessionStore>) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    // ── URL helpers ──────────────────────────────────────────────────

    /// Join an endpoint (path plus optional query) onto the base URL.
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{endpoint}"))?)
    }

    fn default_headers(&self, overrides: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("stored token is not a valid header value; sending unauthenticated"),
            }
        }

        for (name, value) in overrides {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    // ── Generic request ─────────────────────────────────────────────

    /// Issue a request against the admin API.
    ///
    /// Non-2xx statuses become [`Error::Api`] carrying the server's
    /// `message` (or `"Request failed"`); transport failures become
    /// [`Error::Network`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Option<T>, Error> {
        let url = self.endpoint_url(endpoint)?;
        debug!("{method} {url}");

        let mut builder = self
            .http
            .request(method, url)
            .headers(self.default_headers(&options.headers));
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let resp = builder.send().await?;
        Self::parse_envelope(resp).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Option<T>, Error> {
        self.request(Method::GET, endpoint, RequestOptions::new()).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Option<T>, Error> {
        self.request(Method::POST, endpoint, RequestOptions::new().json(body)?)
            .await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Option<T>, Error> {
        self.request(Method::PUT, endpoint, RequestOptions::new().json(body)?)
            .await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Option<T>, Error> {
        self.request(Method::DELETE, endpoint, RequestOptions::new())
            .await
    }

    // ── Envelope parsing ─────────────────────────────────────────────

    /// Unwrap `{ success, data }`, or map a failure body to
    /// [`Error::Api`]. `success: false` on a 2xx is treated as a rejection.
    async fn parse_envelope<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned());
            debug!(status = status.as_u16(), %message, "request rejected");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        if envelope.success == Some(false) {
            return Err(Error::Api {
                status: status.as_u16(),
                message: envelope
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned()),
            });
        }

        Ok(envelope.data)
    }
}

/// Percent-encode a single path segment (entity ids).
pub(crate) fn path_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
