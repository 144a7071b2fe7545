//! The authenticated request path.
//!
//! [`ApiClient::request`] is the one operation every screen-level caller
//! composes on: it reads the session token, attaches the bearer header,
//! toggles the busy indicator around the call, and normalizes every
//! outcome into [`ApiError`]. The typed product/order/inventory
//! operations in the sibling modules are thin wrappers over it.

use std::sync::Arc;

use reqwest::{Method, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::ports::{BusyGauge, BusyIndicator, Navigator, NoopPort, Notifier, Severity};
use crate::session::{MemorySessionStore, SessionStore};

mod auth;
mod inventory;
mod orders;
mod products;

/// Notification shown when a call is attempted without a session.
const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

/// Request body, selecting the wire encoding.
///
/// Replaces the original `isFormData` boolean: a JSON body is serialized
/// with an explicit `Content-Type: application/json`, a multipart body is
/// handed to the transport untouched so it can set its own boundary
/// header.
pub enum RequestBody {
    Json(Value),
    Multipart(reqwest::multipart::Form),
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Multipart(_) => f.debug_tuple("Multipart").finish_non_exhaustive(),
        }
    }
}

/// Session-aware API client.
///
/// Cheap to clone; all clones share the session store, the ports, and the
/// busy gauge. Concurrent calls are independent: no queuing, ordering, or
/// de-duplication across in-flight requests.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    busy: BusyGauge,
}

/// Error body the backend sends for logical failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Builder wiring a client to its session store and environment ports.
pub struct ApiClientBuilder {
    base_url: Url,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    busy_indicator: Arc<dyn BusyIndicator>,
}

impl ApiClientBuilder {
    /// Replace the default in-memory session store.
    #[must_use]
    pub fn session_store(mut self, store: impl SessionStore + 'static) -> Self {
        self.session = Arc::new(store);
        self
    }

    /// Shared session store (e.g. one store behind several clients).
    #[must_use]
    pub fn shared_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = store;
        self
    }

    /// Set the navigation port.
    #[must_use]
    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Arc::new(navigator);
        self
    }

    /// Set the notification port.
    #[must_use]
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Set the busy-indicator port.
    #[must_use]
    pub fn busy_indicator(mut self, indicator: impl BusyIndicator + 'static) -> Self {
        self.busy_indicator = Arc::new(indicator);
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> ApiClient {
        ApiClient {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base_url: self.base_url,
                session: self.session,
                navigator: self.navigator,
                notifier: self.notifier,
                busy: BusyGauge::new(self.busy_indicator),
            }),
        }
    }
}

impl ApiClient {
    /// Start building a client for the given API base URL.
    ///
    /// Defaults: in-memory session store, no-op ports.
    #[must_use]
    pub fn builder(base_url: Url) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url,
            session: Arc::new(MemorySessionStore::new()),
            navigator: Arc::new(NoopPort),
            notifier: Arc::new(NoopPort),
            busy_indicator: Arc::new(NoopPort),
        }
    }

    /// The API base URL this client targets.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Whether a session token is currently present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.session.get().is_some()
    }

    /// Perform one authenticated call against a base-relative endpoint.
    ///
    /// - Without a token: notifies, redirects to login, and returns
    ///   [`ApiError::Unauthenticated`] with no network activity.
    /// - 401/403: clears the token, redirects, returns `Unauthenticated`.
    /// - Other non-2xx: surfaces the backend `error` field (or the status
    ///   reason) as [`ApiError::RequestFailed`] plus an error notification.
    /// - Network or JSON-parse failure: [`ApiError::TransportFailure`]
    ///   plus an error notification.
    ///
    /// The busy indicator spans dispatch to resolution exactly once per
    /// call, whatever the outcome.
    ///
    /// # Errors
    ///
    /// See above; success is the parsed JSON response body, unchanged.
    #[tracing::instrument(skip(self, body), fields(%method, path))]
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<RequestBody>,
    ) -> Result<Value, ApiError> {
        let Some(token) = self.inner.session.get() else {
            self.inner.notifier.notify(Severity::Warning, SESSION_EXPIRED);
            self.inner.navigator.redirect_to_login();
            return Err(ApiError::Unauthenticated);
        };

        let _busy = self.inner.busy.enter();

        let mut builder = self
            .inner
            .http
            .request(method, self.endpoint(path))
            .bearer_auth(token.expose_secret());

        builder = match body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.transport_failure(e.to_string())),
        };

        self.interpret(response).await
    }

    /// [`Self::request`] plus deserialization of the success body.
    ///
    /// # Errors
    ///
    /// As [`Self::request`]; a body that does not match `T` is a
    /// [`ApiError::TransportFailure`].
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<RequestBody>,
    ) -> Result<T, ApiError> {
        let value = self.request(path, method, body).await?;
        serde_json::from_value(value)
            .map_err(|e| self.transport_failure(format!("unexpected response shape: {e}")))
    }

    /// Map a response to the caller-facing outcome, firing side effects.
    async fn interpret(&self, response: Response) -> Result<Value, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(status = %status, "session rejected by backend");
            self.inner.session.clear();
            self.inner.navigator.redirect_to_login();
            return Err(ApiError::Unauthenticated);
        }

        if !status.is_success() {
            let fallback = status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_string();
            let message = match response.json::<ErrorBody>().await {
                Ok(ErrorBody { error: Some(msg) }) => msg,
                _ => fallback,
            };
            self.inner.notifier.notify(Severity::Error, &message);
            return Err(ApiError::RequestFailed(message));
        }

        match response.json::<Value>().await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.transport_failure(e.to_string())),
        }
    }

    /// Notify and wrap a transport-level failure.
    fn transport_failure(&self, message: String) -> ApiError {
        tracing::error!(error = %message, "API request failed");
        self.inner.notifier.notify(Severity::Error, &message);
        ApiError::TransportFailure(message)
    }

    /// Absolute URL for a base-relative endpoint path.
    ///
    /// `Url` renders a host-only base with a trailing slash; trim it so the
    /// joined path never carries a double slash.
    fn endpoint(&self, path: &str) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }

    pub(crate) fn session(&self) -> &dyn SessionStore {
        self.inner.session.as_ref()
    }

    pub(crate) fn navigator(&self) -> &dyn Navigator {
        self.inner.navigator.as_ref()
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub(crate) fn busy(&self) -> &BusyGauge {
        &self.inner.busy
    }
}
