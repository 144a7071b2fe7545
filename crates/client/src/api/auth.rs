//! Session lifecycle: login and logout.
//!
//! Login is the one unauthenticated call the client makes; it trades
//! credentials for the bearer token every other operation sends.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use neszi_core::Email;

use crate::error::ApiError;
use crate::ports::Severity;

use super::{ApiClient, ErrorBody};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

impl ApiClient {
    /// Exchange credentials for a session token.
    ///
    /// On success the token is stored in the session store and a success
    /// notification fires. A rejected login surfaces the backend's
    /// `error` field; the existing token (if any) is left untouched.
    ///
    /// # Errors
    ///
    /// [`ApiError::RequestFailed`] for rejected credentials,
    /// [`ApiError::TransportFailure`] for network/parse failures.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &SecretString) -> Result<(), ApiError> {
        let _busy = self.busy().enter();

        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };

        let response = self
            .http()
            .post(self.endpoint("/login"))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.login_failed(&e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let fallback = status
                .canonical_reason()
                .unwrap_or("login rejected")
                .to_string();
            let message = match response.json::<ErrorBody>().await {
                Ok(ErrorBody { error: Some(msg) }) => msg,
                _ => fallback,
            };
            self.login_failed(&message);
            return Err(ApiError::RequestFailed(message));
        }

        let LoginResponse { token } = response
            .json()
            .await
            .map_err(|e| self.login_failed(&e.to_string()))?;

        self.session().set(SecretString::from(token));
        self.notifier().notify(Severity::Success, "Login successful!");
        tracing::info!("logged in");
        Ok(())
    }

    /// Destroy the session and send the user to the login entry point.
    pub fn logout(&self) {
        self.session().clear();
        self.navigator().redirect_to_login();
        tracing::info!("logged out");
    }

    fn login_failed(&self, message: &str) -> ApiError {
        self.notifier()
            .notify(Severity::Error, &format!("Login failed: {message}"));
        ApiError::TransportFailure(message.to_string())
    }
}
