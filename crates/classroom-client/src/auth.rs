//! Account signup and login.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ClientError;
use crate::http::ApiClient;

/// Body of `POST /user`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub profile_name: String,
    pub email: String,
    pub phone: String,
    /// Account type, e.g. `teacher`, `student` or `parent`.
    #[serde(rename = "type")]
    pub account_type: String,
    pub password: String,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("account_type", &self.account_type)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// The logged-in account and its bearer token.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub username: String,
    #[serde(default)]
    pub profile_name: String,
    #[serde(default)]
    pub freemium: bool,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub account_type: String,
    pub token: String,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("username", &self.username)
            .field("account_type", &self.account_type)
            .field("freemium", &self.freemium)
            .field("token", &"***")
            .finish()
    }
}

impl ApiClient {
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ClientError> {
        let builder = self.http().post(self.url("/user")).json(request);
        let response = self.send(builder, "signup endpoint").await?;
        let account: AuthResponse = Self::decode(response).await?;
        info!(username = %account.username, "account created");
        Ok(account)
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let builder = self
            .http()
            .post(self.url("/auth"))
            .json(&LoginRequest { email, password });
        let response = self.send(builder, "login endpoint").await?;
        let account: AuthResponse = Self::decode(response).await?;
        info!(username = %account.username, "logged in");
        Ok(account)
    }
}
