use std::fmt;
use serde::{Deserialize, Serialize};
use secrecy::SecretString;

use crate::error::ApiError;
use crate::models::common::{default_limit, validate_page};

/// Username and password, as sent to login, delete and prediction endpoints.
#[derive(Serialize, Deserialize)]
pub struct UserCredentials {
    pub username: String,
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub password: SecretString,
}

impl fmt::Display for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username: {}", self.username)
    }
}

/// Body of `POST /users`
#[derive(Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub username: String,
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub password: SecretString,
}

impl RegistrationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.trim().is_empty() {
            return Err(ApiError::bad_request("username cannot be empty"));
        }
        if secrecy::ExposeSecret::expose_secret(&self.password).is_empty() {
            return Err(ApiError::bad_request("password cannot be empty"));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
pub struct UpdateUsernameRequest {
    pub old_username: String,
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub password: SecretString,
    pub new_username: String,
}

#[derive(Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub username: String,
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub old_password: SecretString,
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub new_password: SecretString,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserIdResponse {
    pub user_id: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsernameResponse {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSummary {
    pub user_id: i32,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct UserSearchQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl UserSearchQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_page(self.limit, self.offset).map_err(ApiError::Unprocessable)
    }
}

pub fn serialize_secret_string<S>(_: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str("[REDACTED]")
}

pub fn deserialize_secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SecretString::new(s.into_boxed_str()))
}
