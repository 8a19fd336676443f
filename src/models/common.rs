use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MessageResponse {
    pub message: String,
}

/// Acknowledgement for account mutations, e.g. `{"result": "update successful"}`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OperationResult {
    pub result: String,
}

impl OperationResult {
    pub fn new(result: impl Into<String>) -> Self {
        Self { result: result.into() }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthStatus {
    pub status: String,
}

/// A fight's result seen from one participant's side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
    /// No winner and no method, usually an overturned result.
    Unknown,
}

impl Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub fn default_limit() -> i64 {
    50
}

pub const MAX_PAGE_LIMIT: i64 = 250;

/// Checks `limit`/`offset` against the accepted page window.
pub fn validate_page(limit: i64, offset: i64) -> Result<(), String> {
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(format!("limit must be between 1 and {}", MAX_PAGE_LIMIT));
    }
    if offset < 0 {
        return Err("offset must be greater than or equal to 0".to_string());
    }
    Ok(())
}
