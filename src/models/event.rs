use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Body of `POST /events`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    pub event_name: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub event_date: String,
    pub venue_id: i32,
    #[serde(default)]
    pub attendance: Option<i32>,
}

impl EventRequest {
    /// Validates the request and returns the parsed event date.
    pub fn validate(&self) -> Result<NaiveDate, ApiError> {
        if self.event_name.is_empty() {
            return Err(ApiError::bad_request("event_name cannot be null"));
        }
        if self.event_date.is_empty() {
            return Err(ApiError::bad_request("event_date cannot be null"));
        }
        NaiveDate::parse_from_str(&self.event_date, "%Y-%m-%d")
            .map_err(|_| ApiError::bad_request("improper event_date given"))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventCreated {
    pub event_id: i32,
}

/// Response of `GET /events/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventDetail {
    pub event_name: Option<String>,
    pub event_date: Option<NaiveDateTime>,
    pub venue: Option<String>,
    pub attendance: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct EventSearchQuery {
    pub event_name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventFightRow {
    pub fight_id: i64,
    pub fighter1: String,
    pub fighter1_id: i32,
    pub fighter2: String,
    pub fighter2_id: i32,
    pub method: Option<String>,
    pub result: Option<i32>,
    pub event_name: Option<String>,
    pub event_id: i32,
    pub event_date: Option<NaiveDate>,
    pub venue_name: Option<String>,
}

/// One entry of `GET /events?event_name=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFight {
    pub fight_id: i64,
    pub fighter1: String,
    pub fighter2: String,
    pub result: String,
    pub event_name: Option<String>,
    pub event_id: i32,
    pub event_date: Option<NaiveDate>,
    pub venue: Option<String>,
}
