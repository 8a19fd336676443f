use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::user::UserCredentials;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionPayload {
    pub fight_id: i64,
    /// The fighter predicted to win. Draws cannot be predicted.
    pub fighter_id: i32,
}

/// Body of `POST /predictions/add`
#[derive(Serialize, Deserialize)]
pub struct AddPredictionRequest {
    pub user: UserCredentials,
    pub prediction: PredictionPayload,
}

#[derive(Debug, Deserialize)]
pub struct PredictionCountQuery {
    pub fight_id: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FightParticipantsRow {
    pub fighter1_id: i32,
    pub fighter1: String,
    pub fighter2_id: i32,
    pub fighter2: String,
    pub result: Option<i32>,
    pub method: Option<String>,
}

#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct PredictionTallyRow {
    pub fighter1_count: i64,
    pub fighter2_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PredictionTargetRow {
    pub fight_id: i64,
    pub event_date: Option<NaiveDateTime>,
}

/// Response of both prediction endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionCounts {
    pub fighter1: String,
    pub fighter1_count: i64,
    pub fighter2: String,
    pub fighter2_count: i64,
    /// Winner's name, "Draw" or "Unknown"
    pub result: String,
}
