use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

fn default_round_num() -> i32 {
    1
}

fn default_round_time() -> String {
    "0:00".to_string()
}

/// The `fight` part of a `POST /fights` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FightPayload {
    #[serde(default)]
    pub event_id: i32,
    #[serde(default)]
    pub fighter1_id: i32,
    #[serde(default)]
    pub fighter2_id: i32,
    #[serde(default = "default_round_num")]
    pub round_num: i32,
    #[serde(default = "default_round_time")]
    pub round_time: String,
    /// Winner's fighter id; null with a method is a draw, null without one is unknown.
    #[serde(default)]
    pub result: Option<i32>,
    #[serde(default)]
    pub method_of_vic: Option<i32>,
    #[serde(default)]
    pub weight_class: i32,
}

/// One fighter's counters for a single fight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterStatsPayload {
    #[serde(default)]
    pub kd: i32,
    #[serde(default)]
    pub strikes: i32,
    #[serde(default)]
    pub td: i32,
    #[serde(default)]
    pub sub: i32,
    #[serde(default)]
    pub fighter_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFightRequest {
    pub fight: FightPayload,
    pub stats1: FighterStatsPayload,
    pub stats2: FighterStatsPayload,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FightCreated {
    pub fight_id: i64,
}

/// A fights row without its weight class, returned by `GET /fights/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FightRecord {
    pub fight_id: i64,
    pub event_id: Option<i32>,
    pub fighter1_id: i32,
    pub fighter2_id: i32,
    pub result: Option<i32>,
    pub method_of_vic: Option<i32>,
    pub round_num: i32,
    pub round_time: Option<String>,
    pub stats1_id: i64,
    pub stats2_id: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FightSummaryRow {
    pub event_name: Option<String>,
    pub event_date: Option<NaiveDateTime>,
    pub weight_class: Option<String>,
    pub result: Option<i32>,
    pub method: Option<String>,
    pub round_num: i32,
    pub round_time: Option<String>,
    pub fighter1_id: i32,
    pub fighter1: String,
    pub fighter2_id: i32,
    pub fighter2: String,
    pub kd1: Option<i32>,
    pub kd2: Option<i32>,
    pub strikes1: Option<i32>,
    pub strikes2: Option<i32>,
    pub td1: Option<i32>,
    pub td2: Option<i32>,
    pub sub1: Option<i32>,
    pub sub2: Option<i32>,
}

/// Response of `GET /fights/{id}/summary`. Stat pairs read `fighter1-fighter2`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FightSummary {
    pub event_name: Option<String>,
    pub event_date: Option<NaiveDateTime>,
    pub fighter1: String,
    pub fighter2: String,
    pub weight_class: Option<String>,
    pub result: String,
    pub round: i32,
    pub round_time: Option<String>,
    pub kd: String,
    pub strikes: String,
    pub td: String,
    pub sub: String,
}

pub fn stat_pair(first: Option<i32>, second: Option<i32>) -> String {
    format!("{}-{}", first.unwrap_or(0), second.unwrap_or(0))
}
