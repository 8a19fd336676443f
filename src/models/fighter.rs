use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;
use crate::models::common::{default_limit, validate_page};

pub const MAX_BODY_MEASURE: i32 = 999;
pub const MAX_RECORD_COUNT: i64 = 9999;
/// stance ids: 1 = Orthodox, 2 = Southpaw, 3 = Switch
pub const STANCE_IDS: std::ops::RangeInclusive<i32> = 1..=3;

/// Body of `POST /fighters`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub reach: i32,
    #[serde(default)]
    pub stance_id: Option<i32>,
}

impl FighterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(stance_id) = self.stance_id {
            if !STANCE_IDS.contains(&stance_id) {
                return Err(ApiError::bad_request("improper stance given"));
            }
        }
        if !(0..=MAX_BODY_MEASURE).contains(&self.height) {
            return Err(ApiError::bad_request("improper height given"));
        }
        if !(0..=MAX_BODY_MEASURE).contains(&self.reach) {
            return Err(ApiError::bad_request("improper reach given"));
        }
        Ok(())
    }
}

/// A fighter row as stored, also the response of `PUT /fighters/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FighterRecord {
    pub first_name: String,
    pub last_name: String,
    pub height: i32,
    pub reach: i32,
    pub stance_id: Option<i32>,
}

impl From<FighterRequest> for FighterRecord {
    fn from(request: FighterRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            height: request.height,
            reach: request.reach,
            stance_id: request.stance_id,
        }
    }
}

/// Body of `PUT /fighters/{id}`. Absent fields keep their stored value;
/// an explicit `"stance_id": null` clears the stance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FighterUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub height: Option<i32>,
    pub reach: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub stance_id: Option<Option<i32>>,
}

// Distinguishes `"field": null` (Some(None)) from a missing field (None).
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl FighterUpdateRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(Some(stance_id)) = self.stance_id {
            if !STANCE_IDS.contains(&stance_id) {
                return Err(ApiError::bad_request(
                    "stance_id must be between 1 and 3 or left as null",
                ));
            }
        }
        if let Some(height) = self.height {
            if !(0..=MAX_BODY_MEASURE).contains(&height) {
                return Err(ApiError::bad_request("improper height given"));
            }
        }
        if let Some(reach) = self.reach {
            if !(0..=MAX_BODY_MEASURE).contains(&reach) {
                return Err(ApiError::bad_request("improper reach given"));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.height.is_none()
            && self.reach.is_none()
            && self.stance_id.is_none()
    }

    /// The record that results from applying this update on top of `stored`.
    pub fn apply(&self, stored: &FighterRecord) -> FighterRecord {
        FighterRecord {
            first_name: self.first_name.clone().unwrap_or_else(|| stored.first_name.clone()),
            last_name: self.last_name.clone().unwrap_or_else(|| stored.last_name.clone()),
            height: self.height.unwrap_or(stored.height),
            reach: self.reach.unwrap_or(stored.reach),
            stance_id: self.stance_id.unwrap_or(stored.stance_id),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FighterCreated {
    pub fighter_id: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FighterSort {
    #[default]
    Name,
    Height,
    Reach,
}

impl FighterSort {
    pub fn column(&self) -> &'static str {
        match self {
            FighterSort::Name => "name",
            FighterSort::Height => "height",
            FighterSort::Reach => "reach",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

fn default_measure_max() -> i32 {
    MAX_BODY_MEASURE
}

fn default_count_max() -> i64 {
    MAX_RECORD_COUNT
}

/// Query string of `GET /fighters`. String filters are case-insensitive substrings and
/// match everything when empty; numeric ranges are inclusive.
#[derive(Debug, Clone, Deserialize)]
pub struct FighterListQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stance: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub weight_class: String,
    #[serde(default)]
    pub height_min: i32,
    #[serde(default = "default_measure_max")]
    pub height_max: i32,
    #[serde(default)]
    pub reach_min: i32,
    #[serde(default = "default_measure_max")]
    pub reach_max: i32,
    #[serde(default)]
    pub wins_min: i64,
    #[serde(default = "default_count_max")]
    pub wins_max: i64,
    #[serde(default)]
    pub losses_min: i64,
    #[serde(default = "default_count_max")]
    pub losses_max: i64,
    #[serde(default)]
    pub draws_min: i64,
    #[serde(default = "default_count_max")]
    pub draws_max: i64,
    #[serde(default)]
    pub sort: FighterSort,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl Default for FighterListQuery {
    fn default() -> Self {
        Self {
            name: String::new(),
            stance: String::new(),
            event: String::new(),
            weight_class: String::new(),
            height_min: 0,
            height_max: MAX_BODY_MEASURE,
            reach_min: 0,
            reach_max: MAX_BODY_MEASURE,
            wins_min: 0,
            wins_max: MAX_RECORD_COUNT,
            losses_min: 0,
            losses_max: MAX_RECORD_COUNT,
            draws_min: 0,
            draws_max: MAX_RECORD_COUNT,
            sort: FighterSort::default(),
            order: SortOrder::default(),
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl FighterListQuery {
    /// Rejects out-of-domain values (422) before inverted ranges (403), so no query
    /// runs for a request that cannot match anything.
    pub fn validate(&self) -> Result<(), ApiError> {
        let measures = [
            ("height_min", self.height_min),
            ("height_max", self.height_max),
            ("reach_min", self.reach_min),
            ("reach_max", self.reach_max),
        ];
        for (field, value) in measures {
            if !(0..=MAX_BODY_MEASURE).contains(&value) {
                return Err(ApiError::Unprocessable(format!(
                    "{} must be between 0 and {}",
                    field, MAX_BODY_MEASURE
                )));
            }
        }

        let counts = [
            ("wins_min", self.wins_min),
            ("wins_max", self.wins_max),
            ("losses_min", self.losses_min),
            ("losses_max", self.losses_max),
            ("draws_min", self.draws_min),
            ("draws_max", self.draws_max),
        ];
        for (field, value) in counts {
            if !(0..=MAX_RECORD_COUNT).contains(&value) {
                return Err(ApiError::Unprocessable(format!(
                    "{} must be between 0 and {}",
                    field, MAX_RECORD_COUNT
                )));
            }
        }

        validate_page(self.limit, self.offset).map_err(ApiError::Unprocessable)?;

        let ranges = [
            ("height", i64::from(self.height_min), i64::from(self.height_max)),
            ("reach", i64::from(self.reach_min), i64::from(self.reach_max)),
            ("wins", self.wins_min, self.wins_max),
            ("losses", self.losses_min, self.losses_max),
            ("draws", self.draws_min, self.draws_max),
        ];
        for (field, min, max) in ranges {
            if min > max {
                return Err(ApiError::RangeInverted(format!(
                    "{}_min greater than {}_max",
                    field, field
                )));
            }
        }

        Ok(())
    }
}

/// One fighter of the aggregation query, before shaping.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FighterSummaryRow {
    pub fighter_id: i32,
    pub name: String,
    pub height: i32,
    pub reach: i32,
    pub stance: Option<String>,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FighterListItem {
    pub fighter_id: i32,
    pub name: String,
    pub height: i32,
    pub reach: i32,
    pub stance: Option<String>,
    #[serde(rename = "W/D/L")]
    pub record: String,
}

impl From<FighterSummaryRow> for FighterListItem {
    fn from(row: FighterSummaryRow) -> Self {
        Self {
            fighter_id: row.fighter_id,
            name: row.name.trim().to_string(),
            height: row.height,
            reach: row.reach,
            stance: row.stance,
            record: format!("{}/{}/{}", row.wins, row.draws, row.losses),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FighterDetailRow {
    pub fighter_id: i32,
    pub name: String,
    pub height: i32,
    pub reach: i32,
    pub stance: Option<String>,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecentFightRow {
    pub fight_id: i64,
    pub event_name: Option<String>,
    pub opponent_id: i32,
    pub opponent_name: String,
    pub result: Option<i32>,
    pub method: Option<String>,
    pub weight: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentFight {
    pub fight_id: i64,
    pub event: Option<String>,
    pub opponent_id: i32,
    pub opponent_name: String,
    pub result: String,
}

/// Response of `GET /fighters/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FighterDetail {
    pub fighter_id: i32,
    pub name: String,
    pub height: i32,
    pub reach: i32,
    pub stance: Option<String>,
    /// Weight class of the most recent fight
    pub weight: Option<String>,
    pub wins: i64,
    pub losses: i64,
    pub draws: i64,
    pub recent_fights: Vec<RecentFight>,
}
