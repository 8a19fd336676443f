use chrono::NaiveDateTime;

use crate::error::ApiError;
use crate::models::fight::{CreateFightRequest, FighterStatsPayload};

pub const MAX_ROUND_SECONDS: u32 = 5 * 60;
pub const ROUNDS: std::ops::RangeInclusive<i32> = 1..=5;
/// 1 SUB, 2 KO/TKO, 3 S-Dec, 4 M-Dec, 5 U-Dec, 6 CNC, 7 DQ
pub const VICTORY_METHODS: std::ops::RangeInclusive<i32> = 1..=7;
/// 1 Flyweight through 14 Open Weight
pub const WEIGHT_CLASSES: std::ops::RangeInclusive<i32> = 1..=14;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundTimeError {
    #[error("round_time not in M:S format")]
    Malformed,
    #[error("given round_time too large")]
    TooLong,
}

/// Parses `M:SS` (one or two digit fields) into seconds elapsed in the round.
/// Minutes run 0-59 and seconds 0-61; the total may not exceed 5:00.
pub fn parse_round_time(round_time: &str) -> Result<u32, RoundTimeError> {
    let (minutes, seconds) = round_time.split_once(':').ok_or(RoundTimeError::Malformed)?;
    let minutes = parse_time_field(minutes, 59)?;
    let seconds = parse_time_field(seconds, 61)?;

    let total = minutes * 60 + seconds;
    if total > MAX_ROUND_SECONDS {
        return Err(RoundTimeError::TooLong);
    }
    Ok(total)
}

fn parse_time_field(field: &str, max: u32) -> Result<u32, RoundTimeError> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RoundTimeError::Malformed);
    }
    let value: u32 = field.parse().map_err(|_| RoundTimeError::Malformed)?;
    if value > max {
        return Err(RoundTimeError::Malformed);
    }
    Ok(value)
}

/// Predictions close once less than one whole day remains before the event.
pub fn prediction_window_open(event_date: NaiveDateTime, now: NaiveDateTime) -> bool {
    (event_date - now).num_days() >= 1
}

/// Checks a new fight before anything touches the database
pub struct FightValidator;

impl FightValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_create_fight_request(&self, request: &CreateFightRequest) -> Result<(), ApiError> {
        let fight = &request.fight;

        if fight.fighter1_id == fight.fighter2_id {
            return Err(ApiError::conflict("fighter1_id and fighter2_id must be different"));
        }
        if request.stats1.fighter_id != fight.fighter1_id {
            return Err(ApiError::bad_request(
                "fighter1_id must correspond with fighter_id given in stats1",
            ));
        }
        if request.stats2.fighter_id != fight.fighter2_id {
            return Err(ApiError::bad_request(
                "fighter2_id must correspond with fighter_id given in stats2",
            ));
        }

        if !ROUNDS.contains(&fight.round_num) {
            return Err(ApiError::bad_request("round_num must be between 1 and 5"));
        }
        if let Some(method) = fight.method_of_vic {
            if !VICTORY_METHODS.contains(&method) {
                return Err(ApiError::bad_request("method_of_vic must be null or between 1 and 7"));
            }
        }
        if !WEIGHT_CLASSES.contains(&fight.weight_class) {
            return Err(ApiError::bad_request("weight_class must be between 1 and 14"));
        }
        self.validate_stats(&request.stats1)?;
        self.validate_stats(&request.stats2)?;

        parse_round_time(&fight.round_time).map_err(|e| ApiError::bad_request(e.to_string()))?;

        if let Some(winner) = fight.result {
            if winner != fight.fighter1_id && winner != fight.fighter2_id {
                return Err(ApiError::bad_request(
                    "result must be null or either the id of one of the fighters",
                ));
            }
        }

        Ok(())
    }

    pub fn validate_stats(&self, stats: &FighterStatsPayload) -> Result<(), ApiError> {
        if stats.kd < 0 || stats.strikes < 0 || stats.td < 0 || stats.sub < 0 {
            return Err(ApiError::bad_request("fighter stats cannot be negative"));
        }
        Ok(())
    }
}

impl Default for FightValidator {
    fn default() -> Self {
        Self::new()
    }
}
