use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::fight_queries::FightQueries;
use crate::db::helpers::require_record;
use crate::error::ApiError;
use crate::fights::outcome::FightOutcome;
use crate::fights::validation::FightValidator;
use crate::models::fight::{stat_pair, CreateFightRequest, FightCreated, FightSummary};

#[tracing::instrument(name = "Fetching fight", skip(pool))]
pub async fn get_fight(fight_id: i64, pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let fight = require_record(
        FightQueries::new(pool.get_ref().clone()).find(fight_id).await,
        "fight was not found",
    )?;
    Ok(HttpResponse::Ok().json(fight))
}

#[tracing::instrument(name = "Fetching fight summary", skip(pool))]
pub async fn get_fight_summary(fight_id: i64, pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let row = require_record(
        FightQueries::new(pool.get_ref().clone()).find_summary(fight_id).await,
        "fight was not found",
    )?;

    let outcome = FightOutcome::new(row.result, row.method.as_deref());
    let result = outcome.describe(
        (row.fighter1_id, row.fighter1.as_str()),
        (row.fighter2_id, row.fighter2.as_str()),
    );

    Ok(HttpResponse::Ok().json(FightSummary {
        event_name: row.event_name,
        event_date: row.event_date,
        fighter1: row.fighter1.trim().to_string(),
        fighter2: row.fighter2.trim().to_string(),
        weight_class: row.weight_class,
        result,
        round: row.round_num,
        round_time: row.round_time,
        kd: stat_pair(row.kd1, row.kd2),
        strikes: stat_pair(row.strikes1, row.strikes2),
        td: stat_pair(row.td1, row.td2),
        sub: stat_pair(row.sub1, row.sub2),
    }))
}

/// Inserts both stats records and the fight in one transaction.
#[tracing::instrument(
    name = "Creating fight",
    skip(request, pool),
    fields(
        event_id = request.fight.event_id,
        fighter1_id = request.fight.fighter1_id,
        fighter2_id = request.fight.fighter2_id
    )
)]
pub async fn create_fight(
    request: web::Json<CreateFightRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    FightValidator::new().validate_create_fight_request(&request)?;

    let mut tx = pool.begin().await?;

    if !FightQueries::event_exists(&mut *tx, request.fight.event_id).await? {
        return Err(ApiError::not_found("event not found"));
    }
    let fighter_ids = [request.fight.fighter1_id, request.fight.fighter2_id];
    if FightQueries::count_fighters(&mut *tx, &fighter_ids).await? != 2 {
        return Err(ApiError::not_found("a given fighter_id was not found"));
    }

    let stats1_id = FightQueries::insert_stats(&mut *tx, &request.stats1).await?;
    let stats2_id = FightQueries::insert_stats(&mut *tx, &request.stats2).await?;
    let fight_id = FightQueries::insert_fight(&mut *tx, &request.fight, stats1_id, stats2_id).await?;

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(FightCreated { fight_id }))
}
