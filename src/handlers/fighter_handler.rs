use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::fighter_queries::FighterQueries;
use crate::db::helpers::{ensure_not_exists, require_record};
use crate::error::ApiError;
use crate::fights::outcome::FightOutcome;
use crate::models::fighter::{
    FighterCreated, FighterDetail, FighterListItem, FighterListQuery, FighterRecord, FighterRequest,
    FighterUpdateRequest, RecentFight,
};

const RECENT_FIGHTS_SHOWN: i64 = 5;
const DUPLICATE_FIGHTER: &str = "duplicate data given";

#[tracing::instrument(name = "Listing fighters", skip(pool))]
pub async fn list_fighters(
    query: web::Query<FighterListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.into_inner();
    filter.validate()?;

    let rows = FighterQueries::new(pool.get_ref().clone()).list(&filter).await?;
    let fighters: Vec<FighterListItem> = rows.into_iter().map(FighterListItem::from).collect();

    Ok(HttpResponse::Ok().json(fighters))
}

#[tracing::instrument(name = "Fetching fighter", skip(pool))]
pub async fn get_fighter(fighter_id: i64, pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let queries = FighterQueries::new(pool.get_ref().clone());

    let fighter = require_record(queries.find_detail(fighter_id).await, "fighter not found")?;
    let recent = queries.recent_fights(fighter_id, RECENT_FIGHTS_SHOWN).await?;

    let weight = recent.first().and_then(|fight| fight.weight.clone());
    let recent_fights = recent
        .into_iter()
        .map(|fight| {
            let outcome = FightOutcome::new(fight.result, fight.method.as_deref());
            RecentFight {
                fight_id: fight.fight_id,
                event: fight.event_name,
                opponent_id: fight.opponent_id,
                opponent_name: fight.opponent_name.trim().to_string(),
                result: outcome.describe_for_fighter(fighter.fighter_id),
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(FighterDetail {
        fighter_id: fighter.fighter_id,
        name: fighter.name.trim().to_string(),
        height: fighter.height,
        reach: fighter.reach,
        stance: fighter.stance,
        weight,
        wins: fighter.wins,
        losses: fighter.losses,
        draws: fighter.draws,
        recent_fights,
    }))
}

#[tracing::instrument(
    name = "Creating fighter",
    skip(fighter, pool),
    fields(first_name = %fighter.first_name, last_name = %fighter.last_name)
)]
pub async fn create_fighter(
    fighter: web::Json<FighterRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let fighter = fighter.into_inner();
    fighter.validate()?;
    let record = FighterRecord::from(fighter);

    let mut tx = pool.begin().await?;

    ensure_not_exists(
        FighterQueries::find_duplicate(&mut *tx, &record, None).await,
        DUPLICATE_FIGHTER,
    )?;
    let fighter_id = FighterQueries::insert(&mut *tx, &record).await?;

    tx.commit().await?;
    tracing::info!("Created fighter {}", fighter_id);

    Ok(HttpResponse::Ok().json(FighterCreated { fighter_id }))
}

#[tracing::instrument(name = "Updating fighter", skip(update, pool))]
pub async fn update_fighter(
    fighter_id: i64,
    update: web::Json<FighterUpdateRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let update = update.into_inner();
    update.validate()?;

    let mut tx = pool.begin().await?;

    let stored = require_record(
        FighterQueries::find_record_for_update(&mut *tx, fighter_id).await,
        "fighter not found",
    )?;
    if update.is_empty() {
        return Ok(HttpResponse::Ok().json(stored));
    }

    let updated = update.apply(&stored);
    ensure_not_exists(
        FighterQueries::find_duplicate(&mut *tx, &updated, Some(fighter_id)).await,
        DUPLICATE_FIGHTER,
    )?;
    let record = FighterQueries::update(&mut *tx, fighter_id, &update).await?;

    tx.commit().await?;
    tracing::info!("Updated fighter {}", fighter_id);

    Ok(HttpResponse::Ok().json(record))
}
