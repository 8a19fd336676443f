use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::event_queries::EventQueries;
use crate::db::helpers::require_record;
use crate::error::ApiError;
use crate::fights::outcome::FightOutcome;
use crate::models::event::{EventCreated, EventFight, EventRequest, EventSearchQuery};

#[tracing::instrument(name = "Fetching event", skip(pool))]
pub async fn get_event(event_id: i64, pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let event = require_record(
        EventQueries::new(pool.get_ref().clone()).find(event_id).await,
        "event not found.",
    )?;
    Ok(HttpResponse::Ok().json(event))
}

#[tracing::instrument(name = "Searching event fights", skip(pool))]
pub async fn search_event_fights(
    query: web::Query<EventSearchQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let rows = EventQueries::new(pool.get_ref().clone())
        .fights_by_event_name(&query.event_name)
        .await?;

    let fights: Vec<EventFight> = rows
        .into_iter()
        .map(|row| {
            let outcome = FightOutcome::new(row.result, row.method.as_deref());
            EventFight {
                fight_id: row.fight_id,
                result: outcome.describe(
                    (row.fighter1_id, row.fighter1.as_str()),
                    (row.fighter2_id, row.fighter2.as_str()),
                ),
                fighter1: row.fighter1.trim().to_string(),
                fighter2: row.fighter2.trim().to_string(),
                event_name: row.event_name,
                event_id: row.event_id,
                event_date: row.event_date,
                venue: row.venue_name,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(fights))
}

#[tracing::instrument(name = "Creating event", skip(event, pool), fields(event_name = %event.event_name))]
pub async fn create_event(
    event: web::Json<EventRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let event = event.into_inner();
    let event_date = event.validate()?;

    let mut tx = pool.begin().await?;

    if !EventQueries::venue_exists(&mut *tx, event.venue_id).await? {
        return Err(ApiError::not_found("venue not found"));
    }
    let event_id = EventQueries::insert(&mut *tx, &event, event_date).await?;

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(EventCreated { event_id }))
}
