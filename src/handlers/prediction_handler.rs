use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;

use crate::db::helpers::require_record;
use crate::db::prediction_queries::PredictionQueries;
use crate::error::ApiError;
use crate::fights::outcome::FightOutcome;
use crate::fights::validation::prediction_window_open;
use crate::handlers::user_handler::authenticate;
use crate::models::prediction::{AddPredictionRequest, PredictionCountQuery, PredictionCounts};

async fn prediction_counts(queries: &PredictionQueries, fight_id: i64) -> Result<PredictionCounts, ApiError> {
    let fight = require_record(queries.find_participants(fight_id).await, "fight does not exist")?;
    let tally = queries.tally(fight_id).await?;

    let outcome = FightOutcome::new(fight.result, fight.method.as_deref());
    let result = outcome.winner_label(
        (fight.fighter1_id, fight.fighter1.as_str()),
        (fight.fighter2_id, fight.fighter2.as_str()),
    );

    Ok(PredictionCounts {
        fighter1: fight.fighter1.trim().to_string(),
        fighter1_count: tally.fighter1_count,
        fighter2: fight.fighter2.trim().to_string(),
        fighter2_count: tally.fighter2_count,
        result,
    })
}

#[tracing::instrument(name = "Counting predictions", skip(pool))]
pub async fn get_prediction_counts(
    query: web::Query<PredictionCountQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let queries = PredictionQueries::new(pool.get_ref().clone());
    let counts = prediction_counts(&queries, query.fight_id).await?;
    Ok(HttpResponse::Ok().json(counts))
}

#[tracing::instrument(
    name = "Adding prediction",
    skip(request, pool),
    fields(
        username = %request.user.username,
        fight_id = request.prediction.fight_id,
        fighter_id = request.prediction.fighter_id
    )
)]
pub async fn add_prediction(
    request: web::Json<AddPredictionRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let AddPredictionRequest { user, prediction } = request.into_inner();

    let mut tx = pool.begin().await?;

    let user_id = authenticate(&mut tx, &user.username, &user.password).await?;

    let target = PredictionQueries::find_target(&mut *tx, prediction.fight_id, prediction.fighter_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("given bad fight_id or fighter_id"))?;

    let window_open = target
        .event_date
        .is_some_and(|event_date| prediction_window_open(event_date, Utc::now().naive_utc()));
    if !window_open {
        return Err(ApiError::bad_request("too late to submit prediction for this fight"));
    }

    PredictionQueries::insert(&mut *tx, target.fight_id, prediction.fighter_id, user_id).await?;
    tx.commit().await?;

    let queries = PredictionQueries::new(pool.get_ref().clone());
    let counts = prediction_counts(&queries, target.fight_id).await?;
    Ok(HttpResponse::Ok().json(counts))
}
