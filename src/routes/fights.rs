use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::handlers::fight_handler;
use crate::models::fight::CreateFightRequest;

#[post("")]
async fn create_fight(
    request: web::Json<CreateFightRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    fight_handler::create_fight(request, pool).await
}

/// Stored fight row
#[get("/{fight_id}")]
async fn get_fight(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let fight_id = path.into_inner();
    fight_handler::get_fight(fight_id, pool).await
}

/// Fight with event, names, result text and stat pairs
#[get("/{fight_id}/summary")]
async fn get_fight_summary(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let fight_id = path.into_inner();
    fight_handler::get_fight_summary(fight_id, pool).await
}
