use actix_web::{get, post, put, web, HttpResponse};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::handlers::fighter_handler;
use crate::models::fighter::{FighterListQuery, FighterRequest, FighterUpdateRequest};

/// Filtered, sorted and paginated fighters with their records
#[get("")]
async fn list_fighters(
    query: web::Query<FighterListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    fighter_handler::list_fighters(query, pool).await
}

#[post("")]
async fn create_fighter(
    fighter: web::Json<FighterRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    fighter_handler::create_fighter(fighter, pool).await
}

/// One fighter with record and most recent fights
#[get("/{fighter_id}")]
async fn get_fighter(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let fighter_id = path.into_inner();
    fighter_handler::get_fighter(fighter_id, pool).await
}

#[put("/{fighter_id}")]
async fn update_fighter(
    path: web::Path<i64>,
    update: web::Json<FighterUpdateRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let fighter_id = path.into_inner();
    fighter_handler::update_fighter(fighter_id, update, pool).await
}
