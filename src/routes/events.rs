use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::handlers::event_handler;
use crate::models::event::{EventRequest, EventSearchQuery};

/// All fights of events matching `event_name`
#[get("")]
async fn search_event_fights(
    query: web::Query<EventSearchQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    event_handler::search_event_fights(query, pool).await
}

#[post("")]
async fn create_event(
    event: web::Json<EventRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    event_handler::create_event(event, pool).await
}

#[get("/{event_id}")]
async fn get_event(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let event_id = path.into_inner();
    event_handler::get_event(event_id, pool).await
}
