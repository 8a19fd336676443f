use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::handlers::prediction_handler;
use crate::models::prediction::{AddPredictionRequest, PredictionCountQuery};

#[get("/count")]
async fn get_prediction_counts(
    query: web::Query<PredictionCountQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    prediction_handler::get_prediction_counts(query, pool).await
}

#[post("/add")]
async fn add_prediction(
    request: web::Json<AddPredictionRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    prediction_handler::add_prediction(request, pool).await
}
