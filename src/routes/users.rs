use actix_web::{get, post, put, web, HttpResponse};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::handlers::user_handler;
use crate::models::user::{
    RegistrationRequest, UpdatePasswordRequest, UpdateUsernameRequest, UserCredentials, UserSearchQuery,
};

#[get("")]
async fn search_users(
    query: web::Query<UserSearchQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    user_handler::search_users(query, pool).await
}

#[post("")]
async fn register(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    user_handler::register_user(user_form, pool).await
}

#[post("/login")]
async fn login(
    credentials: web::Json<UserCredentials>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    user_handler::login_user(credentials, pool).await
}

#[post("/delete")]
async fn delete_user(
    credentials: web::Json<UserCredentials>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    user_handler::delete_user(credentials, pool).await
}

#[put("/update/name")]
async fn update_username(
    request: web::Json<UpdateUsernameRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    user_handler::update_username(request, pool).await
}

#[put("/update/password")]
async fn update_password(
    request: web::Json<UpdatePasswordRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    user_handler::update_password(request, pool).await
}

#[get("/{user_id}")]
async fn get_username(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    user_handler::get_username(user_id, pool).await
}
