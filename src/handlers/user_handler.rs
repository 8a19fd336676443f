use actix_web::{web, HttpResponse};
use secrecy::SecretString;
use sqlx::{PgConnection, PgPool};

use crate::db::helpers::{ensure_not_exists, require_record, require_rows_affected};
use crate::db::user_queries::UserQueries;
use crate::error::ApiError;
use crate::models::common::OperationResult;
use crate::models::user::{
    RegistrationRequest, UpdatePasswordRequest, UpdateUsernameRequest, UserCredentials,
    UserIdResponse, UserSearchQuery, UsernameResponse,
};

/// Resolves `username` and checks `password` against the stored hash.
pub(crate) async fn authenticate(
    conn: &mut PgConnection,
    username: &str,
    password: &SecretString,
) -> Result<i32, ApiError> {
    require_record(
        UserQueries::find_id_by_username(&mut *conn, username).await,
        "user does not exist",
    )?;

    match UserQueries::verify_password(&mut *conn, username, password).await? {
        Some(user_id) => Ok(user_id),
        None => {
            tracing::info!("Rejected password for user {}", username);
            Err(ApiError::Unauthorized("invalid password, try again.".to_string()))
        }
    }
}

#[tracing::instrument(
    name = "Adding a new user",
    skip(user_form, pool),
    fields(username = %user_form.username)
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    user_form.validate()?;

    let mut tx = pool.begin().await?;

    ensure_not_exists(
        UserQueries::find_id_by_username(&mut *tx, &user_form.username).await,
        "username already taken",
    )?;
    let user_id = UserQueries::insert(&mut *tx, &user_form.username, &user_form.password).await?;

    tx.commit().await?;
    tracing::info!("Registered user {}", user_id);

    Ok(HttpResponse::Ok().json(UserIdResponse { user_id }))
}

#[tracing::instrument(name = "Fetching username", skip(pool))]
pub async fn get_username(user_id: i64, pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let username = require_record(
        UserQueries::new(pool.get_ref().clone()).find_username(user_id).await,
        "user does not exist",
    )?;
    Ok(HttpResponse::Ok().json(UsernameResponse { username }))
}

#[tracing::instrument(name = "Searching users", skip(pool))]
pub async fn search_users(
    query: web::Query<UserSearchQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let users = UserQueries::new(pool.get_ref().clone())
        .search(&query.name, query.limit, query.offset)
        .await?;
    Ok(HttpResponse::Ok().json(users))
}

#[tracing::instrument(
    name = "Logging in user",
    skip(credentials, pool),
    fields(username = %credentials.username)
)]
pub async fn login_user(
    credentials: web::Json<UserCredentials>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let mut conn = pool.acquire().await?;
    let user_id = authenticate(&mut conn, &credentials.username, &credentials.password).await?;

    Ok(HttpResponse::Ok().json(UserIdResponse { user_id }))
}

#[tracing::instrument(
    name = "Deleting user",
    skip(credentials, pool),
    fields(username = %credentials.username)
)]
pub async fn delete_user(
    credentials: web::Json<UserCredentials>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let mut tx = pool.begin().await?;

    let user_id = authenticate(&mut tx, &credentials.username, &credentials.password).await?;
    let rows_affected = UserQueries::delete(&mut *tx, user_id).await?;
    require_rows_affected(rows_affected, "delete went wrong, action rolled back")?;

    tx.commit().await?;
    tracing::info!("Deleted user {}", user_id);

    Ok(HttpResponse::Ok().json(OperationResult::new("delete successful")))
}

#[tracing::instrument(
    name = "Updating username",
    skip(request, pool),
    fields(old_username = %request.old_username, new_username = %request.new_username)
)]
pub async fn update_username(
    request: web::Json<UpdateUsernameRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let mut tx = pool.begin().await?;

    let user_id = authenticate(&mut tx, &request.old_username, &request.password).await?;
    ensure_not_exists(
        UserQueries::find_id_by_username(&mut *tx, &request.new_username).await,
        "name already in use",
    )?;
    let rows_affected = UserQueries::update_username(&mut *tx, user_id, &request.new_username).await?;
    require_rows_affected(rows_affected, "update went wrong, action rolled back")?;

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(OperationResult::new("update successful")))
}

#[tracing::instrument(
    name = "Updating password",
    skip(request, pool),
    fields(username = %request.username)
)]
pub async fn update_password(
    request: web::Json<UpdatePasswordRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let mut tx = pool.begin().await?;

    let user_id = authenticate(&mut tx, &request.username, &request.old_password).await?;
    let rows_affected = UserQueries::update_password(&mut *tx, user_id, &request.new_password).await?;
    require_rows_affected(rows_affected, "update went wrong, action rolled back")?;

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(OperationResult::new("update successful")))
}
