use actix_web::{get, Responder};

use crate::handlers::backend_health_handler::{backend_health_check, welcome_message};

#[get("/")]
async fn welcome() -> impl Responder {
    welcome_message().await
}

#[get("/backend_health")]
async fn backend_health() -> impl Responder {
    backend_health_check().await
}
