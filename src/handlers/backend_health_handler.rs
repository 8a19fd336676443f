use actix_web::HttpResponse;

use crate::models::common::{HealthStatus, MessageResponse};

pub async fn backend_health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus { status: "UP".to_string() })
}

pub async fn welcome_message() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Welcome to the Ultimate Fighting API. See /docs for more information.".to_string(),
    })
}
