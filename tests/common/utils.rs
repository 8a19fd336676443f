#![allow(dead_code)]

use chrono::{Duration, Utc};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::{PgPool, PgConnection, Connection, Executor};
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::Client;

use ufc_api::run;
use ufc_api::config::settings::{get_config, DatabaseSettings};
use ufc_api::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    // A full DATABASE_URL would point every test at the same database
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database)
        .await;
    let server = run(listener, connection_pool.clone())
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);
    TestApp {
        address,
        db_pool: connection_pool,
        client: Client::new(),
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Creates a fighter through the API and returns its id.
pub async fn create_fighter(app: &TestApp, first_name: &str, last_name: &str, stance_id: Option<i32>) -> i64 {
    let response = app
        .post_json("/fighters", &json!({
            "first_name": first_name,
            "last_name": last_name,
            "height": 72,
            "reach": 74,
            "stance_id": stance_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200, "fighter creation failed");
    let body: Value = response.json().await.expect("Failed to parse fighter response");
    body["fighter_id"].as_i64().expect("No fighter_id in response")
}

/// Venues have no endpoint, so they are inserted directly.
pub async fn create_venue(app: &TestApp, venue_name: &str) -> i32 {
    sqlx::query_scalar::<_, i32>("INSERT INTO venue (venue_name) VALUES ($1) RETURNING venue_id")
        .bind(venue_name)
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to insert venue.")
}

pub async fn create_event(app: &TestApp, event_name: &str, event_date: &str) -> i64 {
    let venue_id = create_venue(app, "T-Mobile Arena").await;
    let response = app
        .post_json("/events", &json!({
            "event_name": event_name,
            "event_date": event_date,
            "venue_id": venue_id,
            "attendance": 19000
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200, "event creation failed");
    let body: Value = response.json().await.expect("Failed to parse event response");
    body["event_id"].as_i64().expect("No event_id in response")
}

/// An event far enough ahead that predictions are still accepted.
pub async fn create_upcoming_event(app: &TestApp, event_name: &str) -> i64 {
    let event_date = (Utc::now() + Duration::days(30)).format("%Y-%m-%d").to_string();
    create_event(app, event_name, &event_date).await
}

pub fn fight_body(
    event_id: i64,
    fighter1_id: i64,
    fighter2_id: i64,
    result: Option<i64>,
    method_of_vic: Option<i32>,
) -> Value {
    json!({
        "fight": {
            "event_id": event_id,
            "fighter1_id": fighter1_id,
            "fighter2_id": fighter2_id,
            "round_num": 3,
            "round_time": "4:59",
            "result": result,
            "method_of_vic": method_of_vic,
            "weight_class": 8
        },
        "stats1": {"kd": 1, "strikes": 50, "td": 2, "sub": 0, "fighter_id": fighter1_id},
        "stats2": {"kd": 0, "strikes": 31, "td": 0, "sub": 1, "fighter_id": fighter2_id}
    })
}

pub async fn create_fight(
    app: &TestApp,
    event_id: i64,
    fighter1_id: i64,
    fighter2_id: i64,
    result: Option<i64>,
    method_of_vic: Option<i32>,
) -> i64 {
    let response = app
        .post_json("/fights", &fight_body(event_id, fighter1_id, fighter2_id, result, method_of_vic))
        .await;
    assert_eq!(response.status().as_u16(), 200, "fight creation failed");
    let body: Value = response.json().await.expect("Failed to parse fight response");
    body["fight_id"].as_i64().expect("No fight_id in response")
}

/// Registers a fresh user and returns `(user_id, username, password)`.
pub async fn register_user(app: &TestApp) -> (i64, String, String) {
    let username = format!("testuser{}", Uuid::new_v4());
    let password = "password123".to_string();
    let response = app
        .post_json("/users", &json!({"username": username, "password": password}))
        .await;
    assert_eq!(response.status().as_u16(), 200, "user registration failed");
    let body: Value = response.json().await.expect("Failed to parse registration response");
    let user_id = body["user_id"].as_i64().expect("No user_id in response");
    (user_id, username, password)
}
