use serde_json::{json, Value};

mod common;
use common::utils::{create_event, create_fight, create_fighter, fight_body, spawn_app};

#[tokio::test]
async fn created_fight_is_returned_with_stats_ids() {
    let test_app = spawn_app().await;
    let event_id = create_event(&test_app, "UFC 290", "2023-07-08").await;
    let volk = create_fighter(&test_app, "Alexander", "Volkanovski", Some(1)).await;
    let rodriguez = create_fighter(&test_app, "Yair", "Rodriguez", Some(1)).await;

    let fight_id = create_fight(&test_app, event_id, volk, rodriguez, Some(volk), Some(2)).await;

    let response = test_app.get(&format!("/fights/{}", fight_id)).await;
    assert_eq!(response.status().as_u16(), 200);
    let fight: Value = response.json().await.expect("Failed to parse response");

    assert_eq!(fight["fight_id"], fight_id);
    assert_eq!(fight["event_id"], event_id);
    assert_eq!(fight["fighter1_id"], volk);
    assert_eq!(fight["fighter2_id"], rodriguez);
    assert_eq!(fight["result"], volk);
    assert_eq!(fight["method_of_vic"], 2);
    assert_eq!(fight["round_num"], 3);
    assert_eq!(fight["round_time"], "4:59");
    assert!(fight.get("weight_class").is_none());

    let stats: Vec<(i64, i32)> = sqlx::query_as(
        "SELECT fighter_id::bigint, strikes FROM fighter_stats WHERE stats_id = ANY($1) ORDER BY stats_id",
    )
    .bind(vec![
        fight["stats1_id"].as_i64().expect("No stats1_id"),
        fight["stats2_id"].as_i64().expect("No stats2_id"),
    ])
    .fetch_all(&test_app.db_pool)
    .await
    .expect("Failed to fetch stats.");
    assert_eq!(stats, vec![(volk, 50), (rodriguez, 31)]);
}

#[tokio::test]
async fn fight_summary_pairs_stats() {
    let test_app = spawn_app().await;
    let event_id = create_event(&test_app, "UFC 285", "2023-03-04").await;
    let jones = create_fighter(&test_app, "Jon", "Jones", Some(1)).await;
    let gane = create_fighter(&test_app, "Ciryl", "Gane", Some(3)).await;
    let fight_id = create_fight(&test_app, event_id, jones, gane, Some(jones), Some(1)).await;

    let response = test_app.get(&format!("/fights/{}/summary", fight_id)).await;
    assert_eq!(response.status().as_u16(), 200);
    let summary: Value = response.json().await.expect("Failed to parse response");

    assert_eq!(summary["event_name"], "UFC 285");
    assert_eq!(summary["fighter1"], "Jon Jones");
    assert_eq!(summary["fighter2"], "Ciryl Gane");
    assert_eq!(summary["weight_class"], "Heavyweight");
    assert_eq!(summary["result"], "Win - Jon Jones - (SUB)");
    assert_eq!(summary["round"], 3);
    assert_eq!(summary["kd"], "1-0");
    assert_eq!(summary["strikes"], "50-31");
    assert_eq!(summary["td"], "2-0");
    assert_eq!(summary["sub"], "0-1");
}

#[tokio::test]
async fn identical_fighter_slots_conflict() {
    let test_app = spawn_app().await;
    let event_id = create_event(&test_app, "UFC 290", "2023-07-08").await;
    let fighter = create_fighter(&test_app, "Solo", "Fighter", None).await;

    let response = test_app
        .post_json("/fights", &fight_body(event_id, fighter, fighter, None, None))
        .await;
    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "fighter1_id and fighter2_id must be different");
}

#[tokio::test]
async fn invalid_fights_are_rejected() {
    let test_app = spawn_app().await;
    let event_id = create_event(&test_app, "UFC 290", "2023-07-08").await;
    let a = create_fighter(&test_app, "Fighter", "A", None).await;
    let b = create_fighter(&test_app, "Fighter", "B", None).await;

    let mut bad_time = fight_body(event_id, a, b, None, None);
    bad_time["fight"]["round_time"] = json!("4-59");
    let mut long_time = fight_body(event_id, a, b, None, None);
    long_time["fight"]["round_time"] = json!("5:01");
    let mut bad_round = fight_body(event_id, a, b, None, None);
    bad_round["fight"]["round_num"] = json!(6);
    let mut bad_stats = fight_body(event_id, a, b, None, None);
    bad_stats["stats1"]["fighter_id"] = json!(b);
    let mut bad_result = fight_body(event_id, a, b, None, None);
    bad_result["fight"]["result"] = json!(a + b + 1);

    let cases = [
        (bad_time, Some("round_time not in M:S format")),
        (long_time, Some("given round_time too large")),
        (bad_round, None),
        (bad_stats, None),
        (bad_result, None),
    ];
    for (body, detail) in cases {
        let response = test_app.post_json("/fights", &body).await;
        assert_eq!(response.status().as_u16(), 400);
        if let Some(detail) = detail {
            let body: Value = response.json().await.expect("Failed to parse response");
            assert_eq!(body["detail"], detail);
        }
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fighter_stats")
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Failed to count stats.");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn missing_references_roll_back() {
    let test_app = spawn_app().await;
    let event_id = create_event(&test_app, "UFC 290", "2023-07-08").await;
    let a = create_fighter(&test_app, "Fighter", "A", None).await;

    let response = test_app
        .post_json("/fights", &fight_body(event_id + 100, a, a + 100, None, None))
        .await;
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "event not found");

    let response = test_app
        .post_json("/fights", &fight_body(event_id, a, a + 100, None, None))
        .await;
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "a given fighter_id was not found");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fighter_stats")
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Failed to count stats.");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn malformed_fight_body_is_unprocessable() {
    let test_app = spawn_app().await;

    let response = test_app
        .post_json("/fights", &json!({"fight": {"fighter1_id": 1, "fighter2_id": 2}}))
        .await;
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn unknown_fight_is_not_found() {
    let test_app = spawn_app().await;

    let response = test_app.get("/fights/9128319283").await;
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "fight was not found");

    let response = test_app.get("/fights/9128319283/summary").await;
    assert_eq!(response.status().as_u16(), 404);
}
