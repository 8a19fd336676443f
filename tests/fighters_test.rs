use serde_json::{json, Value};

mod common;
use common::utils::{create_event, create_fight, create_fighter, spawn_app};

#[tokio::test]
async fn create_then_fetch_fighter_without_fights() {
    let test_app = spawn_app().await;

    let response = test_app
        .post_json("/fighters", &json!({
            "first_name": "Test",
            "last_name": "Delete Me",
            "height": 10,
            "reach": 74,
            "stance_id": 2
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let created: Value = response.json().await.expect("Failed to parse response");
    let fighter_id = created["fighter_id"].as_i64().expect("No fighter_id");

    let response = test_app.get(&format!("/fighters/{}", fighter_id)).await;
    assert_eq!(response.status().as_u16(), 200);
    let fighter: Value = response.json().await.expect("Failed to parse response");

    assert_eq!(fighter["fighter_id"], fighter_id);
    assert_eq!(fighter["name"], "Test Delete Me");
    assert_eq!(fighter["height"], 10);
    assert_eq!(fighter["reach"], 74);
    assert_eq!(fighter["stance"], "Southpaw");
    assert_eq!(fighter["weight"], Value::Null);
    assert_eq!(fighter["wins"], 0);
    assert_eq!(fighter["losses"], 0);
    assert_eq!(fighter["draws"], 0);
    assert_eq!(fighter["recent_fights"], json!([]));
}

#[tokio::test]
async fn duplicate_fighter_is_rejected() {
    let test_app = spawn_app().await;
    create_fighter(&test_app, "Jon", "Jones", Some(1)).await;

    // Identity is case-insensitive on the concatenated name
    let response = test_app
        .post_json("/fighters", &json!({
            "first_name": "JON",
            "last_name": "jones",
            "height": 72,
            "reach": 74,
            "stance_id": 1
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "duplicate data given");

    // A different stance is a different fighter
    let response = test_app
        .post_json("/fighters", &json!({
            "first_name": "Jon",
            "last_name": "Jones",
            "height": 72,
            "reach": 74,
            "stance_id": 3
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // A stored fighter without a stance only collides with another stanceless entry
    create_fighter(&test_app, "Cher", "", None).await;
    let response = test_app
        .post_json("/fighters", &json!({"first_name": "Cher", "height": 72, "reach": 74, "stance_id": 2}))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let response = test_app
        .post_json("/fighters", &json!({"first_name": "cher", "height": 72, "reach": 74}))
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn invalid_fighter_fields_are_rejected() {
    let test_app = spawn_app().await;

    let cases = [
        (json!({"first_name": "A", "stance_id": 4}), "improper stance given"),
        (json!({"first_name": "A", "height": 1000}), "improper height given"),
        (json!({"first_name": "A", "reach": -1}), "improper reach given"),
    ];
    for (body, detail) in cases {
        let response = test_app.post_json("/fighters", &body).await;
        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["detail"], detail);
    }
}

#[tokio::test]
async fn unknown_fighter_is_not_found() {
    let test_app = spawn_app().await;

    let response = test_app.get("/fighters/9128319283").await;
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "fighter not found");

    let response = test_app.put_json("/fighters/9128319283", &json!({"height": 50})).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn update_fighter_keeps_absent_fields() {
    let test_app = spawn_app().await;
    let fighter_id = create_fighter(&test_app, "Israel", "Adesanya", Some(3)).await;

    let response = test_app
        .put_json(&format!("/fighters/{}", fighter_id), &json!({"first_name": "Izzy", "height": 76}))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated, json!({
        "first_name": "Izzy",
        "last_name": "Adesanya",
        "height": 76,
        "reach": 74,
        "stance_id": 3
    }));

    let response = test_app
        .put_json(&format!("/fighters/{}", fighter_id), &json!({"stance_id": null}))
        .await;
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["stance_id"], Value::Null);
}

#[tokio::test]
async fn update_into_existing_fighter_conflicts() {
    let test_app = spawn_app().await;
    create_fighter(&test_app, "Alex", "Pereira", Some(1)).await;
    let other_id = create_fighter(&test_app, "Alex", "Poatan", Some(1)).await;

    let response = test_app
        .put_json(&format!("/fighters/{}", other_id), &json!({"last_name": "Pereira"}))
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn inverted_ranges_are_forbidden() {
    let test_app = spawn_app().await;

    for field in ["height", "reach", "wins", "losses", "draws"] {
        let response = test_app
            .get(&format!("/fighters?{}_min=11&{}_max=10", field, field))
            .await;
        assert_eq!(response.status().as_u16(), 403);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["detail"], format!("{}_min greater than {}_max", field, field));
    }
}

#[tokio::test]
async fn malformed_list_queries_are_unprocessable() {
    let test_app = spawn_app().await;

    for query in ["limit=0", "limit=251", "offset=-1", "sort=weight", "order=up", "height_max=1000"] {
        let response = test_app.get(&format!("/fighters?{}", query)).await;
        assert_eq!(response.status().as_u16(), 422, "query {} was accepted", query);
    }
}

#[tokio::test]
async fn list_aggregates_records_and_filters() {
    let test_app = spawn_app().await;
    let event_id = create_event(&test_app, "UFC 285: Jones vs. Gane", "2023-03-04").await;
    let jones = create_fighter(&test_app, "Jon", "Jones", Some(1)).await;
    let gane = create_fighter(&test_app, "Ciryl", "Gane", Some(3)).await;
    let idle = create_fighter(&test_app, "Idle", "Prospect", None).await;

    create_fight(&test_app, event_id, jones, gane, Some(jones), Some(1)).await;
    create_fight(&test_app, event_id, gane, jones, None, Some(3)).await;
    // No result and no method counts toward nothing
    create_fight(&test_app, event_id, jones, gane, None, None).await;

    let response = test_app.get("/fighters?name=jon").await;
    assert_eq!(response.status().as_u16(), 200);
    let fighters: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fighters, json!([{
        "fighter_id": jones,
        "name": "Jon Jones",
        "height": 72,
        "reach": 74,
        "stance": "Orthodox",
        "W/D/L": "1/1/0"
    }]));

    let response = test_app.get("/fighters?losses_min=1").await;
    let fighters: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = fighters.as_array().unwrap().iter().map(|f| f["fighter_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![gane]);

    // Event filters select membership; the fighter without fights drops out
    let response = test_app.get("/fighters?event=ufc%20285").await;
    let fighters: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = fighters.as_array().unwrap().iter().map(|f| f["fighter_id"].as_i64().unwrap()).collect();
    assert_eq!(ids.len(), 2);
    assert!(!ids.contains(&idle));

    // Empty filters keep fighters without stance or fights
    let response = test_app.get("/fighters").await;
    let fighters: Value = response.json().await.expect("Failed to parse response");
    let idle_row = fighters
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["fighter_id"] == idle)
        .expect("Fighter without fights missing from listing");
    assert_eq!(idle_row["stance"], Value::Null);
    assert_eq!(idle_row["W/D/L"], "0/0/0");

    let response = test_app.get(&format!("/fighters/{}", jones)).await;
    let detail: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(detail["wins"], 1);
    assert_eq!(detail["draws"], 1);
    assert_eq!(detail["losses"], 0);
    assert_eq!(detail["weight"], "Heavyweight");
    let results: Vec<&str> = detail["recent_fights"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["result"].as_str().unwrap())
        .collect();
    assert_eq!(results, vec!["Unknown", "Draw - (S-Dec)", "Win - (SUB)"]);
    assert_eq!(detail["recent_fights"][0]["opponent_name"], "Ciryl Gane");
}

#[tokio::test]
async fn pages_are_disjoint_and_contiguous() {
    let test_app = spawn_app().await;
    for i in 0..7 {
        create_fighter(&test_app, "Page", &format!("Fighter {}", i), Some(1)).await;
    }

    let response = test_app.get("/fighters?sort=name&order=descending&limit=250").await;
    let all: Value = response.json().await.expect("Failed to parse response");
    let all_ids: Vec<i64> = all.as_array().unwrap().iter().map(|f| f["fighter_id"].as_i64().unwrap()).collect();
    assert_eq!(all_ids.len(), 7);

    let mut paged_ids = Vec::new();
    for offset in [0, 3, 6] {
        let response = test_app
            .get(&format!("/fighters?sort=name&order=descending&limit=3&offset={}", offset))
            .await;
        let page: Value = response.json().await.expect("Failed to parse response");
        paged_ids.extend(page.as_array().unwrap().iter().map(|f| f["fighter_id"].as_i64().unwrap()));
    }
    assert_eq!(paged_ids, all_ids);

    let first_name: Vec<String> = all.as_array().unwrap().iter().map(|f| f["name"].as_str().unwrap().to_string()).collect();
    assert_eq!(first_name.first().map(String::as_str), Some("Page Fighter 6"));
}

#[tokio::test]
async fn event_and_weight_filters_scope_the_record() {
    let test_app = spawn_app().await;
    let ufc = create_event(&test_app, "UFC 285", "2023-03-04").await;
    let fight_night = create_event(&test_app, "Fight Night 9", "2023-06-10").await;
    let jones = create_fighter(&test_app, "Jon", "Jones", Some(1)).await;
    let gane = create_fighter(&test_app, "Ciryl", "Gane", Some(3)).await;

    create_fight(&test_app, ufc, jones, gane, Some(jones), Some(1)).await;
    create_fight(&test_app, fight_night, gane, jones, Some(gane), Some(5)).await;

    let response = test_app.get("/fighters?name=jon").await;
    let fighters: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fighters[0]["W/D/L"], "1/0/1");

    // Only the fights at the matching event are counted
    let response = test_app.get("/fighters?event=ufc%20285&name=jon").await;
    assert_eq!(response.status().as_u16(), 200);
    let fighters: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fighters.as_array().unwrap().len(), 1);
    assert_eq!(fighters[0]["W/D/L"], "1/0/0");

    let response = test_app.get("/fighters?event=fight%20night&name=jon").await;
    let fighters: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fighters[0]["W/D/L"], "0/0/1");

    // Range filters see the scoped record
    let response = test_app.get("/fighters?event=ufc%20285&losses_min=1").await;
    let fighters: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = fighters.as_array().unwrap().iter().map(|f| f["fighter_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![gane]);

    let response = test_app.get("/fighters?weight_class=heavy&name=gane").await;
    let fighters: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fighters[0]["W/D/L"], "1/0/1");

    let response = test_app.get("/fighters?weight_class=flyweight").await;
    let fighters: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fighters, json!([]));
}

#[tokio::test]
async fn identity_index_rejects_duplicates_written_directly() {
    let test_app = spawn_app().await;
    create_fighter(&test_app, "Jon", "Jones", Some(1)).await;

    let result = sqlx::query(
        "INSERT INTO fighters (first_name, last_name, height, reach, stance_id) VALUES ($1, $2, 72, 74, 1)",
    )
    .bind("JONJ")
    .bind("ONES")
    .execute(&test_app.db_pool)
    .await;

    let err = result.expect_err("Duplicate fighter was stored");
    let db_err = err.as_database_error().expect("Expected a database error");
    assert!(db_err.is_unique_violation());
}
