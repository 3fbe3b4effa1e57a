//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000/api";

/// Unique suffix so repeated runs do not collide on unique columns
fn unique() -> String {
    format!(
        "{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    )
}

/// Register a fresh user, returning (token, user)
async fn register_user(client: &Client, name: &str) -> (String, Value) {
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": name,
            "email": format!("{}-{}@example.com", name.to_lowercase(), unique()),
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse register response");
    let token = body["access_token"].as_str().expect("No token").to_string();
    (token, body["user"].clone())
}

/// Create equipment with the given extra fields merged in
async fn create_equipment(client: &Client, extra: Value) -> Value {
    let mut payload = json!({
        "name": format!("Press {}", unique()),
        "serial_no": format!("SN-{}", unique())
    });
    payload
        .as_object_mut()
        .unwrap()
        .extend(extra.as_object().cloned().unwrap_or_default());

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send equipment request");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse equipment response")
}

/// Find a seeded stage by flag combination
async fn find_stage(client: &Client, done: bool, is_scrap: bool) -> Value {
    let response = client
        .get(format!("{}/stages", BASE_URL))
        .send()
        .await
        .expect("Failed to list stages");
    assert!(response.status().is_success());
    let stages: Vec<Value> = response.json().await.expect("Failed to parse stages");
    stages
        .into_iter()
        .find(|s| s["done"] == json!(done) && s["is_scrap"] == json!(is_scrap))
        .expect("No seeded stage with requested flags")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_and_me() {
    let client = Client::new();
    let (token, user) = register_user(&client, "Alice").await;

    // Password hash must never appear in responses
    assert!(user.get("password_hash").is_none());

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], user["id"]);
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();
    let (_, user) = register_user(&client, "Bob").await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": user["email"],
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_non_admin_cannot_create_users() {
    let client = Client::new();
    let (token, _) = register_user(&client, "Carol").await;

    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "New User",
            "email": format!("new-{}@example.com", unique()),
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_scrap_equipment_blocks_new_requests() {
    let client = Client::new();
    let equipment = create_equipment(&client, json!({})).await;
    let equipment_id = equipment["id"].as_i64().unwrap();

    // Scrap it
    let response = client
        .post(format!("{}/equipment/{}/scrap", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to scrap equipment");
    assert!(response.status().is_success());
    let scrapped: Value = response.json().await.unwrap();
    assert_eq!(scrapped["is_scrap"], json!(true));
    assert_eq!(scrapped["active"], json!(false));
    assert!(scrapped["scrap_date"].is_string());

    // Details endpoint refuses scrapped equipment
    let response = client
        .get(format!("{}/equipment/{}/details", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to fetch details");
    assert_eq!(response.status(), 400);

    // Creating a request against it fails with a domain error
    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "name": "Post-scrap repair",
            "equipment_id": equipment_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_request_autofill_from_equipment() {
    let client = Client::new();
    let (_, technician) = register_user(&client, "Tech").await;
    let technician_id = technician["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/teams", BASE_URL))
        .json(&json!({
            "name": format!("Mechanics {}", unique()),
            "member_ids": [technician_id]
        }))
        .send()
        .await
        .expect("Failed to create team");
    assert_eq!(response.status(), 201);
    let team: Value = response.json().await.unwrap();
    let team_id = team["id"].as_i64().unwrap();

    let equipment = create_equipment(
        &client,
        json!({
            "maintenance_team_id": team_id,
            "technician_id": technician_id
        }),
    )
    .await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "name": "Leaking Oil",
            "equipment_id": equipment["id"]
        }))
        .send()
        .await
        .expect("Failed to create request");
    assert_eq!(response.status(), 201);
    let request: Value = response.json().await.unwrap();

    assert_eq!(request["maintenance_team_id"].as_i64(), Some(team_id));
    assert_eq!(request["technician_id"].as_i64(), Some(technician_id));
}

#[tokio::test]
#[ignore]
async fn test_explicit_assignment_not_overridden() {
    let client = Client::new();
    let (_, default_tech) = register_user(&client, "DefaultTech").await;
    let (_, chosen_tech) = register_user(&client, "ChosenTech").await;

    let equipment = create_equipment(
        &client,
        json!({ "technician_id": default_tech["id"] }),
    )
    .await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "name": "Screen Not Working",
            "equipment_id": equipment["id"],
            "technician_id": chosen_tech["id"]
        }))
        .send()
        .await
        .expect("Failed to create request");
    assert_eq!(response.status(), 201);
    let request: Value = response.json().await.unwrap();

    assert_eq!(request["technician_id"], chosen_tech["id"]);
}

#[tokio::test]
#[ignore]
async fn test_done_stage_sets_close_date_once() {
    let client = Client::new();
    let equipment = create_equipment(&client, json!({})).await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "name": "Routine checkup",
            "request_type": "preventive",
            "equipment_id": equipment["id"]
        }))
        .send()
        .await
        .expect("Failed to create request");
    assert_eq!(response.status(), 201);
    let request: Value = response.json().await.unwrap();
    let request_id = request["id"].as_i64().unwrap();
    assert!(request["close_date"].is_null());

    // Move to the done stage
    let done_stage = find_stage(&client, true, false).await;
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .json(&json!({ "stage_id": done_stage["id"] }))
        .send()
        .await
        .expect("Failed to update request");
    assert!(response.status().is_success());
    let updated: Value = response.json().await.unwrap();
    let close_date = updated["close_date"].as_str().expect("close_date not set").to_string();

    // A second done transition must not overwrite close_date
    let scrap_stage = find_stage(&client, true, true).await;
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .json(&json!({ "stage_id": scrap_stage["id"] }))
        .send()
        .await
        .expect("Failed to update request");
    assert!(response.status().is_success());
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["close_date"].as_str(), Some(close_date.as_str()));
}

#[tokio::test]
#[ignore]
async fn test_reopening_clears_close_date() {
    let client = Client::new();
    let equipment = create_equipment(&client, json!({})).await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "name": "Belt replacement",
            "equipment_id": equipment["id"]
        }))
        .send()
        .await
        .expect("Failed to create request");
    let request: Value = response.json().await.unwrap();
    let request_id = request["id"].as_i64().unwrap();

    let done_stage = find_stage(&client, true, false).await;
    let open_stage = find_stage(&client, false, false).await;

    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .json(&json!({ "stage_id": done_stage["id"] }))
        .send()
        .await
        .unwrap();
    let updated: Value = response.json().await.unwrap();
    assert!(updated["close_date"].is_string());

    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .json(&json!({ "stage_id": open_stage["id"] }))
        .send()
        .await
        .unwrap();
    let updated: Value = response.json().await.unwrap();
    assert!(updated["close_date"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_scrap_stage_cascades_to_equipment() {
    let client = Client::new();
    let equipment = create_equipment(&client, json!({})).await;
    let equipment_id = equipment["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "name": "Beyond repair",
            "equipment_id": equipment_id
        }))
        .send()
        .await
        .expect("Failed to create request");
    let request: Value = response.json().await.unwrap();

    let scrap_stage = find_stage(&client, true, true).await;
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request["id"]))
        .json(&json!({ "stage_id": scrap_stage["id"] }))
        .send()
        .await
        .expect("Failed to update request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to fetch equipment");
    let fetched: Value = response.json().await.unwrap();
    assert_eq!(fetched["is_scrap"], json!(true));
    assert_eq!(fetched["active"], json!(false));
    assert!(fetched["scrap_date"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_self_assign_requires_team_membership() {
    let client = Client::new();
    let (member_token, member) = register_user(&client, "Member").await;
    let (outsider_token, _) = register_user(&client, "Outsider").await;

    let response = client
        .post(format!("{}/teams", BASE_URL))
        .json(&json!({
            "name": format!("Electricians {}", unique()),
            "member_ids": [member["id"]]
        }))
        .send()
        .await
        .expect("Failed to create team");
    let team: Value = response.json().await.unwrap();

    let equipment = create_equipment(&client, json!({ "maintenance_team_id": team["id"] })).await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "name": "Fuse blown",
            "equipment_id": equipment["id"]
        }))
        .send()
        .await
        .expect("Failed to create request");
    let request: Value = response.json().await.unwrap();

    // Outsider is rejected
    let response = client
        .post(format!("{}/requests/{}/assign-to-me", BASE_URL, request["id"]))
        .header("Authorization", format!("Bearer {}", outsider_token))
        .send()
        .await
        .expect("Failed to send assign request");
    assert_eq!(response.status(), 403);

    // Member succeeds
    let response = client
        .post(format!("{}/requests/{}/assign-to-me", BASE_URL, request["id"]))
        .header("Authorization", format!("Bearer {}", member_token))
        .send()
        .await
        .expect("Failed to send assign request");
    assert!(response.status().is_success());
    let assigned: Value = response.json().await.unwrap();
    assert_eq!(assigned["technician_id"], member["id"]);
}

#[tokio::test]
#[ignore]
async fn test_self_assign_without_team_is_unconditional() {
    let client = Client::new();
    let (token, user) = register_user(&client, "Anyone").await;

    let equipment = create_equipment(&client, json!({})).await;
    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "name": "Unassigned work",
            "equipment_id": equipment["id"]
        }))
        .send()
        .await
        .expect("Failed to create request");
    let request: Value = response.json().await.unwrap();
    assert!(request["maintenance_team_id"].is_null());

    let response = client
        .post(format!("{}/requests/{}/assign-to-me", BASE_URL, request["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send assign request");
    assert!(response.status().is_success());
    let assigned: Value = response.json().await.unwrap();
    assert_eq!(assigned["technician_id"], user["id"]);
}

#[tokio::test]
#[ignore]
async fn test_requests_ordered_by_priority_desc() {
    let client = Client::new();
    let equipment = create_equipment(&client, json!({})).await;
    let equipment_id = equipment["id"].as_i64().unwrap();

    for priority in ["1", "3", "0"] {
        let response = client
            .post(format!("{}/requests", BASE_URL))
            .json(&json!({
                "name": format!("Job priority {}", priority),
                "equipment_id": equipment_id,
                "priority": priority
            }))
            .send()
            .await
            .expect("Failed to create request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/requests?equipment_id={}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to list requests");
    assert!(response.status().is_success());
    let requests: Vec<Value> = response.json().await.unwrap();
    let priorities: Vec<&str> = requests.iter().map(|r| r["priority"].as_str().unwrap()).collect();
    assert_eq!(priorities, vec!["3", "1", "0"]);
}

#[tokio::test]
#[ignore]
async fn test_open_request_count_excludes_done_stages() {
    let client = Client::new();
    let equipment = create_equipment(&client, json!({})).await;
    let equipment_id = equipment["id"].as_i64().unwrap();

    // Two open requests, one completed
    let mut ids = Vec::new();
    for name in ["First", "Second", "Third"] {
        let response = client
            .post(format!("{}/requests", BASE_URL))
            .json(&json!({ "name": name, "equipment_id": equipment_id }))
            .send()
            .await
            .unwrap();
        let request: Value = response.json().await.unwrap();
        ids.push(request["id"].as_i64().unwrap());
    }

    let done_stage = find_stage(&client, true, false).await;
    client
        .put(format!("{}/requests/{}", BASE_URL, ids[0]))
        .json(&json!({ "stage_id": done_stage["id"] }))
        .send()
        .await
        .unwrap();

    let response = client
        .get(format!("{}/equipment/{}/requests/count", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to count requests");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["count"].as_i64(), Some(2));
}

#[tokio::test]
#[ignore]
async fn test_warranty_date_materialized_on_create() {
    let client = Client::new();
    let equipment = create_equipment(
        &client,
        json!({
            "purchase_date": "2024-01-31",
            "warranty_period": 1
        }),
    )
    .await;

    assert_eq!(equipment["warranty_date"].as_str(), Some("2024-02-29"));
    assert_eq!(equipment["is_warranty_valid"], json!(false));
}

#[tokio::test]
#[ignore]
async fn test_dashboard_stats_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/dashboard/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch stats");
    assert!(response.status().is_success());
    let stats: Value = response.json().await.unwrap();

    for field in [
        "total_equipment",
        "active_equipment",
        "scrapped_equipment",
        "total_requests",
        "open_requests",
        "completed_requests",
        "urgent_requests",
    ] {
        assert!(stats[field].is_i64(), "missing {}", field);
    }
    assert_eq!(
        stats["open_requests"].as_i64().unwrap() + stats["completed_requests"].as_i64().unwrap(),
        stats["total_requests"].as_i64().unwrap()
    );
}

#[tokio::test]
#[ignore]
async fn test_default_stages_seeded() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stages", BASE_URL))
        .send()
        .await
        .expect("Failed to list stages");
    let stages: Vec<Value> = response.json().await.unwrap();

    // Ordered by sequence
    let sequences: Vec<i64> = stages.iter().map(|s| s["sequence"].as_i64().unwrap()).collect();
    let mut sorted = sequences.clone();
    sorted.sort();
    assert_eq!(sequences, sorted);

    assert!(stages.iter().any(|s| s["done"] == json!(true) && s["is_scrap"] == json!(false)));
    assert!(stages.iter().any(|s| s["is_scrap"] == json!(true)));
}

#[tokio::test]
#[ignore]
async fn test_team_crud_and_membership() {
    let client = Client::new();
    let (_, leader) = register_user(&client, "Leader").await;
    let (_, member) = register_user(&client, "Worker").await;

    let response = client
        .post(format!("{}/teams", BASE_URL))
        .json(&json!({
            "name": format!("IT Support {}", unique()),
            "leader_id": leader["id"],
            "member_ids": [member["id"]]
        }))
        .send()
        .await
        .expect("Failed to create team");
    assert_eq!(response.status(), 201);
    let team: Value = response.json().await.unwrap();

    assert_eq!(team["leader"]["id"], leader["id"]);
    assert_eq!(team["members"].as_array().unwrap().len(), 1);
    assert_eq!(team["members"][0]["id"], member["id"]);

    // Delete and verify 404
    let response = client
        .delete(format!("{}/teams/{}", BASE_URL, team["id"]))
        .send()
        .await
        .expect("Failed to delete team");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/teams/{}", BASE_URL, team["id"]))
        .send()
        .await
        .expect("Failed to fetch team");
    assert_eq!(response.status(), 404);
}
