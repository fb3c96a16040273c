//! API integration tests
//!
//! Need a running server with a migrated database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Create a project with a unique name and return its id
async fn create_project(client: &Client, prefix: &str) -> i64 {
    let name = format!("{} {}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0));
    let response = client
        .post(format!("{}/projects", BASE_URL))
        .json(&json!({ "name": name, "location": "Test pit" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No project id")
}

/// Create an inventory item and return its id
async fn create_item(client: &Client, project_id: i64, name: &str, quantity: f64) -> i64 {
    let response = client
        .post(format!("{}/inventory", BASE_URL))
        .json(&json!({ "project_id": project_id, "name": name, "quantity": quantity }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let item: Value = response.json().await.expect("Failed to parse response");
    item["id"].as_i64().expect("No item id")
}

/// Transfer and return the HTTP status
async fn send_transfer(client: &Client, item_id: i64, destination: i64, quantity: f64) -> u16 {
    client
        .post(format!("{}/inventory/{}/transfer", BASE_URL, item_id))
        .json(&json!({ "destination_project_id": destination, "quantity": quantity }))
        .send()
        .await
        .expect("Failed to send request")
        .status()
        .as_u16()
}

async fn item_quantity(client: &Client, item_id: i64) -> f64 {
    let item: Value = client
        .get(format!("{}/inventory/{}", BASE_URL, item_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    item["quantity"].as_f64().expect("No quantity")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
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
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_create_report_rejects_bad_clock() {
    let client = Client::new();
    let project_id = create_project(&client, "Clock").await;

    let response = client
        .post(format!("{}/reports", BASE_URL))
        .json(&json!({
            "project_id": project_id,
            "report_date": "2023-06-10",
            "start_time": "25:00",
            "end_time": "15:00"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_dashboard_kpis_for_report() {
    let client = Client::new();
    let project_id = create_project(&client, "Dashboard").await;

    let response = client
        .post(format!("{}/reports", BASE_URL))
        .json(&json!({
            "project_id": project_id,
            "report_date": "2023-06-10",
            "operator": "J. Silva",
            "total_meters": 120.0,
            "total_hours": 8.0,
            "start_time": "07:00",
            "end_time": "15:00",
            "occurrences": [
                { "type": "Mecânica", "time_start": "08:00", "time_end": "08:30" },
                { "type": "Chuva", "time_start": "10:00", "time_end": "11:00" }
            ],
            "supplies": [{ "type": "Diesel", "quantity": 90.0 }]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let report: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(report["status"], 0);

    let response = client
        .get(format!(
            "{}/dashboard?project_id={}&year=2023&month=6",
            BASE_URL, project_id
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["degraded"], false);
    assert_eq!(body["period_start"], "2023-06-01");

    let kpis = &body["kpis"];
    assert_eq!(kpis["has_data"], true);
    assert_eq!(kpis["report_count"], 1);
    assert_eq!(kpis["total_downtime_minutes"], 90);
    assert_eq!(kpis["physical_availability"], 93.75);
    assert_eq!(kpis["diesel_consumption"], 90.0);
    assert_eq!(kpis["top_bottleneck"]["occurrence_type"], "Chuva");
}

#[tokio::test]
#[ignore]
async fn test_dashboard_empty_period() {
    let client = Client::new();
    let project_id = create_project(&client, "Empty").await;

    let response = client
        .get(format!(
            "{}/dashboard?project_id={}&year=2020&month=1",
            BASE_URL, project_id
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["kpis"]["has_data"], false);
    assert_eq!(body["kpis"]["efficiency"], 0.0);
    assert!(body["kpis"]["top_bottleneck"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_transfer_between_projects() {
    let client = Client::new();
    let source_project = create_project(&client, "Source").await;
    let destination_project = create_project(&client, "Destination").await;

    let response = client
        .post(format!("{}/inventory", BASE_URL))
        .json(&json!({
            "project_id": source_project,
            "name": "Bit 76mm",
            "unit": "un",
            "quantity": 10.0
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let item: Value = response.json().await.expect("Failed to parse response");
    let item_id = item["id"].as_i64().expect("No item id");

    // More than available: nothing moves
    let response = client
        .post(format!("{}/inventory/{}/transfer", BASE_URL, item_id))
        .json(&json!({ "destination_project_id": destination_project, "quantity": 15.0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // Same project is refused
    let response = client
        .post(format!("{}/inventory/{}/transfer", BASE_URL, item_id))
        .json(&json!({ "destination_project_id": source_project, "quantity": 1.0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/inventory/{}/transfer", BASE_URL, item_id))
        .json(&json!({ "destination_project_id": destination_project, "quantity": 4.0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["source"]["quantity"], 6.0);
    assert_eq!(body["destination"]["quantity"], 4.0);
    assert_eq!(body["destination"]["project_id"], destination_project);

    let response = client
        .get(format!("{}/inventory/movements?item_id={}", BASE_URL, item_id))
        .send()
        .await
        .expect("Failed to send request");
    let movements: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(movements.as_array().map(|m| m.len()), Some(1));
    assert_eq!(movements[0]["kind"], 2);
}

#[tokio::test]
#[ignore]
async fn test_stock_out_insufficient() {
    let client = Client::new();
    let project_id = create_project(&client, "StockOut").await;

    let response = client
        .post(format!("{}/inventory", BASE_URL))
        .json(&json!({ "project_id": project_id, "name": "Grease", "quantity": 2.0 }))
        .send()
        .await
        .expect("Failed to send request");
    let item: Value = response.json().await.expect("Failed to parse response");
    let item_id = item["id"].as_i64().expect("No item id");

    let response = client
        .post(format!("{}/inventory/{}/stock-out", BASE_URL, item_id))
        .json(&json!({ "quantity": 3.0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    let response = client
        .get(format!("{}/inventory/{}", BASE_URL, item_id))
        .send()
        .await
        .expect("Failed to send request");
    let item: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(item["quantity"], 2.0);
}

#[tokio::test]
#[ignore]
async fn test_opposite_transfers_run_concurrently() {
    let client = Client::new();
    let project_a = create_project(&client, "Pit A").await;
    let project_b = create_project(&client, "Pit B").await;
    let item_a = create_item(&client, project_a, "Bit 89mm", 50.0).await;
    let item_b = create_item(&client, project_b, "Bit 89mm", 50.0).await;

    for _ in 0..10 {
        let (a_to_b, b_to_a) = tokio::join!(
            send_transfer(&client, item_a, project_b, 3.0),
            send_transfer(&client, item_b, project_a, 2.0),
        );
        assert_eq!((a_to_b, b_to_a), (200, 200));
    }

    assert_eq!(item_quantity(&client, item_a).await, 40.0);
    assert_eq!(item_quantity(&client, item_b).await, 60.0);
}

#[tokio::test]
#[ignore]
async fn test_first_transfers_into_new_destination_row() {
    let client = Client::new();
    let first_source = create_project(&client, "Glove source 1").await;
    let second_source = create_project(&client, "Glove source 2").await;
    let destination = create_project(&client, "Glove destination").await;
    let first_item = create_item(&client, first_source, "Luva", 10.0).await;
    let second_item = create_item(&client, second_source, "Luva", 10.0).await;

    let (first, second) = tokio::join!(
        send_transfer(&client, first_item, destination, 2.0),
        send_transfer(&client, second_item, destination, 3.0),
    );
    assert_eq!((first, second), (200, 200));

    let items: Value = client
        .get(format!("{}/inventory?project_id={}", BASE_URL, destination))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let items = items.as_array().expect("Expected a list");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Luva");
    assert_eq!(items[0]["quantity"], 5.0);
}

#[tokio::test]
#[ignore]
async fn test_dashboard_unknown_equipment() {
    let client = Client::new();

    let response = client
        .get(format!("{}/dashboard?equipment_id=2147483647", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
