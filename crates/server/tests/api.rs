use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use engine::{Engine, Fixtures, Latency, Store};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app(store: Store) -> Router {
    let engine = Engine::builder().store(store).build().await.unwrap();
    server::router(Arc::new(engine))
}

async fn empty_app() -> Router {
    app(Store::in_memory(Latency::none())).await
}

async fn seeded_app() -> Router {
    app(Store::seeded(Fixtures::bundled().unwrap(), Latency::none())).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_trip(app: &Router) -> Value {
    let (status, trip) = send(
        app,
        Method::POST,
        "/trips",
        Some(json!({
            "name": "Summer in Rome",
            "startDate": "2024-06-01",
            "endDate": "2024-06-03",
            "destination": "Rome, Italy",
            "budget": "1000.00",
            "currency": "EUR"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    trip
}

#[tokio::test]
async fn create_trip_returns_trip_and_generates_days() {
    let app = empty_app().await;
    let trip = create_trip(&app).await;
    assert_eq!(trip["budget"], 100_000);
    assert_eq!(trip["currency"], "EUR");
    assert!(trip["coverImage"].as_str().unwrap().starts_with("https://"));

    let id = trip["id"].as_str().unwrap();
    let (status, days) = send(&app, Method::GET, &format!("/trips/{id}/days"), None).await;
    assert_eq!(status, StatusCode::OK);

    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["dayNumber"], 1);
    assert_eq!(days[0]["date"], "2024-06-01");
    assert_eq!(days[2]["date"], "2024-06-03");
}

#[tokio::test]
async fn activity_is_linked_into_its_day() {
    let app = empty_app().await;
    let trip = create_trip(&app).await;
    let trip_id = trip["id"].as_str().unwrap();
    let (_, days) = send(&app, Method::GET, &format!("/trips/{trip_id}/days"), None).await;
    let day_id = days[0]["id"].as_str().unwrap().to_string();

    let (status, activity) = send(
        &app,
        Method::POST,
        "/activities",
        Some(json!({
            "tripId": trip_id,
            "dayId": day_id,
            "title": "Colosseum",
            "startTime": "09:30",
            "endTime": "11:00",
            "category": "sightseeing",
            "coordinates": { "lat": 41.8902, "lng": 12.4922 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(activity["startTime"], "09:30");

    let (_, day) = send(&app, Method::GET, &format!("/days/{day_id}"), None).await;
    let (_, by_day) = send(&app, Method::GET, &format!("/days/{day_id}/activities"), None).await;
    assert_eq!(day["activities"], by_day);
    assert_eq!(by_day[0]["title"], "Colosseum");

    let (status, reconciled) =
        send(&app, Method::POST, &format!("/days/{day_id}/reconcile"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reconciled["changed"], false);
}

#[tokio::test]
async fn activity_update_clears_with_null() {
    let app = seeded_app().await;
    let (_, activities) = send(&app, Method::GET, "/activities", None).await;
    let first = &activities[0];
    assert!(first["endTime"].is_string());
    let id = first["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/activities/{id}"),
        Some(json!({ "endTime": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["endTime"].is_null());
    assert_eq!(updated["title"], first["title"]);
}

#[tokio::test]
async fn budget_summary_over_http() {
    let app = empty_app().await;
    let trip = create_trip(&app).await;
    let trip_id = trip["id"].as_str().unwrap();

    for (category, amount) in [("accommodation", "600"), ("food", "250.00")] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/expenses",
            Some(json!({
                "tripId": trip_id,
                "category": category,
                "amount": amount,
                "description": "Booked",
                "date": "2024-06-01"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, summary) = send(&app, Method::GET, &format!("/trips/{trip_id}/budget"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalSpent"], 85_000);
    assert_eq!(summary["remaining"], 15_000);
    assert_eq!(summary["progressPercent"], 85.0);
    assert_eq!(summary["status"], "warning");
    assert_eq!(summary["spendByCategory"]["shopping"], 0);
}

#[tokio::test]
async fn overview_of_seeded_trip() {
    let app = seeded_app().await;
    let (_, trips) = send(&app, Method::GET, "/trips", None).await;
    let id = trips[0]["id"].as_str().unwrap();

    let (status, overview) = send(&app, Method::GET, &format!("/trips/{id}/overview"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["trip"]["id"], trips[0]["id"]);
    assert_eq!(overview["days"].as_array().unwrap().len(), 3);
    assert_eq!(overview["budget"]["currency"], "JPY");
}

#[tokio::test]
async fn delete_trip_cascades() {
    let app = seeded_app().await;
    let (_, trips) = send(&app, Method::GET, "/trips", None).await;
    let id = trips[0]["id"].as_str().unwrap();

    let (status, _) = send(&app, Method::DELETE, &format!("/trips/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &format!("/trips/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, days) = send(&app, Method::GET, "/days", None).await;
    assert!(days.as_array().unwrap().iter().all(|d| d["tripId"] != trips[0]["id"]));
    let (_, expenses) = send(&app, Method::GET, "/expenses", None).await;
    assert!(expenses.as_array().unwrap().iter().all(|e| e["tripId"] != trips[0]["id"]));
}

#[tokio::test]
async fn missing_records_are_404_with_error_body() {
    let app = empty_app().await;
    let id = "9b2f6f1e-0c55-4d9e-a1a4-3f7e2d6c8b90";

    for uri in [
        format!("/trips/{id}"),
        format!("/days/{id}"),
        format!("/activities/{id}"),
        format!("/expenses/{id}"),
        format!("/trips/{id}/budget"),
    ] {
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"].as_str().unwrap().contains(id), "{uri}");
    }

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/trips/{id}"),
        Some(json!({ "name": "Nowhere" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_input_is_422() {
    let app = empty_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/trips",
        Some(json!({
            "name": "Backwards",
            "startDate": "2024-06-03",
            "endDate": "2024-06-01",
            "destination": "Rome",
            "budget": "10"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("before start date"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/trips",
        Some(json!({
            "name": "Too precise",
            "startDate": "2024-06-01",
            "endDate": "2024-06-01",
            "destination": "Tokyo",
            "budget": "10.5",
            "currency": "JPY"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn currency_and_calendar_rules_are_422() {
    let app = empty_app().await;
    let trip = create_trip(&app).await;
    let trip_id = trip["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/trips/{trip_id}"),
        Some(json!({ "currency": "JPY" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("budget in JPY"));

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/trips/{trip_id}"),
        Some(json!({ "currency": "JPY", "budget": "160000" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["budget"], 160_000);
    assert_eq!(updated["currency"], "JPY");

    let (status, _) = send(
        &app,
        Method::POST,
        "/days",
        Some(json!({ "tripId": trip_id, "date": "2024-06-01", "dayNumber": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, days) = send(&app, Method::GET, &format!("/trips/{trip_id}/days"), None).await;
    let day_id = days[1]["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/days/{day_id}"),
        Some(json!({ "dayNumber": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, after) = send(&app, Method::GET, &format!("/trips/{trip_id}/days"), None).await;
    assert_eq!(after, days);
}

#[tokio::test]
async fn malformed_requests_are_400() {
    let app = empty_app().await;

    let (status, body) = send(&app, Method::GET, "/trips/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: server::types::ErrorBody = serde_json::from_value(body).unwrap();
    assert!(!body.error.is_empty());

    let (status, body) = send(
        &app,
        Method::POST,
        "/trips",
        Some(json!({ "name": "No dates" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
