use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

mod common;

use common::{spawn_mock, MockGoogle, MockResponses};

fn setup_test_app(mock: &MockGoogle) -> axum::Router {
    runroute::routes::create_router(Arc::new(mock.app_state()))
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let mock = spawn_mock(MockResponses::default()).await;
    let app = setup_test_app(&mock);

    let response = app.oneshot(get("/debug/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(mock.requests().is_empty(), "Health check must not call upstream");
}

#[tokio::test]
async fn test_plan_route_endpoint() {
    let mock = spawn_mock(MockResponses::default()).await;
    let app = setup_test_app(&mock);

    let request = json!({
        "start_location": "Eyre Square, Galway",
        "target_distance_km": 5,
        "is_loop": true
    });
    let response = app.oneshot(post_json("/routes/plan", &request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["route"]["kind"], "loop");
    assert_eq!(json["route"]["waypoints"].as_array().unwrap().len(), 4);
    assert_eq!(json["route"]["distance_km"], 5.2);
    assert_eq!(json["route"]["pace_estimates"][0]["level"], "easy");
    assert!(json["route"]["maps_url"]
        .as_str()
        .unwrap()
        .ends_with("@?travelmode=walking"));
    assert_eq!(json["metrics"]["difficulty_tier"], "FLAT");
    assert!(json.get("elevation_error").is_none());
}

#[tokio::test]
async fn test_plan_route_without_elevation() {
    let mock = spawn_mock(MockResponses::default()).await;
    let app = setup_test_app(&mock);

    let request = json!({
        "start_location": {"lat": 53.2745, "lng": -9.0494},
        "end_location": "Salthill, Galway",
        "analyze_elevation": false
    });
    let response = app.oneshot(post_json("/routes/plan", &request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["route"]["kind"], "point_to_point");
    assert!(json.get("metrics").is_none());
    assert!(mock.requests_to("elevation").is_empty());
}

#[tokio::test]
async fn test_plan_route_validation() {
    let mock = spawn_mock(MockResponses::default()).await;
    let app = setup_test_app(&mock);

    // Loop without a distance
    let invalid_request = json!({
        "start_location": "Eyre Square, Galway",
        "is_loop": true
    });
    let response = app
        .clone()
        .oneshot(post_json("/routes/plan", &invalid_request))
        .await
        .unwrap();
    assert_eq!(
        response.status(),
        StatusCode::BAD_REQUEST,
        "Should reject a loop without target_distance_km"
    );
    let json = read_json(response).await;
    assert_eq!(json["error"], "Bad Request");

    // Negative distance
    let negative = json!({
        "start_location": "Eyre Square, Galway",
        "target_distance_km": -2.0
    });
    let response = app
        .oneshot(post_json("/routes/plan", &negative))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_plan_route_rejects_too_many_loop_waypoints() {
    let mock = spawn_mock(MockResponses::default()).await;
    let app = setup_test_app(&mock);

    let request = json!({
        "start_location": "Eyre Square, Galway",
        "target_distance_km": 5,
        "is_loop": true,
        "loop_waypoints": 24
    });
    let response = app
        .clone()
        .oneshot(post_json("/routes/plan", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = read_json(response).await;
    assert_eq!(
        json["message"],
        "Invalid argument: loop_waypoints must be between 1 and 23"
    );

    let request = json!({
        "start_location": "Eyre Square, Galway",
        "target_distance_km": 5,
        "is_loop": true,
        "loop_waypoints": u64::MAX
    });
    let response = app
        .oneshot(post_json("/routes/plan", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_upstream_errors_map_to_status_codes() {
    let mock = spawn_mock(MockResponses {
        directions: common::status_only("REQUEST_DENIED"),
        geocode: common::status_only("ZERO_RESULTS"),
        ..Default::default()
    })
    .await;
    let app = setup_test_app(&mock);

    let response = app
        .clone()
        .oneshot(get("/places/geocode?address=Atlantis"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = read_json(response).await;
    assert_eq!(json["message"], "Geocoding API returned: ZERO_RESULTS");

    let request = json!({
        "start_location": {"lat": 53.2745, "lng": -9.0494},
        "end_location": "Salthill"
    });
    let response = app.oneshot(post_json("/routes/plan", &request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = read_json(response).await;
    assert_eq!(json["message"], "Directions API returned: REQUEST_DENIED");
}

#[tokio::test]
async fn test_upstream_timeout_is_gateway_timeout() {
    let mock = spawn_mock(MockResponses {
        delay: Some(Duration::from_millis(1500)),
        ..Default::default()
    })
    .await;
    let config = common::google_maps_config(&mock.base_url, Duration::from_millis(200));
    let state = runroute::AppState::new(&config, Default::default()).unwrap();
    let app = runroute::routes::create_router(Arc::new(state));

    let response = app
        .oneshot(get("/places/geocode?address=Galway"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_geocode_endpoint() {
    let mock = spawn_mock(MockResponses::default()).await;
    let app = setup_test_app(&mock);

    let response = app
        .oneshot(get("/places/geocode?address=Eyre%20Square"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["formatted_address"], "Eyre Square, Galway, Ireland");
    assert_eq!(json["coordinates"]["lat"], 53.2745);
    assert_eq!(
        json["maps_url"],
        "https://www.google.com/maps/search/?api=1&query=53.2745,-9.0494&query_place_id=ChIJ-galway"
    );
    assert_eq!(mock.requests_to("geocode")[0].params["address"], "Eyre Square");
}

#[tokio::test]
async fn test_elevation_profile_endpoint() {
    let mock = spawn_mock(MockResponses::default()).await;
    let app = setup_test_app(&mock);

    let request = json!({
        "path": [{"lat": 0.0, "lng": 0.0}, {"lat": 0.0, "lng": 0.002}],
        "samples": 3
    });
    let response = app
        .clone()
        .oneshot(post_json("/elevation/profile", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["elevation_gain_m"], 20.0);
    assert_eq!(json["elevation_loss_m"], 10.0);
    assert_eq!(json["difficulty_tier"], "FLAT");
    assert_eq!(json["samples"].as_array().unwrap().len(), 3);
    assert!(json["recommendation"]
        .as_str()
        .unwrap()
        .starts_with("This route has 20m elevation gain over approximately 0.2km."));
    assert_eq!(
        json["maps_url"],
        "https://www.google.com/maps/dir/0,0/0,0.002/@?travelmode=walking"
    );

    let too_short = json!({ "path": [{"lat": 0.0, "lng": 0.0}] });
    let response = app
        .oneshot(post_json("/elevation/profile", &too_short))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_nearby_and_amenities_endpoints() {
    let mut responses = MockResponses::default();
    responses
        .nearby
        .insert("toilet".to_string(), common::nearby_ok(&["Public Toilet"]));
    responses
        .nearby
        .insert("gym".to_string(), common::status_only("ZERO_RESULTS"));
    let mock = spawn_mock(responses).await;
    let app = setup_test_app(&mock);

    let response = app
        .clone()
        .oneshot(get("/places/nearby?lat=53.2745&lng=-9.0494&type=cafe&radius=800"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["places"][0]["name"], "Eyre Square Park");

    let response = app
        .clone()
        .oneshot(get("/places/amenities?lat=53.2745&lng=-9.0494&types=restroom,gym"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["radius_m"], 2000);
    assert_eq!(json["amenities"][0]["amenity_type"], "restroom");
    assert_eq!(json["amenities"][0]["places"][0]["name"], "Public Toilet");
    assert_eq!(json["amenities"][1]["amenity_type"], "gym");
    assert_eq!(
        json["amenities"][1]["error"],
        "Places API returned: ZERO_RESULTS"
    );

    let response = app
        .oneshot(get("/places/nearby?lat=95&lng=0&type=park"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_start_points_endpoint() {
    let mock = spawn_mock(MockResponses::default()).await;
    let app = setup_test_app(&mock);

    let response = app
        .oneshot(get("/places/start-points?location=Galway"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["location"], "Galway");
    assert_eq!(json["nearby_parks"][0]["name"], "Eyre Square Park");
    assert_eq!(mock.requests_to("nearby")[0].params["radius"], "5000");
}

#[tokio::test]
async fn test_elevation_point_endpoint() {
    let mock = spawn_mock(MockResponses {
        elevation: common::elevation_ok(&[42.0]),
        ..Default::default()
    })
    .await;
    let app = setup_test_app(&mock);

    let response = app
        .oneshot(get("/elevation/point?lat=53.2745&lng=-9.0494"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["elevation_m"], 42.0);
    assert_eq!(
        json["maps_url"],
        "https://www.google.com/maps/search/?api=1&query=53.2745,-9.0494"
    );
    assert_eq!(
        mock.requests_to("elevation")[0].params["locations"],
        "53.2745,-9.0494"
    );
}
