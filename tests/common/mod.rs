use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use runroute::config::{GoogleMapsConfig, PlannerConfig};
use runroute::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned upstream answers, one per endpoint
#[derive(Clone)]
#[allow(dead_code)]
pub struct MockResponses {
    pub geocode: Value,
    /// Keyed by the `type` query parameter; `default` answers anything else
    pub nearby: HashMap<String, Value>,
    pub directions: Value,
    pub elevation: Value,
    /// Answer with this HTTP status instead of the canned body
    pub http_status: Option<StatusCode>,
    /// Sleep before answering, to trigger client timeouts
    pub delay: Option<Duration>,
}

impl Default for MockResponses {
    fn default() -> Self {
        let mut nearby = HashMap::new();
        nearby.insert("default".to_string(), nearby_ok(&["Eyre Square Park"]));
        MockResponses {
            geocode: geocode_ok(53.2745, -9.0494, "Eyre Square, Galway, Ireland"),
            nearby,
            directions: directions_ok(),
            elevation: elevation_ok(&[100.0, 120.0, 110.0]),
            http_status: None,
            delay: None,
        }
    }
}

/// One upstream call as seen by the mock
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub endpoint: &'static str,
    pub params: HashMap<String, String>,
}

struct MockState {
    responses: MockResponses,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Local stand-in for the Google Maps web services
#[allow(dead_code)]
pub struct MockGoogle {
    pub base_url: String,
    state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockGoogle {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, endpoint: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.endpoint == endpoint)
            .collect()
    }

    pub fn config(&self) -> GoogleMapsConfig {
        google_maps_config(&self.base_url, Duration::from_secs(5))
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(&self.config(), PlannerConfig::default()).unwrap()
    }
}

/// Start a mock upstream on an ephemeral port
#[allow(dead_code)]
pub async fn spawn_mock(responses: MockResponses) -> MockGoogle {
    let state = Arc::new(MockState {
        responses,
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/maps/api/geocode/json", get(geocode_handler))
        .route("/maps/api/place/nearbysearch/json", get(nearby_handler))
        .route("/maps/api/directions/json", get(directions_handler))
        .route("/maps/api/elevation/json", get(elevation_handler))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockGoogle {
        base_url: format!("http://{}/maps/api", addr),
        state,
    }
}

async fn respond(
    state: &MockState,
    endpoint: &'static str,
    params: HashMap<String, String>,
    body: Value,
) -> axum::response::Response {
    state.requests.lock().unwrap().push(RecordedRequest { endpoint, params });

    if let Some(delay) = state.responses.delay {
        tokio::time::sleep(delay).await;
    }
    if let Some(status) = state.responses.http_status {
        return (status, "upstream unavailable").into_response();
    }
    Json(body).into_response()
}

async fn geocode_handler(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    let body = state.responses.geocode.clone();
    respond(&state, "geocode", params, body).await
}

async fn nearby_handler(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    let place_type = params.get("type").cloned().unwrap_or_default();
    let body = state
        .responses
        .nearby
        .get(&place_type)
        .or_else(|| state.responses.nearby.get("default"))
        .cloned()
        .unwrap_or_else(|| status_only("ZERO_RESULTS"));
    respond(&state, "nearby", params, body).await
}

async fn directions_handler(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    let body = state.responses.directions.clone();
    respond(&state, "directions", params, body).await
}

async fn elevation_handler(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    let body = state.responses.elevation.clone();
    respond(&state, "elevation", params, body).await
}

/// Client config pointing at `base_url`
#[allow(dead_code)]
pub fn google_maps_config(base_url: &str, timeout: Duration) -> GoogleMapsConfig {
    let mut config = GoogleMapsConfig::new("test_key".to_string());
    config.base_url = base_url.to_string();
    config.request_timeout = timeout;
    config
}

// Fixtures

#[allow(dead_code)]
pub fn status_only(status: &str) -> Value {
    json!({ "status": status, "results": [] })
}

#[allow(dead_code)]
pub fn geocode_ok(lat: f64, lng: f64, formatted_address: &str) -> Value {
    json!({
        "status": "OK",
        "results": [{
            "formatted_address": formatted_address,
            "place_id": "ChIJ-galway",
            "geometry": { "location": { "lat": lat, "lng": lng } }
        }]
    })
}

#[allow(dead_code)]
pub fn nearby_ok(names: &[&str]) -> Value {
    let results: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "name": name,
                "vicinity": format!("{} Street, Galway", i + 1),
                "rating": 4.0 + (i as f64) * 0.1,
                "geometry": { "location": { "lat": 53.27 + i as f64 * 0.001, "lng": -9.05 } }
            })
        })
        .collect();
    json!({ "status": "OK", "results": results })
}

/// Two-leg walking loop of 5.2km starting and ending at Eyre Square
#[allow(dead_code)]
pub fn directions_ok() -> Value {
    json!({
        "status": "OK",
        "routes": [{
            "summary": "Prospect Hill",
            "legs": [
                {
                    "steps": [
                        { "start_location": { "lat": 53.2745, "lng": -9.0494 } },
                        { "start_location": { "lat": 53.2770, "lng": -9.0460 } }
                    ],
                    "distance": { "text": "2.6 km", "value": 2600 },
                    "duration": { "text": "32 mins", "value": 1950 },
                    "start_address": "Eyre Square, Galway",
                    "end_address": "Bohermore, Galway",
                    "end_location": { "lat": 53.2788, "lng": -9.0433 }
                },
                {
                    "steps": [
                        { "start_location": { "lat": 53.2788, "lng": -9.0433 } },
                        { "start_location": { "lat": 53.2760, "lng": -9.0480 } }
                    ],
                    "distance": { "text": "2.6 km", "value": 2600 },
                    "duration": { "text": "32 mins", "value": 1950 },
                    "start_address": "Bohermore, Galway",
                    "end_address": "Eyre Square, Galway",
                    "end_location": { "lat": 53.2745, "lng": -9.0494 }
                }
            ]
        }]
    })
}

/// Samples along the equator, 0.001° apart
#[allow(dead_code)]
pub fn elevation_ok(elevations: &[f64]) -> Value {
    let results: Vec<Value> = elevations
        .iter()
        .enumerate()
        .map(|(i, e)| {
            json!({
                "elevation": e,
                "location": { "lat": 0.0, "lng": i as f64 * 0.001 },
                "resolution": 9.5
            })
        })
        .collect();
    json!({ "status": "OK", "results": results })
}

/// Real-API tests need a key and can be switched off explicitly
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok() || std::env::var("GOOGLE_MAPS_API_KEY").is_err()
}
