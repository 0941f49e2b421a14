//! HTTP behaviour of the Open-Meteo and IP lookup clients against a mock server.

use meteo_core::{
    Config, LookupError, Place, Query, SearchOutcome, Session, Status, StatusReporter, WmoTable,
    providers_from_config,
    render::{self, Report},
};
use serde_json::json;
use std::sync::Mutex;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

#[derive(Debug, Default)]
struct Recorder(Mutex<Vec<Status>>);

impl StatusReporter for Recorder {
    fn report(&self, status: &Status) {
        self.0.lock().unwrap().push(status.clone());
    }
}

fn config_for(server: &MockServer) -> Config {
    Config {
        geocoding_url: format!("{}/v1/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        ip_lookup_url: format!("{}/json/", server.uri()),
        timeout_secs: 5,
        ..Config::default()
    }
}

fn session_for(server: &MockServer) -> Session<Recorder> {
    let providers = providers_from_config(&config_for(server)).unwrap();
    Session::new(providers, Recorder::default())
}

fn berlin() -> Place {
    Place {
        name: "Berlin".into(),
        admin1: Some("Land Berlin".into()),
        country: Some("Germany".into()),
        latitude: 52.52437,
        longitude: 13.41053,
    }
}

fn geocoding_body() -> serde_json::Value {
    json!({
        "results": [
            {
                "id": 2950159,
                "name": "Berlin",
                "latitude": 52.52437,
                "longitude": 13.41053,
                "country_code": "DE",
                "admin1": "Land Berlin",
                "country": "Germany"
            },
            {
                "id": 5083330,
                "name": "Berlin",
                "latitude": 44.46867,
                "longitude": -71.18508,
                "country_code": "US",
                "admin1": "New Hampshire",
                "country": "United States"
            }
        ],
        "generationtime_ms": 0.9
    })
}

fn forecast_body() -> serde_json::Value {
    json!({
        "latitude": 52.52,
        "longitude": 13.419998,
        "timezone": "Europe/Berlin",
        "current": {
            "time": "2024-01-15T12:15",
            "interval": 900,
            "temperature_2m": 5.5,
            "relative_humidity_2m": 75,
            "apparent_temperature": 2.0,
            "is_day": 1,
            "precipitation": 0.0,
            "weather_code": 3,
            "wind_speed_10m": 12.5,
            "wind_direction_10m": 225
        },
        "hourly": {
            "time": ["2024-01-15T12:00", "2024-01-15T13:00"],
            "temperature_2m": [5.4, 5.9],
            "precipitation_probability": [10, 20],
            "relative_humidity_2m": [75, 73],
            "wind_speed_10m": [12.0, 13.1]
        },
        "daily": {
            "time": [
                "2024-01-15", "2024-01-16", "2024-01-17", "2024-01-18",
                "2024-01-19", "2024-01-20", "2024-01-21"
            ],
            "weather_code": [3, 61, 2, 0, 71, 95, 45],
            "temperature_2m_max": [8.0, 6.0, 10.0, 9.1, 1.2, 4.4, 3.3],
            "temperature_2m_min": [2.0, 1.0, 3.0, 0.5, -3.6, 0.1, -1.0],
            "precipitation_sum": [0.0, 5.5, 0.0, 0.0, 2.0, 12.3, 0.0],
            "sunrise": ["2024-01-15T08:10", "2024-01-16T08:09", "2024-01-17T08:08",
                        "2024-01-18T08:07", "2024-01-19T08:06", "2024-01-20T08:05",
                        "2024-01-21T08:04"],
            "sunset": ["2024-01-15T16:21", "2024-01-16T16:23", "2024-01-17T16:24",
                       "2024-01-18T16:26", "2024-01-19T16:28", "2024-01-20T16:30",
                       "2024-01-21T16:31"],
            "wind_speed_10m_max": [15.0, 20.0, 12.0, 9.0, 30.0, 41.0, 7.0]
        }
    })
}

// ============================================================================
// Geocoding
// ============================================================================

#[tokio::test]
async fn search_sends_expected_parameters_and_returns_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Berlin"))
        .and(query_param("count", "5"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_body()))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let outcome = session.search(&Query::parse("  Berlin ").unwrap()).await;

    match outcome {
        SearchOutcome::Candidates(places) => {
            assert_eq!(places.len(), 2);
            assert_eq!(places[0], berlin());
            assert_eq!(places[1].admin1.as_deref(), Some("New Hampshire"));
        }
        other => panic!("expected candidates, got {other:?}"),
    }

    assert_eq!(
        *session.reporter().0.lock().unwrap(),
        [Status::Searching, Status::SelectLocation]
    );
}

#[tokio::test]
async fn search_without_results_reports_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "generationtime_ms": 0.4 })),
        )
        .mount(&server)
        .await;

    let session = session_for(&server);
    let outcome = session.search(&Query::parse("Qwzxv").unwrap()).await;

    assert_eq!(outcome, SearchOutcome::NoMatch);
    assert_eq!(
        *session.reporter().0.lock().unwrap(),
        [Status::Searching, Status::NoMatch]
    );
}

#[tokio::test]
async fn search_http_error_reports_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let outcome = session.search(&Query::parse("Berlin").unwrap()).await;

    assert_eq!(outcome, SearchOutcome::Failed);
    assert_eq!(
        *session.reporter().0.lock().unwrap(),
        [Status::Searching, Status::NetworkError]
    );
}

#[tokio::test]
async fn geocoder_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(400).set_body_string("{\"reason\":\"bad name\"}"))
        .mount(&server)
        .await;

    let providers = providers_from_config(&config_for(&server)).unwrap();
    let err = providers.geocoder.search("x").await.unwrap_err();

    assert!(matches!(err, LookupError::Status { .. }));
    assert_eq!(err.service(), "geocoding");
    assert!(err.to_string().contains("400"));
    assert!(err.to_string().contains("bad name"));
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let providers = providers_from_config(&config_for(&server)).unwrap();
    let err = providers.geocoder.search("x").await.unwrap_err();

    assert!(matches!(err, LookupError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let config = Config {
        geocoding_url: "http://127.0.0.1:9/v1/search".into(),
        timeout_secs: 2,
        ..Config::default()
    };

    let providers = providers_from_config(&config).unwrap();
    let err = providers.geocoder.search("x").await.unwrap_err();

    assert!(matches!(err, LookupError::Transport { .. }));
}

// ============================================================================
// Forecast
// ============================================================================

#[tokio::test]
async fn load_requests_fixed_fields_and_maps_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.52437"))
        .and(query_param("longitude", "13.41053"))
        .and(query_param("timezone", "auto"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,precipitation,\
             weather_code,wind_speed_10m,wind_direction_10m",
        ))
        .and(query_param(
            "hourly",
            "temperature_2m,precipitation_probability,relative_humidity_2m,wind_speed_10m",
        ))
        .and(query_param(
            "daily",
            "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,sunrise,\
             sunset,wind_speed_10m_max",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let snapshot = session.load(&berlin()).await.expect("forecast should load");

    assert_eq!(snapshot.timezone.as_deref(), Some("Europe/Berlin"));
    assert!(snapshot.current.is_day);
    assert_eq!(snapshot.current.weather_code, 3);
    assert_eq!(snapshot.daily.len(), 7);
    assert_eq!(snapshot.hourly.len(), 2);

    assert_eq!(
        *session.reporter().0.lock().unwrap(),
        [Status::Loading { name: "Berlin".into() }, Status::Idle]
    );
}

#[tokio::test]
async fn load_tolerates_null_temperatures() {
    let server = MockServer::start().await;

    let mut body = forecast_body();
    body["hourly"]["temperature_2m"] = json!([5.4, null]);
    body["daily"]["temperature_2m_max"][1] = json!(null);
    body["daily"]["temperature_2m_min"][4] = json!(null);

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let snapshot = session.load(&berlin()).await.expect("forecast should load");

    assert_eq!(snapshot.hourly.len(), 2);
    assert_eq!(snapshot.hourly[0].temperature_c, Some(5.4));
    assert_eq!(snapshot.hourly[1].temperature_c, None);
    assert_eq!(snapshot.daily.len(), 7);
    assert_eq!(snapshot.daily[1].temperature_max_c, None);
    assert_eq!(snapshot.daily[1].temperature_min_c, Some(1.0));
    assert_eq!(snapshot.daily[4].temperature_min_c, None);

    let report = Report::build(&berlin(), &snapshot, &WmoTable::standard(), 2);
    assert_eq!(report.forecast[1].high, render::MISSING);
    assert_eq!(report.hours[1].temperature, render::MISSING);

    assert_eq!(
        *session.reporter().0.lock().unwrap(),
        [Status::Loading { name: "Berlin".into() }, Status::Idle]
    );
}

#[tokio::test]
async fn load_http_error_reports_failure_and_returns_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let session = session_for(&server);
    assert!(session.load(&berlin()).await.is_none());
    assert_eq!(
        *session.reporter().0.lock().unwrap(),
        [Status::Loading { name: "Berlin".into() }, Status::WeatherUnavailable]
    );
}

// ============================================================================
// IP lookup
// ============================================================================

#[tokio::test]
async fn quick_start_uses_ip_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ip": "203.0.113.7", "city": "Hamburg" })),
        )
        .mount(&server)
        .await;

    let session = session_for(&server);
    assert_eq!(session.quick_start().await, Query::parse("Hamburg"));
}

#[tokio::test]
async fn quick_start_ignores_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let session = session_for(&server);
    assert_eq!(session.quick_start().await, None);
}
