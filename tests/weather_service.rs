//! Integration tests for WeatherService using wiremock.
//!
//! A MockServer stands in for the AMap v3 REST API.

use amap_weather::config::WeatherConfig;
use amap_weather::weather::{WeatherError, WeatherLookup, WeatherService};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocode_body(adcode: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "1",
        "info": "OK",
        "infocode": "10000",
        "count": "1",
        "geocodes": [{
            "formatted_address": "北京市",
            "country": "中国",
            "province": "北京市",
            "city": "北京市",
            "district": [],
            "adcode": adcode,
            "location": "116.407387,39.904179"
        }]
    })
}

fn weather_body(casts: usize) -> serde_json::Value {
    let casts: Vec<serde_json::Value> = (0..casts)
        .map(|i| {
            serde_json::json!({
                "date": format!("2026-02-0{}", i + 1),
                "week": ((4 + i) % 7 + 1).to_string(),
                "dayweather": "晴",
                "nightweather": "多云",
                "daytemp": "8",
                "nighttemp": "-2",
                "daywind": "北",
                "nightwind": "北",
                "daypower": "1-3",
                "nightpower": "1-3"
            })
        })
        .collect();

    serde_json::json!({
        "status": "1",
        "count": "1",
        "info": "OK",
        "infocode": "10000",
        "lives": [{
            "province": "北京",
            "city": "东城区",
            "adcode": "110101",
            "weather": "晴",
            "temperature": "25",
            "winddirection": "北",
            "windpower": "≤3",
            "humidity": "50",
            "reporttime": "2026-01-29 12:00:00",
            "visibility": "10"
        }],
        "forecasts": [{
            "city": "东城区",
            "adcode": "110101",
            "province": "北京",
            "reporttime": "2026-01-29 12:00:00",
            "casts": casts
        }]
    })
}

fn create_service(server: &MockServer) -> WeatherService {
    WeatherService::new(WeatherConfig {
        api_key: "test-key".to_string(),
        api_base_url: server.uri(),
        timeout: 5,
    })
}

async fn mount_geocode(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/geocode/geo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_resolve_and_fetch_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/geo"))
        .and(query_param("key", "test-key"))
        .and(query_param("address", "北京"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body("110101")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather/weatherInfo"))
        .and(query_param("key", "test-key"))
        .and(query_param("city", "110101"))
        .and(query_param("extensions", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(4)))
        .expect(1)
        .mount(&server)
        .await;

    let report = create_service(&server)
        .resolve_and_fetch("  北京 ")
        .await
        .unwrap();

    let live = report.live.expect("live conditions should be present");
    assert_eq!(report.city, "北京");
    assert_eq!(live.temperature.as_deref(), Some("25"));
    assert_eq!(live.wind_power.as_deref(), Some("≤3"));
    assert_eq!(live.report_time.as_deref(), Some("2026-01-29 12:00:00"));
    assert_eq!(report.forecast.len(), 4);
    assert_eq!(report.forecast[0].date.as_deref(), Some("2026-02-01"));
}

#[tokio::test]
async fn test_geocode_without_match_is_city_not_found() {
    let server = MockServer::start().await;

    mount_geocode(
        &server,
        serde_json::json!({ "status": "1", "info": "OK", "count": "0", "geocodes": [] }),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/weather/weatherInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(3)))
        .expect(0)
        .mount(&server)
        .await;

    let err = create_service(&server)
        .resolve_and_fetch("不存在的城市")
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::CityNotFound(city) if city == "不存在的城市"));
}

#[tokio::test]
async fn test_geocode_error_status_is_city_not_found() {
    let server = MockServer::start().await;

    mount_geocode(
        &server,
        serde_json::json!({ "status": "0", "info": "INVALID_USER_KEY", "infocode": "10001" }),
    )
    .await;

    let err = create_service(&server)
        .resolve_and_fetch("北京")
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::CityNotFound(_)));
}

#[tokio::test]
async fn test_missing_adcode_is_sent_empty() {
    let server = MockServer::start().await;

    mount_geocode(
        &server,
        serde_json::json!({ "status": "1", "geocodes": [{ "formatted_address": "某地" }] }),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/weather/weatherInfo"))
        .and(query_param("city", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(0)))
        .expect(1)
        .mount(&server)
        .await;

    let report = create_service(&server)
        .resolve_and_fetch("某地")
        .await
        .unwrap();

    assert!(report.forecast.is_empty());
}

#[tokio::test]
async fn test_http_error_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/geo"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = create_service(&server)
        .resolve_and_fetch("北京")
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Transport(_)));
}

#[tokio::test]
async fn test_malformed_body_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/geo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let err = create_service(&server)
        .resolve_and_fetch("北京")
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Transport(_)));
}

#[tokio::test]
async fn test_empty_lives_is_no_weather_data() {
    let server = MockServer::start().await;

    mount_geocode(&server, geocode_body("110101")).await;

    let mut body = weather_body(3);
    body["lives"] = serde_json::json!([]);

    Mock::given(method("GET"))
        .and(path("/weather/weatherInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = create_service(&server)
        .resolve_and_fetch("北京")
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::NoWeatherData(city) if city == "北京"));
}

#[tokio::test]
async fn test_weather_error_status_is_no_weather_data() {
    let server = MockServer::start().await;

    mount_geocode(&server, geocode_body("110101")).await;

    let mut body = weather_body(3);
    body["status"] = serde_json::json!("0");
    body["info"] = serde_json::json!("DAILY_QUERY_OVER_LIMIT");

    Mock::given(method("GET"))
        .and(path("/weather/weatherInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = create_service(&server)
        .resolve_and_fetch("北京")
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::NoWeatherData(_)));
}

#[tokio::test]
async fn test_slow_provider_hits_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/geo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocode_body("110101"))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let service = WeatherService::new(WeatherConfig {
        api_key: "test-key".to_string(),
        api_base_url: server.uri(),
        timeout: 1,
    });

    let err = service.resolve_and_fetch("北京").await.unwrap_err();

    match err {
        WeatherError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected transport timeout, got {other:?}"),
    }
}
