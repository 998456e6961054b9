//! Test helpers: canned upstream responses and mock servers

#![allow(dead_code)]

use ipweather::{GeolocationClient, LocationWeatherLookup, WeatherClient};
use reqwest::Client;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER_AGENT: &str = "ipweather-test/1.0";
pub const FORECAST_PATH: &str = "/weatherapi/locationforecast/2.0/compact";

/// ip-api.com answer for a resolvable address in Oslo
pub fn ip_api_success() -> Value {
    json!({
        "status": "success",
        "country": "Norway",
        "regionName": "Oslo County",
        "city": "Oslo",
        "lat": 59.9139,
        "lon": 10.7522,
        "timezone": "Europe/Oslo"
    })
}

/// ip-api.com answer for an address it cannot resolve
pub fn ip_api_fail(message: &str) -> Value {
    json!({ "status": "fail", "message": message })
}

/// MET Norway compact forecast with three hourly steps
pub fn met_no_forecast() -> Value {
    json!({
        "type": "Feature",
        "properties": {
            "meta": { "updated_at": "2024-01-15T11:30:00Z" },
            "timeseries": [
                {
                    "time": "2024-01-15T12:00:00Z",
                    "data": {
                        "instant": { "details": {
                            "air_pressure_at_sea_level": 1012.9,
                            "air_temperature": 4.6,
                            "cloud_area_fraction": 96.1,
                            "relative_humidity": 88.4,
                            "wind_from_direction": 215.3,
                            "wind_speed": 4.1
                        }},
                        "next_1_hours": {
                            "summary": { "symbol_code": "lightrain" },
                            "details": { "precipitation_amount": 0.3 }
                        },
                        "next_6_hours": { "summary": { "symbol_code": "rain" } },
                        "next_12_hours": { "summary": { "symbol_code": "cloudy" } }
                    }
                },
                {
                    "time": "2024-01-15T13:00:00Z",
                    "data": { "instant": { "details": { "air_temperature": 5.2 } } }
                },
                {
                    "time": "2024-01-15T14:00:00Z",
                    "data": { "instant": { "details": { "air_temperature": 3.9 } } }
                }
            ]
        }
    })
}

/// Serve `body` for `GET /json/{address}`
pub async fn mount_geolocation(server: &MockServer, address: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/json/{address}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve `body` for the forecast endpoint
pub async fn mount_weather(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn client() -> Client {
    ipweather::http::build_client(USER_AGENT).unwrap()
}

/// Lookup chain pointed at the two mock servers
pub fn lookup(geolocation: &MockServer, weather: &MockServer) -> LocationWeatherLookup {
    let client = client();
    LocationWeatherLookup::new(
        GeolocationClient::new(client.clone(), geolocation.uri()),
        WeatherClient::new(client, weather.uri()),
    )
}
