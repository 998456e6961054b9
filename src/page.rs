//! HTML page for the lookup result

use crate::LookupError;
use crate::models::{LookupResult, WeatherInfo};
use crate::web::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// `GET /`: look up the visitor and render the weather page
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.lookup(&headers, None).await {
        Ok(result) => Html(render(&result)).into_response(),
        Err(err) => (StatusCode::BAD_GATEWAY, Html(render_error(&err))).into_response(),
    }
}

/// Escape text for use in HTML element content and attribute values
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{}</title>\n\
<style>body{{font-family:sans-serif;background:azure;margin:2em}}\
table{{border-collapse:collapse;margin-bottom:1.5em}}\
td,th{{border:1px solid #9bb;padding:0.3em 0.8em;text-align:left}}</style>\n\
</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn row(label: &str, value: &str) -> String {
    format!("<tr><th>{}</th><td>{}</td></tr>\n", escape(label), escape(value))
}

fn current_table(weather: &WeatherInfo) -> String {
    let mut html = String::from("<h2>Current weather</h2>\n<table>\n");
    html.push_str(&row("Condition", &weather.condition));
    html.push_str(&row("Air temperature", &weather.format_temperature()));
    html.push_str(&row("Air pressure", &format!("{:.1} hPa", weather.air_pressure)));
    html.push_str(&row(
        "Cloud area fraction",
        &format!("{:.0}%", weather.cloud_area_fraction),
    ));
    html.push_str(&row(
        "Relative humidity",
        &format!("{:.0}%", weather.relative_humidity),
    ));
    html.push_str(&row("Wind", &weather.format_wind()));
    html.push_str("</table>\n");
    html
}

/// Render the full weather page
#[must_use]
pub fn render(result: &LookupResult) -> String {
    let location = &result.location;
    let place = location.full_name();

    let mut body = format!("<h1>{}</h1>\n", escape(&result.headline));
    body.push_str(&format!(
        "<p>Your IP address <code>{}</code> places you in {} ({}).</p>\n",
        escape(result.client_address.as_str()),
        escape(&place),
        escape(&location.format_coordinates())
    ));

    body.push_str(&current_table(&result.weather));

    if !result.weather.outlook.is_empty() {
        body.push_str("<h2>Coming hours</h2>\n<ul>\n");
        for outlook in &result.weather.outlook {
            body.push_str(&format!(
                "<li>Next {}h: {} <small>({})</small></li>\n",
                outlook.hours,
                escape(&outlook.condition),
                escape(&outlook.symbol_code)
            ));
        }
        body.push_str("</ul>\n");
    }

    let forecast = &result.forecast;
    if !forecast.hourly.is_empty() {
        body.push_str(&format!(
            "<h2>24 hour forecast</h2>\n<table>\n<tr><th>Time ({})</th><th>Air temperature</th></tr>\n",
            escape(&forecast.timezone)
        ));
        for point in &forecast.hourly {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{:.1}°C</td></tr>\n",
                point.time.format("%a %H:%M"),
                point.temperature
            ));
        }
        body.push_str("</table>\n");
    }

    if !forecast.daily.is_empty() {
        body.push_str(&format!(
            "<h2>{} day forecast</h2>\n<table>\n<tr><th>Day</th><th>Max</th><th>Min</th></tr>\n",
            forecast.daily.len()
        ));
        for day in &forecast.daily {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{:.1}°C</td><td>{:.1}°C</td></tr>\n",
                day.date.format("%a %d %b"),
                day.max,
                day.min
            ));
        }
        body.push_str("</table>\n");
    }

    body.push_str(
        "<p><small>Location by ip-api.com. Weather data from MET Norway.</small></p>\n",
    );

    layout("Weather where you are", &body)
}

/// Render the page shown in place of weather data when the lookup fails
#[must_use]
pub fn render_error(error: &LookupError) -> String {
    let body = format!(
        "<h1>Weather unavailable</h1>\n<p>{}</p>\n",
        escape(&error.user_message())
    );
    layout("Weather unavailable", &body)
}
