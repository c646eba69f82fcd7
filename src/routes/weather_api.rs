use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use serde::Serialize;

use crate::app::AppState;
use crate::routes::weather::WeatherQuery;
use crate::weather::{WeatherError, WeatherReport, WeatherService};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_weather_reports))
        .with_state(state)
}

// Wire shape of a report. The Fahrenheit value is derived from the Celsius
// one at the serialization boundary.
#[derive(Serialize, Debug)]
struct WeatherReportJson {
    city: String,
    description: String,
    temperature_c: i32,
    temperature_f: i32,
}

impl From<WeatherReport> for WeatherReportJson {
    fn from(report: WeatherReport) -> WeatherReportJson {
        let temperature_f = report.temperature_f();
        WeatherReportJson {
            city: report.city,
            description: report.description,
            temperature_c: report.temperature_c,
            temperature_f,
        }
    }
}

async fn get_weather_reports(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Response {
    let mut random_source = state.random_source.lock().await;
    let mut service = WeatherService::new(&mut *random_source);
    match service.sample_reports(query.count(), query.continent()) {
        Ok(reports) => Json(
            reports
                .into_iter()
                .map(WeatherReportJson::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(WeatherError::InvalidCount { count }) => {
            log::debug!("rejecting weather api request with count {}", count);
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}
