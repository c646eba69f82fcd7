use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Router, routing::get};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::InternalError;
use crate::routes::index::render_main;
use crate::weather::{self, WeatherError, WeatherReport, WeatherService};

pub fn routes(state: AppState) -> Router {
    Router::new().route("/", get(get_weather)).with_state(state)
}

const DEFAULT_REPORT_COUNT: i32 = 5;

#[derive(Deserialize, Debug)]
pub struct WeatherQuery {
    count: Option<i32>,
    continent: Option<String>,
}

impl WeatherQuery {
    pub fn count(&self) -> i32 {
        self.count.unwrap_or(DEFAULT_REPORT_COUNT)
    }

    // The filter form submits an empty value for "all continents".
    pub fn continent(&self) -> Option<&str> {
        self.continent.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Template)]
#[template(path = "weather.html")]
struct WeatherTemplate {
    reports: Vec<WeatherReport>,
    continents: Vec<&'static str>,
    count: i32,
}

async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response, InternalError> {
    let reports = {
        let mut random_source = state.random_source.lock().await;
        let mut service = WeatherService::new(&mut *random_source);
        match service.sample_reports(query.count(), query.continent()) {
            Ok(reports) => reports,
            Err(WeatherError::InvalidCount { count }) => {
                log::debug!("rejecting weather page request with count {}", count);
                return Ok(StatusCode::BAD_REQUEST.into_response());
            }
        }
    };

    let content = WeatherTemplate {
        reports,
        continents: weather::continents(),
        count: query.count(),
    }
    .render()?;
    Ok(Html(render_main(content)?).into_response())
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use axum::{
        body::Body,
        http::{self, Request, StatusCode},
    };
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    use crate::random::ScriptedRandomSource;

    fn scripted_app(source: ScriptedRandomSource) -> Router {
        routes(AppState {
            random_source: Arc::new(Mutex::new(source)),
        })
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_weather_page() {
        let app = scripted_app(
            ScriptedRandomSource::new()
                .with_sequence(0, 10, &[0, 1, 2, 3, 4])
                .with_sequence(0, 7, &[0, 1, 2, 3, 4])
                .with_sequence(-10, 35, &[20, 21, 22, 23, 24]),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method(http::Method::GET)
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with(mime::TEXT_HTML.as_ref()));

        let html = body_string(response).await;
        for city in ["New York", "London", "Tokyo", "Sydney", "Paris"] {
            assert!(html.contains(city), "page should list {city}");
        }
    }

    #[tokio::test]
    async fn test_get_weather_page_with_continent_filter() {
        let app = scripted_app(
            ScriptedRandomSource::new()
                .with_sequence(0, 2, &[0, 1])
                .with_sequence(0, 7, &[2])
                .with_sequence(-10, 35, &[15]),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method(http::Method::GET)
                    .uri("/?count=2&continent=North%20America")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("New York"));
        assert!(html.contains("Toronto"));
        assert!(!html.contains("London"));
    }

    #[tokio::test]
    async fn test_empty_continent_means_no_filter() {
        let app = scripted_app(
            ScriptedRandomSource::new()
                .with_sequence(0, 10, &[1])
                .with_sequence(0, 7, &[0])
                .with_sequence(-10, 35, &[8]),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method(http::Method::GET)
                    .uri("/?count=1&continent=")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("London"));
    }

    #[tokio::test]
    async fn test_negative_count_is_rejected() {
        let app = scripted_app(ScriptedRandomSource::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method(http::Method::GET)
                    .uri("/?count=-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_continent_renders_empty_table() {
        let app = scripted_app(ScriptedRandomSource::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method(http::Method::GET)
                    .uri("/?continent=Atlantis")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(!html.contains("<td>"));
    }
}
