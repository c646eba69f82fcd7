use askama::Template;
use axum::response::Redirect;

use crate::error::InternalError;

#[derive(Template)]
#[template(path = "index.html", escape = "none")]
struct IndexTemplate {
    content: String,
}

pub async fn get_index() -> Redirect {
    Redirect::to("/weather")
}

/// Wraps rendered page content in the site chrome.
pub fn render_main(content: String) -> Result<String, InternalError> {
    Ok(IndexTemplate { content }.render()?)
}
