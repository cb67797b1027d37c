//! HTML page routes.
//!
//! Pages are plain HTML files in a templates directory. The only templating
//! is `{{ name }}` substitution of values taken from the URL; everything else
//! is passed through untouched. This is not a template engine: `{% ... %}`
//! blocks, filters and `url_for(...)` calls reach the browser as written, so
//! templates must be plain HTML with asset links under `/assets`.

use std::{io, path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::{Path, Query, State},
  http::StatusCode,
  response::{Html, IntoResponse, Response},
  routing::{MethodRouter, get},
};
use serde::Deserialize;
use thiserror::Error;

/// `/course-details` defaults when the query string omits them.
pub const DEFAULT_LANGUAGE: &str = "Английский язык";
pub const DEFAULT_PROGRESS: &str = "40%";

// ─── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PageError {
  #[error("template not found: {0}")]
  NotFound(String),
  #[error("failed to read template {page}: {source}")]
  Io {
    page:   String,
    #[source]
    source: io::Error,
  },
}

impl IntoResponse for PageError {
  fn into_response(self) -> Response {
    match self {
      PageError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
      PageError::Io { .. } => {
        tracing::error!(error = %self, "page render failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
    }
  }
}

// ─── Renderer ─────────────────────────────────────────────────────────────────

/// Reads `<dir>/<page>.html` and fills its placeholders.
#[derive(Clone)]
pub struct PageRenderer {
  dir: Arc<PathBuf>,
}

impl PageRenderer {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: Arc::new(dir.into()) } }

  pub async fn render(
    &self,
    page: &str,
    vars: &[(&str, &str)],
  ) -> Result<Html<String>, PageError> {
    let path = self.dir.join(format!("{page}.html"));
    let template = tokio::fs::read_to_string(&path).await.map_err(|e| {
      if e.kind() == io::ErrorKind::NotFound {
        PageError::NotFound(page.to_owned())
      } else {
        PageError::Io { page: page.to_owned(), source: e }
      }
    })?;
    Ok(Html(fill(&template, vars)))
  }
}

/// Replace `{{ name }}` (inner whitespace optional) with the HTML-escaped
/// value of `name`. Unknown names and unterminated braces are left verbatim.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
  let mut out = String::with_capacity(template.len());
  let mut rest = template;

  while let Some(start) = rest.find("{{") {
    out.push_str(&rest[..start]);
    let after = &rest[start + 2..];
    let Some(end) = after.find("}}") else {
      rest = &rest[start..];
      break;
    };

    let name = after[..end].trim();
    match vars.iter().find(|(k, _)| *k == name) {
      Some((_, value)) => out.push_str(&escape_html(value)),
      None => out.push_str(&rest[start..start + 2 + end + 2]),
    }
    rest = &after[end + 2..];
  }

  out.push_str(rest);
  out
}

fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

// ─── Routes ───────────────────────────────────────────────────────────────────

/// Build the page router. Placeholders available per page:
///
/// | Route | Page | Placeholders |
/// |-------|------|--------------|
/// | `/course-details` | `course-details` | `language`, `progress` |
/// | `/course/{course_id}` | `course` | `course_id` |
/// | `/course/{course_id}/topic/{topic_key}` | `topic` | `course_id`, `topic_key` |
/// | `/course/{course_id}/lesson/{lesson_id}` | `lesson` | `course_id`, `lesson_id` |
///
/// All other pages take no placeholders.
pub fn page_router(renderer: PageRenderer) -> Router {
  Router::new()
    .route("/", static_page("index"))
    .route("/auth", static_page("auth"))
    .route("/account", static_page("account"))
    .route("/courses", static_page("courses"))
    .route("/course-details", get(course_details))
    .route("/logout", static_page("logout"))
    .route("/course/{course_id}", get(course))
    .route("/course/{course_id}/topic/{topic_key}", get(topic))
    .route("/course/{course_id}/lesson/{lesson_id}", get(lesson))
    .route("/settings", static_page("settings"))
    .route("/shop", static_page("shop"))
    .with_state(renderer)
}

fn static_page(page: &'static str) -> MethodRouter<PageRenderer> {
  get(move |State(renderer): State<PageRenderer>| async move {
    renderer.render(page, &[]).await
  })
}

#[derive(Debug, Deserialize)]
pub struct CourseDetailsParams {
  pub lang:     Option<String>,
  pub progress: Option<String>,
}

async fn course_details(
  State(renderer): State<PageRenderer>,
  Query(params): Query<CourseDetailsParams>,
) -> Result<Html<String>, PageError> {
  let language = params.lang.unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned());
  let progress = params.progress.unwrap_or_else(|| DEFAULT_PROGRESS.to_owned());
  renderer
    .render("course-details", &[("language", language.as_str()), ("progress", progress.as_str())])
    .await
}

async fn course(
  State(renderer): State<PageRenderer>,
  Path(course_id): Path<String>,
) -> Result<Html<String>, PageError> {
  renderer.render("course", &[("course_id", course_id.as_str())]).await
}

async fn topic(
  State(renderer): State<PageRenderer>,
  Path((course_id, topic_key)): Path<(String, String)>,
) -> Result<Html<String>, PageError> {
  renderer
    .render("topic", &[("course_id", course_id.as_str()), ("topic_key", topic_key.as_str())])
    .await
}

async fn lesson(
  State(renderer): State<PageRenderer>,
  Path((course_id, lesson_id)): Path<(String, String)>,
) -> Result<Html<String>, PageError> {
  renderer
    .render("lesson", &[("course_id", course_id.as_str()), ("lesson_id", lesson_id.as_str())])
    .await
}
