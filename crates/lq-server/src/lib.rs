//! HTTP server for LingoQuest.
//!
//! Combines the JSON API (`/api`), the HTML page routes and the static
//! `/assets` directory into one axum [`Router`], and owns the startup steps
//! that must finish before the first request is served.

pub mod pages;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use lq_core::{
  seed::default_catalog,
  store::{CatalogCounts, LearningStore, SeedOutcome},
};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

use pages::{PageRenderer, page_router};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `LQ_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub store_path:    PathBuf,
  /// Directory of `<page>.html` files; page routes are off when unset.
  #[serde(default)]
  pub templates_dir: Option<PathBuf>,
  /// Served under `/assets`; off when unset.
  #[serde(default)]
  pub assets_dir:    Option<PathBuf>,
}

impl ServerConfig {
  /// Layer defaults, the optional TOML file at `path`, then the environment.
  pub fn load(path: PathBuf) -> Result<Self, config::ConfigError> {
    let mut cfg: Self = config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 5000_i64)?
      .set_default("store_path", "app.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("LQ"))
      .build()?
      .try_deserialize()?;

    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.templates_dir = cfg.templates_dir.as_deref().map(expand_tilde);
    cfg.assets_dir = cfg.assets_dir.as_deref().map(expand_tilde);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Startup ──────────────────────────────────────────────────────────────────

/// Seed the catalog if the store is empty and report what it now holds.
///
/// Must complete before the listener is bound; an error here should abort
/// startup.
pub async fn seed_on_startup<S>(store: &S) -> Result<CatalogCounts, S::Error>
where
  S: LearningStore,
{
  match store.seed_catalog(default_catalog()).await? {
    SeedOutcome::Seeded(counts) => {
      tracing::info!(
        courses = counts.courses,
        topics = counts.topics,
        lessons = counts.lessons,
        "seeded empty catalog"
      );
      Ok(counts)
    }
    SeedOutcome::AlreadySeeded => {
      let counts = store.catalog_counts().await?;
      tracing::info!(
        courses = counts.courses,
        topics = counts.topics,
        lessons = counts.lessons,
        "catalog already present, skipping seed"
      );
      Ok(counts)
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: LearningStore + 'static,
{
  let mut app = Router::new().nest("/api", lq_api::api_router(store));

  if let Some(dir) = &config.templates_dir {
    app = app.merge(page_router(PageRenderer::new(dir.clone())));
  }
  if let Some(dir) = &config.assets_dir {
    app = app.nest_service("/assets", ServeDir::new(dir));
  }

  app.layer(TraceLayer::new_for_http())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
