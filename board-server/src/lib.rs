//! HTTP side of the chessboard page: one templated route plus the static
//! assets the page loads.

use std::fs;
use std::sync::Arc;

use axum::{Router, extract::State, response::Html, routing::get};
use board_core::Palette;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod config;

pub use config::Config;

/// Page used when no `index.html` is found in the web directory.
pub const BUILTIN_TEMPLATE: &str = include_str!("../../web/index.html");

#[derive(Clone)]
pub struct AppState {
    page: Arc<str>,
}

/// Substitute the initial colors and canvas size into the page template.
pub fn render_page(template: &str, palette: &Palette, canvas_size: u32) -> String {
    template
        .replace("{{light}}", &html_attr_escape(&palette.light))
        .replace("{{dark}}", &html_attr_escape(&palette.dark))
        .replace("{{canvas_size}}", &canvas_size.to_string())
}

fn html_attr_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn load_template(config: &Config) -> String {
    let path = config.web_dir.join("index.html");
    match fs::read_to_string(&path) {
        Ok(t) => {
            info!(path = %path.display(), "loaded page template");
            t
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "using built-in page template");
            BUILTIN_TEMPLATE.to_string()
        }
    }
}

/// The page never changes after start-up, so it is rendered once here.
pub fn router(config: &Config) -> Router {
    let template = load_template(config);
    let page = render_page(&template, &config.palette(), config.canvas_size);
    router_with_page(page, config)
}

pub fn router_with_page(page: String, config: &Config) -> Router {
    let state = AppState { page: page.into() };
    Router::new()
        .route("/", get(index))
        .nest_service("/images", ServeDir::new(&config.images_dir))
        .nest_service("/pkg", ServeDir::new(&config.pkg_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    info!("serving board page");
    Html(state.page.to_string())
}
