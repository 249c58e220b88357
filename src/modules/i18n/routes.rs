use axum::{routing::get, Router};

use super::handlers::{get_current_language, get_supported_languages, get_translations};
use crate::app_state::AppState;

/// Create i18n routes
pub fn create_i18n_routes() -> Router<AppState> {
    Router::new()
        .route("/languages", get(get_supported_languages))
        .route("/translations", get(get_translations))
        .route("/current-language", get(get_current_language))
}
