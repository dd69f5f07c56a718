pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::assist::handlers as assist;
use crate::document::handlers as document;
use crate::export::handlers as export;
use crate::fetch::handlers as fetch;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document
        .route(
            "/api/v1/document",
            get(document::handle_get_document).patch(document::handle_patch_document),
        )
        .route("/api/v1/document/reset", post(document::handle_reset))
        .route(
            "/api/v1/document/experience",
            post(document::handle_add_experience),
        )
        .route(
            "/api/v1/document/experience/:id",
            delete(document::handle_remove_experience),
        )
        .route(
            "/api/v1/document/education",
            post(document::handle_add_education),
        )
        .route(
            "/api/v1/document/education/:id",
            delete(document::handle_remove_education),
        )
        .route("/api/v1/document/theme", post(document::handle_apply_theme))
        .route("/api/v1/document/save", post(document::handle_save))
        .route("/api/v1/document/load", post(document::handle_load))
        .route(
            "/api/v1/document/cv-upload",
            post(document::handle_cv_upload),
        )
        .route("/api/v1/onboarding", get(document::handle_onboarding))
        .route(
            "/api/v1/onboarding/seen",
            post(document::handle_onboarding_seen),
        )
        .route("/api/v1/layouts", get(document::handle_list_layouts))
        .route("/api/v1/themes", get(document::handle_list_themes))
        // Preview & export
        .route("/api/v1/preview", get(export::handle_preview))
        .route("/api/v1/export", get(export::handle_export))
        .route("/api/v1/export/print", get(export::handle_print))
        .route("/api/v1/export/clipboard", post(export::handle_copy))
        // Assistant
        .route("/api/v1/assist/analyze", post(assist::handle_analyze))
        .route(
            "/api/v1/assist/compatibility",
            post(assist::handle_recalculate),
        )
        .route(
            "/api/v1/assist/generate/:target",
            post(assist::handle_generate),
        )
        .route(
            "/api/v1/assist/experience/:id",
            post(assist::handle_generate_experience),
        )
        .route("/api/v1/assist/edit", post(assist::handle_edit))
        // Import
        .route("/api/v1/fetch/:source", post(fetch::handle_fetch))
        .route("/api/v1/images", get(fetch::handle_search_images))
        .with_state(state)
}
