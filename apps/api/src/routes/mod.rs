pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::documents::handlers as documents;
use crate::pipeline::handlers as pipeline;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Applications API
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications)
                .post(applications::handle_create_application),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::handle_get_application)
                .patch(applications::handle_update_application)
                .delete(applications::handle_delete_application),
        )
        // Documents API
        .route(
            "/api/v1/documents/resume",
            put(documents::handle_upload_resume).get(documents::handle_download_resume),
        )
        .route(
            "/api/v1/documents/photo",
            put(documents::handle_upload_photo).get(documents::handle_download_photo),
        )
        // AI API
        .route("/api/v1/roadmap", post(pipeline::handle_roadmap))
        .route(
            "/api/v1/interview/questions",
            post(pipeline::handle_interview_questions),
        )
        .route(
            "/api/v1/interview/feedback",
            post(pipeline::handle_interview_feedback),
        )
        .route("/api/v1/cover-letter", post(pipeline::handle_cover_letter))
        .with_state(state)
}
