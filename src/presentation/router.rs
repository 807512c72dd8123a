use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    answer_handler, current_user_handler, delete_document_handler, generate_reset_token_handler,
    health_handler, invite_team_member_handler, list_documents_handler, list_meetings_handler,
    login_handler, not_found_handler, punctuate_handler, realtime_token_handler,
    remove_team_member_handler, save_meeting_handler, schedule_demo_handler, sign_up_handler,
    single_meeting_handler, team_members_handler, update_current_user_handler,
    update_forgotten_password_handler, update_meeting_handler, update_password_handler,
    upload_multiple_handler, upload_single_handler, verify_reset_token_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.uploads.max_request_bytes);

    let users = Router::new()
        .route("/signup", post(sign_up_handler))
        .route("/login", post(login_handler))
        .route(
            "/generatePasswordResetToken",
            post(generate_reset_token_handler),
        )
        .route(
            "/verifyPasswordResetToken",
            post(verify_reset_token_handler),
        )
        .route(
            "/updateForgettedPassword",
            post(update_forgotten_password_handler),
        )
        .route("/getCurrentUser", get(current_user_handler))
        .route("/updateCurrentUser", post(update_current_user_handler))
        .route("/updatePassword", post(update_password_handler))
        .route("/inviteTeamMember", post(invite_team_member_handler))
        .route("/removeTeamMember", post(remove_team_member_handler))
        .route("/getTeamMembers", get(team_members_handler))
        .route("/assemblyToken", get(realtime_token_handler));

    let langchain = Router::new()
        .route("/getOpenAIResponse/{question}", get(answer_handler))
        .route("/getQuestionsFromPhrase/{phrase}", get(punctuate_handler))
        .route("/getAllDocuments", get(list_documents_handler))
        .route("/uploadeSinglePdfToVectorDb", post(upload_single_handler))
        .route(
            "/uploadeMultiplePdfsToVectorDb",
            post(upload_multiple_handler),
        )
        .route("/deleteDocument", post(delete_document_handler))
        .layer(body_limit);

    let meetings = Router::new()
        .route("/getAllMeetings", get(list_meetings_handler))
        .route("/getSingleMeeting/{id}", get(single_meeting_handler))
        .route("/saveMeeting", post(save_meeting_handler))
        .route("/updateMeeting", post(update_meeting_handler))
        .route("/scheduleDemo", post(schedule_demo_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/users", users)
        .nest("/api/langchain", langchain)
        .nest("/api/meeting", meetings)
        .fallback(not_found_handler)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
