mod documents;
mod fallback;
mod health;
mod meetings;
mod users;

pub use documents::{
    answer_handler, delete_document_handler, list_documents_handler, punctuate_handler,
    upload_multiple_handler, upload_single_handler,
};
pub use fallback::not_found_handler;
pub use health::health_handler;
pub use meetings::{
    list_meetings_handler, save_meeting_handler, schedule_demo_handler, single_meeting_handler,
    update_meeting_handler,
};
pub use users::{
    current_user_handler, generate_reset_token_handler, invite_team_member_handler,
    login_handler, realtime_token_handler, remove_team_member_handler, sign_up_handler,
    team_members_handler, update_current_user_handler, update_forgotten_password_handler,
    update_password_handler, verify_reset_token_handler,
};
