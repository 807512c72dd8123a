mod logging;
mod prompt_sanitizer;
mod request_id;

pub use logging::{LogFormat, init_logging};
pub use prompt_sanitizer::sanitize_prompt;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
