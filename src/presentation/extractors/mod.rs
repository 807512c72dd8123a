mod caller_identity;
mod effective_tenant;
mod request_body;

pub use caller_identity::CallerIdentity;
pub use effective_tenant::EffectiveTenant;
pub use request_body::{JsonBody, UploadForm};
