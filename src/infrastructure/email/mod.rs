mod log_mailer;
mod recording_mailer;
mod smtp_mailer;

pub use log_mailer::LogMailer;
pub use recording_mailer::RecordingMailer;
pub use smtp_mailer::SmtpMailer;
