pub mod mailer;
pub mod relay;
