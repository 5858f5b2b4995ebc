mod mailer;
mod service;
pub(crate) mod template;

pub use mailer::*;
pub use service::*;
