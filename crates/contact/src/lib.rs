//! Contact relay: validates a contact form submission and hands it to a mail
//! provider.

mod error;
mod mailer;
mod relay;
mod types;

pub use error::*;
pub use mailer::*;
pub use relay::*;
pub use types::*;
