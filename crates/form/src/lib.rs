//! Client side of the contact form: draft state, submission state machine and
//! the HTTP call to the relay.

mod controller;
mod draft;
mod transport;

pub use controller::*;
pub use draft::*;
pub use transport::*;
