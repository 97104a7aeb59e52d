mod server;
mod smtp;

pub use server::serve;
pub use smtp::smtp_check;
