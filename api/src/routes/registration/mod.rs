//! Registration and verification endpoints

mod register;
mod resend;
mod verify;

pub use register::register;
pub use resend::{resend_email, resend_phone};
pub use verify::{verify_email, verify_phone};
