//! Request and response payloads

pub mod registration;

pub use registration::{
    CodeSentResponse, DetailResponse, RegisterRequest, ResendEmailRequest, ResendPhoneRequest,
    VerifyEmailRequest, VerifyPhoneRequest,
};
