//! Configuration types loaded from environment variables

mod environment;
mod server;

pub use environment::Environment;
pub use server::ServerConfig;
