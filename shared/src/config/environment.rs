//! Runtime environment detection

use serde::{Deserialize, Serialize};

/// Runtime environment the server is deployed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Read the environment from `APP_ENV`, defaulting to development
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Both tests mutate APP_ENV; they must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults_to_development() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Environment::Development);
    }

    #[test]
    fn test_production_detection() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("APP_ENV", "production");
        assert!(Environment::from_env().is_production());
        std::env::remove_var("APP_ENV");
    }
}
