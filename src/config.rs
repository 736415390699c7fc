//! Application configuration management.
//!
//! All values come from environment variables. Sensitive fields are marked
//! and must never be logged; the Gemini key in particular belongs in a secret
//! manager in production, not in source.

use envconfig::Envconfig;
use std::sync::LazyLock;

use crate::consts;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name the app runs in (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database host value (NON-SENSITIVE)
    /// Example: "sqlite:data/pet_care.db"
    #[envconfig(default = "sqlite:data/pet_care.db")]
    pub db_host: String,

    /// 🔒 SENSITIVE: Gemini API key
    pub gemini_api_key: String,

    /// Generative model to query (NON-SENSITIVE)
    #[envconfig(default = "gemini-pro")]
    pub gemini_model: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Constructs the generateContent endpoint for the configured model
    pub fn gemini_generate_endpoint(&self) -> String {
        format!(
            "{base}/{model}:generateContent",
            base = consts::GEMINI_API_BASE,
            model = self.gemini_model
        )
    }
}

/// Global application configuration instance.
///
/// Loaded on first access; a missing required variable is unrecoverable and
/// aborts startup.
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load application configuration. Check environment variables.")
});
