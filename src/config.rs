use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::formatting::BoilerplateFilter;
use crate::services::session::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL};

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: SecretString,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub generation_timeout_secs: u64,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
    pub boilerplate_markers: Vec<String>,
    pub max_sessions: usize,
    pub session_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: SecretString::from(
                env::var("GEMINI_API_KEY")
                    .or_else(|_| env::var("API_KEY"))
                    .unwrap_or_default(),
            ),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            generation_timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|o| !o.trim().is_empty()),
            boilerplate_markers: env::var("BOILERPLATE_MARKERS")
                .ok()
                .map(|raw| parse_markers(&raw))
                .filter(|markers| !markers.is_empty())
                .unwrap_or_else(|| BoilerplateFilter::default().markers().to_vec()),
            max_sessions: env::var("MAX_SESSIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_SESSIONS),
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SESSION_TTL.as_secs()),
        }
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn boilerplate_filter(&self) -> BoilerplateFilter {
        BoilerplateFilter::new(self.boilerplate_markers.iter().map(String::as_str))
    }

    /// Validate that production-critical configuration is set
    /// Panics if the generation API key is missing
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.gemini_api_key.expose_secret().trim().is_empty() {
            panic!(
                "FATAL: GEMINI_API_KEY is not set! Set GEMINI_API_KEY (or API_KEY) to a valid key for the generation service."
            );
        }

        if self.generation_timeout_secs == 0 {
            panic!("FATAL: GENERATION_TIMEOUT_SECS must be greater than zero.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            gemini_api_key: SecretString::from("test_api_key".to_string()),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            generation_timeout_secs: 5,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
            boilerplate_markers: BoilerplateFilter::default().markers().to_vec(),
            max_sessions: DEFAULT_MAX_SESSIONS,
            session_ttl_secs: DEFAULT_SESSION_TTL.as_secs(),
        }
    }
}

fn parse_markers(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
