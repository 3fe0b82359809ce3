use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub api_url: String,
    pub http_timeout_secs: u64,
    pub default_per_page: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            api_url: env::var("API_URL").expect("API_URL must be set"),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            default_per_page: env::var("DEFAULT_PER_PAGE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap(),
        }
    }

    /// Config pointing at an arbitrary base URL, for tests and tooling.
    pub fn for_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            http_timeout_secs: 30,
            default_per_page: 10,
        }
    }
}
