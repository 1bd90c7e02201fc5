use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the external product API
    pub restful_api_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            restful_api_url: env::var("RESTFUL_API_URL")
                .unwrap_or_else(|_| "https://api.restful-api.dev".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}
