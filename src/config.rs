use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub randomize_order: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("QUIZ_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5200),
            randomize_order: env::var("QUIZ_RANDOMIZE")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            data_dir: PathBuf::from("tests/fixtures"),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5200,
            randomize_order: false,
        }
    }
}
