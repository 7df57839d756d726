pub mod app;
pub mod config;
pub mod server;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load environment and build the runtime config.
pub fn init_config() -> AppConfig {
    load_dotenv();
    let config = AppConfig::load();
    tracing::info!(
        port = config.server_port,
        api = %config.api_base_url,
        case_sensitive = config.case_sensitive_default,
        "Settings loaded"
    );
    config
}
