//! # Clinic Server
//!
//! Thin entry point that delegates to lib-web for server setup.

use lib_utils::get_env_parse_or;
use lib_web::{start_server, ServerConfig};

const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let port: u16 = get_env_parse_or("PORT", DEFAULT_PORT)?;
    let config = ServerConfig {
        bind_address: format!("0.0.0.0:{}", port),
        ..Default::default()
    };

    start_server(config).await
}
