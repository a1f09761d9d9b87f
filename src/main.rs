use dotenv::dotenv;
use tracing::{info, warn};

use oakridge_backend::app::app::App;
use oakridge_backend::util::logger::Logger;

#[tokio::main]
async fn main() {
    // Console + rolling file logging; the guards must stay alive for the
    // lifetime of the process.
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("🚀 Starting OakRidge Remodeling Backend");

    match dotenv() {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = App::new().await;
    app.start().await;
}
