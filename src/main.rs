use clinicdesk_api::config::ApiConfig;
use clinicdesk_db::create_pool;
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool; the schema is managed outside this service
    let db_pool = create_pool(&config.database_url).await?;

    // Start API server
    clinicdesk_api::start_server(config, db_pool).await?;

    Ok(())
}
