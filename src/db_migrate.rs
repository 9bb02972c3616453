use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use klawed_db::schema::initialize_database;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;

    info!("Connecting to database...");
    let db_pool = klawed_db::create_pool(&database_url).await?;

    initialize_database(&db_pool).await?;

    Ok(())
}
