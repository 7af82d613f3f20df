use dotenvy::dotenv;
use motoshop::{
    config::{admin, catalog as catalog_config, database},
    core::{catalog, profile},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 4. Seed the catalog from config.toml on first run
    let config = catalog_config::load_default_config()?;
    catalog::seed_catalog(&db, &config.motorcycles)
        .await
        .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;

    // 5. Bootstrap the superuser, if configured
    if let Some(superuser) = admin::get_superuser_config() {
        if profile::get_profile_by_email(&db, &superuser.email)
            .await?
            .is_some()
        {
            info!("Superuser {} already exists.", superuser.email);
        } else {
            profile::create_superuser(&db, &superuser.email, &superuser.name, &superuser.password)
                .await
                .inspect_err(|e| error!("Failed to create superuser: {}", e))?;
        }
    }

    // 6. Summary
    for motorcycle in catalog::list_motorcycles(&db).await? {
        info!(
            "{} [{}, {} cyl] {:.2} ({} in stock)",
            motorcycle,
            motorcycle.motorcycle_category.label(),
            motorcycle.number_of_cylinders.count(),
            motorcycle.price,
            motorcycle.quantity
        );
    }
    info!(
        "Ready: {} motorcycles, {} profiles.",
        catalog::count_motorcycles(&db).await?,
        profile::list_profiles(&db).await?.len()
    );

    Ok(())
}
