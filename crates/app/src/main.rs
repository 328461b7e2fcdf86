use engine::{Engine, Fixtures, Latency, Store};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "wayfarer={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let latency = Latency::scaled(settings.store.latency_ms_scale);
    let store = if settings.store.seed {
        let fixtures = Fixtures::bundled()?;
        tracing::info!(
            "Seeding store with {} trips, {} days, {} activities, {} expenses",
            fixtures.trips.len(),
            fixtures.itinerary_days.len(),
            fixtures.activities.len(),
            fixtures.expenses.len()
        );
        Store::seeded(fixtures, latency)
    } else {
        tracing::info!("Starting with an empty store");
        Store::in_memory(latency)
    };

    let engine = Engine::builder().store(store).build().await?;

    let listener = tokio::net::TcpListener::bind(settings.address()).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}
