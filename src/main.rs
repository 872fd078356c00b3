use scoreboard::{
    router, seed_demo_data, AppConfig, AppState, InMemoryScoreStore, LeaderboardBuilder,
    RefreshScheduler, ScoreStore,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoreboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    info!(?config, "Starting scoreboard server");

    let store: Arc<dyn ScoreStore> = Arc::new(InMemoryScoreStore::new());

    if config.seed_demo_data {
        if let Err(e) = seed_demo_data(store.as_ref()).await {
            error!(error = %e, "Failed to load demo data");
        }
    }

    if let Some(modality_id) = config.watch_modality.as_deref() {
        let scheduler = RefreshScheduler::new(
            Arc::new(LeaderboardBuilder::new(Arc::clone(&store))),
            config.refresh.clone(),
        );
        let mut subscription = scheduler.subscribe(modality_id);
        tokio::spawn(async move {
            while let Some(snapshot) = subscription.recv().await {
                info!(
                    modality_id = %snapshot.modality_id,
                    sequence = snapshot.sequence,
                    ranking = ?snapshot.ranking(),
                    "Leaderboard refreshed"
                );
            }
        });
    }

    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await
}
