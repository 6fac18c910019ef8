#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use tracing::{info, warn};
    use tracing_subscriber::EnvFilter;
    use wcag_schedule::{JsonResultStore, ResultStore, ScheduleOptions, http_api, load_dataset};

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wcag_schedule=info")),
        )
        .with_target(false)
        .init();

    let addr: SocketAddr = std::env::var("WCAG_SCHEDULE_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;
    let dataset_path = std::env::var("WCAG_SCHEDULE_DATASET")
        .map_err(|_| "WCAG_SCHEDULE_DATASET must point to the criteria JSON file")?;
    let options = match std::env::var("WCAG_SCHEDULE_OPTIONS") {
        Ok(path) => ScheduleOptions::load_from_json(path)?,
        Err(_) => ScheduleOptions::default(),
    };
    let store = std::env::var("WCAG_SCHEDULE_RESULTS")
        .ok()
        .map(JsonResultStore::new);

    let dataset = load_dataset(&dataset_path)?;
    let mut state = http_api::AppState::new(dataset, options);
    if let Some(store) = &store {
        if let Some(results) = store.load_results()? {
            info!(
                "Loaded {} results from {}",
                results.len(),
                store.path().display()
            );
            state = state.with_results(results);
        }
    }
    let results = state.results();

    println!("wcag-schedule HTTP API listening on http://{addr}");
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {err}");
        }
    };
    http_api::serve(addr, state, shutdown).await?;

    if let Some(store) = &store {
        let results = results.read().clone();
        store.save_results(&results)?;
        info!("Saved {} results to {}", results.len(), store.path().display());
    }
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
