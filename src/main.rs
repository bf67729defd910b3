use std::sync::Arc;
use std::time::Duration;

use fanno_annotator::application::{run_smoke, AnnotationController};
use fanno_annotator::config::ClientConfig;
use fanno_annotator::domain::annotation::InputCollector;
use fanno_annotator::domain::errors::AnnotationResult;
use fanno_annotator::infrastructure::http::{HttpAnnotationTransport, HttpHealthProbe};

const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let retry = std::env::args().skip(1).any(|arg| arg == "--retry");
    let attempts = if retry { MAX_ATTEMPTS } else { 1 };

    tracing::info!("Running smoke tests against {}", config.base_url);

    for attempt in 1..=attempts {
        match run_once(&config).await {
            Ok(()) => {
                tracing::info!("All smoke tests passed");
                return;
            }
            Err(e) => {
                tracing::error!("Attempt {}/{} failed: {}", attempt, attempts, e);
                if attempt < attempts {
                    tracing::info!("Retrying in {} seconds", RETRY_DELAY.as_secs());
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }

    tracing::error!("All smoke test attempts failed");
    std::process::exit(1);
}

async fn run_once(config: &ClientConfig) -> AnnotationResult<()> {
    let probe = HttpHealthProbe::with_path(
        config.base_url.clone(),
        config.health_path.clone(),
        config.request_timeout,
    )?;
    let transport = HttpAnnotationTransport::with_timeout(
        config.base_url.clone(),
        config.endpoint,
        config.request_timeout,
    )?;
    let controller = AnnotationController::new(
        Arc::new(transport),
        InputCollector::with_max_chars(config.max_input_chars),
        config.submit_policy,
    );

    let report = run_smoke(&probe, &controller, &config.smoke_text).await?;

    for (index, annotation) in report.annotations.iter().enumerate() {
        println!("{}. {}", index + 1, annotation);
    }

    Ok(())
}
