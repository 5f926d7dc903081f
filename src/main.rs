use std::sync::Arc;

use clap::Parser;
use mobility_fetch::utils::{logger, validation::Validate};
use mobility_fetch::{CityDirectory, CliConfig, MigrationPipeline, MobilityError, ReportEngine};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("starting mobility-fetch");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let query = config.query().unwrap_or_else(|e| fail(&e));
    tracing::info!(
        "{} {} move {} on {}",
        query.app,
        query.city.key(),
        query.direction,
        query.dates.join(", ")
    );

    let directory = Arc::new(CityDirectory::load().unwrap_or_else(|e| fail(&e)));
    let pipeline = MigrationPipeline::new(config.endpoint.clone(), query, directory)
        .unwrap_or_else(|e| fail(&e));
    let mut sink = config.open_sink().unwrap_or_else(|e| fail(&e));

    let engine = ReportEngine::new(pipeline);
    match engine.run(sink.as_mut()).await {
        Ok(rows) => tracing::info!("✅ retrieved {rows} rows"),
        Err(e) => fail(&e),
    }
}

fn fail(error: &MobilityError) -> ! {
    tracing::error!("run failed: {error}");
    eprintln!("❌ {error}");
    std::process::exit(error.exit_code());
}
