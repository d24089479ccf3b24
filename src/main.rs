use anyhow::Context;
use clap::Parser;
use property_scout::cli::{Args, Command, ScrapeArgs, ServeArgs};
use property_scout::config::Config;
use property_scout::predict::Predictor;
use property_scout::scrapers::{ChromeSession, ScrapeReport, ScrapeSettings, Scout};
use property_scout::{logging, web};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::load().context("Failed to load configuration")?;
    logging::setup_logging(&config.log_level, args.tracing);

    info!(version = env!("CARGO_PKG_VERSION"), "🏠 Property Scout");

    match args.command {
        Command::Scrape(scrape) => run_scrape(config, scrape).await,
        Command::Serve(serve) => run_serve(config, serve).await,
    }
}

async fn run_scrape(config: Config, args: ScrapeArgs) -> anyhow::Result<()> {
    let settings = ScrapeSettings::from_config(&config, args.areas);
    let headless = config.headless && !args.headful;
    let output_dir = args.output_dir.unwrap_or(config.output_dir);

    info!(areas = ?settings.areas, "Starting browser-based scrape");

    // headless_chrome blocks, so the whole session runs off the async runtime
    let report = tokio::task::spawn_blocking(move || -> anyhow::Result<ScrapeReport> {
        let session = ChromeSession::launch(headless, settings.element_timeout)?;
        let result = Scout::new(&session, settings).run();
        session.close();
        Ok(result?)
    })
    .await
    .context("Scrape task panicked")??;

    for (i, record) in report.records.iter().enumerate() {
        println!("{}. {} ({})", i + 1, record.description, record.price);
        if let Some(address) = &record.address {
            println!("   Address: {}", address);
        }
        println!("   Details: {}", record.property_details.join(", "));
        println!("   Features: {}", record.property_features.join(", "));
        println!();
    }

    tokio::fs::create_dir_all(&output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let csv_path = output_dir.join(report.csv_file_name());
    report
        .write_csv(&csv_path)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    info!("💾 Saved {} properties to {}", report.records.len(), csv_path.display());

    if args.json {
        let json_path = output_dir.join(report.json_file_name());
        report
            .write_json(&json_path)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        info!("💾 Saved JSON to {}", json_path.display());
    }

    Ok(())
}

async fn run_serve(config: Config, args: ServeArgs) -> anyhow::Result<()> {
    let predictor = Predictor::from_config(&config).context("Failed to load trained artifacts")?;
    let router = web::create_router(web::AppState::new(predictor));

    let port = args.port.unwrap_or(config.port);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Prediction API listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
