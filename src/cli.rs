use crate::scrapers::types::DEFAULT_AREA;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Scrape property listings and serve price predictions
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Log output format
    #[arg(long, value_enum, default_value_t = TracingFormat::Pretty, global = true)]
    pub tracing: TracingFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TracingFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Crawl listings area by area and write the results table
    Scrape(ScrapeArgs),
    /// Run the prediction API
    Serve(ServeArgs),
}

#[derive(Debug, ClapArgs)]
pub struct ScrapeArgs {
    /// Area to search; repeat for several
    #[arg(long = "area", default_value = DEFAULT_AREA)]
    pub areas: Vec<String>,

    /// Also write the table as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, ClapArgs)]
pub struct ServeArgs {
    /// Overrides the configured port
    #[arg(long)]
    pub port: Option<u16>,
}
