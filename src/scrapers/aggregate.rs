use crate::models::{PropertyDetail, PropertyRecord};
use crate::scrapers::error::ScrapeError;
use crate::scrapers::retry::Outcome;
use crate::scrapers::scout::Scout;
use crate::scrapers::traits::BrowserDriver;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{info, warn};

const CSV_HEADER: [&str; 8] = [
    "",
    "suburb",
    "propert_desc",
    "address",
    "price",
    "property_details",
    "property_features",
    "image",
];

/// Records scraped in one run, named after the first area searched
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub area: String,
    pub records: Vec<PropertyRecord>,
}

impl<D: BrowserDriver + ?Sized> Scout<'_, D> {
    /// Collect links for every configured area, then scrape each property.
    ///
    /// A link that cannot be scraped is skipped; it never stops the run.
    pub fn run(&self) -> Result<ScrapeReport, ScrapeError> {
        let area_links = self.property_links(&self.settings.areas)?;
        let total = area_links.total_links();
        info!("Scraping {} properties across {} areas", total, area_links.len());

        let mut records = Vec::new();
        let mut visited = 0;
        for (area, links) in area_links.iter() {
            for link in links {
                visited += 1;
                info!(progress = %format!("{}/{}", visited, total), %link, "Visiting property");

                match self.scrape_link(link) {
                    Ok(Outcome::Found(detail)) => records.push(detail.into_record(area)),
                    Ok(Outcome::Exhausted {
                        attempts,
                        last_error,
                    }) => {
                        warn!(%link, attempts, error = %last_error, "No record produced, skipping");
                    }
                    Err(e) => warn!(%link, error = %e, "Property scrape failed, skipping"),
                }
            }
        }

        let area = area_links
            .first_area()
            .or(self.settings.areas.first().map(String::as_str))
            .unwrap_or("properties")
            .to_string();

        info!("✅ Scraped {} of {} properties", records.len(), total);
        Ok(ScrapeReport { area, records })
    }

    fn scrape_link(&self, link: &str) -> Result<Outcome<PropertyDetail>, ScrapeError> {
        self.open_browser(link)?;
        self.property_scrape()
    }
}

impl ScrapeReport {
    pub fn csv_file_name(&self) -> String {
        format!("{}_real_estate.csv", self.area)
    }

    pub fn json_file_name(&self) -> String {
        format!("{}_real_estate.json", self.area)
    }

    /// Write the table with a leading row index; list columns are JSON arrays
    pub fn write_csv(&self, path: &Path) -> Result<(), ScrapeError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(CSV_HEADER)?;

        for (index, record) in self.records.iter().enumerate() {
            writer.write_record([
                index.to_string(),
                record.suburb.clone(),
                record.description.clone(),
                record.address.clone().unwrap_or_default(),
                record.price.clone(),
                serde_json::to_string(&record.property_details)?,
                serde_json::to_string(&record.property_features)?,
                record.image.clone(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ScrapeError> {
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, &self.records)?;
        Ok(())
    }
}
