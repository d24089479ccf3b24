pub mod aggregate;
pub mod browser;
pub mod detail;
pub mod error;
pub mod listing;
pub mod retry;
pub mod scout;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::ScrapeReport;
pub use browser::ChromeSession;
pub use error::ScrapeError;
pub use scout::Scout;
pub use traits::BrowserDriver;
pub use types::ScrapeSettings;
