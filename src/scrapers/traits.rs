use crate::scrapers::error::ScrapeError;
use std::time::Duration;

/// Browser operations the scraper needs.
///
/// Elements are addressed by XPath. Lookups that find nothing fail with
/// [`ScrapeError::ElementNotFound`]; use [`BrowserDriver::is_present`] where
/// absence is an expected answer rather than a failure.
pub trait BrowserDriver {
    /// Load a URL and wait for the navigation to finish
    fn navigate(&self, url: &str) -> Result<(), ScrapeError>;

    /// Reload the current page
    fn refresh(&self) -> Result<(), ScrapeError>;

    /// Full HTML of the current document
    fn page_html(&self) -> Result<String, ScrapeError>;

    fn is_present(&self, xpath: &str) -> Result<bool, ScrapeError>;

    /// Block until the element exists or the timeout elapses
    fn wait_for(&self, xpath: &str, timeout: Duration) -> Result<(), ScrapeError>;

    /// Move the pointer over the element, scrolling it into view
    fn hover(&self, xpath: &str) -> Result<(), ScrapeError>;

    fn click(&self, xpath: &str) -> Result<(), ScrapeError>;

    /// Focus the element and type text into it
    fn type_text(&self, xpath: &str, text: &str) -> Result<(), ScrapeError>;

    fn press_enter(&self) -> Result<(), ScrapeError>;
}
