use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("navigation timed out: {0}")]
    NavigationTimeout(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("timed out waiting for element: {0}")]
    WaitTimeout(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("file I/O error: {0}")]
    FileIO(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// A page element that should be there is missing, either immediately or
    /// after waiting for it.
    pub fn is_missing_element(&self) -> bool {
        matches!(self, Self::ElementNotFound(_) | Self::WaitTimeout(_))
    }

    pub fn is_navigation_timeout(&self) -> bool {
        matches!(self, Self::NavigationTimeout(_))
    }
}
