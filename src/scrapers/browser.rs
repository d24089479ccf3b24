use crate::scrapers::error::ScrapeError;
use crate::scrapers::traits::BrowserDriver;
use anyhow::{Context, Result};
use headless_chrome::browser::tab::{NavigationFailed, NoElementFound};
use headless_chrome::util::Timeout;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Headless Chrome with a single tab, shared by every step of a scrape.
///
/// The browser process is shut down by [`ChromeSession::close`] or, failing
/// that, when the session is dropped.
pub struct ChromeSession {
    tab: Arc<Tab>,
    // Keeps the Chrome process alive for as long as the tab is in use
    _browser: Browser,
}

impl ChromeSession {
    pub fn launch(headless: bool, element_timeout: Duration) -> Result<Self> {
        info!(headless, "Launching Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(headless)
            .window_size(Some((1920, 1080)))
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;
        tab.set_default_timeout(element_timeout);

        Ok(Self {
            tab,
            _browser: browser,
        })
    }

    /// Close the tab and shut the browser down. A tab that refuses to close
    /// is logged; the browser process still goes with the session.
    pub fn close(self) {
        info!("Closing browser");
        if let Err(e) = self.tab.close(true) {
            warn!(error = %e, "Tab did not close cleanly");
        }
    }

    fn find(&self, xpath: &str) -> Result<headless_chrome::Element<'_>, ScrapeError> {
        self.tab
            .find_element_by_xpath(xpath)
            .map_err(|e| classify(e, xpath))
    }
}

/// Map a headless_chrome failure onto the scraper's error kinds
fn classify(err: anyhow::Error, target: &str) -> ScrapeError {
    if err.downcast_ref::<NoElementFound>().is_some() {
        ScrapeError::ElementNotFound(target.to_string())
    } else if err.downcast_ref::<Timeout>().is_some() {
        ScrapeError::WaitTimeout(target.to_string())
    } else if err.downcast_ref::<NavigationFailed>().is_some() {
        ScrapeError::Navigation(format!("{}: {:#}", target, err))
    } else {
        ScrapeError::Browser(format!("{}: {:#}", target, err))
    }
}

/// Navigation waits report a stalled load as a plain timeout
fn classify_navigation(err: anyhow::Error, url: &str) -> ScrapeError {
    match classify(err, url) {
        ScrapeError::WaitTimeout(url) => ScrapeError::NavigationTimeout(url),
        other => other,
    }
}

impl BrowserDriver for ChromeSession {
    fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        debug!(%url, "Navigating");
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| classify_navigation(e, url))?;
        Ok(())
    }

    fn refresh(&self) -> Result<(), ScrapeError> {
        self.tab
            .reload(false, None)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| classify_navigation(e, "reload"))?;
        Ok(())
    }

    fn page_html(&self) -> Result<String, ScrapeError> {
        self.tab
            .get_content()
            .map_err(|e| classify(e, "document"))
    }

    fn is_present(&self, xpath: &str) -> Result<bool, ScrapeError> {
        match self.tab.find_element_by_xpath(xpath) {
            Ok(_) => Ok(true),
            Err(e) => match classify(e, xpath) {
                ScrapeError::ElementNotFound(_) | ScrapeError::WaitTimeout(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    fn wait_for(&self, xpath: &str, timeout: Duration) -> Result<(), ScrapeError> {
        self.tab
            .wait_for_xpath_with_custom_timeout(xpath, timeout)
            .map_err(|e| match classify(e, xpath) {
                ScrapeError::ElementNotFound(target) => ScrapeError::WaitTimeout(target),
                other => other,
            })?;
        Ok(())
    }

    fn hover(&self, xpath: &str) -> Result<(), ScrapeError> {
        let element = self.find(xpath)?;
        element
            .scroll_into_view()
            .and_then(|element| element.move_mouse_over())
            .map_err(|e| classify(e, xpath))?;
        Ok(())
    }

    fn click(&self, xpath: &str) -> Result<(), ScrapeError> {
        self.find(xpath)?
            .click()
            .map_err(|e| classify(e, xpath))?;
        Ok(())
    }

    fn type_text(&self, xpath: &str, text: &str) -> Result<(), ScrapeError> {
        self.find(xpath)?
            .focus()
            .map_err(|e| classify(e, xpath))?;
        self.tab
            .type_str(text)
            .map_err(|e| classify(e, xpath))?;
        Ok(())
    }

    fn press_enter(&self) -> Result<(), ScrapeError> {
        self.tab
            .press_key("Enter")
            .map_err(|e| classify(e, "Enter"))?;
        Ok(())
    }
}
