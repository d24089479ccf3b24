use crate::scrapers::error::ScrapeError;
use crate::scrapers::retry::{Outcome, Pacer, RetryPolicy};
use crate::scrapers::traits::BrowserDriver;
use crate::scrapers::types::ScrapeSettings;
use tracing::{debug, info, warn};

pub(crate) const COOKIE_BUTTON: &str = r#"//button[contains(text(), "Accept all cookies")]"#;

/// Drives one browser session through the listing site.
///
/// Navigation helpers live here; the listing, detail and aggregation steps
/// are in their own modules.
pub struct Scout<'d, D: BrowserDriver + ?Sized> {
    pub(crate) driver: &'d D,
    pub(crate) settings: ScrapeSettings,
    pub(crate) pacer: Pacer,
}

impl<'d, D: BrowserDriver + ?Sized> Scout<'d, D> {
    pub fn new(driver: &'d D, settings: ScrapeSettings) -> Self {
        let pacer = Pacer::new(settings.time_unit);
        Self {
            driver,
            settings,
            pacer,
        }
    }

    pub(crate) fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.settings.max_attempts)
    }

    /// Navigate to `url`, refreshing on timeouts, then dismiss the cookie
    /// banner. Returns whether the page loaded; running out of attempts is
    /// logged and otherwise ignored.
    pub fn open_browser(&self, url: &str) -> Result<bool, ScrapeError> {
        let outcome = self.retry_policy().run(
            |_| self.driver.navigate(url),
            ScrapeError::is_navigation_timeout,
            |attempt| {
                info!("Refreshed at link ... {}", attempt);
                match self.driver.refresh() {
                    Err(e) if e.is_navigation_timeout() => {
                        debug!(error = %e, "refresh timed out as well");
                        Ok(())
                    }
                    other => other,
                }
            },
        )?;

        match outcome {
            Outcome::Found(()) => {
                self.pacer.random_wait(3, 5);
                self.accept_cookies()?;
                Ok(true)
            }
            Outcome::Exhausted {
                attempts,
                last_error,
            } => {
                warn!(%url, attempts, error = %last_error, "Giving up on navigation");
                Ok(false)
            }
        }
    }

    /// Click the cookie consent button if the site shows one
    pub fn accept_cookies(&self) -> Result<(), ScrapeError> {
        self.pacer.wait(2);
        if self.driver.is_present(COOKIE_BUTTON)? {
            self.pacer.random_wait(2, 3);
            self.scroll_and_click(COOKIE_BUTTON)?;
            debug!("Accepted cookies");
        }
        Ok(())
    }

    pub fn scroll_and_click(&self, xpath: &str) -> Result<(), ScrapeError> {
        self.driver.hover(xpath)?;
        self.pacer.random_wait(1, 4);
        self.driver.click(xpath)?;
        self.pacer.random_wait(1, 3);
        Ok(())
    }

    /// Type into a field and submit it with Enter
    pub fn send_keys(&self, xpath: &str, text: &str) -> Result<(), ScrapeError> {
        self.pacer.random_wait(2, 4);
        self.driver.type_text(xpath, text)?;
        self.pacer.random_wait(2, 3);
        self.driver.press_enter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::testing::{instant_settings, Action, FakeDriver};

    #[test]
    fn open_browser_retries_navigation_timeouts() {
        let driver = FakeDriver::new().with_navigation_timeouts("https://site.test/p/1", 2);
        let scout = Scout::new(&driver, instant_settings());

        assert!(scout.open_browser("https://site.test/p/1").unwrap());
        assert_eq!(driver.count(|a| matches!(a, Action::Navigate(_))), 3);
        assert_eq!(driver.count(|a| matches!(a, Action::Refresh)), 2);
    }

    #[test]
    fn open_browser_gives_up_without_error() {
        let driver = FakeDriver::new().with_navigation_timeouts("https://site.test/p/1", 5);
        let scout = Scout::new(&driver, instant_settings());

        assert!(!scout.open_browser("https://site.test/p/1").unwrap());
        assert_eq!(driver.count(|a| matches!(a, Action::Navigate(_))), 3);
        assert_eq!(driver.count(|a| matches!(a, Action::Click(_))), 0);
    }

    #[test]
    fn cookie_banner_is_clicked_when_present() {
        let driver = FakeDriver::new().with_cookie_banner();
        let scout = Scout::new(&driver, instant_settings());

        scout.open_browser("https://site.test/").unwrap();
        assert!(driver
            .actions()
            .contains(&Action::Click(COOKIE_BUTTON.to_string())));
    }

    #[test]
    fn missing_cookie_banner_is_not_an_error() {
        let driver = FakeDriver::new();
        let scout = Scout::new(&driver, instant_settings());

        assert!(scout.open_browser("https://site.test/").unwrap());
        assert_eq!(driver.count(|a| matches!(a, Action::Click(_))), 0);
    }

    #[test]
    fn send_keys_types_then_submits() {
        let driver = FakeDriver::new();
        let scout = Scout::new(&driver, instant_settings());

        scout.send_keys("//input", "Modderfontein").unwrap();
        assert_eq!(
            driver.actions(),
            vec![
                Action::Type("//input".to_string(), "Modderfontein".to_string()),
                Action::Enter,
            ]
        );
    }
}
