//! Scripted in-memory browser for exercising the scrape flows.

use crate::scrapers::detail::FEATURES_CONTAINER;
use crate::scrapers::error::ScrapeError;
use crate::scrapers::listing::{NEXT_PAGE, SEARCH_INPUT};
use crate::scrapers::scout::COOKIE_BUTTON;
use crate::scrapers::traits::BrowserDriver;
use crate::scrapers::types::ScrapeSettings;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    Refresh,
    Hover(String),
    Click(String),
    Type(String, String),
    Enter,
}

#[derive(Debug, Default)]
enum Page {
    #[default]
    Blank,
    Results {
        area: String,
        index: usize,
    },
    Detail(String),
}

#[derive(Debug, Default)]
struct State {
    actions: Vec<Action>,
    page: Page,
    typed: Option<String>,
    cookie_banner: bool,
    no_search_bar: bool,
    stale_next_page: bool,
    results: HashMap<String, Vec<String>>,
    details: HashMap<String, VecDeque<String>>,
    navigation_timeouts: HashMap<String, u32>,
    broken_links: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct FakeDriver {
    state: RefCell<State>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookie_banner(mut self) -> Self {
        self.state.get_mut().cookie_banner = true;
        self
    }

    pub fn without_search_bar(mut self) -> Self {
        self.state.get_mut().no_search_bar = true;
        self
    }

    /// The "Next" control is reported present but vanishes before it can be
    /// hovered
    pub fn with_stale_next_page(mut self) -> Self {
        self.state.get_mut().stale_next_page = true;
        self
    }

    /// Result pages served, in order, after searching for `area`
    pub fn with_results(mut self, area: &str, pages: Vec<String>) -> Self {
        self.state.get_mut().results.insert(area.to_string(), pages);
        self
    }

    /// Detail page versions served on successive loads; the last one sticks
    pub fn with_detail(mut self, url: &str, versions: Vec<String>) -> Self {
        self.state
            .get_mut()
            .details
            .insert(url.to_string(), versions.into());
        self
    }

    pub fn with_navigation_timeouts(mut self, url: &str, times: u32) -> Self {
        self.state
            .get_mut()
            .navigation_timeouts
            .insert(url.to_string(), times);
        self
    }

    pub fn with_broken_link(mut self, url: &str) -> Self {
        self.state.get_mut().broken_links.insert(url.to_string());
        self
    }

    pub fn actions(&self) -> Vec<Action> {
        self.state.borrow().actions.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Action) -> bool) -> usize {
        self.state
            .borrow()
            .actions
            .iter()
            .filter(|a| predicate(a))
            .count()
    }

    fn record(&self, action: Action) {
        self.state.borrow_mut().actions.push(action);
    }

    fn current_html(state: &State) -> String {
        match &state.page {
            Page::Blank => "<html><body></body></html>".to_string(),
            Page::Results { area, index } => state
                .results
                .get(area)
                .and_then(|pages| pages.get(*index))
                .cloned()
                .unwrap_or_default(),
            Page::Detail(url) => state
                .details
                .get(url)
                .and_then(|versions| versions.front())
                .cloned()
                .unwrap_or_default(),
        }
    }

    fn has_next_page(state: &State) -> bool {
        match &state.page {
            Page::Results { area, index } => state
                .results
                .get(area)
                .is_some_and(|pages| index + 1 < pages.len()),
            _ => false,
        }
    }
}

impl BrowserDriver for FakeDriver {
    fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        self.record(Action::Navigate(url.to_string()));
        let mut state = self.state.borrow_mut();

        if state.broken_links.contains(url) {
            return Err(ScrapeError::Navigation(url.to_string()));
        }
        if let Some(remaining) = state.navigation_timeouts.get_mut(url) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(ScrapeError::NavigationTimeout(url.to_string()));
            }
        }

        state.page = if state.details.contains_key(url) {
            Page::Detail(url.to_string())
        } else {
            Page::Blank
        };
        Ok(())
    }

    fn refresh(&self) -> Result<(), ScrapeError> {
        self.record(Action::Refresh);
        let mut state = self.state.borrow_mut();
        let State { page, details, .. } = &mut *state;
        if let Page::Detail(url) = page {
            if let Some(versions) = details.get_mut(url.as_str()) {
                if versions.len() > 1 {
                    versions.pop_front();
                }
            }
        }
        Ok(())
    }

    fn page_html(&self) -> Result<String, ScrapeError> {
        Ok(Self::current_html(&self.state.borrow()))
    }

    fn is_present(&self, xpath: &str) -> Result<bool, ScrapeError> {
        let state = self.state.borrow();
        let present = match xpath {
            COOKIE_BUTTON => state.cookie_banner,
            NEXT_PAGE => Self::has_next_page(&state),
            SEARCH_INPUT => !state.no_search_bar,
            FEATURES_CONTAINER => Self::current_html(&state).contains("property-features"),
            _ => false,
        };
        Ok(present)
    }

    fn wait_for(&self, xpath: &str, _timeout: Duration) -> Result<(), ScrapeError> {
        if self.is_present(xpath)? {
            Ok(())
        } else {
            Err(ScrapeError::WaitTimeout(xpath.to_string()))
        }
    }

    fn hover(&self, xpath: &str) -> Result<(), ScrapeError> {
        if xpath == NEXT_PAGE && self.state.borrow().stale_next_page {
            return Err(ScrapeError::ElementNotFound(xpath.to_string()));
        }
        self.record(Action::Hover(xpath.to_string()));
        Ok(())
    }

    fn click(&self, xpath: &str) -> Result<(), ScrapeError> {
        self.record(Action::Click(xpath.to_string()));
        let mut state = self.state.borrow_mut();
        match xpath {
            COOKIE_BUTTON => state.cookie_banner = false,
            NEXT_PAGE => {
                if !Self::has_next_page(&state) {
                    return Err(ScrapeError::ElementNotFound(xpath.to_string()));
                }
                if let Page::Results { index, .. } = &mut state.page {
                    *index += 1;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn type_text(&self, xpath: &str, text: &str) -> Result<(), ScrapeError> {
        self.record(Action::Type(xpath.to_string(), text.to_string()));
        self.state.borrow_mut().typed = Some(text.to_string());
        Ok(())
    }

    fn press_enter(&self) -> Result<(), ScrapeError> {
        self.record(Action::Enter);
        let mut state = self.state.borrow_mut();
        if let Some(area) = state.typed.take() {
            state.page = Page::Results { area, index: 0 };
        }
        Ok(())
    }
}

pub fn instant_settings() -> ScrapeSettings {
    ScrapeSettings {
        base_url: "https://site.test/".to_string(),
        element_timeout: Duration::ZERO,
        max_attempts: 3,
        time_unit: Duration::ZERO,
        ..ScrapeSettings::default()
    }
}

pub fn results_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<a class="listing-result" href="{}">listing</a>"#, href))
        .collect();
    format!("<html><body>{}</body></html>", links)
}

pub fn detail_page(price: &str, address: Option<&str>) -> String {
    let address = address
        .map(|a| format!(r##"<a id="address-show-map" href="#map">{}</a>"##, a))
        .unwrap_or_default();
    format!(
        r#"<html><body>
          <div class="listing-price-display__price txt-heading-1">{price}</div>
          <h1 class="listing-details__title">2 Bedroom
             Apartment in Rosebank</h1>
          {address}
          <div class="media-container__image--main"><img src="https://images.site.test/main.jpg"></div>
          <div class="property-features">
            <ul>
              <li><span>Bedrooms</span></li>
              <li><span>Bathrooms</span></li>
              <li><span>Parking</span></li>
            </ul>
          </div>
          <div id="property-features-list">
            <ul>
              <li><span><span class="icon"></span>2</span></li>
              <li><span>Pet friendly</span></li>
              <li><span><span class="icon"></span>1 Garage</span></li>
            </ul>
          </div>
        </body></html>"#
    )
}
