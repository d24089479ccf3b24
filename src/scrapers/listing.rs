use crate::models::AreaLinks;
use crate::scrapers::error::ScrapeError;
use crate::scrapers::scout::Scout;
use crate::scrapers::traits::BrowserDriver;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, error, info, warn};

pub(crate) const SEARCH_INPUT: &str = r#"//input[@type="search"]"#;
pub(crate) const LISTING_LINK: &str = r#"//a[@class="listing-result"]"#;
pub(crate) const NEXT_PAGE: &str = r#"//span[contains(text(), "Next")]/parent::a"#;

static LISTING_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[class="listing-result"]"#).expect("static selector"));

/// Whether the results page has a "Next" control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    Next,
    LastPage,
}

impl<D: BrowserDriver + ?Sized> Scout<'_, D> {
    /// Type an area into the site search bar and submit it
    pub fn area_search(&self, area: &str) -> Result<(), ScrapeError> {
        self.pacer.random_wait(3, 5);
        self.driver
            .wait_for(SEARCH_INPUT, self.settings.element_timeout)?;
        self.scroll_and_click(SEARCH_INPUT)?;
        self.send_keys(SEARCH_INPUT, area)
    }

    /// Collect every property link for each area, walking all result pages.
    ///
    /// An area whose search bar never shows up is logged and left out.
    pub fn property_links(&self, areas: &[String]) -> Result<AreaLinks, ScrapeError> {
        self.open_browser(&self.settings.base_url)?;

        let mut area_links = AreaLinks::new();
        for area in areas {
            if let Err(e) = self.area_search(area) {
                error!(%area, error = %e, "Area search failed, skipping area");
                continue;
            }
            self.pacer.random_wait(7, 10);

            let links = self.collect_result_pages(area)?;
            info!("{} has been added with a total of {} properties", area, links.len());
            area_links.insert(area.clone(), links);
        }

        Ok(area_links)
    }

    /// Gather links page by page. A results page that cannot be read or a
    /// "Next" control that fails to respond ends the area with what was
    /// collected so far.
    fn collect_result_pages(&self, area: &str) -> Result<Vec<String>, ScrapeError> {
        let mut batches: Vec<Vec<String>> = Vec::new();
        let mut page = 1;

        loop {
            let html = match self.driver.page_html() {
                Ok(html) => html,
                Err(e) => {
                    warn!(%area, page, error = %e, "Could not read results page, keeping earlier pages");
                    break;
                }
            };
            let batch = parse_listing_links(&html, &self.settings.base_url);
            debug!(%area, page, count = batch.len(), "Collected result page");

            for index in 1..=batch.len() {
                let xpath = format!("({})[{}]", LISTING_LINK, index);
                if let Err(e) = self.driver.hover(&xpath) {
                    debug!(index, error = %e, "Could not hover listing");
                }
                self.pacer.random_wait(1, 5);
            }
            batches.push(batch);

            match self.pagination()? {
                Pagination::Next => {
                    if let Err(e) = self.scroll_and_click(NEXT_PAGE) {
                        warn!(%area, page, error = %e, "Next page control failed, treating as last page");
                        break;
                    }
                    page += 1;
                }
                Pagination::LastPage => break,
            }
        }

        info!("Area: {}, pages: {}", area, page);
        Ok(batches.into_iter().flatten().collect())
    }

    pub fn pagination(&self) -> Result<Pagination, ScrapeError> {
        if self.driver.is_present(NEXT_PAGE)? {
            Ok(Pagination::Next)
        } else {
            Ok(Pagination::LastPage)
        }
    }
}

/// Property links on a results page, in page order
pub fn parse_listing_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&LISTING_LINK_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| absolute_url(base_url, href))
        .collect()
}

fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            href.trim_start_matches('/')
        )
    }
}
