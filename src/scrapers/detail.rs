use crate::models::PropertyDetail;
use crate::scrapers::error::ScrapeError;
use crate::scrapers::retry::Outcome;
use crate::scrapers::scout::Scout;
use crate::scrapers::traits::BrowserDriver;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info};

pub(crate) const FEATURES_CONTAINER: &str = r#"//div[@class="property-features"][1]"#;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static PRICE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[class="listing-price-display__price txt-heading-1"]"#));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"h1[class="listing-details__title"]"#));
static ADDRESS: LazyLock<Selector> = LazyLock::new(|| selector("a#address-show-map"));
static FEATURES_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[class="property-features"]"#));
static FEATURE_VALUE: LazyLock<Selector> =
    LazyLock::new(|| selector("div#property-features-list > ul > li > span"));
static MAIN_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[class="media-container__image--main"] > img"#));

/// Price, title and address from the top of a detail page
#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub price: String,
    pub description: String,
    pub address: Option<String>,
}

/// Lists and image from the lower part of a detail page
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSection {
    pub details: Vec<String>,
    pub features: Vec<String>,
    pub image: String,
}

impl<D: BrowserDriver + ?Sized> Scout<'_, D> {
    /// Scrape the property page the browser is on.
    ///
    /// A missing mandatory element refreshes the page and tries again. When
    /// every attempt fails the result is [`Outcome::Exhausted`].
    pub fn property_scrape(&self) -> Result<Outcome<PropertyDetail>, ScrapeError> {
        self.pacer.random_wait(2, 4);
        self.retry_policy().run(
            |_| self.scrape_attempt(),
            ScrapeError::is_missing_element,
            |attempt| {
                info!("Page refreshed . . . {}", attempt);
                self.driver.refresh()
            },
        )
    }

    fn scrape_attempt(&self) -> Result<PropertyDetail, ScrapeError> {
        let headline = parse_headline(&self.driver.page_html()?)?;

        self.driver
            .wait_for(FEATURES_CONTAINER, self.settings.element_timeout)?;
        self.driver.hover(FEATURES_CONTAINER)?;
        self.pacer.random_wait(2, 4);

        let section = parse_feature_section(&self.driver.page_html()?)?;
        self.pacer.random_wait(1, 4);

        debug!(
            price = %headline.price,
            details = section.details.len(),
            features = section.features.len(),
            "Scraped property"
        );

        Ok(PropertyDetail {
            price: headline.price,
            description: headline.description,
            address: headline.address,
            details: section.details,
            features: section.features,
            image: section.image,
        })
    }
}

pub fn parse_headline(html: &str) -> Result<Headline, ScrapeError> {
    let document = Html::parse_document(html);

    let price = first_text(&document, &PRICE)
        .ok_or_else(|| ScrapeError::ElementNotFound("listing price".into()))?;
    let description = first_text(&document, &TITLE)
        .ok_or_else(|| ScrapeError::ElementNotFound("listing title".into()))?;
    let address = first_text(&document, &ADDRESS);

    Ok(Headline {
        price,
        description,
        address,
    })
}

pub fn parse_feature_section(html: &str) -> Result<FeatureSection, ScrapeError> {
    let document = Html::parse_document(html);

    let container = document
        .select(&FEATURES_BLOCK)
        .next()
        .ok_or_else(|| ScrapeError::ElementNotFound("property features".into()))?;
    let details = children_named(container, "ul")
        .flat_map(|list| children_named(list, "li"))
        .flat_map(|item| children_named(item, "span"))
        .map(element_text)
        .collect();

    // Only spans that wrap a nested value span carry a feature
    let features = document
        .select(&FEATURE_VALUE)
        .filter(|span| {
            span.children()
                .filter_map(ElementRef::wrap)
                .any(|child| child.value().name() == "span")
        })
        .map(element_text)
        .collect();

    let image = document
        .select(&MAIN_IMAGE)
        .next()
        .ok_or_else(|| ScrapeError::ElementNotFound("main image".into()))?
        .value()
        .attr("src")
        .unwrap_or_default()
        .to_string();

    Ok(FeatureSection {
        details,
        features,
        image,
    })
}

/// Direct element children with the given tag name
fn children_named<'a>(
    parent: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}

/// Visible text with runs of whitespace collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
