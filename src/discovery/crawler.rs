use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Url;
use rustc_hash::FxHashSet;
use scraper::{Html, Selector};

use crate::{
    config::Config,
    core::error::{HtmlSupError, Result},
    core::types::Crawl,
};

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Failed to compile anchor selector"));

/// Source of the outbound links of a page.
#[async_trait]
pub trait LinkScraper {
    /// Every anchor `href` of the page at `url`, in document order.
    async fn scrape_links(&self, url: &str) -> Result<Vec<String>>;
}

/// Fetches a page over HTTP and extracts its anchors.
#[derive(Debug, Clone)]
pub struct HttpLinkScraper {
    client: reqwest::Client,
}

impl HttpLinkScraper {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a scraper using the configured user agent and timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout_duration() {
            builder = builder.timeout(timeout);
        }

        Ok(Self::new(builder.build()?))
    }

    fn extract_links(body: &str) -> Vec<String> {
        let document = Html::parse_document(body);
        document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl LinkScraper for HttpLinkScraper {
    async fn scrape_links(&self, url: &str) -> Result<Vec<String>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HtmlSupError::Scraper {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let links = Self::extract_links(&body);
        log::debug!("Scraped {} links from {url}", links.len());

        Ok(links)
    }
}

/// Filters applied to discovered links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Only keep links whose hostname equals the seed's
    pub same_host: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self { same_host: true }
    }
}

/// Ordered, duplicate-free set of URLs to validate. The seed is always first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUrls {
    urls: Vec<String>,
}

impl CandidateUrls {
    /// Set holding only the seed
    pub fn seed_only(seed: &str) -> Self {
        Self {
            urls: vec![seed.to_string()],
        }
    }

    /// Build the candidate set from the seed and the links found on its page.
    pub fn from_links<I, S>(seed: &str, links: I, crawl: Crawl, options: DiscoveryOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut candidates = Self::seed_only(seed);
        let limit = crawl.limit();
        let seed_host = Url::parse(seed)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string));

        let mut seen = FxHashSet::default();
        seen.insert(normalize(seed).to_string());

        for link in links {
            if limit.is_some_and(|limit| candidates.urls.len() >= limit) {
                break;
            }

            let link = normalize(link.as_ref());
            if seen.contains(link) {
                continue;
            }

            let Some(host) = http_host(link) else {
                log::debug!("Skipping non-http link: {link}");
                continue;
            };

            if options.same_host && seed_host.as_deref() != Some(host.as_str()) {
                log::debug!("Skipping link on foreign host: {link}");
                continue;
            }

            seen.insert(link.to_string());
            candidates.urls.push(link.to_string());
        }

        candidates
    }

    pub fn seed(&self) -> &str {
        &self.urls[0]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Always false, the seed is never removed
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

/// Strip exactly one trailing slash.
fn normalize(link: &str) -> &str {
    link.strip_suffix('/').unwrap_or(link)
}

/// Hostname of an absolute http(s) URL
fn http_host(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.host_str().map(str::to_string)
}

/// Expand the seed URL into the set of URLs to validate.
///
/// The scraper is only consulted when the crawl parameter leaves room for
/// more than the seed itself.
pub async fn discover<S>(
    seed: &str,
    crawl: Crawl,
    options: DiscoveryOptions,
    scraper: &S,
) -> Result<CandidateUrls>
where
    S: LinkScraper + Sync + ?Sized,
{
    if crawl.limit() == Some(1) {
        log::debug!("Crawling not needed for {seed} (crawl={crawl})");
        return Ok(CandidateUrls::seed_only(seed));
    }

    let links = scraper.scrape_links(seed).await?;
    let candidates = CandidateUrls::from_links(seed, &links, crawl, options);
    log::info!(
        "Discovered {} URLs from {} links on {seed}",
        candidates.len(),
        links.len()
    );

    Ok(candidates)
}
