//! Single-page fetch + same-site link extraction.
//!
//! The HTTP variant needs the `scrape` feature (reqwest + scraper). Without it, or when the
//! client cannot be built, the fetcher is [`Fetcher::Disabled`] and every fetch yields nothing.
//! Failures never reach the caller: they are logged and turned into an empty link list.

use std::time::Duration;

use rand::seq::SliceRandom;
use tracing::debug;
#[cfg(feature = "scrape")]
use tracing::warn;

#[cfg(feature = "scrape")]
use std::collections::HashSet;
#[cfg(feature = "scrape")]
use url::Url;

pub const FALLBACK_USER_AGENT: &str = "Mozilla/5.0 (compatible; privacy-sweep/1.0)";

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

#[cfg(feature = "scrape")]
const MAX_REDIRECTS: usize = 10;

/// An anchor found on a fetched page: visible text and absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Fixed user agent; a random browser UA is used when unset.
    pub user_agent: Option<String>,
}

#[cfg(feature = "scrape")]
#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
}

pub enum Fetcher {
    #[cfg(feature = "scrape")]
    Http(HttpFetcher),
    Disabled,
}

impl Fetcher {
    /// HTTP fetcher when the build supports it, otherwise [`Fetcher::Disabled`].
    #[cfg(feature = "scrape")]
    pub fn new(opts: &FetchOptions) -> Self {
        match HttpFetcher::new(opts) {
            Ok(http) => Fetcher::Http(http),
            Err(e) => {
                warn!(error = %e, "HTTP client unavailable, scraping disabled");
                Fetcher::Disabled
            }
        }
    }

    #[cfg(not(feature = "scrape"))]
    pub fn new(_opts: &FetchOptions) -> Self {
        debug!("built without the `scrape` feature, scraping disabled");
        Fetcher::Disabled
    }

    pub fn disabled() -> Self {
        Fetcher::Disabled
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Fetcher::Disabled)
    }

    /// GET `url` and return its same-site links, deduplicated in first-seen order.
    pub async fn fetch_links(&self, url: &str, timeout: Duration) -> Vec<Link> {
        match self {
            #[cfg(feature = "scrape")]
            Fetcher::Http(http) => match http.fetch_html(url, timeout).await {
                Ok((page_url, html)) => {
                    let links = same_site_links(&html, &page_url);
                    debug!(url, final_url = %page_url, links = links.len(), "fetched page");
                    links
                }
                Err(e) => {
                    warn!(url, error = %e, "fetch failed");
                    Vec::new()
                }
            },
            Fetcher::Disabled => {
                debug!(url, ?timeout, "fetcher disabled, skipping");
                Vec::new()
            }
        }
    }
}

#[cfg(feature = "scrape")]
pub struct HttpFetcher {
    client: reqwest::Client,
}

#[cfg(feature = "scrape")]
impl HttpFetcher {
    fn new(opts: &FetchOptions) -> Result<Self, FetchError> {
        let user_agent = opts
            .user_agent
            .clone()
            .unwrap_or_else(|| pick_user_agent().to_string());
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }

    /// Body plus the final URL after redirects.
    async fn fetch_html(&self, url: &str, timeout: Duration) -> Result<(Url, String), FetchError> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let final_url = response.url().clone();
        let body = response.text().await?;
        Ok((final_url, body))
    }
}

pub fn pick_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_USER_AGENT)
}

/// Last two dot-separated labels of a host: `"www.spokeo.com"` → `"spokeo.com"`.
pub fn registrable_domain(host: &str) -> String {
    let labels: Vec<&str> = host.trim_end_matches('.').split('.').collect();
    labels[labels.len().saturating_sub(2)..].join(".").to_lowercase()
}

pub fn same_site(a: &str, b: &str) -> bool {
    registrable_domain(a) == registrable_domain(b)
}

/// Anchors in `html` resolved against `page_url`, restricted to the page's registrable domain.
#[cfg(feature = "scrape")]
pub fn same_site_links(html: &str, page_url: &Url) -> Vec<Link> {
    let selector = match scraper::Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let Some(page_host) = page_url.host_str() else {
        return Vec::new();
    };

    let document = scraper::Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() || href.starts_with('#') {
            continue;
        }
        let Ok(resolved) = page_url.join(href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }
        match resolved.host_str() {
            Some(host) if same_site(host, page_host) => {}
            _ => continue,
        }

        let url = resolved.to_string();
        if !seen.insert(url.clone()) {
            continue;
        }
        let text = anchor.text().collect::<String>();
        links.push(Link {
            text: text.split_whitespace().collect::<Vec<_>>().join(" "),
            url,
        });
    }

    links
}
