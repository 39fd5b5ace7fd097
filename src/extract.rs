use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fetcher::{Fetcher, Link};
use crate::identity::Identity;
use crate::scoring::{self, LinkScore};

/// Links scoring below this are treated as navigation noise.
pub const KEEP_THRESHOLD: f64 = 0.4;
pub const MAX_RESULTS_PER_SITE: usize = 15;
pub const TITLE_MAX_CHARS: usize = 120;

/// A scored, site-attributed candidate profile link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub site: String,
    pub title: String,
    pub url: String,
    pub score: f64,
    pub matched_fields: Vec<String>,
}

/// Fetch one site's search page and keep its best-matching links.
pub async fn extract(
    site: &str,
    url: &str,
    identity: &Identity,
    fetcher: &Fetcher,
    timeout: Duration,
) -> Vec<ResultItem> {
    if !fetcher.is_available() {
        return Vec::new();
    }
    let links = fetcher.fetch_links(url, timeout).await;
    let items = rank_links(site, links, identity);
    debug!(site, kept = items.len(), "extracted candidates");
    items
}

/// Score, threshold, sort (score desc, stable) and cap a site's links.
pub fn rank_links(site: &str, links: Vec<Link>, identity: &Identity) -> Vec<ResultItem> {
    let mut items: Vec<ResultItem> = links
        .into_iter()
        .filter_map(|link| {
            let LinkScore { score, matched } = scoring::score(&link.text, &link.url, identity);
            (score >= KEEP_THRESHOLD).then(|| ResultItem {
                site: site.to_string(),
                title: truncate(&link.text, TITLE_MAX_CHARS),
                url: link.url,
                score,
                matched_fields: matched,
            })
        })
        .collect();

    items.sort_by(|a, b| b.score.total_cmp(&a.score));
    items.truncate(MAX_RESULTS_PER_SITE);
    items
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::parse;

    fn link(text: &str, url: &str) -> Link {
        Link {
            text: text.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn keeps_only_relevant_links() {
        let id = parse("John Smith, Austin, TX");
        let items = rank_links(
            "whitepages",
            vec![
                link("Sign in", "https://www.whitepages.com/login"),
                link("John Smith Austin TX", "https://www.whitepages.com/p/1"),
                link("John Smith", "https://www.whitepages.com/p/2"),
            ],
            &id,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].site, "whitepages");
        assert_eq!(items[0].url, "https://www.whitepages.com/p/1");
        assert_eq!(items[0].matched_fields, vec!["john", "smith", "Austin", "TX"]);
    }

    #[test]
    fn score_exactly_at_threshold_is_kept() {
        let id = parse("John Smith, TX");
        let items = rank_links("x", vec![link("john smith tx", "https://x.com/a")], &id);
        assert_eq!(items.len(), 1);
        assert!(items[0].score >= KEEP_THRESHOLD);
    }

    #[test]
    fn sorted_by_score_and_capped() {
        let id = parse("Ann Bo Cy, Reno NV");
        let mut links = Vec::new();
        for i in 0..20 {
            links.push(link("Ann Bo Reno", &format!("https://x.com/weak/{i}")));
        }
        links.push(link("Ann Bo Cy Reno NV", "https://x.com/best"));
        let items = rank_links("x", links, &id);
        assert_eq!(items.len(), MAX_RESULTS_PER_SITE);
        assert_eq!(items[0].url, "https://x.com/best");
        assert_eq!(items[1].url, "https://x.com/weak/0");
        assert!(items.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn long_titles_are_truncated() {
        let id = parse("John Smith, Austin, TX");
        let text = format!("John Smith Austin TX {}", "é".repeat(300));
        let items = rank_links("x", vec![link(&text, "https://x.com/p")], &id);
        assert_eq!(items[0].title.chars().count(), TITLE_MAX_CHARS);
    }

    #[tokio::test]
    async fn disabled_fetcher_yields_empty() {
        let id = parse("John Smith, Austin, TX");
        let items = extract(
            "spokeo",
            "https://www.spokeo.com/John-Smith",
            &id,
            &Fetcher::disabled(),
            Duration::from_secs(1),
        )
        .await;
        assert!(items.is_empty());
    }
}
