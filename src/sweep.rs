use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::aggregate::aggregate;
use crate::extract::{self, ResultItem};
use crate::fetcher::Fetcher;
use crate::identity::Identity;
use crate::sites::SearchUrl;

#[derive(Debug, Clone, Copy)]
pub struct SweepOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Pause between consecutive sites.
    pub delay: Duration,
}

/// Scrape each target in order, one at a time, then merge into a single ranked list.
pub async fn sweep(
    targets: &[SearchUrl],
    identity: &Identity,
    fetcher: &Fetcher,
    opts: SweepOptions,
) -> Vec<ResultItem> {
    let pb = ProgressBar::new(targets.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut per_site = Vec::with_capacity(targets.len());
    for (i, target) in targets.iter().enumerate() {
        if i > 0 && !opts.delay.is_zero() {
            tokio::time::sleep(opts.delay).await;
        }
        pb.set_message(target.site.clone());
        let items = extract::extract(&target.site, &target.url, identity, fetcher, opts.timeout).await;
        info!(site = %target.site, candidates = items.len(), "scraped");
        per_site.push(items);
        pb.inc(1);
    }
    pb.finish_and_clear();

    aggregate(&per_site)
}
