use std::collections::HashMap;

use crate::extract::ResultItem;

/// Merge per-site candidates into one ranked list, one entry per URL.
///
/// On a URL collision the higher score wins; equal scores keep the later entry. Output is
/// ordered by score descending, then site ascending.
pub fn aggregate(per_site: &[Vec<ResultItem>]) -> Vec<ResultItem> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut merged: Vec<ResultItem> = Vec::new();

    for item in per_site.iter().flatten() {
        match index.get(item.url.as_str()) {
            Some(&i) => {
                if item.score >= merged[i].score {
                    merged[i] = item.clone();
                }
            }
            None => {
                index.insert(&item.url, merged.len());
                merged.push(item.clone());
            }
        }
    }

    merged.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.site.cmp(&b.site))
    });
    merged
}
