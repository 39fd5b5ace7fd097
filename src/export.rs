use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::extract::ResultItem;

const CSV_HEADER: [&str; 5] = ["site", "title", "url", "score", "matched_fields"];
const MATCH_DELIMITER: &str = ";";

pub fn write_csv(path: &Path, items: &[ResultItem]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv_to(file, items)
}

pub fn write_csv_to<W: Write>(out: W, items: &[ResultItem]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for item in items {
        let score = format!("{:.2}", item.score);
        let matched = item.matched_fields.join(MATCH_DELIMITER);
        writer.write_record([
            item.site.as_str(),
            item.title.as_str(),
            item.url.as_str(),
            score.as_str(),
            matched.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json(path: &Path, items: &[ResultItem]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// One console line per candidate: `  [0.55] spokeo  "title" -> url`.
pub fn render_candidate(item: &ResultItem) -> String {
    format!(
        "  [{:.2}] {:<18} {:?} -> {}",
        item.score, item.site, item.title, item.url
    )
}
