use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::fetch;
use crate::parser::{self, LinkFilter, PageContext};
use crate::record::ArticleRecord;
use crate::taxonomy::Taxonomy;

/// Fetch and parse every taxonomy leaf in declaration order, strictly one
/// page at a time, and concatenate the records in iteration order. A page
/// that fails to fetch aborts the batch.
pub async fn collect_all(taxonomy: &Taxonomy, filter: &LinkFilter) -> Result<Vec<ArticleRecord>> {
    let targets = taxonomy.page_targets();

    let pb = ProgressBar::new(targets.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut records = Vec::new();
    for target in &targets {
        match &target.subcategory {
            Some(sub) => info!("Processing category: {}, subcategory: {}", target.category, sub),
            None => info!("Processing category: {}", target.category),
        }
        pb.set_message(target.page_name());

        let markdown = fetch::fetch_rendered(&target.url).await?;
        let ctx = PageContext {
            category: &target.category,
            subcategory: target.subcategory.as_deref(),
        };
        let page_records = parser::process_page(&markdown, &ctx, filter);

        info!("{}: {} articles", target.page_name(), page_records.len());
        records.extend(page_records);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(records)
}
