pub mod blocks;
pub mod hierarchy;

pub use hierarchy::{LinkFilter, PageContext};

use crate::record::ArticleRecord;

/// Two-pass pipeline: rendered markdown → element stream → annotated records.
pub fn process_page(
    markdown: &str,
    ctx: &PageContext<'_>,
    filter: &LinkFilter,
) -> Vec<ArticleRecord> {
    let blocks = blocks::classify_lines(markdown);
    hierarchy::annotate(&blocks, ctx, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_fixture(name: &str, ctx: &PageContext<'_>) -> Vec<ArticleRecord> {
        let md = std::fs::read_to_string(format!("tests/fixtures/{}.md", name)).unwrap();
        process_page(&md, ctx, &LinkFilter::default())
    }

    #[test]
    fn cities_fixture_extracts_annotated_articles() {
        let ctx = PageContext {
            category: "Geography",
            subcategory: Some("Cities"),
        };
        let records = parse_fixture("cities", &ctx);

        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Chicago", "Detroit", "New York City", "Paris"]);

        let chicago = &records[0];
        assert_eq!(chicago.hierarchy, ["American cities"]);
        assert_eq!(chicago.level, 4);
        assert_eq!(chicago.subcategory.as_deref(), Some("Cities"));

        let detroit = &records[1];
        assert_eq!(detroit.hierarchy, ["American cities", "Midwestern United States"]);
        assert_eq!(detroit.level, 5);

        // The h3 chain must have been popped by the sibling h2.
        let paris = &records[3];
        assert_eq!(paris.hierarchy, ["European cities"]);
    }

    #[test]
    fn cities_fixture_drops_boilerplate_links() {
        let ctx = PageContext {
            category: "Geography",
            subcategory: Some("Cities"),
        };
        let records = parse_fixture("cities", &ctx);
        assert!(records.iter().all(|r| r.title != "v" && r.title != "FA"));
    }

    #[test]
    fn parsing_a_fixture_twice_is_identical() {
        let ctx = PageContext {
            category: "Geography",
            subcategory: Some("Cities"),
        };
        assert_eq!(parse_fixture("cities", &ctx), parse_fixture("cities", &ctx));
    }
}
