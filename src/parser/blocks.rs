use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{2,6})\s+(.+)$").unwrap());
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+]|\d+\.)\s+(.+)$").unwrap());
static INLINE_LINKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// One link inside a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    pub text: String,
    pub href: String,
}

/// The element stream the hierarchy annotator consumes: headings carrying
/// their nesting level, and list items carrying their links. Everything
/// else on the page is noise for this pipeline and never classified.
#[derive(Debug, Clone)]
pub enum PageBlock {
    Heading { level: u8, text: String },
    ListItem { links: Vec<LinkSpan> },
}

/// Classify the rendered page line by line. Heading levels 2..=6 only;
/// the level-1 page title is not part of the content listing.
pub fn classify_lines(markdown: &str) -> Vec<PageBlock> {
    let mut blocks = Vec::new();

    for raw in markdown.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            blocks.push(PageBlock::Heading {
                level: caps[1].len() as u8,
                text: strip_links(&caps[2]),
            });
            continue;
        }

        if let Some(caps) = LIST_ITEM_RE.captures(line) {
            let links = extract_links(&caps[1]);
            blocks.push(PageBlock::ListItem { links });
        }
    }

    blocks
}

fn extract_links(line: &str) -> Vec<LinkSpan> {
    INLINE_LINKS_RE
        .captures_iter(line)
        .map(|caps| LinkSpan {
            text: caps[1].to_string(),
            href: caps[2].to_string(),
        })
        .collect()
}

/// Reduce `[text](url)` spans in a heading to their display text.
fn strip_links(text: &str) -> String {
    INLINE_LINKS_RE.replace_all(text, "$1").trim().to_string()
}
