use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::blocks::{LinkSpan, PageBlock};
use crate::record::{ArticleRecord, DEFAULT_LEVEL};

static LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Level\s*(\d+)").unwrap());

/// Navigation and template boilerplate that shows up as links inside the
/// content region: single-letter template markers, rating abbreviations,
/// numeric thresholds, and a few fixed phrases.
pub const EXCLUDED_TITLES: &[&str] = &[
    "A",
    "v",
    "t",
    "e",
    "20",
    "200",
    "2,000",
    "20,000",
    "100,000",
    "Articles every Wikipedia should have",
    "Top-rated importance articles",
    "Documentation of this template",
    "User:cewbot",
    "FA",
    "GA",
    "B",
    "C",
    "FFA",
    "DGA",
    "Start",
    "Stub",
];

/// Decides which links inside a list item count as articles.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    excluded_titles: HashSet<String>,
}

impl LinkFilter {
    pub fn new<I, S>(excluded_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_titles: excluded_titles.into_iter().map(Into::into).collect(),
        }
    }

    /// Article links live in the article namespace (`/wiki/` but neither
    /// `File:` nor `Wikipedia:`), carry non-empty display text, and are not
    /// known boilerplate.
    pub fn is_article(&self, link: &LinkSpan) -> bool {
        let title = link.text.trim();
        link.href.contains("/wiki/")
            && !link.href.contains("File:")
            && !link.href.contains("Wikipedia:")
            && !title.is_empty()
            && !self.excluded_titles.contains(title)
    }
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self::new(EXCLUDED_TITLES.iter().copied())
    }
}

/// The chain of ancestor headings active at the current point of the
/// traversal, shallowest first. Headings on these pages appear in flat
/// document order with no nesting container, so the implied tree is
/// recovered by replaying heading levels against this stack: the top of
/// the stack stands for level `len() + 1`.
#[derive(Debug, Default)]
pub struct HeadingTrail {
    entries: Vec<String>,
}

impl HeadingTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a heading of `level`: pop until only ancestors strictly
    /// shallower than `level` remain, then push. A heading at or above the
    /// shallowest level seen so far empties the stack first, resetting
    /// tracking to the top level.
    pub fn observe(&mut self, level: u8, text: &str) {
        while !self.entries.is_empty() && self.entries.len() + 1 >= level as usize {
            self.entries.pop();
        }
        self.entries.push(text.to_string());
    }

    /// Independent copy of the current chain, outermost first. Emitted
    /// records own their snapshot; later traversal never mutates them.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.clone()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}

/// Category context of the page being parsed.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub category: &'a str,
    pub subcategory: Option<&'a str>,
}

/// Walk the element stream in document order, replaying headings against
/// the trail and emitting one record per qualifying article link. List
/// items never mutate the trail.
pub fn annotate(
    blocks: &[PageBlock],
    ctx: &PageContext<'_>,
    filter: &LinkFilter,
) -> Vec<ArticleRecord> {
    let mut trail = HeadingTrail::new();
    let mut records = Vec::new();

    for block in blocks {
        match block {
            PageBlock::Heading { level, text } => trail.observe(*level, text),
            PageBlock::ListItem { links } => {
                let level = item_level(links);
                for link in links {
                    if !filter.is_article(link) {
                        continue;
                    }
                    records.push(ArticleRecord {
                        title: link.text.trim().to_string(),
                        category: ctx.category.to_string(),
                        subcategory: ctx.subcategory.map(str::to_string),
                        hierarchy: trail.snapshot(),
                        level,
                    });
                }
            }
        }
    }

    records
}

/// Importance rank from the item's level-marker link (a link whose target
/// mentions `Level`), e.g. text "Level 4". Absent or unparseable markers
/// fall back to the default rank.
fn item_level(links: &[LinkSpan]) -> u8 {
    let Some(marker) = links.iter().find(|l| l.href.contains("Level")) else {
        return DEFAULT_LEVEL;
    };
    let text = marker.text.trim();
    match LEVEL_RE.captures(text).and_then(|caps| caps[1].parse().ok()) {
        Some(level) => level,
        None => {
            if text.contains("Level") {
                warn!(marker = text, "unparseable level marker, defaulting to {}", DEFAULT_LEVEL);
            }
            DEFAULT_LEVEL
        }
    }
}
