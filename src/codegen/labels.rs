use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::GenerateError;
use crate::record::ArticleRecord;
use crate::taxonomy::Taxonomy;

static UNDERSCORE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__+").unwrap());

/// Stand-in for a label whose characters are all stripped by sanitization.
/// Sanitizes to itself; two distinct all-symbol labels collide and are
/// rejected like any other collision.
const EMPTY_FALLBACK: &str = "unnamed";

/// Reduce a label to a valid C identifier fragment: every character outside
/// `[A-Za-z0-9_]` becomes `_`, runs collapse to one, edges are trimmed.
pub fn sanitize_identifier(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let collapsed = UNDERSCORE_RUN_RE.replace_all(&replaced, "_");
    let trimmed = collapsed.trim_matches('_');
    if trimmed.is_empty() {
        EMPTY_FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}

/// A category, subcategory, or hierarchy heading, paired with its
/// sanitized identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLabel {
    pub original: String,
    pub ident: String,
}

/// First-seen-ordered set of originals with collision detection over their
/// sanitized forms. Re-inserting a known original is a no-op; two distinct
/// originals mapping to one identifier is an error, never a silent merge.
#[derive(Debug, Default)]
pub struct LabelSet {
    labels: Vec<ComponentLabel>,
    seen: HashSet<String>,
    by_ident: HashMap<String, String>,
}

impl LabelSet {
    pub fn insert(&mut self, original: &str) -> Result<(), GenerateError> {
        if self.seen.contains(original) {
            return Ok(());
        }
        let ident = sanitize_identifier(original);
        if let Some(first) = self.by_ident.get(&ident) {
            return Err(GenerateError::IdentifierCollision {
                first: first.clone(),
                second: original.to_string(),
                ident,
            });
        }
        self.seen.insert(original.to_string());
        self.by_ident.insert(ident.clone(), original.to_string());
        self.labels.push(ComponentLabel {
            original: original.to_string(),
            ident,
        });
        Ok(())
    }

    pub fn contains(&self, original: &str) -> bool {
        self.seen.contains(original)
    }

    pub fn into_labels(self) -> Vec<ComponentLabel> {
        self.labels
    }
}

/// The ComponentLabel universe: every category, every subcategory, then
/// every distinct hierarchy string, in first-seen order (taxonomy
/// declaration order first, then record order). Record-level category and
/// subcategory fields are unioned in too, so a document scraped against an
/// older taxonomy still declares every tag it attaches.
pub fn component_labels(
    taxonomy: &Taxonomy,
    records: &[ArticleRecord],
) -> Result<Vec<ComponentLabel>, GenerateError> {
    let mut set = LabelSet::default();

    for (category, subcategories) in taxonomy.entries() {
        set.insert(category)?;
        for subcategory in subcategories {
            set.insert(subcategory)?;
        }
    }

    for record in records {
        set.insert(&record.category)?;
        if let Some(subcategory) = &record.subcategory {
            set.insert(subcategory)?;
        }
        for heading in &record.hierarchy {
            set.insert(heading)?;
        }
    }

    Ok(set.into_labels())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DEFAULT_LEVEL;

    fn record(category: &str, hierarchy: &[&str]) -> ArticleRecord {
        ArticleRecord {
            title: "Earth".to_string(),
            category: category.to_string(),
            subcategory: None,
            hierarchy: hierarchy.iter().map(|s| s.to_string()).collect(),
            level: DEFAULT_LEVEL,
        }
    }

    #[test]
    fn sanitize_replaces_and_collapses() {
        assert_eq!(sanitize_identifier("Sports,_games_and_recreation"), "Sports_games_and_recreation");
        assert_eq!(sanitize_identifier("Health, medicine, and disease"), "Health_medicine_and_disease");
        assert_eq!(sanitize_identifier("C++ (language)"), "C_language");
    }

    #[test]
    fn sanitize_trims_edge_underscores() {
        assert_eq!(sanitize_identifier("_Earth_"), "Earth");
        assert_eq!(sanitize_identifier("(Earth)"), "Earth");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for raw in ["Sports,_games_and_recreation", "A.B", "(x) y!", "???"] {
            let once = sanitize_identifier(raw);
            assert_eq!(sanitize_identifier(&once), once);
        }
    }

    #[test]
    fn sanitize_never_yields_empty_or_edge_underscores() {
        for raw in ["???", "...", "a", "_", "-a-", "a  b"] {
            let ident = sanitize_identifier(raw);
            assert!(!ident.is_empty(), "{:?} sanitized to empty", raw);
            assert!(!ident.starts_with('_') && !ident.ends_with('_'), "{:?} → {:?}", raw, ident);
            assert!(!ident.contains("__"), "{:?} → {:?}", raw, ident);
        }
    }

    #[test]
    fn labels_in_first_seen_order() {
        let taxonomy = Taxonomy::new(
            "https://example.org/",
            vec![
                ("People".to_string(), vec!["Writers".to_string()]),
                ("History".to_string(), vec![]),
            ],
        );
        let records = [record("People", &["Poets", "Writers"])];
        let labels = component_labels(&taxonomy, &records).unwrap();
        let originals: Vec<&str> = labels.iter().map(|l| l.original.as_str()).collect();
        // "Writers" comes from the taxonomy and is not re-added from the
        // hierarchy; "Poets" follows in record order.
        assert_eq!(originals, ["People", "Writers", "History", "Poets"]);
    }

    #[test]
    fn distinct_labels_with_one_identifier_collide() {
        let taxonomy = Taxonomy::new(
            "https://example.org/",
            vec![
                ("A.B".to_string(), vec![]),
                ("A B".to_string(), vec![]),
            ],
        );
        let err = component_labels(&taxonomy, &[]).unwrap_err();
        match err {
            GenerateError::IdentifierCollision { first, second, ident } => {
                assert_eq!(first, "A.B");
                assert_eq!(second, "A B");
                assert_eq!(ident, "A_B");
            }
            other => panic!("expected IdentifierCollision, got {:?}", other),
        }
    }

    #[test]
    fn repeated_original_is_not_a_collision() {
        let taxonomy = Taxonomy::new("https://example.org/", vec![("Arts".to_string(), vec![])]);
        let records = [record("Arts", &["Arts"])];
        let labels = component_labels(&taxonomy, &records).unwrap();
        assert_eq!(labels.len(), 1);
    }
}
