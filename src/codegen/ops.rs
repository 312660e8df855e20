use std::collections::HashSet;

use crate::error::GenerateError;
use crate::record::ArticleRecord;

use super::labels::{sanitize_identifier, ComponentLabel, LabelSet};

/// One ECS world mutation, independent of any runtime's binding syntax.
/// The generator is a pure function from (records, labels) to this list;
/// a backend renders it for a concrete runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcsOp {
    DeclareTag { ident: String },
    DeclareEntity { ident: String },
    AttachTag { entity: String, tag: String },
}

/// Build the ordered operation list: every tag first (label order), then
/// per record in input order its entity declaration and attachments.
///
/// Records never deduplicate, but entities do: repeated titles merge onto
/// one entity, and each (entity, tag) pair attaches once. Distinct titles
/// sanitizing to one identifier are a collision; titles and labels are
/// separate identifier namespaces, each checked on its own.
pub fn build_ops(
    labels: &[ComponentLabel],
    records: &[ArticleRecord],
) -> Result<Vec<EcsOp>, GenerateError> {
    let mut ops = Vec::new();

    for label in labels {
        ops.push(EcsOp::DeclareTag {
            ident: label.ident.clone(),
        });
    }

    let mut entities = LabelSet::default();
    let mut attached: HashSet<(String, String)> = HashSet::new();

    for record in records {
        let known = entities.contains(&record.title);
        entities.insert(&record.title)?;
        let entity = sanitize_identifier(&record.title);
        if !known {
            ops.push(EcsOp::DeclareEntity {
                ident: entity.clone(),
            });
        }

        let mut tags: Vec<&str> = vec![record.category.as_str()];
        if let Some(subcategory) = &record.subcategory {
            tags.push(subcategory);
        }
        tags.extend(record.hierarchy.iter().map(String::as_str));

        for tag in tags {
            let tag_ident = sanitize_identifier(tag);
            if attached.insert((entity.clone(), tag_ident.clone())) {
                ops.push(EcsOp::AttachTag {
                    entity: entity.clone(),
                    tag: tag_ident,
                });
            }
        }
    }

    Ok(ops)
}
