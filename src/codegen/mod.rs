pub mod emit;
pub mod labels;
pub mod ops;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::record::{self, ArticleRecord};
use crate::taxonomy::Taxonomy;

use emit::ModuleSpec;
use ops::EcsOp;

/// Both artifacts fully rendered, plus the counts reported to the user.
#[derive(Debug)]
pub struct GeneratedModule {
    pub header: String,
    pub source: String,
    pub tags: usize,
    pub entities: usize,
    pub attachments: usize,
}

/// Pure generation pipeline: records → label universe → op list → rendered
/// artifacts. Collisions and malformed input surface here, before anything
/// touches the filesystem.
pub fn generate(
    taxonomy: &Taxonomy,
    records: &[ArticleRecord],
    spec: &ModuleSpec,
) -> Result<GeneratedModule, crate::error::GenerateError> {
    let labels = labels::component_labels(taxonomy, records)?;
    let ops = ops::build_ops(&labels, records)?;

    let tags = ops.iter().filter(|op| matches!(op, EcsOp::DeclareTag { .. })).count();
    let entities = ops.iter().filter(|op| matches!(op, EcsOp::DeclareEntity { .. })).count();
    let attachments = ops.iter().filter(|op| matches!(op, EcsOp::AttachTag { .. })).count();

    Ok(GeneratedModule {
        header: emit::render_header(spec, &ops),
        source: emit::render_source(spec, &ops),
        tags,
        entities,
        attachments,
    })
}

/// Load the article document and write both artifacts next to each other.
/// Rendering happens entirely in memory first; on any failure no file is
/// written.
pub fn generate_to_files(
    taxonomy: &Taxonomy,
    json_path: &Path,
    out_dir: &Path,
    spec: &ModuleSpec,
) -> Result<GeneratedModule> {
    let records = record::load_records(json_path)?;
    info!("Loaded {} records from {}", records.len(), json_path.display());

    let module = generate(taxonomy, &records, spec)?;

    let header_path = out_dir.join(spec.header_file());
    let source_path = out_dir.join(spec.source_file());
    fs::write(&header_path, &module.header)
        .with_context(|| format!("failed to write {}", header_path.display()))?;
    fs::write(&source_path, &module.source)
        .with_context(|| format!("failed to write {}", source_path.display()))?;

    info!("Wrote {} and {}", header_path.display(), source_path.display());
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DEFAULT_LEVEL;

    fn records() -> Vec<ArticleRecord> {
        vec![
            ArticleRecord {
                title: "Paris".to_string(),
                category: "Geography".to_string(),
                subcategory: Some("Cities".to_string()),
                hierarchy: vec!["European cities".to_string()],
                level: 4,
            },
            ArticleRecord {
                title: "Chicago".to_string(),
                category: "Geography".to_string(),
                subcategory: Some("Cities".to_string()),
                hierarchy: vec!["American cities".to_string()],
                level: DEFAULT_LEVEL,
            },
        ]
    }

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(
            "https://example.org/",
            vec![("Geography".to_string(), vec!["Cities".to_string()])],
        )
    }

    #[test]
    fn generates_complete_artifacts() {
        let module = generate(&taxonomy(), &records(), &ModuleSpec::new("vital")).unwrap();
        assert_eq!(module.tags, 4); // Geography, Cities, European cities, American cities
        assert_eq!(module.entities, 2);
        assert_eq!(module.attachments, 6);
        assert!(module.header.contains("extern ECS_DECLARE(COM_European_cities);"));
        assert!(module.source.contains("ecs_add(world, ENT_Chicago, COM_American_cities);"));
    }

    #[test]
    fn collision_fails_before_any_artifact_exists() {
        let colliding = Taxonomy::new(
            "https://example.org/",
            vec![
                ("A.B".to_string(), vec![]),
                ("A B".to_string(), vec![]),
            ],
        );
        let dir = std::env::temp_dir().join("vital_scraper_codegen_test");
        std::fs::create_dir_all(&dir).unwrap();
        let json = dir.join("articles.json");
        std::fs::write(&json, "[]").unwrap();

        let spec = ModuleSpec::new("collision_case");
        let err = generate_to_files(&colliding, &json, &dir, &spec).unwrap_err();
        assert!(err.to_string().contains("sanitize to `A_B`"));
        assert!(!dir.join(spec.header_file()).exists());
        assert!(!dir.join(spec.source_file()).exists());
    }

    #[test]
    fn fixture_to_module_pipeline() {
        let md = std::fs::read_to_string("tests/fixtures/cities.md").unwrap();
        let ctx = crate::parser::PageContext {
            category: "Geography",
            subcategory: Some("Cities"),
        };
        let records = crate::parser::process_page(&md, &ctx, &crate::parser::LinkFilter::default());
        assert_eq!(records.len(), 4);

        let module = generate(&taxonomy(), &records, &ModuleSpec::new("vital")).unwrap();
        assert!(module.header.contains("extern ECS_DECLARE(COM_American_cities);"));
        assert!(module.source.contains("ECS_ENTITY_DEFINE(world, ENT_New_York_City, 0);"));
        assert!(module.source.contains("ecs_add(world, ENT_Detroit, COM_Midwestern_United_States);"));
        assert!(module.source.contains("ecs_add(world, ENT_Paris, COM_European_cities);"));
        // Boilerplate links never became entities.
        assert!(!module.source.contains("ENT_FA"));
    }

    #[test]
    fn generate_to_files_round_trip() {
        let dir = std::env::temp_dir().join("vital_scraper_codegen_roundtrip");
        std::fs::create_dir_all(&dir).unwrap();
        let json = dir.join("articles.json");
        crate::record::save_records(&json, &records()).unwrap();

        let spec = ModuleSpec::new("vital");
        let module = generate_to_files(&taxonomy(), &json, &dir, &spec).unwrap();
        let header = std::fs::read_to_string(dir.join(spec.header_file())).unwrap();
        let source = std::fs::read_to_string(dir.join(spec.source_file())).unwrap();
        assert_eq!(header, module.header);
        assert_eq!(source, module.source);
    }
}
