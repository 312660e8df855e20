use super::ops::EcsOp;

const TAG_PREFIX: &str = "COM_";
const ENTITY_PREFIX: &str = "ENT_";
const INCLUDE_GUARD: &str = "GENERATED_MAPPINGS_H";

/// Naming for the generated flecs module. Artifact file names, the export
/// macro, and the import routine all derive from the module name.
#[derive(Debug, Clone)]
pub struct ModuleSpec {
    pub name: String,
}

impl ModuleSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn header_file(&self) -> String {
        format!("{}_module.h", self.name)
    }

    pub fn source_file(&self) -> String {
        format!("{}_module.c", self.name)
    }

    pub fn api_macro(&self) -> String {
        format!("{}_MODULE_API", self.name.to_uppercase())
    }

    /// `vital` → `VitalModuleImport`.
    pub fn import_fn(&self) -> String {
        format!("{}ModuleImport", self.pascal_name())
    }

    /// `vital` → `VitalModule`, the name registered with `ECS_MODULE`.
    pub fn module_ident(&self) -> String {
        format!("{}Module", self.pascal_name())
    }

    fn pascal_name(&self) -> String {
        self.name
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect()
    }
}

/// Render the declarations artifact: include-guarded header with one
/// forward-declared tag per ComponentLabel and the exported import routine.
pub fn render_header(spec: &ModuleSpec, ops: &[EcsOp]) -> String {
    let api = spec.api_macro();
    let mut out = String::new();

    out.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n", guard = INCLUDE_GUARD));
    out.push_str("#include <flecs.h>\n\n");
    out.push_str(&format!(
        "#ifdef _WIN32\n#define {api} __declspec(dllexport)\n#else\n#define {api} __attribute__((visibility(\"default\")))\n#endif\n\n",
    ));
    out.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");

    for op in ops {
        if let EcsOp::DeclareTag { ident } = op {
            out.push_str(&format!("extern ECS_DECLARE({}{});\n", TAG_PREFIX, ident));
        }
    }

    out.push_str(&format!(
        "\n{api} void {import}(ecs_world_t* world);\n\n",
        import = spec.import_fn(),
    ));
    out.push_str("#ifdef __cplusplus\n}\n#endif\n\n");
    out.push_str(&format!("#endif // {}\n", INCLUDE_GUARD));
    out
}

/// Render the registration artifact: tag and entity storage definitions,
/// then the bulk import routine that defines every tag and entity and
/// establishes every attachment against a live world.
pub fn render_source(spec: &ModuleSpec, ops: &[EcsOp]) -> String {
    let mut out = String::new();

    out.push_str(&format!("#include \"{}\"\n\n", spec.header_file()));

    out.push_str("// Forward declarations\n");
    for op in ops {
        if let EcsOp::DeclareTag { ident } = op {
            out.push_str(&format!("ECS_DECLARE({}{});\n", TAG_PREFIX, ident));
        }
    }

    out.push_str("\n// Forward declare article entities\n");
    for op in ops {
        if let EcsOp::DeclareEntity { ident } = op {
            out.push_str(&format!("ECS_DECLARE({}{});\n", ENTITY_PREFIX, ident));
        }
    }

    out.push_str(&format!("\nvoid {}(ecs_world_t* world) {{\n\n", spec.import_fn()));
    out.push_str(&format!("\tECS_MODULE(world, {});\n\n", spec.module_ident()));

    for op in ops {
        if let EcsOp::DeclareTag { ident } = op {
            out.push_str(&format!("\tECS_TAG_DEFINE(world, {}{});\n", TAG_PREFIX, ident));
        }
    }

    out.push_str("\n\t// Create entities and add components\n");
    for op in ops {
        match op {
            EcsOp::DeclareTag { .. } => {}
            EcsOp::DeclareEntity { ident } => {
                out.push_str(&format!(
                    "\tECS_ENTITY_DEFINE(world, {}{}, 0);\n",
                    ENTITY_PREFIX, ident
                ));
            }
            EcsOp::AttachTag { entity, tag } => {
                out.push_str(&format!(
                    "\tecs_add(world, {}{}, {}{});\n",
                    ENTITY_PREFIX, entity, TAG_PREFIX, tag
                ));
            }
        }
    }

    out.push_str("}\n");
    out
}
