//! The generation driver.

use crate::config::CodeGenConfig;
use crate::emit::{self, Context};
use crate::output::{CodeGenOutput, GeneratedFile};
use dgsgen_core::{CodegenError, Result};
use dgsgen_naming::NameTable;
use dgsgen_schema::{Schema, SdlSource};
use indexmap::IndexMap;
use rayon::prelude::*;

/// One independent emitter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job {
    DataTypes,
    Interfaces,
    Enums,
    /// Inputs and enums the client API needs when data types are off.
    ClientInputTypes,
    Constants,
    Queries,
    Projections,
    Representations,
    Datafetchers,
}

impl Job {
    fn enabled(config: &CodeGenConfig) -> Vec<Self> {
        let mut jobs = Vec::with_capacity(9);
        if config.generate_data_types {
            jobs.extend([Self::DataTypes, Self::Interfaces, Self::Enums]);
        } else if config.generate_client_api {
            jobs.push(Self::ClientInputTypes);
        }
        jobs.push(Self::Constants);
        if config.generate_client_api {
            jobs.extend([Self::Queries, Self::Projections, Self::Representations]);
        }
        if config.generate_datafetchers {
            jobs.push(Self::Datafetchers);
        }
        jobs
    }

    fn run(self, ctx: &Context<'_>) -> Result<Vec<GeneratedFile>> {
        let files = match self {
            Self::DataTypes => emit::data_class::emit(ctx),
            Self::Interfaces => emit::interfaces::emit(ctx),
            Self::Enums => emit::enums::emit(ctx),
            Self::ClientInputTypes => {
                let required = ctx.client_input_types();
                let mut files = emit::data_class::emit_matching(ctx, |node| required.contains(&node.id));
                files.extend(emit::enums::emit_matching(ctx, |node| required.contains(&node.id)));
                files
            }
            Self::Constants => emit::constants::emit(ctx)?,
            Self::Queries => emit::query::emit(ctx)?,
            Self::Projections => emit::projection::emit(ctx)?,
            Self::Representations => emit::representation::emit(ctx),
            Self::Datafetchers => emit::datafetcher::emit(ctx),
        };
        tracing::debug!(job = ?self, files = files.len(), "emitter finished");
        Ok(files)
    }
}

/// Generates Java sources for a loaded schema.
pub struct CodeGenerator<'a> {
    schema: &'a Schema,
    config: &'a CodeGenConfig,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(schema: &'a Schema, config: &'a CodeGenConfig) -> Self {
        Self { schema, config }
    }

    /// Runs every enabled emitter.
    ///
    /// Names are resolved before any emitter starts; emitters then run in
    /// parallel over the read-only schema. The output is sorted by path and
    /// identical for identical input.
    pub fn generate(&self) -> Result<CodeGenOutput> {
        let names = NameTable::resolve(&self.schema.graph)?;
        let ctx = Context::new(self.schema, &names, self.config);
        let jobs = Job::enabled(self.config);
        tracing::debug!(jobs = jobs.len(), types = self.schema.graph.len(), "generating");

        let results: Vec<Result<Vec<GeneratedFile>>> =
            jobs.par_iter().map(|job| job.run(&ctx)).collect();

        let mut files: IndexMap<String, GeneratedFile> = IndexMap::new();
        // Results keep job order, so the reported error does not depend on scheduling.
        for result in results {
            for file in result? {
                if let Some(existing) = files.get(&file.path) {
                    return Err(CodegenError::collision(
                        file.class_name.clone(),
                        format!("{} {}", existing.kind, existing.class_name),
                        format!("{} {}", file.kind, file.class_name),
                    ));
                }
                files.insert(file.path.clone(), file);
            }
        }
        files.sort_keys();

        tracing::debug!(files = files.len(), "generation finished");
        Ok(CodeGenOutput {
            files: files.into_values().collect(),
        })
    }
}

/// Loads SDL sources and generates Java sources for them.
pub fn generate(sources: &[SdlSource], config: &CodeGenConfig) -> Result<CodeGenOutput> {
    let schema = Schema::load(sources, &config.type_mapping)?;
    CodeGenerator::new(&schema, config).generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::FileKind;

    fn sources(sdl: &str) -> Vec<SdlSource> {
        vec![SdlSource::new("schema.graphqls", sdl)]
    }

    #[test]
    fn test_output_sorted_by_path() {
        let output = generate(
            &sources(
                "type Query { people: [Person] }\ntype Person { name: String }\nenum Color { RED }",
            ),
            &CodeGenConfig::new("com.example"),
        )
        .unwrap();
        let paths: Vec<_> = output.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "com/example/DgsConstants.java",
                "com/example/client/PeopleGraphQLQuery.java",
                "com/example/client/PeopleProjectionRoot.java",
                "com/example/datafetchers/PeopleDatafetcher.java",
                "com/example/types/Color.java",
                "com/example/types/Person.java",
            ]
        );
    }

    #[test]
    fn test_disabled_emitters() {
        let config = CodeGenConfig {
            generate_client_api: false,
            generate_datafetchers: false,
            ..CodeGenConfig::new("com.example")
        };
        let output = generate(
            &sources("type Query { people: [Person] }\ntype Person { name: String }"),
            &config,
        )
        .unwrap();
        assert_eq!(output.of_kind(FileKind::Query).count(), 0);
        assert_eq!(output.of_kind(FileKind::Datafetcher).count(), 0);
        assert_eq!(output.of_kind(FileKind::DataType).count(), 1);
        assert_eq!(output.of_kind(FileKind::Constants).count(), 1);
    }

    #[test]
    fn test_client_api_keeps_its_input_types() {
        let config = CodeGenConfig {
            generate_data_types: false,
            generate_datafetchers: false,
            ..CodeGenConfig::new("com.example")
        };
        let output = generate(
            &sources(
                "type Query { people(filter: PersonFilter): [Person] }\n\
                 type Person { name: String role: Role }\n\
                 input PersonFilter { role: Role }\n\
                 enum Role { ADMIN }\n\
                 enum Unused { X }",
            ),
            &config,
        )
        .unwrap();
        let classes = |kind| output.of_kind(kind).map(|f| f.class_name.as_str()).collect::<Vec<_>>();
        assert_eq!(classes(FileKind::DataType), ["PersonFilter"]);
        assert_eq!(classes(FileKind::Enum), ["Role"]);
        assert_eq!(classes(FileKind::Interface), Vec::<&str>::new());
        let query = output.class("PeopleGraphQLQuery").unwrap();
        assert!(query.source.contains("import com.example.types.PersonFilter;"));
    }

    #[test]
    fn test_entities_client_api() {
        let sdl = "type Query { movie: Movie }\n\
                   type Movie @key(fields: \"id genre\") { id: ID! genre: Genre title: String }\n\
                   enum Genre { DRAMA }";
        let config = CodeGenConfig {
            generate_data_types: false,
            generate_datafetchers: false,
            ..CodeGenConfig::new("com.example")
        };
        let output = generate(&sources(sdl), &config).unwrap();
        let paths: Vec<_> = output.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "com/example/DgsConstants.java",
                "com/example/client/EntitiesMovieKeyProjection.java",
                "com/example/client/EntitiesProjectionRoot.java",
                "com/example/client/MovieGraphQLQuery.java",
                "com/example/client/MovieProjectionRoot.java",
                "com/example/client/MovieRepresentation.java",
                "com/example/types/Genre.java",
            ]
        );
        let representation = output.class("MovieRepresentation").unwrap();
        assert!(representation.source.contains("import com.example.types.Genre;"));

        let config = CodeGenConfig {
            skip_entity_queries: true,
            ..config
        };
        let output = generate(&sources(sdl), &config).unwrap();
        assert_eq!(output.of_kind(FileKind::Representation).count(), 0);
        assert!(output.class("EntitiesProjectionRoot").is_none());
        assert!(output.class("Genre").is_none());
    }

    #[test]
    fn test_duplicate_path_is_a_collision() {
        // With one package for both, the projection of `Person` lands on the data class.
        let config = CodeGenConfig {
            sub_package_name_client: "types".to_string(),
            ..CodeGenConfig::new("com.example")
        };
        let result = generate(
            &sources(
                "type Query { person: Person }\n\
                 type Person { friend: Person }\n\
                 type PersonProjection { a: Int }",
            ),
            &config,
        );
        assert!(matches!(result, Err(CodegenError::NameCollision { .. })));
    }

    #[test]
    fn test_errors_abort_generation() {
        let result = generate(
            &sources("type Query { a: Missing }"),
            &CodeGenConfig::new("com.example"),
        );
        assert!(matches!(result, Err(CodegenError::UnresolvedType { .. })));
    }
}
