//! Command-line interface for dgsgen.
//!
//! # Usage
//!
//! ```bash
//! # Generate Java sources for every schema file in a directory
//! dgsgen generate schema/ --package com.example.shows --output build/generated
//!
//! # Load a schema and report errors
//! dgsgen check schema.graphqls
//!
//! # Print the request a generated client sends
//! dgsgen preview -s schema.graphqls people --name TestQuery --select firstname --select lastname
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dgsgen_client::{GraphQLQuery, GraphQLQueryRequest, InputValue, ProjectionNode, TYPENAME};
use dgsgen_codegen::{CodeGenConfig, CodeGenerator};
use dgsgen_core::CodegenError;
use dgsgen_schema::{Schema, SdlSource, TypeGraph, TypeId, TypeKind, TypeMapping, TypeRef};
use dgsgen_syntax::OperationType;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extensions picked up when a directory is given.
pub const SCHEMA_EXTENSIONS: &[&str] = &["graphql", "graphqls"];

#[derive(Parser, Debug)]
#[command(name = "dgsgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The log filter used when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "dgsgen=debug"
        } else if self.quiet {
            "dgsgen=warn"
        } else {
            "dgsgen=info"
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Java sources from GraphQL schema files
    Generate(GenerateArgs),

    /// Load a schema and report errors
    Check {
        /// Schema files or directories
        #[arg(required = true)]
        schema: Vec<PathBuf>,

        /// Map a schema type to a Java type
        #[arg(long = "type-mapping", value_name = "NAME=TYPE", value_parser = parse_key_value)]
        type_mappings: Vec<(String, String)>,
    },

    /// Print the request text a generated client sends
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Schema files or directories
    #[arg(required = true)]
    pub schema: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "generated")]
    pub output: PathBuf,

    /// Base package; overrides the config file
    #[arg(short, long)]
    pub package: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Map a schema type to a Java type
    #[arg(long = "type-mapping", value_name = "NAME=TYPE", value_parser = parse_key_value)]
    pub type_mappings: Vec<(String, String)>,

    /// Query fields to generate client classes for
    #[arg(long, value_delimiter = ',')]
    pub include_queries: Vec<String>,

    /// Mutation fields to generate client classes for
    #[arg(long, value_delimiter = ',')]
    pub include_mutations: Vec<String>,

    /// Subscription fields to generate client classes for
    #[arg(long, value_delimiter = ',')]
    pub include_subscriptions: Vec<String>,

    /// `Type` or `Type.field` entries to leave out
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Do not generate data classes, interfaces and enums
    #[arg(long)]
    pub no_data_types: bool,

    /// Do not generate query classes and projections
    #[arg(long)]
    pub no_client_api: bool,

    /// Do not generate datafetcher stubs
    #[arg(long)]
    pub no_datafetchers: bool,

    /// Do not generate all-arguments constructors
    #[arg(long)]
    pub no_all_constructor: bool,

    /// Do not declare setters on interfaces
    #[arg(long)]
    pub no_interface_setters: bool,

    /// Do not generate `_entities` projections and representations
    #[arg(long)]
    pub skip_entity_queries: bool,

    /// Use boxed types for non-null scalars
    #[arg(long)]
    pub boxed_types: bool,

    /// Abbreviate projection class names
    #[arg(long)]
    pub short_projection_names: bool,

    /// Use SHOUTY_SNAKE constant names
    #[arg(long)]
    pub snake_case_constants: bool,

    /// Add `@Deprecated` to deprecated fields and values
    #[arg(long)]
    pub deprecated_annotation: bool,

    /// Add `@Generated` to generated classes
    #[arg(long)]
    pub generated_annotation: bool,

    /// List the files without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Reads the config file, if any, and applies the flags on top.
    pub fn config(&self) -> Result<CodeGenConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = read(path)?;
                serde_json::from_str(&text).map_err(|source| CliError::Config {
                    path: path.clone(),
                    source,
                })?
            }
            None => CodeGenConfig::default(),
        };

        if let Some(package) = &self.package {
            config.package_name.clone_from(package);
        }
        config.type_mapping.extend(self.type_mappings.iter().cloned());
        config.include_queries.extend(self.include_queries.iter().cloned());
        config.include_mutations.extend(self.include_mutations.iter().cloned());
        config
            .include_subscriptions
            .extend(self.include_subscriptions.iter().cloned());
        config.skip.extend(self.skip.iter().cloned());

        let disable = [
            (self.no_data_types, &mut config.generate_data_types),
            (self.no_client_api, &mut config.generate_client_api),
            (self.no_datafetchers, &mut config.generate_datafetchers),
            (self.no_all_constructor, &mut config.generate_all_constructor),
            (self.no_interface_setters, &mut config.generate_interface_setters),
        ];
        for (flag, option) in disable {
            if flag {
                *option = false;
            }
        }
        let enable = [
            (self.boxed_types, &mut config.generate_boxed_types),
            (self.short_projection_names, &mut config.short_projection_names),
            (self.snake_case_constants, &mut config.snake_case_constant_names),
            (self.deprecated_annotation, &mut config.add_deprecated_annotation),
            (self.generated_annotation, &mut config.add_generated_annotation),
            (self.skip_entity_queries, &mut config.skip_entity_queries),
        ];
        for (flag, option) in enable {
            if flag {
                *option = true;
            }
        }
        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Operation {
    Query,
    Mutation,
    Subscription,
}

impl From<Operation> for OperationType {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::Query => Self::Query,
            Operation::Mutation => Self::Mutation,
            Operation::Subscription => Self::Subscription,
        }
    }
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Schema files or directories
    #[arg(short, long, required = true)]
    pub schema: Vec<PathBuf>,

    /// Root field to request
    pub field: String,

    /// Operation the field belongs to
    #[arg(long, value_enum, default_value = "query")]
    pub operation: Operation,

    /// Operation name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Selected path such as `reviews.starScore` or `...Dog.barks`
    #[arg(long = "select", value_name = "PATH")]
    pub selections: Vec<String>,

    /// Root field argument; the value is JSON, or a plain string
    #[arg(long = "arg", value_name = "NAME=VALUE", value_parser = parse_argument)]
    pub arguments: Vec<(String, serde_json::Value)>,
}

/// Errors reported by the CLI.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("cannot read `{}`", .path.display())]
    #[diagnostic(code(dgsgen::io))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write `{}`", .path.display())]
    #[diagnostic(code(dgsgen::io))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file `{}`", .path.display())]
    #[diagnostic(code(dgsgen::config), help("keys are camelCase, for example `packageName`"))]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no schema files found")]
    #[diagnostic(
        code(dgsgen::no_schema),
        help("pass .graphql or .graphqls files, or directories containing them")
    )]
    NoSchema,

    #[error(transparent)]
    #[diagnostic(code(dgsgen::codegen))]
    Codegen(
        #[from]
        #[diagnostic_source]
        CodegenError,
    ),

    #[error("{0}")]
    #[diagnostic(code(dgsgen::preview))]
    Preview(String),
}

impl CliError {
    /// Converts the error for rendering; generation errors keep their own code and source snippet.
    #[must_use]
    pub fn into_report(self) -> miette::Report {
        match self {
            Self::Codegen(error) => miette::Report::new(error),
            error => miette::Report::new(error),
        }
    }
}

/// Runs a command. Errors map to exit code 1.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Generate(args) => generate(args, cli.quiet),
        Commands::Check {
            schema,
            type_mappings,
        } => check(schema, type_mappings, cli.quiet),
        Commands::Preview(args) => {
            let sources = collect_sources(&args.schema)?;
            let schema = Schema::load(&sources, &TypeMapping::default())?;
            println!("{}", render_preview(&schema, args)?);
            Ok(())
        }
    }
}

fn generate(args: &GenerateArgs, quiet: bool) -> Result<(), CliError> {
    let config = args.config()?;
    let sources = collect_sources(&args.schema)?;
    tracing::info!(
        sources = sources.len(),
        package = %config.package_name,
        "generating"
    );

    let schema = Schema::load(&sources, &config.type_mapping)?;
    let output = CodeGenerator::new(&schema, &config).generate()?;

    for file in &output.files {
        let path = args.output.join(&file.path);
        if args.dry_run {
            println!("{} {}", file.kind.to_string().dimmed(), path.display());
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CliError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, &file.source).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), kind = %file.kind, "wrote");
    }

    if !quiet && !args.dry_run {
        println!(
            "{} {} file(s) in {}",
            "Generated".green().bold(),
            output.len(),
            args.output.display()
        );
    }
    Ok(())
}

fn check(paths: &[PathBuf], type_mappings: &[(String, String)], quiet: bool) -> Result<(), CliError> {
    let sources = collect_sources(paths)?;
    let mapping: TypeMapping = type_mappings.iter().cloned().collect();
    let schema = Schema::load(&sources, &mapping)?;
    dgsgen_naming::resolve(&schema.graph)?;

    if !quiet {
        for source in &sources {
            println!("{} {}", "OK".green(), source.name);
        }
        println!(
            "{} {} type(s) in {} file(s)",
            "Success:".green().bold(),
            schema.graph.len(),
            sources.len()
        );
    }
    Ok(())
}

/// Renders the request for one root field with the selected paths.
pub fn render_preview(schema: &Schema, args: &PreviewArgs) -> Result<String, CliError> {
    let graph = &schema.graph;
    let operation = OperationType::from(args.operation);
    let root = graph
        .roots()
        .get(operation)
        .ok_or_else(|| CliError::Preview(format!("the schema has no {} type", operation.as_str())))?;
    let root = graph.get(root);
    let field = root.field(&args.field).ok_or_else(|| {
        CliError::Preview(format!("`{}` has no field `{}`", root.name, args.field))
    })?;

    let mut builder = GraphQLQuery::builder(operation, &args.field);
    if let Some(name) = &args.name {
        builder = builder.operation_name(name);
    }
    for (name, value) in &args.arguments {
        let argument = field
            .arguments
            .iter()
            .find(|argument| &argument.name == name)
            .ok_or_else(|| {
                CliError::Preview(format!("`{}.{}` has no argument `{name}`", root.name, field.name))
            })?;
        builder = builder.argument(name.as_str(), input_value(graph, &argument.ty, value));
    }
    let query = builder.build();

    let target = graph.get(*field.ty.base());
    let projection = if target.kind.is_composite() {
        let mut node = if target.kind.is_abstract() {
            ProjectionNode::polymorphic(&target.name)
        } else {
            ProjectionNode::new(&target.name)
        };
        for path in &args.selections {
            select(schema, &mut node, target.id, path)?;
        }
        if node.is_empty() {
            return Err(CliError::Preview(format!(
                "select at least one field of `{}`",
                target.name
            )));
        }
        Some(node)
    } else if args.selections.is_empty() {
        None
    } else {
        return Err(CliError::Preview(format!(
            "`{}` is a `{}` and has no fields to select",
            args.field, target.name
        )));
    };

    Ok(GraphQLQueryRequest::new(&query, projection.as_ref()).serialize())
}

/// Adds one dotted path to a projection. `...Type` segments open an inline fragment.
fn select(schema: &Schema, root: &mut ProjectionNode, root_type: TypeId, path: &str) -> Result<(), CliError> {
    let graph = &schema.graph;
    let segments: Vec<&str> = path.split('.').collect();
    let mut node = root;
    let mut current = root_type;

    for (i, segment) in segments.iter().copied().enumerate() {
        let last = i + 1 == segments.len();
        let owner = graph.get(current);

        if let Some(concrete) = segment.strip_prefix("...") {
            let id = graph
                .lookup(concrete)
                .filter(|id| schema.polymorphism.is_possible_type(graph, current, *id))
                .ok_or_else(|| {
                    CliError::Preview(format!("`{concrete}` is not a possible type of `{}`", owner.name))
                })?;
            node = node.on(concrete);
            current = id;
            continue;
        }

        if segment == TYPENAME && last {
            node.typename();
            continue;
        }

        let field = schema
            .polymorphism
            .effective_fields(current)
            .iter()
            .map(|effective| &graph.get(effective.owner).fields[effective.index])
            .find(|field| field.name == segment)
            .ok_or_else(|| CliError::Preview(format!("`{}` has no field `{segment}`", owner.name)))?;
        let ty = graph.get(*field.ty.base());
        match (ty.kind.is_composite(), last) {
            (true, false) => {
                node = if ty.kind.is_abstract() {
                    node.child_polymorphic(segment, &ty.name)
                } else {
                    node.child(segment, &ty.name)
                };
                current = ty.id;
            }
            (false, true) => {
                node.field(segment);
            }
            (true, true) => {
                return Err(CliError::Preview(format!(
                    "`{path}` is a `{}`; select one of its fields",
                    ty.name
                )))
            }
            (false, false) => {
                return Err(CliError::Preview(format!(
                    "`{segment}` in `{path}` is a leaf field"
                )))
            }
        }
    }
    Ok(())
}

/// Converts a JSON argument, reading strings as enum values where the type is an enum.
fn input_value(graph: &TypeGraph, ty: &TypeRef, value: &serde_json::Value) -> InputValue {
    match (ty, value) {
        (_, serde_json::Value::Null) => InputValue::Null,
        (TypeRef::List { item, .. }, serde_json::Value::Array(items)) => InputValue::List(
            items
                .iter()
                .map(|item_value| input_value(graph, item, item_value))
                .collect(),
        ),
        (TypeRef::List { item, .. }, single) => InputValue::List(vec![input_value(graph, item, single)]),
        (TypeRef::Named { base, .. }, value) => {
            let node = graph.get(*base);
            match (node.kind, value) {
                (TypeKind::Enum, serde_json::Value::String(name)) => InputValue::enum_value(name.as_str()),
                (TypeKind::Input, serde_json::Value::Object(members)) => InputValue::Object(
                    members
                        .iter()
                        .filter(|(_, member)| !member.is_null())
                        .map(|(key, member)| {
                            let value = node.field(key).map_or_else(
                                || InputValue::from_json(member),
                                |field| input_value(graph, &field.ty, member),
                            );
                            (key.clone(), value)
                        })
                        .collect(),
                ),
                _ => InputValue::from_json(value),
            }
        }
    }
}

/// Reads schema files, expanding directories in path order.
pub fn collect_sources(paths: &[PathBuf]) -> Result<Vec<SdlSource>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_dir(path, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }
    if files.is_empty() {
        return Err(CliError::NoSchema);
    }

    files
        .into_iter()
        .map(|file| {
            tracing::debug!(path = %file.display(), "reading schema");
            let text = read(&file)?;
            Ok(SdlSource::new(file.display().to_string(), text))
        })
        .collect()
}

fn collect_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), CliError> {
    let read_error = |source| CliError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        entries.push(entry.map_err(read_error)?.path());
    }
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_dir(&path, files)?;
        } else if is_schema_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_schema_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| SCHEMA_EXTENSIONS.contains(&extension))
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() && !value.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got `{s}`")),
    }
}

fn parse_argument(s: &str) -> Result<(String, serde_json::Value), String> {
    let (name, value) = s
        .split_once('=')
        .filter(|(name, _)| !name.trim().is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((name.trim().to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE: &str = r#"
        type Query {
            people(filter: PersonFilter, first: Int): [Person]
            pets: [Pet]
            dogs: [Dog]
            owners: [Owner]
            count: Int
        }
        type Person { firstname: String lastname: String friends: [Person] }
        input PersonFilter { role: Role name: String }
        enum Role { ADMIN USER }
        interface Pet { name: String }
        type Dog implements Pet { barks: Boolean }
        type Owner { name: String pet: Pet }
        type Bird implements Pet { name: String wingspan: Float }
    "#;

    fn schema() -> Schema {
        Schema::load(&[SdlSource::new("schema.graphqls", PEOPLE)], &TypeMapping::default()).unwrap()
    }

    fn preview(args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(
            ["dgsgen", "preview", "-s", "schema.graphqls"]
                .iter()
                .chain(args)
                .copied(),
        )
        .unwrap();
        let Commands::Preview(args) = cli.command else {
            unreachable!()
        };
        render_preview(&schema(), &args)
    }

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_filter() {
        let cli = Cli::try_parse_from(["dgsgen", "-v", "check", "schema.graphqls"]).unwrap();
        assert_eq!(cli.log_filter(), "dgsgen=debug");
        let cli = Cli::try_parse_from(["dgsgen", "check", "schema.graphqls", "--quiet"]).unwrap();
        assert_eq!(cli.log_filter(), "dgsgen=warn");
        assert!(Cli::try_parse_from(["dgsgen", "-v", "-q", "check", "x"]).is_err());
    }

    #[test]
    fn test_key_value() {
        assert_eq!(
            parse_key_value("DateTime=java.time.Instant"),
            Ok(("DateTime".to_string(), "java.time.Instant".to_string()))
        );
        assert!(parse_key_value("DateTime").is_err());
        assert!(parse_key_value("=java.lang.String").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "dgsgen",
            "generate",
            "schema.graphqls",
            "--package",
            "com.example",
            "--type-mapping",
            "DateTime=java.time.Instant",
            "--include-queries",
            "people,pets",
            "--no-datafetchers",
            "--no-interface-setters",
            "--short-projection-names",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            unreachable!()
        };
        let config = args.config().unwrap();
        assert_eq!(config.package_name, "com.example");
        assert_eq!(config.type_mapping["DateTime"], "java.time.Instant");
        assert_eq!(config.include_queries, ["people", "pets"]);
        assert!(!config.generate_datafetchers);
        assert!(!config.generate_interface_setters);
        assert!(config.generate_client_api);
        assert!(config.short_projection_names);
    }

    #[test]
    fn test_interface_setters_default_on() {
        let cli = Cli::try_parse_from(["dgsgen", "generate", "schema.graphqls"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            unreachable!()
        };
        let config = args.config().unwrap();
        assert!(config.generate_interface_setters);
        assert!(!config.skip_entity_queries);
    }

    #[test]
    fn test_skip_entity_queries_flag() {
        let cli = Cli::try_parse_from(["dgsgen", "generate", "schema.graphqls", "--skip-entity-queries"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            unreachable!()
        };
        assert!(args.config().unwrap().skip_entity_queries);
    }

    #[test]
    fn test_generate_writes_sorted_tree() {
        let dir = std::env::temp_dir().join(format!("dgsgen-cli-{}", std::process::id()));
        let schema_dir = dir.join("schema");
        std::fs::create_dir_all(&schema_dir).unwrap();
        std::fs::write(schema_dir.join("a.graphqls"), "type Query { people: [Person] }").unwrap();
        std::fs::write(schema_dir.join("b.graphqls"), "type Person { firstname: String }").unwrap();
        std::fs::write(schema_dir.join("notes.txt"), "not a schema").unwrap();

        let sources = collect_sources(&[schema_dir.clone()]).unwrap();
        assert_eq!(sources.len(), 2);

        let output = dir.join("out");
        let args: Vec<std::ffi::OsString> = vec![
            "dgsgen".into(),
            "-q".into(),
            "generate".into(),
            schema_dir.clone().into(),
            "--package".into(),
            "com.example".into(),
            "--output".into(),
            output.clone().into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        run(&cli).unwrap();
        assert!(output.join("com/example/types/Person.java").is_file());
        assert!(output.join("com/example/client/PeopleProjectionRoot.java").is_file());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_codegen_errors_keep_their_code() {
        let error = CliError::from(CodegenError::merge("Dog", "field `name` is declared twice"));
        assert_eq!(error.code().unwrap().to_string(), "dgsgen::codegen");
        assert_eq!(error.to_string(), error.diagnostic_source().unwrap().to_string());
        let report = error.into_report();
        assert_eq!(report.code().unwrap().to_string(), "dgsgen::schema_merge");

        let report = CliError::NoSchema.into_report();
        assert_eq!(report.code().unwrap().to_string(), "dgsgen::no_schema");
    }

    #[test]
    fn test_missing_schema_files() {
        assert!(matches!(collect_sources(&[]), Err(CliError::NoSchema)));
        assert!(matches!(
            collect_sources(&[PathBuf::from("does/not/exist.graphqls")]),
            Err(CliError::Read { .. })
        ));
    }

    #[test]
    fn test_preview_people() {
        let text = preview(&["people", "--name", "TestQuery", "--select", "firstname", "--select", "lastname"]).unwrap();
        assert_eq!(
            text,
            "query TestQuery {\n  people {\n    firstname\n    lastname\n  }\n}"
        );
    }

    #[test]
    fn test_preview_arguments() {
        let text = preview(&[
            "people",
            "--arg",
            r#"filter={"role": "ADMIN", "name": "Ann"}"#,
            "--arg",
            "first=2",
            "--select",
            "friends.firstname",
        ])
        .unwrap();
        insta::assert_snapshot!(text, @r###"
        {
          people(filter: {name: "Ann", role: ADMIN}, first: 2) {
            friends {
              firstname
            }
          }
        }
        "###);
    }

    #[test]
    fn test_preview_fragments() {
        let text = preview(&["pets", "--select", "name", "--select", "...Dog.barks", "--select", "...Bird.wingspan"]).unwrap();
        assert_eq!(text.matches("... on ").count(), 2);
        assert!(text.contains("... on Dog {\n      __typename\n      barks\n    }"));
    }

    #[test]
    fn test_preview_nested_interface_selects_typename() {
        let text = preview(&["owners", "--select", "name", "--select", "pet.name"]).unwrap();
        insta::assert_snapshot!(text, @r###"
        {
          owners {
            name
            pet {
              __typename
              name
            }
          }
        }
        "###);
    }

    #[test]
    fn test_preview_inherited_field() {
        let text = preview(&["dogs", "--select", "name", "--select", "barks"]).unwrap();
        assert_eq!(text, "{\n  dogs {\n    name\n    barks\n  }\n}");
    }

    #[test]
    fn test_preview_errors() {
        assert!(matches!(preview(&["missing"]), Err(CliError::Preview(_))));
        assert!(matches!(preview(&["people"]), Err(CliError::Preview(_))));
        assert!(matches!(preview(&["people", "--select", "friends"]), Err(CliError::Preview(_))));
        assert!(matches!(preview(&["pets", "--select", "...Person.firstname"]), Err(CliError::Preview(_))));
        assert!(matches!(preview(&["count", "--select", "x"]), Err(CliError::Preview(_))));
        assert_eq!(preview(&["count"]).unwrap(), "{\n  count\n}");
    }
}
