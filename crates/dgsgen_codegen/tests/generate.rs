use dgsgen_codegen::{generate, CodeGenConfig, CodeGenOutput, FileKind};
use dgsgen_core::CodegenError;
use dgsgen_schema::SdlSource;

fn run(sdl: &str) -> CodeGenOutput {
    run_with(sdl, &CodeGenConfig::new("com.example"))
}

fn run_with(sdl: &str, config: &CodeGenConfig) -> CodeGenOutput {
    generate(&[SdlSource::new("schema.graphqls", sdl)], config).unwrap()
}

const SHOWS: &str = r#"
type Query {
    shows(titleFilter: String, first: Int = 20): [Show]
    search(text: String!): [SearchResult]
}

type Mutation {
    addReview(review: ReviewInput!): Review
}

interface Media { title: String }

type Show implements Media {
    title: String
    releaseYear: Int
    reviews(minScore: Int): [Review]
    related: [Show]
}

type Review { starScore: Int! submittedDate: DateTime }

union SearchResult = Show | Review

input ReviewInput {
    showId: Int!
    score: Int = 5
    tags: [String] = ["new"]
}

scalar DateTime

enum ShowType { MOVIE SERIES }
"#;

#[test]
fn test_generation_is_idempotent() {
    let first = run(SHOWS);
    let second = run(SHOWS);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_expected_artifacts() {
    let output = run(SHOWS);
    let classes = |kind| {
        output
            .of_kind(kind)
            .map(|f| f.class_name.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(classes(FileKind::DataType), ["Review", "ReviewInput", "Show"]);
    assert_eq!(classes(FileKind::Interface), ["Media", "SearchResult"]);
    assert_eq!(classes(FileKind::Enum), ["ShowType"]);
    assert_eq!(classes(FileKind::Constants), ["DgsConstants"]);
    assert_eq!(
        classes(FileKind::Query),
        ["AddReviewGraphQLQuery", "SearchGraphQLQuery", "ShowsGraphQLQuery"]
    );
    assert_eq!(classes(FileKind::Datafetcher), ["SearchDatafetcher", "ShowsDatafetcher"]);

    let show = output.class("Show").unwrap();
    assert!(show.source.contains("public class Show implements Media, SearchResult {"));
    let review = output.class("Review").unwrap();
    assert!(review.source.contains("import java.time.OffsetDateTime;"));
}

#[test]
fn test_cyclic_type_terminates() {
    let output = run("type Query { person: Person }\ntype Person { name: String friends: [Person] }");
    let projections: Vec<_> = output
        .of_kind(FileKind::Projection)
        .map(|f| f.class_name.as_str())
        .collect();
    assert_eq!(projections, ["PersonProjection", "PersonProjectionRoot"]);
}

#[test]
fn test_polymorphic_fragments() {
    let output = run(
        "type Query { pet: Pet }\n\
         interface Pet { name: String }\n\
         type Dog implements Pet { name: String }\n\
         type Bird implements Pet { name: String }",
    );
    let root = output.class("PetProjectionRoot").unwrap();
    assert_eq!(root.source.matches("getFragments().add(fragment);").count(), 2);
    assert!(root.source.contains(" onDog() {"));
    assert!(root.source.contains(" onBird() {"));

    for (class, type_name) in [("DogFragmentProjection", "Dog"), ("BirdFragmentProjection", "Bird")] {
        let fragment = output.class(class).unwrap();
        assert!(fragment.source.contains(&format!("builder.append(\"... on {type_name} {{\");")));
        assert!(fragment.source.contains("getFields().put(\"__typename\", null);"));
    }
}

#[test]
fn test_nested_input_defaults() {
    let output = run(
        "input Paging { size: Int = 3 }\n\
         input Filter { text: String = \"a\\nb\" paging: Paging = {} }\n\
         type Query { items(filter: Filter): [String] }",
    );
    let filter = output.class("Filter").unwrap();
    assert!(filter.source.contains("private String text = \"a\\nb\";"));
    assert!(filter.source.contains("private Paging paging = Paging.newBuilder().build();"));
    let paging = output.class("Paging").unwrap();
    assert!(paging.source.contains("private Integer size = 3;"));
}

#[test]
fn test_reserved_names_keep_wire_names() {
    let output = run("type Query { thing: Thing }\ntype Thing { class: String _import: Int }");
    let constants = output.class("DgsConstants").unwrap();
    assert!(constants.source.contains("public static final String Class = \"class\";"));
    assert!(constants.source.contains("public static final String __import = \"_import\";"));
    let root = output.class("ThingProjectionRoot").unwrap();
    assert!(root.source.contains("public ThingProjectionRoot<PARENT, ROOT> _class() {"));
    assert!(root.source.contains("getFields().put(\"class\", null);"));
    assert!(root.source.contains("getFields().put(\"_import\", null);"));
}

#[test]
fn test_config_from_json() {
    let config: CodeGenConfig = serde_json::from_str(
        r#"{
            "packageName": "com.netflix.shows",
            "typeMapping": { "DateTime": "java.time.Instant" },
            "generateClientApi": false,
            "skip": ["Review.submittedDate"]
        }"#,
    )
    .unwrap();
    assert_eq!(config.package_name, "com.netflix.shows");
    assert!(config.generate_data_types);

    let output = run_with(SHOWS, &config);
    assert_eq!(output.of_kind(FileKind::Query).count(), 0);
    let review = output.class("Review").unwrap();
    assert_eq!(review.path, "com/netflix/shows/types/Review.java");
    assert!(!review.source.contains("submittedDate"));
}

#[test]
fn test_unknown_config_key_is_rejected() {
    let result = serde_json::from_str::<CodeGenConfig>(r#"{ "packageNam": "x" }"#);
    assert!(result.is_err());
}

#[test]
fn test_errors_produce_no_output() {
    let result = generate(
        &[SdlSource::new("schema.graphqls", "input Filter { limit: Int = \"ten\" }")],
        &CodeGenConfig::new("com.example"),
    );
    assert!(matches!(result, Err(CodegenError::InvalidDefaultValue { .. })));
}
