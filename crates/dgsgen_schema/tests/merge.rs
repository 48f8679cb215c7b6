use dgsgen_core::CodegenError;
use dgsgen_schema::{Schema, SdlSource, TypeKind, TypeMapping};

fn schema(sources: &[(&str, &str)]) -> Result<Schema, CodegenError> {
    let sources: Vec<_> = sources
        .iter()
        .map(|(name, text)| SdlSource::new(*name, *text))
        .collect();
    Schema::load(&sources, &TypeMapping::default())
}

#[test]
fn test_merge_commutes_across_documents() {
    let base = ("base.graphqls", "type A { x: Int }");
    let extension = ("ext.graphqls", "extend type A { y: String }");

    let forward = schema(&[base, extension]).unwrap();
    let backward = schema(&[extension, base]).unwrap();
    assert_eq!(forward, backward);

    let a = forward.graph.by_name("A").unwrap();
    let fields: Vec<_> = a.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, ["x", "y"]);
}

#[test]
fn test_extension_adds_interfaces() {
    let schema = schema(&[
        ("a.graphqls", "interface Node { id: ID! }\ntype User { id: ID! }"),
        ("b.graphqls", "extend type User implements Node"),
    ])
    .unwrap();
    let node = schema.graph.lookup("Node").unwrap();
    let user = schema.graph.lookup("User").unwrap();
    assert_eq!(schema.polymorphism.implementations(node), [user]);
}

#[test]
fn test_mutually_recursive_types() {
    let schema = schema(&[(
        "schema.graphqls",
        "type Query { author: Author }\n\
         type Author { books: [Book!]! }\n\
         type Book { author: Author }",
    )])
    .unwrap();
    let author = schema.graph.by_name("Author").unwrap();
    let book = schema.graph.lookup("Book").unwrap();
    assert_eq!(*author.fields[0].ty.base(), book);
    assert_eq!(schema.graph.types_of_kind(TypeKind::Object).count(), 3);
}

#[test]
fn test_errors_are_all_or_nothing() {
    let err = schema(&[
        ("a.graphqls", "type Query { a: Int }"),
        ("b.graphqls", "extend type Query { a: String }"),
    ])
    .unwrap_err();
    assert!(matches!(err, CodegenError::SchemaMerge { .. }));
}
