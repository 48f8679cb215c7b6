use dgsgen_client::{GraphQLQuery, GraphQLQueryRequest, InputValue, ProjectionNode};
use dgsgen_core::Interner;
use dgsgen_syntax::{Definition, OperationType, Selection};

#[test]
fn test_people_query() {
    let query = GraphQLQuery::builder(OperationType::Query, "people")
        .operation_name("TestQuery")
        .build();
    let mut projection = ProjectionNode::new("Person");
    projection.field("firstname").field("lastname");

    assert_eq!(
        GraphQLQueryRequest::new(&query, Some(&projection)).serialize(),
        "query TestQuery {\n  people {\n    firstname\n    lastname\n  }\n}"
    );
}

#[test]
fn test_interface_fragments() {
    let query = GraphQLQuery::builder(OperationType::Query, "pets").build();
    let mut projection = ProjectionNode::new("Pet");
    projection.field("name");
    projection.on("Dog").field("barks");
    projection.on("Bird").field("wingspan");

    let text = GraphQLQueryRequest::new(&query, Some(&projection)).serialize();
    assert_eq!(text.matches("... on ").count(), 2);
    for fragment in text.split("... on ").skip(1) {
        let body = &fragment[..fragment.find('}').unwrap()];
        assert!(body.contains("__typename"), "{body}");
    }
    insta::assert_snapshot!(text, @r###"
    {
      pets {
        __typename
        name
        ... on Dog {
          __typename
          barks
        }
        ... on Bird {
          __typename
          wingspan
        }
      }
    }
    "###);
}

#[test]
fn test_nested_interface_selection() {
    let query = GraphQLQuery::builder(OperationType::Query, "owners").build();
    let mut projection = ProjectionNode::new("Owner");
    projection.child_polymorphic("pet", "Pet").field("name");

    assert_eq!(
        GraphQLQueryRequest::new(&query, Some(&projection)).serialize(),
        "{\n  owners {\n    pet {\n      __typename\n      name\n    }\n  }\n}"
    );
}

#[test]
fn test_explicit_null_and_nested_input() {
    let query = GraphQLQuery::builder(OperationType::Mutation, "addReview")
        .argument(
            "review",
            InputValue::object([
                ("showId", InputValue::from(1)),
                ("comment", InputValue::from("great\nshow")),
            ]),
        )
        .argument("tags", InputValue::Null)
        .build();
    let mut projection = ProjectionNode::new("Review");
    projection.field("starScore");

    assert_eq!(
        GraphQLQueryRequest::new(&query, Some(&projection)).serialize(),
        "mutation {\n  addReview(review: {showId: 1, comment: \"great\\nshow\"}, tags: null) {\n    starScore\n  }\n}"
    );
}

#[test]
fn test_field_arguments_in_projection() {
    let query = GraphQLQuery::builder(OperationType::Query, "shows").build();
    let mut projection = ProjectionNode::new("Show");
    projection.field("title");
    projection
        .child_with("reviews", "Review", [("minScore", 3)])
        .field("starScore");

    assert_eq!(
        GraphQLQueryRequest::new(&query, Some(&projection)).serialize(),
        "{\n  shows {\n    title\n    reviews(minScore: 3) {\n      starScore\n    }\n  }\n}"
    );
}

#[test]
fn test_output_parses() {
    let query = GraphQLQuery::builder(OperationType::Query, "shows")
        .operation_name("Shows")
        .reference("titleFilter", "title", "String!")
        .build();
    let mut projection = ProjectionNode::new("SearchResult");
    projection.on("Show").field("title");
    let text = GraphQLQueryRequest::new(&query, Some(&projection)).serialize();

    let interner = Interner::new();
    let result = dgsgen_syntax::parse(&text, &interner);
    assert!(!result.diagnostics.has_errors(), "{text}");
    let [Definition::Operation(operation)] = result.document.definitions.as_slice() else {
        panic!("expected one operation in {text}");
    };
    assert_eq!(operation.operation, OperationType::Query);
    assert_eq!(interner.get(operation.name.as_ref().unwrap().value), "Shows");
    assert_eq!(operation.variables.len(), 1);
    let [Selection::Field(shows)] = operation.selection_set.selections.as_slice() else {
        panic!("expected one root field");
    };
    assert_eq!(interner.get(shows.name.value), "shows");
    let selections = &shows.selection_set.as_ref().unwrap().selections;
    assert!(matches!(selections.last(), Some(Selection::InlineFragment(_))));
}

#[test]
fn test_entities_query() {
    let query = GraphQLQuery::entities().build();
    let mut projection = ProjectionNode::new("_Entity");
    projection.on("Movie").field("title");

    insta::assert_snapshot!(GraphQLQueryRequest::new(&query, Some(&projection)).serialize(), @r###"
    query($representations: [_Any!]!) {
      _entities(representations: $representations) {
        __typename
        ... on Movie {
          __typename
          title
        }
      }
    }
    "###);
}
