//! Client request model for dgsgen-generated APIs.
//!
//! Generated query classes and projections build a [`GraphQLQuery`] and a
//! [`ProjectionNode`]; [`GraphQLQueryRequest`] renders them as a GraphQL
//! document.
//!
//! ```
//! use dgsgen_client::{GraphQLQuery, GraphQLQueryRequest, ProjectionNode};
//! use dgsgen_syntax::OperationType;
//!
//! let query = GraphQLQuery::builder(OperationType::Query, "people")
//!     .operation_name("TestQuery")
//!     .build();
//! let mut projection = ProjectionNode::new("Person");
//! projection.field("firstname").field("lastname");
//!
//! let text = GraphQLQueryRequest::new(&query, Some(&projection)).serialize();
//! assert_eq!(text, "query TestQuery {\n  people {\n    firstname\n    lastname\n  }\n}");
//! ```

pub mod input;
pub mod projection;
pub mod query;
pub mod request;

pub use input::InputValue;
pub use projection::{ProjectionNode, TYPENAME};
pub use query::{GraphQLQuery, QueryBuilder, VariableDefinition, ENTITIES_FIELD, REPRESENTATIONS};
pub use request::GraphQLQueryRequest;
