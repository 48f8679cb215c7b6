//! Operations built by generated request classes.

use crate::input::InputValue;
use dgsgen_syntax::OperationType;
use indexmap::IndexMap;

/// Root field resolving federated entities from their representations.
pub const ENTITIES_FIELD: &str = "_entities";
/// Variable carrying the representations of an `_entities` query.
pub const REPRESENTATIONS: &str = "representations";
const REPRESENTATIONS_TYPE: &str = "[_Any!]!";

/// A variable declared in the operation header, `$name: Type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: String,
    /// The type as written in GraphQL, for example `[String!]`.
    pub ty: String,
}

/// One root field request.
///
/// `query_name` is the root field; `operation_name` names the operation in
/// the header. Only arguments that were set are sent, so an explicit `null`
/// is distinguishable from an omitted argument.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQLQuery {
    operation: OperationType,
    query_name: String,
    operation_name: Option<String>,
    input: IndexMap<String, InputValue>,
    variable_definitions: Vec<VariableDefinition>,
}

impl GraphQLQuery {
    pub fn new(operation: OperationType, query_name: impl Into<String>) -> Self {
        Self {
            operation,
            query_name: query_name.into(),
            operation_name: None,
            input: IndexMap::new(),
            variable_definitions: Vec::new(),
        }
    }

    pub fn builder(operation: OperationType, query_name: impl Into<String>) -> QueryBuilder {
        QueryBuilder {
            query: Self::new(operation, query_name),
        }
    }

    /// Starts an `_entities` query. The representations travel as the
    /// `$representations` variable, declared as `[_Any!]!`.
    pub fn entities() -> QueryBuilder {
        Self::builder(OperationType::Query, ENTITIES_FIELD).reference(
            REPRESENTATIONS,
            REPRESENTATIONS,
            REPRESENTATIONS_TYPE,
        )
    }

    #[must_use]
    pub const fn operation(&self) -> OperationType {
        self.operation
    }

    #[must_use]
    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    #[must_use]
    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Arguments that were set, in the order they were set.
    #[must_use]
    pub fn input(&self) -> &IndexMap<String, InputValue> {
        &self.input
    }

    #[must_use]
    pub fn variable_definitions(&self) -> &[VariableDefinition] {
        &self.variable_definitions
    }
}

/// Builder mirroring the generated `Builder` classes.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query: GraphQLQuery,
}

impl QueryBuilder {
    /// Sets an argument. `InputValue::Null` is sent as an explicit `null`.
    #[must_use]
    pub fn argument(mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.query.input.insert(name.into(), value.into());
        self
    }

    /// Passes an argument as a reference to an operation variable.
    ///
    /// The variable is declared once in the header with the given type.
    #[must_use]
    pub fn reference(mut self, name: impl Into<String>, variable: &str, ty: impl Into<String>) -> Self {
        self.query
            .input
            .insert(name.into(), InputValue::variable(variable));
        if !self
            .query
            .variable_definitions
            .iter()
            .any(|definition| definition.name == variable)
        {
            self.query.variable_definitions.push(VariableDefinition {
                name: variable.to_string(),
                ty: ty.into(),
            });
        }
        self
    }

    #[must_use]
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.query.operation_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn build(self) -> GraphQLQuery {
        self.query
    }
}
