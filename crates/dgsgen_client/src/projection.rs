//! Selection sets built by generated projection classes.

use crate::input::InputValue;
use indexmap::IndexMap;

/// The field every projection of an abstract type selects.
pub const TYPENAME: &str = "__typename";

/// A node of a selection set.
///
/// `fields` maps a field name to its sub-selection, `None` for leaves.
/// Fragments render as inline fragments after the fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionNode {
    schema_type: Option<String>,
    fields: IndexMap<String, Option<ProjectionNode>>,
    input_arguments: IndexMap<String, Vec<(String, InputValue)>>,
    fragments: Vec<ProjectionNode>,
}

impl ProjectionNode {
    /// Creates an empty selection on a type.
    pub fn new(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }

    /// Creates a selection on an interface or union, with `__typename` selected.
    pub fn polymorphic(schema_type: impl Into<String>) -> Self {
        let mut node = Self::new(schema_type);
        node.typename();
        node
    }

    #[must_use]
    pub fn schema_type(&self) -> Option<&str> {
        self.schema_type.as_deref()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&ProjectionNode>)> {
        self.fields
            .iter()
            .map(|(name, child)| (name.as_str(), child.as_ref()))
    }

    #[must_use]
    pub fn fragments(&self) -> &[ProjectionNode] {
        &self.fragments
    }

    /// Arguments recorded for a field, in the order they were given.
    #[must_use]
    pub fn input_arguments(&self, field: &str) -> &[(String, InputValue)] {
        self.input_arguments.get(field).map_or(&[], Vec::as_slice)
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.fragments.is_empty()
    }

    /// Selects a leaf field.
    pub fn field(&mut self, name: impl Into<String>) -> &mut Self {
        self.fields.entry(name.into()).or_insert(None);
        self
    }

    /// Selects a leaf field with arguments.
    pub fn field_with<N, V>(&mut self, name: &str, arguments: impl IntoIterator<Item = (N, V)>) -> &mut Self
    where
        N: Into<String>,
        V: Into<InputValue>,
    {
        self.set_arguments(name, arguments);
        self.field(name)
    }

    /// Selects a composite field and returns its sub-selection.
    pub fn child(&mut self, name: impl Into<String>, schema_type: impl Into<String>) -> &mut ProjectionNode {
        self.fields
            .entry(name.into())
            .or_insert(None)
            .get_or_insert_with(|| ProjectionNode::new(schema_type))
    }

    /// Selects a field typed as an interface or union; its sub-selection starts with `__typename`.
    pub fn child_polymorphic(
        &mut self,
        name: impl Into<String>,
        schema_type: impl Into<String>,
    ) -> &mut ProjectionNode {
        self.fields
            .entry(name.into())
            .or_insert(None)
            .get_or_insert_with(|| ProjectionNode::polymorphic(schema_type))
    }

    /// Selects a composite field with arguments and returns its sub-selection.
    pub fn child_with<N, V>(
        &mut self,
        name: &str,
        schema_type: impl Into<String>,
        arguments: impl IntoIterator<Item = (N, V)>,
    ) -> &mut ProjectionNode
    where
        N: Into<String>,
        V: Into<InputValue>,
    {
        self.set_arguments(name, arguments);
        self.child(name, schema_type)
    }

    /// Selects `__typename`.
    pub fn typename(&mut self) -> &mut Self {
        self.field(TYPENAME)
    }

    /// Adds an inline fragment on a concrete type and returns it.
    ///
    /// The fragment selects `__typename`, and so does this node if it did not yet.
    pub fn on(&mut self, concrete_type: impl Into<String>) -> &mut ProjectionNode {
        if !self.fields.contains_key(TYPENAME) {
            self.fields.shift_insert(0, TYPENAME.to_string(), None);
        }
        self.fragments.push(ProjectionNode::polymorphic(concrete_type));
        let last = self.fragments.len() - 1;
        &mut self.fragments[last]
    }

    fn set_arguments<N, V>(&mut self, field: &str, arguments: impl IntoIterator<Item = (N, V)>)
    where
        N: Into<String>,
        V: Into<InputValue>,
    {
        let arguments: Vec<_> = arguments
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        self.input_arguments.insert(field.to_string(), arguments);
    }
}
