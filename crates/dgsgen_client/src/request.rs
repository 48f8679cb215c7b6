//! Serialization of a request into GraphQL document text.

use crate::input::InputValue;
use crate::projection::ProjectionNode;
use crate::query::GraphQLQuery;
use dgsgen_syntax::OperationType;
use std::fmt::Write;

const INDENT: &str = "  ";

/// A query together with the selection to request.
#[derive(Debug, Clone, Copy)]
pub struct GraphQLQueryRequest<'a> {
    query: &'a GraphQLQuery,
    projection: Option<&'a ProjectionNode>,
}

impl<'a> GraphQLQueryRequest<'a> {
    pub fn new(query: &'a GraphQLQuery, projection: Option<&'a ProjectionNode>) -> Self {
        Self { query, projection }
    }

    /// Renders the operation.
    ///
    /// Output uses two-space indentation and has no trailing newline. An
    /// anonymous query without variables uses the shorthand `{ ... }` form.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut printer = Printer::default();
        printer.header(self.query);
        printer.indent += 1;
        printer.line_start();
        printer.out.push_str(self.query.query_name());
        printer.arguments(self.query.input().iter().map(|(name, value)| (name.as_str(), value)));
        if let Some(projection) = self.projection.filter(|p| !p.is_empty()) {
            printer.selection_set(projection);
        }
        printer.indent -= 1;
        printer.out.push('\n');
        printer.out.push('}');
        printer.out
    }
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn header(&mut self, query: &GraphQLQuery) {
        let variables = query.variable_definitions();
        let anonymous = query.operation_name().is_none() && variables.is_empty();
        if !(anonymous && query.operation() == OperationType::Query) {
            self.out.push_str(query.operation().as_str());
            if let Some(name) = query.operation_name() {
                self.out.push(' ');
                self.out.push_str(name);
            }
            if !variables.is_empty() {
                self.out.push('(');
                for (i, variable) in variables.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    let _ = write!(self.out, "${}: {}", variable.name, variable.ty);
                }
                self.out.push(')');
            }
            self.out.push(' ');
        }
        self.out.push('{');
    }

    fn line_start(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn arguments<'v>(&mut self, arguments: impl Iterator<Item = (&'v str, &'v InputValue)>) {
        let mut arguments = arguments.peekable();
        if arguments.peek().is_none() {
            return;
        }
        self.out.push('(');
        for (i, (name, value)) in arguments.enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            let _ = write!(self.out, "{name}: {value}");
        }
        self.out.push(')');
    }

    /// Writes ` { ... }` for a node, fields first and then fragments.
    fn selection_set(&mut self, node: &ProjectionNode) {
        self.out.push_str(" {");
        self.indent += 1;
        for (name, child) in node.fields() {
            self.line_start();
            self.out.push_str(name);
            self.arguments(
                node.input_arguments(name)
                    .iter()
                    .map(|(arg, value)| (arg.as_str(), value)),
            );
            if let Some(child) = child.filter(|c| !c.is_empty()) {
                self.selection_set(child);
            }
        }
        for fragment in node.fragments() {
            self.line_start();
            self.out.push_str("...");
            if let Some(ty) = fragment.schema_type() {
                self.out.push_str(" on ");
                self.out.push_str(ty);
            }
            self.selection_set(fragment);
        }
        self.indent -= 1;
        self.line_start();
        self.out.push('}');
    }
}
