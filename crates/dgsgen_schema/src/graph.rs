//! The linked type graph.
//!
//! Built in two passes over a merged [`SchemaDocument`]: the first registers
//! every type name, the second resolves references and default literals
//! against that registry.

use crate::federation::{self, KEY_DIRECTIVE};
use crate::loader::{find_directive, DirectiveUse, FieldDecl, InputValueDecl, SchemaDocument};
use crate::types::{ArgumentNode, EnumValueNode, FieldNode, TypeId, TypeKind, TypeNode, TypeRef};
use crate::value::{ConstValue, DefaultValue};
use dgsgen_core::{CodegenError, Result};
use dgsgen_syntax::OperationType;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

/// Schema type name → fully qualified target-language type.
pub type TypeMapping = IndexMap<String, String>;

/// Scalars every schema has without declaring them.
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Directive that excludes a type or field from generation.
pub const SKIP_DIRECTIVE: &str = "skipcodegen";

const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Root operation types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RootTypes {
    pub query: Option<TypeId>,
    pub mutation: Option<TypeId>,
    pub subscription: Option<TypeId>,
}

impl RootTypes {
    /// The root type for an operation.
    #[must_use]
    pub const fn get(&self, operation: OperationType) -> Option<TypeId> {
        match operation {
            OperationType::Query => self.query,
            OperationType::Mutation => self.mutation,
            OperationType::Subscription => self.subscription,
        }
    }

    /// The declared roots in query, mutation, subscription order.
    pub fn iter(&self) -> impl Iterator<Item = (OperationType, TypeId)> + '_ {
        [
            OperationType::Query,
            OperationType::Mutation,
            OperationType::Subscription,
        ]
        .into_iter()
        .filter_map(|op| self.get(op).map(|id| (op, id)))
    }

    /// Returns the operation a type is the root of.
    #[must_use]
    pub fn operation_of(&self, id: TypeId) -> Option<OperationType> {
        self.iter().find_map(|(op, root)| (root == id).then_some(op))
    }
}

/// The immutable graph of all types in a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeGraph {
    nodes: Vec<TypeNode>,
    by_name: FxHashMap<String, TypeId>,
    roots: RootTypes,
}

impl TypeGraph {
    /// Builds the graph for a merged document.
    ///
    /// Names in `mapping` that the document does not declare are registered as
    /// external scalars so fields may reference them.
    pub fn build(document: &SchemaDocument, mapping: &TypeMapping) -> Result<Self> {
        let mut graph = Self {
            nodes: Vec::with_capacity(document.types.len() + BUILTIN_SCALARS.len()),
            by_name: FxHashMap::default(),
            roots: RootTypes::default(),
        };

        // Pass 1: register names.
        for decl in document.types.values() {
            let builtin = BUILTIN_SCALARS.contains(&decl.name.as_str());
            if builtin && decl.kind != TypeKind::Scalar {
                return Err(CodegenError::merge(
                    &decl.name,
                    format!(
                        "built-in scalar cannot be redeclared as `{}`",
                        decl.kind.keyword()
                    ),
                ));
            }
            let id = graph.register(&decl.name, decl.kind, builtin);
            let node = &mut graph.nodes[id.index()];
            node.description.clone_from(&decl.description);
            node.skip = find_directive(&decl.directives, SKIP_DIRECTIVE).is_some();
        }
        for name in BUILTIN_SCALARS {
            if graph.lookup(name).is_none() {
                graph.register(name, TypeKind::Scalar, true);
            }
        }
        for (name, target) in mapping {
            let id = match graph.lookup(name) {
                Some(id) => id,
                None => graph.register(name, TypeKind::Scalar, false),
            };
            graph.nodes[id.index()].mapped = Some(target.clone());
        }

        // Pass 2: resolve references.
        for decl in document.types.values() {
            let id = graph.require(&decl.name, &decl.name)?;

            let mut fields = Vec::with_capacity(decl.fields.len());
            for field in &decl.fields {
                fields.push(graph.field_node(&decl.name, field)?);
            }

            let mut interfaces = Vec::with_capacity(decl.implements.len());
            for name in &decl.implements {
                let interface = graph.require(name, &decl.name)?;
                if graph.get(interface).kind != TypeKind::Interface {
                    return Err(CodegenError::merge(
                        &decl.name,
                        format!("`{name}` is not an interface and cannot be implemented"),
                    ));
                }
                interfaces.push(interface);
            }

            let mut members = Vec::with_capacity(decl.members.len());
            for name in &decl.members {
                let member = graph.require(name, &decl.name)?;
                if graph.get(member).kind != TypeKind::Object {
                    return Err(CodegenError::merge(
                        &decl.name,
                        format!("union member `{name}` is not an object type"),
                    ));
                }
                members.push(member);
            }

            let enum_values = decl
                .values
                .iter()
                .map(|value| EnumValueNode {
                    name: value.name.clone(),
                    description: value.description.clone(),
                    deprecation: deprecation(&value.directives),
                })
                .collect();

            let node = &mut graph.nodes[id.index()];
            node.fields = fields;
            node.interfaces = interfaces;
            node.members = members;
            node.enum_values = enum_values;
        }

        graph.roots = graph.resolve_roots(document)?;

        // Defaults need every input type's fields in place.
        for decl in document.types.values() {
            let id = graph.require(&decl.name, &decl.name)?;
            for (index, field) in decl.fields.iter().enumerate() {
                let path = format!("{}.{}", decl.name, field.name);
                let ty = graph.nodes[id.index()].fields[index].ty.clone();
                if let Some(value) = &field.default_value {
                    let resolved = graph.resolve_default(value, &ty, &path)?;
                    graph.nodes[id.index()].fields[index].default_value = Some(resolved);
                }
                for (arg_index, argument) in field.arguments.iter().enumerate() {
                    let Some(value) = &argument.default_value else {
                        continue;
                    };
                    let path = format!("{path}({})", argument.name);
                    let ty = graph.nodes[id.index()].fields[index].arguments[arg_index]
                        .ty
                        .clone();
                    let resolved = graph.resolve_default(value, &ty, &path)?;
                    graph.nodes[id.index()].fields[index].arguments[arg_index].default_value =
                        Some(resolved);
                }
            }
        }

        // Keys name fields of other types, so they resolve last.
        for decl in document.types.values() {
            if decl.kind != TypeKind::Object {
                continue;
            }
            let mut sources = Vec::new();
            for directive in decl.directives.iter().filter(|d| d.name == KEY_DIRECTIVE) {
                match directive.argument("fields") {
                    Some(ConstValue::String(fields)) => sources.push(fields.as_str()),
                    _ => {
                        return Err(CodegenError::merge(
                            &decl.name,
                            "`@key` needs a `fields` string argument",
                        ))
                    }
                }
            }
            if sources.is_empty() {
                continue;
            }
            let id = graph.require(&decl.name, &decl.name)?;
            let keys = federation::parse_key_fields(&decl.name, sources)?;
            federation::validate_keys(&graph, id, &keys)?;
            graph.nodes[id.index()].keys = keys;
        }

        Ok(graph)
    }

    fn register(&mut self, name: &str, kind: TypeKind, builtin: bool) -> TypeId {
        let id = TypeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(TypeNode {
            id,
            name: name.to_string(),
            kind,
            description: None,
            fields: Vec::new(),
            interfaces: Vec::new(),
            members: Vec::new(),
            enum_values: Vec::new(),
            mapped: None,
            builtin,
            skip: false,
            keys: Vec::new(),
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    fn require(&self, name: &str, path: &str) -> Result<TypeId> {
        self.lookup(name)
            .ok_or_else(|| CodegenError::unresolved(name, path))
    }

    fn resolve_ref(&self, ty: &TypeRef<String>, path: &str) -> Result<TypeRef> {
        ty.try_map(&mut |name: &String| self.require(name, path))
    }

    fn field_node(&self, owner: &str, field: &FieldDecl) -> Result<FieldNode> {
        let path = format!("{owner}.{}", field.name);
        let ty = self.resolve_ref(&field.ty, &path)?;
        let arguments = field
            .arguments
            .iter()
            .map(|argument| self.argument_node(&path, argument))
            .collect::<Result<_>>()?;
        Ok(FieldNode {
            name: field.name.clone(),
            ty,
            arguments,
            description: field.description.clone(),
            default_value: None,
            deprecation: deprecation(&field.directives),
            skip: find_directive(&field.directives, SKIP_DIRECTIVE).is_some(),
        })
    }

    fn argument_node(&self, field_path: &str, argument: &InputValueDecl) -> Result<ArgumentNode> {
        let path = format!("{field_path}({})", argument.name);
        Ok(ArgumentNode {
            name: argument.name.clone(),
            ty: self.resolve_ref(&argument.ty, &path)?,
            default_value: None,
            description: argument.description.clone(),
        })
    }

    fn resolve_roots(&self, document: &SchemaDocument) -> Result<RootTypes> {
        let mut roots = RootTypes::default();
        for operation in [
            OperationType::Query,
            OperationType::Mutation,
            OperationType::Subscription,
        ] {
            let id = match &document.schema {
                Some(schema) => match schema.operations.get(&operation) {
                    Some(name) => Some(self.require(name, &format!("schema.{}", operation.as_str()))?),
                    None => None,
                },
                None => self.lookup(operation.default_type_name()),
            };
            let Some(id) = id else { continue };
            let node = self.get(id);
            if node.kind != TypeKind::Object {
                if document.schema.is_none() {
                    continue;
                }
                return Err(CodegenError::merge(
                    &node.name,
                    format!("root `{}` type must be an object type", operation.as_str()),
                ));
            }
            match operation {
                OperationType::Query => roots.query = Some(id),
                OperationType::Mutation => roots.mutation = Some(id),
                OperationType::Subscription => roots.subscription = Some(id),
            }
        }
        Ok(roots)
    }

    /// Checks a default literal against its declared type.
    fn resolve_default(&self, value: &ConstValue, ty: &TypeRef, path: &str) -> Result<DefaultValue> {
        if let ConstValue::Null = value {
            return if ty.is_nullable() {
                Ok(DefaultValue::Null)
            } else {
                Err(CodegenError::invalid_default(
                    path,
                    format!("null is not allowed for non-null type `{}`", self.render_type(ty)),
                ))
            };
        }

        match ty {
            TypeRef::List { item, .. } => match value {
                ConstValue::List(items) => Ok(DefaultValue::List(
                    items
                        .iter()
                        .map(|item_value| self.resolve_default(item_value, item, path))
                        .collect::<Result<_>>()?,
                )),
                // A single value is coerced to a one-element list.
                other => Ok(DefaultValue::List(vec![self.resolve_default(other, item, path)?])),
            },
            TypeRef::Named { base, .. } => self.resolve_named_default(value, *base, path),
        }
    }

    fn resolve_named_default(&self, value: &ConstValue, id: TypeId, path: &str) -> Result<DefaultValue> {
        let node = self.get(id);
        let mismatch = || {
            CodegenError::invalid_default(
                path,
                format!("expected {}, found {}", node.name, value.shape()),
            )
        };

        if node.is_mapped() {
            return Ok(DefaultValue::Custom {
                scalar: id,
                value: value.clone(),
            });
        }

        match node.kind {
            TypeKind::Scalar => match (node.name.as_str(), value) {
                ("Int", ConstValue::Int(text)) => {
                    if text.parse::<i32>().is_err() {
                        return Err(CodegenError::invalid_default(
                            path,
                            format!("{text} does not fit in a 32-bit Int"),
                        ));
                    }
                    Ok(DefaultValue::Int(text.clone()))
                }
                ("Float", ConstValue::Int(text) | ConstValue::Float(text)) => {
                    Ok(DefaultValue::Float(text.clone()))
                }
                ("String", ConstValue::String(s)) | ("ID", ConstValue::String(s)) => {
                    Ok(DefaultValue::String(s.clone()))
                }
                ("ID", ConstValue::Int(text)) => Ok(DefaultValue::String(text.clone())),
                ("Boolean", ConstValue::Boolean(b)) => Ok(DefaultValue::Boolean(*b)),
                _ if node.builtin => Err(mismatch()),
                _ => Ok(DefaultValue::Custom {
                    scalar: id,
                    value: value.clone(),
                }),
            },
            TypeKind::Enum => match value {
                ConstValue::Enum(name) => {
                    if node.enum_values.iter().any(|v| &v.name == name) {
                        Ok(DefaultValue::Enum {
                            enum_type: id,
                            value: name.clone(),
                        })
                    } else {
                        Err(CodegenError::invalid_default(
                            path,
                            format!("enum `{}` has no value `{name}`", node.name),
                        ))
                    }
                }
                _ => Err(mismatch()),
            },
            TypeKind::Input => match value {
                ConstValue::Object(entries) => {
                    let mut seen = FxHashSet::default();
                    let mut fields = Vec::with_capacity(entries.len());
                    for (name, entry) in entries {
                        if !seen.insert(name.as_str()) {
                            return Err(CodegenError::invalid_default(
                                path,
                                format!("field `{name}` is given more than once"),
                            ));
                        }
                        let Some(field) = node.field(name) else {
                            return Err(CodegenError::invalid_default(
                                path,
                                format!("field `{name}` is not defined on input `{}`", node.name),
                            ));
                        };
                        fields.push((name.clone(), self.resolve_default(entry, &field.ty, path)?));
                    }
                    Ok(DefaultValue::Object {
                        input_type: id,
                        fields,
                    })
                }
                _ => Err(mismatch()),
            },
            TypeKind::Object | TypeKind::Interface | TypeKind::Union => {
                Err(CodegenError::invalid_default(
                    path,
                    format!("`{}` is not an input type", node.name),
                ))
            }
        }
    }

    /// Gets a node by id.
    #[must_use]
    pub fn get(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.index()]
    }

    /// Looks up a type id by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Looks up a node by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&TypeNode> {
        self.lookup(name).map(|id| self.get(id))
    }

    /// All nodes in registration order: declared types, then built-ins, then mapped-only names.
    pub fn types(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.iter()
    }

    /// Nodes of one kind in registration order.
    pub fn types_of_kind(&self, kind: TypeKind) -> impl Iterator<Item = &TypeNode> {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub const fn roots(&self) -> &RootTypes {
        &self.roots
    }

    /// Renders a reference in SDL syntax, e.g. `[Person!]!`.
    #[must_use]
    pub fn render_type(&self, ty: &TypeRef) -> String {
        ty.render(&|id: &TypeId| self.get(*id).name.clone())
    }
}

fn deprecation(directives: &[DirectiveUse]) -> Option<String> {
    find_directive(directives, "deprecated").map(|directive| match directive.argument("reason") {
        Some(ConstValue::String(reason)) => reason.clone(),
        _ => DEFAULT_DEPRECATION_REASON.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load, SdlSource};

    fn build(sdl: &str) -> Result<TypeGraph> {
        build_with(sdl, &TypeMapping::default())
    }

    fn build_with(sdl: &str, mapping: &TypeMapping) -> Result<TypeGraph> {
        let document = load(&[SdlSource::new("schema.graphqls", sdl)])?;
        TypeGraph::build(&document, mapping)
    }

    fn default_of<'g>(graph: &'g TypeGraph, ty: &str, field: &str) -> &'g DefaultValue {
        graph
            .by_name(ty)
            .and_then(|node| node.field(field))
            .and_then(|field| field.default_value.as_ref())
            .expect("default value")
    }

    #[test]
    fn test_entity_keys() {
        let graph = build(
            r#"type Movie @key(fields: "id") @key(fields: "info { year }") { id: ID! title: String info: Info }
               type Info { year: Int }
               extend type Review @key(fields: "id")
               type Review { id: ID! }
               type Plain { id: ID }"#,
        )
        .unwrap();
        let movie = graph.by_name("Movie").unwrap();
        assert!(movie.is_entity());
        let keys: Vec<_> = movie.keys.iter().map(|key| key.name.as_str()).collect();
        assert_eq!(keys, ["id", "info"]);
        assert_eq!(movie.keys[1].selection[0].name, "year");
        assert!(graph.by_name("Review").unwrap().is_entity());
        assert!(!graph.by_name("Plain").unwrap().is_entity());
    }

    #[test]
    fn test_invalid_entity_keys() {
        for sdl in [
            r#"type Movie @key(fields: "missing") { id: ID }"#,
            r#"type Movie @key(fields: "info") { info: Info } type Info { a: Int }"#,
            r#"type Movie @key(fields: "id { a }") { id: ID }"#,
            r#"type Movie @key(fields: "info { nope }") { info: Info } type Info { a: Int }"#,
            "type Movie @key { id: ID }",
        ] {
            assert!(
                matches!(build(sdl), Err(CodegenError::SchemaMerge { .. })),
                "{sdl}"
            );
        }
    }

    #[test]
    fn test_builtins_registered() {
        let graph = build("type Query { a: Int }").unwrap();
        for name in BUILTIN_SCALARS {
            assert!(graph.by_name(name).is_some_and(|n| n.builtin));
        }
        assert_eq!(graph.roots().query, graph.lookup("Query"));
    }

    #[test]
    fn test_unresolved_type_reports_path() {
        let err = build("type Query { people(filter: Filtr): [Person] }\ntype Person { a: Int }").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown type `Filtr` referenced by `Query.people(filter)`"
        );
    }

    #[test]
    fn test_mapped_name_is_resolvable() {
        let mut mapping = TypeMapping::default();
        mapping.insert("DateTime".to_string(), "java.time.OffsetDateTime".to_string());
        let graph = build_with("type Query { now: DateTime }", &mapping).unwrap();
        let node = graph.by_name("DateTime").unwrap();
        assert_eq!(node.kind, TypeKind::Scalar);
        assert_eq!(node.mapped.as_deref(), Some("java.time.OffsetDateTime"));
    }

    #[test]
    fn test_cyclic_reference() {
        let graph = build("type Person { friends: [Person] best: Person }").unwrap();
        let person = graph.by_name("Person").unwrap();
        assert_eq!(*person.fields[0].ty.base(), person.id);
        assert_eq!(graph.render_type(&person.fields[0].ty), "[Person]");
    }

    #[test]
    fn test_nested_object_default() {
        let graph = build(
            "input Page { size: Int = 10 offset: Int }\n\
             input Filter { page: Page = { offset: 3 } }",
        )
        .unwrap();
        let page = graph.lookup("Page").unwrap();
        assert_eq!(
            default_of(&graph, "Filter", "page"),
            &DefaultValue::Object {
                input_type: page,
                fields: vec![("offset".to_string(), DefaultValue::Int("3".to_string()))],
            }
        );
    }

    #[test]
    fn test_list_coercion() {
        let graph = build("input F { tags: [String] = \"one\" }").unwrap();
        assert_eq!(
            default_of(&graph, "F", "tags"),
            &DefaultValue::List(vec![DefaultValue::String("one".to_string())])
        );
    }

    #[test]
    fn test_enum_default() {
        let graph = build("enum Color { RED GREEN }\ninput F { color: Color = GREEN }").unwrap();
        assert!(matches!(
            default_of(&graph, "F", "color"),
            DefaultValue::Enum { value, .. } if value == "GREEN"
        ));

        let err = build("enum Color { RED }\ninput F { color: Color = BLUE }").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid default value for `F.color`: enum `Color` has no value `BLUE`"
        );
    }

    #[test]
    fn test_invalid_defaults() {
        let err = build("input F { n: Int = \"three\" }").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid default value for `F.n`: expected Int, found a string"
        );

        let err = build("input F { n: Int! = null }").unwrap_err();
        assert!(matches!(err, CodegenError::InvalidDefaultValue { .. }));

        let err = build("input P { a: Int }\ninput F { p: P = { b: 1 } }").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid default value for `F.p`: field `b` is not defined on input `P`"
        );

        let err = build("input F { n: Int = 3000000000 }").unwrap_err();
        assert!(matches!(err, CodegenError::InvalidDefaultValue { .. }));
    }

    #[test]
    fn test_argument_default() {
        let graph = build("type Query { people(limit: Int = 20, name: ID = 7): Int }").unwrap();
        let people = graph.by_name("Query").unwrap().field("people").unwrap();
        assert_eq!(
            people.arguments[0].default_value,
            Some(DefaultValue::Int("20".to_string()))
        );
        assert_eq!(
            people.arguments[1].default_value,
            Some(DefaultValue::String("7".to_string()))
        );
    }

    #[test]
    fn test_custom_scalar_default_kept() {
        let graph = build("scalar Decimal\ninput F { price: Decimal = 1.10 }").unwrap();
        assert!(matches!(
            default_of(&graph, "F", "price"),
            DefaultValue::Custom { value: ConstValue::Float(text), .. } if text == "1.10"
        ));
    }

    #[test]
    fn test_schema_definition_roots() {
        let graph = build("schema { query: Root }\ntype Root { a: Int }\ntype Query { b: Int }").unwrap();
        assert_eq!(graph.roots().query, graph.lookup("Root"));

        let err = build("schema { query: Missing }").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown type `Missing` referenced by `schema.query`"
        );
    }

    #[test]
    fn test_implements_non_interface() {
        let err = build("type A { a: Int }\ntype B implements A { a: Int }").unwrap_err();
        assert!(matches!(err, CodegenError::SchemaMerge { .. }));
    }

    #[test]
    fn test_skip_and_deprecation() {
        let graph = build(
            "type Hidden @skipcodegen { a: Int }\n\
             type Query { old: Int @deprecated other: Int @deprecated(reason: \"use x\") }",
        )
        .unwrap();
        assert!(graph.by_name("Hidden").unwrap().skip);
        let query = graph.by_name("Query").unwrap();
        assert_eq!(query.fields[0].deprecation.as_deref(), Some("No longer supported"));
        assert_eq!(query.fields[1].deprecation.as_deref(), Some("use x"));
    }
}
