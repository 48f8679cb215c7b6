//! The memoized identifier table shared by every emitter.

use crate::casing::{capitalize, lower_camel, upper_camel};
use crate::reserved::{desanitize, sanitize};
use dgsgen_core::{CodegenError, Result};
use dgsgen_schema::{TypeGraph, TypeId, TypeKind, TypeNode};
use rustc_hash::FxHashMap;

/// Identifiers generated for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    /// The schema name, used on the wire.
    pub schema_name: String,
    /// Escaped lowerCamelCase identifier for Java fields, parameters and projection methods.
    pub identifier: String,
    pub getter: String,
    pub setter: String,
    /// Constant name in `DgsConstants`.
    pub constant: String,
}

/// One namespace of generated identifiers.
///
/// Remembers which schema entity claimed each identifier so a second claim
/// can report both.
#[derive(Debug, Default)]
pub struct Scope {
    names: FxHashMap<String, String>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `identifier` for `entity`.
    pub fn define(&mut self, identifier: &str, entity: &str) -> Result<()> {
        if let Some(first) = self.names.get(identifier) {
            if first != entity {
                return Err(CodegenError::collision(identifier, first.clone(), entity));
            }
            return Ok(());
        }
        self.names.insert(identifier.to_string(), entity.to_string());
        Ok(())
    }

    /// The entity that claimed `identifier`.
    pub fn lookup(&self, identifier: &str) -> Option<&str> {
        self.names.get(identifier).map(String::as_str)
    }
}

/// Generated identifiers for every type, field, argument and enum value.
///
/// Fully populated by [`NameTable::resolve`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTable {
    classes: FxHashMap<TypeId, String>,
    class_owners: FxHashMap<String, TypeId>,
    fields: FxHashMap<(TypeId, usize), FieldNames>,
    field_owners: FxHashMap<(TypeId, String), usize>,
    arguments: FxHashMap<(TypeId, usize, usize), String>,
    enum_values: FxHashMap<(TypeId, usize), String>,
}

/// Builds the table for a graph.
pub fn resolve(graph: &TypeGraph) -> Result<NameTable> {
    NameTable::resolve(graph)
}

impl NameTable {
    /// Assigns identifiers for the whole graph, failing on the first collision.
    pub fn resolve(graph: &TypeGraph) -> Result<Self> {
        let mut table = Self::default();
        let mut classes = Scope::new();

        for node in graph.types() {
            if node.builtin || node.kind == TypeKind::Scalar {
                continue;
            }
            let class = class_name(&node.name);
            // Mapped and skipped types produce no class, so they cannot collide.
            if !node.is_mapped() && !node.skip {
                classes.define(&class, &node.name)?;
                table.class_owners.insert(class.clone(), node.id);
            }
            table.classes.insert(node.id, class);

            table.resolve_fields(node)?;

            let mut values = Scope::new();
            for (index, value) in node.enum_values.iter().enumerate() {
                let identifier = sanitize(&value.name);
                values.define(&identifier, &format!("{}.{}", node.name, value.name))?;
                table.enum_values.insert((node.id, index), identifier);
            }
        }

        Ok(table)
    }

    fn resolve_fields(&mut self, node: &TypeNode) -> Result<()> {
        let mut identifiers = Scope::new();
        let mut accessors = Scope::new();

        for (index, field) in node.fields.iter().enumerate() {
            let entity = format!("{}.{}", node.name, field.name);
            let names = field_names(&field.name);
            identifiers.define(&names.identifier, &entity)?;
            accessors.define(&names.getter, &entity)?;

            let mut arguments = Scope::new();
            for (arg_index, argument) in field.arguments.iter().enumerate() {
                let identifier = sanitize(&lower_camel(&argument.name));
                arguments.define(&identifier, &format!("{entity}({})", argument.name))?;
                self.arguments.insert((node.id, index, arg_index), identifier);
            }

            self.field_owners
                .insert((node.id, names.identifier.clone()), index);
            self.fields.insert((node.id, index), names);
        }
        Ok(())
    }

    /// The generated class name of a type.
    ///
    /// Scalars have no class; their schema name is returned.
    #[must_use]
    pub fn class<'t>(&'t self, graph: &'t TypeGraph, id: TypeId) -> &'t str {
        self.classes
            .get(&id)
            .map_or(graph.get(id).name.as_str(), String::as_str)
    }

    /// Identifiers for a field, by owner and index.
    #[must_use]
    pub fn field(&self, owner: TypeId, index: usize) -> Option<&FieldNames> {
        self.fields.get(&(owner, index))
    }

    /// The escaped identifier of an argument.
    #[must_use]
    pub fn argument(&self, owner: TypeId, field: usize, argument: usize) -> Option<&str> {
        self.arguments
            .get(&(owner, field, argument))
            .map(String::as_str)
    }

    /// The Java constant of an enum value.
    #[must_use]
    pub fn enum_value(&self, owner: TypeId, index: usize) -> Option<&str> {
        self.enum_values.get(&(owner, index)).map(String::as_str)
    }

    /// The type that generates `class`.
    #[must_use]
    pub fn type_for_class(&self, class: &str) -> Option<TypeId> {
        self.class_owners.get(class).copied()
    }

    /// The schema name of the field that generated `identifier` on `owner`.
    #[must_use]
    pub fn schema_field_name<'t>(&'t self, owner: TypeId, identifier: &str) -> Option<&'t str> {
        let index = self.field_owners.get(&(owner, identifier.to_string()))?;
        self.fields
            .get(&(owner, *index))
            .map(|names| names.schema_name.as_str())
    }
}

/// The class name for a type name.
#[must_use]
pub fn class_name(type_name: &str) -> String {
    sanitize(&upper_camel(type_name))
}

/// The escaped identifier for a field or argument name.
#[must_use]
pub fn identifier(name: &str) -> String {
    sanitize(&lower_camel(name))
}

/// Reverses [`identifier`] for names whose casing was already lowerCamelCase.
#[must_use]
pub fn unescape_identifier(identifier: &str) -> &str {
    desanitize(identifier)
}

/// All generated identifiers of a field name.
#[must_use]
pub fn field_names(name: &str) -> FieldNames {
    let camel = lower_camel(name);
    let accessor = capitalize(&camel);
    let mut getter = format!("get{accessor}");
    let mut setter = format!("set{accessor}");
    // `getClass` is final on `java.lang.Object`.
    if getter == "getClass" {
        getter.push_str("Field");
        setter.push_str("Field");
    }
    FieldNames {
        schema_name: name.to_string(),
        identifier: sanitize(&camel),
        getter,
        setter,
        constant: sanitize(&accessor),
    }
}
