//! Emitters and the read-only context they share.
//!
//! Every emitter is a pure function of [`Context`] that returns its files.

pub mod constants;
pub mod data_class;
pub mod datafetcher;
pub mod enums;
pub mod interfaces;
pub mod projection;
pub mod query;
pub mod representation;

use crate::config::CodeGenConfig;
use crate::java::{source_path, JavaType, JavaWriter, Primitive};
use crate::output::{FileKind, GeneratedFile};
use dgsgen_naming::{FieldNames, NameTable};
use dgsgen_schema::{
    EffectiveField, FieldNode, KeyField, Polymorphism, Schema, TypeGraph, TypeId, TypeKind, TypeNode,
    TypeRef,
};
use dgsgen_syntax::OperationType;
use rustc_hash::FxHashSet;

/// Well-known custom scalars that map to a JDK type when the caller gives no mapping.
const COMMON_SCALARS: &[(&str, &str)] = &[
    ("LocalTime", "java.time.LocalTime"),
    ("LocalDate", "java.time.LocalDate"),
    ("LocalDateTime", "java.time.LocalDateTime"),
    ("TimeZone", "java.lang.String"),
    ("Date", "java.time.LocalDate"),
    ("DateTime", "java.time.OffsetDateTime"),
    ("Currency", "java.util.Currency"),
    ("Instant", "java.time.Instant"),
    ("Upload", "org.springframework.web.multipart.MultipartFile"),
];

const GENERATED_ANNOTATION: &str = "javax.annotation.processing.Generated";

/// Read-only state shared by all emitters.
pub struct Context<'a> {
    pub schema: &'a Schema,
    pub names: &'a NameTable,
    pub config: &'a CodeGenConfig,
    pub types_package: String,
    pub client_package: String,
    pub datafetchers_package: String,
}

/// A field as an emitter sees it: the winning declaration and its names.
pub struct FieldView<'a> {
    pub owner: TypeId,
    pub index: usize,
    pub node: &'a FieldNode,
    pub names: &'a FieldNames,
    /// Interfaces that also declare the field.
    pub interfaces: &'a [TypeId],
}

impl<'a> Context<'a> {
    pub fn new(schema: &'a Schema, names: &'a NameTable, config: &'a CodeGenConfig) -> Self {
        Self {
            schema,
            names,
            config,
            types_package: config.package_name_types(),
            client_package: config.package_name_client(),
            datafetchers_package: config.package_name_datafetchers(),
        }
    }

    #[must_use]
    pub fn graph(&self) -> &'a TypeGraph {
        &self.schema.graph
    }

    #[must_use]
    pub fn polymorphism(&self) -> &'a Polymorphism {
        &self.schema.polymorphism
    }

    /// The generated class name of a type.
    #[must_use]
    pub fn class_name(&self, id: TypeId) -> &'a str {
        self.names.class(&self.schema.graph, id)
    }

    /// Whether the type or its configuration excludes it from generation.
    #[must_use]
    pub fn is_skipped(&self, node: &TypeNode) -> bool {
        node.skip || self.config.skips_type(&node.name)
    }

    /// Whether a class is generated for the type.
    #[must_use]
    pub fn generates_class(&self, node: &TypeNode) -> bool {
        !node.builtin && node.kind != TypeKind::Scalar && !node.is_mapped() && !self.is_skipped(node)
    }

    /// Whether a Java type exists for the type, generated or mapped.
    #[must_use]
    pub fn has_java_type(&self, id: TypeId) -> bool {
        let node = self.graph().get(id);
        node.is_mapped() || self.generates_class(node)
    }

    #[must_use]
    pub fn is_root(&self, id: TypeId) -> bool {
        self.graph().roots().operation_of(id).is_some()
    }

    fn field_skipped(&self, owner: &TypeNode, field: &FieldNode) -> bool {
        field.skip || self.config.skips_field(&owner.name, &field.name)
    }

    fn view(&self, owner: TypeId, index: usize, interfaces: &'a [TypeId]) -> Option<FieldView<'a>> {
        let owner_node = self.graph().get(owner);
        let node = &owner_node.fields[index];
        if self.field_skipped(owner_node, node) {
            return None;
        }
        Some(FieldView {
            owner,
            index,
            node,
            names: self.names.field(owner, index)?,
            interfaces,
        })
    }

    /// Declared fields of a type, without skipped ones.
    #[must_use]
    pub fn own_fields(&self, id: TypeId) -> Vec<FieldView<'a>> {
        (0..self.graph().get(id).fields.len())
            .filter_map(|index| self.view(id, index, &[]))
            .collect()
    }

    /// Effective fields of an object or interface, without skipped ones.
    ///
    /// A field is skipped when it is skipped on the type itself or on the
    /// declaration that wins.
    #[must_use]
    pub fn effective_fields(&self, id: TypeId) -> Vec<FieldView<'a>> {
        let node = self.graph().get(id);
        self.polymorphism()
            .effective_fields(id)
            .iter()
            .filter_map(|EffectiveField { owner, index, interfaces }| {
                let view = self.view(*owner, *index, interfaces)?;
                (!self.config.skips_field(&node.name, &view.node.name)).then_some(view)
            })
            .collect()
    }

    /// Fields selectable on a composite type.
    #[must_use]
    pub fn selectable_fields(&self, id: TypeId) -> Vec<FieldView<'a>> {
        match self.graph().get(id).kind {
            TypeKind::Object | TypeKind::Interface => self.effective_fields(id),
            _ => Vec::new(),
        }
    }

    /// The Java type for a named type, ignoring nullability.
    #[must_use]
    pub fn base_type(&self, id: TypeId) -> JavaType {
        let node = self.graph().get(id);
        if let Some(mapped) = &node.mapped {
            return JavaType::parse_mapped(mapped);
        }
        match node.kind {
            TypeKind::Scalar if node.builtin => match node.name.as_str() {
                "Int" => JavaType::Primitive(Primitive::Int),
                "Float" => JavaType::Primitive(Primitive::Double),
                "Boolean" => JavaType::Primitive(Primitive::Boolean),
                _ => JavaType::string(),
            },
            TypeKind::Scalar => COMMON_SCALARS
                .iter()
                .find(|(name, _)| *name == node.name)
                .map_or_else(JavaType::object, |(_, java)| JavaType::parse_mapped(java)),
            _ => JavaType::class(self.types_package.clone(), self.class_name(id)),
        }
    }

    /// The Java type of a reference.
    ///
    /// With `wildcard`, lists of interfaces and unions become `List<? extends T>`.
    #[must_use]
    pub fn java_type(&self, ty: &TypeRef, wildcard: bool) -> JavaType {
        match ty {
            TypeRef::Named { base, nullable } => {
                let java = self.base_type(*base);
                if *nullable || self.config.generate_boxed_types {
                    java.boxed()
                } else {
                    java.unboxed()
                }
            }
            TypeRef::List { item, .. } => JavaType::List {
                item: Box::new(self.java_type(item, wildcard).boxed()),
                wildcard: wildcard && self.graph().get(*item.base()).kind.is_abstract(),
            },
        }
    }

    /// Whether the innermost type of a reference is an interface or union.
    #[must_use]
    pub fn is_polymorphic(&self, ty: &TypeRef) -> bool {
        self.graph().get(*ty.base()).kind.is_abstract()
    }

    /// Whether the innermost type of a reference needs a sub-selection.
    #[must_use]
    pub fn is_composite(&self, ty: &TypeRef) -> bool {
        self.graph().get(*ty.base()).kind.is_composite()
    }

    /// Root operation fields selected for client generation.
    #[must_use]
    pub fn operation_fields(&self, operation: OperationType) -> Vec<FieldView<'a>> {
        let Some(root) = self.graph().roots().get(operation) else {
            return Vec::new();
        };
        if self.is_skipped(self.graph().get(root)) {
            return Vec::new();
        }
        let include = match operation {
            OperationType::Query => &self.config.include_queries,
            OperationType::Mutation => &self.config.include_mutations,
            OperationType::Subscription => &self.config.include_subscriptions,
        };
        self.own_fields(root)
            .into_iter()
            .filter(|field| include.is_empty() || include.contains(&field.node.name))
            .collect()
    }

    /// Federated entities the client API covers, in declaration order.
    #[must_use]
    pub fn entity_types(&self) -> Vec<TypeId> {
        if self.config.skip_entity_queries {
            return Vec::new();
        }
        self.graph()
            .types()
            .filter(|node| node.is_entity() && !self.is_skipped(node))
            .map(|node| node.id)
            .collect()
    }

    /// Input and enum types the client API refers to.
    ///
    /// Starts from the arguments of the selected operation fields and of every
    /// field selectable below them, then follows input fields. Enums used in
    /// entity keys are included for the representation classes.
    #[must_use]
    pub fn client_input_types(&self) -> FxHashSet<TypeId> {
        let mut required = FxHashSet::default();
        let mut visited = FxHashSet::default();
        let mut pending = Vec::new();
        for operation in [OperationType::Query, OperationType::Mutation, OperationType::Subscription] {
            for field in self.operation_fields(operation) {
                self.require_arguments(field.node, &mut required);
                pending.push(*field.node.ty.base());
            }
        }
        for entity in self.entity_types() {
            self.require_key_enums(entity, &self.graph().get(entity).keys, &mut required);
            pending.push(entity);
        }
        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                continue;
            }
            if self.graph().get(id).kind.is_abstract() {
                pending.extend(self.polymorphism().possible_types(self.graph(), id));
            }
            for field in self.selectable_fields(id) {
                self.require_arguments(field.node, &mut required);
                if self.is_composite(&field.node.ty) {
                    pending.push(*field.node.ty.base());
                }
            }
        }
        required
    }

    fn require_key_enums(&self, owner: TypeId, keys: &[KeyField], required: &mut FxHashSet<TypeId>) {
        let node = self.graph().get(owner);
        for key in keys {
            let Some(field) = node.field(&key.name) else {
                continue;
            };
            let target = self.graph().get(*field.ty.base());
            match target.kind {
                TypeKind::Enum => {
                    required.insert(target.id);
                }
                TypeKind::Object | TypeKind::Interface => self.require_key_enums(target.id, &key.selection, required),
                _ => {}
            }
        }
    }

    fn require_arguments(&self, field: &FieldNode, required: &mut FxHashSet<TypeId>) {
        for argument in &field.arguments {
            self.require_input(&argument.ty, required);
        }
    }

    fn require_input(&self, ty: &TypeRef, required: &mut FxHashSet<TypeId>) {
        let node = self.graph().get(*ty.base());
        if !matches!(node.kind, TypeKind::Input | TypeKind::Enum) || !required.insert(node.id) {
            return;
        }
        for field in &node.fields {
            self.require_input(&field.ty, required);
        }
    }

    /// Writes the optional `@Generated` annotation.
    pub fn generated_annotation(&self, w: &mut JavaWriter) {
        if self.config.add_generated_annotation {
            let name = w.class(GENERATED_ANNOTATION);
            w.line(&format!("@{name}(\"dgsgen\")"));
        }
    }

    /// Wraps a finished writer into an output file.
    #[must_use]
    pub fn file(&self, kind: FileKind, package: &str, class: &str, w: JavaWriter) -> GeneratedFile {
        tracing::trace!(kind = kind.as_str(), class, "emitted");
        GeneratedFile {
            path: source_path(package, class),
            kind,
            class_name: class.to_string(),
            source: w.finish(),
        }
    }
}

/// Writes a Javadoc block for an optional description and deprecation.
pub(crate) fn doc(w: &mut JavaWriter, description: Option<&str>, deprecation: Option<&str>) {
    let mut text = description.map(str::to_string).unwrap_or_default();
    if let Some(reason) = deprecation {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str("@deprecated ");
        text.push_str(reason);
    }
    if !text.is_empty() {
        w.javadoc(&text);
    }
}
