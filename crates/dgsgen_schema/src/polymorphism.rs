//! Interface implementations, union memberships and effective field tables.

use crate::graph::TypeGraph;
use crate::types::{FieldNode, TypeId, TypeKind, TypeRef};
use dgsgen_core::{CodegenError, Result};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

/// A field as seen on a concrete type, after inheritance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveField {
    /// The type whose declaration wins: the type itself, or the interface it is inherited from.
    pub owner: TypeId,
    /// Index into the owner's field list.
    pub index: usize,
    /// Interfaces that also declare a field of this name.
    pub interfaces: Vec<TypeId>,
}

impl EffectiveField {
    /// The winning field declaration.
    #[must_use]
    pub fn node<'g>(&self, graph: &'g TypeGraph) -> &'g FieldNode {
        &graph.get(self.owner).fields[self.index]
    }

    /// Whether the field is declared by an implemented interface.
    #[must_use]
    pub fn overrides(&self) -> bool {
        !self.interfaces.is_empty()
    }
}

/// The resolved polymorphism relations of a graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polymorphism {
    implementations: FxHashMap<TypeId, Vec<TypeId>>,
    interfaces: FxHashMap<TypeId, Vec<TypeId>>,
    unions: FxHashMap<TypeId, Vec<TypeId>>,
    effective: FxHashMap<TypeId, Vec<EffectiveField>>,
}

impl Polymorphism {
    /// Computes implementers, memberships and effective fields.
    pub fn resolve(graph: &TypeGraph) -> Result<Self> {
        let mut poly = Self::default();

        for node in graph.types() {
            if matches!(node.kind, TypeKind::Object | TypeKind::Interface) {
                let all = transitive_interfaces(graph, node.id);
                if node.kind == TypeKind::Object {
                    for interface in &all {
                        poly.implementations
                            .entry(*interface)
                            .or_default()
                            .push(node.id);
                    }
                }
                poly.interfaces.insert(node.id, all);
            }
        }

        for union in graph.types_of_kind(TypeKind::Union) {
            for member in &union.members {
                poly.unions.entry(*member).or_default().push(union.id);
            }
        }

        for node in graph.types() {
            if matches!(node.kind, TypeKind::Object | TypeKind::Interface) {
                let fields = poly.effective_fields_of(graph, node.id)?;
                poly.effective.insert(node.id, fields);
            }
        }

        Ok(poly)
    }

    /// Objects implementing an interface, directly or through another interface.
    #[must_use]
    pub fn implementations(&self, interface: TypeId) -> &[TypeId] {
        self.implementations
            .get(&interface)
            .map_or(&[], Vec::as_slice)
    }

    /// All interfaces a type implements, transitively, in declaration order.
    #[must_use]
    pub fn interfaces_of(&self, id: TypeId) -> &[TypeId] {
        self.interfaces.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Unions an object is a member of.
    #[must_use]
    pub fn unions_of(&self, object: TypeId) -> &[TypeId] {
        self.unions.get(&object).map_or(&[], Vec::as_slice)
    }

    /// The effective field table of an object or interface.
    #[must_use]
    pub fn effective_fields(&self, id: TypeId) -> &[EffectiveField] {
        self.effective.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Concrete object types a value of this type can have.
    #[must_use]
    pub fn possible_types(&self, graph: &TypeGraph, id: TypeId) -> Vec<TypeId> {
        let node = graph.get(id);
        match node.kind {
            TypeKind::Object => vec![id],
            TypeKind::Interface => self.implementations(id).to_vec(),
            TypeKind::Union => node.members.clone(),
            _ => Vec::new(),
        }
    }

    /// Whether `concrete` is an implementation or member of `abstract_type`.
    #[must_use]
    pub fn is_possible_type(&self, graph: &TypeGraph, abstract_type: TypeId, concrete: TypeId) -> bool {
        match graph.get(abstract_type).kind {
            TypeKind::Interface => self.interfaces_of(concrete).contains(&abstract_type),
            TypeKind::Union => graph.get(abstract_type).members.contains(&concrete),
            _ => false,
        }
    }

    /// Whether a field of type `sub` may stand in for a declaration of type `sup`.
    #[must_use]
    pub fn is_subtype(&self, graph: &TypeGraph, sub: &TypeRef, sup: &TypeRef) -> bool {
        if sub.is_nullable() && !sup.is_nullable() {
            return false;
        }
        match (sub, sup) {
            (TypeRef::List { item: a, .. }, TypeRef::List { item: b, .. }) => {
                self.is_subtype(graph, a, b)
            }
            (TypeRef::Named { base: a, .. }, TypeRef::Named { base: b, .. }) => {
                a == b || self.is_possible_type(graph, *b, *a)
            }
            _ => false,
        }
    }

    fn effective_fields_of(&self, graph: &TypeGraph, id: TypeId) -> Result<Vec<EffectiveField>> {
        let node = graph.get(id);
        let mut table: IndexMap<&str, EffectiveField> = node
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                (
                    field.name.as_str(),
                    EffectiveField {
                        owner: id,
                        index,
                        interfaces: Vec::new(),
                    },
                )
            })
            .collect();

        let mut declared: IndexMap<&str, Vec<(TypeId, usize)>> = IndexMap::new();
        for interface in self.interfaces_of(id) {
            for (index, field) in graph.get(*interface).fields.iter().enumerate() {
                declared
                    .entry(field.name.as_str())
                    .or_default()
                    .push((*interface, index));
            }
        }

        for (name, declarations) in declared {
            let ty_of = move |(owner, index): (TypeId, usize)| &graph.get(owner).fields[index].ty;
            let interfaces: Vec<TypeId> = declarations.iter().map(|(owner, _)| *owner).collect();

            if let Some(own) = table.get_mut(name) {
                let own_ty = &node.fields[own.index].ty;
                for &declaration in &declarations {
                    if !self.is_subtype(graph, own_ty, ty_of(declaration)) {
                        return Err(CodegenError::merge(
                            &node.name,
                            format!(
                                "field `{name}` of type `{}` is not compatible with `{}` declared by interface `{}`",
                                graph.render_type(own_ty),
                                graph.render_type(ty_of(declaration)),
                                graph.get(declaration.0).name,
                            ),
                        ));
                    }
                }
                own.interfaces = interfaces;
                continue;
            }

            // Inherited: the most specific declaration wins if there is one.
            let winner = declarations.iter().copied().find(|&candidate| {
                declarations
                    .iter()
                    .all(|&other| self.is_subtype(graph, ty_of(candidate), ty_of(other)))
            });
            let Some((owner, index)) = winner else {
                let first = declarations[0];
                let conflicting = declarations
                    .iter()
                    .copied()
                    .find(|&other| ty_of(other) != ty_of(first))
                    .unwrap_or(first);
                return Err(CodegenError::merge(
                    &node.name,
                    format!(
                        "field `{name}` is declared with conflicting types by interfaces `{}` and `{}`",
                        graph.get(first.0).name,
                        graph.get(conflicting.0).name,
                    ),
                ));
            };
            table.insert(
                name,
                EffectiveField {
                    owner,
                    index,
                    interfaces,
                },
            );
        }

        Ok(table.into_values().collect())
    }
}

/// Interfaces reachable through `implements`, in discovery order.
fn transitive_interfaces(graph: &TypeGraph, id: TypeId) -> Vec<TypeId> {
    let mut seen = FxHashSet::default();
    let mut order = Vec::new();
    let mut stack: Vec<TypeId> = graph.get(id).interfaces.iter().rev().copied().collect();

    while let Some(interface) = stack.pop() {
        if interface == id || !seen.insert(interface) {
            continue;
        }
        order.push(interface);
        stack.extend(graph.get(interface).interfaces.iter().rev().copied());
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::TypeMapping;
    use crate::loader::{load, SdlSource};

    fn resolve(sdl: &str) -> Result<(TypeGraph, Polymorphism)> {
        let document = load(&[SdlSource::new("schema.graphqls", sdl)])?;
        let graph = TypeGraph::build(&document, &TypeMapping::default())?;
        let poly = Polymorphism::resolve(&graph)?;
        Ok((graph, poly))
    }

    fn names(graph: &TypeGraph, ids: &[TypeId]) -> Vec<String> {
        ids.iter().map(|id| graph.get(*id).name.clone()).collect()
    }

    const PETS: &str = "interface Pet { name: String }\n\
                        type Dog implements Pet { name: String barks: Boolean }\n\
                        type Bird implements Pet { name: String flies: Boolean }\n\
                        union Animal = Dog | Bird";

    #[test]
    fn test_implementations() {
        let (graph, poly) = resolve(PETS).unwrap();
        let pet = graph.lookup("Pet").unwrap();
        assert_eq!(names(&graph, poly.implementations(pet)), ["Dog", "Bird"]);
        let dog = graph.lookup("Dog").unwrap();
        assert_eq!(names(&graph, poly.unions_of(dog)), ["Animal"]);
    }

    #[test]
    fn test_transitive_implementations() {
        let (graph, poly) = resolve(
            "interface Node { id: ID! }\n\
             interface Named implements Node { id: ID! name: String }\n\
             type User implements Named { id: ID! name: String }",
        )
        .unwrap();
        let node = graph.lookup("Node").unwrap();
        let user = graph.lookup("User").unwrap();
        assert_eq!(names(&graph, poly.implementations(node)), ["User"]);
        assert_eq!(names(&graph, poly.interfaces_of(user)), ["Named", "Node"]);
    }

    #[test]
    fn test_concrete_field_wins() {
        let (graph, poly) = resolve(
            "interface Pet { friend: Pet }\n\
             type Dog implements Pet { friend: Dog! }",
        )
        .unwrap();
        let dog = graph.lookup("Dog").unwrap();
        let fields = poly.effective_fields(dog);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].owner, dog);
        assert!(fields[0].overrides());
        assert_eq!(graph.render_type(&fields[0].node(&graph).ty), "Dog!");
    }

    #[test]
    fn test_incompatible_override() {
        let err = resolve(
            "interface Pet { name: String! }\n\
             type Dog implements Pet { name: String }",
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::SchemaMerge { ref type_name, .. } if type_name == "Dog"));
    }

    #[test]
    fn test_inherited_field() {
        let (graph, poly) = resolve(
            "interface Pet { name: String }\n\
             type Dog implements Pet { barks: Boolean }",
        )
        .unwrap();
        let dog = graph.lookup("Dog").unwrap();
        let pet = graph.lookup("Pet").unwrap();
        let fields = poly.effective_fields(dog);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].owner, pet);
        assert_eq!(fields[1].node(&graph).name, "name");
    }

    #[test]
    fn test_unrelated_interface_conflict() {
        let err = resolve(
            "interface A { value: String }\n\
             interface B { value: Int }\n\
             type C implements A & B { other: Int }",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot merge `C`: field `value` is declared with conflicting types by interfaces `A` and `B`"
        );
    }

    #[test]
    fn test_conflict_resolved_by_redeclaration() {
        let (graph, poly) = resolve(
            "interface Node { id: ID }\n\
             interface A { owner: Node }\n\
             interface B { owner: Node! }\n\
             type U implements Node { id: ID }\n\
             type C implements A & B { owner: U! }",
        )
        .unwrap();
        let c = graph.lookup("C").unwrap();
        let fields = poly.effective_fields(c);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].interfaces.len(), 2);
    }

    #[test]
    fn test_more_specific_inherited_declaration_wins() {
        let (graph, poly) = resolve(
            "interface A { value: String }\n\
             interface B implements A { value: String! }\n\
             type C implements B { other: Int }",
        )
        .unwrap();
        let c = graph.lookup("C").unwrap();
        let b = graph.lookup("B").unwrap();
        let value = &poly.effective_fields(c)[1];
        assert_eq!(value.owner, b);
    }

    #[test]
    fn test_union_subtype() {
        let (graph, poly) = resolve(PETS).unwrap();
        let animal = TypeRef::named(graph.lookup("Animal").unwrap());
        let dog = TypeRef::named(graph.lookup("Dog").unwrap()).non_null();
        assert!(poly.is_subtype(&graph, &dog, &animal));
        assert!(!poly.is_subtype(&graph, &animal, &dog));
    }
}
