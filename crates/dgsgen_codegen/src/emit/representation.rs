//! Representation classes for federated entities.
//!
//! An `_entities` query takes a list of representations: `__typename` plus
//! the key fields of an entity. Every `@key` type gets a
//! `<Type>Representation` in the client package, and a key field that
//! selects sub-fields gets a representation class of its own type.

use super::Context;
use crate::java::{string_literal, JavaType, JavaWriter};
use crate::output::{FileKind, GeneratedFile};
use dgsgen_naming::TYPENAME;
use dgsgen_schema::{KeyField, TypeId, TypeRef};
use indexmap::IndexMap;

struct Member {
    identifier: String,
    getter: String,
    setter: String,
    ty: String,
}

/// Emits one representation class per entity and per type nested in a key.
pub fn emit(ctx: &Context<'_>) -> Vec<GeneratedFile> {
    let mut keyed: IndexMap<TypeId, Vec<KeyField>> = IndexMap::new();
    for entity in ctx.entity_types() {
        collect(ctx, entity, &ctx.graph().get(entity).keys, &mut keyed);
    }
    keyed
        .iter()
        .map(|(id, keys)| representation(ctx, *id, keys))
        .collect()
}

#[must_use]
pub fn class_name(ctx: &Context<'_>, id: TypeId) -> String {
    format!("{}Representation", ctx.class_name(id))
}

/// Gathers key selections per type. A type reached through several keys merges them.
fn collect(ctx: &Context<'_>, owner: TypeId, keys: &[KeyField], into: &mut IndexMap<TypeId, Vec<KeyField>>) {
    merge(into.entry(owner).or_default(), keys);
    let node = ctx.graph().get(owner);
    for key in keys.iter().filter(|key| !key.selection.is_empty()) {
        if let Some(field) = node.field(&key.name) {
            collect(ctx, *field.ty.base(), &key.selection, into);
        }
    }
}

fn merge(into: &mut Vec<KeyField>, keys: &[KeyField]) {
    for key in keys {
        match into.iter_mut().find(|existing| existing.name == key.name) {
            Some(existing) => merge(&mut existing.selection, &key.selection),
            None => into.push(key.clone()),
        }
    }
}

/// The Java type of a key field whose named type is replaced by `class`.
fn nested_type(ty: &TypeRef, class: &JavaType) -> JavaType {
    match ty {
        TypeRef::Named { .. } => class.clone(),
        TypeRef::List { item, .. } => JavaType::List {
            item: Box::new(nested_type(item, class)),
            wildcard: false,
        },
    }
}

fn representation(ctx: &Context<'_>, id: TypeId, keys: &[KeyField]) -> GeneratedFile {
    let node = ctx.graph().get(id);
    let class = class_name(ctx, id);
    let mut w = JavaWriter::new(ctx.client_package.clone(), &class);

    let mut members = Vec::with_capacity(keys.len() + 1);
    for view in ctx.effective_fields(id) {
        let Some(key) = keys.iter().find(|key| key.name == view.node.name) else {
            continue;
        };
        let java = if key.selection.is_empty() {
            ctx.java_type(&view.node.ty, false)
        } else {
            let nested = JavaType::class(ctx.client_package.clone(), class_name(ctx, *view.node.ty.base()));
            nested_type(&view.node.ty, &nested)
        };
        members.push(Member {
            identifier: view.names.identifier.clone(),
            getter: view.names.getter.clone(),
            setter: view.names.setter.clone(),
            ty: w.ty(&java),
        });
    }
    let keys_only = members.len();
    members.push(Member {
        identifier: TYPENAME.to_string(),
        getter: format!("get{TYPENAME}"),
        setter: format!("set{TYPENAME}"),
        ty: w.ty(&JavaType::string()),
    });

    ctx.generated_annotation(&mut w);
    w.open(&format!("public class {class}"));
    for member in &members[..keys_only] {
        w.line(&format!("private {} {};", member.ty, member.identifier));
        w.blank();
    }
    w.line(&format!("private String {TYPENAME} = {};", string_literal(&node.name)));
    w.blank();

    w.open(&format!("public {class}()"));
    w.close();
    w.blank();

    if keys_only > 0 {
        let params: Vec<_> = members[..keys_only]
            .iter()
            .map(|m| format!("{} {}", m.ty, m.identifier))
            .collect();
        w.open(&format!("public {class}({})", params.join(", ")));
        for member in &members[..keys_only] {
            w.line(&format!("this.{0} = {0};", member.identifier));
        }
        w.close();
        w.blank();
    }

    for member in &members {
        w.open(&format!("public {} {}()", member.ty, member.getter));
        w.line(&format!("return {};", member.identifier));
        w.close();
        w.blank();
        w.open(&format!("public void {}({} {})", member.setter, member.ty, member.identifier));
        w.line(&format!("this.{0} = {0};", member.identifier));
        w.close();
        w.blank();
    }

    let parts: Vec<_> = members
        .iter()
        .map(|m| format!("{0}='\" + {0} + \"'", m.identifier))
        .collect();
    w.line("@Override");
    w.open("public String toString()");
    w.line(&format!("return \"{class}{{{}}}\";", parts.join(", ")));
    w.close();

    w.close();
    tracing::trace!(entity = %node.name, keys = keys_only, "representation");
    ctx.file(FileKind::Representation, &ctx.client_package, &class, w)
}
