//! Java interfaces for schema interfaces and unions.

use super::{doc, Context};
use crate::java::JavaWriter;
use crate::output::{FileKind, GeneratedFile};
use dgsgen_schema::{TypeKind, TypeNode};

/// Emits one Java interface per interface and union type.
pub fn emit(ctx: &Context<'_>) -> Vec<GeneratedFile> {
    ctx.graph()
        .types()
        .filter(|node| node.kind.is_abstract() && ctx.generates_class(node))
        .map(|node| match node.kind {
            TypeKind::Union => union(ctx, node),
            _ => interface(ctx, node),
        })
        .collect()
}

fn interface(ctx: &Context<'_>, node: &TypeNode) -> GeneratedFile {
    let class = ctx.class_name(node.id);
    let mut w = JavaWriter::new(ctx.types_package.clone(), class);
    let supers: Vec<_> = node
        .interfaces
        .iter()
        .filter(|id| ctx.has_java_type(**id))
        .map(|id| ctx.class_name(*id))
        .collect();

    doc(&mut w, node.description.as_deref(), None);
    ctx.generated_annotation(&mut w);
    if supers.is_empty() {
        w.open(&format!("public interface {class}"));
    } else {
        w.open(&format!("public interface {class} extends {}", supers.join(", ")));
    }
    for field in ctx.own_fields(node.id) {
        let ty = ctx.java_type(&field.node.ty, true);
        let ty = w.ty(&ty);
        doc(&mut w, field.node.description.as_deref(), field.node.deprecation.as_deref());
        w.line(&format!("{ty} {}();", field.names.getter));
        // Setter parameters cannot be narrowed by implementations.
        if ctx.config.generate_interface_setters && !ctx.is_polymorphic(&field.node.ty) {
            w.blank();
            w.line(&format!("void {}({ty} {});", field.names.setter, field.names.identifier));
        }
        w.blank();
    }
    w.close();
    ctx.file(FileKind::Interface, &ctx.types_package, class, w)
}

fn union(ctx: &Context<'_>, node: &TypeNode) -> GeneratedFile {
    let class = ctx.class_name(node.id);
    let mut w = JavaWriter::new(ctx.types_package.clone(), class);
    doc(&mut w, node.description.as_deref(), None);
    ctx.generated_annotation(&mut w);
    w.open(&format!("public interface {class}"));
    w.close();
    ctx.file(FileKind::Interface, &ctx.types_package, class, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodeGenConfig;
    use crate::emit::test_support::{names, schema};

    const SDL: &str = "interface Node { id: ID! }\n\
        interface Pet implements Node { id: ID! name: String friends: [Pet] }\n\
        type Dog implements Pet & Node { id: ID! name: String friends: [Pet] }\n\
        union Animal = Dog";

    #[test]
    fn test_interface_declaration() {
        let schema = schema(SDL);
        let names = names(&schema);
        let mut config = CodeGenConfig::new("com.example");
        config.generate_interface_setters = false;
        let ctx = Context::new(&schema, &names, &config);
        let files = emit(&ctx);
        assert_eq!(files.len(), 3);

        let pet = files.iter().find(|f| f.class_name == "Pet").unwrap();
        assert_eq!(
            pet.source,
            "package com.example.types;\n\
             \n\
             import java.util.List;\n\
             \n\
             public interface Pet extends Node {\n  \
             String getId();\n\
             \n  \
             String getName();\n\
             \n  \
             List<? extends Pet> getFriends();\n\
             }\n"
        );
        let animal = files.iter().find(|f| f.class_name == "Animal").unwrap();
        assert!(animal.source.ends_with("public interface Animal {\n}\n"));
    }

    #[test]
    fn test_interface_setters_skip_polymorphic_fields() {
        let schema = schema(SDL);
        let names = names(&schema);
        let config = CodeGenConfig::new("com.example");
        let ctx = Context::new(&schema, &names, &config);
        let files = emit(&ctx);
        let pet = files.iter().find(|f| f.class_name == "Pet").unwrap();
        assert!(pet.source.contains("void setName(String name);"));
        assert!(!pet.source.contains("setFriends"));
    }
}
