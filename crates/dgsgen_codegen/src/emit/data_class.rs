//! Value classes for object and input types.

use super::{doc, Context, FieldView};
use crate::defaults;
use crate::java::JavaWriter;
use crate::output::{FileKind, GeneratedFile};
use dgsgen_schema::{TypeKind, TypeNode};

/// A field prepared for rendering.
struct Member<'a> {
    view: FieldView<'a>,
    ty: String,
    primitive: bool,
    default: Option<String>,
    overrides: bool,
    overrides_setter: bool,
}

/// Emits one class per object and input type.
pub fn emit(ctx: &Context<'_>) -> Vec<GeneratedFile> {
    emit_matching(ctx, |_| true)
}

/// Emits classes for the object and input types `wanted` accepts.
pub fn emit_matching(ctx: &Context<'_>, wanted: impl Fn(&TypeNode) -> bool) -> Vec<GeneratedFile> {
    ctx.graph()
        .types()
        .filter(|node| matches!(node.kind, TypeKind::Object | TypeKind::Input))
        .filter(|node| ctx.generates_class(node) && !ctx.is_root(node.id) && wanted(node))
        .map(|node| class(ctx, node))
        .collect()
}

fn class(ctx: &Context<'_>, node: &TypeNode) -> GeneratedFile {
    let class = ctx.class_name(node.id);
    let mut w = JavaWriter::new(ctx.types_package.clone(), class);
    let members = members(ctx, node, &mut w);

    let implements: Vec<_> = node
        .interfaces
        .iter()
        .chain(ctx.polymorphism().unions_of(node.id))
        .filter(|id| ctx.has_java_type(**id))
        .map(|id| ctx.class_name(*id))
        .collect();

    doc(&mut w, node.description.as_deref(), None);
    ctx.generated_annotation(&mut w);
    if implements.is_empty() {
        w.open(&format!("public class {class}"));
    } else {
        w.open(&format!("public class {class} implements {}", implements.join(", ")));
    }

    for member in &members {
        field_declaration(&mut w, member);
    }
    w.blank();

    w.open(&format!("public {class}()"));
    w.close();
    w.blank();

    if ctx.config.generate_all_constructor && !members.is_empty() {
        let params: Vec<_> = members
            .iter()
            .map(|m| format!("{} {}", m.ty, m.view.names.identifier))
            .collect();
        w.open(&format!("public {class}({})", params.join(", ")));
        for member in &members {
            let ident = &member.view.names.identifier;
            w.line(&format!("this.{ident} = {ident};"));
        }
        w.close();
        w.blank();
    }

    for member in &members {
        accessors(ctx, &mut w, member);
    }

    to_string(&mut w, class, &members);
    if !members.is_empty() {
        equals_and_hash_code(&mut w, class, &members);
    }

    w.open("public static Builder newBuilder()");
    w.line("return new Builder();");
    w.close();
    w.blank();
    builder(&mut w, class, &members);

    w.close();
    ctx.file(FileKind::DataType, &ctx.types_package, class, w)
}

fn members<'a>(ctx: &Context<'a>, node: &TypeNode, w: &mut JavaWriter) -> Vec<Member<'a>> {
    let views = if node.kind == TypeKind::Input {
        ctx.own_fields(node.id)
    } else {
        ctx.effective_fields(node.id)
    };
    views
        .into_iter()
        .map(|view| {
            let declaring: Vec<_> = view
                .interfaces
                .iter()
                .copied()
                .filter(|id| ctx.has_java_type(*id))
                .collect();
            // An implementation may not narrow a boxed interface getter to a primitive.
            let boxed = declaring.iter().any(|id| {
                ctx.graph()
                    .get(*id)
                    .field(&view.node.name)
                    .is_some_and(|field| field.ty.is_nullable())
            });
            let mut java = ctx.java_type(&view.node.ty, false);
            if boxed {
                java = java.boxed();
            }
            // Only interfaces that declare a setter with this exact parameter type are overridden.
            let overrides_setter = ctx.config.generate_interface_setters
                && declaring.iter().any(|id| {
                    ctx.graph()
                        .get(*id)
                        .field(&view.node.name)
                        .is_some_and(|field| {
                            !ctx.is_polymorphic(&field.ty) && ctx.java_type(&field.ty, true) == java
                        })
                });
            let default = view
                .node
                .default_value
                .as_ref()
                .map(|value| defaults::translate(ctx, value, &view.node.ty, w.imports()));
            Member {
                ty: w.ty(&java),
                primitive: java.is_primitive(),
                default,
                overrides: !declaring.is_empty(),
                overrides_setter,
                view,
            }
        })
        .collect()
}

fn field_declaration(w: &mut JavaWriter, member: &Member<'_>) {
    let ident = &member.view.names.identifier;
    match &member.default {
        Some(default) => w.line(&format!("private {} {ident} = {default};", member.ty)),
        None => w.line(&format!("private {} {ident};", member.ty)),
    }
    w.blank();
}

fn accessors(ctx: &Context<'_>, w: &mut JavaWriter, member: &Member<'_>) {
    let node = member.view.node;
    let names = member.view.names;
    doc(w, node.description.as_deref(), node.deprecation.as_deref());
    if node.deprecation.is_some() && ctx.config.add_deprecated_annotation {
        w.line("@Deprecated");
    }
    if member.overrides {
        w.line("@Override");
    }
    w.open(&format!("public {} {}()", member.ty, names.getter));
    w.line(&format!("return {};", names.identifier));
    w.close();
    w.blank();

    if member.overrides_setter {
        w.line("@Override");
    }
    w.open(&format!("public void {}({} {})", names.setter, member.ty, names.identifier));
    w.line(&format!("this.{0} = {0};", names.identifier));
    w.close();
    w.blank();
}

fn to_string(w: &mut JavaWriter, class: &str, members: &[Member<'_>]) {
    let body = if members.is_empty() {
        format!("\"{class}{{}}\"")
    } else {
        let parts: Vec<_> = members
            .iter()
            .map(|m| format!("{0}='\" + {0} + \"'", m.view.names.identifier))
            .collect();
        format!("\"{class}{{{}}}\"", parts.join(", "))
    };
    w.line("@Override");
    w.open("public String toString()");
    w.line(&format!("return {body};"));
    w.close();
    w.blank();
}

fn equals_and_hash_code(w: &mut JavaWriter, class: &str, members: &[Member<'_>]) {
    let objects = w.class("java.util.Objects");
    w.line("@Override");
    w.open("public boolean equals(Object o)");
    w.line("if (this == o) return true;");
    w.line("if (o == null || getClass() != o.getClass()) return false;");
    w.line(&format!("{class} that = ({class}) o;"));
    let checks: Vec<_> = members
        .iter()
        .map(|m| {
            let ident = &m.view.names.identifier;
            if m.primitive {
                format!("this.{ident} == that.{ident}")
            } else {
                format!("{objects}.equals(this.{ident}, that.{ident})")
            }
        })
        .collect();
    w.line(&format!("return {};", checks.join(" &&\n        ")));
    w.close();
    w.blank();

    let idents: Vec<_> = members.iter().map(|m| m.view.names.identifier.as_str()).collect();
    w.line("@Override");
    w.open("public int hashCode()");
    w.line(&format!("return {objects}.hash({});", idents.join(", ")));
    w.close();
    w.blank();
}

fn builder(w: &mut JavaWriter, class: &str, members: &[Member<'_>]) {
    w.open("public static class Builder");
    for member in members {
        field_declaration(w, member);
    }
    w.blank();

    w.open(&format!("public {class} build()"));
    w.line(&format!("{class} result = new {class}();"));
    for member in members {
        let ident = &member.view.names.identifier;
        w.line(&format!("result.{ident} = this.{ident};"));
    }
    w.line("return result;");
    w.close();
    w.blank();

    for member in members {
        let ident = &member.view.names.identifier;
        doc(w, member.view.node.description.as_deref(), None);
        w.open(&format!("public Builder {ident}({} {ident})", member.ty));
        w.line(&format!("this.{ident} = {ident};"));
        w.line("return this;");
        w.close();
        w.blank();
    }
    w.close();
}
