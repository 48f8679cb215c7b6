//! Java `enum` declarations.

use super::{doc, Context};
use crate::java::JavaWriter;
use crate::output::{FileKind, GeneratedFile};
use dgsgen_schema::{TypeKind, TypeNode};

/// Emits one enum per generated enum type.
pub fn emit(ctx: &Context<'_>) -> Vec<GeneratedFile> {
    emit_matching(ctx, |_| true)
}

/// Emits enums for the types `wanted` accepts.
pub fn emit_matching(ctx: &Context<'_>, wanted: impl Fn(&TypeNode) -> bool) -> Vec<GeneratedFile> {
    ctx.graph()
        .types_of_kind(TypeKind::Enum)
        .filter(|node| ctx.generates_class(node) && wanted(node))
        .map(|node| {
            let class = ctx.class_name(node.id);
            let mut w = JavaWriter::new(ctx.types_package.clone(), class);
            doc(&mut w, node.description.as_deref(), None);
            ctx.generated_annotation(&mut w);
            w.open(&format!("public enum {class}"));
            let count = node.enum_values.len();
            for (index, value) in node.enum_values.iter().enumerate() {
                let constant = ctx.names.enum_value(node.id, index).unwrap_or(&value.name);
                doc(&mut w, value.description.as_deref(), value.deprecation.as_deref());
                if value.deprecation.is_some() && ctx.config.add_deprecated_annotation {
                    w.line("@Deprecated");
                }
                let separator = if index + 1 == count { ";" } else { "," };
                w.line(&format!("{constant}{separator}"));
            }
            w.close();
            ctx.file(FileKind::Enum, &ctx.types_package, class, w)
        })
        .collect()
}
