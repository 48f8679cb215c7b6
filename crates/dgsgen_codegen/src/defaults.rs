//! Translation of resolved default values into Java expressions.

use crate::emit::Context;
use crate::java::{string_literal, Imports, JavaType, Primitive};
use dgsgen_schema::{ConstValue, DefaultValue, TypeRef};

const BIG_DECIMAL: &str = "java.math.BigDecimal";
const BIG_INTEGER: &str = "java.math.BigInteger";
const LOCALE: &str = "java.util.Locale";

/// Translates a default for a value of type `ty` into a Java expression.
pub fn translate(ctx: &Context<'_>, value: &DefaultValue, ty: &TypeRef, imports: &mut Imports) -> String {
    let target = ctx.java_type(ty, false);
    match value {
        DefaultValue::Null => "null".to_string(),
        DefaultValue::Boolean(b) => b.to_string(),
        DefaultValue::Int(text) => number(text, &target, imports),
        DefaultValue::Float(text) => number(text, &target, imports),
        DefaultValue::String(s) => string(s, &target, imports),
        DefaultValue::Enum { enum_type, value } => {
            let enum_node = ctx.graph().get(*enum_type);
            let constant = enum_node
                .enum_values
                .iter()
                .position(|v| v.name == *value)
                .and_then(|index| ctx.names.enum_value(*enum_type, index))
                .unwrap_or(value.as_str());
            let class = ctx.base_type(*enum_type).render(imports);
            format!("{class}.{constant}")
        }
        DefaultValue::List(items) => {
            let item_ty = ty.item().unwrap_or(ty);
            if items.is_empty() {
                format!("{}.emptyList()", imports.qualified("java.util.Collections"))
            } else {
                let items: Vec<_> = items
                    .iter()
                    .map(|item| translate(ctx, item, item_ty, imports))
                    .collect();
                format!("{}.asList({})", imports.qualified("java.util.Arrays"), items.join(", "))
            }
        }
        DefaultValue::Object { input_type, fields } => {
            let node = ctx.graph().get(*input_type);
            let mut out = format!("{}.newBuilder()", ctx.base_type(*input_type).render(imports));
            for (name, field_value) in fields {
                let Some(index) = node.fields.iter().position(|f| f.name == *name) else {
                    continue;
                };
                let field = &node.fields[index];
                let setter = ctx
                    .names
                    .field(*input_type, index)
                    .map_or(name.as_str(), |names| names.identifier.as_str());
                let value = translate(ctx, field_value, &field.ty, imports);
                out.push_str(&format!(".{setter}({value})"));
            }
            out.push_str(".build()");
            out
        }
        DefaultValue::Custom { value, .. } => custom(value, &target, imports),
    }
}

fn number(text: &str, target: &JavaType, imports: &mut Imports) -> String {
    if target.is_class(BIG_DECIMAL) || target.is_class(BIG_INTEGER) {
        let class = target.render(imports);
        return format!("new {class}({})", string_literal(text));
    }
    match target.primitive_kind() {
        Some(Primitive::Long) => format!("{text}L"),
        Some(Primitive::Double) if is_integral(text) => format!("{text}.0"),
        _ => text.to_string(),
    }
}

fn string(value: &str, target: &JavaType, imports: &mut Imports) -> String {
    if target.is_class(LOCALE) {
        let class = target.render(imports);
        return format!("{class}.forLanguageTag({})", string_literal(value));
    }
    if target.is_class(BIG_DECIMAL) || target.is_class(BIG_INTEGER) {
        let class = target.render(imports);
        return format!("new {class}({})", string_literal(value));
    }
    string_literal(value)
}

/// Literals for custom and mapped scalars, shaped by the Java type they map to.
fn custom(value: &ConstValue, target: &JavaType, imports: &mut Imports) -> String {
    match value {
        ConstValue::Null => "null".to_string(),
        ConstValue::Boolean(b) => b.to_string(),
        ConstValue::Int(text) | ConstValue::Float(text) => number(text, target, imports),
        ConstValue::String(s) => string(s, target, imports),
        ConstValue::Enum(name) => string_literal(name),
        ConstValue::List(items) => {
            if items.is_empty() {
                format!("{}.emptyList()", imports.qualified("java.util.Collections"))
            } else {
                let item_target = match target {
                    JavaType::List { item, .. } => item.as_ref().clone(),
                    other => other.clone(),
                };
                let items: Vec<_> = items
                    .iter()
                    .map(|item| custom(item, &item_target, imports))
                    .collect();
                format!("{}.asList({})", imports.qualified("java.util.Arrays"), items.join(", "))
            }
        }
        ConstValue::Object(entries) => {
            let map = imports.qualified("java.util.Map");
            let entries: Vec<_> = entries
                .iter()
                .map(|(key, entry)| {
                    format!("{}, {}", string_literal(key), custom(entry, &JavaType::object(), imports))
                })
                .collect();
            format!("{map}.of({})", entries.join(", "))
        }
    }
}

fn is_integral(text: &str) -> bool {
    !text.contains(['.', 'e', 'E'])
}
