//! Server-side handler stubs for query fields.

use super::Context;
use crate::java::{JavaType, JavaWriter, Primitive};
use crate::output::{FileKind, GeneratedFile};
use dgsgen_naming::upper_camel;
use dgsgen_syntax::OperationType;

const DGS_COMPONENT: &str = "com.netflix.graphql.dgs.DgsComponent";
const DGS_DATA: &str = "com.netflix.graphql.dgs.DgsData";
const ENVIRONMENT: &str = "graphql.schema.DataFetchingEnvironment";

/// Emits one `@DgsComponent` per selected query field.
pub fn emit(ctx: &Context<'_>) -> Vec<GeneratedFile> {
    let Some(root) = ctx.graph().roots().get(OperationType::Query) else {
        return Vec::new();
    };
    let parent = &ctx.graph().get(root).name;
    ctx.operation_fields(OperationType::Query)
        .into_iter()
        .map(|field| {
            let class = format!("{}Datafetcher", upper_camel(&field.node.name));
            let mut w = JavaWriter::new(ctx.datafetchers_package.clone(), &class);
            let component = w.class(DGS_COMPONENT);
            let data = w.class(DGS_DATA);
            let env = w.class(ENVIRONMENT);
            let java = ctx.java_type(&field.node.ty, false);
            let ty = w.ty(&java);

            ctx.generated_annotation(&mut w);
            w.line(&format!("@{component}"));
            w.open(&format!("public class {class}"));
            w.line(&format!(
                "@{data}(parentType = \"{parent}\", field = \"{}\")",
                field.node.name
            ));
            w.open(&format!(
                "public {ty} {}({env} dataFetchingEnvironment)",
                field.names.getter
            ));
            w.line(&format!("return {};", stub_value(&java)));
            w.close();
            w.close();
            ctx.file(FileKind::Datafetcher, &ctx.datafetchers_package, &class, w)
        })
        .collect()
}

/// A placeholder return value of the given type.
fn stub_value(java: &JavaType) -> &'static str {
    if java.is_class("java.lang.String") {
        return "\"\"";
    }
    match java.primitive_kind() {
        Some(Primitive::Boolean) => "false",
        Some(Primitive::Int) => "0",
        Some(Primitive::Long) => "0L",
        Some(Primitive::Double) => "0.0",
        None => "null",
    }
}
