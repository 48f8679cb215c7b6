//! The `DgsConstants` class: type and field names as string constants.

use super::Context;
use crate::java::{string_literal, JavaWriter};
use crate::output::{FileKind, GeneratedFile};
use dgsgen_core::Result;
use dgsgen_naming::{field_names, shouty_snake, Scope};
use dgsgen_schema::{TypeKind, TypeNode};

pub const CLASS_NAME: &str = "DgsConstants";
const TYPE_NAME: &str = "TYPE_NAME";

/// Emits `DgsConstants` into the base package.
pub fn emit(ctx: &Context<'_>) -> Result<Vec<GeneratedFile>> {
    let package = &ctx.config.package_name;
    let mut w = JavaWriter::new(package.clone(), CLASS_NAME);
    ctx.generated_annotation(&mut w);
    w.open(&format!("public class {CLASS_NAME}"));

    for (operation, root) in ctx.graph().roots().iter() {
        let name = &ctx.graph().get(root).name;
        w.line(&format!(
            "public static final String {}_TYPE = {};",
            operation.as_str().to_uppercase(),
            string_literal(name)
        ));
        w.blank();
    }

    let mut classes = Scope::new();
    for node in ctx.graph().types() {
        let listed = matches!(
            node.kind,
            TypeKind::Object | TypeKind::Input | TypeKind::Interface | TypeKind::Union
        );
        if !listed || !ctx.generates_class(node) {
            continue;
        }
        let class = constant_class(ctx, &node.name);
        classes.define(&class, &node.name)?;
        type_class(ctx, &mut w, node, &class)?;
    }

    w.close();
    Ok(vec![ctx.file(FileKind::Constants, package, CLASS_NAME, w)])
}

fn constant_class(ctx: &Context<'_>, type_name: &str) -> String {
    if ctx.config.snake_case_constant_names {
        shouty_snake(type_name)
    } else {
        type_name.to_uppercase()
    }
}

fn type_class(ctx: &Context<'_>, w: &mut JavaWriter, node: &TypeNode, class: &str) -> Result<()> {
    w.open(&format!("public static class {class}"));
    w.line(&format!(
        "public static final String {TYPE_NAME} = {};",
        string_literal(&node.name)
    ));
    w.blank();

    let fields = match node.kind {
        TypeKind::Input => ctx.own_fields(node.id),
        _ => ctx.selectable_fields(node.id),
    };
    let mut constants = Scope::new();
    constants.define(TYPE_NAME, &node.name)?;
    for field in &fields {
        constants.define(&field.names.constant, &format!("{}.{}", node.name, field.node.name))?;
        w.line(&format!(
            "public static final String {} = {};",
            field.names.constant,
            string_literal(&field.node.name)
        ));
        w.blank();
    }

    let mut argument_classes = Scope::new();
    for field in &fields {
        if field.node.arguments.is_empty() {
            continue;
        }
        let arguments_class = format!("{}_INPUT_ARGUMENT", field.names.constant);
        argument_classes.define(
            &arguments_class,
            &format!("{}.{}", node.name, field.node.name),
        )?;
        w.open(&format!("public static class {arguments_class}"));
        for argument in &field.node.arguments {
            w.line(&format!(
                "public static final String {} = {};",
                field_names(&argument.name).constant,
                string_literal(&argument.name)
            ));
            w.blank();
        }
        w.close();
        w.blank();
    }

    w.close();
    w.blank();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodeGenConfig;
    use crate::emit::test_support::{names, schema};
    use dgsgen_core::CodegenError;

    #[test]
    fn test_constants() {
        let schema = schema(
            "type Query { people(filter: String, first_n: Int): [Person] }\n\
             type Person { firstname: String }\n\
             enum Color { RED }",
        );
        let names = names(&schema);
        let config = CodeGenConfig::new("com.example");
        let ctx = Context::new(&schema, &names, &config);
        let files = emit(&ctx).unwrap();
        assert_eq!(files[0].path, "com/example/DgsConstants.java");
        insta::assert_snapshot!(files[0].source, @r#"
        package com.example;

        public class DgsConstants {
          public static final String QUERY_TYPE = "Query";

          public static class QUERY {
            public static final String TYPE_NAME = "Query";

            public static final String People = "people";

            public static class People_INPUT_ARGUMENT {
              public static final String Filter = "filter";

              public static final String FirstN = "first_n";
            }
          }

          public static class PERSON {
            public static final String TYPE_NAME = "Person";

            public static final String Firstname = "firstname";
          }
        }
        "#);
    }

    #[test]
    fn test_snake_case_class_names() {
        let schema = schema("type PersonInfo { a: Int }");
        let names = names(&schema);
        let mut config = CodeGenConfig::new("com.example");
        config.snake_case_constant_names = true;
        let ctx = Context::new(&schema, &names, &config);
        let files = emit(&ctx).unwrap();
        assert!(files[0].source.contains("public static class PERSON_INFO {"));
    }

    #[test]
    fn test_field_constants_never_shadow_type_name() {
        let schema = schema("type Thing { TYPE_NAME: String TYPENAME: Boolean }");
        let names = names(&schema);
        let mut config = CodeGenConfig::new("com.example");
        config.snake_case_constant_names = true;
        let ctx = Context::new(&schema, &names, &config);
        let files = emit(&ctx).unwrap();
        let source = &files[0].source;
        assert_eq!(source.matches("public static final String TYPE_NAME = ").count(), 1);
        assert!(source.contains("public static final String TypeName = \"TYPE_NAME\";"));
        assert!(source.contains("public static final String Typename = \"TYPENAME\";"));
    }

    #[test]
    fn test_class_name_collision() {
        let schema = schema("type Person { a: Int }\ntype PERSON { b: Int }");
        let names = names(&schema);
        let config = CodeGenConfig::new("com.example");
        let ctx = Context::new(&schema, &names, &config);
        match emit(&ctx) {
            Err(CodegenError::NameCollision { identifier, first, second }) => {
                assert_eq!(identifier, "PERSON");
                assert_eq!(first, "Person");
                assert_eq!(second, "PERSON");
            }
            other => panic!("expected a collision, got {other:?}"),
        }
    }
}
