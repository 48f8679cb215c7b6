//! Request classes for root operation fields.

use super::{doc, Context, FieldView};
use crate::defaults;
use crate::java::{string_literal, JavaWriter};
use crate::output::{FileKind, GeneratedFile};
use dgsgen_core::Result;
use dgsgen_naming::{shouty_snake, upper_camel, Scope};
use dgsgen_schema::TypeRef;
use dgsgen_syntax::OperationType;
use rustc_hash::FxHashSet;

const GRAPHQL_QUERY: &str = "com.netflix.graphql.dgs.client.codegen.GraphQLQuery";
const VARIABLE_DEFINITION: &str = "graphql.language.VariableDefinition";
const VARIABLE_REFERENCE: &str = "graphql.language.VariableReference";

/// Builder members that arguments may not shadow.
const BUILDER_MEMBERS: [&str; 4] = ["fieldsSet", "variableReferences", "variableDefinitions", "queryName"];

/// Emits one request class per selected query, mutation and subscription field.
pub fn emit(ctx: &Context<'_>) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::new();
    let mut taken = FxHashSet::default();
    let mut classes = Scope::new();
    for operation in [OperationType::Query, OperationType::Mutation, OperationType::Subscription] {
        for field in ctx.operation_fields(operation) {
            let class = class_name(&field.node.name, operation, &mut taken);
            let root = &ctx.graph().get(field.owner).name;
            classes.define(&class, &format!("{root}.{}", field.node.name))?;
            files.push(request_class(ctx, operation, &field, &class)?);
        }
    }
    Ok(files)
}

/// `<Field>GraphQLQuery`, or the operation-specific suffix once that name is taken.
fn class_name(field: &str, operation: OperationType, taken: &mut FxHashSet<String>) -> String {
    let base = upper_camel(field);
    let query = format!("{base}GraphQLQuery");
    if operation != OperationType::Query && taken.contains(&query) {
        return match operation {
            OperationType::Mutation => format!("{base}GraphQLMutation"),
            _ => format!("{base}GraphQLSubscription"),
        };
    }
    taken.insert(query.clone());
    query
}

struct Argument {
    wire: String,
    ident: String,
    ty: String,
    variable_type: String,
    default: Option<String>,
}

fn request_class(
    ctx: &Context<'_>,
    operation: OperationType,
    field: &FieldView<'_>,
    class: &str,
) -> Result<GeneratedFile> {
    let mut w = JavaWriter::new(ctx.client_package.clone(), class);
    let base = w.class(GRAPHQL_QUERY);
    let definition = w.class(VARIABLE_DEFINITION);
    let reference = w.class(VARIABLE_REFERENCE);
    let set = w.class("java.util.Set");
    let map = w.class("java.util.Map");
    let list = w.class("java.util.List");

    let mut scope = Scope::new();
    for member in BUILDER_MEMBERS {
        scope.define(member, &format!("{class}.Builder"))?;
    }
    let mut arguments = Vec::with_capacity(field.node.arguments.len());
    for (index, argument) in field.node.arguments.iter().enumerate() {
        let ident = ctx
            .names
            .argument(field.owner, field.index, index)
            .unwrap_or(argument.name.as_str())
            .to_string();
        scope.define(
            &ident,
            &format!("{}.{}({})", ctx.graph().get(field.owner).name, field.node.name, argument.name),
        )?;
        let java = ctx.java_type(&argument.ty, false).boxed();
        let default = argument
            .default_value
            .as_ref()
            .map(|value| defaults::translate(ctx, value, &argument.ty, w.imports()));
        let variable_type = variable_type(ctx, &mut w, &argument.ty);
        arguments.push(Argument {
            wire: argument.name.clone(),
            ident,
            ty: w.ty(&java),
            variable_type,
            default,
        });
    }

    doc(&mut w, field.node.description.as_deref(), field.node.deprecation.as_deref());
    ctx.generated_annotation(&mut w);
    w.open(&format!("public class {class} extends {base}"));

    for argument in &arguments {
        if let Some(default) = &argument.default {
            w.line(&format!(
                "public static final {} DEFAULT_{} = {default};",
                argument.ty,
                shouty_snake(&argument.wire)
            ));
            w.blank();
        }
    }

    let mut params: Vec<_> = arguments
        .iter()
        .map(|a| format!("{} {}", a.ty, a.ident))
        .collect();
    params.push("String queryName".to_string());
    params.push(format!("{set}<String> fieldsSet"));
    params.push(format!("{map}<String, String> variableReferences"));
    params.push(format!("{list}<{definition}> variableDefinitions"));
    w.open(&format!("public {class}({})", params.join(", ")));
    w.line(&format!("super({}, queryName);", string_literal(operation.as_str())));
    for argument in &arguments {
        let wire = string_literal(&argument.wire);
        w.open(&format!("if (variableReferences.containsKey({wire}))"));
        w.line(&format!(
            "getInput().put({wire}, new {reference}(variableReferences.get({wire})));"
        ));
        w.next_block(&format!(
            "}} else if ({} != null || fieldsSet.contains({wire})) {{",
            argument.ident
        ));
        w.line(&format!("getInput().put({wire}, {});", argument.ident));
        w.close();
    }
    w.open("if (variableDefinitions != null)");
    w.line("getVariableDefinitions().addAll(variableDefinitions);");
    w.close();
    w.close();
    w.blank();

    w.open(&format!("public {class}()"));
    w.line(&format!("super({});", string_literal(operation.as_str())));
    w.close();
    w.blank();

    w.line("@Override");
    w.open("public String getOperationName()");
    w.line(&format!("return {};", string_literal(&field.node.name)));
    w.close();
    w.blank();

    w.open("public static Builder newRequest()");
    w.line("return new Builder();");
    w.close();
    w.blank();

    builder(&mut w, class, &arguments, &[set.as_str(), map.as_str(), list.as_str(), definition.as_str()]);

    w.close();
    Ok(ctx.file(FileKind::Query, &ctx.client_package, class, w))
}

fn builder(w: &mut JavaWriter, class: &str, arguments: &[Argument], types: &[&str; 4]) {
    let [set, map, list, definition] = *types;
    let hash_set = w.class("java.util.HashSet");
    let hash_map = w.class("java.util.HashMap");
    let array_list = w.class("java.util.ArrayList");

    w.open("public static class Builder");
    w.line(&format!("private final {set}<String> fieldsSet = new {hash_set}<>();"));
    w.blank();
    w.line(&format!(
        "private final {map}<String, String> variableReferences = new {hash_map}<>();"
    ));
    w.blank();
    w.line(&format!(
        "private final {list}<{definition}> variableDefinitions = new {array_list}<>();"
    ));
    w.blank();
    for argument in arguments {
        w.line(&format!("private {} {};", argument.ty, argument.ident));
        w.blank();
    }
    w.line("private String queryName;");
    w.blank();

    w.open(&format!("public {class} build()"));
    w.line(&format!(
        "return new {class}({});",
        arguments
            .iter()
            .map(|a| a.ident.as_str())
            .chain(["queryName", "fieldsSet", "variableReferences", "variableDefinitions"])
            .collect::<Vec<_>>()
            .join(", ")
    ));
    w.close();
    w.blank();

    for argument in arguments {
        let ident = &argument.ident;
        let wire = string_literal(&argument.wire);
        w.open(&format!("public Builder {ident}({} {ident})", argument.ty));
        w.line(&format!("this.{ident} = {ident};"));
        w.line(&format!("this.fieldsSet.add({wire});"));
        w.line("return this;");
        w.close();
        w.blank();

        w.open(&format!("public Builder {ident}Reference(String variableRef)"));
        w.line(&format!("this.variableReferences.put({wire}, variableRef);"));
        w.line(&format!(
            "this.variableDefinitions.add(new {definition}(variableRef, {}));",
            argument.variable_type
        ));
        w.line(&format!("this.fieldsSet.add({wire});"));
        w.line("return this;");
        w.close();
        w.blank();
    }

    w.open("public Builder queryName(String queryName)");
    w.line("this.queryName = queryName;");
    w.line("return this;");
    w.close();
    w.close();
}

/// The `graphql.language` type expression of a variable definition.
fn variable_type(ctx: &Context<'_>, w: &mut JavaWriter, ty: &TypeRef) -> String {
    let (inner, nullable) = match ty {
        TypeRef::Named { base, nullable } => {
            let type_name = w.class("graphql.language.TypeName");
            let name = string_literal(&ctx.graph().get(*base).name);
            (format!("new {type_name}({name})"), *nullable)
        }
        TypeRef::List { item, nullable } => {
            let list_type = w.class("graphql.language.ListType");
            let item = variable_type(ctx, w, item);
            (format!("new {list_type}({item})"), *nullable)
        }
    };
    if nullable {
        inner
    } else {
        let non_null = w.class("graphql.language.NonNullType");
        format!("new {non_null}({inner})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodeGenConfig;
    use crate::emit::test_support::{names, schema};
    use dgsgen_core::CodegenError;

    fn emit_sdl(sdl: &str) -> Result<Vec<GeneratedFile>> {
        let schema = schema(sdl);
        let names = names(&schema);
        let config = CodeGenConfig::new("com.example");
        let ctx = Context::new(&schema, &names, &config);
        emit(&ctx)
    }

    #[test]
    fn test_class_names_per_operation() {
        let files = emit_sdl(
            "type Query { people: [Person] shows: [String] }\n\
             type Mutation { people: Person addShow: String }\n\
             type Subscription { people: Person }\n\
             type Person { name: String }",
        )
        .unwrap();
        let names: Vec<_> = files.iter().map(|f| f.class_name.as_str()).collect();
        assert_eq!(
            names,
            [
                "PeopleGraphQLQuery",
                "ShowsGraphQLQuery",
                "PeopleGraphQLMutation",
                "AddShowGraphQLQuery",
                "PeopleGraphQLSubscription",
            ]
        );
        assert!(files[2].source.contains("super(\"mutation\", queryName);"));
        assert!(files[2].source.contains("return \"people\";"));
    }

    #[test]
    fn test_arguments_and_references() {
        let files = emit_sdl(
            "type Query { shows(titleFilter: String, ids: [ID!]!, first: Int! = 10): [String] }",
        )
        .unwrap();
        let source = &files[0].source;
        assert!(source.starts_with("package com.example.client;\n"));
        assert!(source.contains("public class ShowsGraphQLQuery extends GraphQLQuery {"));
        assert!(source.contains("public static final Integer DEFAULT_FIRST = 10;"));
        assert!(source.contains(
            "    if (variableReferences.containsKey(\"titleFilter\")) {\n      \
             getInput().put(\"titleFilter\", new VariableReference(variableReferences.get(\"titleFilter\")));\n    \
             } else if (titleFilter != null || fieldsSet.contains(\"titleFilter\")) {\n      \
             getInput().put(\"titleFilter\", titleFilter);\n    \
             }\n"
        ));
        assert!(source.contains(
            "this.variableDefinitions.add(new VariableDefinition(variableRef, \
             new NonNullType(new ListType(new NonNullType(new TypeName(\"ID\"))))));"
        ));
        assert!(source.contains("public Builder first(Integer first) {"));
        assert!(source.contains("public Builder titleFilterReference(String variableRef) {"));
        assert!(source.contains(
            "return new ShowsGraphQLQuery(titleFilter, ids, first, queryName, fieldsSet, \
             variableReferences, variableDefinitions);"
        ));
        assert!(source.contains("import graphql.language.NonNullType;"));
    }

    #[test]
    fn test_reserved_argument_names() {
        let files = emit_sdl("type Query { search(class: String): [String] }").unwrap();
        let source = &files[0].source;
        assert!(source.contains("public Builder _class(String _class) {"));
        assert!(source.contains("getInput().put(\"class\", _class);"));
    }

    #[test]
    fn test_argument_shadowing_builder_member() {
        match emit_sdl("type Query { search(queryName: String): [String] }") {
            Err(CodegenError::NameCollision { identifier, .. }) => {
                assert_eq!(identifier, "queryName");
            }
            other => panic!("expected a collision, got {other:?}"),
        }
    }
}
