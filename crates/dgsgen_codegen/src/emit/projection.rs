//! Selection-set builders for the client API.
//!
//! Every composite type reachable from a selected operation field gets one
//! `<Type>Projection<PARENT, ROOT>` class. The type parameters carry the
//! enclosing projection and the root, so one class serves every depth and
//! cyclic schemas need no depth limit. Operation fields get a
//! `<Field>ProjectionRoot`, and every concrete type of an interface or
//! union gets a `<Type>FragmentProjection` rendered as an inline fragment.
//! Federated entities share an `EntitiesProjectionRoot` for `_entities`
//! queries, with one `Entities<Type>KeyProjection` fragment per entity.

use super::{Context, FieldView};
use crate::java::{string_literal, JavaWriter};
use crate::output::{FileKind, GeneratedFile};
use dgsgen_core::Result;
use dgsgen_naming::{capitalize, shorten_class_name, upper_camel, Scope, TYPENAME};
use dgsgen_schema::TypeId;
use dgsgen_syntax::OperationType;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

const BASE_SUB_PROJECTION: &str = "com.netflix.graphql.dgs.client.codegen.BaseSubProjectionNode";
const INPUT_ARGUMENT: &str = "com.netflix.graphql.dgs.client.codegen.BaseProjectionNode.InputArgument";

pub const ENTITIES_ROOT: &str = "EntitiesProjectionRoot";
/// The union federation defines over all entities.
const ENTITY_UNION: &str = "_Entity";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Item {
    Projection(TypeId),
    Fragment(TypeId),
    EntityKey(TypeId),
}

/// The class being rendered.
enum Shape<'s> {
    Root { operation: &'s str },
    Projection,
    Fragment,
    /// A fragment under `EntitiesProjectionRoot`; it selects no `__typename` of its own.
    EntityKey,
}

/// Emits root, projection and fragment classes.
pub fn emit(ctx: &Context<'_>) -> Result<Vec<GeneratedFile>> {
    let mut emitter = ProjectionEmitter {
        ctx,
        files: Vec::new(),
        classes: Scope::new(),
        queue: VecDeque::new(),
        visited: FxHashSet::default(),
    };

    let mut roots = FxHashSet::default();
    for operation in [OperationType::Query, OperationType::Mutation, OperationType::Subscription] {
        for field in ctx.operation_fields(operation) {
            if !emitter.selectable(&field) || !ctx.is_composite(&field.node.ty) {
                continue;
            }
            let class = format!("{}ProjectionRoot", emitter.short(&upper_camel(&field.node.name)));
            // The first operation field wins a shared root name.
            if !roots.insert(class.clone()) {
                continue;
            }
            let entity = format!("{}.{}", ctx.graph().get(field.owner).name, field.node.name);
            emitter.classes.define(&class, &entity)?;
            let ty = *field.node.ty.base();
            let shape = Shape::Root { operation: &entity };
            emitter.render(&class, ty, &shape)?;
        }
    }

    let entities = ctx.entity_types();
    if !entities.is_empty() {
        emitter.classes.define(ENTITIES_ROOT, "_entities")?;
        emitter.render_entities_root(&entities);
    }

    while let Some(item) = emitter.queue.pop_front() {
        match item {
            Item::Projection(ty) => {
                let class = emitter.projection_class(ty);
                let name = &ctx.graph().get(ty).name;
                emitter.classes.define(&class, &format!("projection of {name}"))?;
                emitter.render(&class, ty, &Shape::Projection)?;
            }
            Item::Fragment(ty) => {
                let class = emitter.fragment_class(ty);
                let name = &ctx.graph().get(ty).name;
                emitter.classes.define(&class, &format!("fragment on {name}"))?;
                emitter.render(&class, ty, &Shape::Fragment)?;
            }
            Item::EntityKey(ty) => {
                let class = emitter.entity_key_class(ty);
                let name = &ctx.graph().get(ty).name;
                emitter.classes.define(&class, &format!("entity key of {name}"))?;
                emitter.render(&class, ty, &Shape::EntityKey)?;
            }
        }
    }

    tracing::debug!(count = emitter.files.len(), "projection classes");
    Ok(emitter.files)
}

struct ProjectionEmitter<'c, 'a> {
    ctx: &'c Context<'a>,
    files: Vec<GeneratedFile>,
    classes: Scope,
    queue: VecDeque<Item>,
    visited: FxHashSet<Item>,
}

impl ProjectionEmitter<'_, '_> {
    fn short(&self, class: &str) -> String {
        if self.ctx.config.short_projection_names {
            shorten_class_name(class)
        } else {
            class.to_string()
        }
    }

    fn prefix(&self, ty: TypeId) -> String {
        self.short(self.ctx.class_name(ty))
    }

    fn projection_class(&self, ty: TypeId) -> String {
        format!("{}Projection", self.prefix(ty))
    }

    fn fragment_class(&self, ty: TypeId) -> String {
        format!("{}FragmentProjection", self.prefix(ty))
    }

    fn entity_key_class(&self, ty: TypeId) -> String {
        format!("Entities{}KeyProjection", self.prefix(ty))
    }

    fn enqueue(&mut self, item: Item) {
        if self.visited.insert(item) {
            self.queue.push_back(item);
        }
    }

    /// Fields whose type is skipped cannot be selected.
    fn selectable(&self, field: &FieldView<'_>) -> bool {
        !self.ctx.is_skipped(self.ctx.graph().get(*field.node.ty.base()))
    }

    fn render(&mut self, class: &str, ty: TypeId, shape: &Shape<'_>) -> Result<()> {
        let ctx = self.ctx;
        let package = ctx.client_package.clone();
        let node = ctx.graph().get(ty);
        let mut w = JavaWriter::new(package.clone(), class);
        let base = w.class(BASE_SUB_PROJECTION);
        let optional = w.class("java.util.Optional");

        let this_type = format!("{class}<PARENT, ROOT>");
        let (root_type, root_value) = match shape {
            Shape::Root { .. } => (this_type.clone(), "this"),
            _ => ("ROOT".to_string(), "getRoot()"),
        };
        let mut methods = Scope::new();

        ctx.generated_annotation(&mut w);
        let declaration = format!("{class}<PARENT extends {base}<?, ?>, ROOT extends {base}<?, ?>>");
        w.open(&format!("public class {declaration} extends {base}<PARENT, ROOT>"));

        let type_name = string_literal(&node.name);
        match shape {
            Shape::Root { .. } => {
                w.open(&format!("public {class}()"));
                w.line(&format!("super(null, null, {optional}.of({type_name}));"));
            }
            _ => {
                w.open(&format!("public {class}(PARENT parent, ROOT root)"));
                w.line(&format!("super(parent, root, {optional}.of({type_name}));"));
            }
        }
        if matches!(shape, Shape::Fragment) || node.kind.is_abstract() {
            w.line(&format!("getFields().put({}, null);", string_literal(TYPENAME)));
        }
        w.close();
        w.blank();

        methods.define(TYPENAME, &format!("{}.{TYPENAME}", node.name))?;
        w.open(&format!("public {this_type} {TYPENAME}()"));
        w.line(&format!("getFields().put({}, null);", string_literal(TYPENAME)));
        w.line("return this;");
        w.close();
        w.blank();

        for field in ctx.selectable_fields(ty) {
            if !self.selectable(&field) {
                continue;
            }
            methods.define(
                &field.names.identifier,
                &format!("{}.{}", node.name, field.node.name),
            )?;
            self.field_methods(&mut w, &field, &this_type, &root_type, root_value);
        }

        if node.kind.is_abstract() {
            for concrete in ctx.polymorphism().possible_types(ctx.graph(), ty) {
                let concrete_node = ctx.graph().get(concrete);
                if ctx.is_skipped(concrete_node) {
                    continue;
                }
                let method = format!("on{}", capitalize(ctx.class_name(concrete)));
                methods.define(&method, &format!("{} fragment on {}", node.name, concrete_node.name))?;
                let fragment = format!("{}<{this_type}, {root_type}>", self.fragment_class(concrete));
                w.open(&format!("public {fragment} {method}()"));
                w.line(&format!("{fragment} fragment = new {}<>(this, {root_value});", self.fragment_class(concrete)));
                w.line("getFragments().add(fragment);");
                w.line("return fragment;");
                w.close();
                w.blank();
                self.enqueue(Item::Fragment(concrete));
            }
        }

        if matches!(shape, Shape::Fragment | Shape::EntityKey) {
            fragment_to_string(&mut w, &node.name);
        }

        w.close();
        let file = ctx.file(FileKind::Projection, &package, class, w);
        if let Shape::Root { operation } = shape {
            tracing::trace!(operation, class, "projection root");
        }
        self.files.push(file);
        Ok(())
    }

    /// Renders the root of an `_entities` selection with one `on<Type>()` per entity.
    fn render_entities_root(&mut self, entities: &[TypeId]) {
        let ctx = self.ctx;
        let package = ctx.client_package.clone();
        let mut w = JavaWriter::new(package.clone(), ENTITIES_ROOT);
        let base = w.class(BASE_SUB_PROJECTION);
        let optional = w.class("java.util.Optional");
        let this_type = format!("{ENTITIES_ROOT}<PARENT, ROOT>");

        ctx.generated_annotation(&mut w);
        w.open(&format!(
            "public class {ENTITIES_ROOT}<PARENT extends {base}<?, ?>, ROOT extends {base}<?, ?>> extends {base}<PARENT, ROOT>"
        ));
        w.open(&format!("public {ENTITIES_ROOT}()"));
        w.line(&format!("super(null, null, {optional}.of({}));", string_literal(ENTITY_UNION)));
        w.close();
        w.blank();

        for &entity in entities {
            let class = self.entity_key_class(entity);
            let fragment = format!("{class}<{this_type}, {this_type}>");
            w.open(&format!("public {fragment} on{}()", capitalize(ctx.class_name(entity))));
            w.line(&format!("{fragment} fragment = new {class}<>(this, this);"));
            w.line("getFragments().add(fragment);");
            w.line("return fragment;");
            w.close();
            w.blank();
            self.enqueue(Item::EntityKey(entity));
        }

        w.close();
        tracing::trace!(entities = entities.len(), "entities projection root");
        self.files.push(ctx.file(FileKind::Projection, &package, ENTITIES_ROOT, w));
    }

    fn field_methods(
        &mut self,
        w: &mut JavaWriter,
        field: &FieldView<'_>,
        this_type: &str,
        root_type: &str,
        root_value: &str,
    ) {
        let ctx = self.ctx;
        let ident = &field.names.identifier;
        let wire = string_literal(&field.node.name);

        let return_type = if ctx.is_composite(&field.node.ty) {
            let child = *field.node.ty.base();
            let child_class = self.projection_class(child);
            self.enqueue(Item::Projection(child));
            let child_type = format!("{child_class}<{this_type}, {root_type}>");
            w.open(&format!("public {child_type} {ident}()"));
            w.line(&format!("{child_type} projection = new {child_class}<>(this, {root_value});"));
            w.line(&format!("getFields().put({wire}, projection);"));
            w.line("return projection;");
            w.close();
            child_type
        } else {
            w.open(&format!("public {this_type} {ident}()"));
            w.line(&format!("getFields().put({wire}, null);"));
            w.line("return this;");
            w.close();
            this_type.to_string()
        };
        w.blank();

        if field.node.arguments.is_empty() {
            return;
        }
        let input_argument = w.class(INPUT_ARGUMENT);
        let array_list = w.class("java.util.ArrayList");
        let arrays = w.class("java.util.Arrays");
        let mut params = Vec::new();
        let mut values = Vec::new();
        for (index, argument) in field.node.arguments.iter().enumerate() {
            let name = ctx
                .names
                .argument(field.owner, field.index, index)
                .unwrap_or(argument.name.as_str());
            let java = ctx.java_type(&argument.ty, false).boxed();
            params.push(format!("{} {name}", w.ty(&java)));
            values.push(format!(
                "new {input_argument}({}, {name})",
                string_literal(&argument.name)
            ));
        }
        w.open(&format!("public {return_type} {ident}({})", params.join(", ")));
        w.line(&format!(
            "getInputArguments().put({wire}, new {array_list}<>({arrays}.asList({})));",
            values.join(", ")
        ));
        w.line(&format!("return {ident}();"));
        w.close();
        w.blank();
    }
}

/// Renders the fragment as `... on Type { fields }`.
fn fragment_to_string(w: &mut JavaWriter, type_name: &str) {
    w.line("@Override");
    w.open("public String toString()");
    w.line("StringBuilder builder = new StringBuilder();");
    w.line(&format!("builder.append({});", string_literal(&format!("... on {type_name} {{"))));
    w.open("getFields().forEach((k, v) ->");
    w.line("builder.append(\" \").append(k);");
    w.open("if (v != null)");
    w.line("builder.append(\" \").append(v.toString());");
    w.close();
    w.close_with("});");
    w.line("builder.append(\"}\");");
    w.line("return builder.toString();");
    w.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodeGenConfig;
    use crate::emit::test_support::{names, schema};

    fn emit_with(sdl: &str, config: &CodeGenConfig) -> Vec<GeneratedFile> {
        let schema = schema(sdl);
        let names = names(&schema);
        let ctx = Context::new(&schema, &names, config);
        emit(&ctx).unwrap()
    }

    fn class_names(files: &[GeneratedFile]) -> Vec<&str> {
        files.iter().map(|f| f.class_name.as_str()).collect()
    }

    #[test]
    fn test_root_projection() {
        let files = emit_with(
            "type Query { people: [Person] count: Int }\ntype Person { firstname: String lastname: String }",
            &CodeGenConfig::new("com.example"),
        );
        assert_eq!(class_names(&files), ["PeopleProjectionRoot"]);
        let root = &files[0];
        assert_eq!(root.path, "com/example/client/PeopleProjectionRoot.java");
        insta::assert_snapshot!(root.source, @r#"
        package com.example.client;

        import com.netflix.graphql.dgs.client.codegen.BaseSubProjectionNode;
        import java.util.Optional;

        public class PeopleProjectionRoot<PARENT extends BaseSubProjectionNode<?, ?>, ROOT extends BaseSubProjectionNode<?, ?>> extends BaseSubProjectionNode<PARENT, ROOT> {
          public PeopleProjectionRoot() {
            super(null, null, Optional.of("Person"));
          }

          public PeopleProjectionRoot<PARENT, ROOT> __typename() {
            getFields().put("__typename", null);
            return this;
          }

          public PeopleProjectionRoot<PARENT, ROOT> firstname() {
            getFields().put("firstname", null);
            return this;
          }

          public PeopleProjectionRoot<PARENT, ROOT> lastname() {
            getFields().put("lastname", null);
            return this;
          }
        }
        "#);
    }

    #[test]
    fn test_cyclic_types_terminate() {
        let files = emit_with(
            "type Query { person: Person }\ntype Person { name: String friends: [Person] }",
            &CodeGenConfig::new("com.example"),
        );
        assert_eq!(class_names(&files), ["PersonProjectionRoot", "PersonProjection"]);
        let root = &files[0].source;
        assert!(root.contains(
            "public PersonProjection<PersonProjectionRoot<PARENT, ROOT>, PersonProjectionRoot<PARENT, ROOT>> friends() {"
        ));
        assert!(root.contains("new PersonProjection<>(this, this);"));
        let sub = &files[1].source;
        assert!(sub.contains("public PersonProjection(PARENT parent, ROOT root) {"));
        assert!(sub.contains(
            "public PersonProjection<PersonProjection<PARENT, ROOT>, ROOT> friends() {"
        ));
        assert!(sub.contains("new PersonProjection<>(this, getRoot());"));
    }

    #[test]
    fn test_fragments_for_interface() {
        let files = emit_with(
            "type Query { pets: [Pet] }\n\
             interface Pet { name: String }\n\
             type Dog implements Pet { name: String barks: Boolean }\n\
             type Bird implements Pet { name: String wingspan: Float }",
            &CodeGenConfig::new("com.example"),
        );
        assert_eq!(
            class_names(&files),
            ["PetsProjectionRoot", "DogFragmentProjection", "BirdFragmentProjection"]
        );
        let root = &files[0].source;
        assert_eq!(root.matches("FragmentProjection<PetsProjectionRoot<PARENT, ROOT>, PetsProjectionRoot<PARENT, ROOT>> on").count(), 2);
        assert!(root.contains("    getFields().put(\"__typename\", null);\n  }\n"));
        assert!(root.contains("getFragments().add(fragment);"));

        let dog = &files[1].source;
        assert!(dog.contains("super(parent, root, Optional.of(\"Dog\"));\n    getFields().put(\"__typename\", null);"));
        assert!(dog.contains("builder.append(\"... on Dog {\");"));
        assert!(dog.contains("public DogFragmentProjection<PARENT, ROOT> barks() {"));
    }

    #[test]
    fn test_union_members_and_arguments() {
        let files = emit_with(
            "type Query { search(text: String!, first: Int = 10): [Result] }\n\
             union Result = Movie | Actor\n\
             type Movie { title: String cast(limit: Int): [Actor] }\n\
             type Actor { name: String }",
            &CodeGenConfig::new("com.example"),
        );
        assert_eq!(
            class_names(&files),
            [
                "SearchProjectionRoot",
                "MovieFragmentProjection",
                "ActorFragmentProjection",
                "ActorProjection",
            ]
        );
        let movie = &files[1].source;
        assert!(movie.contains("public ActorProjection<MovieFragmentProjection<PARENT, ROOT>, ROOT> cast(Integer limit) {"));
        assert!(movie.contains(
            "getInputArguments().put(\"cast\", new ArrayList<>(Arrays.asList(new InputArgument(\"limit\", limit))));"
        ));
        assert!(movie.contains("import com.netflix.graphql.dgs.client.codegen.BaseProjectionNode.InputArgument;"));
    }

    #[test]
    fn test_short_projection_names() {
        let mut config = CodeGenConfig::new("com.example");
        config.short_projection_names = true;
        let files = emit_with(
            "type Query { movieDetails: MovieDetails }\ntype MovieDetails { related: MovieDetails }",
            &config,
        );
        assert_eq!(class_names(&files), ["MoDeProjectionRoot", "MoDeProjection"]);
    }

    const ENTITIES: &str = "type Query { movie: Movie }\n\
        type Movie @key(fields: \"id\") { id: ID! title: String cast: [Actor] }\n\
        type Actor @key(fields: \"name\") { name: String }";

    #[test]
    fn test_entities_projection_root() {
        let files = emit_with(ENTITIES, &CodeGenConfig::new("com.example"));
        assert_eq!(
            class_names(&files),
            [
                "MovieProjectionRoot",
                "EntitiesProjectionRoot",
                "ActorProjection",
                "EntitiesMovieKeyProjection",
                "EntitiesActorKeyProjection",
            ]
        );
        let root = &files[1].source;
        assert!(root.contains("super(null, null, Optional.of(\"_Entity\"));"));
        assert!(root.contains(
            "public EntitiesMovieKeyProjection<EntitiesProjectionRoot<PARENT, ROOT>, EntitiesProjectionRoot<PARENT, ROOT>> onMovie() {"
        ));
        assert!(root.contains("new EntitiesActorKeyProjection<>(this, this);"));

        let movie = &files[3].source;
        assert!(movie.contains("super(parent, root, Optional.of(\"Movie\"));\n  }"));
        assert!(movie.contains("builder.append(\"... on Movie {\");"));
        assert!(movie.contains("public EntitiesMovieKeyProjection<PARENT, ROOT> title() {"));
        assert!(movie.contains("ActorProjection<EntitiesMovieKeyProjection<PARENT, ROOT>, ROOT> cast() {"));
    }

    #[test]
    fn test_skip_entity_queries() {
        let mut config = CodeGenConfig::new("com.example");
        config.skip_entity_queries = true;
        let files = emit_with(ENTITIES, &config);
        assert_eq!(class_names(&files), ["MovieProjectionRoot", "ActorProjection"]);
    }
}
