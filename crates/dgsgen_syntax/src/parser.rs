//! Recursive descent parser for GraphQL documents.
//!
//! The first syntax error ends the parse: the error is recorded in the
//! diagnostic bag and the parser jumps to end of input, so a document either
//! parses cleanly or yields exactly one error.

use crate::ast::*;
use crate::lexer::Lexer;
use crate::strings::{block_string_value, decode_string};
use crate::token::{DirectiveLocation, Token, TokenKind};
use dgsgen_core::{diagnostics::codes, DiagnosticBag, Interner, Span, Text};

/// Parser for GraphQL documents.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    diagnostics: DiagnosticBag,
}

/// Result of parsing.
pub struct ParseResult<'a> {
    pub document: Document<'a>,
    pub diagnostics: DiagnosticBag,
}

/// Parses a source string into a document.
pub fn parse<'a>(source: &'a str, interner: &'a Interner) -> ParseResult<'a> {
    let mut parser = Parser::new(source, interner);
    let document = parser.parse_document();
    ParseResult {
        document,
        diagnostics: parser.diagnostics,
    }
}

impl<'a> Parser<'a> {
    /// Creates a new parser.
    pub fn new(source: &'a str, interner: &'a Interner) -> Self {
        let lexer = Lexer::new(source, interner);
        let mut parser = Self {
            lexer,
            current: Token::new(TokenKind::Eof, Span::empty(0)),
            diagnostics: DiagnosticBag::new(),
        };
        parser.advance();
        parser
    }

    /// Returns the current token kind.
    #[inline]
    fn at(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns true if at the given kind.
    #[inline]
    fn at_kind(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Returns true while there is input left.
    #[inline]
    fn at_end(&self) -> bool {
        self.at_kind(TokenKind::Eof)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.at_end() && self.diagnostics.has_errors() {
            return;
        }
        self.current = self.lexer.next_token();
        if self.at_kind(TokenKind::Error) {
            let text = self.current_text();
            if text.starts_with('"') {
                self.fail(codes::UNTERMINATED_STRING, "unterminated string");
            } else if text.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
                self.fail(codes::INVALID_SYNTAX, format!("invalid number `{text}`"));
            } else {
                self.fail(codes::INVALID_CHARACTER, format!("unexpected character `{text}`"));
            }
        }
    }

    /// Advances if at the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at_kind(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a specific token kind.
    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error_expected(&kind.to_string());
            false
        }
    }

    /// Gets the text of the current token.
    fn current_text(&self) -> &'a str {
        self.lexer.span_text(self.current.span)
    }

    /// Interns the current token's text.
    fn intern_current(&self) -> Text {
        self.lexer.intern_span(self.current.span)
    }

    /// Records the first error and stops the parse.
    fn fail(&mut self, code: &'static str, message: impl Into<String>) {
        if !self.diagnostics.has_errors() {
            let message = message.into();
            self.diagnostics
                .error(code, message.clone(), self.current.span, message);
        }
        self.current = Token::new(TokenKind::Eof, Span::empty(self.current.span.end));
    }

    /// Reports an expected token error.
    fn error_expected(&mut self, expected: &str) {
        let code = if self.at_end() {
            codes::UNEXPECTED_EOF
        } else {
            codes::UNEXPECTED_TOKEN
        };
        let found = self.at();
        self.fail(code, format!("expected {expected}, found {found}"));
    }

    /// Parses a document.
    pub fn parse_document(&mut self) -> Document<'a> {
        let start = self.current.span.start;
        let mut definitions = Vec::new();

        while !self.at_end() {
            if let Some(def) = self.parse_definition() {
                definitions.push(def);
            }
        }

        let end = self.current.span.end;
        Document {
            definitions,
            span: Span::new(start, end),
        }
    }

    /// Parses a definition.
    fn parse_definition(&mut self) -> Option<Definition<'a>> {
        let description = self.try_parse_description();

        match self.at() {
            TokenKind::Schema => Some(Definition::Schema(
                self.parse_schema_definition(description),
            )),
            TokenKind::Type
            | TokenKind::Interface
            | TokenKind::Union
            | TokenKind::Enum
            | TokenKind::Input
            | TokenKind::Scalar => self
                .parse_type_definition(description)
                .map(Definition::Type),
            TokenKind::Directive => Some(Definition::Directive(
                self.parse_directive_definition(description),
            )),
            TokenKind::Extend => {
                if description.is_some() {
                    self.fail(codes::INVALID_SYNTAX, "extensions cannot have a description");
                    return None;
                }
                self.advance(); // extend
                if self.at_kind(TokenKind::Schema) {
                    Some(Definition::SchemaExtension(
                        self.parse_schema_definition(None),
                    ))
                } else {
                    self.parse_type_definition(None)
                        .map(Definition::TypeExtension)
                }
            }
            TokenKind::Query | TokenKind::Mutation | TokenKind::Subscription | TokenKind::LBrace
                if description.is_none() =>
            {
                Some(Definition::Operation(self.parse_operation()))
            }
            TokenKind::Fragment if description.is_none() => {
                Some(Definition::Fragment(self.parse_fragment_definition()))
            }
            _ => {
                self.error_expected("definition");
                None
            }
        }
    }

    /// Parses one of the six type definitions at the current keyword.
    fn parse_type_definition(
        &mut self,
        description: Option<Description>,
    ) -> Option<TypeDefinition<'a>> {
        let def = match self.at() {
            TokenKind::Type => TypeDefinition::Object(self.parse_object_type(description)),
            TokenKind::Interface => {
                TypeDefinition::Interface(self.parse_interface_type(description))
            }
            TokenKind::Union => TypeDefinition::Union(self.parse_union_type(description)),
            TokenKind::Enum => TypeDefinition::Enum(self.parse_enum_type(description)),
            TokenKind::Input => TypeDefinition::Input(self.parse_input_object_type(description)),
            TokenKind::Scalar => TypeDefinition::Scalar(self.parse_scalar_type(description)),
            _ => {
                self.error_expected("type definition");
                return None;
            }
        };
        Some(def)
    }

    /// Tries to parse a description.
    fn try_parse_description(&mut self) -> Option<Description> {
        if matches!(
            self.at(),
            TokenKind::StringLiteral | TokenKind::BlockStringLiteral
        ) {
            let span = self.current.span;
            let value = self.string_value()?;
            self.advance();
            Some(Description::new(value, span))
        } else {
            None
        }
    }

    /// Decodes the current string token.
    fn string_value(&mut self) -> Option<String> {
        let text = self.current_text();
        if self.at_kind(TokenKind::BlockStringLiteral) {
            return Some(block_string_value(&text[3..text.len() - 3]));
        }
        match decode_string(&text[1..text.len() - 1]) {
            Ok(value) => Some(value),
            Err(err) => {
                let at = self.current.span.start + 1 + err.offset as u32;
                self.current.span = Span::new(at, at + 2);
                self.fail(codes::INVALID_ESCAPE, "invalid escape sequence");
                None
            }
        }
    }

    /// Parses a name.
    fn parse_name(&mut self) -> Name {
        let span = self.current.span;
        if self.at().is_name() {
            let value = self.intern_current();
            self.advance();
            Name::new(value, span)
        } else {
            let value = self.lexer.intern_span(Span::empty(span.start));
            self.error_expected("name");
            Name::new(value, span)
        }
    }

    /// Parses schema definition or extension body.
    fn parse_schema_definition(
        &mut self,
        description: Option<Description>,
    ) -> SchemaDefinition<'a> {
        let start = self.current.span.start;
        self.advance(); // schema

        let directives = self.parse_const_directives();
        let mut operations = Vec::new();

        if self.eat(TokenKind::LBrace) {
            while !self.at_kind(TokenKind::RBrace) && !self.at_end() {
                let op_start = self.current.span.start;
                let operation = match self.at() {
                    TokenKind::Query => OperationType::Query,
                    TokenKind::Mutation => OperationType::Mutation,
                    TokenKind::Subscription => OperationType::Subscription,
                    _ => {
                        self.error_expected("operation type");
                        break;
                    }
                };
                self.advance();
                self.expect(TokenKind::Colon);
                let type_name = self.parse_name();
                operations.push(OperationTypeDefinition {
                    operation,
                    type_name,
                    span: Span::new(op_start, type_name.span.end),
                });
            }
            self.expect(TokenKind::RBrace);
        }

        let end = self.current.span.start;
        SchemaDefinition {
            description,
            directives,
            operations,
            span: Span::new(start, end),
        }
    }

    /// Parses object type definition.
    fn parse_object_type(&mut self, description: Option<Description>) -> ObjectTypeDefinition<'a> {
        let start = self.current.span.start;
        self.advance(); // type

        let name = self.parse_name();
        let implements = self.parse_implements();
        let directives = self.parse_const_directives();
        let fields = self.parse_field_definitions();

        let end = self.current.span.start;
        ObjectTypeDefinition {
            description,
            name,
            implements,
            directives,
            fields,
            span: Span::new(start, end),
        }
    }

    /// Parses interface type definition.
    fn parse_interface_type(
        &mut self,
        description: Option<Description>,
    ) -> InterfaceTypeDefinition<'a> {
        let start = self.current.span.start;
        self.advance(); // interface

        let name = self.parse_name();
        let implements = self.parse_implements();
        let directives = self.parse_const_directives();
        let fields = self.parse_field_definitions();

        let end = self.current.span.start;
        InterfaceTypeDefinition {
            description,
            name,
            implements,
            directives,
            fields,
            span: Span::new(start, end),
        }
    }

    /// Parses union type definition.
    fn parse_union_type(&mut self, description: Option<Description>) -> UnionTypeDefinition<'a> {
        let start = self.current.span.start;
        self.advance(); // union

        let name = self.parse_name();
        let directives = self.parse_const_directives();

        let mut members = Vec::new();
        if self.eat(TokenKind::Eq) {
            self.eat(TokenKind::Pipe);
            members.push(self.parse_name());
            while self.eat(TokenKind::Pipe) {
                members.push(self.parse_name());
            }
        }

        let end = self.current.span.start;
        UnionTypeDefinition {
            description,
            name,
            directives,
            members,
            span: Span::new(start, end),
        }
    }

    /// Parses enum type definition.
    fn parse_enum_type(&mut self, description: Option<Description>) -> EnumTypeDefinition<'a> {
        let start = self.current.span.start;
        self.advance(); // enum

        let name = self.parse_name();
        let directives = self.parse_const_directives();
        let values = if self.at_kind(TokenKind::LBrace) {
            self.parse_enum_values()
        } else {
            Vec::new()
        };

        let end = self.current.span.start;
        EnumTypeDefinition {
            description,
            name,
            directives,
            values,
            span: Span::new(start, end),
        }
    }

    /// Parses enum values.
    fn parse_enum_values(&mut self) -> Vec<EnumValueDefinition<'a>> {
        self.expect(TokenKind::LBrace);

        let mut values = Vec::new();
        while !self.at_kind(TokenKind::RBrace) && !self.at_end() {
            let start = self.current.span.start;
            let description = self.try_parse_description();
            if matches!(
                self.at(),
                TokenKind::True | TokenKind::False | TokenKind::Null
            ) {
                self.error_expected("enum value");
                break;
            }
            let name = self.parse_name();
            let directives = self.parse_const_directives();
            let end = self.current.span.start;
            values.push(EnumValueDefinition {
                description,
                name,
                directives,
                span: Span::new(start, end),
            });
        }

        self.expect(TokenKind::RBrace);
        values
    }

    /// Parses input object type definition.
    fn parse_input_object_type(
        &mut self,
        description: Option<Description>,
    ) -> InputObjectTypeDefinition<'a> {
        let start = self.current.span.start;
        self.advance(); // input

        let name = self.parse_name();
        let directives = self.parse_const_directives();
        let fields = if self.eat(TokenKind::LBrace) {
            self.parse_input_value_definitions(TokenKind::RBrace)
        } else {
            Vec::new()
        };

        let end = self.current.span.start;
        InputObjectTypeDefinition {
            description,
            name,
            directives,
            fields,
            span: Span::new(start, end),
        }
    }

    /// Parses scalar type definition.
    fn parse_scalar_type(&mut self, description: Option<Description>) -> ScalarTypeDefinition<'a> {
        let start = self.current.span.start;
        self.advance(); // scalar

        let name = self.parse_name();
        let directives = self.parse_const_directives();

        let end = self.current.span.start;
        ScalarTypeDefinition {
            description,
            name,
            directives,
            span: Span::new(start, end),
        }
    }

    /// Parses a directive definition.
    fn parse_directive_definition(
        &mut self,
        description: Option<Description>,
    ) -> DirectiveDefinitionNode<'a> {
        let start = self.current.span.start;
        self.advance(); // directive
        self.expect(TokenKind::At);

        let name = self.parse_name();
        let arguments = if self.eat(TokenKind::LParen) {
            self.parse_input_value_definitions(TokenKind::RParen)
        } else {
            Vec::new()
        };

        let repeatable = self.eat(TokenKind::Repeatable);

        self.expect(TokenKind::On);
        self.eat(TokenKind::Pipe);

        let mut locations = Vec::new();
        loop {
            if !self.at_kind(TokenKind::Ident) {
                self.error_expected("directive location");
                break;
            }
            let text = self.current_text();
            match DirectiveLocation::parse(text) {
                Some(location) => locations.push(location),
                None => self.diagnostics.warning(
                    codes::UNKNOWN_DIRECTIVE_LOCATION,
                    "unknown directive location",
                    self.current.span,
                    format!("`{text}` is not a directive location"),
                ),
            }
            self.advance();
            if !self.eat(TokenKind::Pipe) {
                break;
            }
        }

        let end = self.current.span.start;
        DirectiveDefinitionNode {
            description,
            name,
            arguments,
            repeatable,
            locations,
            span: Span::new(start, end),
        }
    }

    /// Parses `implements A & B`.
    fn parse_implements(&mut self) -> Vec<Name> {
        let mut interfaces = Vec::new();
        if self.eat(TokenKind::Implements) {
            self.eat(TokenKind::Amp);
            interfaces.push(self.parse_name());
            while self.eat(TokenKind::Amp) {
                interfaces.push(self.parse_name());
            }
        }
        interfaces
    }

    /// Parses an optional `{ field... }` block.
    fn parse_field_definitions(&mut self) -> Vec<FieldDefinition<'a>> {
        let mut fields = Vec::new();
        if !self.eat(TokenKind::LBrace) {
            return fields;
        }
        while !self.at_kind(TokenKind::RBrace) && !self.at_end() {
            fields.push(self.parse_field_definition());
        }
        self.expect(TokenKind::RBrace);
        fields
    }

    /// Parses a field definition.
    fn parse_field_definition(&mut self) -> FieldDefinition<'a> {
        let start = self.current.span.start;
        let description = self.try_parse_description();
        let name = self.parse_name();

        let arguments = if self.eat(TokenKind::LParen) {
            self.parse_input_value_definitions(TokenKind::RParen)
        } else {
            Vec::new()
        };

        self.expect(TokenKind::Colon);
        let ty = self.parse_type();
        let directives = self.parse_const_directives();

        let end = self.current.span.start;
        FieldDefinition {
            description,
            name,
            arguments,
            ty,
            directives,
            span: Span::new(start, end),
        }
    }

    /// Parses input value definitions up to and including `close`.
    fn parse_input_value_definitions(&mut self, close: TokenKind) -> Vec<InputValueDefinition<'a>> {
        let mut values = Vec::new();
        while !self.at_kind(close) && !self.at_end() {
            values.push(self.parse_input_value_definition());
        }
        self.expect(close);
        values
    }

    /// Parses an input value definition.
    fn parse_input_value_definition(&mut self) -> InputValueDefinition<'a> {
        let start = self.current.span.start;
        let description = self.try_parse_description();
        let name = self.parse_name();
        self.expect(TokenKind::Colon);
        let ty = self.parse_type();

        let default_value = if self.eat(TokenKind::Eq) {
            Some(self.parse_value(true))
        } else {
            None
        };

        let directives = self.parse_const_directives();

        let end = self.current.span.start;
        InputValueDefinition {
            description,
            name,
            ty,
            default_value,
            directives,
            span: Span::new(start, end),
        }
    }

    /// Parses a type.
    fn parse_type(&mut self) -> Type {
        let start = self.current.span.start;

        let ty = if self.eat(TokenKind::LBracket) {
            let inner = self.parse_type();
            self.expect(TokenKind::RBracket);
            Type::List(Box::new(inner), Span::new(start, self.current.span.start))
        } else {
            let name = self.parse_name();
            Type::Named(NamedType {
                name: name.value,
                span: name.span,
            })
        };

        if self.eat(TokenKind::Bang) {
            Type::NonNull(Box::new(ty), Span::new(start, self.current.span.start))
        } else {
            ty
        }
    }

    /// Parses directives whose arguments must be constant.
    fn parse_const_directives(&mut self) -> Vec<Directive<'a>> {
        self.parse_directives(true)
    }

    /// Parses directives.
    fn parse_directives(&mut self, is_const: bool) -> Vec<Directive<'a>> {
        let mut directives = Vec::new();
        while self.at_kind(TokenKind::At) {
            directives.push(self.parse_directive(is_const));
        }
        directives
    }

    /// Parses a directive.
    fn parse_directive(&mut self, is_const: bool) -> Directive<'a> {
        let start = self.current.span.start;
        self.advance(); // @

        let name = self.parse_name();
        let arguments = if self.eat(TokenKind::LParen) {
            self.parse_arguments(is_const)
        } else {
            Vec::new()
        };

        let end = self.current.span.start;
        Directive {
            name,
            arguments,
            span: Span::new(start, end),
        }
    }

    /// Parses arguments up to and including `)`.
    fn parse_arguments(&mut self, is_const: bool) -> Vec<Argument<'a>> {
        let mut args = Vec::new();
        while !self.at_kind(TokenKind::RParen) && !self.at_end() {
            let start = self.current.span.start;
            let name = self.parse_name();
            self.expect(TokenKind::Colon);
            let value = self.parse_value(is_const);
            let end = self.current.span.start;
            args.push(Argument {
                name,
                value,
                span: Span::new(start, end),
            });
        }
        self.expect(TokenKind::RParen);
        args
    }

    /// Parses a value. Variables are rejected in constant positions.
    fn parse_value(&mut self, is_const: bool) -> Value<'a> {
        let start = self.current.span.start;

        match self.at() {
            TokenKind::Dollar => {
                if is_const {
                    self.fail(
                        codes::INVALID_SYNTAX,
                        "variables are not allowed in constant values",
                    );
                }
                self.advance();
                Value::Variable(self.parse_name())
            }
            TokenKind::IntLiteral => {
                let text = self.current_text();
                self.advance();
                Value::Int(text, Span::new(start, self.current.span.start))
            }
            TokenKind::FloatLiteral => {
                let text = self.current_text();
                self.advance();
                Value::Float(text, Span::new(start, self.current.span.start))
            }
            TokenKind::StringLiteral | TokenKind::BlockStringLiteral => {
                let span = self.current.span;
                let value = self.string_value().unwrap_or_default();
                self.advance();
                Value::String(value, span)
            }
            TokenKind::True => {
                self.advance();
                Value::Boolean(true, Span::new(start, self.current.span.start))
            }
            TokenKind::False => {
                self.advance();
                Value::Boolean(false, Span::new(start, self.current.span.start))
            }
            TokenKind::Null => {
                self.advance();
                Value::Null(Span::new(start, self.current.span.start))
            }
            TokenKind::LBracket => {
                self.advance();
                let mut values = Vec::new();
                while !self.at_kind(TokenKind::RBracket) && !self.at_end() {
                    values.push(self.parse_value(is_const));
                }
                self.expect(TokenKind::RBracket);
                Value::List(values, Span::new(start, self.current.span.start))
            }
            TokenKind::LBrace => {
                self.advance();
                let mut fields = Vec::new();
                while !self.at_kind(TokenKind::RBrace) && !self.at_end() {
                    let name = self.parse_name();
                    self.expect(TokenKind::Colon);
                    let value = self.parse_value(is_const);
                    fields.push((name, value));
                }
                self.expect(TokenKind::RBrace);
                Value::Object(fields, Span::new(start, self.current.span.start))
            }
            kind if kind.is_name() => Value::Enum(self.parse_name()),
            _ => {
                self.error_expected("value");
                Value::Null(Span::new(start, self.current.span.start))
            }
        }
    }

    /// Parses an operation definition.
    fn parse_operation(&mut self) -> OperationDefinition<'a> {
        let start = self.current.span.start;

        let (operation, name) = if self.at_kind(TokenKind::LBrace) {
            // Anonymous query
            (OperationType::Query, None)
        } else {
            let op = match self.at() {
                TokenKind::Mutation => OperationType::Mutation,
                TokenKind::Subscription => OperationType::Subscription,
                _ => OperationType::Query,
            };
            self.advance();

            let name = if self.at().is_name() {
                Some(self.parse_name())
            } else {
                None
            };

            (op, name)
        };

        let variables = if self.eat(TokenKind::LParen) {
            self.parse_variable_definitions()
        } else {
            Vec::new()
        };

        let directives = self.parse_directives(false);
        let selection_set = self.parse_selection_set();

        let end = self.current.span.start;
        OperationDefinition {
            operation,
            name,
            variables,
            directives,
            selection_set,
            span: Span::new(start, end),
        }
    }

    /// Parses variable definitions up to and including `)`.
    fn parse_variable_definitions(&mut self) -> Vec<VariableDefinition<'a>> {
        let mut vars = Vec::new();
        while !self.at_kind(TokenKind::RParen) && !self.at_end() {
            vars.push(self.parse_variable_definition());
        }
        self.expect(TokenKind::RParen);
        vars
    }

    /// Parses a variable definition.
    fn parse_variable_definition(&mut self) -> VariableDefinition<'a> {
        let start = self.current.span.start;
        self.expect(TokenKind::Dollar);
        let name = self.parse_name();
        self.expect(TokenKind::Colon);
        let ty = self.parse_type();

        let default_value = if self.eat(TokenKind::Eq) {
            Some(self.parse_value(true))
        } else {
            None
        };

        let directives = self.parse_const_directives();

        let end = self.current.span.start;
        VariableDefinition {
            name,
            ty,
            default_value,
            directives,
            span: Span::new(start, end),
        }
    }

    /// Parses a fragment definition.
    fn parse_fragment_definition(&mut self) -> FragmentDefinition<'a> {
        let start = self.current.span.start;
        self.advance(); // fragment

        let name = self.parse_name();
        self.expect(TokenKind::On);
        let type_condition = self.parse_name();
        let directives = self.parse_directives(false);
        let selection_set = self.parse_selection_set();

        let end = self.current.span.start;
        FragmentDefinition {
            name,
            type_condition,
            directives,
            selection_set,
            span: Span::new(start, end),
        }
    }

    /// Parses a selection set.
    fn parse_selection_set(&mut self) -> SelectionSet<'a> {
        let start = self.current.span.start;
        self.expect(TokenKind::LBrace);

        let mut selections = Vec::new();
        while !self.at_kind(TokenKind::RBrace) && !self.at_end() {
            selections.push(self.parse_selection());
        }
        self.expect(TokenKind::RBrace);

        let end = self.current.span.start;
        SelectionSet {
            selections,
            span: Span::new(start, end),
        }
    }

    /// Parses a selection.
    fn parse_selection(&mut self) -> Selection<'a> {
        let start = self.current.span.start;
        if !self.eat(TokenKind::Spread) {
            return Selection::Field(self.parse_field_selection());
        }

        if self.at_kind(TokenKind::On) || self.at_kind(TokenKind::LBrace) || self.at_kind(TokenKind::At) {
            let type_condition = if self.eat(TokenKind::On) {
                Some(self.parse_name())
            } else {
                None
            };
            let directives = self.parse_directives(false);
            let selection_set = self.parse_selection_set();
            Selection::InlineFragment(InlineFragment {
                type_condition,
                directives,
                selection_set,
                span: Span::new(start, self.current.span.start),
            })
        } else {
            let name = self.parse_name();
            let directives = self.parse_directives(false);
            Selection::FragmentSpread(FragmentSpread {
                name,
                directives,
                span: Span::new(start, self.current.span.start),
            })
        }
    }

    /// Parses a field selection.
    fn parse_field_selection(&mut self) -> FieldSelection<'a> {
        let start = self.current.span.start;

        let first_name = self.parse_name();
        let (alias, name) = if self.eat(TokenKind::Colon) {
            (Some(first_name), self.parse_name())
        } else {
            (None, first_name)
        };

        let arguments = if self.eat(TokenKind::LParen) {
            self.parse_arguments(false)
        } else {
            Vec::new()
        };

        let directives = self.parse_directives(false);

        let selection_set = if self.at_kind(TokenKind::LBrace) {
            Some(self.parse_selection_set())
        } else {
            None
        };

        let end = self.current.span.start;
        FieldSelection {
            alias,
            name,
            arguments,
            directives,
            selection_set,
            span: Span::new(start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok<'a>(source: &'a str, interner: &'a Interner) -> Document<'a> {
        let result = parse(source, interner);
        assert!(
            !result.diagnostics.has_errors(),
            "unexpected errors: {:?}",
            result.diagnostics.iter().collect::<Vec<_>>()
        );
        result.document
    }

    fn first_error(source: &str) -> (String, &'static str) {
        let interner = Interner::new();
        let result = parse(source, &interner);
        let diag = result
            .diagnostics
            .first_error()
            .cloned()
            .expect("expected a syntax error");
        (diag.title, diag.code)
    }

    #[test]
    fn test_parse_simple_type() {
        let interner = Interner::new();
        let doc = parse_ok("type User { id: ID! name: String }", &interner);
        assert_eq!(doc.definitions.len(), 1);
        let Definition::Type(TypeDefinition::Object(object)) = &doc.definitions[0] else {
            panic!("expected object type");
        };
        assert!(interner.is(object.name.value, "User"));
        assert_eq!(object.fields.len(), 2);
        assert!(matches!(object.fields[0].ty, Type::NonNull(..)));
    }

    #[test]
    fn test_parse_list_types() {
        let interner = Interner::new();
        let doc = parse_ok("type Query { people: [Person!]! }", &interner);
        let Definition::Type(TypeDefinition::Object(object)) = &doc.definitions[0] else {
            panic!("expected object type");
        };
        let Type::NonNull(list, _) = &object.fields[0].ty else {
            panic!("expected non-null");
        };
        let Type::List(item, _) = list.as_ref() else {
            panic!("expected list");
        };
        assert!(matches!(item.as_ref(), Type::NonNull(..)));
        assert!(interner.is(object.fields[0].ty.named_type().name, "Person"));
    }

    #[test]
    fn test_parse_implements_and_union() {
        let interner = Interner::new();
        let doc = parse_ok(
            "interface Pet { name: String }\n\
             type Dog implements & Pet & Node { name: String }\n\
             union Animal = | Dog | Bird",
            &interner,
        );
        let Definition::Type(TypeDefinition::Object(dog)) = &doc.definitions[1] else {
            panic!("expected object type");
        };
        assert_eq!(dog.implements.len(), 2);
        let Definition::Type(TypeDefinition::Union(animal)) = &doc.definitions[2] else {
            panic!("expected union");
        };
        assert_eq!(animal.members.len(), 2);
    }

    #[test]
    fn test_parse_extensions() {
        let interner = Interner::new();
        let doc = parse_ok(
            "extend type Query { extra: Int }\nextend schema { mutation: Mutation }\nextend enum Color { RED }",
            &interner,
        );
        assert!(matches!(
            doc.definitions[0],
            Definition::TypeExtension(TypeDefinition::Object(_))
        ));
        assert!(matches!(doc.definitions[1], Definition::SchemaExtension(_)));
        assert!(matches!(
            doc.definitions[2],
            Definition::TypeExtension(TypeDefinition::Enum(_))
        ));
    }

    #[test]
    fn test_parse_defaults_are_decoded() {
        let interner = Interner::new();
        let doc = parse_ok(
            r#"input Filter { text: String = "a\nb" limit: Int = 3 tags: [String] = ["x"] }"#,
            &interner,
        );
        let Definition::Type(TypeDefinition::Input(input)) = &doc.definitions[0] else {
            panic!("expected input type");
        };
        assert!(matches!(
            &input.fields[0].default_value,
            Some(Value::String(s, _)) if s == "a\nb"
        ));
        assert!(matches!(input.fields[1].default_value, Some(Value::Int("3", _))));
        assert!(matches!(input.fields[2].default_value, Some(Value::List(..))));
    }

    #[test]
    fn test_parse_descriptions() {
        let interner = Interner::new();
        let doc = parse_ok(
            "\"\"\"\n  A person.\n\"\"\"\ntype Person {\n  \"The name\" name: String\n}",
            &interner,
        );
        let Definition::Type(TypeDefinition::Object(person)) = &doc.definitions[0] else {
            panic!("expected object type");
        };
        assert_eq!(person.description.as_ref().map(|d| d.value.as_str()), Some("A person."));
        assert_eq!(
            person.fields[0].description.as_ref().map(|d| d.value.as_str()),
            Some("The name")
        );
    }

    #[test]
    fn test_parse_directive_definition() {
        let interner = Interner::new();
        let doc = parse_ok(
            "directive @skipcodegen repeatable on | OBJECT | FIELD_DEFINITION",
            &interner,
        );
        let Definition::Directive(directive) = &doc.definitions[0] else {
            panic!("expected directive");
        };
        assert!(directive.repeatable);
        assert_eq!(
            directive.locations,
            vec![DirectiveLocation::Object, DirectiveLocation::FieldDefinition]
        );
    }

    #[test]
    fn test_parse_operation() {
        let interner = Interner::new();
        let doc = parse_ok(
            "query TestQuery($id: ID = \"1\") { people(id: $id) { firstname ... on Dog { name } } }",
            &interner,
        );
        let Definition::Operation(op) = &doc.definitions[0] else {
            panic!("expected operation");
        };
        assert_eq!(op.operation, OperationType::Query);
        assert_eq!(op.variables.len(), 1);
        let Selection::Field(people) = &op.selection_set.selections[0] else {
            panic!("expected field");
        };
        assert!(matches!(people.arguments[0].value, Value::Variable(_)));
        let inner = people.selection_set.as_ref().map(|s| s.selections.len());
        assert_eq!(inner, Some(2));
    }

    #[test]
    fn test_keywords_as_field_names() {
        let interner = Interner::new();
        let doc = parse_ok("type Query { type: String input(on: Int): Int }", &interner);
        let Definition::Type(TypeDefinition::Object(object)) = &doc.definitions[0] else {
            panic!("expected object type");
        };
        assert!(interner.is(object.fields[0].name.value, "type"));
    }

    #[test]
    fn test_error_missing_bracket() {
        let (title, code) = first_error("type Query { people: [Person }");
        assert_eq!(code, codes::UNEXPECTED_TOKEN);
        assert_eq!(title, "expected `]`, found `}`");
    }

    #[test]
    fn test_error_variable_in_default() {
        let (title, _) = first_error("type Query { people(limit: Int = $max): Int }");
        assert_eq!(title, "variables are not allowed in constant values");
    }

    #[test]
    fn test_error_unterminated_string() {
        let (_, code) = first_error("type Query { a(x: String = \"abc\n): Int }");
        assert_eq!(code, codes::UNTERMINATED_STRING);
    }

    #[test]
    fn test_error_invalid_escape() {
        let (_, code) = first_error(r#"type Query { a(x: String = "\q"): Int }"#);
        assert_eq!(code, codes::INVALID_ESCAPE);
    }

    #[test]
    fn test_error_unexpected_eof() {
        let (_, code) = first_error("type Query {");
        assert_eq!(code, codes::UNEXPECTED_EOF);
    }

    #[test]
    fn test_single_error_reported() {
        let interner = Interner::new();
        let result = parse("type { } type { }", &interner);
        assert_eq!(result.diagnostics.error_count(), 1);
    }

    #[test]
    fn test_unknown_directive_location_warns() {
        let interner = Interner::new();
        let result = parse("directive @x on OBJECT | SOMEWHERE", &interner);
        assert!(!result.diagnostics.has_errors());
        assert_eq!(result.diagnostics.warnings().count(), 1);
    }
}
