//! Java source building blocks: type names, imports and an indenting writer.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Java primitive types produced by the scalar mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Long,
    Double,
    Boolean,
}

impl Primitive {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::Boolean => "boolean",
        }
    }

    /// The wrapper class in `java.lang`.
    #[must_use]
    pub const fn boxed(self) -> &'static str {
        match self {
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "double" => Some(Self::Double),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    fn from_boxed(simple: &str) -> Option<Self> {
        match simple {
            "Integer" => Some(Self::Int),
            "Long" => Some(Self::Long),
            "Double" => Some(Self::Double),
            "Boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// A Java type as it appears in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Primitive(Primitive),
    Class {
        package: String,
        simple: String,
    },
    /// `List<T>`, or `List<? extends T>` when `wildcard` is set.
    List {
        item: Box<JavaType>,
        wildcard: bool,
    },
    /// A mapped type with type arguments, written as configured.
    Raw(String),
}

impl JavaType {
    #[must_use]
    pub fn class(package: impl Into<String>, simple: impl Into<String>) -> Self {
        Self::Class {
            package: package.into(),
            simple: simple.into(),
        }
    }

    #[must_use]
    pub fn string() -> Self {
        Self::class("java.lang", "String")
    }

    #[must_use]
    pub fn object() -> Self {
        Self::class("java.lang", "Object")
    }

    /// Parses a configured mapping such as `java.time.LocalDate`, `long` or
    /// `java.util.Map<String, Object>`.
    #[must_use]
    pub fn parse_mapped(mapped: &str) -> Self {
        let mapped = mapped.trim();
        if let Some(primitive) = Primitive::from_keyword(mapped) {
            return Self::Primitive(primitive);
        }
        if mapped.contains('<') {
            return Self::Raw(mapped.to_string());
        }
        match mapped.rsplit_once('.') {
            Some((package, simple)) => Self::class(package, simple),
            None => Self::class("", mapped),
        }
    }

    /// The wrapper type for primitives; other types are unchanged.
    #[must_use]
    pub fn boxed(self) -> Self {
        match self {
            Self::Primitive(p) => Self::class("java.lang", p.boxed()),
            other => other,
        }
    }

    /// The primitive for `java.lang` wrappers; other types are unchanged.
    #[must_use]
    pub fn unboxed(self) -> Self {
        match self.primitive_kind() {
            Some(p) if !self.is_primitive() => Self::Primitive(p),
            _ => self,
        }
    }

    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// The primitive kind of this type, boxed or not.
    #[must_use]
    pub fn primitive_kind(&self) -> Option<Primitive> {
        match self {
            Self::Primitive(p) => Some(*p),
            Self::Class { package, simple } if package == "java.lang" => {
                Primitive::from_boxed(simple)
            }
            _ => None,
        }
    }

    /// Whether this is the class `package.simple`.
    #[must_use]
    pub fn is_class(&self, qualified: &str) -> bool {
        match self {
            Self::Class { package, simple } => qualified
                .rsplit_once('.')
                .is_some_and(|(p, s)| p == package && s == simple),
            _ => false,
        }
    }

    /// Renders the type, registering imports.
    pub fn render(&self, imports: &mut Imports) -> String {
        match self {
            Self::Primitive(p) => p.keyword().to_string(),
            Self::Class { package, simple } => imports.name(package, simple),
            Self::List { item, wildcard } => {
                let list = imports.name("java.util", "List");
                let item = item.render(imports);
                if *wildcard {
                    format!("{list}<? extends {item}>")
                } else {
                    format!("{list}<{item}>")
                }
            }
            Self::Raw(text) => text.clone(),
        }
    }
}

/// Import set of one compilation unit.
///
/// A simple name refers to the first class that claims it; later classes
/// with the same simple name are written fully qualified.
#[derive(Debug)]
pub struct Imports {
    package: String,
    claimed: FxHashMap<String, String>,
    imports: BTreeSet<String>,
}

impl Imports {
    /// Creates the import set for a unit declaring `class` in `package`.
    pub fn new(package: impl Into<String>, class: &str) -> Self {
        let package = package.into();
        let mut claimed = FxHashMap::default();
        claimed.insert(class.to_string(), qualify(&package, class));
        Self {
            package,
            claimed,
            imports: BTreeSet::new(),
        }
    }

    /// Returns the name to write for `package.simple`.
    pub fn name(&mut self, package: &str, simple: &str) -> String {
        let qualified = qualify(package, simple);
        match self.claimed.get(simple) {
            Some(existing) if *existing == qualified => {}
            Some(_) => return qualified,
            None => {
                self.claimed.insert(simple.to_string(), qualified.clone());
            }
        }
        if !package.is_empty() && package != "java.lang" && package != self.package {
            self.imports.insert(qualified);
        }
        simple.to_string()
    }

    /// Returns the name to write for a fully qualified class.
    pub fn qualified(&mut self, qualified: &str) -> String {
        match qualified.rsplit_once('.') {
            Some((package, simple)) => self.name(package, simple),
            None => qualified.to_string(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }
}

fn qualify(package: &str, simple: &str) -> String {
    if package.is_empty() {
        simple.to_string()
    } else {
        format!("{package}.{simple}")
    }
}

/// Indenting writer for one Java compilation unit.
pub struct JavaWriter {
    package: String,
    imports: Imports,
    output: String,
    indent: usize,
}

impl JavaWriter {
    const INDENT: &'static str = "  ";

    /// Creates a writer for `class` in `package`.
    pub fn new(package: impl Into<String>, class: &str) -> Self {
        let package = package.into();
        Self {
            imports: Imports::new(package.clone(), class),
            package,
            output: String::new(),
            indent: 0,
        }
    }

    pub fn imports(&mut self) -> &mut Imports {
        &mut self.imports
    }

    /// Renders a type through this unit's imports.
    pub fn ty(&mut self, ty: &JavaType) -> String {
        ty.render(&mut self.imports)
    }

    /// Returns the name to write for a fully qualified class.
    pub fn class(&mut self, qualified: &str) -> String {
        self.imports.qualified(qualified)
    }

    /// Writes one indented line.
    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str(Self::INDENT);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    pub fn blank(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with("{\n") && !self.output.ends_with("\n\n") {
            self.output.push('\n');
        }
    }

    /// Writes `header {` and indents.
    pub fn open(&mut self, header: &str) {
        self.line(&format!("{header} {{"));
        self.indent += 1;
    }

    /// Dedents and writes `}`.
    pub fn close(&mut self) {
        self.close_with("}");
    }

    /// Dedents and writes a closing line such as `});`.
    pub fn close_with(&mut self, text: &str) {
        self.indent = self.indent.saturating_sub(1);
        if self.output.ends_with("\n\n") {
            self.output.pop();
        }
        self.line(text);
    }

    /// Dedents, writes a line such as `} else {` and indents again.
    pub fn next_block(&mut self, text: &str) {
        self.close_with(text);
        self.indent += 1;
    }

    /// Writes a Javadoc block.
    pub fn javadoc(&mut self, text: &str) {
        self.line("/**");
        for line in text.lines() {
            let line = line.trim_end().replace("*/", "*&#47;");
            if line.is_empty() {
                self.line(" *");
            } else {
                self.line(&format!(" * {line}"));
            }
        }
        self.line(" */");
    }

    /// Assembles the compilation unit.
    #[must_use]
    pub fn finish(self) -> String {
        let mut source = String::with_capacity(self.output.len() + 256);
        if !self.package.is_empty() {
            source.push_str("package ");
            source.push_str(&self.package);
            source.push_str(";\n\n");
        }
        let mut any = false;
        for import in self.imports.iter() {
            source.push_str("import ");
            source.push_str(import);
            source.push_str(";\n");
            any = true;
        }
        if any {
            source.push('\n');
        }
        source.push_str(&self.output);
        source
    }
}

/// A Java string literal.
#[must_use]
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Relative source path of a class, e.g. `com/example/types/Person.java`.
#[must_use]
pub fn source_path(package: &str, class: &str) -> String {
    if package.is_empty() {
        format!("{class}.java")
    } else {
        format!("{}/{class}.java", package.replace('.', "/"))
    }
}
