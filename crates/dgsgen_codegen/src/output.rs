//! Generated artifacts.

use std::fmt;

/// The category of a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    DataType,
    Interface,
    Enum,
    Constants,
    Query,
    Projection,
    Representation,
    Datafetcher,
}

impl FileKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataType => "data type",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Constants => "constants",
            Self::Query => "query",
            Self::Projection => "projection",
            Self::Representation => "representation",
            Self::Datafetcher => "datafetcher",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root, e.g. `com/example/types/Person.java`.
    pub path: String,
    pub kind: FileKind,
    pub class_name: String,
    pub source: String,
}

/// Everything a run produced, sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeGenOutput {
    pub files: Vec<GeneratedFile>,
}

impl CodeGenOutput {
    /// Files of one kind, in path order.
    pub fn of_kind(&self, kind: FileKind) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter().filter(move |file| file.kind == kind)
    }

    /// Looks up a file by class name.
    #[must_use]
    pub fn class(&self, class_name: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.class_name == class_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
