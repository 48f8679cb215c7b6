//! String interning for schema names.

use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// An interned text identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Text(u32);

impl Text {
    /// Creates a new text from a raw index.
    #[must_use]
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

/// Names every schema document mentions; interned up front so their ids are stable.
const PREDEFINED: &[&str] = &[
    "Int",
    "Float",
    "String",
    "Boolean",
    "ID",
    "Query",
    "Mutation",
    "Subscription",
    "__typename",
    "skipcodegen",
    "deprecated",
    "reason",
];

/// A string interner that deduplicates names seen while parsing one source.
///
/// The interner lives only as long as a parse; the schema graph copies names out
/// into owned strings so it can be shared across emitter threads.
#[derive(Debug)]
pub struct Interner {
    map: RefCell<FxHashMap<String, Text>>,
    strings: RefCell<Vec<String>>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    /// Creates a new interner with the predefined names registered.
    #[must_use]
    pub fn new() -> Self {
        let interner = Self {
            map: RefCell::new(FxHashMap::default()),
            strings: RefCell::new(Vec::new()),
        };
        for name in PREDEFINED {
            interner.intern(name);
        }
        interner
    }

    /// Interns a string, returning its identifier.
    pub fn intern(&self, s: &str) -> Text {
        if let Some(&id) = self.map.borrow().get(s) {
            return id;
        }

        let mut strings = self.strings.borrow_mut();
        let id = Text(strings.len() as u32);
        strings.push(s.to_string());
        self.map.borrow_mut().insert(s.to_string(), id);
        id
    }

    /// Gets the string for an identifier.
    #[must_use]
    pub fn get(&self, id: Text) -> String {
        self.strings
            .borrow()
            .get(id.0 as usize)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns true if the identifier refers to the given string.
    #[must_use]
    pub fn is(&self, id: Text, s: &str) -> bool {
        self.strings
            .borrow()
            .get(id.0 as usize)
            .is_some_and(|stored| stored == s)
    }

    /// Returns the number of interned strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.borrow().len()
    }

    /// Returns true if no strings are interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.borrow().is_empty()
    }
}
