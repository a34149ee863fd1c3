//! Path query AST.

/// Selector types supported by the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Member access: `.name`, `.'a b'`, `['key']`
    Name(String),
    /// Array element access: `[0]`, `[-1]`
    Index(isize),
    /// Every child of an array or object: `.*`, `[*]`
    Wildcard,
}

impl Selector {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Selector::Wildcard)
    }
}

/// Parsed path query.
///
/// Each step applies one selector to every node produced by the previous
/// step, starting from the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath {
    pub selectors: Vec<Selector>,
}

impl JsonPath {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    /// The root query `$`.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}
