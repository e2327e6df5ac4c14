//! Selector parsing: type/id scopes with dot-separated property paths.
//!
//! A selector addresses either every entity of a type (`[Cat].name`) or one
//! specific entity (`<19903040-1009>.owner.name`). The first dot-delimited
//! token is the scope; everything after it is the property path.

use std::fmt;

use curio_foundation::Entity;

/// The root an address resolves against: a type name or a specific entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    /// All entities whose `__type` equals the named type.
    Type(String),
    /// The single entity whose `__uuid` equals the token.
    Id(String),
}

impl Scope {
    /// Parses a scope segment.
    ///
    /// `[Name]` with a word-character name is a type scope. `<token>` with a
    /// token of digits and hyphens is an id scope; this is a syntactic check
    /// only, not a uuid format validation. Anything else is not addressable
    /// and yields `None`.
    #[must_use]
    pub fn parse(segment: &str) -> Option<Self> {
        if let Some(name) = segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Some(Self::Type(name.to_string()));
            }
            return None;
        }
        if let Some(token) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '-') {
                return Some(Self::Id(token.to_string()));
            }
        }
        None
    }

    /// Returns true if this scope addresses the given candidate entity.
    ///
    /// Type scopes match on `__type`, id scopes on `__uuid`. An entity
    /// missing the relevant reserved field matches nothing.
    #[must_use]
    pub fn applies_to(&self, entity: &Entity) -> bool {
        match self {
            Self::Type(name) => entity.type_name() == Some(name.as_str()),
            Self::Id(id) => entity.uuid() == Some(id.as_str()),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write!(f, "[{name}]"),
            Self::Id(id) => write!(f, "<{id}>"),
        }
    }
}

/// A parsed selector: a scope plus an ordered property path.
///
/// Constructed per operation from a selector string; never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    /// The scope the path resolves against.
    pub scope: Scope,
    /// Property path segments, outermost first. May be empty.
    pub path: Vec<String>,
}

impl Selector {
    /// Parses a full selector string.
    ///
    /// The scope segment is exactly the first dot-delimited token; the
    /// remaining tokens become the property path in order. Returns `None`
    /// when the leading segment is not a recognizable scope; callers must
    /// treat that as "no match", not as an error.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut segments = raw.split('.');
        let scope = Scope::parse(segments.next()?)?;
        Some(Self {
            scope,
            path: segments.map(String::from).collect(),
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scope)?;
        for segment in &self.path {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}
