//! The recursive boolean filter language.
//!
//! A filter is a tree of `and` / `or` / `not` combinators over property
//! tests. Each property test names a selector and one predicate: equality,
//! set membership, or a definedness check. Filters are total: a selector
//! that does not parse, or whose scope does not address the candidate
//! entity, passes vacuously so that one bad clause cannot veto an entire
//! result set.

use curio_foundation::{Entity, Error, Value};
use serde::{Deserialize, Serialize};

use crate::path;
use crate::selector::Selector;

/// The property test at a filter leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// The addressed value exists and equals the operand.
    Eq(Value),
    /// The addressed value exists and equals one of the operands.
    In(Vec<Value>),
    /// The addressed value is absent. An explicit null is present, not
    /// absent. Presence is expressed by wrapping this in `not`.
    IsUndefined,
}

/// One node of a filter tree.
///
/// Deserialized from the wire shape `{"and": [...]}`, `{"or": [...]}`,
/// `{"not": {...}}`, or `{"prop": "...", "eq"/"in"/"undefined": ...}`.
/// A node naming no recognized combinator or predicate is rejected at
/// deserialization, before any evaluation starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConstraint", into = "RawConstraint")]
pub enum Constraint {
    /// Every child matches. An empty conjunction matches everything.
    And(Vec<Constraint>),
    /// At least one child matches. An empty disjunction matches nothing.
    Or(Vec<Constraint>),
    /// The child does not match.
    Not(Box<Constraint>),
    /// A predicate applied to the value a selector addresses.
    Prop {
        /// The raw selector string, parsed per candidate entity.
        selector: String,
        /// The test to run against the addressed value.
        predicate: Predicate,
    },
}

impl Constraint {
    /// Evaluates this filter against one candidate entity.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        match self {
            Self::And(children) => children.iter().all(|child| child.matches(entity)),
            Self::Or(children) => children.iter().any(|child| child.matches(entity)),
            Self::Not(child) => !child.matches(entity),
            Self::Prop {
                selector,
                predicate,
            } => match Selector::parse(selector) {
                Some(parsed) if parsed.scope.applies_to(entity) => {
                    predicate.matches(path::read(entity, &parsed.path))
                }
                // Out of scope or unparseable: vacuous pass.
                _ => true,
            },
        }
    }
}

impl Predicate {
    fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            Self::Eq(operand) => value == Some(operand),
            // Membership never matches an absent value.
            Self::In(operands) => value.is_some_and(|v| operands.contains(v)),
            Self::IsUndefined => value.is_none(),
        }
    }
}

/// Retains the entities a filter matches, preserving input order.
#[must_use]
pub fn filter_entities(constraint: &Constraint, entities: Vec<Entity>) -> Vec<Entity> {
    entities
        .into_iter()
        .filter(|entity| constraint.matches(entity))
        .collect()
}

/// The wire shape of a constraint node: all operators optional, resolved
/// by precedence in `TryFrom`.
#[derive(Serialize, Deserialize)]
struct RawConstraint {
    #[serde(skip_serializing_if = "Option::is_none")]
    and: Option<Vec<Constraint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    or: Option<Vec<Constraint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    not: Option<Box<Constraint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eq: Option<Value>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    any_of: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    undefined: Option<bool>,
}

impl TryFrom<RawConstraint> for Constraint {
    type Error = Error;

    // Combinators take precedence over property tests; among predicates,
    // eq wins over in, which wins over undefined.
    fn try_from(raw: RawConstraint) -> Result<Self, Error> {
        if let Some(children) = raw.and {
            return Ok(Self::And(children));
        }
        if let Some(children) = raw.or {
            return Ok(Self::Or(children));
        }
        if let Some(child) = raw.not {
            return Ok(Self::Not(child));
        }
        if let Some(selector) = raw.prop {
            // `undefined: false` counts as naming no predicate at all.
            let predicate = if let Some(operand) = raw.eq {
                Predicate::Eq(operand)
            } else if let Some(operands) = raw.any_of {
                Predicate::In(operands)
            } else if raw.undefined == Some(true) {
                Predicate::IsUndefined
            } else {
                return Err(Error::invalid_constraint(format!(
                    "property test on {selector:?} names no predicate"
                )));
            };
            return Ok(Self::Prop {
                selector,
                predicate,
            });
        }
        Err(Error::invalid_constraint(
            "node names no combinator or property test",
        ))
    }
}

impl From<Constraint> for RawConstraint {
    fn from(constraint: Constraint) -> Self {
        let mut raw = Self {
            and: None,
            or: None,
            not: None,
            prop: None,
            eq: None,
            any_of: None,
            undefined: None,
        };
        match constraint {
            Constraint::And(children) => raw.and = Some(children),
            Constraint::Or(children) => raw.or = Some(children),
            Constraint::Not(child) => raw.not = Some(child),
            Constraint::Prop {
                selector,
                predicate,
            } => {
                raw.prop = Some(selector);
                match predicate {
                    Predicate::Eq(operand) => raw.eq = Some(operand),
                    Predicate::In(operands) => raw.any_of = Some(operands),
                    Predicate::IsUndefined => raw.undefined = Some(true),
                }
            }
        }
        raw
    }
}
