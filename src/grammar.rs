//! Grammar nodes and the combinator vocabulary used to build them.
//!
//! A grammar is a tree of [`Node`]s. Children are held behind [`Rule`]
//! (`Arc<Node>`), so a sub-rule can be shared by several parents and a built
//! grammar can be stored in a process-wide static. Nodes are immutable once
//! constructed.
//!
//! ```rust
//! use sextet::grammar::{ch, ch_range, choice, end_p, many, sequence};
//! let digit = ch_range(b'0', b'9');
//! let number = sequence([many(digit), choice([ch(b'.'), end_p()])]);
//! assert_eq!(number.kind(), "Sequence");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::ActionError;
use crate::value::Value;

/// Shared handle to a grammar node.
pub type Rule = Arc<Node>;

/// A semantic transform. Receives the value a rule matched and returns the
/// value that replaces it in the parse tree.
pub type ActionFn = fn(Value) -> Result<Value, ActionError>;

/// A named semantic transform attached to a rule.
#[derive(Debug, Clone, Copy)]
pub struct Action {
    pub name: &'static str,
    pub apply: ActionFn,
}

impl Action {
    pub fn new(name: &'static str, apply: ActionFn) -> Self {
        Self { name, apply }
    }
}

/// Membership table over all 256 byte values.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteSet([u64; 4]);

impl ByteSet {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut set = Self::default();
        for &b in bytes {
            set.insert(b);
        }
        set
    }

    pub fn insert(&mut self, b: u8) {
        self.0[usize::from(b >> 6)] |= 1u64 << (b & 63);
    }

    #[inline]
    pub fn contains(&self, b: u8) -> bool {
        self.0[usize::from(b >> 6)] >> (b & 63) & 1 == 1
    }

    /// Members in ascending order.
    pub fn members(&self) -> Vec<u8> {
        (0..=u8::MAX).filter(|&b| self.contains(b)).collect()
    }
}

impl fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteSet(\"{}\")", self.members().escape_ascii())
    }
}

/// The grammar node type.
#[derive(Debug, Clone)]
pub enum Node {
    /// Matches one byte equal to the literal.
    ByteLiteral(u8),
    /// Matches one byte in the inclusive range `lo..=hi`.
    ByteRange(u8, u8),
    /// Matches one byte that is a member of the set.
    ByteSet(ByteSet),
    /// Ordered choice: the first alternative that matches wins.
    Choice(Vec<Rule>),
    /// All children must match, in order.
    Sequence(Vec<Rule>),
    /// Zero or more greedy repetitions.
    Many(Rule),
    /// Exactly `n` repetitions.
    RepeatExactly(usize, Rule),
    /// Matches the inner rule or nothing.
    Optional(Rule),
    /// Matches only at the end of the input.
    EndOfInput,
    /// Replaces the inner rule's value with the action's result.
    Action(Rule, Action),
    /// Consumes what the inner rule matches but yields `Unit`.
    Ignore(Rule),
}

impl Node {
    /// Variant name, for logs and assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::ByteLiteral(_) => "ByteLiteral",
            Node::ByteRange(..) => "ByteRange",
            Node::ByteSet(_) => "ByteSet",
            Node::Choice(_) => "Choice",
            Node::Sequence(_) => "Sequence",
            Node::Many(_) => "Many",
            Node::RepeatExactly(..) => "RepeatExactly",
            Node::Optional(_) => "Optional",
            Node::EndOfInput => "EndOfInput",
            Node::Action(..) => "Action",
            Node::Ignore(_) => "Ignore",
        }
    }

    /// Human-readable description of what a primitive expects. Composite
    /// nodes describe themselves by kind.
    pub fn describe(&self) -> String {
        match self {
            Node::ByteLiteral(c) => format!("'{}'", c.escape_ascii()),
            Node::ByteRange(lo, hi) => {
                format!("'{}'..='{}'", lo.escape_ascii(), hi.escape_ascii())
            }
            Node::ByteSet(set) => format!("one of \"{}\"", set.members().escape_ascii()),
            Node::EndOfInput => "end of input".to_string(),
            Node::Action(_, action) => format!("<{}>", action.name),
            other => other.kind().to_string(),
        }
    }
}

// ============================================================================
// PRIMITIVES
// ============================================================================

pub fn ch(c: u8) -> Rule {
    Arc::new(Node::ByteLiteral(c))
}

pub fn ch_range(lo: u8, hi: u8) -> Rule {
    Arc::new(Node::ByteRange(lo, hi))
}

pub fn in_set(bytes: &[u8]) -> Rule {
    Arc::new(Node::ByteSet(ByteSet::from_bytes(bytes)))
}

pub fn end_p() -> Rule {
    Arc::new(Node::EndOfInput)
}

// ============================================================================
// COMBINATORS
// ============================================================================

pub fn choice(alternatives: impl IntoIterator<Item = Rule>) -> Rule {
    Arc::new(Node::Choice(alternatives.into_iter().collect()))
}

pub fn sequence(items: impl IntoIterator<Item = Rule>) -> Rule {
    Arc::new(Node::Sequence(items.into_iter().collect()))
}

pub fn many(rule: Rule) -> Rule {
    Arc::new(Node::Many(rule))
}

pub fn repeat_n(n: usize, rule: Rule) -> Rule {
    Arc::new(Node::RepeatExactly(n, rule))
}

pub fn optional(rule: Rule) -> Rule {
    Arc::new(Node::Optional(rule))
}

pub fn action(rule: Rule, action: Action) -> Rule {
    Arc::new(Node::Action(rule, action))
}

pub fn ignore(rule: Rule) -> Rule {
    Arc::new(Node::Ignore(rule))
}

/// Wraps `rule` in an action when one is given, otherwise returns it as is.
pub fn decorate(rule: Rule, act: Option<Action>) -> Rule {
    match act {
        Some(act) => action(rule, act),
        None => rule,
    }
}
