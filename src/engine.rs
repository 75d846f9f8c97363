//! Backtracking matcher for grammar trees.
//!
//! Each node is evaluated against an immutable input at a cursor offset and
//! yields a [`Match`]. Backtracking is plain call/return: a failed choice
//! alternative returns `Failure` and the next one is tried at the same offset.
//! `Many` and `RepeatExactly` run as loops, so stack depth follows the grammar's
//! nesting depth and not the length of the input.

use std::collections::BTreeSet;

use crate::diagnostics::{ActionError, DecodeError};
use crate::grammar::Node;
use crate::value::Value;

// ============================================================================
// MATCH RESULT
// ============================================================================

/// Outcome of matching one node at one offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    Success { consumed: usize, value: Value },
    Failure,
}

impl Match {
    pub fn success(consumed: usize, value: Value) -> Self {
        Match::Success { consumed, value }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Match::Success { .. })
    }

    pub fn consumed(&self) -> Option<usize> {
        match self {
            Match::Success { consumed, .. } => Some(*consumed),
            Match::Failure => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Match::Success { value, .. } => Some(value),
            Match::Failure => None,
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Matches `node` against `input` starting at `offset`.
///
/// Leftover input after the match is not an error here; see [`parse`].
pub fn match_at(node: &Node, input: &[u8], offset: usize) -> Result<Match, ActionError> {
    Matcher::new(input).run(node, offset)
}

/// Parses the whole of `input` with `node` and returns the produced value.
///
/// A match that stops short of the end of the input is rejected.
pub fn parse(node: &Node, input: &[u8]) -> Result<Value, DecodeError> {
    let mut matcher = Matcher::new(input);
    match matcher.run(node, 0)? {
        Match::Success { consumed, value } if consumed == input.len() => {
            log::debug!("parsed {} bytes with {}", consumed, node.kind());
            Ok(value)
        }
        Match::Success { consumed, .. } => {
            log::debug!("match stopped at {} of {} bytes", consumed, input.len());
            matcher.trail.record(consumed, &Node::EndOfInput);
            Err(matcher.reject())
        }
        Match::Failure => {
            log::debug!("no match, furthest failure at {}", matcher.trail.offset);
            Err(matcher.reject())
        }
    }
}

// ============================================================================
// MATCHER
// ============================================================================

/// Furthest point any primitive failed at, and what it wanted there.
#[derive(Debug, Default)]
struct FailureTrail {
    offset: usize,
    expected: BTreeSet<String>,
}

impl FailureTrail {
    fn record(&mut self, offset: usize, node: &Node) {
        if offset > self.offset {
            self.offset = offset;
            self.expected.clear();
        }
        if offset == self.offset {
            self.expected.insert(node.describe());
        }
    }
}

/// Per-call matching state: the input and the failure trail.
struct Matcher<'i> {
    input: &'i [u8],
    trail: FailureTrail,
}

impl<'i> Matcher<'i> {
    fn new(input: &'i [u8]) -> Self {
        Self {
            input,
            trail: FailureTrail::default(),
        }
    }

    fn reject(self) -> DecodeError {
        let expected = self.trail.expected.into_iter().collect();
        DecodeError::rejected(self.input, self.trail.offset, expected)
    }

    fn run(&mut self, node: &Node, pos: usize) -> Result<Match, ActionError> {
        match node {
            Node::ByteLiteral(c) => Ok(self.single(node, pos, |b| b == *c)),
            Node::ByteRange(lo, hi) => Ok(self.single(node, pos, |b| (*lo..=*hi).contains(&b))),
            Node::ByteSet(set) => Ok(self.single(node, pos, |b| set.contains(b))),

            Node::EndOfInput => {
                if pos == self.input.len() {
                    Ok(Match::success(0, Value::Unit))
                } else {
                    self.trail.record(pos, node);
                    Ok(Match::Failure)
                }
            }

            Node::Choice(alternatives) => {
                for (i, alt) in alternatives.iter().enumerate() {
                    let outcome = self.run(alt, pos)?;
                    if outcome.is_success() {
                        log::trace!("choice at {}: alternative {} matched", pos, i);
                        return Ok(outcome);
                    }
                }
                Ok(Match::Failure)
            }

            Node::Sequence(items) => {
                let mut consumed = 0;
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match self.run(item, pos + consumed)? {
                        Match::Success { consumed: n, value } => {
                            consumed += n;
                            values.push(value);
                        }
                        Match::Failure => return Ok(Match::Failure),
                    }
                }
                Ok(Match::success(consumed, Value::Seq(values)))
            }

            Node::Many(inner) => {
                let mut consumed = 0;
                let mut values = Vec::new();
                loop {
                    match self.run(inner, pos + consumed)? {
                        Match::Success { consumed: n, value } => {
                            values.push(value);
                            // A zero-width repetition would match forever.
                            if n == 0 {
                                break;
                            }
                            consumed += n;
                        }
                        Match::Failure => break,
                    }
                }
                Ok(Match::success(consumed, Value::Seq(values)))
            }

            Node::RepeatExactly(count, inner) => {
                let mut consumed = 0;
                let mut values = Vec::with_capacity(*count);
                for _ in 0..*count {
                    match self.run(inner, pos + consumed)? {
                        Match::Success { consumed: n, value } => {
                            consumed += n;
                            values.push(value);
                        }
                        Match::Failure => return Ok(Match::Failure),
                    }
                }
                Ok(Match::success(consumed, Value::Seq(values)))
            }

            Node::Optional(inner) => match self.run(inner, pos)? {
                Match::Failure => Ok(Match::success(0, Value::Unit)),
                outcome => Ok(outcome),
            },

            Node::Ignore(inner) => match self.run(inner, pos)? {
                Match::Success { consumed, .. } => Ok(Match::success(consumed, Value::Unit)),
                Match::Failure => Ok(Match::Failure),
            },

            Node::Action(inner, action) => match self.run(inner, pos)? {
                Match::Success { consumed, value } => {
                    log::trace!("action {} on {}..{}", action.name, pos, pos + consumed);
                    let value = (action.apply)(value)?;
                    Ok(Match::success(consumed, value))
                }
                Match::Failure => Ok(Match::Failure),
            },
        }
    }

    fn single(&mut self, node: &Node, pos: usize, accept: impl FnOnce(u8) -> bool) -> Match {
        match self.input.get(pos) {
            Some(&b) if accept(b) => Match::success(1, Value::Byte(b)),
            _ => {
                self.trail.record(pos, node);
                Match::Failure
            }
        }
    }
}
