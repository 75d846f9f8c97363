//! The Base64 document grammar.
//!
//! One grammar definition serves both action strategies; the strategy only
//! decides which rules are decorated with an action.

use super::symbol::{PAD, SYMBOLS_2BIT, SYMBOLS_4BIT, WHITESPACE};
use crate::diagnostics::ActionError;
use crate::grammar::*;
use crate::value::Value;

/// Actions attached to the named rules of the grammar. `None` leaves a rule's
/// raw value in the tree.
#[derive(Debug, Clone, Copy)]
pub struct RuleActions {
    /// Applied to every symbol position, including the restricted ones.
    pub bsfdig: Option<Action>,
    pub equals: Option<Action>,
    pub base64_3: Option<Action>,
    pub base64_2: Option<Action>,
    pub base64_1: Option<Action>,
    pub base64: Action,
    pub document: Action,
}

/// Builds the `document` rule with the given actions.
pub fn document(actions: &RuleActions) -> Rule {
    // CORE
    let digit = ch_range(b'0', b'9');
    let alpha = choice([ch_range(b'A', b'Z'), ch_range(b'a', b'z')]);
    let space = in_set(WHITESPACE);

    // AUX.
    let plus = ch(b'+');
    let slash = ch(b'/');
    let equals = decorate(ch(PAD), actions.equals);

    let bsfdig = decorate(choice([alpha, digit, plus, slash]), actions.bsfdig);
    let bsfdig_4bit = decorate(in_set(SYMBOLS_4BIT), actions.bsfdig);
    let bsfdig_2bit = decorate(in_set(SYMBOLS_2BIT), actions.bsfdig);

    let base64_3 = decorate(repeat_n(4, bsfdig.clone()), actions.base64_3);
    let base64_2 = decorate(
        sequence([bsfdig.clone(), bsfdig.clone(), bsfdig_4bit, equals.clone()]),
        actions.base64_2,
    );
    let base64_1 = decorate(
        sequence([bsfdig, bsfdig_2bit, equals.clone(), equals]),
        actions.base64_1,
    );
    let base64 = action(
        sequence([many(base64_3), optional(choice([base64_2, base64_1]))]),
        actions.base64,
    );

    let ws = ignore(many(space));
    action(sequence([ws.clone(), base64, ws, end_p()]), actions.document)
}

/// Selects the payload out of `(ws, base64, ws, end)`.
pub fn act_document(p: Value) -> Result<Value, ActionError> {
    match p {
        Value::Seq(items) if items.len() == 4 => {
            Ok(items.into_iter().nth(1).unwrap_or_default())
        }
        other => Err(ActionError::shape("document", "Seq of four", &other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_is_anchored_sequence() {
        let doc = document(&crate::base64::fine::ACTIONS);
        let Node::Action(inner, act) = &*doc else {
            panic!("document should carry an action");
        };
        assert_eq!(act.name, "document");
        let Node::Sequence(items) = &**inner else {
            panic!("document body should be a sequence");
        };
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].kind(), "Ignore");
        assert_eq!(items[3].kind(), "EndOfInput");
    }

    #[test]
    fn coarse_grammar_has_no_symbol_actions() {
        let doc = document(&crate::base64::coarse::ACTIONS);
        assert_eq!(count_actions(&doc), 2);
        let doc = document(&crate::base64::fine::ACTIONS);
        // bsfdig (shared node, counted per reference), restricted symbols,
        // equals, three groups, base64, document.
        assert!(count_actions(&doc) > 2);
    }

    fn count_actions(node: &Node) -> usize {
        match node {
            Node::Action(inner, _) => 1 + count_actions(inner),
            Node::Choice(xs) | Node::Sequence(xs) => xs.iter().map(|x| count_actions(x)).sum(),
            Node::Many(x) | Node::RepeatExactly(_, x) | Node::Optional(x) | Node::Ignore(x) => {
                count_actions(x)
            }
            _ => 0,
        }
    }

    #[test]
    fn document_action_picks_payload() {
        let p = Value::Seq(vec![Value::Unit, Value::from_bytes(b"ok"), Value::Unit, Value::Unit]);
        assert_eq!(act_document(p), Ok(Value::from_bytes(b"ok")));
        assert!(act_document(Value::Unit).is_err());
    }
}
