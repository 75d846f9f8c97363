//! Coarse-grained action: one transform over the whole raw tree.
//!
//! Only the top `base64` rule carries an action. It receives nested tuples of
//! raw symbol bytes (and raw `=` bytes in the tail) and does symbol decoding
//! and byte reconstruction in a single pass.

use super::rules::{act_document, RuleActions};
use super::symbol::{symbol_value, PAD};
use crate::diagnostics::ActionError;
use crate::grammar::Action;
use crate::value::Value;

pub static ACTIONS: RuleActions = RuleActions {
    bsfdig: None,
    equals: None,
    base64_3: None,
    base64_2: None,
    base64_1: None,
    base64: Action { name: "base64", apply: act_base64 },
    document: Action { name: "document", apply: act_document },
};

/// Which short group, if any, ends the payload.
enum Tail<'a> {
    None,
    TwoBytes(&'a [Value]),
    OneByte(&'a [Value]),
}

pub fn act_base64(p: Value) -> Result<Value, ActionError> {
    let items = match &p {
        Value::Seq(items) if items.len() == 2 => items,
        other => return Err(ActionError::shape("base64", "Seq of two", other)),
    };
    let quads = match &items[0] {
        Value::Seq(quads) => quads,
        other => return Err(ActionError::shape("base64", "Seq", other)),
    };

    // A sym,sym,=,= group has its third element raw '='.
    let tail = match &items[1] {
        Value::Unit => Tail::None,
        Value::Seq(digits) if digits.len() == 4 => {
            if digits[2] == Value::Byte(PAD) {
                Tail::OneByte(digits)
            } else {
                Tail::TwoBytes(digits)
            }
        }
        other => return Err(ActionError::shape("base64", "Seq of four", other)),
    };

    let mut res = Vec::with_capacity(quads.len() * 3 + 2);

    for quad in quads {
        let digits = match quad {
            Value::Seq(digits) if digits.len() == 4 => digits,
            other => return Err(ActionError::shape("base64", "Seq of four", other)),
        };
        let mut x = digit(&digits[0])?;
        x = (x << 6) | digit(&digits[1])?;
        x = (x << 6) | digit(&digits[2])?;
        x = (x << 6) | digit(&digits[3])?;
        res.push(((x >> 16) & 0xff) as u8);
        res.push(((x >> 8) & 0xff) as u8);
        res.push((x & 0xff) as u8);
    }

    match tail {
        Tail::TwoBytes(digits) => {
            let mut x = digit(&digits[0])?;
            x = (x << 6) | digit(&digits[1])?;
            x = (x << 6) | digit(&digits[2])?;
            res.push(((x >> 10) & 0xff) as u8);
            res.push(((x >> 2) & 0xff) as u8);
        }
        Tail::OneByte(digits) => {
            let mut x = digit(&digits[0])?;
            x = (x << 6) | digit(&digits[1])?;
            res.push(((x >> 4) & 0xff) as u8);
        }
        Tail::None => {}
    }

    Ok(Value::from_bytes(&res))
}

/// Numeric value of a raw symbol.
fn digit(v: &Value) -> Result<u32, ActionError> {
    match v {
        Value::Byte(c) => symbol_value(*c)
            .map(u32::from)
            .ok_or(ActionError::InvalidSymbol { byte: *c }),
        other => Err(ActionError::shape("base64", "Byte", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(s: &[u8]) -> Value {
        Value::from_bytes(s)
    }

    #[test]
    fn decodes_groups_and_two_byte_tail() {
        let p = Value::Seq(vec![Value::Seq(vec![raw(b"SGVs"), raw(b"bG8h")]), raw(b"SGk=")]);
        assert_eq!(act_base64(p), Ok(raw(b"Hello!Hi")));
    }

    #[test]
    fn one_byte_tail_is_detected_by_third_pad() {
        let p = Value::Seq(vec![Value::Seq(vec![]), raw(b"QQ==")]);
        assert_eq!(act_base64(p), Ok(raw(b"A")));
    }

    #[test]
    fn no_tail_and_no_groups_is_empty() {
        let p = Value::Seq(vec![Value::Seq(vec![]), Value::Unit]);
        assert_eq!(act_base64(p), Ok(Value::Seq(vec![])));
    }

    #[test]
    fn pad_in_full_group_is_a_logic_error() {
        let p = Value::Seq(vec![Value::Seq(vec![raw(b"QQ==")]), Value::Unit]);
        assert_eq!(
            act_base64(p),
            Err(ActionError::InvalidSymbol { byte: b'=' })
        );
    }
}
