//! Fine-grained actions: the tree is rewritten bottom-up as each rule completes.
//!
//! Symbols become 6-bit codes as soon as they match, groups become byte tuples
//! once their codes are in, and the top rule only has to concatenate tuples.
//! Padding `=` is discarded by its own action, so groups see `Unit` in those
//! positions.

use super::rules::{act_document, RuleActions};
use super::symbol::{pack_group, symbol_value};
use crate::diagnostics::ActionError;
use crate::grammar::Action;
use crate::value::Value;

pub static ACTIONS: RuleActions = RuleActions {
    bsfdig: Some(Action { name: "bsfdig", apply: act_bsfdig }),
    equals: Some(Action { name: "equals", apply: act_ignore }),
    base64_3: Some(Action { name: "base64_3", apply: act_base64_3 }),
    base64_2: Some(Action { name: "base64_2", apply: act_base64_2 }),
    base64_1: Some(Action { name: "base64_1", apply: act_base64_1 }),
    base64: Action { name: "base64", apply: act_base64 },
    document: Action { name: "document", apply: act_document },
};

/// Symbol byte to 6-bit code.
pub fn act_bsfdig(p: Value) -> Result<Value, ActionError> {
    match p {
        Value::Byte(c) => symbol_value(c)
            .map(Value::Byte)
            .ok_or(ActionError::InvalidSymbol { byte: c }),
        other => Err(ActionError::shape("bsfdig", "Byte", &other)),
    }
}

pub fn act_ignore(_: Value) -> Result<Value, ActionError> {
    Ok(Value::Unit)
}

pub fn act_base64_3(p: Value) -> Result<Value, ActionError> {
    base64_n::<3>("base64_3", p)
}

pub fn act_base64_2(p: Value) -> Result<Value, ActionError> {
    base64_n::<2>("base64_2", p)
}

pub fn act_base64_1(p: Value) -> Result<Value, ActionError> {
    base64_n::<1>("base64_1", p)
}

/// Turns a group of already converted codes into `N` bytes. Ignored padding
/// positions are `Unit` and count as zero.
fn base64_n<const N: usize>(name: &'static str, p: Value) -> Result<Value, ActionError> {
    let items = match p {
        Value::Seq(items) => items,
        other => return Err(ActionError::shape(name, "Seq", &other)),
    };
    let codes = items
        .iter()
        .map(|item| match item {
            Value::Byte(code) => Ok(*code),
            Value::Unit => Ok(0),
            other => Err(ActionError::shape(name, "Byte or Unit", other)),
        })
        .collect::<Result<Vec<u8>, _>>()?;
    Ok(Value::from_bytes(&pack_group::<N>(&codes)))
}

/// Concatenates the full groups and the optional short tail.
pub fn act_base64(p: Value) -> Result<Value, ActionError> {
    let mut items = match p {
        Value::Seq(items) if items.len() == 2 => items,
        other => return Err(ActionError::shape("base64", "Seq of two", &other)),
    };
    let tail = items.pop().unwrap_or_default();
    let groups = match items.pop().unwrap_or_default() {
        Value::Seq(groups) => groups,
        other => return Err(ActionError::shape("base64", "Seq", &other)),
    };

    let mut res = Vec::with_capacity(groups.len() * 3 + 2);
    for group in groups.iter().chain(std::iter::once(&tail)) {
        match group {
            Value::Seq(bytes) => res.extend(bytes.iter().cloned()),
            Value::Unit => {}
            other => return Err(ActionError::shape("base64", "Seq", other)),
        }
    }
    Ok(Value::Seq(res))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bsfdig_maps_symbol_to_code() {
        assert_eq!(act_bsfdig(Value::Byte(b'/')), Ok(Value::Byte(63)));
        assert_eq!(
            act_bsfdig(Value::Byte(b'=')),
            Err(ActionError::InvalidSymbol { byte: b'=' })
        );
        assert!(act_bsfdig(Value::Unit).is_err());
    }

    #[test]
    fn short_group_ignores_padding_units() {
        // Q U I =
        let p = Value::Seq(vec![Value::Byte(16), Value::Byte(20), Value::Byte(8), Value::Unit]);
        assert_eq!(act_base64_2(p), Ok(Value::from_bytes(b"AB")));
    }

    #[test]
    fn top_rule_flattens_groups_and_tail() {
        let p = Value::Seq(vec![
            Value::Seq(vec![Value::from_bytes(b"Hel"), Value::from_bytes(b"lo ")]),
            Value::from_bytes(b"!"),
        ]);
        assert_eq!(act_base64(p), Ok(Value::from_bytes(b"Hello !")));

        let p = Value::Seq(vec![Value::Seq(vec![]), Value::Unit]);
        assert_eq!(act_base64(p), Ok(Value::Seq(vec![])));
    }

    #[test]
    fn top_rule_rejects_wrong_shape() {
        assert!(act_base64(Value::Byte(0)).is_err());
        assert!(act_base64(Value::Seq(vec![Value::Unit])).is_err());
    }
}
