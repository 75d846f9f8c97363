//! Base64 decoding driven by the combinator grammar.
//!
//! ## Module Structure
//!
//! - **`rules`**: the document grammar, shared by both strategies
//! - **`symbol`**: alphabet, 6-bit codes, and group packing
//! - **`fine`**: per-rule actions that rewrite the tree bottom-up
//! - **`coarse`**: a single top-level action over the raw tree
//!
//! Both strategies accept exactly the same inputs and produce the same bytes.
//!
//! ```rust
//! use sextet::base64::{decode, Strategy};
//! assert_eq!(decode("SGVsbG8=", Strategy::Fine).unwrap(), b"Hello");
//! assert_eq!(decode("  QUI=\n", Strategy::Coarse).unwrap(), b"AB");
//! assert!(decode("SGVsbG8", Strategy::Fine).is_err());
//! ```

pub mod coarse;
pub mod fine;
pub mod rules;
pub mod symbol;

use clap::ValueEnum;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{ActionError, DecodeError};
use crate::engine;
use crate::grammar::Rule;

/// How semantic actions are attached to the grammar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Every rule that needs one has its own action.
    #[default]
    Fine,
    /// Only the top-level rule has an action.
    Coarse,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Fine, Strategy::Coarse];

    pub fn actions(self) -> &'static rules::RuleActions {
        match self {
            Strategy::Fine => &fine::ACTIONS,
            Strategy::Coarse => &coarse::ACTIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Fine => "fine",
            Strategy::Coarse => "coarse",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static FINE_GRAMMAR: Lazy<Rule> = Lazy::new(|| document(Strategy::Fine));
static COARSE_GRAMMAR: Lazy<Rule> = Lazy::new(|| document(Strategy::Coarse));

/// Builds a fresh copy of the document grammar for `strategy`.
pub fn document(strategy: Strategy) -> Rule {
    log::debug!("building {} grammar", strategy);
    rules::document(strategy.actions())
}

/// The process-wide grammar for `strategy`, built on first use.
pub fn grammar(strategy: Strategy) -> &'static Rule {
    match strategy {
        Strategy::Fine => &FINE_GRAMMAR,
        Strategy::Coarse => &COARSE_GRAMMAR,
    }
}

/// Decodes a Base64 document, optionally surrounded by whitespace.
pub fn decode(input: impl AsRef<[u8]>, strategy: Strategy) -> Result<Vec<u8>, DecodeError> {
    decode_with(grammar(strategy), input.as_ref())
}

/// Decodes `input` with a caller-supplied document grammar.
pub fn decode_with(document: &Rule, input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let value = engine::parse(document, input)?;
    let bytes = value.to_bytes().ok_or_else(|| {
        ActionError::shape("document", "flat Seq of Byte", &value)
    })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_share_accepted_language() {
        for input in ["", "QQ==", "QUI=", "SGVsbG8=", "bbbbaaaaBA==", "!!!!", "QR==", "QUJ="] {
            let fine = decode(input, Strategy::Fine).ok();
            let coarse = decode(input, Strategy::Coarse).ok();
            assert_eq!(fine, coarse, "input {input:?}");
        }
    }

    #[test]
    fn fresh_grammar_decodes_like_shared_one() {
        let doc = document(Strategy::Coarse);
        assert_eq!(decode_with(&doc, b"QQ==").unwrap(), b"A");
    }

    #[test]
    fn strategy_names_round_trip() {
        for s in Strategy::ALL {
            assert_eq!(Strategy::from_str(s.as_str(), true), Ok(s));
        }
        assert_eq!(Strategy::default(), Strategy::Fine);
    }
}
