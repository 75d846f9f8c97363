//! Sextet: a grammar-driven Base64 recognizer and decoder.
//!
//! Grammars are trees of combinator [`grammar::Node`]s evaluated by a
//! backtracking [`engine`]. Semantic actions attached to rules turn the parse
//! tree into decoded bytes, either rule by rule or in one pass at the top.

pub use crate::base64::{decode, Strategy};
pub use crate::diagnostics::{ActionError, DecodeError};
pub use crate::value::Value;

pub mod base64;
pub mod cli;
pub mod diagnostics;
pub mod engine;
pub mod grammar;
pub mod value;
