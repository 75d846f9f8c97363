//! Error types for decoding, with `miette` diagnostics.
//!
//! Two things can go wrong during a parse:
//!
//! - **Rejection**: the input is not a document the grammar accepts. This is
//!   the ordinary failure. It carries the furthest offset any primitive
//!   failed at and what was expected there, so the report can point at the
//!   offending byte. Which inputs are rejected does not depend on this data.
//! - **Action failure**: a semantic action received a value of a shape its
//!   rule cannot produce. This is an internal logic error, never an input
//!   error, and it aborts the parse immediately.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

/// Failure raised by a semantic action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("byte 0x{byte:02x} is not a Base64 symbol")]
    InvalidSymbol { byte: u8 },
    #[error("action `{action}` expected {expected}, found {found}")]
    UnexpectedShape {
        action: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl ActionError {
    pub fn shape(action: &'static str, expected: &'static str, found: &crate::value::Value) -> Self {
        ActionError::UnexpectedShape {
            action,
            expected,
            found: found.type_name(),
        }
    }
}

/// Unified error type for a decode call.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("input is not a valid Base64 document")]
    Rejected {
        /// Furthest offset at which a primitive failed.
        offset: usize,
        /// What the grammar would have accepted at `offset`, sorted.
        expected: Vec<String>,
        /// The input, when it is valid UTF-8 and offsets can be labelled.
        src: Option<NamedSource<String>>,
    },
    #[error("semantic action failed")]
    Action(#[from] ActionError),
}

impl DecodeError {
    /// Builds a rejection for `input`.
    pub fn rejected(input: &[u8], offset: usize, expected: Vec<String>) -> Self {
        let src = std::str::from_utf8(input)
            .ok()
            .map(|text| NamedSource::new("input", text.to_string()));
        DecodeError::Rejected {
            offset,
            expected,
            src,
        }
    }

    /// Renames the attached source, e.g. to the path the input was read from.
    pub fn with_source_name(mut self, name: impl AsRef<str>) -> Self {
        if let DecodeError::Rejected { src, .. } = &mut self {
            if let Some(named) = src.take() {
                *src = Some(NamedSource::new(name, named.inner().clone()));
            }
        }
        self
    }

    /// Offset of the rejection, if this is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::Rejected { offset, .. } => Some(*offset),
            DecodeError::Action(_) => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, DecodeError::Rejected { .. })
    }
}

impl Diagnostic for DecodeError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self {
            DecodeError::Rejected { .. } => "sextet::rejected",
            DecodeError::Action(_) => "sextet::action",
        };
        Some(Box::new(code) as Box<dyn std::fmt::Display + 'a>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self {
            DecodeError::Rejected { expected, .. } if !expected.is_empty() => {
                Some(Box::new(format!("expected {}", expected.join(", ")))
                    as Box<dyn std::fmt::Display + 'a>)
            }
            DecodeError::Action(_) => Some(Box::new(
                "this is a bug in the grammar's semantic actions, not in the input",
            ) as Box<dyn std::fmt::Display + 'a>),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            DecodeError::Rejected { src, .. } => src.as_ref().map(|s| s as &dyn SourceCode),
            DecodeError::Action(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let DecodeError::Rejected {
            offset,
            src: Some(src),
            ..
        } = self
        else {
            return None;
        };
        let len = if *offset < src.inner().len() { 1 } else { 0 };
        let text = if len == 0 {
            "input ends here"
        } else {
            "unexpected byte"
        };
        let label = LabeledSpan::new(Some(text.to_string()), *offset, len);
        Some(Box::new(std::iter::once(label)))
    }
}

#[cfg(test)]
mod diagnostics_tests {
    use miette::Report;

    use super::*;

    #[test]
    fn rejection_report_names_expected_set() {
        let err = DecodeError::rejected(b"QQ=", 3, vec!["'='".to_string()]);
        assert_eq!(err.offset(), Some(3));
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("not a valid Base64 document"));
        assert!(output.contains("expected '='"));
    }

    #[test]
    fn non_utf8_input_has_no_source() {
        let err = DecodeError::rejected(&[0xff, 0xfe], 0, vec![]);
        assert!(err.source_code().is_none());
        assert!(err.labels().is_none());
    }

    #[test]
    fn source_name_can_be_replaced() {
        let err = DecodeError::rejected(b"!", 0, vec![]).with_source_name("payload.b64");
        let DecodeError::Rejected { src: Some(src), .. } = &err else {
            panic!("expected a rejection with source");
        };
        assert_eq!(src.name(), "payload.b64");
        assert_eq!(src.inner(), "!");
    }

    #[test]
    fn action_errors_convert() {
        let err: DecodeError = ActionError::InvalidSymbol { byte: b'!' }.into();
        assert!(!err.is_rejection());
        assert_eq!(err.to_string(), "semantic action failed");
        assert_eq!(
            ActionError::InvalidSymbol { byte: b'!' }.to_string(),
            "byte 0x21 is not a Base64 symbol"
        );
    }
}
