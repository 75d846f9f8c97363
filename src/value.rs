//! Parse values produced by the matching engine.
//!
//! A successful match yields a [`Value`]: a single byte, an ordered sequence
//! of values, or `Unit` for matches whose value is discarded. Semantic actions
//! consume and produce the same type, so a transformed value slots back into
//! the tree exactly where the raw one would have been.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a value in a parse tree.
///
/// # Examples
///
/// ```rust
/// use sextet::value::Value;
/// let b = Value::Byte(b'A');
/// assert_eq!(b.type_name(), "Byte");
/// let s = Value::Seq(vec![Value::Byte(1), Value::Unit]);
/// assert_eq!(s.type_name(), "Seq");
/// assert!(Value::default().is_unit());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Unit,
    Byte(u8),
    Seq(Vec<Value>),
}

impl Value {
    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "Unit",
            Value::Byte(_) => "Byte",
            Value::Seq(_) => "Seq",
        }
    }

    /// Returns true if the value is Unit.
    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }

    /// Returns the contained byte if this is a Byte value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sextet::value::Value;
    /// assert_eq!(Value::Byte(7).as_byte(), Some(7));
    /// assert_eq!(Value::Unit.as_byte(), None);
    /// ```
    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Value::Byte(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the contained items if this is a Seq value.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Consumes the value, returning its items if it is a Seq.
    pub fn into_seq(self) -> Option<Vec<Value>> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Collects a flat sequence of bytes. Returns `None` if this is not a Seq
    /// or if any element is not a Byte.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sextet::value::Value;
    /// let v = Value::from_bytes(b"hi");
    /// assert_eq!(v.to_bytes(), Some(b"hi".to_vec()));
    /// assert_eq!(Value::Seq(vec![Value::Unit]).to_bytes(), None);
    /// ```
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        self.as_seq()?.iter().map(Value::as_byte).collect()
    }

    /// Builds a flat Seq of Byte values.
    pub fn from_bytes(bytes: &[u8]) -> Value {
        Value::Seq(bytes.iter().copied().map(Value::Byte).collect())
    }
}

impl From<u8> for Value {
    fn from(b: u8) -> Self {
        Value::Byte(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "_"),
            Value::Byte(b) => write!(f, "{b}"),
            Value::Seq(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}
