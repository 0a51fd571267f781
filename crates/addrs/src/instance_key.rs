//! instance keys
//!
//! A repeated module call or resource expands into instances that are told
//! apart by their key:
//! - no key at all (the call is not repeated)
//! - an integer key (`count`-style expansion)
//! - a string key (`for_each`-style expansion)
//!
//! Keys of different kinds never compare equal, even when their rendered
//! forms look alike: `[0]` and `["0"]` are distinct instances.
use std::fmt::{Formatter, Write};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum InstanceKey {
    #[default]
    NoKey,
    Int(i64),
    String(String),
}

impl InstanceKey {
    pub fn is_no_key(&self) -> bool {
        matches!(self, InstanceKey::NoKey)
    }
}

impl From<i64> for InstanceKey {
    fn from(value: i64) -> Self {
        InstanceKey::Int(value)
    }
}

impl From<String> for InstanceKey {
    fn from(value: String) -> Self {
        InstanceKey::String(value)
    }
}

impl From<&str> for InstanceKey {
    fn from(value: &str) -> Self {
        InstanceKey::String(value.to_string())
    }
}

/// Renders the key in index form, including the brackets
///
/// [InstanceKey::NoKey] renders as the empty string.
impl std::fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceKey::NoKey => Ok(()),
            InstanceKey::Int(int) => write!(f, "[{int}]"),
            InstanceKey::String(string) => {
                f.write_char('[')?;
                write_quoted(f, string)?;
                f.write_char(']')
            }
        }
    }
}

/// Writes `value` as a double-quoted HCL string literal
fn write_quoted(f: &mut Formatter<'_>, value: &str) -> std::fmt::Result {
    f.write_char('"')?;

    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // template sequences are escaped by doubling the marker
            '$' | '%' if chars.peek() == Some(&'{') => {
                f.write_char(c)?;
                f.write_char(c)?;
            }
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => f.write_char(c)?,
        }
    }

    f.write_char('"')
}
