//! Error codes for loader diagnostics.

use std::fmt;

/// Error codes for categorizing loader diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed markup.
    ///
    /// The reader rejected the input as syntactically invalid.
    E001,

    /// Mismatched end tag.
    ///
    /// An end tag does not match the most recently opened element.
    E002,

    /// Unclosed element.
    ///
    /// The input ended while an element was still open.
    E003,

    /// Multiple root elements.
    ///
    /// A second top-level element follows the root element.
    E004,

    /// Missing root element.
    ///
    /// The input contains no element at all.
    E005,

    /// Malformed attribute.
    ///
    /// An attribute is duplicated, unquoted, or its value has an invalid escape.
    E006,

    /// Unexpected end tag.
    ///
    /// An end tag appears where no element is open.
    E007,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E006 => "E006",
            ErrorCode::E007 => "E007",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed markup",
            ErrorCode::E002 => "mismatched end tag",
            ErrorCode::E003 => "unclosed element",
            ErrorCode::E004 => "multiple root elements",
            ErrorCode::E005 => "missing root element",
            ErrorCode::E006 => "malformed attribute",
            ErrorCode::E007 => "unexpected end tag",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
