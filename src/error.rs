// Copyright 2025 Rauli Laine
//
// This file is part of laskin.
//
// laskin is free software: you can redistribute it and/or modify it under the
// terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// laskin is distributed in the hope that it will be useful, but WITHOUT ANY
// WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// laskin. If not, see <https://www.gnu.org/licenses/>.

//! Errors raised by the interpreter.

use std::fmt;

/// The seven categories of errors the interpreter can raise.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Malformed source code, such as an unterminated literal.
    Syntax,
    /// Operation not defined for the given value type(s).
    Type,
    /// Dimensionally incompatible operands.
    Unit,
    /// Stack underflow, index out of bounds or numeric overflow.
    Range,
    /// Result not representable in the reals.
    Domain,
    /// Unknown dictionary key or identifier.
    Name,
    /// I/O or host environment failure.
    System,
}

impl ErrorKind {
    /// Human readable description of the error category.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "Syntax error",
            ErrorKind::Type => "Type error",
            ErrorKind::Unit => "Unit error",
            ErrorKind::Range => "Range error",
            ErrorKind::Domain => "Domain error",
            ErrorKind::Name => "Name error",
            ErrorKind::System => "System error",
        }
    }
}

/// An error raised during parsing or execution. Carries the category, a
/// message and, when known, the source position where it occurred.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    line: i32,
    column: i32,
}

impl Error {
    /// Creates an error without source position.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Error {
        Error {
            kind,
            message: message.into(),
            line: 0,
            column: 0,
        }
    }

    /// Creates an error with source position.
    pub fn with_position(
        kind: ErrorKind,
        message: impl Into<String>,
        line: i32,
        column: i32,
    ) -> Error {
        Error {
            kind,
            message: message.into(),
            line,
            column,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn line(&self) -> i32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> i32 {
        self.column
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line != 0 {
            write!(f, "{}:{}:", self.line, self.column)?;
        }
        f.write_str(self.kind.description())?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// Enables the `?` operator on sink writes inside builtin words.
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::new(ErrorKind::System, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn display_without_position() {
        let e = Error::new(ErrorKind::Range, "Stack underflow.");
        assert_eq!(format!("{e}"), "Range error: Stack underflow.");
    }

    #[test]
    fn display_with_position() {
        let e = Error::with_position(ErrorKind::Syntax, "Missing `)'", 3, 14);
        assert_eq!(format!("{e}"), "3:14:Syntax error: Missing `)'");
    }

    #[test]
    fn display_without_message() {
        let e = Error::new(ErrorKind::Domain, "");
        assert_eq!(format!("{e}"), "Domain error");
    }
}
