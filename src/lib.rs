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

//! Laskin is an interactive, stack based calculator language. A program is a
//! sequence of whitespace separated words manipulating a shared data stack;
//! numbers carry measurement units which participate in arithmetic and
//! comparison.
//!
//! The crate is the language runtime: lexing and parsing, the dimensional
//! number type, the polymorphic value model and the stack and dictionary
//! execution engine. The command line front end in `main.rs` is a thin
//! embedder; other hosts embed the interpreter the same way:
//!
//! ```rust
//! use laskin::Context;
//!
//! let mut context = Context::new();
//! let mut out = Vec::new();
//!
//! context.execute("1 2 + .", 1, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "3\n");
//! ```
//!
//! Output is written to an explicit sink passed through every execution, so
//! embedders can redirect program output wherever they need it.

pub mod api;
pub mod ast;
pub mod calendar;
pub mod context;
pub mod error;
pub mod number;
pub mod parser;
pub mod quote;
pub mod unit;
pub mod value;

pub use context::Context;
pub use error::{Error, ErrorKind};
pub use number::Number;
pub use quote::Quote;
pub use value::Value;
