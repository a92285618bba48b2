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

//! First class callable bodies.

use std::io::Write;
use std::rc::Rc;

use itertools::Itertools;

use crate::ast::Node;
use crate::context::Context;
use crate::error::Error;

/// Signature of a built-in word. Receives the execution context and the
/// output sink.
pub type NativeFn = fn(&mut Context, &mut dyn Write) -> Result<(), Error>;

/// A callable body: either a sequence of parsed nodes or a reference to a
/// built-in operation.
#[derive(Clone, Debug)]
pub enum Quote {
    /// A built-in operation.
    Native(NativeFn),
    /// A parsed node sequence.
    User(Vec<Rc<Node>>),
}

impl Quote {
    #[must_use]
    pub fn from_nodes(nodes: Vec<Rc<Node>>) -> Quote {
        Quote::User(nodes)
    }

    #[must_use]
    pub fn from_native(callback: NativeFn) -> Quote {
        Quote::Native(callback)
    }

    /// Returns true if the quote wraps a built-in operation rather than a
    /// parsed node sequence.
    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self, Quote::Native(_))
    }

    /// Runs the quote against the given context: a native callback is
    /// invoked directly, while a user quote executes its nodes from left to
    /// right.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the callback or by an inner node.
    pub fn call(&self, context: &mut Context, out: &mut dyn Write) -> Result<(), Error> {
        match self {
            Quote::Native(callback) => callback(context, out),
            Quote::User(nodes) => {
                for node in nodes {
                    node.exec(context, out)?;
                }

                Ok(())
            }
        }
    }

    /// Round trippable source form of the quote.
    #[must_use]
    pub fn to_source(&self) -> String {
        match self {
            Quote::Native(_) => String::from("(\"native quote\")"),
            Quote::User(nodes) => {
                format!("({})", nodes.iter().map(|node| node.to_source()).join(" "))
            }
        }
    }
}

impl PartialEq for Quote {
    /// Native quotes are equal when they reference the same built-in; user
    /// quotes are equal when their source forms coincide.
    fn eq(&self, other: &Quote) -> bool {
        match (self, other) {
            (Quote::Native(a), Quote::Native(b)) => std::ptr::eq(*a as *const (), *b as *const ()),
            (Quote::User(_), Quote::User(_)) => self.to_source() == other.to_source(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn parse(source: &str) -> Quote {
        parser::parse(source, 1).unwrap()
    }

    #[test]
    fn user_quote_renders_nodes_separated_by_spaces() {
        assert_eq!(parse("dup *").to_source(), "(dup *)");
        assert_eq!(parse("").to_source(), "()");
    }

    #[test]
    fn native_quote_renders_placeholder() {
        fn noop(_: &mut Context, _: &mut dyn Write) -> Result<(), Error> {
            Ok(())
        }

        assert_eq!(
            Quote::from_native(noop).to_source(),
            "(\"native quote\")"
        );
    }

    #[test]
    fn quotes_compare_by_source_form() {
        assert_eq!(parse("dup *"), parse("dup   *"));
        assert_ne!(parse("dup *"), parse("dup +"));
    }

    #[test]
    fn user_quote_executes_nodes_in_order() {
        let mut context = Context::new();
        let mut out = Vec::new();

        parse("1 2 swap").call(&mut context, &mut out).unwrap();

        let top = context.pop().unwrap();

        assert_eq!(top.to_source(), "1");
    }
}
