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

//! Words operating on quotes: calling and composition combinators.

use std::io::Write;
use std::rc::Rc;

use crate::ast::Node;
use crate::context::Context;
use crate::error::Error;
use crate::quote::{NativeFn, Quote};
use crate::value::Value;

type Result = std::result::Result<(), Error>;

fn literal(value: Value) -> Rc<Node> {
    Rc::new(Node::Literal {
        value,
        line: 0,
        column: 0,
    })
}

fn symbol(id: &str) -> Rc<Node> {
    Rc::new(Node::Symbol {
        id: String::from(id),
        line: 0,
        column: 0,
    })
}

fn w_call(context: &mut Context, out: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();

    quote.call(context, out)
}

/// Builds a quote that runs the left quote, then the right quote.
fn w_compose(context: &mut Context, _: &mut dyn Write) -> Result {
    let right = context.pop()?.as_quote()?.clone();
    let left = context.pop()?.as_quote()?.clone();

    context.push(Value::Quote(Quote::from_nodes(vec![
        literal(Value::Quote(left)),
        symbol("quote:call"),
        literal(Value::Quote(right)),
        symbol("quote:call"),
    ])));

    Ok(())
}

/// Builds a quote that pushes the popped argument before running the
/// original quote.
fn w_curry(context: &mut Context, _: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();
    let argument = context.pop()?;

    context.push(Value::Quote(Quote::from_nodes(vec![
        literal(argument),
        literal(Value::Quote(quote)),
        symbol("quote:call"),
    ])));

    Ok(())
}

/// Builds a quote that runs the original quote and inverts its boolean
/// result.
fn w_negate(context: &mut Context, _: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();

    context.push(Value::Quote(Quote::from_nodes(vec![
        literal(Value::Quote(quote)),
        symbol("quote:call"),
        symbol("boolean:not"),
    ])));

    Ok(())
}

/// Hides the value below the quote while the quote runs, then restores it.
fn w_dip(context: &mut Context, out: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();
    let value = context.pop()?;

    quote.call(context, out)?;
    context.push(value);

    Ok(())
}

pub(crate) static WORDS: &[(&str, NativeFn)] = &[
    ("quote:call", w_call),
    ("quote:compose", w_compose),
    ("quote:curry", w_curry),
    ("quote:negate", w_negate),
    ("quote:dip", w_dip),
];
