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

//! Nodes of the abstract syntax tree.

use std::io::Write;
use std::rc::Rc;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::calendar::{self, Month, Weekday};
use crate::context::Context;
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::value::{escape_string, Value};

/// A node of the abstract syntax tree. Nodes are immutable after
/// construction and may be shared between multiple quotes.
#[derive(Clone, Debug)]
pub enum Node {
    /// Pushes a precomputed value onto the stack.
    Literal {
        value: Value,
        line: i32,
        column: i32,
    },
    /// Evaluates child expressions into a vector.
    VectorLiteral {
        elements: Vec<Rc<Node>>,
        line: i32,
        column: i32,
    },
    /// Evaluates child expressions into a record, preserving key order.
    RecordLiteral {
        properties: Vec<(String, Rc<Node>)>,
        line: i32,
        column: i32,
    },
    /// An identifier resolved against the dictionary at execution time.
    Symbol { id: String, line: i32, column: i32 },
    /// Pops a value and binds it in the dictionary.
    Definition { id: String, line: i32, column: i32 },
}

impl Node {
    #[must_use]
    pub fn line(&self) -> i32 {
        match self {
            Node::Literal { line, .. }
            | Node::VectorLiteral { line, .. }
            | Node::RecordLiteral { line, .. }
            | Node::Symbol { line, .. }
            | Node::Definition { line, .. } => *line,
        }
    }

    #[must_use]
    pub fn column(&self) -> i32 {
        match self {
            Node::Literal { column, .. }
            | Node::VectorLiteral { column, .. }
            | Node::RecordLiteral { column, .. }
            | Node::Symbol { column, .. }
            | Node::Definition { column, .. } => *column,
        }
    }

    /// Executes the node in statement position, pushing onto and consuming
    /// from the stack.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by symbol resolution or by the executed
    /// word.
    pub fn exec(&self, context: &mut Context, out: &mut dyn Write) -> Result<(), Error> {
        match self {
            Node::Literal { value, .. } => {
                context.push(value.clone());

                Ok(())
            }
            Node::VectorLiteral { .. } | Node::RecordLiteral { .. } => {
                let value = self.eval(context, out)?;

                context.push(value);

                Ok(())
            }
            Node::Symbol { id, line, column } => exec_symbol(context, out, id, *line, *column),
            Node::Definition { id, .. } => {
                let value = context.pop()?;

                context.dictionary_mut().insert(id.clone(), value);

                Ok(())
            }
        }
    }

    /// Evaluates the node in expression position, producing a value.
    ///
    /// # Errors
    ///
    /// Returns a *syntax* error for definitions and a *name* error for
    /// symbols that do not form a value.
    pub fn eval(&self, context: &mut Context, out: &mut dyn Write) -> Result<Value, Error> {
        match self {
            Node::Literal { value, .. } => Ok(value.clone()),
            Node::VectorLiteral { elements, .. } => {
                let mut container = Vec::with_capacity(elements.len());

                for element in elements {
                    container.push(element.eval(context, out)?);
                }

                Ok(Value::Vector(container))
            }
            Node::RecordLiteral { properties, .. } => {
                let mut resolved = IndexMap::new();

                for (key, property) in properties {
                    let value = property.eval(context, out)?;

                    resolved.insert(key.clone(), value);
                }

                Ok(Value::Record(resolved))
            }
            Node::Symbol { id, line, column } => eval_symbol(context, id, *line, *column),
            Node::Definition { id, line, column } => Err(Error::with_position(
                ErrorKind::Syntax,
                format!("Unable to evaluate definition of `{id}' as expression."),
                *line,
                *column,
            )),
        }
    }

    /// Round trippable source form of the node.
    #[must_use]
    pub fn to_source(&self) -> String {
        match self {
            Node::Literal { value, .. } => value.to_source(),
            Node::VectorLiteral { elements, .. } => {
                format!(
                    "[{}]",
                    elements.iter().map(|element| element.to_source()).join(", ")
                )
            }
            Node::RecordLiteral { properties, .. } => {
                format!(
                    "{{{}}}",
                    properties
                        .iter()
                        .map(|(key, value)| format!("{}: {}", escape_string(key), value.to_source()))
                        .join(", ")
                )
            }
            Node::Symbol { id, .. } => id.clone(),
            Node::Definition { id, .. } => format!("-> {id}"),
        }
    }
}

/// Resolves a symbol in statement position: first a typed dictionary probe
/// against the top of the stack, then a plain probe, then the literal
/// fallbacks.
fn exec_symbol(
    context: &mut Context,
    out: &mut dyn Write,
    id: &str,
    line: i32,
    column: i32,
) -> Result<(), Error> {
    if let Some(top) = context.data().last() {
        let type_id = format!("{}:{}", top.type_description(), id);

        if let Some(word) = context.dictionary().get(&type_id).cloned() {
            return run_word(context, out, word);
        }
    }

    if let Some(word) = context.dictionary().get(id).cloned() {
        return run_word(context, out, word);
    }

    if Number::is_valid(id) {
        context.push(Value::Number(Number::parse(id)?));

        return Ok(());
    } else if calendar::is_date(id) {
        context.push(Value::Date(calendar::parse_date(id)?));

        return Ok(());
    } else if calendar::is_time(id) {
        context.push(Value::Time(calendar::parse_time(id)?));

        return Ok(());
    }

    Err(Error::with_position(
        ErrorKind::Name,
        format!("Unrecognized symbol: `{id}'"),
        line,
        column,
    ))
}

/// Dictionary hit: quotes run, everything else is pushed.
fn run_word(context: &mut Context, out: &mut dyn Write, word: Value) -> Result<(), Error> {
    if let Value::Quote(quote) = word {
        quote.call(context, out)
    } else {
        context.push(word);

        Ok(())
    }
}

/// Resolves a symbol in expression position, where only value forms are
/// recognized.
fn eval_symbol(context: &mut Context, id: &str, line: i32, column: i32) -> Result<Value, Error> {
    if id == "true" {
        return Ok(Value::Boolean(true));
    } else if id == "false" {
        return Ok(Value::Boolean(false));
    } else if id == "drop" {
        return context.pop();
    } else if Number::is_valid(id) {
        return Ok(Value::Number(Number::parse(id)?));
    } else if calendar::is_date(id) {
        return Ok(Value::Date(calendar::parse_date(id)?));
    } else if calendar::is_time(id) {
        return Ok(Value::Time(calendar::parse_time(id)?));
    } else if let Some(month) = Month::from_name(id) {
        return Ok(Value::Month(month));
    } else if let Some(weekday) = Weekday::from_name(id) {
        return Ok(Value::Weekday(weekday));
    }

    Err(Error::with_position(
        ErrorKind::Name,
        format!("Unable to evaluate `{id}' as expression."),
        line,
        column,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(id: &str) -> Node {
        Node::Symbol {
            id: String::from(id),
            line: 1,
            column: 1,
        }
    }

    #[test]
    fn typed_probe_takes_precedence_over_plain() {
        let mut context = Context::new();
        let mut out = Vec::new();

        context.push(Value::String(String::from("hello")));
        context.execute("(drop \"typed\") \"string:shadow\" define", 1, &mut out).unwrap();
        context.execute("(\"plain\") \"shadow\" define", 1, &mut out).unwrap();

        symbol("shadow").exec(&mut context, &mut out).unwrap();

        assert_eq!(context.pop().unwrap().to_source(), "\"typed\"");
    }

    #[test]
    fn symbol_falls_back_to_literals() {
        let mut context = Context::new();
        let mut out = Vec::new();

        symbol("42").exec(&mut context, &mut out).unwrap();
        symbol("2020-02-29").exec(&mut context, &mut out).unwrap();
        symbol("12:30:00").exec(&mut context, &mut out).unwrap();

        assert_eq!(context.pop().unwrap().to_source(), "12:30:00");
        assert_eq!(context.pop().unwrap().to_source(), "2020-02-29");
        assert_eq!(context.pop().unwrap().to_source(), "42");
    }

    #[test]
    fn unknown_symbol_is_a_name_error() {
        let mut context = Context::new();
        let mut out = Vec::new();
        let error = symbol("no-such-word").exec(&mut context, &mut out).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Name);
    }

    #[test]
    fn non_quote_binding_is_pushed() {
        let mut context = Context::new();
        let mut out = Vec::new();

        context.execute("5 -> x x x", 1, &mut out).unwrap();

        assert_eq!(context.depth(), 2);
    }

    #[test]
    fn eval_recognizes_value_symbols() {
        let mut context = Context::new();

        assert_eq!(
            eval_symbol(&mut context, "true", 1, 1).unwrap(),
            Value::Boolean(true)
        );
        assert!(matches!(
            eval_symbol(&mut context, "january", 1, 1).unwrap(),
            Value::Month(Month::January)
        ));
        assert!(matches!(
            eval_symbol(&mut context, "saturday", 1, 1).unwrap(),
            Value::Weekday(Weekday::Saturday)
        ));
        assert_eq!(
            eval_symbol(&mut context, "bogus", 1, 1).unwrap_err().kind(),
            ErrorKind::Name
        );
    }

    #[test]
    fn definition_cannot_be_evaluated() {
        let mut context = Context::new();
        let mut out = Vec::new();
        let node = Node::Definition {
            id: String::from("x"),
            line: 2,
            column: 3,
        };
        let error = node.eval(&mut context, &mut out).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert_eq!(error.line(), 2);
    }
}
