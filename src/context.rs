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

//! The execution context: data stack, dictionary and built-in words.

use std::collections::HashMap;
use std::io::Write;

use crate::api;
use crate::error::{Error, ErrorKind};
use crate::parser;
use crate::quote::Quote;
use crate::value::Value;

/// An execution context: the data stack the program operates on and the
/// dictionary used for symbol resolution. Not safe for concurrent use; each
/// logical session owns its own context.
pub struct Context {
    data: Vec<Value>,
    dictionary: HashMap<String, Value>,
}

impl Context {
    /// Creates a context with an empty stack and all built-in words
    /// installed in the dictionary.
    #[must_use]
    pub fn new() -> Context {
        let mut dictionary = HashMap::new();

        for table in api::tables() {
            for (name, callback) in table {
                dictionary.insert(
                    String::from(*name),
                    Value::Quote(Quote::from_native(*callback)),
                );
            }
        }

        Context {
            data: Vec::new(),
            dictionary,
        }
    }

    /// Pushes a value onto the stack.
    pub fn push(&mut self, value: Value) {
        self.data.push(value);
    }

    /// Pops the top value off the stack.
    ///
    /// # Errors
    ///
    /// Returns a *range* error if the stack is empty.
    pub fn pop(&mut self) -> Result<Value, Error> {
        self.data
            .pop()
            .ok_or_else(|| Error::new(ErrorKind::Range, "Stack underflow."))
    }

    /// Returns a reference to the top value of the stack.
    ///
    /// # Errors
    ///
    /// Returns a *range* error if the stack is empty.
    pub fn peek(&self) -> Result<&Value, Error> {
        self.data
            .last()
            .ok_or_else(|| Error::new(ErrorKind::Range, "Stack underflow."))
    }

    /// Removes all values from the stack.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Number of values on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.data.len()
    }

    /// Snapshot of the stack, bottom first.
    #[must_use]
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Snapshot of the dictionary.
    #[must_use]
    pub fn dictionary(&self) -> &HashMap<String, Value> {
        &self.dictionary
    }

    #[must_use]
    pub fn dictionary_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.dictionary
    }

    /// Parses and runs the given source text against this context, writing
    /// program output into the given sink.
    ///
    /// # Errors
    ///
    /// Surfaces any parse or execution error unchanged; the stack and the
    /// dictionary are left in whatever state the partial execution reached.
    pub fn execute(&mut self, source: &str, line: i32, out: &mut dyn Write) -> Result<(), Error> {
        parser::parse(source, line)?.call(self, out)
    }

    /// Names of all words currently bound in the dictionary.
    #[must_use]
    pub fn words(&self) -> Vec<String> {
        self.dictionary.keys().cloned().collect()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::Number;

    #[test]
    fn push_pop_round_trips() {
        let mut context = Context::new();
        let value = Value::Number(Number::from_i64(42));
        let depth = context.depth();

        context.push(value.clone());
        assert_eq!(context.depth(), depth + 1);
        assert_eq!(context.pop().unwrap(), value);
        assert_eq!(context.depth(), depth);
    }

    #[test]
    fn pop_on_empty_stack_underflows() {
        let mut context = Context::new();
        let error = context.pop().unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Range);
        assert_eq!(error.message(), "Stack underflow.");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut context = Context::new();

        context.push(Value::Boolean(true));
        assert!(context.peek().is_ok());
        assert_eq!(context.depth(), 1);
    }

    #[test]
    fn builtins_are_installed() {
        let context = Context::new();

        for word in ["dup", "swap", "+", "vector:map", "number:sqrt", "january"] {
            assert!(
                context.dictionary().contains_key(word),
                "{word} should be a builtin"
            );
        }
    }

    #[test]
    fn rebinding_replaces_previous_binding() {
        let mut context = Context::new();
        let mut out = Vec::new();

        context.execute("1 -> x 2 -> x x", 1, &mut out).unwrap();

        assert_eq!(context.pop().unwrap(), Value::Number(Number::from_i64(2)));
    }

    #[test]
    fn execute_leaves_partial_state_on_error() {
        let mut context = Context::new();
        let mut out = Vec::new();
        let result = context.execute("1 2 no-such-word", 1, &mut out);

        assert!(result.is_err());
        assert_eq!(context.depth(), 2);
    }
}
