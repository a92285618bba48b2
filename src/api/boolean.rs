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

//! Words operating on booleans.

use std::io::Write;

use crate::context::Context;
use crate::error::Error;
use crate::quote::NativeFn;
use crate::value::Value;

type Result = std::result::Result<(), Error>;

fn w_not(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?.as_boolean()?;

    context.push(Value::Boolean(!value));

    Ok(())
}

fn w_and(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?.as_boolean()?;
    let a = context.pop()?.as_boolean()?;

    context.push(Value::Boolean(a && b));

    Ok(())
}

fn w_or(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?.as_boolean()?;
    let a = context.pop()?.as_boolean()?;

    context.push(Value::Boolean(a || b));

    Ok(())
}

fn w_xor(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?.as_boolean()?;
    let a = context.pop()?.as_boolean()?;

    context.push(Value::Boolean(a != b));

    Ok(())
}

pub(crate) static WORDS: &[(&str, NativeFn)] = &[
    ("boolean:not", w_not),
    ("boolean:and", w_and),
    ("boolean:or", w_or),
    ("boolean:xor", w_xor),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> String {
        let mut context = Context::new();
        let mut out = Vec::new();

        context.execute(source, 1, &mut out).unwrap();

        String::from_utf8(out).unwrap()
    }

    #[test]
    fn boolean_words() {
        assert_eq!(run("true boolean:not ."), "false\n");
        assert_eq!(run("true false boolean:and ."), "false\n");
        assert_eq!(run("true false boolean:or ."), "true\n");
        assert_eq!(run("true false boolean:xor ."), "true\n");
        assert_eq!(run("true true boolean:xor ."), "false\n");
    }

    #[test]
    fn not_rejects_non_booleans() {
        let mut context = Context::new();
        let mut out = Vec::new();

        assert!(context.execute("1 boolean:not", 1, &mut out).is_err());
    }
}
