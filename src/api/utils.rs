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

//! Constants, common operators, stack manipulation, control flow and I/O.

use std::cmp::Ordering;
use std::io::Write;

use crate::context::Context;
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::parser;
use crate::quote::NativeFn;
use crate::value::Value;

type Result = std::result::Result<(), Error>;

fn w_true(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Boolean(true));

    Ok(())
}

fn w_false(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Boolean(false));

    Ok(())
}

fn w_pi(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Number(Number::from_f64(std::f64::consts::PI)?));

    Ok(())
}

fn w_e(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Number(Number::from_f64(std::f64::consts::E)?));

    Ok(())
}

fn w_eq(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;

    context.push(Value::Boolean(a.equals(&b)?));

    Ok(())
}

fn w_ne(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;

    context.push(Value::Boolean(!a.equals(&b)?));

    Ok(())
}

fn w_gt(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;

    context.push(Value::Boolean(a.compare(&b)? == Ordering::Greater));

    Ok(())
}

fn w_lt(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;

    context.push(Value::Boolean(a.compare(&b)? == Ordering::Less));

    Ok(())
}

fn w_gte(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;

    context.push(Value::Boolean(a.compare(&b)? != Ordering::Less));

    Ok(())
}

fn w_lte(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;

    context.push(Value::Boolean(a.compare(&b)? != Ordering::Greater));

    Ok(())
}

fn w_add(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;

    context.push(a.add(&b)?);

    Ok(())
}

fn w_sub(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;

    context.push(a.subtract(&b)?);

    Ok(())
}

fn w_mul(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;

    context.push(a.multiply(&b)?);

    Ok(())
}

fn w_div(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;

    context.push(a.divide(&b)?);

    Ok(())
}

fn w_max(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;
    let result = if a.compare(&b)? == Ordering::Greater {
        a
    } else {
        b
    };

    context.push(result);

    Ok(())
}

fn w_min(context: &mut Context, _: &mut dyn Write) -> Result {
    let b = context.pop()?;
    let a = context.pop()?;
    let result = if a.compare(&b)? == Ordering::Less { a } else { b };

    context.push(result);

    Ok(())
}

fn type_test(context: &mut Context, expected: &str) -> Result {
    let result = context.peek()?.type_description() == expected;

    context.push(Value::Boolean(result));

    Ok(())
}

fn w_is_boolean(context: &mut Context, _: &mut dyn Write) -> Result {
    type_test(context, "boolean")
}

fn w_is_date(context: &mut Context, _: &mut dyn Write) -> Result {
    type_test(context, "date")
}

fn w_is_month(context: &mut Context, _: &mut dyn Write) -> Result {
    type_test(context, "month")
}

fn w_is_number(context: &mut Context, _: &mut dyn Write) -> Result {
    type_test(context, "number")
}

fn w_is_record(context: &mut Context, _: &mut dyn Write) -> Result {
    type_test(context, "record")
}

fn w_is_vector(context: &mut Context, _: &mut dyn Write) -> Result {
    type_test(context, "vector")
}

fn w_is_string(context: &mut Context, _: &mut dyn Write) -> Result {
    type_test(context, "string")
}

fn w_is_time(context: &mut Context, _: &mut dyn Write) -> Result {
    type_test(context, "time")
}

fn w_is_quote(context: &mut Context, _: &mut dyn Write) -> Result {
    type_test(context, "quote")
}

fn w_is_weekday(context: &mut Context, _: &mut dyn Write) -> Result {
    type_test(context, "weekday")
}

fn w_clear(context: &mut Context, _: &mut dyn Write) -> Result {
    context.clear();

    Ok(())
}

fn w_dup(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.peek()?.clone();

    context.push(value);

    Ok(())
}

fn w_drop(context: &mut Context, _: &mut dyn Write) -> Result {
    context.pop()?;

    Ok(())
}

fn w_nip(context: &mut Context, _: &mut dyn Write) -> Result {
    let a = context.pop()?;

    context.pop()?;
    context.push(a);

    Ok(())
}

fn w_over(context: &mut Context, _: &mut dyn Write) -> Result {
    let a = context.pop()?;
    let b = context.pop()?;

    context.push(b.clone());
    context.push(a);
    context.push(b);

    Ok(())
}

fn w_rot(context: &mut Context, _: &mut dyn Write) -> Result {
    let a = context.pop()?;
    let b = context.pop()?;
    let c = context.pop()?;

    context.push(b);
    context.push(a);
    context.push(c);

    Ok(())
}

fn w_swap(context: &mut Context, _: &mut dyn Write) -> Result {
    let a = context.pop()?;
    let b = context.pop()?;

    context.push(a);
    context.push(b);

    Ok(())
}

fn w_tuck(context: &mut Context, _: &mut dyn Write) -> Result {
    let a = context.pop()?;
    let b = context.pop()?;

    context.push(a.clone());
    context.push(b);
    context.push(a);

    Ok(())
}

fn w_depth(context: &mut Context, _: &mut dyn Write) -> Result {
    let depth = context.depth();

    context.push(Value::Number(Number::from_i64(depth as i64)));

    Ok(())
}

fn w_to_string(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;

    context.push(Value::String(value.to_string()));

    Ok(())
}

fn w_to_source(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;

    context.push(Value::String(value.to_source()));

    Ok(())
}

fn w_print(context: &mut Context, out: &mut dyn Write) -> Result {
    let value = context.pop()?;

    writeln!(out, "{value}")?;

    Ok(())
}

fn w_stack_preview(context: &mut Context, out: &mut dyn Write) -> Result {
    let data = context.data();
    let size = data.len();

    if size == 0 {
        writeln!(out, "Stack is empty.")?;

        return Ok(());
    }
    for i in 0..size.min(10) {
        let value = &data[size - i - 1];

        writeln!(out, "{}: {}", size - i, value.to_source())?;
    }

    Ok(())
}

fn w_quit(_: &mut Context, _: &mut dyn Write) -> Result {
    std::process::exit(0);
}

fn w_if(context: &mut Context, out: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();
    let condition = context.pop()?.as_boolean()?;

    if condition {
        quote.call(context, out)?;
    }

    Ok(())
}

fn w_if_else(context: &mut Context, out: &mut dyn Write) -> Result {
    let else_quote = context.pop()?.as_quote()?.clone();
    let then_quote = context.pop()?.as_quote()?.clone();
    let condition = context.pop()?.as_boolean()?;

    if condition {
        then_quote.call(context, out)
    } else {
        else_quote.call(context, out)
    }
}

fn w_while(context: &mut Context, out: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();
    let condition = context.pop()?.as_quote()?.clone();

    loop {
        condition.call(context, out)?;
        if !context.pop()?.as_boolean()? {
            return Ok(());
        }
        quote.call(context, out)?;
    }
}

fn w_lookup(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let id = value.as_string()?;

    match context.dictionary().get(id).cloned() {
        Some(word) => {
            context.push(word);

            Ok(())
        }
        None => Err(Error::new(
            ErrorKind::Name,
            format!("Unrecognized symbol: `{id}'"),
        )),
    }
}

fn w_define(context: &mut Context, _: &mut dyn Write) -> Result {
    let id = context.pop()?.as_string()?.to_string();
    let value = context.pop()?;

    context.dictionary_mut().insert(id, value);

    Ok(())
}

fn w_include(context: &mut Context, out: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let path = value.as_string()?;
    let raw_source = std::fs::read(path).map_err(|_| {
        Error::new(
            ErrorKind::System,
            format!("Unable to open file `{path}' for reading."),
        )
    })?;
    let source = String::from_utf8(raw_source).map_err(|_| {
        Error::new(
            ErrorKind::System,
            "Unable to decode contents of the file with UTF-8 character encoding.",
        )
    })?;

    parser::parse(&source, 1)?.call(context, out)
}

pub(crate) static WORDS: &[(&str, NativeFn)] = &[
    // Constants.
    ("true", w_true),
    ("false", w_false),
    ("pi", w_pi),
    ("e", w_e),
    // Common operators.
    ("=", w_eq),
    ("<>", w_ne),
    (">", w_gt),
    ("<", w_lt),
    (">=", w_gte),
    ("<=", w_lte),
    ("+", w_add),
    ("-", w_sub),
    ("*", w_mul),
    ("/", w_div),
    ("max", w_max),
    ("min", w_min),
    // Stack testing.
    ("boolean?", w_is_boolean),
    ("date?", w_is_date),
    ("month?", w_is_month),
    ("number?", w_is_number),
    ("record?", w_is_record),
    ("vector?", w_is_vector),
    ("string?", w_is_string),
    ("time?", w_is_time),
    ("quote?", w_is_quote),
    ("weekday?", w_is_weekday),
    // Stack manipulation.
    ("clear", w_clear),
    ("dup", w_dup),
    ("drop", w_drop),
    ("nip", w_nip),
    ("over", w_over),
    ("rot", w_rot),
    ("swap", w_swap),
    ("tuck", w_tuck),
    ("depth", w_depth),
    // Conversions.
    (">string", w_to_string),
    (">source", w_to_source),
    // I/O.
    (".", w_print),
    (".s", w_stack_preview),
    // Program logic.
    ("quit", w_quit),
    ("if", w_if),
    ("if-else", w_if_else),
    ("while", w_while),
    // Dictionary related.
    ("lookup", w_lookup),
    ("define", w_define),
    // Importing stuff from the file system.
    ("include", w_include),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> (Context, String) {
        let mut context = Context::new();
        let mut out = Vec::new();

        context.execute(source, 1, &mut out).unwrap();

        (context, String::from_utf8(out).unwrap())
    }

    fn fail(source: &str) -> Error {
        let mut context = Context::new();
        let mut out = Vec::new();

        context.execute(source, 1, &mut out).unwrap_err()
    }

    #[test]
    fn print_writes_human_form_and_newline() {
        assert_eq!(run("1 2 + .").1, "3\n");
        assert_eq!(run("\"hello\" .").1, "hello\n");
    }

    #[test]
    fn stack_preview_shows_top_ten() {
        let (_, output) = run("1 2 .s");

        assert_eq!(output, "2: 2\n1: 1\n");

        let (_, output) = run(".s");

        assert_eq!(output, "Stack is empty.\n");
    }

    #[test]
    fn dup_drop_is_identity() {
        let (context, _) = run("42 dup drop");

        assert_eq!(context.depth(), 1);
        assert_eq!(context.data()[0].to_source(), "42");
    }

    #[test]
    fn swap_swap_is_identity() {
        let (context, _) = run("1 2 swap swap");

        assert_eq!(context.data()[0].to_source(), "1");
        assert_eq!(context.data()[1].to_source(), "2");
    }

    #[test]
    fn stack_shufflers() {
        assert_eq!(run("1 2 nip depth").0.data()[1].to_source(), "1");
        assert_eq!(run("1 2 over").0.data()[2].to_source(), "1");
        assert_eq!(run("1 2 3 rot").0.data()[2].to_source(), "1");
        assert_eq!(run("1 2 tuck").0.data()[0].to_source(), "2");
    }

    #[test]
    fn comparisons_dispatch_through_values() {
        assert_eq!(run("1 2 < .").1, "true\n");
        assert_eq!(run("\"a\" \"b\" > .").1, "false\n");
        assert_eq!(run("1 1 = .").1, "true\n");
        assert_eq!(run("1 2 <> .").1, "true\n");
        assert_eq!(run("2 3 max .").1, "3\n");
        assert_eq!(run("2 3 min .").1, "2\n");
    }

    #[test]
    fn type_predicates_peek() {
        let (context, output) = run("42 number? .");

        assert_eq!(output, "true\n");
        assert_eq!(context.depth(), 1);

        assert_eq!(run("42 string? .").1, "false\n");
    }

    #[test]
    fn conditionals_run_the_selected_branch() {
        assert_eq!(run("true (1) if .").1, "1\n");
        assert_eq!(run("false (1) (2) if-else .").1, "2\n");
    }

    #[test]
    fn while_loops_until_condition_fails() {
        let (_, output) = run("1 (dup 4 <) (dup . 1 +) while");

        assert_eq!(output, "1\n2\n3\n");
    }

    #[test]
    fn define_and_lookup_round_trip() {
        let (_, output) = run("(dup *) \"sq\" define 5 sq .");

        assert_eq!(output, "25\n");

        assert_eq!(fail("\"nothing\" lookup").kind(), ErrorKind::Name);
    }

    #[test]
    fn mixed_quantity_addition_names_both_quantities() {
        let error = fail("1m 1kg +");

        assert_eq!(error.kind(), ErrorKind::Unit);
        assert!(error.message().contains("length"));
        assert!(error.message().contains("mass"));
    }

    #[test]
    fn adding_string_to_vector_is_a_type_error() {
        let error = fail("\"abc\" [1] +");

        assert_eq!(error.kind(), ErrorKind::Type);
    }

    #[test]
    fn include_of_missing_file_is_a_system_error() {
        let error = fail("\"/no/such/laskin/file.lsk\" include");

        assert_eq!(error.kind(), ErrorKind::System);
    }

    #[test]
    fn constants_are_available() {
        assert_eq!(run("true .").1, "true\n");
        assert_eq!(run("pi number? .").1, "true\n");
    }
}
