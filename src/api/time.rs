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

//! Words operating on times of day.

use std::fmt::Write as _;
use std::io::Write;

use chrono::{Local, Timelike};

use crate::context::Context;
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::quote::NativeFn;
use crate::value::Value;

type Result = std::result::Result<(), Error>;

fn w_now(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Time(Local::now().time()));

    Ok(())
}

fn w_hour(context: &mut Context, _: &mut dyn Write) -> Result {
    let hour = context.peek()?.as_time()?.hour();

    context.push(Value::Number(Number::from_i64(i64::from(hour))));

    Ok(())
}

fn w_minute(context: &mut Context, _: &mut dyn Write) -> Result {
    let minute = context.peek()?.as_time()?.minute();

    context.push(Value::Number(Number::from_i64(i64::from(minute))));

    Ok(())
}

fn w_second(context: &mut Context, _: &mut dyn Write) -> Result {
    let second = context.peek()?.as_time()?.second();

    context.push(Value::Number(Number::from_i64(i64::from(second))));

    Ok(())
}

/// Formats the time with a strftime pattern popped from below the time.
fn w_format(context: &mut Context, _: &mut dyn Write) -> Result {
    let time = context.pop()?.as_time()?;
    let format_value = context.pop()?;
    let format = format_value.as_string()?;
    let mut result = String::new();

    write!(result, "{}", time.format(format))
        .map_err(|_| Error::new(ErrorKind::Range, "Invalid time format string."))?;
    context.push(Value::String(result));

    Ok(())
}

fn w_to_vector(context: &mut Context, _: &mut dyn Write) -> Result {
    let time = context.pop()?.as_time()?;

    context.push(Value::Vector(vec![
        Value::Number(Number::from_i64(i64::from(time.hour()))),
        Value::Number(Number::from_i64(i64::from(time.minute()))),
        Value::Number(Number::from_i64(i64::from(time.second()))),
    ]));

    Ok(())
}

pub(crate) static WORDS: &[(&str, NativeFn)] = &[
    ("now", w_now),
    ("time:hour", w_hour),
    ("time:minute", w_minute),
    ("time:second", w_second),
    ("time:format", w_format),
    ("time:>vector", w_to_vector),
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
    fn component_accessors() {
        assert_eq!(run("12:30:45 time:hour ."), "12\n");
        assert_eq!(run("12:30:45 time:minute ."), "30\n");
        assert_eq!(run("12:30:45 time:second ."), "45\n");
    }

    #[test]
    fn time_arithmetic_through_operators() {
        assert_eq!(run("12:30:45 15 + ."), "12:31:00\n");
        assert_eq!(run("12:30:45 1h - ."), "11:30:45\n");
        assert_eq!(run("12:31:00 12:30:00 - ."), "60s\n");
    }

    #[test]
    fn format_uses_strftime_patterns() {
        assert_eq!(run("\"%H.%M\" 12:30:45 time:format ."), "12.30\n");
    }

    #[test]
    fn vector_conversion_round_trips() {
        assert_eq!(run("12:30:45 time:>vector ."), "12, 30, 45\n");
        assert_eq!(run("12:30:45 time:>vector vector:>time ."), "12:30:45\n");
    }

    #[test]
    fn now_produces_a_time() {
        assert_eq!(run("now time? ."), "true\n");
    }
}
