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

//! Weekday constants and conversions.

use std::io::Write;

use crate::calendar::Weekday;
use crate::context::Context;
use crate::error::Error;
use crate::number::Number;
use crate::quote::NativeFn;
use crate::value::Value;

type Result = std::result::Result<(), Error>;

fn w_sunday(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Weekday(Weekday::Sunday));

    Ok(())
}

fn w_monday(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Weekday(Weekday::Monday));

    Ok(())
}

fn w_tuesday(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Weekday(Weekday::Tuesday));

    Ok(())
}

fn w_wednesday(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Weekday(Weekday::Wednesday));

    Ok(())
}

fn w_thursday(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Weekday(Weekday::Thursday));

    Ok(())
}

fn w_friday(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Weekday(Weekday::Friday));

    Ok(())
}

fn w_saturday(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Weekday(Weekday::Saturday));

    Ok(())
}

fn w_is_weekend(context: &mut Context, _: &mut dyn Write) -> Result {
    let result = context.peek()?.as_weekday()?.is_weekend();

    context.push(Value::Boolean(result));

    Ok(())
}

fn w_to_number(context: &mut Context, _: &mut dyn Write) -> Result {
    let weekday = context.pop()?.as_weekday()?;

    context.push(Value::Number(Number::from_i64(i64::from(weekday.number()))));

    Ok(())
}

pub(crate) static WORDS: &[(&str, NativeFn)] = &[
    // Constants.
    ("sunday", w_sunday),
    ("monday", w_monday),
    ("tuesday", w_tuesday),
    ("wednesday", w_wednesday),
    ("thursday", w_thursday),
    ("friday", w_friday),
    ("saturday", w_saturday),
    // Testing methods.
    ("weekday:weekend?", w_is_weekend),
    // Conversions.
    ("weekday:>number", w_to_number),
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
    fn constants_push_weekdays() {
        assert_eq!(run("sunday ."), "sunday\n");
        assert_eq!(run("friday weekday? ."), "true\n");
    }

    #[test]
    fn weekend_predicate_peeks() {
        assert_eq!(run("saturday weekday:weekend? ."), "true\n");
        assert_eq!(run("wednesday weekday:weekend? ."), "false\n");
    }

    #[test]
    fn conversion_to_number() {
        assert_eq!(run("sunday weekday:>number ."), "1\n");
        assert_eq!(run("saturday weekday:>number ."), "7\n");
    }

    #[test]
    fn arithmetic_wraps_through_operators() {
        assert_eq!(run("saturday 1 + ."), "sunday\n");
        assert_eq!(run("sunday 1d - ."), "saturday\n");
    }
}
