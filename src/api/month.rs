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

//! Month constants and conversions.

use std::io::Write;

use crate::calendar::Month;
use crate::context::Context;
use crate::error::Error;
use crate::number::Number;
use crate::quote::NativeFn;
use crate::value::Value;

type Result = std::result::Result<(), Error>;

fn w_january(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::January));

    Ok(())
}

fn w_february(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::February));

    Ok(())
}

fn w_march(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::March));

    Ok(())
}

fn w_april(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::April));

    Ok(())
}

fn w_may(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::May));

    Ok(())
}

fn w_june(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::June));

    Ok(())
}

fn w_july(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::July));

    Ok(())
}

fn w_august(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::August));

    Ok(())
}

fn w_september(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::September));

    Ok(())
}

fn w_october(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::October));

    Ok(())
}

fn w_november(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::November));

    Ok(())
}

fn w_december(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Month(Month::December));

    Ok(())
}

fn w_to_number(context: &mut Context, _: &mut dyn Write) -> Result {
    let month = context.pop()?.as_month()?;

    context.push(Value::Number(Number::from_i64(i64::from(month.number()))));

    Ok(())
}

pub(crate) static WORDS: &[(&str, NativeFn)] = &[
    ("january", w_january),
    ("february", w_february),
    ("march", w_march),
    ("april", w_april),
    ("may", w_may),
    ("june", w_june),
    ("july", w_july),
    ("august", w_august),
    ("september", w_september),
    ("october", w_october),
    ("november", w_november),
    ("december", w_december),
    ("month:>number", w_to_number),
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
    fn constants_push_months() {
        assert_eq!(run("january ."), "january\n");
        assert_eq!(run("december month? ."), "true\n");
    }

    #[test]
    fn conversion_to_number() {
        assert_eq!(run("march month:>number ."), "3\n");
    }

    #[test]
    fn arithmetic_wraps_through_operators() {
        assert_eq!(run("december 1 + ."), "january\n");
        assert_eq!(run("january 1 - ."), "december\n");
    }
}
