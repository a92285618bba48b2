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

//! Words operating on dates.

use std::fmt::Write as _;
use std::io::Write;

use chrono::{Datelike, Local};

use crate::calendar;
use crate::context::Context;
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::quote::NativeFn;
use crate::unit;
use crate::value::Value;

type Result = std::result::Result<(), Error>;

fn w_today(context: &mut Context, _: &mut dyn Write) -> Result {
    context.push(Value::Date(Local::now().date_naive()));

    Ok(())
}

fn w_tomorrow(context: &mut Context, _: &mut dyn Write) -> Result {
    let date = calendar::date_plus_days(Local::now().date_naive(), 1)?;

    context.push(Value::Date(date));

    Ok(())
}

fn w_yesterday(context: &mut Context, _: &mut dyn Write) -> Result {
    let date = calendar::date_plus_days(Local::now().date_naive(), -1)?;

    context.push(Value::Date(date));

    Ok(())
}

fn w_year(context: &mut Context, _: &mut dyn Write) -> Result {
    let year = context.peek()?.as_date()?.year();

    context.push(Value::Number(Number::from_i64(i64::from(year))));

    Ok(())
}

fn w_month(context: &mut Context, _: &mut dyn Write) -> Result {
    let month = calendar::month_of(context.peek()?.as_date()?);

    context.push(Value::Month(month));

    Ok(())
}

fn w_day(context: &mut Context, _: &mut dyn Write) -> Result {
    let day = context.peek()?.as_date()?.day();

    context.push(Value::Number(Number::from_i64(i64::from(day))));

    Ok(())
}

fn w_weekday(context: &mut Context, _: &mut dyn Write) -> Result {
    let weekday = calendar::weekday_of(context.peek()?.as_date()?);

    context.push(Value::Weekday(weekday));

    Ok(())
}

fn w_day_of_year(context: &mut Context, _: &mut dyn Write) -> Result {
    let ordinal = context.peek()?.as_date()?.ordinal();

    context.push(Value::Number(Number::from_i64(i64::from(ordinal))));

    Ok(())
}

fn w_days_in_month(context: &mut Context, _: &mut dyn Write) -> Result {
    let days = calendar::days_in_month(context.peek()?.as_date()?);

    context.push(Value::Number(Number::from_i64(days)));

    Ok(())
}

fn w_days_in_year(context: &mut Context, _: &mut dyn Write) -> Result {
    let days = calendar::days_in_year(context.peek()?.as_date()?);

    context.push(Value::Number(Number::from_i64(days)));

    Ok(())
}

fn w_is_leap_year(context: &mut Context, _: &mut dyn Write) -> Result {
    let result = calendar::is_leap_year(context.peek()?.as_date()?);

    context.push(Value::Boolean(result));

    Ok(())
}

/// Formats the date with a strftime pattern popped from below the date.
fn w_format(context: &mut Context, _: &mut dyn Write) -> Result {
    let date = context.pop()?.as_date()?;
    let format_value = context.pop()?;
    let format = format_value.as_string()?;
    let mut result = String::new();

    write!(result, "{}", date.format(format))
        .map_err(|_| Error::new(ErrorKind::Range, "Invalid date format string."))?;
    context.push(Value::String(result));

    Ok(())
}

/// Seconds from the Unix epoch to the date's midnight, as a time quantity.
fn w_to_number(context: &mut Context, _: &mut dyn Write) -> Result {
    let date = context.pop()?.as_date()?;
    let timestamp = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::new(ErrorKind::Range, "Date is out of range."))?
        .and_utc()
        .timestamp();

    context.push(Value::Number(
        Number::from_i64(timestamp).with_unit(unit::SECOND),
    ));

    Ok(())
}

fn w_to_vector(context: &mut Context, _: &mut dyn Write) -> Result {
    let date = context.pop()?.as_date()?;

    context.push(Value::Vector(vec![
        Value::Number(Number::from_i64(i64::from(date.year()))),
        Value::Month(calendar::month_of(date)),
        Value::Number(Number::from_i64(i64::from(date.day()))),
    ]));

    Ok(())
}

pub(crate) static WORDS: &[(&str, NativeFn)] = &[
    ("today", w_today),
    ("tomorrow", w_tomorrow),
    ("yesterday", w_yesterday),
    ("date:year", w_year),
    ("date:month", w_month),
    ("date:day", w_day),
    ("date:weekday", w_weekday),
    ("date:day-of-year", w_day_of_year),
    ("date:days-in-month", w_days_in_month),
    ("date:days-in-year", w_days_in_year),
    ("date:leap-year?", w_is_leap_year),
    ("date:format", w_format),
    ("date:>number", w_to_number),
    ("date:>vector", w_to_vector),
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
        assert_eq!(run("2020-02-29 date:year ."), "2020\n");
        assert_eq!(run("2020-02-29 date:month ."), "february\n");
        assert_eq!(run("2020-02-29 date:day ."), "29\n");
        assert_eq!(run("2020-02-29 date:weekday ."), "saturday\n");
        assert_eq!(run("2020-02-29 date:day-of-year ."), "60\n");
    }

    #[test]
    fn calendar_queries() {
        assert_eq!(run("2020-02-29 date:leap-year? ."), "true\n");
        assert_eq!(run("2021-02-01 date:leap-year? ."), "false\n");
        assert_eq!(run("2020-02-01 date:days-in-month ."), "29\n");
        assert_eq!(run("2020-06-01 date:days-in-year ."), "366\n");
    }

    #[test]
    fn date_arithmetic_through_operators() {
        assert_eq!(run("2020-02-28 1 + ."), "2020-02-29\n");
        assert_eq!(run("2020-03-01 1d - ."), "2020-02-29\n");
        assert_eq!(run("2020-03-01 2020-02-28 - ."), "2d\n");
    }

    #[test]
    fn format_uses_strftime_patterns() {
        assert_eq!(run("\"%Y/%m\" 2020-02-29 date:format ."), "2020/02\n");
    }

    #[test]
    fn epoch_conversion() {
        assert_eq!(run("1970-01-02 date:>number ."), "86400s\n");
    }

    #[test]
    fn vector_conversion_round_trips() {
        assert_eq!(run("2020-02-29 date:>vector ."), "2020, february, 29\n");
        assert_eq!(run("2020-02-29 date:>vector vector:>date ."), "2020-02-29\n");
    }

    #[test]
    fn today_produces_a_date() {
        assert_eq!(run("today date? ."), "true\n");
    }
}
