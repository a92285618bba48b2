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

//! The polymorphic value model.

mod ops;

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use indexmap::IndexMap;
use itertools::Itertools;

use crate::calendar::{Month, Weekday};
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::quote::Quote;

/// A value of the language: a tagged sum over the ten supported variants.
///
/// The derived `PartialEq` is structural; the [`equals`](Value::equals)
/// method implements the language's `=` word, which raises a *unit* error
/// for dimensionally incompatible numbers.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    Number(Number),
    String(String),
    Vector(Vec<Value>),
    Record(IndexMap<String, Value>),
    Quote(Quote),
    Date(NaiveDate),
    Time(NaiveTime),
    Month(Month),
    Weekday(Weekday),
}

impl Value {
    /// Name of the value's variant, as used in error messages and in typed
    /// dictionary keys.
    #[must_use]
    pub fn type_description(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Vector(_) => "vector",
            Value::Record(_) => "record",
            Value::Quote(_) => "quote",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Month(_) => "month",
            Value::Weekday(_) => "weekday",
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        Error::new(
            ErrorKind::Type,
            format!(
                "Unexpected {}; Was expecting {expected}.",
                self.type_description()
            ),
        )
    }

    /// # Errors
    ///
    /// Returns a *type* error if the value is not a boolean.
    pub fn as_boolean(&self) -> Result<bool, Error> {
        match self {
            Value::Boolean(value) => Ok(*value),
            _ => Err(self.unexpected("boolean")),
        }
    }

    /// # Errors
    ///
    /// Returns a *type* error if the value is not a number.
    pub fn as_number(&self) -> Result<&Number, Error> {
        match self {
            Value::Number(value) => Ok(value),
            _ => Err(self.unexpected("number")),
        }
    }

    /// # Errors
    ///
    /// Returns a *type* error if the value is not a string.
    pub fn as_string(&self) -> Result<&str, Error> {
        match self {
            Value::String(value) => Ok(value),
            _ => Err(self.unexpected("string")),
        }
    }

    /// # Errors
    ///
    /// Returns a *type* error if the value is not a vector.
    pub fn as_vector(&self) -> Result<&[Value], Error> {
        match self {
            Value::Vector(value) => Ok(value),
            _ => Err(self.unexpected("vector")),
        }
    }

    /// # Errors
    ///
    /// Returns a *type* error if the value is not a record.
    pub fn as_record(&self) -> Result<&IndexMap<String, Value>, Error> {
        match self {
            Value::Record(value) => Ok(value),
            _ => Err(self.unexpected("record")),
        }
    }

    /// # Errors
    ///
    /// Returns a *type* error if the value is not a quote.
    pub fn as_quote(&self) -> Result<&Quote, Error> {
        match self {
            Value::Quote(value) => Ok(value),
            _ => Err(self.unexpected("quote")),
        }
    }

    /// # Errors
    ///
    /// Returns a *type* error if the value is not a date.
    pub fn as_date(&self) -> Result<NaiveDate, Error> {
        match self {
            Value::Date(value) => Ok(*value),
            _ => Err(self.unexpected("date")),
        }
    }

    /// # Errors
    ///
    /// Returns a *type* error if the value is not a time.
    pub fn as_time(&self) -> Result<NaiveTime, Error> {
        match self {
            Value::Time(value) => Ok(*value),
            _ => Err(self.unexpected("time")),
        }
    }

    /// # Errors
    ///
    /// Returns a *type* error if the value is not a month.
    pub fn as_month(&self) -> Result<Month, Error> {
        match self {
            Value::Month(value) => Ok(*value),
            _ => Err(self.unexpected("month")),
        }
    }

    /// # Errors
    ///
    /// Returns a *type* error if the value is not a weekday.
    pub fn as_weekday(&self) -> Result<Weekday, Error> {
        match self {
            Value::Weekday(value) => Ok(*value),
            _ => Err(self.unexpected("day of week")),
        }
    }

    /// Round trippable source form of the value: strings are escape quoted,
    /// vectors use `[ … ]`, records use `{ "k": v }`, quotes use `( … )` and
    /// dates and times their ISO forms.
    #[must_use]
    pub fn to_source(&self) -> String {
        match self {
            Value::String(value) => escape_string(value),
            Value::Vector(elements) => format!(
                "[{}]",
                elements.iter().map(Value::to_source).join(", ")
            ),
            Value::Record(properties) => format!(
                "{{{}}}",
                properties
                    .iter()
                    .map(|(key, value)| format!("{}: {}", escape_string(key), value.to_source()))
                    .join(", ")
            ),
            Value::Quote(quote) => quote.to_source(),
            _ => self.to_string(),
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
}

fn format_time(time: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

impl fmt::Display for Value {
    /// Human readable form: no quoting of strings, no brackets around
    /// vectors and records.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(value) => f.write_str(if *value { "true" } else { "false" }),
            Value::Number(value) => write!(f, "{value}"),
            Value::String(value) => f.write_str(value),
            Value::Vector(elements) => {
                f.write_str(&elements.iter().map(Value::to_string).join(", "))
            }
            Value::Record(properties) => f.write_str(
                &properties
                    .iter()
                    .map(|(key, value)| format!("{key}={value}"))
                    .join(", "),
            ),
            Value::Quote(quote) => f.write_str(&quote.to_source()),
            Value::Date(date) => f.write_str(&format_date(*date)),
            Value::Time(time) => f.write_str(&format_time(*time)),
            Value::Month(month) => write!(f, "{month}"),
            Value::Weekday(weekday) => write!(f, "{weekday}"),
        }
    }
}

/// Quotes a string and escapes the characters the parser knows how to read
/// back. Other control characters become `\uXXXX` sequences.
#[must_use]
pub fn escape_string(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 2);

    result.push('"');
    for c in input.chars() {
        match c {
            '\u{8}' => result.push_str("\\b"),
            '\t' => result.push_str("\\t"),
            '\n' => result.push_str("\\n"),
            '\u{c}' => result.push_str("\\f"),
            '\r' => result.push_str("\\r"),
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            c if (c as u32) < 0x20 => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar;

    fn number(input: &str) -> Value {
        Value::Number(Number::parse(input).unwrap())
    }

    #[test]
    fn display_is_the_human_form() {
        assert_eq!(format!("{}", Value::Boolean(true)), "true");
        assert_eq!(format!("{}", number("1.5kg")), "1.5kg");
        assert_eq!(format!("{}", Value::String(String::from("hello"))), "hello");
        assert_eq!(
            format!(
                "{}",
                Value::Vector(vec![number("1"), number("4"), number("9")])
            ),
            "1, 4, 9"
        );
        assert_eq!(
            format!(
                "{}",
                Value::Date(calendar::parse_date("2020-02-29").unwrap())
            ),
            "2020-02-29"
        );
        assert_eq!(format!("{}", Value::Month(Month::May)), "may");
    }

    #[test]
    fn to_source_quotes_strings() {
        let value = Value::String(String::from("a\"b\\c\n"));

        assert_eq!(value.to_source(), "\"a\\\"b\\\\c\\n\"");
    }

    #[test]
    fn to_source_wraps_collections() {
        let vector = Value::Vector(vec![number("1"), Value::String(String::from("x"))]);

        assert_eq!(vector.to_source(), "[1, \"x\"]");

        let mut properties = IndexMap::new();

        properties.insert(String::from("a"), number("1"));
        properties.insert(String::from("b"), Value::Boolean(false));

        assert_eq!(
            Value::Record(properties).to_source(),
            "{\"a\": 1, \"b\": false}"
        );
    }

    #[test]
    fn accessors_raise_type_errors() {
        let value = Value::Boolean(true);
        let error = value.as_number().unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Type);
        assert_eq!(
            error.message(),
            "Unexpected boolean; Was expecting number."
        );
    }
}
