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

//! Arithmetic, equality and ordering dispatch over value pairs.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::calendar::{self, Month, Weekday};
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::unit;
use crate::value::Value;

use chrono::{NaiveDate, NaiveTime};

fn binary_type_error(verb: &str, a: &Value, preposition: &str, b: &Value) -> Error {
    Error::new(
        ErrorKind::Type,
        format!(
            "Cannot {verb} {} {preposition} {}.",
            a.type_description(),
            b.type_description()
        ),
    )
}

fn vector_length_check(a: &[Value], b: &[Value]) -> Result<(), Error> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::Range, "Vector length mismatch."))
    }
}

fn add_vector(a: &[Value], b: &[Value]) -> Result<Value, Error> {
    vector_length_check(a, b)?;

    let mut result = Vec::with_capacity(a.len());

    for (x, y) in a.iter().zip(b) {
        result.push(x.add(y)?);
    }

    Ok(Value::Vector(result))
}

fn add_month(month: Month, number: &Number) -> Result<Value, Error> {
    let delta = calendar::bare_delta(number, "Cannot add number to month.")?;

    Ok(Value::Month(month.plus(delta)))
}

fn add_weekday(weekday: Weekday, number: &Number) -> Result<Value, Error> {
    let delta = calendar::days_delta(number, "Cannot add number to weekday.")?;

    Ok(Value::Weekday(weekday.plus(delta)))
}

fn add_date(date: NaiveDate, number: &Number) -> Result<Value, Error> {
    let delta = calendar::days_delta(number, "Cannot add number to date.")?;

    Ok(Value::Date(calendar::date_plus_days(date, delta)?))
}

fn add_time(time: NaiveTime, number: &Number) -> Result<Value, Error> {
    let delta = calendar::seconds_delta(number, "Cannot add number to time.")?;

    Ok(Value::Time(calendar::time_plus_seconds(time, delta)))
}

fn subtract_vector(a: &[Value], b: &[Value]) -> Result<Value, Error> {
    vector_length_check(a, b)?;

    let mut result = Vec::with_capacity(a.len());

    for (x, y) in a.iter().zip(b) {
        result.push(x.subtract(y)?);
    }

    Ok(Value::Vector(result))
}

/// Record subtraction deletes the keys present in the right operand,
/// regardless of their values.
fn subtract_record(
    a: &IndexMap<String, Value>,
    b: &IndexMap<String, Value>,
) -> Value {
    let mut result = a.clone();

    for key in b.keys() {
        result.shift_remove(key);
    }

    Value::Record(result)
}

fn subtract_broadcast(a: &[Value], b: &Value) -> Result<Value, Error> {
    let mut result = Vec::with_capacity(a.len());

    for element in a {
        result.push(element.subtract(b)?);
    }

    Ok(Value::Vector(result))
}

fn subtract_month(month: Month, number: &Number) -> Result<Value, Error> {
    let delta = calendar::bare_delta(number, "Cannot subtract number from month.")?;

    Ok(Value::Month(month.plus(-delta)))
}

fn subtract_weekday(weekday: Weekday, number: &Number) -> Result<Value, Error> {
    let delta = calendar::days_delta(number, "Cannot subtract number from weekday.")?;

    Ok(Value::Weekday(weekday.plus(-delta)))
}

fn subtract_date(date: NaiveDate, number: &Number) -> Result<Value, Error> {
    let delta = calendar::days_delta(number, "Cannot subtract number from date.")?;

    Ok(Value::Date(calendar::date_plus_days(date, -delta)?))
}

fn subtract_time(time: NaiveTime, number: &Number) -> Result<Value, Error> {
    let delta = calendar::seconds_delta(number, "Cannot subtract number from time.")?;

    Ok(Value::Time(calendar::time_plus_seconds(time, -delta)))
}

fn multiply_vector(a: &[Value], b: &[Value]) -> Result<Value, Error> {
    vector_length_check(a, b)?;

    let mut result = Vec::with_capacity(a.len());

    for (x, y) in a.iter().zip(b) {
        result.push(x.multiply(y)?);
    }

    Ok(Value::Vector(result))
}

fn multiply_broadcast(a: &[Value], b: &Value) -> Result<Value, Error> {
    let mut result = Vec::with_capacity(a.len());

    for element in a {
        result.push(element.multiply(b)?);
    }

    Ok(Value::Vector(result))
}

fn divide_vector(a: &[Value], b: &[Value]) -> Result<Value, Error> {
    vector_length_check(a, b)?;

    let mut result = Vec::with_capacity(a.len());

    for (x, y) in a.iter().zip(b) {
        result.push(x.divide(y)?);
    }

    Ok(Value::Vector(result))
}

fn divide_broadcast(a: &[Value], b: &Value) -> Result<Value, Error> {
    let mut result = Vec::with_capacity(a.len());

    for element in a {
        result.push(element.divide(b)?);
    }

    Ok(Value::Vector(result))
}

impl Value {
    /// Addition dispatch: numbers, pointwise vectors, string concatenation
    /// and calendar offsets.
    ///
    /// # Errors
    ///
    /// Returns a *type* error naming both variants for unsupported
    /// combinations and propagates errors from element operations.
    pub fn add(&self, that: &Value) -> Result<Value, Error> {
        match (self, that) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number((a + b)?)),
            (Value::Vector(a), Value::Vector(b)) => add_vector(a, b),
            (Value::String(a), Value::String(b)) => {
                Ok(Value::String(format!("{a}{b}")))
            }
            (Value::Month(a), Value::Number(b)) => add_month(*a, b),
            (Value::Weekday(a), Value::Number(b)) => add_weekday(*a, b),
            (Value::Date(a), Value::Number(b)) => add_date(*a, b),
            (Value::Time(a), Value::Number(b)) => add_time(*a, b),
            _ => Err(binary_type_error("add", that, "to", self)),
        }
    }

    /// Subtraction dispatch: numbers, pointwise vectors, record key
    /// deletion, date and time differences, calendar offsets and the
    /// vector broadcast.
    ///
    /// # Errors
    ///
    /// Returns a *type* error naming both variants for unsupported
    /// combinations and propagates errors from element operations.
    pub fn subtract(&self, that: &Value) -> Result<Value, Error> {
        match (self, that) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number((a - b)?)),
            (Value::Vector(a), Value::Vector(b)) => subtract_vector(a, b),
            (Value::Record(a), Value::Record(b)) => Ok(subtract_record(a, b)),
            (Value::Date(a), Value::Date(b)) => Ok(Value::Number(
                Number::from_i64(calendar::days_between(*a, *b)).with_unit(unit::DAY),
            )),
            (Value::Time(a), Value::Time(b)) => Ok(Value::Number(
                Number::from_i64(calendar::time_as_seconds(*a) - calendar::time_as_seconds(*b))
                    .with_unit(unit::SECOND),
            )),
            (Value::Month(a), Value::Number(b)) => subtract_month(*a, b),
            (Value::Weekday(a), Value::Number(b)) => subtract_weekday(*a, b),
            (Value::Date(a), Value::Number(b)) => subtract_date(*a, b),
            (Value::Time(a), Value::Number(b)) => subtract_time(*a, b),
            (Value::Vector(a), Value::Number(_)) => subtract_broadcast(a, that),
            _ => Err(binary_type_error("subtract", that, "from", self)),
        }
    }

    /// Multiplication dispatch: numbers, pointwise vectors and the vector
    /// broadcast.
    ///
    /// # Errors
    ///
    /// Returns a *type* error naming both variants for unsupported
    /// combinations and propagates errors from element operations.
    pub fn multiply(&self, that: &Value) -> Result<Value, Error> {
        match (self, that) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number((a * b)?)),
            (Value::Vector(a), Value::Vector(b)) => multiply_vector(a, b),
            (Value::Vector(a), Value::Number(_)) => multiply_broadcast(a, that),
            _ => Err(binary_type_error("multiply", that, "with", self)),
        }
    }

    /// Division dispatch: numbers, pointwise vectors and the vector
    /// broadcast.
    ///
    /// # Errors
    ///
    /// Returns a *type* error naming both variants for unsupported
    /// combinations, a *range* error on division by zero and propagates
    /// errors from element operations.
    pub fn divide(&self, that: &Value) -> Result<Value, Error> {
        match (self, that) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number((a / b)?)),
            (Value::Vector(a), Value::Vector(b)) => divide_vector(a, b),
            (Value::Vector(a), Value::Number(_)) => divide_broadcast(a, that),
            _ => Err(binary_type_error("divide", that, "with", self)),
        }
    }

    /// Structural equality within the same variant; different variants
    /// compare unequal.
    ///
    /// # Errors
    ///
    /// Returns a *unit* error when comparing dimensionally incompatible
    /// numbers.
    pub fn equals(&self, that: &Value) -> Result<bool, Error> {
        match (self, that) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a == b),
            (Value::Number(a), Value::Number(b)) => a.equals(b),
            (Value::String(a), Value::String(b)) => Ok(a == b),
            (Value::Vector(a), Value::Vector(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (x, y) in a.iter().zip(b) {
                    if !x.equals(y)? {
                        return Ok(false);
                    }
                }

                Ok(true)
            }
            (Value::Record(a), Value::Record(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (key, x) in a {
                    match b.get(key) {
                        Some(y) if x.equals(y)? => {}
                        _ => return Ok(false),
                    }
                }

                Ok(true)
            }
            (Value::Quote(a), Value::Quote(b)) => Ok(a == b),
            (Value::Date(a), Value::Date(b)) => Ok(a == b),
            (Value::Time(a), Value::Time(b)) => Ok(a == b),
            (Value::Month(a), Value::Month(b)) => Ok(a == b),
            (Value::Weekday(a), Value::Weekday(b)) => Ok(a == b),
            _ => Ok(false),
        }
    }

    /// Ordering, defined for numbers, strings, vectors (lexicographic) and
    /// months (calendar order).
    ///
    /// # Errors
    ///
    /// Returns a *type* error for any other combination of variants and a
    /// *unit* error for dimensionally incompatible numbers.
    pub fn compare(&self, that: &Value) -> Result<Ordering, Error> {
        match (self, that) {
            (Value::Number(a), Value::Number(b)) => a.compare(b),
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            (Value::Vector(a), Value::Vector(b)) => {
                for (x, y) in a.iter().zip(b) {
                    let ordering = x.compare(y)?;

                    if ordering != Ordering::Equal {
                        return Ok(ordering);
                    }
                }

                Ok(a.len().cmp(&b.len()))
            }
            (Value::Month(a), Value::Month(b)) => Ok(a.cmp(b)),
            _ => Err(binary_type_error("compare", that, "with", self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::Number;

    fn number(input: &str) -> Value {
        Value::Number(Number::parse(input).unwrap())
    }

    fn vector(inputs: &[&str]) -> Value {
        Value::Vector(inputs.iter().map(|input| number(input)).collect())
    }

    fn string(input: &str) -> Value {
        Value::String(String::from(input))
    }

    #[test]
    fn number_addition() {
        let result = number("1").add(&number("2")).unwrap();

        assert_eq!(result.to_source(), "3");
    }

    #[test]
    fn vector_addition_is_pointwise() {
        let result = vector(&["1", "2"]).add(&vector(&["10", "20"])).unwrap();

        assert_eq!(result.to_source(), "[11, 22]");
    }

    #[test]
    fn vector_length_mismatch_is_a_range_error() {
        let error = vector(&["1", "2"]).add(&vector(&["1"])).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Range);
    }

    #[test]
    fn string_concatenation() {
        let result = string("foo").add(&string("bar")).unwrap();

        assert_eq!(result.to_source(), "\"foobar\"");
    }

    #[test]
    fn string_plus_vector_is_a_type_error() {
        let error = string("abc").add(&vector(&["1"])).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Type);
        assert!(error.message().contains("vector"));
        assert!(error.message().contains("string"));
    }

    #[test]
    fn record_subtraction_deletes_keys() {
        let mut a = IndexMap::new();

        a.insert(String::from("x"), number("1"));
        a.insert(String::from("y"), number("2"));

        let mut b = IndexMap::new();

        b.insert(String::from("y"), number("999"));

        let result = Value::Record(a).subtract(&Value::Record(b)).unwrap();

        assert_eq!(result.to_source(), "{\"x\": 1}");
    }

    #[test]
    fn date_difference_is_in_days() {
        let a = Value::Date(calendar::parse_date("2020-03-01").unwrap());
        let b = Value::Date(calendar::parse_date("2020-02-28").unwrap());
        let result = a.subtract(&b).unwrap();

        assert_eq!(result.to_source(), "2d");
    }

    #[test]
    fn time_difference_is_in_seconds() {
        let a = Value::Time(calendar::parse_time("12:30:45").unwrap());
        let b = Value::Time(calendar::parse_time("12:30:00").unwrap());
        let result = a.subtract(&b).unwrap();

        assert_eq!(result.to_source(), "45s");
    }

    #[test]
    fn date_plus_day_unit_offset() {
        let date = Value::Date(calendar::parse_date("2020-02-28").unwrap());
        let result = date.add(&number("2d")).unwrap();

        assert_eq!(result.to_source(), "2020-03-01");
    }

    #[test]
    fn date_plus_hour_unit_is_a_type_error() {
        let date = Value::Date(calendar::parse_date("2020-02-28").unwrap());
        let error = date.add(&number("2h")).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Type);
    }

    #[test]
    fn time_offsets_scale_by_unit() {
        let time = Value::Time(calendar::parse_time("10:00:00").unwrap());

        assert_eq!(
            time.add(&number("90")).unwrap().to_source(),
            "10:01:30"
        );
        assert_eq!(
            time.add(&number("2min")).unwrap().to_source(),
            "10:02:00"
        );
        assert_eq!(time.add(&number("3h")).unwrap().to_source(), "13:00:00");
        assert_eq!(
            time.subtract(&number("1h")).unwrap().to_source(),
            "09:00:00"
        );
    }

    #[test]
    fn month_and_weekday_offsets_wrap() {
        let month = Value::Month(Month::December);

        assert_eq!(month.add(&number("1")).unwrap().to_source(), "january");
        assert_eq!(
            month.subtract(&number("12")).unwrap().to_source(),
            "december"
        );

        let weekday = Value::Weekday(Weekday::Saturday);

        assert_eq!(weekday.add(&number("1")).unwrap().to_source(), "sunday");
    }

    #[test]
    fn month_offset_with_unit_is_a_type_error() {
        let month = Value::Month(Month::May);
        let error = month.add(&number("1d")).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Type);
    }

    #[test]
    fn vector_broadcasts() {
        assert_eq!(
            vector(&["1", "2", "3"])
                .multiply(&number("2"))
                .unwrap()
                .to_source(),
            "[2, 4, 6]"
        );
        assert_eq!(
            vector(&["2", "4", "6"])
                .divide(&number("2"))
                .unwrap()
                .to_source(),
            "[1, 2, 3]"
        );
        assert_eq!(
            vector(&["2", "4"])
                .subtract(&number("1"))
                .unwrap()
                .to_source(),
            "[1, 3]"
        );
    }

    #[test]
    fn equality_is_structural() {
        assert!(vector(&["1", "2"]).equals(&vector(&["1", "2"])).unwrap());
        assert!(!vector(&["1", "2"]).equals(&vector(&["2", "1"])).unwrap());
        assert!(!number("1").equals(&string("1")).unwrap());
        assert!(number("1km").equals(&number("1000m")).unwrap());
    }

    #[test]
    fn record_equality_ignores_insertion_order() {
        let mut a = IndexMap::new();

        a.insert(String::from("x"), number("1"));
        a.insert(String::from("y"), number("2"));

        let mut b = IndexMap::new();

        b.insert(String::from("y"), number("2"));
        b.insert(String::from("x"), number("1"));

        assert!(Value::Record(a).equals(&Value::Record(b)).unwrap());
    }

    #[test]
    fn comparison_is_lexicographic_for_vectors() {
        assert_eq!(
            vector(&["1", "2"]).compare(&vector(&["1", "3"])).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            vector(&["1", "2"]).compare(&vector(&["1", "2", "0"])).unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn comparison_across_variants_is_a_type_error() {
        let error = number("1").compare(&string("1")).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Type);
    }

    #[test]
    fn month_ordering_follows_the_calendar() {
        assert_eq!(
            Value::Month(Month::January)
                .compare(&Value::Month(Month::December))
                .unwrap(),
            Ordering::Less
        );
    }
}
