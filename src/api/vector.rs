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

//! Words operating on vectors.

use std::cmp::Ordering;
use std::io::Write;

use crate::calendar;
use crate::context::Context;
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::quote::NativeFn;
use crate::value::Value;

type Result = std::result::Result<(), Error>;

fn empty_vector_error() -> Error {
    Error::new(ErrorKind::Range, "Vector is empty.")
}

fn index_error() -> Error {
    Error::new(ErrorKind::Range, "Vector index out of bounds.")
}

/// Collects the given number of values off the stack into a vector, bottom
/// first.
fn w_vector(context: &mut Context, _: &mut dyn Write) -> Result {
    let size = context.pop()?.as_number()?.to_long()?;
    let mut elements = Vec::new();

    for _ in 0..size.max(0) {
        elements.push(context.pop()?);
    }
    elements.reverse();
    context.push(Value::Vector(elements));

    Ok(())
}

fn w_length(context: &mut Context, _: &mut dyn Write) -> Result {
    let length = context.peek()?.as_vector()?.len();

    context.push(Value::Number(Number::from_i64(length as i64)));

    Ok(())
}

fn w_max(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let elements = value.as_vector()?;
    let mut largest = elements.first().ok_or_else(empty_vector_error)?;

    for candidate in &elements[1..] {
        if candidate.compare(largest)? == Ordering::Greater {
            largest = candidate;
        }
    }
    context.push(largest.clone());

    Ok(())
}

fn w_min(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let elements = value.as_vector()?;
    let mut smallest = elements.first().ok_or_else(empty_vector_error)?;

    for candidate in &elements[1..] {
        if candidate.compare(smallest)? == Ordering::Less {
            smallest = candidate;
        }
    }
    context.push(smallest.clone());

    Ok(())
}

fn sum_of(elements: &[Value]) -> std::result::Result<Number, Error> {
    let mut sum = elements
        .first()
        .ok_or_else(empty_vector_error)?
        .as_number()?
        .clone();

    for element in &elements[1..] {
        sum = (&sum + element.as_number()?)?;
    }

    Ok(sum)
}

/// Arithmetic mean of the elements: the displayed magnitude of the sum
/// divided by the element count, keeping the sum's unit.
fn w_mean(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let elements = value.as_vector()?;
    let sum = sum_of(elements)?;
    let mean = (&sum.without_unit() / &Number::from_i64(elements.len() as i64))?;
    let result = match sum.unit() {
        Some(unit) => mean.with_unit(unit),
        None => mean,
    };

    context.push(Value::Number(result));

    Ok(())
}

fn w_sum(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let sum = sum_of(value.as_vector()?)?;

    context.push(Value::Number(sum));

    Ok(())
}

fn w_for_each(context: &mut Context, out: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();
    let value = context.pop()?;
    let elements = value.as_vector()?;

    for element in elements {
        context.push(element.clone());
        quote.call(context, out)?;
    }

    Ok(())
}

fn w_map(context: &mut Context, out: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();
    let value = context.pop()?;
    let elements = value.as_vector()?;
    let mut result = Vec::with_capacity(elements.len());

    for element in elements {
        context.push(element.clone());
        quote.call(context, out)?;
        result.push(context.pop()?);
    }
    context.push(Value::Vector(result));

    Ok(())
}

fn w_filter(context: &mut Context, out: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();
    let value = context.pop()?;
    let elements = value.as_vector()?;
    let mut result = Vec::new();

    for element in elements {
        context.push(element.clone());
        quote.call(context, out)?;
        if context.pop()?.as_boolean()? {
            result.push(element.clone());
        }
    }
    context.push(Value::Vector(result));

    Ok(())
}

fn w_reduce(context: &mut Context, out: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();
    let value = context.pop()?;
    let elements = value.as_vector()?;

    if elements.is_empty() {
        return Err(Error::new(ErrorKind::Range, "Cannot reduce empty vector."));
    }

    let mut result = elements[0].clone();

    for element in &elements[1..] {
        context.push(result);
        context.push(element.clone());
        quote.call(context, out)?;
        result = context.pop()?;
    }
    context.push(result);

    Ok(())
}

fn w_prepend(context: &mut Context, _: &mut dyn Write) -> Result {
    let mut elements = context.pop()?.as_vector()?.to_vec();
    let value = context.pop()?;

    elements.insert(0, value);
    context.push(Value::Vector(elements));

    Ok(())
}

fn w_append(context: &mut Context, _: &mut dyn Write) -> Result {
    let mut elements = context.pop()?.as_vector()?.to_vec();
    let value = context.pop()?;

    elements.push(value);
    context.push(Value::Vector(elements));

    Ok(())
}

/// Inserts a value before the given index. Negative indices count from the
/// end of the vector.
fn w_insert(context: &mut Context, _: &mut dyn Write) -> Result {
    let mut elements = context.pop()?.as_vector()?.to_vec();
    let size = elements.len() as i64;
    let value = context.pop()?;
    let mut index = context.pop()?.as_number()?.to_long()?;

    if index < 0 {
        index += size;
    }
    if !(0..size).contains(&index) {
        return Err(index_error());
    }
    elements.insert(index as usize, value);
    context.push(Value::Vector(elements));

    Ok(())
}

fn w_reverse(context: &mut Context, _: &mut dyn Write) -> Result {
    let mut elements = context.pop()?.as_vector()?.to_vec();

    elements.reverse();
    context.push(Value::Vector(elements));

    Ok(())
}

/// Pushes every element of the vector onto the stack, bottom first.
fn w_extract(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let elements = value.as_vector()?;

    for element in elements {
        context.push(element.clone());
    }

    Ok(())
}

/// Insertion sort; the comparison can raise, which rules out the standard
/// library's infallible sorts.
fn w_sort(context: &mut Context, _: &mut dyn Write) -> Result {
    let mut elements = context.pop()?.as_vector()?.to_vec();

    for i in 1..elements.len() {
        let mut j = i;

        while j > 0 && elements[j - 1].compare(&elements[j])? == Ordering::Greater {
            elements.swap(j - 1, j);
            j -= 1;
        }
    }
    context.push(Value::Vector(elements));

    Ok(())
}

/// Extracts the element at the given index. Negative indices count from the
/// end of the vector.
fn w_at(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let elements = value.as_vector()?;
    let size = elements.len() as i64;
    let mut index = context.pop()?.as_number()?.to_long()?;

    if index < 0 {
        index += size;
    }
    if !(0..size).contains(&index) {
        return Err(index_error());
    }
    context.push(elements[index as usize].clone());

    Ok(())
}

/// Converts a `[year, month, day]` vector into a date. The month component
/// may be a month value or a calendar number.
fn w_to_date(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let elements = value.as_vector()?;

    if elements.len() != 3 {
        return Err(Error::new(ErrorKind::Range, "Date needs three values."));
    }

    let year = elements[0].as_number()?.to_long()?;
    let month = match &elements[1] {
        Value::Month(month) => *month,
        element => {
            let number = element.as_number()?.to_long()?;

            u32::try_from(number)
                .ok()
                .and_then(calendar::Month::from_number)
                .ok_or_else(|| Error::new(ErrorKind::Range, "Given month is out of range."))?
        }
    };
    let day = elements[2].as_number()?.to_long()?;

    context.push(Value::Date(calendar::make_date(year, month, day)?));

    Ok(())
}

/// Converts a `[hour, minute, second]` vector into a time.
fn w_to_time(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let elements = value.as_vector()?;

    if elements.len() != 3 {
        return Err(Error::new(ErrorKind::Range, "Time needs three values."));
    }

    let hour = elements[0].as_number()?.to_long()?;
    let minute = elements[1].as_number()?.to_long()?;
    let second = elements[2].as_number()?.to_long()?;

    context.push(Value::Time(calendar::make_time(hour, minute, second)?));

    Ok(())
}

pub(crate) static WORDS: &[(&str, NativeFn)] = &[
    ("vector", w_vector),
    ("vector:length", w_length),
    ("vector:max", w_max),
    ("vector:min", w_min),
    ("vector:mean", w_mean),
    ("vector:sum", w_sum),
    // Iteration.
    ("vector:for-each", w_for_each),
    ("vector:map", w_map),
    ("vector:filter", w_filter),
    ("vector:reduce", w_reduce),
    // Modifications.
    ("vector:prepend", w_prepend),
    ("vector:append", w_append),
    ("vector:insert", w_insert),
    ("vector:reverse", w_reverse),
    ("vector:extract", w_extract),
    ("vector:sort", w_sort),
    // Element access.
    ("vector:@", w_at),
    // Conversions.
    ("vector:>date", w_to_date),
    ("vector:>time", w_to_time),
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

    fn fail(source: &str) -> Error {
        let mut context = Context::new();
        let mut out = Vec::new();

        context.execute(source, 1, &mut out).unwrap_err()
    }

    #[test]
    fn vector_collects_from_the_stack() {
        assert_eq!(run("1 2 3 3 vector ."), "1, 2, 3\n");
        assert_eq!(run("0 vector vector:length ."), "0\n");
    }

    #[test]
    fn aggregates() {
        assert_eq!(run("[3, 1, 2] vector:max ."), "3\n");
        assert_eq!(run("[3, 1, 2] vector:min ."), "1\n");
        assert_eq!(run("[1, 2, 3] vector:sum ."), "6\n");
        assert_eq!(run("[1, 2, 3, 4] vector:mean ."), "2.5\n");
        assert_eq!(fail("[] vector:max").kind(), ErrorKind::Range);
    }

    #[test]
    fn sum_renormalizes_units() {
        assert_eq!(run("[500g, 600g] vector:sum ."), "1.1kg\n");
        assert_eq!(run("[1kg, 3kg] vector:mean ."), "2kg\n");
    }

    #[test]
    fn map_transforms_every_element() {
        assert_eq!(run("[1, 2, 3] (dup *) vector:map ."), "1, 4, 9\n");
    }

    #[test]
    fn map_with_identity_is_identity() {
        assert_eq!(run("[1, \"a\", true] () vector:map >source ."), "[1, \"a\", true]\n");
    }

    #[test]
    fn filter_keeps_matching_elements() {
        assert_eq!(run("[1, 2, 3, 4] (2 >) vector:filter ."), "3, 4\n");
    }

    #[test]
    fn for_each_runs_in_order() {
        assert_eq!(run("[1, 2, 3] (.) vector:for-each"), "1\n2\n3\n");
    }

    #[test]
    fn reduce_folds_left() {
        assert_eq!(run("[1, 2, 3, 4] (+) vector:reduce ."), "10\n");
        assert_eq!(fail("[] (+) vector:reduce").kind(), ErrorKind::Range);
    }

    #[test]
    fn structural_modifications() {
        assert_eq!(run("0 [1, 2] vector:prepend ."), "0, 1, 2\n");
        assert_eq!(run("3 [1, 2] vector:append ."), "1, 2, 3\n");
        assert_eq!(run("1 99 [1, 2, 3] vector:insert ."), "1, 99, 2, 3\n");
        assert_eq!(run("[1, 2, 3] vector:reverse ."), "3, 2, 1\n");
        assert_eq!(run("[3, 1, 2] vector:sort ."), "1, 2, 3\n");
        assert_eq!(run("[\"c\", \"a\", \"b\"] vector:sort ."), "a, b, c\n");
    }

    #[test]
    fn extract_spills_elements_onto_the_stack() {
        let mut context = Context::new();
        let mut out = Vec::new();

        context.execute("[1, 2, 3] vector:extract", 1, &mut out).unwrap();

        assert_eq!(context.depth(), 3);
        assert_eq!(context.pop().unwrap().to_source(), "3");
    }

    #[test]
    fn at_supports_negative_indices() {
        assert_eq!(run("0 [1, 2, 3] vector:@ ."), "1\n");
        assert_eq!(run("-1 [1, 2, 3] vector:@ ."), "3\n");
        assert_eq!(fail("3 [1, 2, 3] vector:@").kind(), ErrorKind::Range);
    }

    #[test]
    fn conversions_to_dates_and_times() {
        assert_eq!(run("[2020, 2, 29] vector:>date ."), "2020-02-29\n");
        assert_eq!(run("[2020, february, 29] vector:>date ."), "2020-02-29\n");
        assert_eq!(run("[12, 30, 45] vector:>time ."), "12:30:45\n");
        assert_eq!(fail("[2021, 2, 29] vector:>date").kind(), ErrorKind::Range);
        assert_eq!(fail("[1, 2] vector:>time").kind(), ErrorKind::Range);
    }
}
