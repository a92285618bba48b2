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

//! Words operating on records. Property order is insertion order.

use std::io::Write;

use indexmap::IndexMap;

use crate::context::Context;
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::quote::NativeFn;
use crate::value::Value;

type Result = std::result::Result<(), Error>;

fn w_size(context: &mut Context, _: &mut dyn Write) -> Result {
    let size = context.peek()?.as_record()?.len();

    context.push(Value::Number(Number::from_i64(size as i64)));

    Ok(())
}

fn w_keys(context: &mut Context, _: &mut dyn Write) -> Result {
    let keys: Vec<Value> = context
        .peek()?
        .as_record()?
        .keys()
        .map(|key| Value::String(key.clone()))
        .collect();

    context.push(Value::Vector(keys));

    Ok(())
}

fn w_values(context: &mut Context, _: &mut dyn Write) -> Result {
    let values: Vec<Value> = context.peek()?.as_record()?.values().cloned().collect();

    context.push(Value::Vector(values));

    Ok(())
}

fn w_for_each(context: &mut Context, out: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();
    let value = context.pop()?;
    let properties = value.as_record()?;

    for (key, property) in properties {
        context.push(Value::String(key.clone()));
        context.push(property.clone());
        quote.call(context, out)?;
    }

    Ok(())
}

/// Runs the quote on every key and value pair; the quote leaves the new key
/// and value on the stack.
fn w_map(context: &mut Context, out: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();
    let value = context.pop()?;
    let properties = value.as_record()?;
    let mut result = IndexMap::new();

    for (key, property) in properties {
        context.push(Value::String(key.clone()));
        context.push(property.clone());
        quote.call(context, out)?;

        let new_value = context.pop()?;
        let new_key = context.pop()?.as_string()?.to_string();

        result.insert(new_key, new_value);
    }
    context.push(Value::Record(result));

    Ok(())
}

fn w_filter(context: &mut Context, out: &mut dyn Write) -> Result {
    let quote = context.pop()?.as_quote()?.clone();
    let value = context.pop()?;
    let properties = value.as_record()?;
    let mut result = IndexMap::new();

    for (key, property) in properties {
        context.push(Value::String(key.clone()));
        context.push(property.clone());
        quote.call(context, out)?;
        if context.pop()?.as_boolean()? {
            result.insert(key.clone(), property.clone());
        }
    }
    context.push(Value::Record(result));

    Ok(())
}

fn w_at(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let properties = value.as_record()?;
    let key_value = context.pop()?;
    let key = key_value.as_string()?;

    match properties.get(key) {
        Some(property) => {
            context.push(property.clone());

            Ok(())
        }
        None => Err(Error::new(
            ErrorKind::Range,
            "Record index out of bounds.",
        )),
    }
}

/// Inserts or replaces a property. Replacing keeps the key's original
/// position.
fn w_set(context: &mut Context, _: &mut dyn Write) -> Result {
    let mut properties = context.pop()?.as_record()?.clone();
    let key = context.pop()?.as_string()?.to_string();
    let value = context.pop()?;

    properties.insert(key, value);
    context.push(Value::Record(properties));

    Ok(())
}

/// Converts the record into a vector of `[key, value]` pairs.
fn w_to_vector(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let properties = value.as_record()?;
    let result: Vec<Value> = properties
        .iter()
        .map(|(key, property)| {
            Value::Vector(vec![Value::String(key.clone()), property.clone()])
        })
        .collect();

    context.push(Value::Vector(result));

    Ok(())
}

pub(crate) static WORDS: &[(&str, NativeFn)] = &[
    ("record:size", w_size),
    ("record:keys", w_keys),
    ("record:values", w_values),
    // Iteration.
    ("record:for-each", w_for_each),
    ("record:map", w_map),
    ("record:filter", w_filter),
    // Element access.
    ("record:@", w_at),
    ("record:@=", w_set),
    // Conversions.
    ("record:>vector", w_to_vector),
];
