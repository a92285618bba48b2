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

//! Words operating on strings. Indices count Unicode code points, not bytes.

use std::io::Write;

use crate::context::Context;
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::quote::NativeFn;
use crate::value::Value;

type Result = std::result::Result<(), Error>;

fn index_error() -> Error {
    Error::new(ErrorKind::Range, "String index out of bounds.")
}

/// Position of the first occurrence of `needle` in `haystack`, in code
/// points.
fn find(haystack: &[char], needle: &[char]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Position of the last occurrence of `needle` in `haystack`, in code
/// points.
fn rfind(haystack: &[char], needle: &[char]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}

fn w_length(context: &mut Context, _: &mut dyn Write) -> Result {
    let length = context.peek()?.as_string()?.chars().count();

    context.push(Value::Number(Number::from_i64(length as i64)));

    Ok(())
}

fn w_starts_with(context: &mut Context, _: &mut dyn Write) -> Result {
    let string = context.pop()?;
    let substring = context.pop()?;
    let string: Vec<char> = string.as_string()?.chars().collect();
    let substring: Vec<char> = substring.as_string()?.chars().collect();
    let result = substring.len() <= string.len() && string[..substring.len()] == substring[..];

    context.push(Value::Boolean(result));

    Ok(())
}

fn w_ends_with(context: &mut Context, _: &mut dyn Write) -> Result {
    let string = context.pop()?;
    let substring = context.pop()?;
    let string: Vec<char> = string.as_string()?.chars().collect();
    let substring: Vec<char> = substring.as_string()?.chars().collect();
    let result = substring.len() <= string.len()
        && string[string.len() - substring.len()..] == substring[..];

    context.push(Value::Boolean(result));

    Ok(())
}

fn w_includes(context: &mut Context, _: &mut dyn Write) -> Result {
    let string = context.pop()?;
    let substring = context.pop()?;
    let string: Vec<char> = string.as_string()?.chars().collect();
    let substring: Vec<char> = substring.as_string()?.chars().collect();
    let result = substring.is_empty() || find(&string, &substring).is_some();

    context.push(Value::Boolean(result));

    Ok(())
}

/// Pushes the position of the substring as a number, or `false` when it does
/// not occur.
fn w_index_of(context: &mut Context, _: &mut dyn Write) -> Result {
    let string = context.pop()?;
    let substring = context.pop()?;
    let string: Vec<char> = string.as_string()?.chars().collect();
    let substring: Vec<char> = substring.as_string()?.chars().collect();

    if substring.len() > string.len() {
        context.push(Value::Boolean(false));
    } else if substring.is_empty() {
        context.push(Value::Number(Number::from_i64(0)));
    } else {
        match find(&string, &substring) {
            Some(position) => context.push(Value::Number(Number::from_i64(position as i64))),
            None => context.push(Value::Boolean(false)),
        }
    }

    Ok(())
}

/// Pushes the position of the last occurrence of the substring as a number,
/// or `false` when it does not occur.
fn w_last_index_of(context: &mut Context, _: &mut dyn Write) -> Result {
    let string = context.pop()?;
    let substring = context.pop()?;
    let string: Vec<char> = string.as_string()?.chars().collect();
    let substring: Vec<char> = substring.as_string()?.chars().collect();

    if substring.len() > string.len() {
        context.push(Value::Boolean(false));
    } else if substring.is_empty() {
        context.push(Value::Number(Number::from_i64(0)));
    } else {
        match rfind(&string, &substring) {
            Some(position) => context.push(Value::Number(Number::from_i64(position as i64))),
            None => context.push(Value::Boolean(false)),
        }
    }

    Ok(())
}

fn w_reverse(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let result: String = value.as_string()?.chars().rev().collect();

    context.push(Value::String(result));

    Ok(())
}

fn convert(context: &mut Context, callback: impl Fn(char) -> String) -> Result {
    let value = context.pop()?;
    let result: String = value.as_string()?.chars().map(callback).collect();

    context.push(Value::String(result));

    Ok(())
}

fn w_lower_case(context: &mut Context, _: &mut dyn Write) -> Result {
    convert(context, |c| c.to_lowercase().collect())
}

fn w_upper_case(context: &mut Context, _: &mut dyn Write) -> Result {
    convert(context, |c| c.to_uppercase().collect())
}

fn w_swap_case(context: &mut Context, _: &mut dyn Write) -> Result {
    convert(context, |c| {
        if c.is_uppercase() {
            c.to_lowercase().collect()
        } else {
            c.to_uppercase().collect()
        }
    })
}

fn w_trim(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let result = String::from(value.as_string()?.trim());

    context.push(Value::String(result));

    Ok(())
}

fn w_trim_start(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let result = String::from(value.as_string()?.trim_start());

    context.push(Value::String(result));

    Ok(())
}

fn w_trim_end(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let result = String::from(value.as_string()?.trim_end());

    context.push(Value::String(result));

    Ok(())
}

/// Extracts the substring between two indices. Negative indices count from
/// the end of the string and the end index is inclusive.
fn w_substring(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let string: Vec<char> = value.as_string()?.chars().collect();
    let length = string.len() as i64;
    let mut begin = context.pop()?.as_number()?.to_long()?;
    let mut end = context.pop()?.as_number()?.to_long()?;

    if begin < 0 {
        begin += length;
    }
    if end < 0 {
        end += length;
    }

    if !(0..length).contains(&begin) || !(0..length).contains(&end) || end < begin {
        return Err(index_error());
    }

    let result: String = string[begin as usize..=end as usize].iter().collect();

    context.push(Value::String(result));

    Ok(())
}

fn w_split(context: &mut Context, _: &mut dyn Write) -> Result {
    let string_value = context.pop()?;
    let pattern_value = context.pop()?;
    let string = string_value.as_string()?;
    let pattern = pattern_value.as_string()?;
    let mut result: Vec<Value> = Vec::new();

    if pattern.is_empty() {
        for c in string.chars() {
            result.push(Value::String(String::from(c)));
        }
    } else {
        let mut parts: Vec<&str> = string.split(pattern).collect();

        // A trailing separator does not produce an empty final part.
        if parts.last() == Some(&"") {
            parts.pop();
        }
        for part in parts {
            result.push(Value::String(String::from(part)));
        }
    }

    context.push(Value::Vector(result));

    Ok(())
}

fn w_repeat(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let string = value.as_string()?;
    let count = context.pop()?.as_number()?.to_long()?;
    let mut result = String::new();

    for _ in 0..count.max(0) {
        result.push_str(string);
    }

    context.push(Value::String(result));

    Ok(())
}

/// Replaces the first occurrence of the needle, leaving later occurrences
/// untouched.
fn w_replace(context: &mut Context, _: &mut dyn Write) -> Result {
    let string_value = context.pop()?;
    let replacement_value = context.pop()?;
    let needle_value = context.pop()?;
    let string = string_value.as_string()?;
    let replacement = replacement_value.as_string()?;
    let needle = needle_value.as_string()?;
    let result = if needle.is_empty() {
        String::from(string)
    } else {
        string.replacen(needle, replacement, 1)
    };

    context.push(Value::String(result));

    Ok(())
}

fn pad(string: &str, pad_string: &str, target_length: i64) -> Option<String> {
    let length = string.chars().count() as i64;

    if length >= target_length || pad_string.is_empty() {
        return None;
    }

    let missing = (target_length - length) as usize;
    let padding: String = pad_string.chars().cycle().take(missing).collect();

    Some(padding)
}

fn w_pad_start(context: &mut Context, _: &mut dyn Write) -> Result {
    let string_value = context.pop()?;
    let pad_value = context.pop()?;
    let string = string_value.as_string()?;
    let pad_string = pad_value.as_string()?;
    let target_length = context.pop()?.as_number()?.to_long()?;
    let result = match pad(string, pad_string, target_length) {
        Some(padding) => format!("{padding}{string}"),
        None => String::from(string),
    };

    context.push(Value::String(result));

    Ok(())
}

fn w_pad_end(context: &mut Context, _: &mut dyn Write) -> Result {
    let string_value = context.pop()?;
    let pad_value = context.pop()?;
    let string = string_value.as_string()?;
    let pad_string = pad_value.as_string()?;
    let target_length = context.pop()?.as_number()?.to_long()?;
    let result = match pad(string, pad_string, target_length) {
        Some(padding) => format!("{string}{padding}"),
        None => String::from(string),
    };

    context.push(Value::String(result));

    Ok(())
}

/// Extracts the character at the given index. Negative indices count from
/// the end of the string.
fn w_at(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?;
    let string: Vec<char> = value.as_string()?.chars().collect();
    let length = string.len() as i64;
    let mut index = context.pop()?.as_number()?.to_long()?;

    if index < 0 {
        index += length;
    }
    if !(0..length).contains(&index) {
        return Err(index_error());
    }

    context.push(Value::String(String::from(string[index as usize])));

    Ok(())
}

pub(crate) static WORDS: &[(&str, NativeFn)] = &[
    ("string:length", w_length),
    // Testing methods.
    ("string:starts-with?", w_starts_with),
    ("string:ends-with?", w_ends_with),
    ("string:includes?", w_includes),
    ("string:index-of", w_index_of),
    ("string:last-index-of", w_last_index_of),
    // Modifications.
    ("string:reverse", w_reverse),
    ("string:lower-case", w_lower_case),
    ("string:upper-case", w_upper_case),
    ("string:swap-case", w_swap_case),
    ("string:trim", w_trim),
    ("string:trim-start", w_trim_start),
    ("string:trim-end", w_trim_end),
    ("string:substring", w_substring),
    ("string:split", w_split),
    ("string:repeat", w_repeat),
    ("string:replace", w_replace),
    ("string:pad-start", w_pad_start),
    ("string:pad-end", w_pad_end),
    // Element access.
    ("string:@", w_at),
];
