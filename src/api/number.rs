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

//! Words operating on numbers.

use std::cmp::Ordering;
use std::io::Write;

use crate::calendar::{Month, Weekday};
use crate::context::Context;
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::quote::NativeFn;
use crate::value::Value;

type Result = std::result::Result<(), Error>;

fn w_has_unit(context: &mut Context, _: &mut dyn Write) -> Result {
    let result = context.peek()?.as_number()?.unit().is_some();

    context.push(Value::Boolean(result));

    Ok(())
}

fn w_unit(context: &mut Context, _: &mut dyn Write) -> Result {
    match context.peek()?.as_number()?.unit() {
        Some(unit) => {
            context.push(Value::String(String::from(unit.symbol())));

            Ok(())
        }
        None => Err(Error::new(
            ErrorKind::Unit,
            "Value has no measurement unit.",
        )),
    }
}

fn w_unit_type(context: &mut Context, _: &mut dyn Write) -> Result {
    match context.peek()?.as_number()?.unit() {
        Some(unit) => {
            context.push(Value::String(String::from(unit.quantity().name())));

            Ok(())
        }
        None => Err(Error::new(
            ErrorKind::Unit,
            "Value has no measurement unit.",
        )),
    }
}

fn w_drop_unit(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?.as_number()?.without_unit();

    context.push(Value::Number(value));

    Ok(())
}

fn w_range(context: &mut Context, _: &mut dyn Write) -> Result {
    let limit = context.pop()?.as_number()?.clone();
    let mut current = context.pop()?.as_number()?.clone();
    let mut result = Vec::new();

    while current.compare(&limit)? == Ordering::Less {
        result.push(Value::Number(current.clone()));
        current.increment();
    }
    context.push(Value::Vector(result));

    Ok(())
}

fn w_clamp(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?.as_number()?.clone();
    let max = context.pop()?.as_number()?.clone();
    let min = context.pop()?.as_number()?.clone();
    let result = if value.compare(&max)? == Ordering::Greater {
        max
    } else if value.compare(&min)? == Ordering::Less {
        min
    } else {
        value
    };

    context.push(Value::Number(result));

    Ok(())
}

fn w_times(context: &mut Context, out: &mut dyn Write) -> Result {
    let count = context.pop()?.as_number()?.to_long()?.unsigned_abs();
    let quote = context.pop()?.as_quote()?.clone();

    for _ in 0..count {
        quote.call(context, out)?;
    }

    Ok(())
}

fn apply(
    context: &mut Context,
    callback: impl Fn(&Number) -> std::result::Result<Number, Error>,
) -> Result {
    let value = context.pop()?;
    let result = callback(value.as_number()?)?;

    context.push(Value::Number(result));

    Ok(())
}

fn apply2(
    context: &mut Context,
    callback: impl Fn(&Number, &Number) -> std::result::Result<Number, Error>,
) -> Result {
    let a = context.pop()?.as_number()?.clone();
    let b = context.pop()?.as_number()?.clone();
    let result = callback(&a, &b)?;

    context.push(Value::Number(result));

    Ok(())
}

fn w_exp(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::exp)
}

fn w_exp2(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::exp2)
}

fn w_expm1(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::exp_m1)
}

fn w_log(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::log)
}

fn w_log10(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::log10)
}

fn w_log2(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::log2)
}

fn w_log1p(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::log_1p)
}

fn w_pow(context: &mut Context, _: &mut dyn Write) -> Result {
    apply2(context, Number::pow)
}

fn w_sqrt(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::sqrt)
}

fn w_cbrt(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::cbrt)
}

fn w_hypot(context: &mut Context, _: &mut dyn Write) -> Result {
    apply2(context, Number::hypot)
}

fn w_acos(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::acos)
}

fn w_asin(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::asin)
}

fn w_atan(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::atan)
}

fn w_atan2(context: &mut Context, _: &mut dyn Write) -> Result {
    apply2(context, Number::atan2)
}

fn w_cos(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::cos)
}

fn w_sin(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::sin)
}

fn w_tan(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::tan)
}

fn w_sinh(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::sinh)
}

fn w_cosh(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::cosh)
}

fn w_tanh(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::tanh)
}

fn w_asinh(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::asinh)
}

fn w_acosh(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::acosh)
}

fn w_atanh(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, Number::atanh)
}

fn w_deg(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, |value| {
        let scaled = (value * &Number::from_i64(180))?;

        &scaled / &Number::from_f64(std::f64::consts::PI)?
    })
}

fn w_rad(context: &mut Context, _: &mut dyn Write) -> Result {
    apply(context, |value| {
        let scaled = (value * &Number::from_f64(std::f64::consts::PI)?)?;

        &scaled / &Number::from_i64(180)
    })
}

fn w_to_month(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?.as_number()?.to_long()?;
    let month = u32::try_from(value)
        .ok()
        .and_then(Month::from_number)
        .ok_or_else(|| Error::new(ErrorKind::Range, "Month index out of range."))?;

    context.push(Value::Month(month));

    Ok(())
}

fn w_to_weekday(context: &mut Context, _: &mut dyn Write) -> Result {
    let value = context.pop()?.as_number()?.to_long()?;
    let weekday = u32::try_from(value)
        .ok()
        .and_then(Weekday::from_number)
        .ok_or_else(|| Error::new(ErrorKind::Range, "Weekday index out of range."))?;

    context.push(Value::Weekday(weekday));

    Ok(())
}

pub(crate) static WORDS: &[(&str, NativeFn)] = &[
    ("number:has-unit?", w_has_unit),
    ("number:unit", w_unit),
    ("number:unit-type", w_unit_type),
    ("number:drop-unit", w_drop_unit),
    ("number:range", w_range),
    ("number:clamp", w_clamp),
    ("number:times", w_times),
    // Exponential functions.
    ("number:exp", w_exp),
    ("number:exp2", w_exp2),
    ("number:expm1", w_expm1),
    ("number:log", w_log),
    ("number:log10", w_log10),
    ("number:log2", w_log2),
    ("number:log1p", w_log1p),
    // Power functions.
    ("number:pow", w_pow),
    ("number:sqrt", w_sqrt),
    ("number:cbrt", w_cbrt),
    ("number:hypot", w_hypot),
    // Trigonometric functions.
    ("number:acos", w_acos),
    ("number:asin", w_asin),
    ("number:atan", w_atan),
    ("number:atan2", w_atan2),
    ("number:cos", w_cos),
    ("number:sin", w_sin),
    ("number:tan", w_tan),
    ("number:deg", w_deg),
    ("number:rad", w_rad),
    // Hyperbolic functions.
    ("number:sinh", w_sinh),
    ("number:cosh", w_cosh),
    ("number:tanh", w_tanh),
    ("number:asinh", w_asinh),
    ("number:acosh", w_acosh),
    ("number:atanh", w_atanh),
    // Conversions.
    ("number:>month", w_to_month),
    ("number:>weekday", w_to_weekday),
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
    fn unit_introspection() {
        assert_eq!(run("5kg number:has-unit? ."), "true\n");
        assert_eq!(run("5 number:has-unit? ."), "false\n");
        assert_eq!(run("5kg number:unit ."), "kg\n");
        assert_eq!(run("5kg number:unit-type ."), "mass\n");
        assert_eq!(run("5kg number:drop-unit number:has-unit? ."), "false\n");
        assert_eq!(fail("5 number:unit").kind(), ErrorKind::Unit);
    }

    #[test]
    fn range_builds_half_open_interval() {
        assert_eq!(run("1 5 number:range ."), "1, 2, 3, 4\n");
        assert_eq!(run("3 3 number:range vector:length ."), "0\n");
    }

    #[test]
    fn clamp_limits_to_bounds() {
        assert_eq!(run("1 10 5 number:clamp ."), "5\n");
        assert_eq!(run("1 10 -3 number:clamp ."), "1\n");
        assert_eq!(run("1 10 99 number:clamp ."), "10\n");
    }

    #[test]
    fn times_repeats_the_quote() {
        assert_eq!(run("0 (1 +) 3 number:times ."), "3\n");
        assert_eq!(run("0 (1 +) -3 number:times ."), "3\n");
    }

    #[test]
    fn transcendentals_round_trip_through_doubles() {
        assert_eq!(run("0 number:exp ."), "1\n");
        assert_eq!(run("1 number:log ."), "0\n");
        assert_eq!(run("9 number:sqrt ."), "3\n");
        assert_eq!(run("27 number:cbrt ."), "3\n");
        assert_eq!(run("3 4 number:hypot ."), "5\n");
    }

    #[test]
    fn log_of_zero_is_a_domain_error() {
        assert_eq!(fail("0 number:log").kind(), ErrorKind::Domain);
    }

    #[test]
    fn pow_takes_the_base_from_the_top() {
        assert_eq!(run("2 3 number:pow ."), "9\n");
    }

    #[test]
    fn degree_radian_conversions_invert() {
        assert_eq!(run("90 number:rad number:deg ."), "90\n");
    }

    #[test]
    fn month_and_weekday_conversions() {
        assert_eq!(run("3 number:>month ."), "march\n");
        assert_eq!(run("1 number:>weekday ."), "sunday\n");
        assert_eq!(fail("13 number:>month").kind(), ErrorKind::Range);
        assert_eq!(fail("0 number:>weekday").kind(), ErrorKind::Range);
    }
}
