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

//! Arbitrary precision arithmetic with units.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{Error, ErrorKind};
use crate::unit::{self, Quantity, Unit};

/// Upper bound on rendered fraction digits for quotients whose decimal
/// expansion does not terminate.
const MAX_FRACTION_DIGITS: usize = 32;

/// A number with an optional measurement unit. The magnitude is an exact
/// rational, so arithmetic, comparison and the renormalization step never
/// lose precision.
///
/// The derived `PartialEq` is structural (same magnitude, same unit); the
/// [`equals`](Number::equals) method implements the language's unit-aware
/// equality.
#[derive(Clone, Debug, PartialEq)]
pub struct Number {
    value: BigRational,
    unit: Option<Unit>,
}

fn ratio(value: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(value))
}

impl Number {
    /// Returns a dimensionless number.
    #[must_use]
    pub fn new(value: BigRational) -> Number {
        Number { value, unit: None }
    }

    /// Returns a number with the same magnitude as this one but the given
    /// unit. No unit conversion is performed.
    #[must_use]
    pub fn with_unit(&self, unit: Unit) -> Number {
        Number {
            value: self.value.clone(),
            unit: Some(unit),
        }
    }

    /// Returns a dimensionless zero.
    #[must_use]
    pub fn zero() -> Number {
        Number::new(BigRational::zero())
    }

    #[must_use]
    pub fn from_i64(value: i64) -> Number {
        Number::new(ratio(value))
    }

    /// Converts a double precision value into an exact rational.
    ///
    /// # Errors
    ///
    /// Returns a *domain* error if the value is not finite.
    pub fn from_f64(value: f64) -> Result<Number, Error> {
        BigRational::from_float(value).map(Number::new).ok_or_else(|| {
            Error::new(
                ErrorKind::Domain,
                "Result is outside the domain of real numbers.",
            )
        })
    }

    #[must_use]
    pub fn value(&self) -> &BigRational {
        &self.value
    }

    #[must_use]
    pub fn unit(&self) -> Option<Unit> {
        self.unit
    }

    /// Returns a copy of the number without its measurement unit.
    #[must_use]
    pub fn without_unit(&self) -> Number {
        Number::new(self.value.clone())
    }

    /// Tests whether the given string contains a valid number: an optional
    /// sign, one or more digits, at most one decimal point with a digit on
    /// each side, and an optional trailing unit symbol from the catalog.
    #[must_use]
    pub fn is_valid(input: &str) -> bool {
        scan(input).is_some()
    }

    /// Parses the given string into a number.
    ///
    /// # Errors
    ///
    /// Returns a *syntax* error if the string is not a valid numeric literal.
    pub fn parse(input: &str) -> Result<Number, Error> {
        let (mantissa, unit) = scan(input).ok_or_else(|| {
            Error::new(
                ErrorKind::Syntax,
                format!("`{input}' is not a valid numeric literal."),
            )
        })?;

        let (integer, fraction) = match mantissa.find('.') {
            Some(dot) => (&mantissa[..dot], &mantissa[dot + 1..]),
            None => (mantissa, ""),
        };
        let digits: String = format!("{integer}{fraction}");
        let numer: BigInt = digits
            .parse()
            .map_err(|_| Error::new(ErrorKind::Syntax, "Numeric literal is malformed."))?;
        let denom = num_traits::pow(BigInt::from(10), fraction.len());

        Ok(Number {
            value: BigRational::new(numer, denom),
            unit,
        })
    }

    /// Converts the number into a 64-bit signed integer, truncating toward
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns a *range* error if the value does not fit.
    pub fn to_long(&self) -> Result<i64, Error> {
        self.value
            .to_integer()
            .to_i64()
            .ok_or_else(|| Error::new(ErrorKind::Range, "Numeric value is too large."))
    }

    /// Converts the number into double precision, possibly losing precision.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(f64::NAN)
    }

    /// Increments the magnitude by one, leaving the unit untouched.
    pub fn increment(&mut self) {
        self.value += BigRational::one();
    }

    /// Compares two numbers after converting both to base units.
    ///
    /// # Errors
    ///
    /// Returns a *unit* error if the operands are not dimensionally
    /// compatible.
    pub fn compare(&self, that: &Number) -> Result<Ordering, Error> {
        unit_check(self, that)?;

        Ok(self.to_base_value().cmp(&that.to_base_value()))
    }

    /// Tests two numbers for equality after converting both to base units.
    ///
    /// # Errors
    ///
    /// Returns a *unit* error if the operands are not dimensionally
    /// compatible.
    pub fn equals(&self, that: &Number) -> Result<bool, Error> {
        Ok(self.compare(that)? == Ordering::Equal)
    }

    /// Magnitude of the number converted into the base unit of its quantity.
    fn to_base_value(&self) -> BigRational {
        match self.unit {
            Some(u) if !u.is_base() => {
                let multiplier = u.multiplier();

                if multiplier > 0 {
                    &self.value * ratio(multiplier)
                } else {
                    &self.value / ratio(-multiplier)
                }
            }
            _ => self.value.clone(),
        }
    }

    /// Applies a double precision function to the magnitude, keeping the
    /// unit.
    fn apply(&self, callback: impl Fn(f64) -> f64) -> Result<Number, Error> {
        let result = callback(self.to_f64());

        if !result.is_finite() {
            return Err(Error::new(
                ErrorKind::Domain,
                "Result is outside the domain of real numbers.",
            ));
        }

        Ok(Number {
            value: BigRational::from_float(result).ok_or_else(|| {
                Error::new(
                    ErrorKind::Domain,
                    "Result is outside the domain of real numbers.",
                )
            })?,
            unit: self.unit,
        })
    }

    /// Applies a double precision function to the magnitudes of two numbers,
    /// keeping the unit of the receiver.
    fn apply2(&self, that: &Number, callback: impl Fn(f64, f64) -> f64) -> Result<Number, Error> {
        let rhs = that.to_f64();

        self.apply(|lhs| callback(lhs, rhs))
    }

    pub fn exp(&self) -> Result<Number, Error> {
        self.apply(f64::exp)
    }

    pub fn exp2(&self) -> Result<Number, Error> {
        self.apply(f64::exp2)
    }

    pub fn exp_m1(&self) -> Result<Number, Error> {
        self.apply(f64::exp_m1)
    }

    pub fn log(&self) -> Result<Number, Error> {
        self.apply(f64::ln)
    }

    pub fn log2(&self) -> Result<Number, Error> {
        self.apply(f64::log2)
    }

    pub fn log10(&self) -> Result<Number, Error> {
        self.apply(f64::log10)
    }

    pub fn log_1p(&self) -> Result<Number, Error> {
        self.apply(f64::ln_1p)
    }

    pub fn pow(&self, that: &Number) -> Result<Number, Error> {
        self.apply2(that, f64::powf)
    }

    pub fn sqrt(&self) -> Result<Number, Error> {
        self.apply(f64::sqrt)
    }

    pub fn cbrt(&self) -> Result<Number, Error> {
        self.apply(f64::cbrt)
    }

    pub fn hypot(&self, that: &Number) -> Result<Number, Error> {
        self.apply2(that, f64::hypot)
    }

    pub fn sin(&self) -> Result<Number, Error> {
        self.apply(f64::sin)
    }

    pub fn cos(&self) -> Result<Number, Error> {
        self.apply(f64::cos)
    }

    pub fn tan(&self) -> Result<Number, Error> {
        self.apply(f64::tan)
    }

    pub fn asin(&self) -> Result<Number, Error> {
        self.apply(f64::asin)
    }

    pub fn acos(&self) -> Result<Number, Error> {
        self.apply(f64::acos)
    }

    pub fn atan(&self) -> Result<Number, Error> {
        self.apply(f64::atan)
    }

    pub fn atan2(&self, that: &Number) -> Result<Number, Error> {
        self.apply2(that, f64::atan2)
    }

    pub fn sinh(&self) -> Result<Number, Error> {
        self.apply(f64::sinh)
    }

    pub fn cosh(&self) -> Result<Number, Error> {
        self.apply(f64::cosh)
    }

    pub fn tanh(&self) -> Result<Number, Error> {
        self.apply(f64::tanh)
    }

    pub fn asinh(&self) -> Result<Number, Error> {
        self.apply(f64::asinh)
    }

    pub fn acosh(&self) -> Result<Number, Error> {
        self.apply(f64::acosh)
    }

    pub fn atanh(&self) -> Result<Number, Error> {
        self.apply(f64::atanh)
    }
}

/// Scans a numeric literal, returning the mantissa slice and the optional
/// trailing unit. Returns `None` if the input is not a valid literal.
fn scan(input: &str) -> Option<(&str, Option<Unit>)> {
    let length = input.len();
    let mut chars = input.char_indices().peekable();
    let start = match chars.peek() {
        Some((_, '+' | '-')) => {
            chars.next();
            if length < 2 {
                return None;
            }
            1
        }
        Some(_) => 0,
        None => return None,
    };
    let mut dot_seen = false;
    let mut previous_is_digit = false;

    while let Some((i, c)) = chars.next() {
        if c == '.' {
            if dot_seen || i == start || !previous_is_digit {
                return None;
            }
            match chars.peek() {
                Some((_, next)) if next.is_ascii_digit() => {}
                _ => return None,
            }
            dot_seen = true;
            previous_is_digit = false;
        } else if c.is_ascii_digit() {
            previous_is_digit = true;
        } else {
            if i == start {
                return None;
            }
            let unit = unit::find_by_symbol(&input[i..])?;

            return Some((&input[..i], Some(unit)));
        }
    }

    Some((input, None))
}

/// Raised when the operands of a binary operation measure different physical
/// quantities.
fn quantity_mismatch(a: Quantity, b: Quantity) -> Error {
    Error::new(
        ErrorKind::Unit,
        format!("Cannot compare {} against {}.", a.name(), b.name()),
    )
}

/// Raised when only one operand of an addition, subtraction or comparison
/// carries a unit.
fn bare_operand(quantity: Quantity) -> Error {
    Error::new(
        ErrorKind::Unit,
        format!(
            "Cannot compare number without a unit against number with {} as measurement unit.",
            quantity.name()
        ),
    )
}

/// Unit compatibility check for addition, subtraction and comparison: both
/// operands must carry units of the same quantity, or neither may carry one.
fn unit_check(a: &Number, b: &Number) -> Result<(), Error> {
    match (a.unit, b.unit) {
        (Some(ua), Some(ub)) if ua.quantity() != ub.quantity() => {
            Err(quantity_mismatch(ua.quantity(), ub.quantity()))
        }
        (Some(u), None) | (None, Some(u)) => Err(bare_operand(u.quantity())),
        _ => Ok(()),
    }
}

/// Reports a base-unit magnitude in the largest catalog unit whose multiplier
/// fits it. Only positive multipliers participate, so sub-base magnitudes stay
/// in the base unit.
fn renormalize(value: BigRational, quantity: Quantity) -> Number {
    for u in unit::all_units_of(quantity) {
        let multiplier = u.multiplier();

        if multiplier > 0 && value >= ratio(multiplier) {
            return Number {
                value: value / ratio(multiplier),
                unit: Some(*u),
            };
        }
    }

    Number {
        value,
        unit: Some(unit::base_unit_of(quantity)),
    }
}

/// Shared implementation of `+` and `-`: strict unit check, arithmetic on
/// base-unit magnitudes, renormalization of the result.
fn additive_op(
    a: &Number,
    b: &Number,
    callback: impl Fn(&BigRational, &BigRational) -> BigRational,
) -> Result<Number, Error> {
    unit_check(a, b)?;

    let result = callback(&a.to_base_value(), &b.to_base_value());

    match a.unit {
        Some(u) => Ok(renormalize(result, u.quantity())),
        None => Ok(Number::new(result)),
    }
}

/// Shared implementation of `*` and `/`: a bare operand is allowed and the
/// result keeps the unit-bearing operand's quantity.
fn multiplicative_op(
    a: &Number,
    b: &Number,
    callback: impl Fn(&BigRational, &BigRational) -> BigRational,
) -> Result<Number, Error> {
    match (a.unit, b.unit) {
        (Some(ua), Some(ub)) if ua.quantity() != ub.quantity() => {
            Err(quantity_mismatch(ua.quantity(), ub.quantity()))
        }
        (Some(u), _) | (None, Some(u)) => Ok(renormalize(
            callback(&a.to_base_value(), &b.to_base_value()),
            u.quantity(),
        )),
        (None, None) => Ok(Number::new(callback(&a.value, &b.value))),
    }
}

impl Add<&Number> for &Number {
    type Output = Result<Number, Error>;

    /// Adds this number to another number.
    ///
    /// # Errors
    ///
    /// Returns a *unit* error if the operands are not dimensionally
    /// compatible.
    fn add(self, other: &Number) -> Result<Number, Error> {
        additive_op(self, other, |a, b| a + b)
    }
}

impl Sub<&Number> for &Number {
    type Output = Result<Number, Error>;

    /// Subtracts a number from this number.
    ///
    /// # Errors
    ///
    /// Returns a *unit* error if the operands are not dimensionally
    /// compatible.
    fn sub(self, other: &Number) -> Result<Number, Error> {
        additive_op(self, other, |a, b| a - b)
    }
}

impl Mul<&Number> for &Number {
    type Output = Result<Number, Error>;

    /// Multiplies this number by another. A dimensionless operand scales the
    /// other one; the result keeps the unit.
    ///
    /// # Errors
    ///
    /// Returns a *unit* error if both operands carry units of different
    /// quantities.
    fn mul(self, other: &Number) -> Result<Number, Error> {
        multiplicative_op(self, other, |a, b| a * b)
    }
}

impl Div<&Number> for &Number {
    type Output = Result<Number, Error>;

    /// Divides this number by another. A dimensionless operand scales the
    /// other one; the result keeps the unit.
    ///
    /// # Errors
    ///
    /// Returns a *range* error on division by zero and a *unit* error if both
    /// operands carry units of different quantities.
    fn div(self, other: &Number) -> Result<Number, Error> {
        if other.value.is_zero() {
            return Err(Error::new(ErrorKind::Range, "Division by zero."));
        }

        multiplicative_op(self, other, |a, b| a / b)
    }
}

impl fmt::Display for Number {
    /// Renders the number as positional base-10 decimal with no exponent,
    /// followed by the unit symbol, if any.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = String::new();

        if self.value.is_negative() {
            result.push('-');
        }

        let magnitude = self.value.abs();

        result.push_str(&magnitude.to_integer().to_string());

        let mut fraction = magnitude.fract();

        if !fraction.is_zero() {
            result.push('.');
            for _ in 0..MAX_FRACTION_DIGITS {
                if fraction.is_zero() {
                    break;
                }
                fraction *= ratio(10);
                let digit = fraction.to_integer();
                result.push(char::from(b'0' + digit.to_u8().unwrap_or(0)));
                fraction = fraction.fract();
            }
        }

        f.write_str(&result)?;
        if let Some(u) = self.unit {
            f.write_str(u.symbol())?;
        }

        Ok(())
    }
}
