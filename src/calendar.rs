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

//! Dates, times of day, months and weekdays.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike};

use crate::error::{Error, ErrorKind};
use crate::number::Number;

/// Month of the year.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

static MONTH_NAMES: &[(&str, Month)] = &[
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
    ("july", Month::July),
    ("august", Month::August),
    ("september", Month::September),
    ("october", Month::October),
    ("november", Month::November),
    ("december", Month::December),
];

impl Month {
    /// English lower case name of the month.
    #[must_use]
    pub fn name(self) -> &'static str {
        MONTH_NAMES[self.number() as usize - 1].0
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Month> {
        MONTH_NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, month)| *month)
    }

    /// 1-based calendar number of the month.
    #[must_use]
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Converts a 1-based calendar number into a month.
    #[must_use]
    pub fn from_number(number: u32) -> Option<Month> {
        match number {
            1..=12 => Some(MONTH_NAMES[number as usize - 1].1),
            _ => None,
        }
    }

    /// Adds an offset to the month, wrapping around the calendar year.
    #[must_use]
    pub fn plus(self, delta: i64) -> Month {
        let index = (i64::from(self as u32) + delta).rem_euclid(12);

        MONTH_NAMES[index as usize].1
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Day of the week.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

static WEEKDAY_NAMES: &[(&str, Weekday)] = &[
    ("sunday", Weekday::Sunday),
    ("monday", Weekday::Monday),
    ("tuesday", Weekday::Tuesday),
    ("wednesday", Weekday::Wednesday),
    ("thursday", Weekday::Thursday),
    ("friday", Weekday::Friday),
    ("saturday", Weekday::Saturday),
];

impl Weekday {
    /// English lower case name of the weekday.
    #[must_use]
    pub fn name(self) -> &'static str {
        WEEKDAY_NAMES[self as usize].0
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Weekday> {
        WEEKDAY_NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, weekday)| *weekday)
    }

    /// 1-based number of the weekday, starting from Sunday.
    #[must_use]
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Converts a 1-based number into a weekday.
    #[must_use]
    pub fn from_number(number: u32) -> Option<Weekday> {
        match number {
            1..=7 => Some(WEEKDAY_NAMES[number as usize - 1].1),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Adds an offset to the weekday, wrapping around the week.
    #[must_use]
    pub fn plus(self, delta: i64) -> Weekday {
        let index = (i64::from(self as u32) + delta).rem_euclid(7);

        WEEKDAY_NAMES[index as usize].1
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_digits(input: &[char]) -> bool {
    !input.is_empty() && input.iter().all(char::is_ascii_digit)
}

fn to_integer(input: &[char]) -> i64 {
    input
        .iter()
        .fold(0, |result, c| result * 10 + i64::from(*c as u8 - b'0'))
}

/// Tests whether the given string looks like an ISO 8601 date.
#[must_use]
pub fn is_date(input: &str) -> bool {
    let chars: Vec<char> = input.chars().collect();

    if chars.len() < 5 {
        return false;
    }

    let Some(dash1) = chars.iter().position(|&c| c == '-') else {
        return false;
    };
    let Some(dash2) = chars[dash1 + 1..]
        .iter()
        .position(|&c| c == '-')
        .map(|i| i + dash1 + 1)
    else {
        return false;
    };

    is_digits(&chars[..dash1]) && is_digits(&chars[dash1 + 1..dash2]) && is_digits(&chars[dash2 + 1..])
}

/// Parses an ISO 8601 date literal, validating it against the Gregorian
/// calendar.
///
/// # Errors
///
/// Returns a *syntax* error if the shape is wrong and a *range* error if the
/// month or day is out of range.
pub fn parse_date(input: &str) -> Result<NaiveDate, Error> {
    let chars: Vec<char> = input.chars().collect();
    let (dash1, dash2) = match (
        chars.iter().position(|&c| c == '-'),
        chars
            .iter()
            .position(|&c| c == '-')
            .and_then(|i| chars[i + 1..].iter().position(|&c| c == '-').map(|j| i + j + 1)),
    ) {
        (Some(dash1), Some(dash2)) => (dash1, dash2),
        _ => {
            return Err(Error::new(
                ErrorKind::Syntax,
                "Given date literal does not contain valid date.",
            ))
        }
    };

    if chars.len() < 5
        || !is_digits(&chars[..dash1])
        || !is_digits(&chars[dash1 + 1..dash2])
        || !is_digits(&chars[dash2 + 1..])
    {
        return Err(Error::new(
            ErrorKind::Syntax,
            "Given date literal does not contain valid date.",
        ));
    }

    let year = to_integer(&chars[..dash1]);
    let month = to_integer(&chars[dash1 + 1..dash2]);
    let day = to_integer(&chars[dash2 + 1..]);

    if !(1..=12).contains(&month) {
        return Err(Error::new(ErrorKind::Range, "Given month is out of range."));
    }

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month as u32, day as u32))
        .ok_or_else(|| Error::new(ErrorKind::Range, "Given date literal is out of range."))
}

/// Tests whether the given string looks like a `HH:MM:SS` time.
#[must_use]
pub fn is_time(input: &str) -> bool {
    let chars: Vec<char> = input.chars().collect();

    chars.len() == 8
        && chars[2] == ':'
        && chars[5] == ':'
        && is_digits(&chars[..2])
        && is_digits(&chars[3..5])
        && is_digits(&chars[6..])
}

/// Parses a `HH:MM:SS` time literal.
///
/// # Errors
///
/// Returns a *syntax* error if the shape is wrong and a *range* error if a
/// component is out of range.
pub fn parse_time(input: &str) -> Result<NaiveTime, Error> {
    if !is_time(input) {
        return Err(Error::new(
            ErrorKind::Syntax,
            "Given time literal does not contain valid time.",
        ));
    }

    let chars: Vec<char> = input.chars().collect();
    let hour = to_integer(&chars[..2]);
    let minute = to_integer(&chars[3..5]);
    let second = to_integer(&chars[6..]);

    NaiveTime::from_hms_opt(hour as u32, minute as u32, second as u32)
        .ok_or_else(|| Error::new(ErrorKind::Range, "Given time literal is out of range."))
}

/// Month of the given date.
#[must_use]
pub fn month_of(date: NaiveDate) -> Month {
    Month::from_number(date.month()).unwrap_or(Month::January)
}

/// Weekday of the given date.
#[must_use]
pub fn weekday_of(date: NaiveDate) -> Weekday {
    Weekday::from_number(date.weekday().num_days_from_sunday() + 1).unwrap_or(Weekday::Sunday)
}

/// Builds a date from components, validating against the Gregorian calendar.
///
/// # Errors
///
/// Returns a *range* error if the components do not form a valid date.
pub fn make_date(year: i64, month: Month, day: i64) -> Result<NaiveDate, Error> {
    i32::try_from(year)
        .ok()
        .zip(u32::try_from(day).ok())
        .and_then(|(year, day)| NaiveDate::from_ymd_opt(year, month.number(), day))
        .ok_or_else(|| Error::new(ErrorKind::Range, "Invalid date."))
}

/// Builds a time of day from components.
///
/// # Errors
///
/// Returns a *range* error if the components do not form a valid time.
pub fn make_time(hour: i64, minute: i64, second: i64) -> Result<NaiveTime, Error> {
    u32::try_from(hour)
        .ok()
        .zip(u32::try_from(minute).ok())
        .zip(u32::try_from(second).ok())
        .and_then(|((hour, minute), second)| NaiveTime::from_hms_opt(hour, minute, second))
        .ok_or_else(|| Error::new(ErrorKind::Range, "Invalid time."))
}

/// Moves a date by the given number of days.
///
/// # Errors
///
/// Returns a *range* error if the resulting date is not representable.
pub fn date_plus_days(date: NaiveDate, days: i64) -> Result<NaiveDate, Error> {
    let result = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };

    result.ok_or_else(|| Error::new(ErrorKind::Range, "Date is out of range."))
}

/// Number of days from `b` to `a`.
#[must_use]
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days()
}

/// Seconds elapsed since midnight.
#[must_use]
pub fn time_as_seconds(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight())
}

/// Moves a time of day by the given number of seconds, wrapping across
/// midnight.
#[must_use]
pub fn time_plus_seconds(time: NaiveTime, seconds: i64) -> NaiveTime {
    let total = (time_as_seconds(time) + seconds).rem_euclid(86400);

    NaiveTime::from_num_seconds_from_midnight_opt(total as u32, 0)
        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap())
}

/// Extracts the day offset from a number used in date and weekday arithmetic:
/// either dimensionless or carrying the day unit.
///
/// # Errors
///
/// Returns a *type* error with the given message for any other unit, and a
/// *range* error if the magnitude does not fit an integer.
pub fn days_delta(number: &Number, message: &str) -> Result<i64, Error> {
    match number.unit() {
        None => number.to_long(),
        Some(u) if u.symbol() == "d" => number.to_long(),
        Some(_) => Err(Error::new(ErrorKind::Type, message)),
    }
}

/// Extracts the second offset from a number used in time arithmetic: either
/// dimensionless or carrying one of the `s`, `min`, `h` or `d` units.
///
/// # Errors
///
/// Returns a *type* error with the given message for any other unit, and a
/// *range* error if the magnitude does not fit an integer.
pub fn seconds_delta(number: &Number, message: &str) -> Result<i64, Error> {
    let scale = match number.unit() {
        None => 1,
        Some(u) => match u.symbol() {
            "s" => 1,
            "min" => 60,
            "h" => 3600,
            "d" => 86400,
            _ => return Err(Error::new(ErrorKind::Type, message)),
        },
    };

    number
        .to_long()?
        .checked_mul(scale)
        .ok_or_else(|| Error::new(ErrorKind::Range, "Numeric value is too large."))
}

/// Extracts a bare integer offset, rejecting any unit.
///
/// # Errors
///
/// Returns a *type* error with the given message if the number carries a
/// unit, and a *range* error if the magnitude does not fit an integer.
pub fn bare_delta(number: &Number, message: &str) -> Result<i64, Error> {
    if number.unit().is_some() {
        return Err(Error::new(ErrorKind::Type, message));
    }

    number.to_long()
}

/// Number of days in the month of the given date.
#[must_use]
pub fn days_in_month(date: NaiveDate) -> i64 {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    let next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };

    next.map_or(31, |next| days_between(next, first))
}

/// Number of days in the year of the given date.
#[must_use]
pub fn days_in_year(date: NaiveDate) -> i64 {
    if is_leap_year(date) {
        366
    } else {
        365
    }
}

/// Tests whether the year of the given date is a Gregorian leap year.
#[must_use]
pub fn is_leap_year(date: NaiveDate) -> bool {
    NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some()
}
